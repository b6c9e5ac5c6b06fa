use chrono::DateTime;

use crate::{
    error::{FlowError, LedgerError},
    ledger::RecentReports,
    tag::{Behavior, FixedCoord, Location},
};

use super::{App, QueryState, ReportForm, View};

/// Number of leading address characters shown in the reporter column.
const REPORTER_PREVIEW_CHARS: usize = 8;

/// One displayed row of a tag's report history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    /// Position in the ledger's arrays.
    pub index: usize,
    pub behavior: Behavior,
    pub location: Location,
    pub reporter: String,
    /// Unix seconds.
    pub timestamp: u64,
}

impl ReportRow {
    /// `"lat, lng"` in decimal degrees.
    #[inline] pub fn coordinates(&self) -> String { self.location.to_string() }

    /// First eight characters of the reporter address followed by `...`.
    pub fn reporter_preview(&self) -> String {
        let mut preview: String = self.reporter.chars().take(REPORTER_PREVIEW_CHARS).collect();
        preview.push_str("...");
        preview
    }

    /// UTC date and time, or the raw value if it is out of range.
    pub fn timestamp_display(&self) -> String {
        i64::try_from(self.timestamp).ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| self.timestamp.to_string())
    }

    /// Table cells in column order: index, behavior, coordinates, reporter, timestamp.
    pub fn cells(&self) -> [String; 5] {
        [
            self.index.to_string(),
            self.behavior.label().to_string(),
            self.coordinates(),
            self.reporter_preview(),
            self.timestamp_display(),
        ]
    }
}

/// Decode the ledger's aligned arrays into display rows, skipping slots whose
/// valid marker is zero. Rows keep ascending ledger index order.
///
/// Arrays that do not cover `count` entries are rejected whole.
pub fn report_rows(reports: &RecentReports) -> Result<Vec<ReportRow>, LedgerError> {
    reports.check_aligned()?;
    let rows = (0..reports.count)
        .filter(|&i| reports.valid[i] > 0)
        .map(|i| ReportRow {
            index: i,
            behavior: Behavior::from_code(reports.behaviors[i]),
            location: Location {
                latitude: FixedCoord(reports.latitudes[i]),
                longitude: FixedCoord(reports.longitudes[i]),
            },
            reporter: reports.reporters[i].clone(),
            timestamp: reports.timestamps[i],
        })
        .collect();
    Ok(rows)
}

/// Fetches a tag's recent reports and re-renders the whole report table.
#[derive(Debug, Default)]
pub struct ReportHistory {
    state: QueryState,
}

impl ReportHistory {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn state(&self) -> QueryState { self.state }

    /// Run the query. On failure the table keeps its prior contents and visibility.
    pub async fn run(&mut self, app: &App, form: &ReportForm, view: &mut dyn View) -> Option<Vec<ReportRow>> {
        self.transition(QueryState::Fetching);
        match self.fetch(app, form).await {
            Ok(rows) => {
                view.replace_reports(&rows);
                view.set_reports_visible(true);
                self.transition(QueryState::Succeeded);
                Some(rows)
            }
            Err(e) => {
                self.transition(QueryState::Failed);
                log::error!("[ReportHistory] {e}");
                None
            }
        }
    }

    async fn fetch(&self, app: &App, form: &ReportForm) -> Result<Vec<ReportRow>, FlowError> {
        let reports = app.ledger().get_recent_driver_reports(&form.tag()).await?;
        log::info!("[ReportHistory] Num Reports: {}", reports.count);
        Ok(report_rows(&reports)?)
    }

    fn transition(&mut self, next: QueryState) {
        log::debug!("[ReportHistory] {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
