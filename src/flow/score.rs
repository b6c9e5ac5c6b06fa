use std::fmt;

use crate::error::FlowError;

use super::{App, QueryState, ReportForm, View};

/// Severity band of a driver score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScoreBand {
    /// Below 20.
    Low,
    /// 20 up to, not including, 50.
    Medium,
    /// 50 and above.
    High,
}

impl ScoreBand {
    pub const MEDIUM_FROM: f64 = 20.0;
    pub const HIGH_FROM: f64 = 50.0;

    /// Classify a score. Returns `None` only for NaN, which falls in no band.
    pub fn classify(score: f64) -> Option<Self> {
        if score.is_nan() {
            None
        } else if score < Self::MEDIUM_FROM {
            Some(ScoreBand::Low)
        } else if score < Self::HIGH_FROM {
            Some(ScoreBand::Medium)
        } else {
            Some(ScoreBand::High)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Low => "low",
            ScoreBand::Medium => "medium",
            ScoreBand::High => "high",
        }
    }

    /// Indicator background color.
    pub fn color(self) -> &'static str {
        match self {
            ScoreBand::Low => "green",
            ScoreBand::Medium => "orange",
            ScoreBand::High => "red",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fetches a tag's driver score and shows it with a severity color.
#[derive(Debug, Default)]
pub struct ScoreLookup {
    state: QueryState,
}

impl ScoreLookup {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn state(&self) -> QueryState { self.state }

    /// Run the query. On failure the indicator is left as it was.
    pub async fn run(&mut self, app: &App, form: &ReportForm, view: &mut dyn View) -> Option<f64> {
        self.transition(QueryState::Fetching);
        match self.fetch(app, form).await {
            Ok(score) => {
                let band = ScoreBand::classify(score);
                view.show_score(score, band);
                view.set_score_visible(true);
                self.transition(QueryState::Succeeded);
                Some(score)
            }
            Err(e) => {
                self.transition(QueryState::Failed);
                log::error!("[ScoreLookup] {e}");
                None
            }
        }
    }

    async fn fetch(&self, app: &App, form: &ReportForm) -> Result<f64, FlowError> {
        let score = app.ledger().get_driver_score(&form.tag()).await?;
        log::info!("[ScoreLookup] Driver Score: {score}");
        Ok(score)
    }

    fn transition(&mut self, next: QueryState) {
        log::debug!("[ScoreLookup] {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
