use crate::ledger::Account;

use super::{FiledRecord, ReportRow, ScoreBand};

/// Display targets the flows write to.
pub trait View {
    fn show_account(&mut self, account: &Account);

    /// Replace the record line shown after a successful submission.
    fn show_record(&mut self, record: &FiledRecord);

    /// Replace the whole report table body with `rows`.
    fn replace_reports(&mut self, rows: &[ReportRow]);

    /// Show or hide the report table and its title.
    fn set_reports_visible(&mut self, visible: bool);

    /// Write the score text and indicator color; `None` leaves the color unset.
    fn show_score(&mut self, score: f64, band: Option<ScoreBand>);

    fn set_score_visible(&mut self, visible: bool);
}
