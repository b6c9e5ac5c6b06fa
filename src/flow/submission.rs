use std::fmt;

use crate::{
    error::FlowError,
    ledger::{Account, ReportCall, REPORT_EVENT},
    tag::{BehaviorCode, Tag},
};

use super::{App, ReportForm, View};

/// Progress of a report submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    AccountResolving,
    Submitting,
    Succeeded,
    Failed,
}

/// A report accepted by the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FiledRecord {
    pub tag: Tag,
    pub account: Account,
    pub tx: String,
}

impl FiledRecord {
    /// `Tag CA--7ABC123 was filed by user 0x...`
    pub fn summary(&self) -> String {
        format!("Tag {} was filed by user {}", self.tag, self.account)
    }

    /// `TransactionID=0x...`
    pub fn transaction_line(&self) -> String {
        format!("TransactionID={}", self.tx)
    }
}

impl fmt::Display for FiledRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.summary(), self.transaction_line())
    }
}

/// Files one report: resolve the active account, assemble the call from the
/// form and the session location, send it, and show the resulting record.
///
/// There is no retry. A failure leaves the displayed record untouched.
#[derive(Debug, Default)]
pub struct ReportSubmission {
    state: SubmissionState,
}

impl ReportSubmission {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn state(&self) -> SubmissionState { self.state }

    /// Run the submission to completion. Errors are logged, never returned.
    pub async fn run(&mut self, app: &App, form: &ReportForm, view: &mut dyn View) -> Option<FiledRecord> {
        self.state = SubmissionState::Idle;
        // A score from an earlier query must not stay on screen during a new submission.
        view.set_score_visible(false);

        match self.submit(app, form).await {
            Ok(record) => {
                self.transition(SubmissionState::Succeeded);
                view.show_record(&record);
                Some(record)
            }
            Err(e) => {
                self.transition(SubmissionState::Failed);
                log::error!("[ReportSubmission] {e}");
                None
            }
        }
    }

    async fn submit(&mut self, app: &App, form: &ReportForm) -> Result<FiledRecord, FlowError> {
        self.transition(SubmissionState::AccountResolving);
        let account = app.ledger().active_account().await?;

        let behavior = BehaviorCode::parse(&form.behavior)
            .ok_or_else(|| FlowError::InvalidBehavior(form.behavior.clone()))?;
        let tag = form.tag();

        let location = app.location().get();
        if location.is_none() {
            log::warn!("[ReportSubmission] no location fix captured, filing {tag} without coordinates");
        }
        let call = ReportCall::new(&tag, behavior, location);
        log::info!("[ReportSubmission] Determined Coords: {},{}", call.latitude, call.longitude);

        self.transition(SubmissionState::Submitting);
        let result = app.ledger().file_report(&account, &call).await?;

        if result.emitted(REPORT_EVENT) {
            log::info!("[ReportSubmission] {REPORT_EVENT} observed in tx {}", result.tx);
        } else {
            log::warn!("[ReportSubmission] tx {} carried no {REPORT_EVENT} event", result.tx);
        }

        Ok(FiledRecord { tag, account, tx: result.tx })
    }

    fn transition(&mut self, next: SubmissionState) {
        log::debug!("[ReportSubmission] {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
