mod history;
#[cfg(test)]
pub(crate) mod mock;
mod score;
mod submission;
mod view;

pub use history::{report_rows, ReportHistory, ReportRow};
pub use score::{ScoreBand, ScoreLookup};
pub use submission::{FiledRecord, ReportSubmission, SubmissionState};
pub use view::View;

use std::rc::Rc;

use crate::{geo::SessionLocation, ledger::{LedgerClient, Provider}, tag::Tag};

/// State of a read-only query flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueryState {
    #[default]
    Idle,
    Fetching,
    Succeeded,
    Failed,
}

/// Snapshot of the report form, taken when a flow is triggered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportForm {
    pub state: String,
    pub plate: String,
    /// Raw value of the behavior selector.
    pub behavior: String,
}

impl ReportForm {
    pub fn new(state: impl Into<String>, plate: impl Into<String>, behavior: impl Into<String>) -> Self {
        Self { state: state.into(), plate: plate.into(), behavior: behavior.into() }
    }

    #[inline] pub fn tag(&self) -> Tag { Tag::new(self.state.as_str(), self.plate.as_str()) }
}

/// Context shared by every flow for the lifetime of the page.
pub struct App {
    ledger: LedgerClient,
    location: SessionLocation,
}

impl App {
    pub fn new(provider: Rc<dyn Provider>) -> Self {
        Self { ledger: LedgerClient::new(provider), location: SessionLocation::new() }
    }

    #[inline] pub fn ledger(&self) -> &LedgerClient { &self.ledger }

    /// Location cache written by geolocation capture.
    #[inline] pub fn location(&self) -> &SessionLocation { &self.location }

    /// Put the page into its initial state: report table and score hidden,
    /// active account displayed when the wallet exposes one.
    pub async fn init(&self, view: &mut dyn View) {
        view.set_reports_visible(false);
        view.set_score_visible(false);

        match self.ledger.active_account().await {
            Ok(account) => {
                log::info!("Account: {account}");
                view.show_account(&account);
            }
            Err(e) => log::warn!("[App.init] {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::LedgerError, ledger::Account};
    use super::mock::{MockContract, MockProvider, MockView};

    #[test]
    fn form_builds_verbatim_tag() {
        let form = ReportForm::new("ca", " 7abc", "1");
        assert_eq!(form.tag().canonical(), "ca 7abc");
    }

    #[tokio::test]
    async fn init_hides_results_and_shows_account() {
        let app = App::new(MockProvider::new(MockContract::default()).with_accounts(&["0xfeed"]));
        let mut view = MockView::default();
        view.reports_visible = true;
        view.score_visible = true;

        app.init(&mut view).await;
        assert!(!view.reports_visible);
        assert!(!view.score_visible);
        assert_eq!(view.account, Some(Account("0xfeed".into())));
    }

    #[tokio::test]
    async fn init_without_wallet_still_hides_results() {
        let provider = MockProvider::new(MockContract::default())
            .with_account_error(LedgerError::Unavailable("no provider".into()));
        let app = App::new(provider);
        let mut view = MockView::default();

        app.init(&mut view).await;
        assert!(!view.score_visible);
        assert_eq!(view.account, None);
    }
}
