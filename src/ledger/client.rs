use std::rc::Rc;

use tokio::sync::OnceCell;

use crate::{error::LedgerError, tag::Tag};
use super::{Account, Contract, Provider, RecentReports, ReportCall, TransactionResult};

/// Handle to the report contract behind a wallet provider.
///
/// The contract instance is resolved lazily on first use and cached. Callers
/// that arrive while the first resolution is still pending wait on it instead
/// of starting their own. A failed resolution is not cached.
pub struct LedgerClient {
    provider: Rc<dyn Provider>,
    contract: OnceCell<Rc<dyn Contract>>,
}

impl LedgerClient {
    pub fn new(provider: Rc<dyn Provider>) -> Self {
        Self { provider, contract: OnceCell::new() }
    }

    /// Whether the contract instance has been resolved.
    #[inline] pub fn is_resolved(&self) -> bool { self.contract.initialized() }

    /// Get the deployed contract, resolving it on first use.
    pub async fn instance(&self) -> Result<Rc<dyn Contract>, LedgerError> {
        let contract = self.contract
            .get_or_try_init(|| async {
                log::debug!("[LedgerClient] resolving deployed contract");
                self.provider.deployed().await
            })
            .await?;
        Ok(Rc::clone(contract))
    }

    /// The wallet's active account. Queried on every call.
    pub async fn active_account(&self) -> Result<Account, LedgerError> {
        self.provider.accounts().await?
            .into_iter()
            .next()
            .ok_or_else(|| LedgerError::Unavailable("wallet exposes no accounts".to_string()))
    }

    /// File a report from `from`. Mutates ledger state.
    pub async fn file_report(&self, from: &Account, call: &ReportCall) -> Result<TransactionResult, LedgerError> {
        self.instance().await?.file_report(from, call).await
    }

    /// Fetch the report arrays for `tag`. The tuple is returned whole or not at all.
    pub async fn get_recent_driver_reports(&self, tag: &Tag) -> Result<RecentReports, LedgerError> {
        let reports = self.instance().await?
            .get_recent_driver_reports(&tag.canonical())
            .await?;
        reports.check_aligned()?;
        Ok(reports)
    }

    /// Fetch the current driver score for `tag`.
    pub async fn get_driver_score(&self, tag: &Tag) -> Result<f64, LedgerError> {
        self.instance().await?.get_driver_score(&tag.canonical()).await
    }
}
