mod client;
mod types;

pub use client::LedgerClient;
pub use types::{Account, RecentReports, ReportCall, TransactionResult, REPORT_EVENT};

use std::rc::Rc;

use async_trait::async_trait;

use crate::error::LedgerError;

/// Wallet/provider handle: knows the user's accounts and how to locate the
/// deployed report contract.
#[async_trait(?Send)]
pub trait Provider {
    /// Accounts exposed by the wallet, active account first.
    async fn accounts(&self) -> Result<Vec<Account>, LedgerError>;

    /// Resolve the deployed contract instance. Expensive; [`LedgerClient`]
    /// calls it at most once per successful resolution.
    async fn deployed(&self) -> Result<Rc<dyn Contract>, LedgerError>;
}

/// The deployed report contract. Each call is one ledger round trip.
#[async_trait(?Send)]
pub trait Contract {
    /// State-mutating: file a report attributed to `from`.
    async fn file_report(&self, from: &Account, call: &ReportCall) -> Result<TransactionResult, LedgerError>;

    /// Read-only: recent reports stored under `tag_id`.
    async fn get_recent_driver_reports(&self, tag_id: &str) -> Result<RecentReports, LedgerError>;

    /// Read-only: the ledger's current score for `tag_id`.
    async fn get_driver_score(&self, tag_id: &str) -> Result<f64, LedgerError>;
}
