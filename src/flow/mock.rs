//! In-memory stand-ins for the wallet, the contract and the page.

use std::{cell::{Cell, RefCell}, rc::Rc};

use async_trait::async_trait;

use crate::{
    error::LedgerError,
    ledger::{Account, Contract, Provider, RecentReports, ReportCall, TransactionResult, REPORT_EVENT},
};

use super::{FiledRecord, ReportRow, ScoreBand, View};

#[derive(Default)]
struct ContractState {
    tx: String,
    score: f64,
    reports: RecentReports,
    file_error: Option<LedgerError>,
    read_error: Option<LedgerError>,
    filed: Vec<(Account, ReportCall)>,
    report_queries: Vec<String>,
    score_queries: Vec<String>,
}

/// Contract double. Clones share state, so a test can keep one handle while
/// the provider hands out others.
#[derive(Clone, Default)]
pub(crate) struct MockContract {
    inner: Rc<RefCell<ContractState>>,
}

impl MockContract {
    /// Aligned arrays with the given valid markers and behavior codes.
    pub(crate) fn history(valid: &[u64], behaviors: &[i64]) -> RecentReports {
        let n = valid.len();
        RecentReports {
            count: n,
            valid: valid.to_vec(),
            reporters: (0..n).map(|i| format!("0x{i:040x}")).collect(),
            behaviors: behaviors.to_vec(),
            timestamps: (0..n as u64).map(|i| 1_600_000_000 + i).collect(),
            latitudes: (0..n as i64).map(|i| i * 100_000).collect(),
            longitudes: (0..n as i64).map(|i| -i * 100_000).collect(),
        }
    }

    pub(crate) fn with_tx(self, tx: &str) -> Self {
        self.inner.borrow_mut().tx = tx.to_string();
        self
    }

    pub(crate) fn with_score(self, score: f64) -> Self {
        self.inner.borrow_mut().score = score;
        self
    }

    pub(crate) fn with_reports(self, reports: RecentReports) -> Self {
        self.inner.borrow_mut().reports = reports;
        self
    }

    pub(crate) fn with_file_error(self, error: LedgerError) -> Self {
        self.inner.borrow_mut().file_error = Some(error);
        self
    }

    pub(crate) fn with_read_error(self, error: LedgerError) -> Self {
        self.inner.borrow_mut().read_error = Some(error);
        self
    }

    /// Every `file_report` call received, including rejected ones.
    pub(crate) fn filed(&self) -> Vec<(Account, ReportCall)> { self.inner.borrow().filed.clone() }

    pub(crate) fn report_queries(&self) -> Vec<String> { self.inner.borrow().report_queries.clone() }

    pub(crate) fn score_queries(&self) -> Vec<String> { self.inner.borrow().score_queries.clone() }
}

#[async_trait(?Send)]
impl Contract for MockContract {
    async fn file_report(&self, from: &Account, call: &ReportCall) -> Result<TransactionResult, LedgerError> {
        let mut state = self.inner.borrow_mut();
        state.filed.push((from.clone(), call.clone()));
        match &state.file_error {
            Some(e) => Err(e.clone()),
            None => Ok(TransactionResult { tx: state.tx.clone(), events: vec![REPORT_EVENT.to_string()] }),
        }
    }

    async fn get_recent_driver_reports(&self, tag_id: &str) -> Result<RecentReports, LedgerError> {
        let mut state = self.inner.borrow_mut();
        state.report_queries.push(tag_id.to_string());
        match &state.read_error {
            Some(e) => Err(e.clone()),
            None => Ok(state.reports.clone()),
        }
    }

    async fn get_driver_score(&self, tag_id: &str) -> Result<f64, LedgerError> {
        let mut state = self.inner.borrow_mut();
        state.score_queries.push(tag_id.to_string());
        match &state.read_error {
            Some(e) => Err(e.clone()),
            None => Ok(state.score),
        }
    }
}

/// Wallet double that counts contract resolutions.
pub(crate) struct MockProvider {
    contract: MockContract,
    accounts: RefCell<Result<Vec<Account>, LedgerError>>,
    slow: Cell<bool>,
    failures_left: Cell<usize>,
    resolutions: Cell<usize>,
}

impl MockProvider {
    pub(crate) fn new(contract: MockContract) -> Rc<Self> {
        Rc::new(Self {
            contract,
            accounts: RefCell::new(Ok(vec![Account("0x00000000000000000000000000000000000000aa".into())])),
            slow: Cell::new(false),
            failures_left: Cell::new(0),
            resolutions: Cell::new(0),
        })
    }

    pub(crate) fn with_accounts(self: Rc<Self>, accounts: &[&str]) -> Rc<Self> {
        *self.accounts.borrow_mut() = Ok(accounts.iter().map(|a| Account(a.to_string())).collect());
        self
    }

    pub(crate) fn with_account_error(self: Rc<Self>, error: LedgerError) -> Rc<Self> {
        *self.accounts.borrow_mut() = Err(error);
        self
    }

    /// Suspend once inside `deployed`, so other tasks run while resolution is pending.
    pub(crate) fn with_slow_resolution(self: Rc<Self>) -> Rc<Self> {
        self.slow.set(true);
        self
    }

    pub(crate) fn with_failed_resolutions(self: Rc<Self>, count: usize) -> Rc<Self> {
        self.failures_left.set(count);
        self
    }

    pub(crate) fn resolutions(&self) -> usize { self.resolutions.get() }
}

#[async_trait(?Send)]
impl Provider for MockProvider {
    async fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        self.accounts.borrow().clone()
    }

    async fn deployed(&self) -> Result<Rc<dyn Contract>, LedgerError> {
        self.resolutions.set(self.resolutions.get() + 1);
        if self.slow.get() {
            tokio::task::yield_now().await;
        }
        if self.failures_left.get() > 0 {
            self.failures_left.set(self.failures_left.get() - 1);
            return Err(LedgerError::Unavailable("contract artifact not found".into()));
        }
        Ok(Rc::new(self.contract.clone()))
    }
}

/// Page double recording what the flows displayed.
#[derive(Debug, Default)]
pub(crate) struct MockView {
    pub(crate) account: Option<Account>,
    pub(crate) record: Option<FiledRecord>,
    pub(crate) rows: Vec<ReportRow>,
    pub(crate) reports_visible: bool,
    pub(crate) score: Option<(f64, Option<ScoreBand>)>,
    pub(crate) score_visible: bool,
    pub(crate) table_renders: usize,
}

impl View for MockView {
    fn show_account(&mut self, account: &Account) { self.account = Some(account.clone()); }

    fn show_record(&mut self, record: &FiledRecord) { self.record = Some(record.clone()); }

    fn replace_reports(&mut self, rows: &[ReportRow]) {
        self.rows = rows.to_vec();
        self.table_renders += 1;
    }

    fn set_reports_visible(&mut self, visible: bool) { self.reports_visible = visible; }

    fn show_score(&mut self, score: f64, band: Option<ScoreBand>) { self.score = Some((score, band)); }

    fn set_score_visible(&mut self, visible: bool) { self.score_visible = visible; }
}
