#![doc = "DriveAudit client workflow: file behavior reports against a vehicle tag and query its history and driver score"]
mod config;
mod error;
mod flow;
mod geo;
mod ledger;
mod tag;

#[doc(inline)]
pub use config::Config;

#[doc(inline)]
pub use error::{FlowError, GeoError, LedgerError};

#[doc(inline)]
pub use flow::{
    report_rows, App, FiledRecord, QueryState, ReportForm, ReportHistory, ReportRow,
    ReportSubmission, ScoreBand, ScoreLookup, SubmissionState, View,
};

#[doc(inline)]
pub use geo::{capture, Position, PositionSource, SessionLocation};

#[doc(inline)]
pub use ledger::{
    Account, Contract, LedgerClient, Provider, RecentReports, ReportCall, TransactionResult,
    REPORT_EVENT,
};

#[doc(inline)]
pub use tag::{canonical_tag, Behavior, BehaviorCode, FixedCoord, Location, Tag};
