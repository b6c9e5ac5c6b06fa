//! Error taxonomy for the client workflow.

use thiserror::Error;

/// Errors raised by the ledger capability or the client wrapping it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// No wallet provider or no account is available.
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
    /// The ledger declined a state-mutating call.
    #[error("Transaction rejected: {0}")]
    TransactionRejected(String),
    /// Transport failure on any call.
    #[error("Network error: {0}")]
    Network(String),
    /// The ledger answered with a tuple that does not line up.
    #[error("Malformed ledger response: {0}")]
    MalformedResponse(String),
}

/// Errors raised by the device position capability.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GeoError {
    /// The device has no position capability, or the user denied it.
    #[error("Geolocation unavailable: {0}")]
    Unavailable(String),
}

/// Errors that terminate a flow. Always caught and logged at the flow boundary.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    /// The behavior selection is not an integer code.
    #[error("Invalid behavior selection {0:?}")]
    InvalidBehavior(String),
}
