use std::fmt;

use serde::Deserialize;

use crate::{error::LedgerError, tag::{BehaviorCode, Location, Tag}};

/// Event the contract emits when a report is filed.
pub const REPORT_EVENT: &str = "LogReported";

/// An account address as reported by the wallet. Deserializes from a bare string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Account(pub String);

impl Account {
    #[inline] pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Arguments of the contract's `fileReport` call, in ABI order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportCall {
    pub tag_id: String,
    pub plate: String,
    pub state: String,
    pub behavior: i64,
    pub latitude: i64,
    pub longitude: i64,
}

impl ReportCall {
    pub fn new(tag: &Tag, behavior: BehaviorCode, location: Option<Location>) -> Self {
        let (latitude, longitude) = Location::ledger_values(location);
        Self {
            tag_id: tag.canonical(),
            plate: tag.plate().to_string(),
            state: tag.state().to_string(),
            behavior: behavior.value(),
            latitude,
            longitude,
        }
    }
}

/// Outcome of a successful state-mutating call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionResult {
    /// Transaction hash.
    pub tx: String,
    /// Names of the events decoded from the transaction logs.
    pub events: Vec<String>,
}

impl TransactionResult {
    pub fn emitted(&self, event: &str) -> bool {
        self.events.iter().any(|e| e == event)
    }
}

/// Index-aligned report arrays returned by `getRecentDriverReports`.
///
/// Slots whose `valid` value is zero are padding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecentReports {
    pub count: usize,
    pub valid: Vec<u64>,
    pub reporters: Vec<String>,
    pub behaviors: Vec<i64>,
    pub timestamps: Vec<u64>,
    pub latitudes: Vec<i64>,
    pub longitudes: Vec<i64>,
}

impl RecentReports {
    /// Check that every array covers `count` entries and that the arrays agree in length.
    pub fn check_aligned(&self) -> Result<(), LedgerError> {
        let lengths = [
            ("valid", self.valid.len()),
            ("reporters", self.reporters.len()),
            ("behaviors", self.behaviors.len()),
            ("timestamps", self.timestamps.len()),
            ("latitudes", self.latitudes.len()),
            ("longitudes", self.longitudes.len()),
        ];

        let expected = self.valid.len();
        if let Some((name, len)) = lengths.iter().find(|(_, len)| *len != expected) {
            return Err(LedgerError::MalformedResponse(format!(
                "array '{name}' has {len} entries, expected {expected}"
            )));
        }
        if expected < self.count {
            return Err(LedgerError::MalformedResponse(format!(
                "count is {} but arrays hold {expected} entries", self.count
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reports(count: usize, len: usize) -> RecentReports {
        RecentReports {
            count,
            valid: vec![1; len],
            reporters: vec!["0xabc".into(); len],
            behaviors: vec![1; len],
            timestamps: vec![0; len],
            latitudes: vec![0; len],
            longitudes: vec![0; len],
        }
    }

    #[test]
    fn aligned_arrays_pass() {
        assert!(reports(3, 3).check_aligned().is_ok());
        assert!(reports(2, 5).check_aligned().is_ok());
        assert!(RecentReports::default().check_aligned().is_ok());
    }

    #[test]
    fn short_arrays_fail() {
        let err = reports(4, 3).check_aligned().unwrap_err();
        assert!(matches!(err, LedgerError::MalformedResponse(_)));
    }

    #[test]
    fn mismatched_arrays_fail() {
        let mut r = reports(3, 3);
        r.longitudes.pop();
        let err = r.check_aligned().unwrap_err();
        assert_eq!(
            err,
            LedgerError::MalformedResponse("array 'longitudes' has 2 entries, expected 3".into())
        );
    }

    #[test]
    fn report_call_follows_abi_fields() {
        let tag = Tag::new("OR", "5XYZ");
        let call = ReportCall::new(&tag, BehaviorCode(2), Some(Location::from_degrees(45.5, -122.6)));
        assert_eq!(call.tag_id, "OR5XYZ");
        assert_eq!((call.plate.as_str(), call.state.as_str()), ("5XYZ", "OR"));
        assert_eq!((call.behavior, call.latitude, call.longitude), (2, 4550000, -12260000));

        let unplaced = ReportCall::new(&tag, BehaviorCode(9), None);
        assert_eq!((unplaced.behavior, unplaced.latitude, unplaced.longitude), (9, 0, 0));
    }

    #[test]
    fn accounts_decode_from_plain_strings() {
        let accounts: Vec<Account> = serde_json::from_str(r#"["0xabc", "0xdef"]"#).unwrap();
        assert_eq!(accounts, vec![Account("0xabc".into()), Account("0xdef".into())]);
    }

    #[test]
    fn event_lookup() {
        let result = TransactionResult { tx: "0x1".into(), events: vec![REPORT_EVENT.into()] };
        assert!(result.emitted(REPORT_EVENT));
        assert!(!TransactionResult::default().emitted(REPORT_EVENT));
    }
}
