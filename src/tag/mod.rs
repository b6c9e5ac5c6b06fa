mod behavior;
mod coord;

pub use behavior::{Behavior, BehaviorCode};
pub use coord::{FixedCoord, Location};

use std::fmt;

/// A vehicle identified by its issuing state and plate number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tag {
    state: String,
    plate: String,
}

impl Tag {
    /// Create a tag from caller-supplied state and plate, kept verbatim.
    pub fn new(state: impl Into<String>, plate: impl Into<String>) -> Self {
        Self { state: state.into(), plate: plate.into() }
    }

    #[inline] pub fn state(&self) -> &str { &self.state }

    #[inline] pub fn plate(&self) -> &str { &self.plate }

    /// The ledger-side identifier: state followed directly by plate.
    /// No trimming or case folding; callers must supply consistent casing.
    #[inline]
    pub fn canonical(&self) -> String {
        canonical_tag(&self.state, &self.plate)
    }
}

/// Human-readable form used in record lines, e.g. `CA--7ABC123`.
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}--{}", self.state, self.plate)
    }
}

/// Concatenate state and plate into the canonical tag identifier.
#[inline]
pub fn canonical_tag(state: &str, plate: &str) -> String {
    let mut id = String::with_capacity(state.len() + plate.len());
    id.push_str(state);
    id.push_str(plate);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn canonical_is_plain_concatenation() {
        assert_eq!(canonical_tag("CA", "7ABC123"), "CA7ABC123");
        assert_eq!(Tag::new("ny", "abc").canonical(), "nyabc");
    }

    #[test]
    fn canonical_keeps_whitespace_and_case() {
        let tag = Tag::new(" Tx", "Ab 12 ");
        assert_eq!(tag.canonical(), " TxAb 12 ");
        assert_ne!(Tag::new("TX", "AB12").canonical(), Tag::new("tx", "ab12").canonical());
    }

    #[test]
    fn empty_parts() {
        assert_eq!(canonical_tag("", ""), "");
        assert_eq!(canonical_tag("", "P1"), "P1");
    }

    #[test]
    fn display_uses_double_dash() {
        assert_eq!(Tag::new("WA", "XYZ987").to_string(), "WA--XYZ987");
    }

    proptest! {
        #[test]
        fn canonical_equals_concat(state in "\\PC{0,8}", plate in "\\PC{0,12}") {
            prop_assert_eq!(canonical_tag(&state, &plate), format!("{state}{plate}"));
        }
    }
}
