use std::fmt;

/// Raw behavior code as stored on the ledger.
///
/// Codes outside `1..=5` are carried through unchanged; they only matter when
/// the code is turned into a [`Behavior`] for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BehaviorCode(pub i64);

impl BehaviorCode {
    #[inline] pub fn value(self) -> i64 { self.0 }

    #[inline] pub fn behavior(self) -> Behavior { Behavior::from_code(self.0) }

    /// Parse the value of the behavior selector.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(Self)
    }
}

/// Closed set of reportable behaviors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Behavior {
    Aggressive,
    Speeding,
    Proximity,
    Erratic,
    Hazard,
    /// Any code outside the known set.
    Unknown,
}

impl Behavior {
    pub const ALL: [Behavior; 5] = [
        Behavior::Aggressive,
        Behavior::Speeding,
        Behavior::Proximity,
        Behavior::Erratic,
        Behavior::Hazard,
    ];

    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Behavior::Aggressive,
            2 => Behavior::Speeding,
            3 => Behavior::Proximity,
            4 => Behavior::Erratic,
            5 => Behavior::Hazard,
            _ => Behavior::Unknown,
        }
    }

    /// The ledger code, or `None` for [`Behavior::Unknown`].
    pub fn code(self) -> Option<BehaviorCode> {
        let code = match self {
            Behavior::Aggressive => 1,
            Behavior::Speeding => 2,
            Behavior::Proximity => 3,
            Behavior::Erratic => 4,
            Behavior::Hazard => 5,
            Behavior::Unknown => return None,
        };
        Some(BehaviorCode(code))
    }

    pub fn label(self) -> &'static str {
        match self {
            Behavior::Aggressive => "Aggressive",
            Behavior::Speeding => "Speeding",
            Behavior::Proximity => "Proximity",
            Behavior::Erratic => "Erratic",
            Behavior::Hazard => "Hazard",
            Behavior::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_fixed_labels() {
        let labels: Vec<&str> = (1..=5).map(|c| Behavior::from_code(c).label()).collect();
        assert_eq!(labels, ["Aggressive", "Speeding", "Proximity", "Erratic", "Hazard"]);
    }

    #[test]
    fn other_codes_are_unknown() {
        for code in [0, -1, 6, 42, i64::MIN, i64::MAX] {
            assert_eq!(Behavior::from_code(code), Behavior::Unknown);
            assert_eq!(BehaviorCode(code).behavior().label(), "Unknown");
        }
    }

    #[test]
    fn code_round_trips_for_known_behaviors() {
        for behavior in Behavior::ALL {
            let code = behavior.code().unwrap();
            assert_eq!(code.behavior(), behavior);
        }
        assert_eq!(Behavior::Unknown.code(), None);
    }

    #[test]
    fn parse_selector_value() {
        assert_eq!(BehaviorCode::parse("3"), Some(BehaviorCode(3)));
        assert_eq!(BehaviorCode::parse(" 2 "), Some(BehaviorCode(2)));
        assert_eq!(BehaviorCode::parse("-4"), Some(BehaviorCode(-4)));
        assert_eq!(BehaviorCode::parse(""), None);
        assert_eq!(BehaviorCode::parse("speeding"), None);
    }
}
