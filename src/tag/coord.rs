use std::fmt;

/// Fixed-point scale: coordinates are stored as `floor(degrees * 1e5 + 0.5)`.
pub const COORD_SCALE: f64 = 1e5;

/// A signed fixed-point coordinate, 1e-5 degree resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedCoord(pub i64);

impl FixedCoord {
    /// Encode decimal degrees. Ties round toward positive infinity, so
    /// `-0.5` units encodes as `0` and `-2.5` units as `-2`.
    #[inline]
    pub fn encode(degrees: f64) -> Self {
        Self((degrees * COORD_SCALE + 0.5).floor() as i64)
    }

    /// Decode back to decimal degrees.
    #[inline]
    pub fn degrees(self) -> f64 {
        self.0 as f64 / COORD_SCALE
    }

    #[inline] pub fn value(self) -> i64 { self.0 }
}

/// A latitude/longitude fix in fixed-point form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub latitude: FixedCoord,
    pub longitude: FixedCoord,
}

impl Location {
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self { latitude: FixedCoord::encode(latitude), longitude: FixedCoord::encode(longitude) }
    }

    /// Values written to the ledger. The ABI has no "absent" encoding,
    /// so a missing fix is written as `(0, 0)`.
    pub fn ledger_values(location: Option<Location>) -> (i64, i64) {
        let location = location.unwrap_or_default();
        (location.latitude.value(), location.longitude.value())
    }
}

/// `"lat, lng"` in decimal degrees.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude.degrees(), self.longitude.degrees())
    }
}
