use std::{cell::OnceCell, rc::Rc};

use async_trait::async_trait;

use crate::{error::GeoError, tag::Location};

/// A device position in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// One-shot current-position query offered by the device.
#[async_trait(?Send)]
pub trait PositionSource {
    async fn current_position(&self) -> Result<Position, GeoError>;
}

/// Most recent location fix for this page lifetime.
///
/// Written at most once; clones share the same cell.
#[derive(Clone, Debug, Default)]
pub struct SessionLocation {
    fix: Rc<OnceCell<Location>>,
}

impl SessionLocation {
    pub fn new() -> Self { Self::default() }

    /// The stored fix, or `None` if no fix has been captured.
    #[inline] pub fn get(&self) -> Option<Location> { self.fix.get().copied() }

    /// Store a fix. Returns `false` (and keeps the first fix) if one is already set.
    pub fn set(&self, location: Location) -> bool {
        self.fix.set(location).is_ok()
    }
}

/// Query the device once and store the fixed-point fix into `session`.
///
/// Never fails: an unavailable or denied capability is logged and the session
/// location is left unset. Callers spawn this and do not wait on it.
pub async fn capture(source: &dyn PositionSource, session: &SessionLocation) {
    match source.current_position().await {
        Ok(position) => {
            log::info!("[GeoCapture] Latitude: {}, Longitude: {}", position.latitude, position.longitude);
            if !session.set(Location::from_degrees(position.latitude, position.longitude)) {
                log::warn!("[GeoCapture] location already captured, ignoring new fix");
            }
        }
        Err(e) => log::warn!("[GeoCapture] {e}"),
    }
}
