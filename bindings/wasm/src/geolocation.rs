use async_trait::async_trait;
use js_sys::{Promise, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use driveaudit_core::{GeoError, Position, PositionSource};

use crate::common::*;

/// `navigator.geolocation.getCurrentPosition`, one shot.
pub(crate) struct BrowserPosition;

#[async_trait(?Send)]
impl PositionSource for BrowserPosition {
    async fn current_position(&self) -> Result<Position, GeoError> {
        let unsupported = || GeoError::Unavailable("Geolocation is not supported or enabled.".to_string());
        let geolocation = web_sys::window()
            .ok_or_else(unsupported)?
            .navigator()
            .geolocation()
            .map_err(|_| unsupported())?;

        let promise = Promise::new(&mut |resolve, reject| {
            if let Err(e) = geolocation.get_current_position_with_error_callback(&resolve, Some(&reject)) {
                let _ = reject.call1(&JsValue::UNDEFINED, &e);
            }
        });
        let position = JsFuture::from(promise).await
            .map_err(|e| GeoError::Unavailable(describe(&e)))?;

        let coords = Reflect::get(&position, &JsValue::from_str("coords"))
            .map_err(|e| GeoError::Unavailable(describe(&e)))?;
        let latitude = number(&coords, "latitude").map_err(|e| GeoError::Unavailable(e.to_string()))?;
        let longitude = number(&coords, "longitude").map_err(|e| GeoError::Unavailable(e.to_string()))?;

        Ok(Position { latitude, longitude })
    }
}
