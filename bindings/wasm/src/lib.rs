use wasm_bindgen::prelude::*;

mod app;
mod common;
mod dom;
mod geolocation;
mod logger;
mod provider;

pub use app::WasmApp;

/// Called automatically when the WASM module is instantiated.
/// Sets up panic hook so Rust panics appear as console.error in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
