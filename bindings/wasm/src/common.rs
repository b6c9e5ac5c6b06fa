use anyhow::{anyhow, Result};
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Best-effort message of a thrown JS value, for logs and error variants.
pub(crate) fn describe(value: &JsValue) -> String {
    Reflect::get(value, &JsValue::from_str("message")).ok()
        .and_then(|message| message.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Look up `target[name]` as a callable.
pub(crate) fn method(target: &JsValue, name: &str) -> Result<Function> {
    Reflect::get(target, &JsValue::from_str(name)).ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or_else(|| anyhow!("adapter has no method '{name}'"))
}

/// Read a numeric property, accepting numbers and numeric strings
/// (big-number wrappers usually stringify).
pub(crate) fn number(target: &JsValue, name: &str) -> Result<f64> {
    let value = Reflect::get(target, &JsValue::from_str(name))
        .map_err(|e| anyhow!("cannot read '{name}': {}", describe(&e)))?;
    as_number(&value).ok_or_else(|| anyhow!("'{name}' is not a number"))
}

pub(crate) fn as_number(value: &JsValue) -> Option<f64> {
    value.as_f64().or_else(|| value.as_string().and_then(|s| s.trim().parse().ok()))
}
