//! `Provider`/`Contract` over a page-supplied JavaScript adapter.
//!
//! The adapter object must expose:
//! - `accounts()` resolving to an array of address strings, active first;
//! - `deployed(artifactUrl, fallbackRpcUrl)` resolving to the contract instance.
//!
//! The contract instance must expose `fileReport(tagId, plate, state, behavior,
//! lat, lng, { from })` resolving to `{ tx, logs: [{ event }] }`,
//! `getRecentDriverReports(tagId)` resolving to the seven-element tuple, and
//! `getDriverScore(tagId)` resolving to a number. Numeric values may be numbers
//! or numeric strings.

use std::rc::Rc;

use async_trait::async_trait;
use js_sys::{Array, Promise};
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use driveaudit_core::{Account, Config, Contract, LedgerError, Provider, RecentReports, ReportCall, TransactionResult};

use crate::common::*;

/// Call `target[name](...args)`, awaiting the result if it is a promise.
/// A missing method means no usable provider; a throw or rejection is mapped by `on_failure`.
async fn invoke(
    target: &JsValue,
    name: &str,
    args: &[JsValue],
    on_failure: fn(String) -> LedgerError,
) -> Result<JsValue, LedgerError> {
    let function = method(target, name).map_err(|e| LedgerError::Unavailable(e.to_string()))?;
    let args: Array = args.iter().collect();
    let returned = function.apply(target, &args).map_err(|e| on_failure(describe(&e)))?;

    match returned.dyn_into::<Promise>() {
        Ok(promise) => JsFuture::from(promise).await.map_err(|e| on_failure(describe(&e))),
        Err(value) => Ok(value),
    }
}

/// Rejections of a state-mutating call are the ledger's, unless the message says transport.
fn write_failure(message: String) -> LedgerError {
    let lower = message.to_lowercase();
    if ["network", "fetch", "connection", "timeout", "timed out"].iter().any(|k| lower.contains(k)) {
        LedgerError::Network(message)
    } else {
        LedgerError::TransactionRejected(message)
    }
}

fn malformed(e: impl ToString) -> LedgerError {
    LedgerError::MalformedResponse(e.to_string())
}

pub(crate) struct JsProvider {
    adapter: JsValue,
    config: Config,
}

impl JsProvider {
    pub(crate) fn new(adapter: JsValue, config: Config) -> Self {
        Self { adapter, config }
    }
}

#[async_trait(?Send)]
impl Provider for JsProvider {
    async fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let value = invoke(&self.adapter, "accounts", &[], LedgerError::Unavailable).await?;
        serde_wasm_bindgen::from_value::<Vec<Account>>(value).map_err(malformed)
    }

    async fn deployed(&self) -> Result<Rc<dyn Contract>, LedgerError> {
        let args = [
            JsValue::from_str(&self.config.artifact_url),
            JsValue::from_str(&self.config.fallback_rpc_url),
        ];
        let instance = invoke(&self.adapter, "deployed", &args, LedgerError::Unavailable).await?;
        if instance.is_undefined() || instance.is_null() {
            return Err(LedgerError::Unavailable(format!(
                "no deployed contract for artifact '{}'", self.config.artifact_url
            )));
        }
        log::info!("[JsProvider] contract resolved from {}", self.config.artifact_url);
        Ok(Rc::new(JsContract { instance }))
    }
}

#[derive(Serialize)]
struct CallOptions<'a> {
    from: &'a str,
}

#[derive(Deserialize)]
struct Receipt {
    tx: String,
    #[serde(default)]
    logs: Vec<LogEntry>,
}

#[derive(Deserialize)]
struct LogEntry {
    #[serde(default)]
    event: Option<String>,
}

pub(crate) struct JsContract {
    instance: JsValue,
}

impl JsContract {
    fn numbers(tuple: &Array, slot: u32) -> Result<Vec<f64>, LedgerError> {
        let values: Array = tuple.get(slot).dyn_into()
            .map_err(|_| malformed(format!("slot {slot} is not an array")))?;
        values.iter()
            .map(|v| as_number(&v).ok_or_else(|| malformed(format!("slot {slot} holds a non-number"))))
            .collect()
    }

    fn strings(tuple: &Array, slot: u32) -> Result<Vec<String>, LedgerError> {
        let values: Array = tuple.get(slot).dyn_into()
            .map_err(|_| malformed(format!("slot {slot} is not an array")))?;
        values.iter()
            .map(|v| v.as_string().ok_or_else(|| malformed(format!("slot {slot} holds a non-string"))))
            .collect()
    }
}

#[async_trait(?Send)]
impl Contract for JsContract {
    async fn file_report(&self, from: &Account, call: &ReportCall) -> Result<TransactionResult, LedgerError> {
        let options = serde_wasm_bindgen::to_value(&CallOptions { from: from.as_str() }).map_err(malformed)?;
        let args = [
            JsValue::from_str(&call.tag_id),
            JsValue::from_str(&call.plate),
            JsValue::from_str(&call.state),
            JsValue::from_f64(call.behavior as f64),
            JsValue::from_f64(call.latitude as f64),
            JsValue::from_f64(call.longitude as f64),
            options,
        ];
        let value = invoke(&self.instance, "fileReport", &args, write_failure).await?;
        let receipt: Receipt = serde_wasm_bindgen::from_value(value).map_err(malformed)?;

        Ok(TransactionResult {
            tx: receipt.tx,
            events: receipt.logs.into_iter().filter_map(|log| log.event).collect(),
        })
    }

    async fn get_recent_driver_reports(&self, tag_id: &str) -> Result<RecentReports, LedgerError> {
        let args = [JsValue::from_str(tag_id)];
        let value = invoke(&self.instance, "getRecentDriverReports", &args, LedgerError::Network).await?;
        let tuple: Array = value.dyn_into().map_err(|_| malformed("report tuple is not an array"))?;
        if tuple.length() < 7 {
            return Err(malformed(format!("report tuple has {} slots, expected 7", tuple.length())));
        }

        let count = as_number(&tuple.get(0)).ok_or_else(|| malformed("report count is not a number"))?;
        Ok(RecentReports {
            count: count as usize,
            valid: Self::numbers(&tuple, 1)?.into_iter().map(|v| v as u64).collect(),
            reporters: Self::strings(&tuple, 2)?,
            behaviors: Self::numbers(&tuple, 3)?.into_iter().map(|v| v as i64).collect(),
            timestamps: Self::numbers(&tuple, 4)?.into_iter().map(|v| v as u64).collect(),
            latitudes: Self::numbers(&tuple, 5)?.into_iter().map(|v| v as i64).collect(),
            longitudes: Self::numbers(&tuple, 6)?.into_iter().map(|v| v as i64).collect(),
        })
    }

    async fn get_driver_score(&self, tag_id: &str) -> Result<f64, LedgerError> {
        let args = [JsValue::from_str(tag_id)];
        let value = invoke(&self.instance, "getDriverScore", &args, LedgerError::Network).await?;
        as_number(&value).ok_or_else(|| malformed("driver score is not a number"))
    }
}
