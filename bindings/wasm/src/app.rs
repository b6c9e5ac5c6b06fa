use std::{cell::Cell, rc::Rc};

use js_sys::Promise;
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{Element, Event};

use driveaudit_core::{capture, App, Config, ReportHistory, ReportSubmission, ScoreLookup};

use crate::{common::*, dom::DomView, geolocation::BrowserPosition, logger, provider::JsProvider};

#[derive(Clone, Copy, Debug)]
enum Action {
    Report,
    History,
    Score,
}

impl Action {
    /// Button classes bound by [`WasmApp::bind_events`].
    const BUTTONS: [(&'static str, Action); 3] = [
        (".btn-report", Action::Report),
        (".btn-getreports", Action::History),
        (".btn-driverscore", Action::Score),
    ];
}

/// Run one flow against the page. The promise resolves to the flow's result
/// (record text, row count, or score) or `null` when the flow failed.
fn dispatch(app: Rc<App>, action: Action) -> Promise {
    future_to_promise(async move {
        let mut view = DomView::new().map_err(js_err)?;
        let form = view.form();
        let value = match action {
            Action::Report => ReportSubmission::new().run(&app, &form, &mut view).await
                .map(|record| JsValue::from_str(&record.to_string())),
            Action::History => ReportHistory::new().run(&app, &form, &mut view).await
                .map(|rows| JsValue::from_f64(rows.len() as f64)),
            Action::Score => ScoreLookup::new().run(&app, &form, &mut view).await
                .map(JsValue::from_f64),
        };
        Ok(value.unwrap_or(JsValue::NULL))
    })
}

#[wasm_bindgen]
pub struct WasmApp {
    inner: Rc<App>,
    /// Set once the document click listener is installed.
    bound: Cell<bool>,
}

impl WasmApp {
    /// Route clicks on the report, history and score buttons to their flows.
    /// Installs the listener at most once per app.
    fn bind_events(&self) -> Result<(), JsValue> {
        if self.bound.get() {
            log::debug!("[WasmApp] click listener already bound");
            return Ok(());
        }
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| js_err("no document available"))?;

        let app = Rc::clone(&self.inner);
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else { return };
            let action = Action::BUTTONS.iter()
                .find(|(selector, _)| target.closest(selector).ok().flatten().is_some())
                .map(|&(_, action)| action);
            if let Some(action) = action {
                event.prevent_default();
                let _ = dispatch(Rc::clone(&app), action);
            }
        });
        document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        // Listener lives as long as the page.
        on_click.forget();
        self.bound.set(true);
        Ok(())
    }
}

#[wasm_bindgen]
impl WasmApp {
    /// config: `{ artifactUrl, fallbackRpcUrl, logLevel }`, any field optional, or `undefined`.
    /// adapter: wallet/contract bridge, see the `provider` module.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, adapter: JsValue) -> Result<WasmApp, JsValue> {
        let config: Config = if config.is_undefined() || config.is_null() {
            Config::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_err)?
        };
        logger::init(config.level_filter().map_err(js_err)?);

        let provider = JsProvider::new(adapter, config);
        Ok(WasmApp { inner: Rc::new(App::new(Rc::new(provider))), bound: Cell::new(false) })
    }

    /// Page startup: begin geolocation capture, bind the buttons, hide results
    /// and show the active account. Calling it again does not bind the buttons twice.
    pub fn start(&self) -> Result<Promise, JsValue> {
        self.capture_location();
        self.bind_events()?;

        let app = Rc::clone(&self.inner);
        Ok(future_to_promise(async move {
            let mut view = DomView::new().map_err(js_err)?;
            app.init(&mut view).await;
            Ok(JsValue::UNDEFINED)
        }))
    }

    /// Fire-and-forget geolocation capture into the session location.
    pub fn capture_location(&self) {
        let location = self.inner.location().clone();
        spawn_local(async move { capture(&BrowserPosition, &location).await });
    }

    /// File a report from the current form values.
    pub fn report(&self) -> Promise { dispatch(Rc::clone(&self.inner), Action::Report) }

    /// Fetch and render the report history for the current tag.
    pub fn get_reports(&self) -> Promise { dispatch(Rc::clone(&self.inner), Action::History) }

    /// Fetch and show the driver score for the current tag.
    pub fn driver_score(&self) -> Promise { dispatch(Rc::clone(&self.inner), Action::Score) }
}
