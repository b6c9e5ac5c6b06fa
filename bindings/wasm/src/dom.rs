use anyhow::{anyhow, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlSelectElement};

use driveaudit_core::{Account, FiledRecord, ReportForm, ReportRow, ScoreBand, View};

use crate::common::describe;

/// Element ids of the page.
const ACCOUNT: &str = "account";
const RECORD: &str = "record";
const REPORTS_BODY: &str = "reports";
const REPORTS_TABLE: &str = "reports-table";
const REPORTS_TITLE: &str = "reports-title";
const SCORE: &str = "score";
const STATE_FIELD: &str = "tagstate";
const PLATE_FIELD: &str = "plateno";
const BEHAVIOR_FIELD: &str = "behavior";

/// [`View`] over the page document.
pub(crate) struct DomView {
    document: Document,
}

impl DomView {
    pub(crate) fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| anyhow!("no document available"))?;
        Ok(Self { document })
    }

    /// Snapshot the form fields.
    pub(crate) fn form(&self) -> ReportForm {
        ReportForm::new(self.field(STATE_FIELD), self.field(PLATE_FIELD), self.field(BEHAVIOR_FIELD))
    }

    fn field(&self, id: &str) -> String {
        let Some(element) = self.document.get_element_by_id(id) else {
            log::warn!("[DomView] missing form field #{id}");
            return String::new();
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            element.text_content().unwrap_or_default()
        }
    }

    fn element(&self, id: &str) -> Option<HtmlElement> {
        let element = self.document.get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        if element.is_none() {
            log::warn!("[DomView] missing element #{id}");
        }
        element
    }

    fn set_visibility(&self, id: &str, visible: bool) {
        if let Some(element) = self.element(id) {
            let value = if visible { "visible" } else { "hidden" };
            if let Err(e) = element.style().set_property("visibility", value) {
                log::warn!("[DomView] cannot set visibility of #{id}: {}", describe(&e));
            }
        }
    }

    fn render_rows(&self, body: &HtmlElement, rows: &[ReportRow]) -> Result<(), JsValue> {
        while let Some(child) = body.first_child() {
            body.remove_child(&child)?;
        }
        for row in rows {
            let tr = self.document.create_element("tr")?;
            for cell in row.cells() {
                let td = self.document.create_element("td")?;
                td.set_text_content(Some(&cell));
                tr.append_child(&td)?;
            }
            body.append_child(&tr)?;
        }
        Ok(())
    }
}

impl View for DomView {
    fn show_account(&mut self, account: &Account) {
        if let Some(element) = self.element(ACCOUNT) {
            element.set_text_content(Some(account.as_str()));
        }
    }

    fn show_record(&mut self, record: &FiledRecord) {
        // innerText turns the line break into <br>
        if let Some(element) = self.element(RECORD) {
            element.set_inner_text(&record.to_string());
        }
    }

    fn replace_reports(&mut self, rows: &[ReportRow]) {
        if let Some(body) = self.element(REPORTS_BODY) {
            if let Err(e) = self.render_rows(&body, rows) {
                log::error!("[DomView] cannot render report rows: {}", describe(&e));
            }
        }
    }

    fn set_reports_visible(&mut self, visible: bool) {
        self.set_visibility(REPORTS_TABLE, visible);
        self.set_visibility(REPORTS_TITLE, visible);
    }

    fn show_score(&mut self, score: f64, band: Option<ScoreBand>) {
        let Some(element) = self.element(SCORE) else { return };
        if let Some(band) = band {
            if let Err(e) = element.style().set_property("background-color", band.color()) {
                log::warn!("[DomView] cannot color score: {}", describe(&e));
            }
        }
        element.set_text_content(Some(&format!("Driver Score:  {score}")));
    }

    fn set_score_visible(&mut self, visible: bool) {
        self.set_visibility(SCORE, visible);
    }
}
