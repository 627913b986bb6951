//! `web_sys` implementations of the calculator's page seams.

use js_sys::{Array, Reflect, Uint8Array};
use seq_core::form::{fields, FormFieldAccessor, FormWriter};
use seq_core::preset::PresetButton;
use seq_core::prompt::UserPrompt;
use seq_report::{FeasibilityBadge, RenderedResults, ReportError, ReportSink, ResultItem};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, HtmlElement, HtmlFormElement,
    HtmlInputElement, Url,
};

/// Class of the result cards.
pub const RESULT_ITEM_SELECTOR: &str = ".result-item";
/// Class of the scenario preset buttons.
pub const PRESET_BUTTON_SELECTOR: &str = ".scenario-btn";
pub const FEASIBILITY_BADGE_ID: &str = "feasibility-badge";
/// Marker class on a feasible badge.
pub const FEASIBLE_CLASS: &str = "feasible";
/// Marker class on the selected preset.
pub const ACTIVE_CLASS: &str = "active";

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// All elements matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        log::warn!("Invalid selector {}", selector);
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn trimmed_text(element: &Element) -> String {
    element.text_content().unwrap_or_default().trim().to_string()
}

/// The calculator form, read and written through element ids.
#[derive(Clone)]
pub struct DomForm {
    document: Document,
}

impl DomForm {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn input(&self, id: &str) -> Option<HtmlInputElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }
}

impl FormFieldAccessor for DomForm {
    fn raw_value(&self, name: &str) -> Option<String> {
        // Covers <input>, <select> and <textarea> alike
        let element = self.document.get_element_by_id(name)?;
        Reflect::get(&element, &JsValue::from_str("value"))
            .ok()?
            .as_string()
    }

    fn is_checked(&self, name: &str) -> Option<bool> {
        self.input(name).map(|input| input.checked())
    }
}

impl FormWriter for DomForm {
    fn set_value(&self, id: &str, value: &str) -> bool {
        match self.input(id) {
            Some(input) => {
                input.set_value(value);
                true
            }
            None => false,
        }
    }

    fn set_checked(&self, id: &str, checked: bool) -> bool {
        match self.input(id) {
            Some(input) => {
                input.set_checked(checked);
                true
            }
            None => false,
        }
    }

    fn set_text(&self, id: &str, text: &str) -> bool {
        match self.document.get_element_by_id(id) {
            Some(element) => {
                element.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    fn submit(&self) {
        let form = self
            .document
            .get_element_by_id(fields::FORM)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
        match form {
            Some(form) => {
                if let Err(e) = form.submit() {
                    log::error!("Form submission failed: {:?}", e);
                }
            }
            None => log::warn!("Form #{} not found, nothing submitted", fields::FORM),
        }
    }
}

/// Result cards and badge rendered by the server.
pub struct DomResults {
    document: Document,
}

impl DomResults {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl RenderedResults for DomResults {
    fn result_items(&self) -> Vec<ResultItem> {
        query_all(&self.document, RESULT_ITEM_SELECTOR)
            .iter()
            .map(|item| {
                let part = |selector: &str| {
                    item.query_selector(selector)
                        .ok()
                        .flatten()
                        .map(|el| trimmed_text(&el))
                        .unwrap_or_default()
                };
                ResultItem {
                    value: part(".value"),
                    label: part(".label"),
                }
            })
            .collect()
    }

    fn feasibility_badge(&self) -> Option<FeasibilityBadge> {
        let badge = self.document.get_element_by_id(FEASIBILITY_BADGE_ID)?;
        Some(FeasibilityBadge {
            feasible: badge.class_list().contains(FEASIBLE_CLASS),
            text: trimmed_text(&badge),
        })
    }
}

/// A `.scenario-btn` element.
pub struct DomPresetButton {
    element: HtmlElement,
}

impl DomPresetButton {
    pub fn all(document: &Document) -> Vec<Self> {
        query_all(document, PRESET_BUTTON_SELECTOR)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|element| Self { element })
            .collect()
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl PresetButton for DomPresetButton {
    fn data_attribute(&self, key: &str) -> Option<String> {
        self.element.dataset().get(key)
    }

    fn set_active(&self, active: bool) {
        if let Err(e) = self
            .element
            .class_list()
            .toggle_with_force(ACTIVE_CLASS, active)
        {
            log::warn!("Could not toggle preset marker: {:?}", e);
        }
    }
}

/// `window.alert` / `window.confirm`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPrompt;

impl UserPrompt for BrowserPrompt {
    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// Hands the PDF to the browser as a file download.
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadSink;

impl DownloadSink {
    fn download(file_name: &str, bytes: &[u8]) -> Result<(), String> {
        let array = Uint8Array::from(bytes);
        let parts = Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type("application/pdf");
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = document().ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();
        Ok(())
    }
}

impl ReportSink for DownloadSink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> seq_report::Result<()> {
        Self::download(file_name, bytes).map_err(ReportError::Save)
    }
}
