//! Export state managed via Dioxus context.
//!
//! `ExportState` bundles the reactive signals of the report export button and
//! is provided with `use_context_provider`. Components retrieve it with
//! `use_context::<ExportState>()`.

use dioxus::prelude::*;
use seq_report::TriggerControl;

/// Label of the export button while idle.
pub const EXPORT_LABEL: &str = "Download PDF Report";

#[derive(Clone, Copy)]
pub struct ExportState {
    /// Whether the export button is disabled
    pub disabled: Signal<bool>,
    /// Current button label
    pub label: Signal<String>,
}

impl ExportState {
    pub fn new() -> Self {
        Self {
            disabled: Signal::new(false),
            label: Signal::new(EXPORT_LABEL.to_string()),
        }
    }
}

impl Default for ExportState {
    fn default() -> Self {
        Self::new()
    }
}

/// The export button as seen by the report generator.
#[derive(Clone, Copy)]
pub struct SignalTrigger(pub ExportState);

impl TriggerControl for SignalTrigger {
    fn is_disabled(&self) -> bool {
        (self.0.disabled)()
    }

    fn set_disabled(&self, disabled: bool) {
        let mut signal = self.0.disabled;
        signal.set(disabled);
    }

    fn label(&self) -> String {
        self.0.label.read().clone()
    }

    fn set_label(&self, label: &str) {
        let mut signal = self.0.label;
        signal.set(label.to_string());
    }
}
