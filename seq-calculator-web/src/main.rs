//! Indonesia Carbon Sequestration Calculator, browser side.
//!
//! The calculator page is rendered by the server. This app attaches to it:
//! 1. On mount: wire the sliders, scenario presets and submit validation
//!    onto the existing form.
//! 2. Render the "Download PDF Report" button into `#report-export-root`,
//!    which builds the technical report from the form, the result cards and
//!    the live charts.

use dioxus::prelude::*;
use seq_report::ReportConfig;
use seq_ui::components::ExportButton;
use seq_ui::state::ExportState;
use seq_ui::{dom, wiring};

/// DOM id the export button is mounted into.
const ROOT_ID: &str = "report-export-root";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname(ROOT_ID))
        .launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(ExportState::new);

    // Runs once: the effect reads no signals
    use_effect(move || {
        let Some(document) = dom::document() else {
            log::error!("No document, calculator controls left unbound");
            return;
        };
        if let Err(e) = wiring::init_page(&document) {
            log::error!("Failed to wire calculator page: {:?}", e);
        }
    });

    rsx! {
        ExportButton { config: ReportConfig::default() }
    }
}
