//! Button that exports the current results as a PDF technical report.

use crate::dom::{self, BrowserPrompt, DomForm, DomResults, DownloadSink};
use crate::js_bridge::JsChartRegistry;
use crate::state::{ExportState, SignalTrigger};
use dioxus::prelude::*;
use seq_core::prompt::UserPrompt;
use seq_report::{ReportConfig, ReportGenerator, ReportInputs};
use std::rc::Rc;

#[derive(Props, Clone, PartialEq)]
pub struct ExportButtonProps {
    #[props(default)]
    pub config: ReportConfig,
}

/// Export button.
///
/// One generator lives as long as the component, so a second click while a
/// report is in flight is rejected instead of starting another one. Failures
/// reach the user only through the generator's alert.
#[component]
pub fn ExportButton(props: ExportButtonProps) -> Element {
    let state = use_context::<ExportState>();
    let config = props.config.clone();
    let generator = use_hook(move || Rc::new(ReportGenerator::new(config)));

    let onclick = move |_| {
        let generator = generator.clone();
        spawn(async move {
            let Some(document) = dom::document() else {
                log::error!("Document unavailable, no report generated");
                BrowserPrompt.alert(&generator.config().failure_message);
                return;
            };
            let form = DomForm::new(document.clone());
            let results = DomResults::new(document);
            let inputs = ReportInputs {
                form: &form,
                results: &results,
                charts: &JsChartRegistry,
                generated_at: chrono::Local::now().naive_local(),
            };

            // Errors are already logged and alerted by the generator
            let _ = generator
                .generate(&SignalTrigger(state), inputs, &DownloadSink, &BrowserPrompt)
                .await;
        });
    };

    let label = state.label.read().clone();
    let disabled = (state.disabled)();

    rsx! {
        div {
            class: "report-export",
            style: "margin: 16px 0;",
            button {
                id: "download-report",
                class: "btn btn-primary",
                r#type: "button",
                disabled: disabled,
                onclick: onclick,
                "{label}"
            }
        }
    }
}
