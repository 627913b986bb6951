//! Dioxus components mounted next to the calculator results.

mod export_button;

pub use export_button::ExportButton;
