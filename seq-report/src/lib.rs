//! Technical report generation for the sequestration calculator.
//!
//! The report is a summary page built from the live form and the result
//! cards already on the page, followed by one landscape page per chart. Charts
//! are borrowed from the page, restyled for print, rasterised and restored.
//!
//! This crate provides:
//! - `chart`: the six report charts and the `ChartProvider`/`ChartHandle` seams
//! - `print_style`: scoped print restyling with guaranteed restore
//! - `document`: the in-memory paginated document
//! - `generator`: the `ReportGenerator` state machine
//! - `pdf`: rendering the document to PDF bytes with `printpdf`

pub mod chart;
pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod pdf;
pub mod print_style;
pub mod results;

pub use chart::{ChartHandle, ChartProvider, ChartSpec, RasterImage, REPORT_CHARTS};
pub use config::ReportConfig;
pub use error::{ChartError, ReportError, Result};
pub use generator::{
    ReportGenerator, ReportInputs, ReportSink, ReportState, ReportSummary, TriggerControl,
};
pub use results::{FeasibilityBadge, RenderedResults, ResultItem};
