//! The report generator.
//!
//! `idle -> generating -> {saved, failed} -> idle`. Entry is rejected while a
//! report is in flight. The trigger control is disabled and relabelled for the
//! duration and always restored afterwards. Any failure is logged, reported
//! to the user once, and nothing is saved.

use crate::chart::{ChartProvider, RasterImage, FIRST_CHART_SECTION, REPORT_CHARTS};
use crate::config::ReportConfig;
use crate::document::{
    fit_image, Align, DrawOp, ImageOp, Orientation, PageCursor, ReportDocument, Rgb8, TextOp,
    FOOTER_BAND_MM,
};
use crate::error::{ReportError, Result};
use crate::pdf::render_pdf;
use crate::print_style::with_print_style;
use crate::results::RenderedResults;
use chrono::NaiveDateTime;
use seq_core::form::{fields, FormFieldAccessor};
use seq_core::prompt::UserPrompt;
use seq_utils::dates::format_timestamp;
use std::sync::atomic::{AtomicBool, Ordering};

/// Orientation of the summary page; chart pages use the opposite.
pub const SUMMARY_ORIENTATION: Orientation = Orientation::Portrait;

const CHART_TITLE_Y_MM: f32 = 20.0;
const CHART_IMAGE_TOP_MM: f32 = 30.0;

/// Where an input parameter's value comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamSource {
    /// The control's value, verbatim
    Field(&'static str),
    /// A checkbox, rendered Yes/No
    Checkbox(&'static str),
}

/// Rows of the "Input Parameters" section.
pub const INPUT_PARAMETERS: [(&str, ParamSource); 13] = [
    ("Baseline Emissions (MtCO2e)", ParamSource::Field(fields::EMISSIONS_BASELINE)),
    ("Target Emissions (MtCO2e)", ParamSource::Field(fields::EMISSIONS_TARGET)),
    ("Sequestration Share (%)", ParamSource::Field(fields::SEQUESTRATION_PERCENT)),
    ("Start Year", ParamSource::Field(fields::START_YEAR)),
    ("Target Year", ParamSource::Field(fields::TARGET_YEAR)),
    ("Forest Area Available (ha)", ParamSource::Field(fields::FOREST_AREA)),
    ("Coastal Area Available (ha)", ParamSource::Field(fields::COASTAL_AREA)),
    ("Forest Allocation (%)", ParamSource::Field(fields::FOREST_PERCENT)),
    ("Forest Rate (tCO2/ha/yr)", ParamSource::Field(fields::FOREST_RATE)),
    ("Coastal Rate (tCO2/ha/yr)", ParamSource::Field(fields::COASTAL_RATE)),
    ("Root-to-Shoot Ratio", ParamSource::Field(fields::ROOT_TO_SHOOT)),
    ("Include Below-Ground Biomass", ParamSource::Checkbox(fields::INCLUDE_BELOW_GROUND)),
    ("Risk Factor (%)", ParamSource::Field(fields::RISK_FACTOR)),
];

/// The control that started generation.
pub trait TriggerControl {
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
}

/// Final destination of the PDF bytes (download, file, ...).
///
/// Implementors report failures as [`ReportError::Save`].
pub trait ReportSink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<()>;
}

/// Everything the report reads from the page.
pub struct ReportInputs<'a> {
    pub form: &'a dyn FormFieldAccessor,
    pub results: &'a dyn RenderedResults,
    pub charts: &'a dyn ChartProvider,
    pub generated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportState {
    Idle,
    Generating,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub file_name: String,
    pub pages: usize,
    /// Registry keys of the charts that made it into the report
    pub charts: Vec<&'static str>,
    pub bytes: usize,
}

/// Assembles, renders and saves the technical report.
pub struct ReportGenerator {
    config: ReportConfig,
    generating: AtomicBool,
}

// Releases the in-flight flag however generation ends.
struct InFlight<'g>(&'g AtomicBool);

impl<'g> InFlight<'g> {
    fn acquire(flag: &'g AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            generating: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn state(&self) -> ReportState {
        if self.generating.load(Ordering::Acquire) {
            ReportState::Generating
        } else {
            ReportState::Idle
        }
    }

    /// Run one generation cycle.
    ///
    /// Returns [`ReportError::AlreadyGenerating`] without touching the
    /// trigger when another cycle is in flight.
    pub async fn generate(
        &self,
        trigger: &dyn TriggerControl,
        inputs: ReportInputs<'_>,
        sink: &dyn ReportSink,
        prompt: &dyn UserPrompt,
    ) -> Result<ReportSummary> {
        let Some(_in_flight) = InFlight::acquire(&self.generating) else {
            log::warn!("Ignoring report request while another report is being generated");
            return Err(ReportError::AlreadyGenerating);
        };

        let was_disabled = trigger.is_disabled();
        let original_label = trigger.label();
        trigger.set_disabled(true);
        trigger.set_label(&self.config.progress_label);

        let outcome = self.produce(&inputs, sink).await;
        match &outcome {
            Ok(summary) => log::info!(
                "Saved {} ({} pages, {} bytes)",
                summary.file_name,
                summary.pages,
                summary.bytes
            ),
            Err(e) => {
                log::error!("PDF generation failed: {}", e);
                prompt.alert(&self.config.failure_message);
            }
        }

        trigger.set_disabled(was_disabled);
        trigger.set_label(&original_label);
        outcome
    }

    async fn produce(
        &self,
        inputs: &ReportInputs<'_>,
        sink: &dyn ReportSink,
    ) -> Result<ReportSummary> {
        let (doc, charts) = self.build_document(inputs).await?;
        inputs.charts.yield_now().await;
        let bytes = render_pdf(&doc, &self.config.title)?;
        sink.save(&self.config.file_name, &bytes)?;
        Ok(ReportSummary {
            file_name: self.config.file_name.clone(),
            pages: doc.page_count(),
            charts,
            bytes: bytes.len(),
        })
    }

    /// Build the complete document model: summary, chart pages, footers.
    pub async fn build_document(
        &self,
        inputs: &ReportInputs<'_>,
    ) -> Result<(ReportDocument, Vec<&'static str>)> {
        let mut doc = ReportDocument::new();
        self.write_summary(&mut doc, inputs);

        let mut included = Vec::new();
        for (index, spec) in REPORT_CHARTS.iter().enumerate() {
            let Some(chart) = inputs.charts.chart(spec) else {
                log::warn!("Chart {} is not on the page, skipping", spec.key);
                continue;
            };
            log::debug!("Capturing chart {}", spec.key);
            let raster = with_print_style(chart.as_ref(), |c| c.rasterize())
                .await
                .map_err(|source| ReportError::Chart {
                    key: spec.key,
                    source,
                })?;
            let section = FIRST_CHART_SECTION + index;
            self.add_chart_page(&mut doc, &format!("{}. {}", section, spec.title), &raster);
            included.push(spec.key);
        }

        doc.stamp_footers(&self.config.product_name, &self.config.reference_url);
        Ok((doc, included))
    }

    fn write_summary(&self, doc: &mut ReportDocument, inputs: &ReportInputs<'_>) {
        let mut cursor = PageCursor::new(doc, SUMMARY_ORIENTATION, self.config.margin_mm);

        cursor.line(&self.config.title, 20.0, true, Rgb8::HEADING, 10.0);
        cursor.line(&self.config.subtitle, 14.0, true, Rgb8::BLACK, 8.0);
        cursor.line(
            &format!("Generated: {}", format_timestamp(&inputs.generated_at)),
            10.0,
            false,
            Rgb8::GREY,
            7.0,
        );
        cursor.line(
            &format!("Methodology: {}", self.config.methodology),
            10.0,
            false,
            Rgb8::GREY,
            6.0,
        );

        cursor.skip(6.0);
        cursor.line("1. Input Parameters", 14.0, true, Rgb8::HEADING, 9.0);
        for (label, source) in INPUT_PARAMETERS {
            let value = match source {
                ParamSource::Field(name) => inputs.form.raw_value(name),
                ParamSource::Checkbox(name) => inputs
                    .form
                    .is_checked(name)
                    .map(|checked| (if checked { "Yes" } else { "No" }).to_string()),
            }
            .unwrap_or_else(|| "N/A".to_string());
            cursor.line(&format!("{}: {}", label, value), 10.0, false, Rgb8::BLACK, 6.5);
        }

        cursor.skip(6.0);
        cursor.line("2. Key Results Summary", 14.0, true, Rgb8::HEADING, 9.0);
        let items = inputs.results.result_items();
        if items.len() > self.config.max_result_items {
            log::debug!(
                "Truncating {} result cards to {}",
                items.len(),
                self.config.max_result_items
            );
        }
        for item in items.iter().take(self.config.max_result_items) {
            cursor.line(
                &format!("{}: {}", item.label, item.value),
                10.0,
                false,
                Rgb8::BLACK,
                6.5,
            );
        }

        if let Some(badge) = inputs.results.feasibility_badge() {
            cursor.skip(6.0);
            let fill = if badge.feasible { Rgb8::GREEN } else { Rgb8::RED };
            cursor.banner(&badge.text, fill, 12.0);
        }
    }

    fn add_chart_page(&self, doc: &mut ReportDocument, title: &str, raster: &RasterImage) {
        let orientation = SUMMARY_ORIENTATION.opposite();
        let (page_width, page_height) = orientation.size_mm();
        let margin = self.config.margin_mm;

        let max_width = page_width - 2.0 * margin;
        let max_height = self
            .config
            .max_image_height_mm
            .min(page_height - CHART_IMAGE_TOP_MM - FOOTER_BAND_MM);
        let (width_mm, height_mm) = fit_image(raster.width, raster.height, max_width, max_height);

        let page = doc.add_page(orientation);
        page.push(DrawOp::Text(TextOp {
            text: title.to_string(),
            x_mm: margin,
            y_mm: CHART_TITLE_Y_MM,
            size_pt: 14.0,
            bold: true,
            color: Rgb8::HEADING,
            align: Align::Left,
        }));
        page.push(DrawOp::Image(ImageOp {
            width_px: raster.width,
            height_px: raster.height,
            rgb: raster.to_opaque_rgb(),
            x_mm: (page_width - width_mm) / 2.0,
            y_mm: CHART_IMAGE_TOP_MM,
            width_mm,
            height_mm,
        }));
    }
}
