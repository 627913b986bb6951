//! Offline report generation.
//!
//! Charts come from a directory of PNG exports named after their canvas ids
//! (`balanceChart.png`, ...). A sibling `<canvas id>.options.json` may hold the
//! chart's style tree; it goes through the same print-style round trip as a
//! live chart, though only the restored tree is observable here.

use crate::console::{ConsolePrompt, ConsoleTrigger, FileSink};
use crate::snapshot::Snapshot;
use async_trait::async_trait;
use chrono::Local;
use log::{info, warn};
use seq_report::print_style::merge_style;
use seq_report::{
    ChartError, ChartHandle, ChartProvider, ChartSpec, RasterImage, ReportConfig, ReportGenerator,
    ReportInputs, ReportSummary,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// A chart exported to disk.
pub struct FileChart {
    image_path: PathBuf,
    options: RefCell<Value>,
}

impl FileChart {
    pub fn new(image_path: PathBuf, options: Value) -> Self {
        Self {
            image_path,
            options: RefCell::new(options),
        }
    }
}

#[async_trait(?Send)]
impl ChartHandle for FileChart {
    fn style(&self) -> Result<Value, ChartError> {
        Ok(self.options.borrow().clone())
    }

    async fn apply_style(&self, patch: &Value) -> Result<(), ChartError> {
        merge_style(&mut self.options.borrow_mut(), patch);
        Ok(())
    }

    async fn redraw(&self) -> Result<(), ChartError> {
        Ok(())
    }

    async fn rasterize(&self) -> Result<RasterImage, ChartError> {
        let image = image::open(&self.image_path)
            .map_err(|e| ChartError::new(format!("{}: {}", self.image_path.display(), e)))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        RasterImage::from_rgba(width, height, image.into_raw())
    }
}

/// Charts found in a directory.
pub struct FileCharts {
    dir: PathBuf,
}

impl FileCharts {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn options(&self, spec: &ChartSpec) -> Value {
        let path = self.dir.join(format!("{}.options.json", spec.canvas_id));
        if !path.exists() {
            return json!({});
        }
        match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()))
        {
            Ok(options) => options,
            Err(e) => {
                warn!("Ignoring unreadable {}: {}", path.display(), e);
                json!({})
            }
        }
    }
}

#[async_trait(?Send)]
impl ChartProvider for FileCharts {
    fn chart(&self, spec: &ChartSpec) -> Option<Box<dyn ChartHandle>> {
        let image_path = self.dir.join(format!("{}.png", spec.canvas_id));
        if !image_path.is_file() {
            return None;
        }
        Some(Box::new(FileChart::new(image_path, self.options(spec))))
    }
}

fn load_config(path: Option<&str>) -> anyhow::Result<ReportConfig> {
    let Some(path) = path else {
        return Ok(ReportConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path, e))?;
    Ok(serde_json::from_str(&text)?)
}

/// Build the report from `snapshot_path` and the charts in `charts_dir`,
/// writing the PDF into `out_dir`.
pub async fn run_report(
    snapshot_path: &str,
    charts_dir: &str,
    out_dir: &str,
    config_path: Option<&str>,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let snapshot = Snapshot::load(snapshot_path)?;
    let charts = FileCharts::new(charts_dir);
    let sink = FileSink::new(out_dir);

    let summary = generate(config, &snapshot, &charts, &sink).await?;
    info!(
        "Report complete: {} pages, charts: {}",
        summary.pages,
        summary.charts.join(", ")
    );
    if let Some(path) = sink.written() {
        println!("{}", path.display());
    }
    Ok(())
}

async fn generate(
    config: ReportConfig,
    snapshot: &Snapshot,
    charts: &FileCharts,
    sink: &FileSink,
) -> anyhow::Result<ReportSummary> {
    let generator = ReportGenerator::new(config);
    let trigger = ConsoleTrigger::new("Generate report");
    let inputs = ReportInputs {
        form: snapshot,
        results: snapshot,
        charts,
        generated_at: Local::now().naive_local(),
    };
    let summary = generator
        .generate(&trigger, inputs, sink, &ConsolePrompt { auto_accept: false })
        .await?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use seq_report::REPORT_CHARTS;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("seq-cmd-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(path: &Path) {
        RgbaImage::from_pixel(8, 4, Rgba([30, 60, 90, 255]))
            .save(path)
            .unwrap();
    }

    #[tokio::test]
    async fn test_report_from_directory() {
        let dir = scratch_dir("report");
        let charts_dir = dir.join("charts");
        std::fs::create_dir_all(&charts_dir).unwrap();
        for spec in &REPORT_CHARTS[..2] {
            write_png(&charts_dir.join(format!("{}.png", spec.canvas_id)));
        }
        let snapshot = Snapshot::with_fields(&[("emissions_2030", "1244")]);
        let sink = FileSink::new(dir.join("out"));

        let summary = generate(
            ReportConfig::default(),
            &snapshot,
            &FileCharts::new(&charts_dir),
            &sink,
        )
        .await
        .unwrap();

        assert_eq!(summary.pages, 3);
        assert_eq!(summary.charts, vec!["existingRate", "grossEmissions"]);
        let bytes = std::fs::read(sink.written().unwrap()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_broken_png_fails_without_output() {
        let dir = scratch_dir("broken");
        std::fs::write(dir.join("balanceChart.png"), b"not a png").unwrap();
        let sink = FileSink::new(dir.join("out"));

        let result = generate(
            ReportConfig::default(),
            &Snapshot::default(),
            &FileCharts::new(&dir),
            &sink,
        )
        .await;

        assert!(result.is_err());
        assert!(sink.written().is_none());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_options_file_is_loaded() {
        let dir = scratch_dir("options");
        write_png(&dir.join("balanceChart.png"));
        std::fs::write(
            dir.join("balanceChart.options.json"),
            r##"{"scales": {"y": {"ticks": {"color": "#fff"}}}}"##,
        )
        .unwrap();

        let charts = FileCharts::new(&dir);
        let chart = charts.chart(&REPORT_CHARTS[2]).unwrap();
        assert_eq!(chart.style().unwrap()["scales"]["y"]["ticks"]["color"], "#fff");
        assert!(charts.chart(&REPORT_CHARTS[0]).is_none());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_file() {
        let dir = scratch_dir("config");
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{"file_name": "offline.pdf"}"#).unwrap();

        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.file_name, "offline.pdf");
        assert_eq!(config.max_result_items, 8);
        std::fs::remove_dir_all(&dir).ok();
    }
}
