//! Charts embedded in the report and the seams used to reach them.

use crate::error::ChartError;
use async_trait::async_trait;
use serde_json::Value;

/// A chart the report knows about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSpec {
    /// Key in the page's chart registry
    pub key: &'static str,
    /// DOM id of the chart's canvas
    pub canvas_id: &'static str,
    /// Section title on the chart's page
    pub title: &'static str,
}

/// Charts in report order. Chart `k` becomes section `3 + k`.
pub const REPORT_CHARTS: [ChartSpec; 6] = [
    ChartSpec {
        key: "existingRate",
        canvas_id: "existingRateChart",
        title: "Existing Forest Sequestration",
    },
    ChartSpec {
        key: "grossEmissions",
        canvas_id: "grossEmissionsChart",
        title: "Gross Emissions Trajectory",
    },
    ChartSpec {
        key: "balance",
        canvas_id: "balanceChart",
        title: "Carbon Balance",
    },
    ChartSpec {
        key: "annualPlanting",
        canvas_id: "annualPlantingChart",
        title: "Annual New Planting Area",
    },
    ChartSpec {
        key: "cumulativeArea",
        canvas_id: "cumulativeAreaChart",
        title: "Cumulative Planted Area",
    },
    ChartSpec {
        key: "netZeroBalance",
        canvas_id: "netZeroBalanceChart",
        title: "Net Zero Carbon Balance",
    },
];

/// First section number used by chart pages.
pub const FIRST_CHART_SECTION: usize = 3;

/// RGBA pixels read back from a chart canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    rgba: Vec<u8>,
}

impl RasterImage {
    /// Wrap raw RGBA bytes; the buffer must hold exactly `width * height` pixels.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ChartError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 {
            return Err(ChartError::new("canvas has zero size"));
        }
        if rgba.len() != expected {
            return Err(ChartError::new(format!(
                "expected {} bytes of RGBA data, got {}",
                expected,
                rgba.len()
            )));
        }
        Ok(Self { width, height, rgba })
    }

    /// Composite the pixels over an opaque white backing and drop alpha.
    ///
    /// Transparent canvas regions would otherwise come out black in the PDF.
    pub fn to_opaque_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for px in self.rgba.chunks_exact(4) {
            let alpha = px[3] as u32;
            for &channel in &px[..3] {
                let blended = (channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
                rgb.push(blended as u8);
            }
        }
        rgb
    }
}

/// A live chart instance borrowed from the page.
///
/// Style trees are plain JSON. [`ChartHandle::apply_style`] deep-merges a
/// patch into the live tree; a `null` leaf removes that key.
#[async_trait(?Send)]
pub trait ChartHandle {
    /// Deep copy of the chart's current style options.
    fn style(&self) -> Result<Value, ChartError>;

    /// Merge `patch` into the live style options.
    async fn apply_style(&self, patch: &Value) -> Result<(), ChartError>;

    /// Re-render the chart with its current options.
    async fn redraw(&self) -> Result<(), ChartError>;

    /// Read the rendered chart back as pixels.
    async fn rasterize(&self) -> Result<RasterImage, ChartError>;
}

/// Source of live chart instances.
#[async_trait(?Send)]
pub trait ChartProvider {
    /// The live chart for `spec`, or `None` when either the canvas or the
    /// registry entry is missing.
    fn chart(&self, spec: &ChartSpec) -> Option<Box<dyn ChartHandle>>;

    /// Hand control back to the host event loop once. Called before the
    /// PDF is encoded, which runs without yielding.
    async fn yield_now(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_keys_and_canvases_are_paired() {
        for spec in REPORT_CHARTS {
            assert_eq!(spec.canvas_id, format!("{}Chart", spec.key));
        }
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(RasterImage::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(RasterImage::from_rgba(2, 2, vec![0; 12]).is_err());
        assert!(RasterImage::from_rgba(0, 2, Vec::new()).is_err());
    }

    #[test]
    fn test_transparent_pixels_become_white() {
        let image = RasterImage::from_rgba(2, 1, vec![0, 0, 0, 0, 10, 20, 30, 255]).unwrap();
        assert_eq!(image.to_opaque_rgb(), vec![255, 255, 255, 10, 20, 30]);
    }

    #[test]
    fn test_half_transparent_black_is_grey() {
        let image = RasterImage::from_rgba(1, 1, vec![0, 0, 0, 128]).unwrap();
        let rgb = image.to_opaque_rgb();
        assert!(rgb.iter().all(|&c| c == 127));
    }
}
