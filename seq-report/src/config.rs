//! Report settings.

use serde::Deserialize;

/// Fixed texts and layout limits of the technical report.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Name of the downloaded file
    pub file_name: String,
    /// Product name stamped into every footer
    pub product_name: String,
    /// Reference URL stamped into every footer
    pub reference_url: String,
    pub title: String,
    pub subtitle: String,
    pub methodology: String,
    /// Result cards copied into the summary; extra cards are ignored
    pub max_result_items: usize,
    /// Upper bound on a chart image's height on its page
    pub max_image_height_mm: f32,
    pub margin_mm: f32,
    /// Trigger label while a report is being generated
    pub progress_label: String,
    /// Message shown when generation fails
    pub failure_message: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file_name: "Indonesia_Sequestration_Technical_Report.pdf".to_string(),
            product_name: "Indonesia Carbon Sequestration Calculator".to_string(),
            reference_url: "https://www.ipcc-nggip.iges.or.jp/public/2006gl/vol4.html".to_string(),
            title: "Indonesia Carbon Sequestration".to_string(),
            subtitle: "Technical Report".to_string(),
            methodology: "IPCC 2006 Guidelines Vol. 4 (AFOLU), Tier 1".to_string(),
            max_result_items: 8,
            max_image_height_mm: 150.0,
            margin_mm: 15.0,
            progress_label: "Generating PDF...".to_string(),
            failure_message: "Failed to generate PDF report. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ReportConfig =
            serde_json::from_str(r#"{"file_name": "custom.pdf", "max_result_items": 4}"#).unwrap();
        assert_eq!(config.file_name, "custom.pdf");
        assert_eq!(config.max_result_items, 4);
        assert_eq!(config.product_name, ReportConfig::default().product_name);
    }
}
