//! Saved state of the calculator page.
//!
//! ```json
//! {
//!   "fields": { "emissions_2030": "1244", "start_year": 2030 },
//!   "checkboxes": { "include_below_ground": true },
//!   "results": [ { "value": "2.1 Mha", "label": "Forest Area Required" } ],
//!   "badge": { "feasible": true, "text": "Scientifically Feasible" }
//! }
//! ```

use seq_core::form::FormFieldAccessor;
use seq_report::{FeasibilityBadge, RenderedResults, ResultItem};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotResult {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotBadge {
    pub feasible: bool,
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Control values keyed by element id; strings are kept verbatim
    pub fields: HashMap<String, Value>,
    pub checkboxes: HashMap<String, bool>,
    pub results: Vec<SnapshotResult>,
    pub badge: Option<SnapshotBadge>,
}

impl Snapshot {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read snapshot {}: {}", path.display(), e))?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn with_fields(pairs: &[(&str, &str)]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect(),
            ..Default::default()
        }
    }
}

impl FormFieldAccessor for Snapshot {
    fn raw_value(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn is_checked(&self, name: &str) -> Option<bool> {
        self.checkboxes.get(name).copied()
    }
}

impl RenderedResults for Snapshot {
    fn result_items(&self) -> Vec<ResultItem> {
        self.results
            .iter()
            .map(|r| ResultItem {
                value: r.value.clone(),
                label: r.label.clone(),
            })
            .collect()
    }

    fn feasibility_badge(&self) -> Option<FeasibilityBadge> {
        self.badge.as_ref().map(|b| FeasibilityBadge {
            feasible: b.feasible,
            text: b.text.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_and_strings_read_as_raw_values() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"fields": {"start_year": 2030, "emissions_2030": "1,244"}, "checkboxes": {"include_below_ground": false}}"#,
        )
        .unwrap();

        assert_eq!(snapshot.raw_value("start_year").as_deref(), Some("2030"));
        assert_eq!(snapshot.raw_value("emissions_2030").as_deref(), Some("1,244"));
        assert_eq!(snapshot.raw_value("risk_factor"), None);
        assert_eq!(snapshot.is_checked("include_below_ground"), Some(false));
        assert!(snapshot.number_field("emissions_2030").is_err());
    }

    #[test]
    fn test_results_and_badge() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"results": [{"value": "12 Mha", "label": "Area"}], "badge": {"feasible": false, "text": "Not Feasible"}}"#,
        )
        .unwrap();

        assert_eq!(snapshot.result_items()[0].label, "Area");
        assert!(!snapshot.feasibility_badge().unwrap().feasible);
    }
}
