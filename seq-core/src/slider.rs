//! Range input to label synchronisation.
//!
//! Each [`SliderBinding`] pairs a range control with the label(s) next to it.
//! The split slider drives two labels whose numbers always sum to 100.

use crate::form::{fields, FormWriter};
use seq_utils::numbers::{format_percent, parse_finite};

/// How a slider's value is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderKind {
    /// One label showing `v%`
    Percent,
    /// A second label showing the complement `(100 - v)%`
    Split { complement_label_id: &'static str },
}

/// One (input, label) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBinding {
    pub input_id: &'static str,
    pub label_id: &'static str,
    pub kind: SliderKind,
}

/// Label text computed for a slider value.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderLabels {
    pub primary: String,
    pub complement: Option<String>,
}

/// The forest/coastal allocation slider.
pub const FOREST_SPLIT: SliderBinding = SliderBinding {
    input_id: fields::FOREST_PERCENT,
    label_id: "forest_percent_value",
    kind: SliderKind::Split {
        complement_label_id: "coastal_percent_value",
    },
};

/// Every slider on the calculator form.
pub const DEFAULT_SLIDERS: [SliderBinding; 3] = [
    SliderBinding {
        input_id: fields::SEQUESTRATION_PERCENT,
        label_id: "sequestration_percent_value",
        kind: SliderKind::Percent,
    },
    FOREST_SPLIT,
    SliderBinding {
        input_id: fields::RISK_FACTOR,
        label_id: "risk_factor_value",
        kind: SliderKind::Percent,
    },
];

impl SliderBinding {
    /// Compute label text for a raw input value. Returns `None` when the
    /// value does not parse, in which case the labels are left alone.
    pub fn render(&self, raw: &str) -> Option<SliderLabels> {
        let value = parse_finite(raw)?;
        let complement = match self.kind {
            SliderKind::Percent => None,
            SliderKind::Split { .. } => Some(format_percent(100.0 - value)),
        };
        Some(SliderLabels {
            primary: format_percent(value),
            complement,
        })
    }

    /// Render `raw` and write the result into the bound labels.
    ///
    /// Absent labels are skipped silently.
    pub fn sync(&self, raw: &str, form: &dyn FormWriter) {
        let Some(labels) = self.render(raw) else {
            log::debug!("Ignoring unparsable value {:?} on {}", raw, self.input_id);
            return;
        };
        form.set_text(self.label_id, &labels.primary);
        if let (SliderKind::Split { complement_label_id }, Some(text)) =
            (self.kind, labels.complement.as_deref())
        {
            form.set_text(complement_label_id, text);
        }
    }
}
