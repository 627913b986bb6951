//! Scenario preset buttons.
//!
//! A preset button carries `data-scenario`, `data-forest` and
//! `data-below-ground` attributes. Clicking one copies them into the form
//! and submits it; at most one button is marked active at a time.

use crate::error::PresetError;
use crate::form::{fields, FormWriter};
use crate::slider::FOREST_SPLIT;
use seq_utils::numbers::{format_number, parse_finite};
use serde::Serialize;

/// Dataset keys read from a preset button.
pub const ATTR_SCENARIO: &str = "scenario";
pub const ATTR_FOREST: &str = "forest";
pub const ATTR_BELOW_GROUND: &str = "belowGround";

/// Allocation parameters encoded on a preset button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioPreset {
    pub id: String,
    /// Forest share of the allocation, 0..=100. Coastal is the complement.
    pub forest_percent: f64,
    pub include_below_ground: bool,
}

impl ScenarioPreset {
    /// Build a preset from the raw attribute strings of a button.
    pub fn from_attributes(
        scenario: Option<&str>,
        forest: Option<&str>,
        below_ground: Option<&str>,
    ) -> Result<Self, PresetError> {
        let id = scenario
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(PresetError::MissingAttribute("scenario"))?;
        let forest_raw = forest.ok_or(PresetError::MissingAttribute("forest"))?;
        let forest_percent = parse_finite(forest_raw)
            .filter(|v| (0.0..=100.0).contains(v))
            .ok_or_else(|| PresetError::InvalidForestPercent(forest_raw.to_string()))?;
        let bg_raw = below_ground.ok_or(PresetError::MissingAttribute("below-ground"))?;
        let include_below_ground = parse_flag(bg_raw)
            .ok_or_else(|| PresetError::InvalidBelowGround(bg_raw.to_string()))?;

        Ok(Self {
            id: id.to_string(),
            forest_percent,
            include_below_ground,
        })
    }
}

// Server templates render booleans as `True`/`False`.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

/// A clickable preset button.
pub trait PresetButton {
    /// Value of a dataset entry (`data-*` attribute) on the button.
    fn data_attribute(&self, key: &str) -> Option<String>;

    /// Add or remove the active marker.
    fn set_active(&self, active: bool);

    fn preset(&self) -> Result<ScenarioPreset, PresetError> {
        ScenarioPreset::from_attributes(
            self.data_attribute(ATTR_SCENARIO).as_deref(),
            self.data_attribute(ATTR_FOREST).as_deref(),
            self.data_attribute(ATTR_BELOW_GROUND).as_deref(),
        )
    }
}

/// Handle a click on `buttons[clicked]`.
///
/// Marks the button active (clearing every other marker), writes the preset
/// into the form, refreshes the split slider labels and submits. A button
/// whose attributes do not parse is left untouched and nothing is submitted.
pub fn apply_preset<B: PresetButton>(
    buttons: &[B],
    clicked: usize,
    form: &dyn FormWriter,
) -> Result<ScenarioPreset, PresetError> {
    let button = buttons.get(clicked).ok_or(PresetError::NoSuchButton(clicked))?;
    let preset = button.preset()?;

    for other in buttons {
        other.set_active(false);
    }
    button.set_active(true);

    let forest = format_number(preset.forest_percent);
    if !form.set_value(fields::SCENARIO, &preset.id) {
        log::warn!("Hidden scenario field is missing; server will treat this as custom");
    }
    form.set_value(fields::FOREST_PERCENT, &forest);
    FOREST_SPLIT.sync(&forest, form);
    form.set_checked(fields::INCLUDE_BELOW_GROUND, preset.include_below_ground);

    log::info!(
        "Applying preset {} ({}% forest, below-ground: {})",
        preset.id,
        forest,
        preset.include_below_ground
    );
    form.submit();
    Ok(preset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::testing::MemoryForm;
    use crate::form::FormFieldAccessor;
    use std::cell::Cell;
    use std::collections::HashMap;

    struct FakeButton {
        data: HashMap<&'static str, &'static str>,
        active: Cell<bool>,
    }

    impl FakeButton {
        fn new(scenario: &'static str, forest: &'static str, bg: &'static str) -> Self {
            let mut data = HashMap::new();
            data.insert(ATTR_SCENARIO, scenario);
            data.insert(ATTR_FOREST, forest);
            data.insert(ATTR_BELOW_GROUND, bg);
            Self {
                data,
                active: Cell::new(false),
            }
        }
    }

    impl PresetButton for FakeButton {
        fn data_attribute(&self, key: &str) -> Option<String> {
            self.data.get(key).map(|s| s.to_string())
        }

        fn set_active(&self, active: bool) {
            self.active.set(active);
        }
    }

    fn buttons() -> Vec<FakeButton> {
        vec![
            FakeButton::new("conservative", "90", "false"),
            FakeButton::new("balanced", "80", "false"),
            FakeButton::new("coastal_optimized", "70", "False"),
            FakeButton::new("full_biomass", "80", "True"),
        ]
    }

    #[test]
    fn test_apply_preset_writes_form_and_submits() {
        let buttons = buttons();
        let form = MemoryForm::default();

        let preset = apply_preset(&buttons, 3, &form).unwrap();

        assert_eq!(preset.id, "full_biomass");
        assert_eq!(form.raw_value(fields::SCENARIO).as_deref(), Some("full_biomass"));
        assert_eq!(form.raw_value(fields::FOREST_PERCENT).as_deref(), Some("80"));
        assert_eq!(form.is_checked(fields::INCLUDE_BELOW_GROUND), Some(true));
        assert_eq!(form.text("forest_percent_value").as_deref(), Some("80%"));
        assert_eq!(form.text("coastal_percent_value").as_deref(), Some("20%"));
        assert_eq!(form.submissions.get(), 1);
    }

    #[test]
    fn test_exactly_one_active_after_clicks() {
        let buttons = buttons();
        let form = MemoryForm::default();

        apply_preset(&buttons, 0, &form).unwrap();
        apply_preset(&buttons, 2, &form).unwrap();

        let active: Vec<usize> = buttons
            .iter()
            .enumerate()
            .filter(|(_, b)| b.active.get())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(active, vec![2]);
        // Each click submits independently
        assert_eq!(form.submissions.get(), 2);
        assert_eq!(form.raw_value(fields::SCENARIO).as_deref(), Some("coastal_optimized"));
    }

    #[test]
    fn test_malformed_button_is_ignored() {
        let buttons = vec![FakeButton::new("odd", "120", "false")];
        let form = MemoryForm::default();

        let err = apply_preset(&buttons, 0, &form).unwrap_err();
        assert_eq!(err, PresetError::InvalidForestPercent("120".to_string()));
        assert!(!buttons[0].active.get());
        assert_eq!(form.submissions.get(), 0);
    }

    #[test]
    fn test_out_of_range_click() {
        let form = MemoryForm::default();
        assert_eq!(
            apply_preset(&buttons(), 9, &form).unwrap_err(),
            PresetError::NoSuchButton(9)
        );
    }

    #[test]
    fn test_from_attributes_requires_scenario() {
        let err = ScenarioPreset::from_attributes(None, Some("80"), Some("false")).unwrap_err();
        assert_eq!(err, PresetError::MissingAttribute("scenario"));
    }
}
