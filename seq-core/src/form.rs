//! Typed access to the calculator form.
//!
//! Validation and report generation both read the live form. Instead of each
//! handler looking elements up on its own, they share a [`FormFieldAccessor`]
//! that exposes raw values plus typed getters built on top of them.

use crate::error::{FieldError, FieldResult};
use seq_utils::numbers::parse_finite;

/// Names (element ids) of the calculator form controls.
pub mod fields {
    pub const FORM: &str = "calculator-form";
    pub const SCENARIO: &str = "scenario";
    pub const EMISSIONS_BASELINE: &str = "emissions_2030";
    pub const EMISSIONS_TARGET: &str = "target_2050";
    pub const SEQUESTRATION_PERCENT: &str = "sequestration_percent";
    pub const START_YEAR: &str = "start_year";
    pub const TARGET_YEAR: &str = "target_year";
    pub const FOREST_AREA: &str = "forest_area_available";
    pub const COASTAL_AREA: &str = "coastal_area_available";
    pub const FOREST_PERCENT: &str = "forest_percent";
    pub const FOREST_RATE: &str = "forest_rate";
    pub const COASTAL_RATE: &str = "coastal_rate";
    pub const ROOT_TO_SHOOT: &str = "root_to_shoot_ratio";
    pub const INCLUDE_BELOW_GROUND: &str = "include_below_ground";
    pub const RISK_FACTOR: &str = "risk_factor";
}

/// Read side of the form.
///
/// Implementors only provide the two raw lookups; the typed getters parse
/// on every call so they always reflect the current control state.
pub trait FormFieldAccessor {
    /// Current string value of the control, `None` if it does not exist.
    fn raw_value(&self, name: &str) -> Option<String>;

    /// Checked state of a checkbox, `None` if it does not exist.
    fn is_checked(&self, name: &str) -> Option<bool>;

    /// Parse a year field as an integer.
    fn year_field(&self, name: &str) -> FieldResult<i32> {
        let raw = self
            .raw_value(name)
            .ok_or_else(|| FieldError::Missing(name.to_string()))?;
        raw.trim().parse::<i32>().map_err(|_| FieldError::Malformed {
            name: name.to_string(),
            raw,
        })
    }

    /// Parse a numeric field; `NaN` and infinities are malformed.
    fn number_field(&self, name: &str) -> FieldResult<f64> {
        let raw = self
            .raw_value(name)
            .ok_or_else(|| FieldError::Missing(name.to_string()))?;
        parse_finite(&raw).ok_or(FieldError::Malformed {
            name: name.to_string(),
            raw,
        })
    }

    /// Parse a percentage field, which must lie in 0..=100.
    fn percent_field(&self, name: &str) -> FieldResult<f64> {
        let value = self.number_field(name)?;
        if (0.0..=100.0).contains(&value) {
            Ok(value)
        } else {
            Err(FieldError::Malformed {
                name: name.to_string(),
                raw: value.to_string(),
            })
        }
    }
}

/// Write side of the form, used when a preset is applied.
///
/// Setters return `false` when the target control is absent.
pub trait FormWriter {
    fn set_value(&self, id: &str, value: &str) -> bool;
    fn set_checked(&self, id: &str, checked: bool) -> bool;
    fn set_text(&self, id: &str, text: &str) -> bool;
    /// Submit the enclosing form (full page reload).
    fn submit(&self);
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory form used by the unit tests of this crate.

    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::{HashMap, HashSet};

    #[derive(Default)]
    pub struct MemoryForm {
        /// Ids that behave as if the element were not on the page
        pub absent: HashSet<String>,
        pub values: RefCell<HashMap<String, String>>,
        pub checked: RefCell<HashMap<String, bool>>,
        pub texts: RefCell<HashMap<String, String>>,
        pub submissions: Cell<usize>,
    }

    impl MemoryForm {
        pub fn with_values(pairs: &[(&str, &str)]) -> Self {
            let form = Self::default();
            for (k, v) in pairs {
                form.values.borrow_mut().insert(k.to_string(), v.to_string());
            }
            form
        }

        pub fn without(ids: &[&str]) -> Self {
            Self {
                absent: ids.iter().map(|id| id.to_string()).collect(),
                ..Default::default()
            }
        }

        pub fn text(&self, id: &str) -> Option<String> {
            self.texts.borrow().get(id).cloned()
        }
    }

    impl FormFieldAccessor for MemoryForm {
        fn raw_value(&self, name: &str) -> Option<String> {
            self.values.borrow().get(name).cloned()
        }

        fn is_checked(&self, name: &str) -> Option<bool> {
            self.checked.borrow().get(name).copied()
        }
    }

    impl FormWriter for MemoryForm {
        fn set_value(&self, id: &str, value: &str) -> bool {
            if self.absent.contains(id) {
                return false;
            }
            self.values.borrow_mut().insert(id.to_string(), value.to_string());
            true
        }

        fn set_checked(&self, id: &str, checked: bool) -> bool {
            if self.absent.contains(id) {
                return false;
            }
            self.checked.borrow_mut().insert(id.to_string(), checked);
            true
        }

        fn set_text(&self, id: &str, text: &str) -> bool {
            if self.absent.contains(id) {
                return false;
            }
            self.texts.borrow_mut().insert(id.to_string(), text.to_string());
            true
        }

        fn submit(&self) {
            self.submissions.set(self.submissions.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryForm;
    use super::*;

    #[test]
    fn test_year_field_parses_integers() {
        let form = MemoryForm::with_values(&[(fields::START_YEAR, " 2030 ")]);
        assert_eq!(form.year_field(fields::START_YEAR), Ok(2030));
    }

    #[test]
    fn test_year_field_rejects_garbage_and_missing() {
        let form = MemoryForm::with_values(&[(fields::START_YEAR, "20x0")]);
        assert!(matches!(
            form.year_field(fields::START_YEAR),
            Err(FieldError::Malformed { .. })
        ));
        assert_eq!(
            form.year_field(fields::TARGET_YEAR),
            Err(FieldError::Missing(fields::TARGET_YEAR.to_string()))
        );
    }

    #[test]
    fn test_number_field_rejects_nan() {
        let form = MemoryForm::with_values(&[(fields::EMISSIONS_BASELINE, "NaN")]);
        assert!(form.number_field(fields::EMISSIONS_BASELINE).is_err());
    }

    #[test]
    fn test_percent_field_range() {
        let form = MemoryForm::with_values(&[
            (fields::FOREST_PERCENT, "80"),
            (fields::RISK_FACTOR, "140"),
        ]);
        assert_eq!(form.percent_field(fields::FOREST_PERCENT), Ok(80.0));
        assert!(form.percent_field(fields::RISK_FACTOR).is_err());
    }
}
