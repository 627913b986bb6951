//! Submit-time validation of the calculator form.
//!
//! Two rules run in order:
//! 1. the target year must come after the start year (blocking);
//! 2. target emissions above baseline emissions need a confirmation.
//!
//! Malformed or missing values block submission rather than slipping through.

use crate::form::{fields, FormFieldAccessor};
use crate::prompt::UserPrompt;
use seq_utils::numbers::format_number;

pub const INVALID_YEARS_MSG: &str = "Please enter valid numeric start and target years.";
pub const YEAR_ORDER_MSG: &str = "Target year must be after the start year.";
pub const INVALID_EMISSIONS_MSG: &str = "Please enter valid numeric emission values.";

/// Outcome of validating the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Let the submission through
    Allow,
    /// Cancel the submission and show the message
    Block(String),
    /// Ask the user; submit only if they accept
    Confirm(String),
}

/// Run both rules against the current form values.
pub fn validate(form: &dyn FormFieldAccessor) -> Verdict {
    let years = (
        form.year_field(fields::START_YEAR),
        form.year_field(fields::TARGET_YEAR),
    );
    let (start_year, target_year) = match years {
        (Ok(start), Ok(target)) => (start, target),
        (Err(e), _) | (_, Err(e)) => {
            log::debug!("Year validation failed: {}", e);
            return Verdict::Block(INVALID_YEARS_MSG.to_string());
        }
    };
    if target_year <= start_year {
        return Verdict::Block(YEAR_ORDER_MSG.to_string());
    }

    let emissions = (
        form.number_field(fields::EMISSIONS_BASELINE),
        form.number_field(fields::EMISSIONS_TARGET),
    );
    let (baseline, target) = match emissions {
        (Ok(baseline), Ok(target)) => (baseline, target),
        (Err(e), _) | (_, Err(e)) => {
            log::debug!("Emission validation failed: {}", e);
            return Verdict::Block(INVALID_EMISSIONS_MSG.to_string());
        }
    };
    if target > baseline {
        return Verdict::Confirm(format!(
            "Target emissions ({} MtCO2e) exceed baseline emissions ({} MtCO2e), \
             so no reduction would be required. Continue anyway?",
            format_number(target),
            format_number(baseline)
        ));
    }

    Verdict::Allow
}

impl Verdict {
    /// Resolve the verdict against the user, returning whether the
    /// submission should proceed.
    pub fn resolve(&self, prompt: &dyn UserPrompt) -> bool {
        match self {
            Verdict::Allow => true,
            Verdict::Block(message) => {
                prompt.alert(message);
                false
            }
            Verdict::Confirm(message) => prompt.confirm(message),
        }
    }
}

/// Validate and resolve in one step; this is what the submit handler calls.
pub fn should_submit(form: &dyn FormFieldAccessor, prompt: &dyn UserPrompt) -> bool {
    validate(form).resolve(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::testing::MemoryForm;
    use std::cell::RefCell;

    struct ScriptedPrompt {
        accept: bool,
        alerts: RefCell<Vec<String>>,
        confirms: RefCell<Vec<String>>,
    }

    impl ScriptedPrompt {
        fn new(accept: bool) -> Self {
            Self {
                accept,
                alerts: RefCell::new(Vec::new()),
                confirms: RefCell::new(Vec::new()),
            }
        }
    }

    impl UserPrompt for ScriptedPrompt {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn confirm(&self, message: &str) -> bool {
            self.confirms.borrow_mut().push(message.to_string());
            self.accept
        }
    }

    fn form(start: &str, target: &str, baseline: &str, goal: &str) -> MemoryForm {
        MemoryForm::with_values(&[
            (fields::START_YEAR, start),
            (fields::TARGET_YEAR, target),
            (fields::EMISSIONS_BASELINE, baseline),
            (fields::EMISSIONS_TARGET, goal),
        ])
    }

    #[test]
    fn test_equal_years_block() {
        let verdict = validate(&form("2025", "2025", "1244", "540"));
        assert_eq!(verdict, Verdict::Block(YEAR_ORDER_MSG.to_string()));
    }

    #[test]
    fn test_later_target_year_allows() {
        assert_eq!(validate(&form("2025", "2026", "1244", "540")), Verdict::Allow);
    }

    #[test]
    fn test_earlier_target_year_blocks_and_alerts() {
        let prompt = ScriptedPrompt::new(true);
        assert!(!should_submit(&form("2050", "2030", "1244", "540"), &prompt));
        assert_eq!(prompt.alerts.borrow().len(), 1);
        assert!(prompt.confirms.borrow().is_empty());
    }

    #[test]
    fn test_target_above_baseline_declined() {
        let prompt = ScriptedPrompt::new(false);
        assert!(!should_submit(&form("2030", "2050", "500", "600"), &prompt));
        assert_eq!(prompt.confirms.borrow().len(), 1);
        assert!(prompt.confirms.borrow()[0].contains("600"));
    }

    #[test]
    fn test_target_above_baseline_accepted() {
        let prompt = ScriptedPrompt::new(true);
        assert!(should_submit(&form("2030", "2050", "500", "600"), &prompt));
    }

    #[test]
    fn test_equal_emissions_need_no_prompt() {
        assert_eq!(validate(&form("2030", "2050", "500", "500")), Verdict::Allow);
    }

    #[test]
    fn test_malformed_years_block() {
        let verdict = validate(&form("abc", "2050", "500", "400"));
        assert_eq!(verdict, Verdict::Block(INVALID_YEARS_MSG.to_string()));

        let missing = MemoryForm::with_values(&[(fields::START_YEAR, "2030")]);
        assert_eq!(validate(&missing), Verdict::Block(INVALID_YEARS_MSG.to_string()));
    }

    #[test]
    fn test_malformed_emissions_block() {
        let verdict = validate(&form("2030", "2050", "", "400"));
        assert_eq!(verdict, Verdict::Block(INVALID_EMISSIONS_MSG.to_string()));
    }
}
