//! `validate` subcommand.

use crate::console::ConsolePrompt;
use crate::snapshot::Snapshot;
use log::info;
use seq_core::form::fields;
use seq_core::validate::{validate, Verdict};

/// Run the submit-time checks against the given values.
///
/// Fails when the form would have refused to submit.
pub fn run_validate(
    start_year: &str,
    target_year: &str,
    emissions_2030: &str,
    target_2050: &str,
    auto_accept: bool,
) -> anyhow::Result<()> {
    let form = Snapshot::with_fields(&[
        (fields::START_YEAR, start_year),
        (fields::TARGET_YEAR, target_year),
        (fields::EMISSIONS_BASELINE, emissions_2030),
        (fields::EMISSIONS_TARGET, target_2050),
    ]);

    let verdict = validate(&form);
    if verdict.resolve(&ConsolePrompt { auto_accept }) {
        info!("Inputs accepted");
        println!("ok");
        return Ok(());
    }
    match verdict {
        Verdict::Block(message) => anyhow::bail!(message),
        _ => anyhow::bail!("Submission cancelled"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_inputs() {
        assert!(run_validate("2030", "2050", "1244", "540", false).is_ok());
    }

    #[test]
    fn test_year_order_is_enforced() {
        let err = run_validate("2050", "2030", "1244", "540", true).unwrap_err();
        assert_eq!(err.to_string(), seq_core::validate::YEAR_ORDER_MSG);
    }

    #[test]
    fn test_target_above_baseline_needs_yes() {
        assert!(run_validate("2030", "2050", "500", "900", false).is_err());
        assert!(run_validate("2030", "2050", "500", "900", true).is_ok());
    }

    #[test]
    fn test_malformed_emissions_block() {
        assert!(run_validate("2030", "2050", "lots", "540", true).is_err());
    }
}
