//! JSON dumps of the static calculator catalogs.

use log::info;
use seq_core::catalog::{scenario, Defaults, REFERENCES, SCENARIOS};
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print every preset, or only the one named `key`.
pub fn run_presets(key: Option<&str>) -> anyhow::Result<()> {
    match key {
        Some(key) => {
            let info = scenario(key).ok_or_else(|| {
                let known: Vec<&str> = SCENARIOS.iter().map(|s| s.key).collect();
                anyhow::anyhow!("Unknown preset {:?}, expected one of {}", key, known.join(", "))
            })?;
            print_json(info)
        }
        None => {
            info!("{} presets", SCENARIOS.len());
            print_json(&SCENARIOS[..])
        }
    }
}

pub fn run_references() -> anyhow::Result<()> {
    info!("{} references", REFERENCES.len());
    print_json(&REFERENCES[..])
}

pub fn run_defaults() -> anyhow::Result<()> {
    print_json(&Defaults::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_preset_prints() {
        assert!(run_presets(Some("balanced")).is_ok());
        assert!(run_presets(None).is_ok());
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let err = run_presets(Some("aggressive")).unwrap_err();
        assert!(err.to_string().contains("conservative"));
    }
}
