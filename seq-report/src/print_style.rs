//! Temporary print styling of live charts.
//!
//! The dashboard theme uses light text meant for a coloured background, which
//! disappears on white paper. [`with_print_style`] snapshots a chart's style,
//! forces dark labels, runs the caller's work and then puts the original
//! style back, whether or not that work succeeded.

use crate::chart::ChartHandle;
use crate::error::ChartError;
use serde_json::{json, Map, Value};
use std::future::Future;

const PRINT_TEXT: &str = "#000000";
const PRINT_GRID: &str = "rgba(0, 0, 0, 0.1)";

/// Overrides that make a chart legible on white paper.
///
/// Every scale present in `snapshot` gets dark ticks, titles and grid lines;
/// a snapshot without scales is treated as a plain `x`/`y` chart.
pub fn print_overrides(snapshot: &Value) -> Value {
    let scale_ids: Vec<String> = match snapshot.get("scales").and_then(Value::as_object) {
        Some(scales) if !scales.is_empty() => scales.keys().cloned().collect(),
        _ => vec!["x".to_string(), "y".to_string()],
    };

    let mut scales = Map::new();
    for id in scale_ids {
        scales.insert(
            id,
            json!({
                "ticks": { "color": PRINT_TEXT },
                "title": { "color": PRINT_TEXT },
                "grid": { "color": PRINT_GRID },
            }),
        );
    }

    json!({
        "color": PRINT_TEXT,
        "scales": Value::Object(scales),
        "plugins": {
            "legend": { "labels": { "color": PRINT_TEXT } },
            "title": { "color": PRINT_TEXT },
        },
    })
}

/// Patch that undoes `overrides` on a tree that looked like `snapshot`.
///
/// Keys the overrides touched get their snapshot value back; keys the
/// overrides introduced are set to `null` so they are removed again.
pub fn restore_patch(snapshot: &Value, overrides: &Value) -> Value {
    let Some(over) = overrides.as_object() else {
        return snapshot.clone();
    };
    let mut patch = Map::new();
    for (key, over_value) in over {
        let restored = match snapshot.get(key) {
            Some(original) if original.is_object() && over_value.is_object() => {
                restore_patch(original, over_value)
            }
            Some(original) => original.clone(),
            None => Value::Null,
        };
        patch.insert(key.clone(), restored);
    }
    Value::Object(patch)
}

/// Deep-merge `patch` into `target`. Object values merge recursively, `null`
/// removes the key and anything else replaces the existing value.
pub fn merge_style(target: &mut Value, patch: &Value) {
    let Some(patch) = patch.as_object() else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        for (key, value) in patch {
            match value {
                Value::Null => {
                    map.remove(key);
                }
                Value::Object(_) => {
                    let slot = map.entry(key.clone()).or_insert(Value::Null);
                    merge_style(slot, value);
                }
                other => {
                    map.insert(key.clone(), other.clone());
                }
            }
        }
    }
}

/// Run `work` against `chart` while it wears the print style.
///
/// The original style is restored and the chart redrawn afterwards even when
/// applying the overrides, redrawing or `work` itself failed. The first error
/// wins; a restore failure is only reported when everything else succeeded.
pub async fn with_print_style<'a, C, F, Fut, T>(chart: &'a C, work: F) -> Result<T, ChartError>
where
    C: ChartHandle + ?Sized,
    F: FnOnce(&'a C) -> Fut,
    Fut: Future<Output = Result<T, ChartError>>,
{
    let snapshot = chart.style()?;
    let overrides = print_overrides(&snapshot);

    let outcome = match chart.apply_style(&overrides).await {
        Ok(()) => match chart.redraw().await {
            Ok(()) => work(chart).await,
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    let restore = restore_patch(&snapshot, &overrides);
    let restored = match chart.apply_style(&restore).await {
        Ok(()) => chart.redraw().await,
        Err(e) => Err(e),
    };

    match (outcome, restored) {
        (Ok(value), Ok(())) => Ok(value),
        (Err(e), restored) => {
            if let Err(restore_err) = restored {
                log::warn!("Chart style restore also failed: {}", restore_err);
            }
            Err(e)
        }
        (Ok(_), Err(e)) => Err(e),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_overrides_cover_existing_scales() {
        let overrides = print_overrides(&json!({ "scales": { "y1": {}, "x": {} } }));
        assert_eq!(overrides["scales"]["y1"]["ticks"]["color"], PRINT_TEXT);
        assert_eq!(overrides["scales"]["x"]["grid"]["color"], PRINT_GRID);
        assert!(overrides["scales"].get("y").is_none());
        assert_eq!(overrides["plugins"]["legend"]["labels"]["color"], PRINT_TEXT);
    }

    #[test]
    fn test_overrides_default_to_xy() {
        let overrides = print_overrides(&json!({}));
        assert!(overrides["scales"].get("x").is_some());
        assert!(overrides["scales"].get("y").is_some());
    }

    #[test]
    fn test_merge_then_restore_is_identity() {
        let original = dashboard_options();
        let overrides = print_overrides(&original);

        let mut live = original.clone();
        merge_style(&mut live, &overrides);
        assert_eq!(live["scales"]["x"]["ticks"]["color"], PRINT_TEXT);
        assert_eq!(live["plugins"]["title"]["color"], PRINT_TEXT);
        assert_eq!(live["responsive"], true);

        merge_style(&mut live, &restore_patch(&original, &overrides));
        assert_eq!(live, original);
    }

    #[tokio::test]
    async fn test_work_sees_print_style_and_original_comes_back() {
        let chart = FakeChart::with_options(dashboard_options());

        let seen = with_print_style(&chart, |c| async move {
            let style = c.style()?;
            Ok::<Value, ChartError>(style["scales"]["y"]["ticks"]["color"].clone())
        })
        .await
        .unwrap();

        assert_eq!(seen, PRINT_TEXT);
        assert_eq!(chart.options(), dashboard_options());
        // One redraw in print style, one after restoring
        assert_eq!(chart.state.borrow().redraws, 2);
        assert_eq!(chart.state.borrow().drawn_with[1], dashboard_options());
    }

    #[tokio::test]
    async fn test_restore_runs_when_work_fails() {
        let chart = FakeChart::with_options(dashboard_options());

        let result: Result<(), ChartError> =
            with_print_style(&chart, |_| async { Err(ChartError::new("boom")) }).await;

        assert_eq!(result.unwrap_err(), ChartError::new("boom"));
        assert_eq!(chart.options(), dashboard_options());
        assert_eq!(chart.state.borrow().redraws, 2);
    }

    #[tokio::test]
    async fn test_failed_apply_skips_work() {
        let chart = FakeChart::with_options(dashboard_options());
        chart.state.borrow_mut().fail_apply = true;

        let mut ran = false;
        let result = with_print_style(&chart, |_| {
            ran = true;
            async { Ok(()) }
        })
        .await;

        assert!(result.is_err());
        assert!(!ran);
        assert_eq!(chart.options(), dashboard_options());
    }
}
