//! Typed wrappers around the page's Chart.js instances.
//!
//! The dashboard script creates its charts before this module runs and
//! registers them on `window.charts` under the keys in
//! [`seq_report::REPORT_CHARTS`]. Everything here goes through
//! `js_sys::Reflect` so a missing or half-initialised chart surfaces as an
//! error instead of a JS exception.

use async_trait::async_trait;
use js_sys::{Array, Function, Object, Promise, Reflect, JSON};
use seq_report::{ChartError, ChartHandle, ChartProvider, ChartSpec, RasterImage};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Global holding the chart registry.
pub const CHART_REGISTRY: &str = "charts";

fn js_error(context: &str, err: JsValue) -> ChartError {
    ChartError::new(format!("{}: {:?}", context, err))
}

fn is_object(value: &JsValue) -> bool {
    value.is_object() && !value.is_null()
}

/// The `window.charts` registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsChartRegistry;

#[async_trait(?Send)]
impl ChartProvider for JsChartRegistry {
    fn chart(&self, spec: &ChartSpec) -> Option<Box<dyn ChartHandle>> {
        let window = web_sys::window()?;
        let canvas = window
            .document()?
            .get_element_by_id(spec.canvas_id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;

        let registry = Reflect::get(&window, &JsValue::from_str(CHART_REGISTRY)).ok()?;
        if !is_object(&registry) {
            log::warn!("window.{} is not set", CHART_REGISTRY);
            return None;
        }
        let instance = Reflect::get(&registry, &JsValue::from_str(spec.key)).ok()?;
        if !is_object(&instance) {
            return None;
        }
        Some(Box::new(JsChart { canvas, instance }))
    }

    async fn yield_now(&self) {
        if let Err(e) = next_tick().await {
            log::debug!("Could not yield before encoding: {}", e);
        }
    }
}

/// One live Chart.js instance and its canvas.
pub struct JsChart {
    canvas: HtmlCanvasElement,
    instance: JsValue,
}

impl JsChart {
    fn options(&self) -> Result<JsValue, ChartError> {
        let options = Reflect::get(&self.instance, &JsValue::from_str("options"))
            .map_err(|e| js_error("reading chart options", e))?;
        if is_object(&options) {
            Ok(options)
        } else {
            Err(ChartError::new("chart has no options object"))
        }
    }
}

/// Deep-merge a JSON patch into a live JS object; `null` deletes the key.
fn merge_into(
    target: &JsValue,
    patch: &serde_json::Map<String, Value>,
) -> Result<(), ChartError> {
    for (key, value) in patch {
        let js_key = JsValue::from_str(key);
        match value {
            Value::Null => {
                Reflect::delete_property(target.unchecked_ref::<Object>(), &js_key)
                    .map_err(|e| js_error("deleting style key", e))?;
            }
            Value::Object(child_patch) => {
                let mut child = Reflect::get(target, &js_key).map_err(|e| js_error(key, e))?;
                if !is_object(&child) {
                    child = Object::new().into();
                    Reflect::set(target, &js_key, &child).map_err(|e| js_error(key, e))?;
                }
                merge_into(&child, child_patch)?;
            }
            leaf => {
                let text =
                    serde_json::to_string(leaf).map_err(|e| ChartError::new(e.to_string()))?;
                let js_value = JSON::parse(&text).map_err(|e| js_error(key, e))?;
                Reflect::set(target, &js_key, &js_value).map_err(|e| js_error(key, e))?;
            }
        }
    }
    Ok(())
}

/// Resolve after the browser had a chance to run its event loop once.
async fn next_tick() -> Result<(), ChartError> {
    let window = web_sys::window().ok_or_else(|| ChartError::new("no window"))?;
    let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0)
            .is_err()
        {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| js_error("waiting for redraw", e))
}

#[async_trait(?Send)]
impl ChartHandle for JsChart {
    fn style(&self) -> Result<Value, ChartError> {
        let text = JSON::stringify(&self.options()?)
            .map_err(|e| js_error("serialising chart options", e))?
            .as_string()
            .unwrap_or_default();
        serde_json::from_str(&text).map_err(|e| ChartError::new(e.to_string()))
    }

    async fn apply_style(&self, patch: &Value) -> Result<(), ChartError> {
        let Some(patch) = patch.as_object() else {
            return Err(ChartError::new("style patch must be an object"));
        };
        merge_into(&self.options()?, patch)
    }

    async fn redraw(&self) -> Result<(), ChartError> {
        let update = Reflect::get(&self.instance, &JsValue::from_str("update"))
            .map_err(|e| js_error("reading chart.update", e))?
            .dyn_into::<Function>()
            .map_err(|e| js_error("chart.update is not a function", e))?;
        // "none" skips the animation so the next frame is final
        let args = Array::of1(&JsValue::from_str("none"));
        update
            .apply(&self.instance, &args)
            .map_err(|e| js_error("chart.update", e))?;
        next_tick().await
    }

    async fn rasterize(&self) -> Result<RasterImage, ChartError> {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        let context = self
            .canvas
            .get_context("2d")
            .map_err(|e| js_error("getting 2d context", e))?
            .ok_or_else(|| ChartError::new("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|e| js_error("casting 2d context", e.into()))?;
        let data = context
            .get_image_data(0.0, 0.0, width as f64, height as f64)
            .map_err(|e| js_error("reading canvas pixels", e))?;
        RasterImage::from_rgba(data.width(), data.height(), data.data().0)
    }
}
