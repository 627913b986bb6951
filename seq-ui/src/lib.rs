//! Browser side of the sequestration calculator.
//!
//! This crate provides:
//! - `dom`: `web_sys` implementations of the form, results, preset and prompt seams
//! - `js_bridge`: access to the page's live Chart.js instances via `window.charts`
//! - `wiring`: slider, preset and submit listeners on the server-rendered page
//! - `state`: reactive export state with Dioxus Signals
//! - `components`: the report export button

pub mod components;
pub mod dom;
pub mod js_bridge;
pub mod state;
pub mod wiring;
