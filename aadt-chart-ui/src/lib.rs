//! Shared Dioxus components and Chart.js bridge for AADT chart apps.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for Chart.js functions via `js_sys::eval()`,
//!   and `JsChartRenderer`, the renderer behind the app's `ChartSession`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (station selector, chart panel, etc.)

pub mod js_bridge;
pub mod state;
pub mod components;
