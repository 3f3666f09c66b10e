//! Chart shaping and session management for AADT station charts.
//!
//! This crate provides:
//! - `dataset`: `ChartSpec`, the dual-series (historical bars + forecast line)
//!   description handed to a renderer, and its Chart.js config export
//! - `session`: `ChartSession`, which keeps at most one rendered chart alive
//! - `handler`: the station click handler turning a property bag into a
//!   render instruction

pub mod dataset;
pub mod handler;
pub mod session;
