//! Reusable Dioxus RSX components for the AADT chart app.

mod chart_header;
mod chart_panel;
mod forecast_summary;
mod station_selector;
mod status;

pub use chart_header::{ChartHeader, AADT_UNIT_DESCRIPTION};
pub use chart_panel::ChartPanel;
pub use forecast_summary::ForecastSummary;
pub use station_selector::StationSelector;
pub use status::{ErrorDisplay, LoadingSpinner};
