//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use crate::js_bridge::JsChartRenderer;
use aadt_chart::handler::ViewConfig;
use aadt_chart::session::ChartSession;
use aadt_core::station::Station;
use dioxus::prelude::*;

/// DOM id of the panel that is shown while a chart is open.
pub const CHART_PANEL_ID: &str = "chart-container";

/// DOM id of the element Chart.js renders into.
pub const CHART_CANVAS_ID: &str = "aadt-chart";

/// Shared application state for the AADT chart app.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Available count stations
    pub stations: Signal<Vec<Station>>,
    /// Currently selected station id (empty when nothing is selected)
    pub selected_station: Signal<String>,
    /// Year range and forecasting policy
    pub view_config: Signal<ViewConfig>,
    /// The single live chart
    pub chart_session: Signal<ChartSession<JsChartRenderer>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            stations: Signal::new(Vec::new()),
            selected_station: Signal::new(String::new()),
            view_config: Signal::new(ViewConfig::default()),
            chart_session: Signal::new(ChartSession::new(JsChartRenderer::new(
                CHART_PANEL_ID,
                CHART_CANVAS_ID,
            ))),
        }
    }

    /// The selected station, if it exists.
    pub fn selected(&self) -> Option<Station> {
        let id = self.selected_station.read();
        self.stations.read().iter().find(|s| s.id == *id).cloned()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
