//! Chart panel with dismiss control.

use crate::state::{AppState, CHART_CANVAS_ID, CHART_PANEL_ID};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartPanelProps {
    /// Minimum height in pixels
    #[props(default = 400)]
    pub min_height: u32,
}

/// The panel Chart.js renders into.
///
/// Starts hidden; the chart session shows it when a chart is rendered. The
/// close button goes through `ChartSession::close`, the same hide-and-destroy
/// path a replacement uses.
#[component]
pub fn ChartPanel(props: ChartPanelProps) -> Element {
    let mut state = use_context::<AppState>();
    let style = format!(
        "display: none; min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );
    let canvas_style = format!("width: 100%; height: {}px;", props.min_height);

    let on_close = move |_: Event<MouseData>| {
        state.chart_session.write().close();
        state.selected_station.set(String::new());
    };

    rsx! {
        div {
            id: CHART_PANEL_ID,
            style: "{style}",
            button {
                id: "closeChartBtn",
                style: "position: absolute; top: 4px; right: 4px; z-index: 1;",
                onclick: on_close,
                "Close"
            }
            div {
                id: CHART_CANVAS_ID,
                style: "{canvas_style}",
            }
        }
    }
}
