//! Traffic Count Station Chart
//!
//! Shows the yearly AADT history of a selected count station as bars, with a
//! ten-year linear-trend forecast drawn as a line on the same axis. Only one
//! chart exists at a time: selecting another station replaces it, and the
//! panel's close button destroys it.
//!
//! Data flow:
//! 1. `build.rs` copies `stations.geojson` into `OUT_DIR`.
//! 2. `include_str!` embeds the station layer into the WASM binary.
//! 3. On mount, the FeatureCollection is parsed into `Station`s.
//! 4. When the user selects a station, its property bag goes through
//!    `apply_selection()`, which shows the chart spec via the shared
//!    `ChartSession`, or closes the chart when the selection is cleared.

use aadt_chart::handler::{apply_selection, forecast_legend, RenderInstruction};
use aadt_chart_ui::components::{
    ChartHeader, ChartPanel, ErrorDisplay, ForecastSummary, LoadingSpinner, StationSelector,
};
use aadt_chart_ui::state::AppState;
use aadt_core::station::Station;
use dioxus::prelude::*;

/// Station layer exported from the AADT feature service.
const STATIONS_GEOJSON: &str = include_str!(concat!(env!("OUT_DIR"), "/stations.geojson"));

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("traffic-counts-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    web_sys::console::log_1(&"[AADT] traffic-counts App component mounted".into());

    let mut state = use_context_provider(AppState::new);
    let mut instruction: Signal<Option<RenderInstruction>> = use_signal(|| None);

    // Parse the embedded station layer on mount
    use_effect(move || {
        if STATIONS_GEOJSON.is_empty() {
            log::warn!("No station fixture embedded");
            state.loading.set(false);
            return;
        }
        match Station::from_feature_collection(STATIONS_GEOJSON) {
            Ok(stations) => {
                log::info!("Loaded {} count stations", stations.len());
                state.stations.set(stations);
            }
            Err(e) => {
                log::error!("Failed to load stations: {}", e);
                state
                    .error_msg
                    .set(Some(format!("Failed to load station data: {}", e)));
            }
        }
        state.loading.set(false);
    });

    // Re-render the chart whenever the station selection changes
    use_effect(move || {
        if (state.loading)() {
            return;
        }
        let config = (state.view_config)();

        let selected = state.selected();
        let render = apply_selection(
            &mut *state.chart_session.write(),
            selected.as_ref().map(|station| &station.properties),
            &config,
        );
        if let (Some(station), Some(render)) = (&selected, &render) {
            log::info!(
                "Station {}: {} valid years, forecast {}",
                station.id,
                render.series.valid_count(),
                if render.forecast.is_some() { "shown" } else { "suppressed" }
            );
        }
        instruction.set(render);
    });

    let policy = (state.view_config)().policy;
    let required_years = policy.min_observations;
    let coordinates = state.selected().and_then(|s| s.coordinates);

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            h2 {
                style: "margin: 0 0 8px 0;",
                "Traffic Count Stations"
            }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err, dismissable: true }
            }

            if (state.loading)() {
                LoadingSpinner {}
            } else {
                StationSelector {}

                if let Some(render) = instruction() {
                    ChartHeader {
                        title: render.title.clone(),
                        coordinates: coordinates,
                    }
                    ForecastSummary {
                        valid_years: render.series.valid_count(),
                        required_years: required_years,
                        next: render
                            .forecast
                            .as_ref()
                            .and_then(|f| f.points().first().map(|p| (p.year, p.value))),
                        slope: render.forecast.as_ref().map(|f| f.model().slope),
                    }
                }
            }

            ChartPanel { min_height: 450 }

            ForecastLegend { forecast_text: forecast_legend(&policy) }
        }
    }
}

/// Legend explaining the two chart series.
#[component]
fn ForecastLegend(forecast_text: String) -> Element {
    rsx! {
        div {
            style: "margin-top: 12px; padding: 8px 12px; background: #FAFAFA; border-radius: 4px; border: 1px solid #E0E0E0; font-size: 12px; display: flex; gap: 16px; flex-wrap: wrap;",
            div {
                style: "display: flex; align-items: center; gap: 4px;",
                span {
                    style: "display: inline-block; width: 12px; height: 12px; background: rgba(54, 162, 235, 0.7);",
                }
                "Counted AADT (0 = no count that year)"
            }
            div {
                style: "display: flex; align-items: center; gap: 4px;",
                span {
                    style: "display: inline-block; width: 16px; height: 3px; background: rgba(255, 99, 132, 0.8);",
                }
                "{forecast_text}"
            }
        }
    }
}
