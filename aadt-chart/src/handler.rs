//! Station click handling.
//!
//! The map layer hands us the clicked feature's property bag; everything from
//! there to the chart description happens in `handle_station_click`.

use crate::dataset::ChartSpec;
use crate::session::{ChartRenderer, ChartSession};
use aadt_core::schema::YearRange;
use aadt_core::series::{ObservationSeries, SeriesBuilder};
use aadt_core::station::StationProperties;
use aadt_forecast::forecast::{ForecastSeries, TrendForecaster};
use aadt_forecast::policy::ForecastPolicy;
use log::debug;

/// Year range and forecasting policy applied to every click.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewConfig {
    pub years: YearRange,
    pub policy: ForecastPolicy,
}

/// What to draw for one clicked station.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInstruction {
    pub title: String,
    pub series: ObservationSeries,
    /// `None` when the station has too little data for a trend.
    pub forecast: Option<ForecastSeries>,
    pub spec: ChartSpec,
}

/// Chart title for a station: `AADT for {route} {location}`.
pub fn chart_title(properties: &StationProperties) -> String {
    format!("AADT for {} {}", properties.route(), properties.location())
}

/// Legend text for the forecast line under `policy`.
pub fn forecast_legend(policy: &ForecastPolicy) -> String {
    format!(
        "Linear trend forecast (needs {} counted years, rounded to {})",
        policy.min_observations, policy.rounding_step
    )
}

/// Build the series, forecast it and lay both out for the chart.
pub fn handle_station_click(
    properties: &StationProperties,
    config: &ViewConfig,
) -> RenderInstruction {
    let series = SeriesBuilder::build(properties, config.years);
    let forecast = TrendForecaster::new(config.policy).forecast(&series);
    let title = chart_title(properties);
    debug!(
        "{}: {} valid years, forecast {}",
        title,
        series.valid_count(),
        if forecast.is_some() { "shown" } else { "suppressed" }
    );
    let spec = ChartSpec::new(title.clone(), &series, forecast.as_ref());
    RenderInstruction {
        title,
        series,
        forecast,
        spec,
    }
}

/// Bring the chart in line with the current selection.
///
/// A selected station replaces whatever chart is open. No selection closes
/// the open chart, so nothing stays on screen without its header.
pub fn apply_selection<R: ChartRenderer>(
    session: &mut ChartSession<R>,
    selected: Option<&StationProperties>,
    config: &ViewConfig,
) -> Option<RenderInstruction> {
    match selected {
        Some(properties) => {
            let render = handle_station_click(properties, config);
            session.show(&render.spec);
            Some(render)
        }
        None => {
            session.close();
            None
        }
    }
}
