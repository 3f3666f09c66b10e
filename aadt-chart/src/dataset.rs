//! Dual-series chart description: historical bars plus a forecast line on one
//! shared label axis.
//!
//! `ChartSpec` derives `Serialize` so it can be handed to the JS chart layer
//! as JSON.

use aadt_core::series::ObservationSeries;
use aadt_forecast::forecast::ForecastSeries;
use serde::Serialize;
use serde_json::json;

/// Label of the forecast dataset.
pub const FORECAST_LABEL: &str = "Future AADT (Linear Regression)";

/// Id of the value axis both datasets share.
pub const VALUE_AXIS_ID: &str = "y-axis-1";

const HISTORICAL_COLOR: &str = "rgba(54, 162, 235, 0.7)";
const FORECAST_BORDER_COLOR: &str = "rgba(255, 99, 132, 0.8)";
const FORECAST_FILL_COLOR: &str = "rgba(255, 99, 132, 0.5)";

/// Everything a renderer needs to draw one station chart.
///
/// `labels`, `historical` and `forecast` always have the same length. The
/// first `historical_len` positions belong to observed years, the rest to
/// forecast years; each series is `None` in the other's positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub historical: Vec<Option<f64>>,
    pub forecast: Vec<Option<f64>>,
}

impl ChartSpec {
    /// Lay out `series` followed by `forecast` on one label axis.
    ///
    /// Labels keep concatenation order: observed years, then forecast years.
    /// They are never re-sorted.
    pub fn new(
        title: impl Into<String>,
        series: &ObservationSeries,
        forecast: Option<&ForecastSeries>,
    ) -> Self {
        let forecast_points = forecast.map(|f| f.points()).unwrap_or_default();
        let historical_len = series.len();
        let forecast_len = forecast_points.len();

        let labels = series
            .records()
            .iter()
            .map(|r| r.year.to_string())
            .chain(forecast_points.iter().map(|p| p.year.to_string()))
            .collect();

        let historical = series
            .records()
            .iter()
            .map(|r| Some(r.value))
            .chain(std::iter::repeat(None).take(forecast_len))
            .collect();

        let forecast = std::iter::repeat(None)
            .take(historical_len)
            .chain(forecast_points.iter().map(|p| Some(p.value)))
            .collect();

        ChartSpec {
            title: title.into(),
            labels,
            historical,
            forecast,
        }
    }

    /// Number of observed-year positions on the label axis.
    pub fn historical_len(&self) -> usize {
        self.historical.iter().filter(|v| v.is_some()).count()
    }

    /// Number of forecast-year positions on the label axis.
    pub fn forecast_len(&self) -> usize {
        self.forecast.iter().filter(|v| v.is_some()).count()
    }

    pub fn has_forecast(&self) -> bool {
        self.forecast_len() > 0
    }

    /// Chart.js configuration for this chart.
    ///
    /// Bars for observed years, a line for forecast years, both on one value
    /// axis starting at zero. Unset positions serialize as `null` so neither
    /// series draws into the other's segment.
    pub fn to_chart_config(&self) -> serde_json::Value {
        json!({
            "type": "bar",
            "data": {
                "labels": self.labels,
                "datasets": [
                    {
                        "label": self.title,
                        "data": self.historical,
                        "backgroundColor": HISTORICAL_COLOR,
                        "yAxisID": VALUE_AXIS_ID,
                    },
                    {
                        "label": FORECAST_LABEL,
                        "data": self.forecast,
                        "type": "line",
                        "fill": false,
                        "borderColor": FORECAST_BORDER_COLOR,
                        "backgroundColor": FORECAST_FILL_COLOR,
                        "pointRadius": 4,
                        "borderWidth": 2,
                        "yAxisID": VALUE_AXIS_ID,
                    }
                ]
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "legend": { "display": true },
                "scales": {
                    "yAxes": [{
                        "id": VALUE_AXIS_ID,
                        "position": "left",
                        "ticks": { "beginAtZero": true },
                    }],
                    "xAxes": [{
                        "ticks": { "maxRotation": 90, "minRotation": 45 },
                    }]
                },
                "tooltips": {
                    "suppressTitle": true,
                }
            }
        })
    }
}
