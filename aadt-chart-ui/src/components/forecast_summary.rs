//! One-line summary of a station's forecast.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ForecastSummaryProps {
    /// Number of years with a valid count
    pub valid_years: usize,
    /// Valid years required for a forecast
    pub required_years: usize,
    /// (first forecast year, its value), when a forecast exists
    #[props(!optional)]
    pub next: Option<(i32, f64)>,
    /// Fitted trend in vehicles/day per year
    #[props(!optional)]
    pub slope: Option<f64>,
}

/// States whether a forecast was produced and, if so, where it starts.
#[component]
pub fn ForecastSummary(props: ForecastSummaryProps) -> Element {
    let text = match (props.next, props.slope) {
        (Some((year, value)), Some(slope)) => format!(
            "Trend {:+.0} vehicles/day per year over {} counted years; {} forecast: {:.0}",
            slope, props.valid_years, year, value
        ),
        (Some((year, value)), None) => format!("{} forecast: {:.0}", year, value),
        _ => format!(
            "No forecast: {} counted years, {} needed",
            props.valid_years, props.required_years
        ),
    };

    rsx! {
        p {
            style: "margin: 4px 0 8px 0; font-size: 12px; color: #666;",
            "{text}"
        }
    }
}
