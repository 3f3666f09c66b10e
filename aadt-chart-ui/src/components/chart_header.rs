//! Chart header: station title, position and Y-axis unit.

use dioxus::prelude::*;

/// Y-axis unit shown under every station chart.
pub const AADT_UNIT_DESCRIPTION: &str = "Annual Average Daily Traffic (vehicles/day)";

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    /// Chart title, e.g. "AADT for I-26 N OF US-64"
    pub title: String,
    /// (longitude, latitude) of the station, when known
    #[props(!optional)]
    pub coordinates: Option<(f64, f64)>,
}

/// Header for the station chart.
#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    let position = props
        .coordinates
        .map(|(lon, lat)| format!("{:.4}, {:.4}", lat, lon))
        .unwrap_or_default();

    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{props.title}"
            }
            if !position.is_empty() {
                p {
                    style: "margin: 0; font-size: 12px; color: #666;",
                    "Location: {position}"
                }
            }
            p {
                style: "margin: 0; font-size: 12px; color: #666;",
                "Y-axis: {AADT_UNIT_DESCRIPTION}"
            }
        }
    }
}
