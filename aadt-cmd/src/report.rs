//! Per-station history, forecast and chart config output.

use aadt_chart::handler::{handle_station_click, RenderInstruction, ViewConfig};
use aadt_core::station::Station;
use log::info;
use std::fmt::Write;
use std::path::Path;

/// Read a station file: CSV when the name ends in `.csv`, GeoJSON otherwise.
pub fn load_stations(path: &str) -> anyhow::Result<Vec<Station>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
    let is_csv = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let stations = if is_csv {
        Station::parse_station_csv(&contents)?
    } else {
        Station::from_feature_collection(&contents)?
    };
    info!("Loaded {} stations from {}", stations.len(), path);
    Ok(stations)
}

fn find_station<'a>(stations: &'a [Station], id: &str) -> anyhow::Result<&'a Station> {
    stations
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| anyhow::anyhow!("No station with id {}", id))
}

/// Plain-text report of one station's history and forecast.
pub fn format_report(station: &Station, render: &RenderInstruction) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Station {}: {}", station.id, render.title);
    let _ = writeln!(
        out,
        "  {} of {} years counted",
        render.series.valid_count(),
        render.series.len()
    );
    for record in render.series.records() {
        if record.is_valid() {
            let _ = writeln!(out, "  {}  {:>8.0}", record.year, record.value);
        } else {
            let _ = writeln!(out, "  {}  {:>8}", record.year, "-");
        }
    }
    match &render.forecast {
        Some(forecast) => {
            let model = forecast.model();
            let _ = writeln!(
                out,
                "  Forecast (trend {:+.1}/year):",
                model.slope
            );
            for point in forecast.points() {
                let _ = writeln!(out, "  {}  {:>8.0}", point.year, point.value);
            }
        }
        None => {
            let _ = writeln!(out, "  No forecast: not enough counted years");
        }
    }
    out
}

/// Print the report for one station, or for every station in the file.
pub fn run_forecast(
    stations_path: &str,
    station_id: Option<&str>,
    config: &ViewConfig,
) -> anyhow::Result<()> {
    let stations = load_stations(stations_path)?;
    let selected: Vec<&Station> = match station_id {
        Some(id) => vec![find_station(&stations, id)?],
        None => stations.iter().collect(),
    };

    for station in selected {
        let render = handle_station_click(&station.properties, config);
        println!("{}", format_report(station, &render));
    }
    Ok(())
}

/// Print the chart configuration for one station as pretty JSON.
pub fn run_chart(stations_path: &str, station_id: &str, config: &ViewConfig) -> anyhow::Result<()> {
    let stations = load_stations(stations_path)?;
    let station = find_station(&stations, station_id)?;
    let render = handle_station_click(&station.properties, config);
    println!(
        "{}",
        serde_json::to_string_pretty(&render.spec.to_chart_config())?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aadt_core::station::StationProperties;

    fn station(values: &[(i32, i64)]) -> Station {
        let mut properties = StationProperties::new();
        properties.insert("ROUTE", "US-64");
        properties.insert("LOCATION", "W OF NC-191");
        for &(year, value) in values {
            properties.insert(format!("AADT_{year}"), value);
        }
        Station {
            id: "7".to_string(),
            properties,
            coordinates: None,
        }
    }

    #[test]
    fn test_report_with_forecast() {
        let values: Vec<(i32, i64)> = (2002..=2023).map(|y| (y, 9000 + 100 * (y as i64 - 2002))).collect();
        let station = station(&values);
        let render = handle_station_click(&station.properties, &ViewConfig::default());
        let report = format_report(&station, &render);

        assert!(report.starts_with("Station 7: AADT for US-64 W OF NC-191\n"));
        assert!(report.contains("22 of 22 years counted"));
        assert!(report.contains("Forecast (trend +100.0/year):"));
        assert!(report.contains("  2033     12100"));
    }

    #[test]
    fn test_report_without_forecast() {
        let station = station(&[(2010, 500), (2011, 520)]);
        let render = handle_station_click(&station.properties, &ViewConfig::default());
        let report = format_report(&station, &render);

        assert!(report.contains("2 of 22 years counted"));
        assert!(report.contains("  2002         -"));
        assert!(report.contains("No forecast"));
    }

    #[test]
    fn test_find_station() {
        let stations = vec![station(&[])];
        assert!(find_station(&stations, "7").is_ok());
        assert!(find_station(&stations, "8").is_err());
    }
}
