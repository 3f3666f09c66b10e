use crate::schema::{LOCATION_FIELD, ROUTE_FIELD, UNKNOWN_LOCATION, UNKNOWN_ROUTE};
use anyhow::{anyhow, bail};
use csv::ReaderBuilder;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Loosely typed attribute bag attached to a station feature.
///
/// Values arrive exactly as the feature service publishes them: counts may be
/// numbers, numeric strings, empty strings or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationProperties(pub BTreeMap<String, Value>);

impl StationProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Route designation, or `UnknownRoute` when absent or blank.
    pub fn route(&self) -> String {
        self.text_field(ROUTE_FIELD)
            .unwrap_or_else(|| UNKNOWN_ROUTE.to_string())
    }

    /// Count location, or `UnknownLocation` when absent or blank.
    pub fn location(&self) -> String {
        self.text_field(LOCATION_FIELD)
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
    }

    /// Read a descriptive field as text.
    ///
    /// Missing, `null`, empty, `false` and zero values count as absent.
    fn text_field(&self, field: &str) -> Option<String> {
        let value = self.0.get(field)?;
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            Value::Array(_) | Value::Object(_) => Some(value.to_string()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for StationProperties {
    fn from(map: Map<String, Value>) -> Self {
        StationProperties(map.into_iter().collect())
    }
}

/// A traffic count station: an identifier, its attributes and its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Feature identifier, falling back to `OBJECTID` or the feature index.
    pub id: String,
    /// Raw attributes, including the per-year `AADT_*` fields.
    pub properties: StationProperties,
    /// (longitude, latitude) for point features.
    pub coordinates: Option<(f64, f64)>,
}

impl Station {
    /// "{route} {location}", with placeholders for missing fields.
    pub fn title(&self) -> String {
        format!(
            "{} {}",
            self.properties.route(),
            self.properties.location()
        )
    }

    /// Parse a GeoJSON FeatureCollection into stations.
    ///
    /// Features without a `properties` object are skipped with a warning.
    pub fn from_feature_collection(json: &str) -> anyhow::Result<Vec<Station>> {
        let root: Value = serde_json::from_str(json)
            .map_err(|e| anyhow!("Failed to parse station GeoJSON: {}", e))?;
        let features = match root.get("features").and_then(Value::as_array) {
            Some(features) => features,
            None => bail!("GeoJSON document has no `features` array"),
        };

        let mut stations = Vec::with_capacity(features.len());
        for (index, feature) in features.iter().enumerate() {
            let properties = match feature.get("properties") {
                Some(Value::Object(map)) => StationProperties::from(map.clone()),
                _ => {
                    warn!("Skipping feature {} without properties", index);
                    continue;
                }
            };
            let id = feature
                .get("id")
                .and_then(id_text)
                .or_else(|| properties.get("OBJECTID").and_then(id_text))
                .unwrap_or_else(|| index.to_string());
            let coordinates = feature.get("geometry").and_then(point_coordinates);
            stations.push(Station {
                id,
                properties,
                coordinates,
            });
        }
        Ok(stations)
    }

    /// Parse a headered CSV export of the station layer.
    ///
    /// Every column becomes a string property. The `OBJECTID` column is used
    /// as the station id when present, otherwise the row index.
    pub fn parse_station_csv(csv_object: &str) -> anyhow::Result<Vec<Station>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        let headers = rdr.headers()?.clone();

        let mut station_list: Vec<Station> = Vec::new();
        for (index, row) in rdr.records().enumerate() {
            let record = row?;
            let mut properties = StationProperties::new();
            for (header, field) in headers.iter().zip(record.iter()) {
                properties.insert(header.trim(), field.to_string());
            }
            let id = properties
                .get("OBJECTID")
                .and_then(id_text)
                .unwrap_or_else(|| index.to_string());
            station_list.push(Station {
                id,
                properties,
                coordinates: None,
            });
        }
        Ok(station_list)
    }
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn point_coordinates(geometry: &Value) -> Option<(f64, f64)> {
    if geometry.get("type")?.as_str()? != "Point" {
        return None;
    }
    let coords = geometry.get("coordinates")?.as_array()?;
    let lon = coords.first()?.as_f64()?;
    let lat = coords.get(1)?.as_f64()?;
    Some((lon, lat))
}
