use crate::schema::{field_name, YearRange};
use crate::station::StationProperties;
use aadt_utils::numbers::coerce_number;
use serde::Serialize;

/// Value substituted for missing or non-numeric counts.
pub const MISSING_SENTINEL: f64 = 0.0;

/// One year of a station's count history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyRecord {
    pub year: i32,
    /// Annual average daily traffic, or `MISSING_SENTINEL`.
    pub value: f64,
}

impl YearlyRecord {
    /// Only strictly positive counts are real measurements.
    pub fn is_valid(&self) -> bool {
        self.value > 0.0
    }
}

/// A full yearly series: one record per year of the range, ascending, no gaps.
///
/// Invalid years stay in the series with the sentinel value so charts keep a
/// bar slot for every year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationSeries {
    records: Vec<YearlyRecord>,
}

impl ObservationSeries {
    /// Build a series from hand-assembled records, sorted by year.
    pub fn from_records(mut records: Vec<YearlyRecord>) -> Self {
        records.sort_by_key(|r| r.year);
        ObservationSeries { records }
    }

    pub fn records(&self) -> &[YearlyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.value).collect()
    }

    /// Records with a strictly positive value, in year order.
    pub fn valid_subset(&self) -> Vec<YearlyRecord> {
        self.records.iter().copied().filter(YearlyRecord::is_valid).collect()
    }

    pub fn valid_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_valid()).count()
    }

    /// Year of the last valid record, if any.
    pub fn last_valid_year(&self) -> Option<i32> {
        self.records.iter().rev().find(|r| r.is_valid()).map(|r| r.year)
    }
}

/// Extracts a fixed-range yearly series from a station's attribute bag.
pub struct SeriesBuilder;

impl SeriesBuilder {
    /// Read `AADT_{year}` for every year in `years`.
    ///
    /// Fields that are missing or not numeric become `MISSING_SENTINEL`;
    /// no year is ever dropped.
    pub fn build(attributes: &StationProperties, years: YearRange) -> ObservationSeries {
        let records = years
            .years()
            .map(|year| {
                let value = attributes
                    .get(&field_name(year))
                    .and_then(coerce_number)
                    .unwrap_or(MISSING_SENTINEL);
                YearlyRecord { year, value }
            })
            .collect();
        ObservationSeries { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(pairs: &[(&str, serde_json::Value)]) -> StationProperties {
        let mut props = StationProperties::new();
        for (k, v) in pairs {
            props.insert(*k, v.clone());
        }
        props
    }

    #[test]
    fn test_build_covers_every_year() {
        let series = SeriesBuilder::build(&StationProperties::new(), YearRange::default());
        assert_eq!(series.len(), 22);
        assert_eq!(series.years(), (2002..=2023).collect::<Vec<_>>());
        assert!(series.values().iter().all(|v| *v == 0.0));
        assert_eq!(series.valid_count(), 0);
        assert_eq!(series.last_valid_year(), None);
    }

    #[test]
    fn test_build_coerces_and_substitutes() {
        let attributes = props(&[
            ("AADT_2002", json!(12000)),
            ("AADT_2003", json!("12500")),
            ("AADT_2004", json!("")),
            ("AADT_2005", json!(null)),
            ("AADT_2006", json!("no count")),
            ("AADT_2007", json!(13100.0)),
            ("ROUTE", json!("US-25")),
        ]);
        let range = YearRange::new(2002, 2008).unwrap();
        let series = SeriesBuilder::build(&attributes, range);
        assert_eq!(
            series.values(),
            vec![12000.0, 12500.0, 0.0, 0.0, 0.0, 13100.0, 0.0]
        );
        assert_eq!(series.valid_count(), 3);
        assert_eq!(series.last_valid_year(), Some(2007));
    }

    #[test]
    fn test_valid_subset_preserves_order_and_skips_non_positive() {
        let attributes = props(&[
            ("AADT_2010", json!(500)),
            ("AADT_2011", json!(-3)),
            ("AADT_2012", json!(0)),
            ("AADT_2013", json!(700)),
        ]);
        let range = YearRange::new(2010, 2013).unwrap();
        let series = SeriesBuilder::build(&attributes, range);
        // negatives stay in the full series but are not regression input
        assert_eq!(series.values(), vec![500.0, -3.0, 0.0, 700.0]);
        let valid: Vec<i32> = series.valid_subset().iter().map(|r| r.year).collect();
        assert_eq!(valid, vec![2010, 2013]);
    }

    #[test]
    fn test_from_records_sorts_by_year() {
        let series = ObservationSeries::from_records(vec![
            YearlyRecord { year: 2004, value: 3.0 },
            YearlyRecord { year: 2002, value: 1.0 },
            YearlyRecord { year: 2003, value: 2.0 },
        ]);
        assert_eq!(series.years(), vec![2002, 2003, 2004]);
    }
}
