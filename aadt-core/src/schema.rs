use aadt_utils::error::RangeError;
use serde::Serialize;

/// Prefix of the per-year count fields carried by each station feature.
pub const AADT_FIELD_PREFIX: &str = "AADT_";

/// First year with published counts on the station layer.
pub const DEFAULT_YEAR_START: i32 = 2002;

/// Last year with published counts on the station layer.
pub const DEFAULT_YEAR_END: i32 = 2023;

/// Property holding the route designation (e.g. "I-26").
pub const ROUTE_FIELD: &str = "ROUTE";

/// Property holding the free-text count location.
pub const LOCATION_FIELD: &str = "LOCATION";

/// Placeholder used when a station carries no route.
pub const UNKNOWN_ROUTE: &str = "UnknownRoute";

/// Placeholder used when a station carries no location.
pub const UNKNOWN_LOCATION: &str = "UnknownLocation";

/// Name of the count field for `year`, e.g. `AADT_2015`.
pub fn field_name(year: i32) -> String {
    format!("{AADT_FIELD_PREFIX}{year}")
}

/// An inclusive range of calendar years, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError { start, end });
        }
        Ok(YearRange { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    /// Number of years in the range. Never zero.
    pub fn len(&self) -> usize {
        (i64::from(self.end) - i64::from(self.start) + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// Years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }
}

impl Default for YearRange {
    fn default() -> Self {
        YearRange {
            start: DEFAULT_YEAR_START,
            end: DEFAULT_YEAR_END,
        }
    }
}
