//! Linear trend fitting and short-horizon forecasting for AADT series.
//!
//! This crate turns a cleaned yearly series into a forecast continuation
//! suitable for charting next to the historical bars.
//!
//! # Usage
//!
//! ```rust
//! use aadt_core::schema::YearRange;
//! use aadt_core::series::SeriesBuilder;
//! use aadt_core::station::StationProperties;
//! use aadt_forecast::forecast::TrendForecaster;
//!
//! let mut props = StationProperties::new();
//! for year in 2002..=2023 {
//!     props.insert(format!("AADT_{year}"), 10_000 + 250 * (year - 2002));
//! }
//! let series = SeriesBuilder::build(&props, YearRange::default());
//! let forecast = TrendForecaster::default().forecast(&series).unwrap();
//! assert_eq!(forecast.len(), 10);
//! assert_eq!(forecast.points()[0].year, 2024);
//! assert_eq!(forecast.points()[0].value, 15_500.0);
//! ```

/// Fixed forecasting policy.
pub mod policy {
    use serde::Serialize;

    /// Fewest valid observations a station needs before a trend is fitted.
    pub const MIN_VALID_OBSERVATIONS: usize = 10;

    /// Number of years forecast past the last valid observation.
    pub const FORECAST_HORIZON: usize = 10;

    /// Forecast values are rounded to the nearest multiple of this.
    pub const ROUNDING_STEP: f64 = 100.0;

    /// Thresholds applied around the trend fit.
    ///
    /// The defaults are the published policy constants; callers may override
    /// them but nothing here derives different values.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct ForecastPolicy {
        pub min_observations: usize,
        pub horizon: usize,
        pub rounding_step: f64,
    }

    impl Default for ForecastPolicy {
        fn default() -> Self {
            ForecastPolicy {
                min_observations: MIN_VALID_OBSERVATIONS,
                horizon: FORECAST_HORIZON,
                rounding_step: ROUNDING_STEP,
            }
        }
    }
}

/// Ordinary least-squares line fitting.
pub mod regression {
    use serde::Serialize;

    /// Running sums for a least-squares line.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LeastSquares {
        x_sum: f64,
        x2_sum: f64,
        y_sum: f64,
        xy_sum: f64,
        n: usize,
    }

    impl LeastSquares {
        pub fn push(&mut self, x: f64, y: f64) {
            self.x_sum += x;
            self.x2_sum += x * x;
            self.y_sum += y;
            self.xy_sum += x * y;
            self.n += 1;
        }

        pub fn len(&self) -> usize {
            self.n
        }

        pub fn is_empty(&self) -> bool {
            self.n == 0
        }

        /// Fit `y = slope * x + intercept`.
        ///
        /// `None` when the denominator is zero, which covers no points and
        /// points that all share one `x`.
        pub fn estimate(&self) -> Option<TrendModel> {
            let n = self.n as f64;
            let denominator = n * self.x2_sum - self.x_sum * self.x_sum;
            if denominator == 0.0 {
                return None;
            }
            let slope = (n * self.xy_sum - self.x_sum * self.y_sum) / denominator;
            let intercept = (self.y_sum - slope * self.x_sum) / n;
            Some(TrendModel { slope, intercept })
        }
    }

    /// A fitted straight line.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct TrendModel {
        pub slope: f64,
        pub intercept: f64,
    }

    impl TrendModel {
        /// Fit a line through `(x, y)` points.
        pub fn fit(points: &[(f64, f64)]) -> Option<TrendModel> {
            let mut sums = LeastSquares::default();
            for &(x, y) in points {
                sums.push(x, y);
            }
            sums.estimate()
        }

        pub fn predict(&self, x: f64) -> f64 {
            self.slope * x + self.intercept
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_fit_exact_line() {
            let points: Vec<(f64, f64)> = (0..10)
                .map(|i| (2000.0 + i as f64, 300.0 + 20.0 * i as f64))
                .collect();
            let model = TrendModel::fit(&points).unwrap();
            assert!((model.slope - 20.0).abs() < 1e-9);
            assert!((model.predict(2010.0) - 500.0).abs() < 1e-6);
        }

        #[test]
        fn test_fit_noisy_line() {
            let points = [(1.0, 1.0), (2.0, 3.0), (3.0, 2.0), (4.0, 4.0)];
            let model = TrendModel::fit(&points).unwrap();
            // sums: x=10, y=10, xy=29, x2=30, n=4 -> slope=(116-100)/(120-100)
            assert!((model.slope - 0.8).abs() < 1e-12);
            assert!((model.intercept - 0.5).abs() < 1e-12);
        }

        #[test]
        fn test_fit_identical_x_is_degenerate() {
            let points = [(2010.0, 5.0); 12];
            assert_eq!(TrendModel::fit(&points), None);
        }

        #[test]
        fn test_fit_no_points_is_degenerate() {
            assert_eq!(TrendModel::fit(&[]), None);
            assert!(LeastSquares::default().is_empty());
        }
    }
}

/// Forecast extrapolation over a yearly series.
pub mod forecast {
    use crate::policy::ForecastPolicy;
    use crate::regression::{LeastSquares, TrendModel};
    use aadt_core::series::ObservationSeries;
    use aadt_utils::numbers::round_non_negative;
    use log::debug;
    use serde::Serialize;

    /// One forecast year.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct ForecastPoint {
        pub year: i32,
        /// Non-negative, a multiple of the policy's rounding step.
        pub value: f64,
    }

    /// Forecast years following the last valid observation, ascending and
    /// contiguous.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct ForecastSeries {
        model: TrendModel,
        points: Vec<ForecastPoint>,
    }

    impl ForecastSeries {
        pub fn points(&self) -> &[ForecastPoint] {
            &self.points
        }

        /// The fitted line the points were extrapolated from.
        pub fn model(&self) -> TrendModel {
            self.model
        }

        pub fn len(&self) -> usize {
            self.points.len()
        }

        pub fn is_empty(&self) -> bool {
            self.points.is_empty()
        }

        pub fn years(&self) -> Vec<i32> {
            self.points.iter().map(|p| p.year).collect()
        }

        pub fn values(&self) -> Vec<f64> {
            self.points.iter().map(|p| p.value).collect()
        }
    }

    /// Fits a linear trend over the valid years of a series and extends it.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct TrendForecaster {
        policy: ForecastPolicy,
    }

    impl TrendForecaster {
        pub fn new(policy: ForecastPolicy) -> Self {
            TrendForecaster { policy }
        }

        pub fn policy(&self) -> &ForecastPolicy {
            &self.policy
        }

        /// Forecast `policy.horizon` years.
        pub fn forecast(&self, series: &ObservationSeries) -> Option<ForecastSeries> {
            self.forecast_with_horizon(series, self.policy.horizon)
        }

        /// Forecast `horizon` years past the last valid observation.
        ///
        /// Returns `None` when fewer than `policy.min_observations` years are
        /// valid, the fit is degenerate, or the last forecast year would not fit
        /// in an `i32`. Historical data is never touched.
        pub fn forecast_with_horizon(
            &self,
            series: &ObservationSeries,
            horizon: usize,
        ) -> Option<ForecastSeries> {
            let valid = series.valid_subset();
            if valid.len() < self.policy.min_observations {
                debug!(
                    "Forecast suppressed: {} valid observations, {} required",
                    valid.len(),
                    self.policy.min_observations
                );
                return None;
            }

            let mut sums = LeastSquares::default();
            for record in &valid {
                sums.push(record.year as f64, record.value);
            }
            let model = match sums.estimate() {
                Some(model) => model,
                None => {
                    debug!("Forecast suppressed: degenerate trend fit");
                    return None;
                }
            };

            let last_year = valid.last()?.year;
            let steps = match i32::try_from(horizon)
                .ok()
                .filter(|steps| last_year.checked_add(*steps).is_some())
            {
                Some(steps) => steps,
                None => {
                    debug!("Forecast suppressed: horizon {} overflows the year", horizon);
                    return None;
                }
            };
            let points = (1..=steps)
                .map(|i| {
                    let year = last_year + i;
                    let value = round_non_negative(
                        model.predict(year as f64),
                        self.policy.rounding_step,
                    );
                    ForecastPoint { year, value }
                })
                .collect();

            Some(ForecastSeries { model, points })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use aadt_core::schema::YearRange;
        use aadt_core::series::{SeriesBuilder, YearlyRecord};
        use aadt_core::station::StationProperties;

        fn series_from(values: &[(i32, f64)]) -> ObservationSeries {
            let mut props = StationProperties::new();
            for &(year, value) in values {
                props.insert(format!("AADT_{year}"), value);
            }
            SeriesBuilder::build(&props, YearRange::default())
        }

        fn assert_well_formed(forecast: &ForecastSeries, first_year: i32, horizon: usize) {
            assert_eq!(forecast.len(), horizon);
            for (i, point) in forecast.points().iter().enumerate() {
                assert_eq!(point.year, first_year + i as i32);
                assert!(point.value >= 0.0);
                assert_eq!(point.value % 100.0, 0.0);
            }
        }

        #[test]
        fn test_slow_linear_series_rounds_flat() {
            let values: Vec<(i32, f64)> = (2002..=2023)
                .map(|y| (y, 1000.0 + (y - 2002) as f64))
                .collect();
            let forecast = TrendForecaster::default()
                .forecast(&series_from(&values))
                .unwrap();
            assert_well_formed(&forecast, 2024, 10);
            assert!((forecast.model().slope - 1.0).abs() < 1e-6);
            // 1022..1031 all round to the same hundred
            assert!(forecast.values().iter().all(|v| *v == 1000.0));
            assert!(forecast.values().windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn test_steep_linear_series_increases() {
            let values: Vec<(i32, f64)> = (2002..=2023)
                .map(|y| (y, 5000.0 + 500.0 * (y - 2002) as f64))
                .collect();
            let forecast = TrendForecaster::default()
                .forecast(&series_from(&values))
                .unwrap();
            assert_well_formed(&forecast, 2024, 10);
            assert_eq!(forecast.points()[0].value, 16000.0);
            assert_eq!(forecast.points()[9].value, 20500.0);
            assert!(forecast.values().windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn test_too_few_valid_years_suppresses_forecast() {
            let values: Vec<(i32, f64)> = (2002..=2006).map(|y| (y, 8000.0)).collect();
            let series = series_from(&values);
            assert_eq!(series.len(), 22);
            assert_eq!(TrendForecaster::default().forecast(&series), None);
        }

        #[test]
        fn test_minimum_threshold_is_inclusive() {
            let nine: Vec<(i32, f64)> = (2002..=2010).map(|y| (y, 100.0 * y as f64)).collect();
            assert_eq!(TrendForecaster::default().forecast(&series_from(&nine)), None);

            let ten: Vec<(i32, f64)> = (2002..=2011).map(|y| (y, 100.0 * y as f64)).collect();
            let forecast = TrendForecaster::default()
                .forecast(&series_from(&ten))
                .unwrap();
            // forecast continues from the last valid year, not the range end
            assert_well_formed(&forecast, 2012, 10);
        }

        #[test]
        fn test_gaps_are_excluded_from_fit() {
            let values: Vec<(i32, f64)> = (2002..=2023)
                .filter(|y| y % 2 == 0)
                .map(|y| (y, 2000.0 + 100.0 * (y - 2002) as f64))
                .chain([(2003, 0.0)])
                .collect();
            let series = series_from(&values);
            assert_eq!(series.valid_count(), 11);
            let forecast = TrendForecaster::default().forecast(&series).unwrap();
            assert!((forecast.model().slope - 100.0).abs() < 1e-6);
            assert_well_formed(&forecast, 2023, 10);
            assert_eq!(forecast.points()[0].value, 4100.0);
        }

        #[test]
        fn test_declining_trend_clamps_at_zero() {
            let values: Vec<(i32, f64)> = (2002..=2013)
                .map(|y| (y, 20000.0 - 1500.0 * (y - 2002) as f64))
                .collect();
            let forecast = TrendForecaster::default()
                .forecast(&series_from(&values))
                .unwrap();
            assert_well_formed(&forecast, 2014, 10);
            assert_eq!(forecast.points()[0].value, 2000.0);
            assert_eq!(forecast.points()[1].value, 500.0);
            assert!(forecast.points()[2..].iter().all(|p| p.value == 0.0));
            assert!(forecast.values().iter().all(|v| v.is_sign_positive()));
        }

        #[test]
        fn test_identical_years_are_degenerate() {
            let records = vec![YearlyRecord { year: 2015, value: 4200.0 }; 12];
            let series = ObservationSeries::from_records(records);
            assert_eq!(TrendForecaster::default().forecast(&series), None);
        }

        #[test]
        fn test_custom_policy() {
            let policy = ForecastPolicy {
                min_observations: 3,
                horizon: 4,
                rounding_step: 10.0,
            };
            let values = [(2020, 100.0), (2021, 110.0), (2022, 120.0)];
            let forecast = TrendForecaster::new(policy)
                .forecast(&series_from(&values))
                .unwrap();
            assert_eq!(forecast.years(), vec![2023, 2024, 2025, 2026]);
            assert_eq!(forecast.values(), vec![130.0, 140.0, 150.0, 160.0]);
        }

        #[test]
        fn test_explicit_horizon() {
            let values: Vec<(i32, f64)> = (2002..=2023).map(|y| (y, 3000.0)).collect();
            let forecast = TrendForecaster::default()
                .forecast_with_horizon(&series_from(&values), 3)
                .unwrap();
            assert_eq!(forecast.years(), vec![2024, 2025, 2026]);
            assert_eq!(forecast.values(), vec![3000.0, 3000.0, 3000.0]);
        }

        #[test]
        fn test_unrepresentable_horizon_is_refused() {
            let values: Vec<(i32, f64)> = (2002..=2023).map(|y| (y, 3000.0)).collect();
            let series = series_from(&values);
            let forecaster = TrendForecaster::default();
            assert_eq!(forecaster.forecast_with_horizon(&series, usize::MAX), None);
            assert_eq!(
                forecaster.forecast_with_horizon(&series, i32::MAX as usize),
                None
            );
            let last = (i32::MAX - 2023) as usize;
            assert!(forecaster.forecast_with_horizon(&series, last + 1).is_none());
        }
    }
}
