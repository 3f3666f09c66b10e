//! Command implementations for the AADT CLI.
//!
//! Provides subcommands for downloading the count station layer and for
//! printing per-station history, forecasts and chart configs.

use aadt_chart::handler::ViewConfig;
use aadt_core::schema::{YearRange, DEFAULT_YEAR_END, DEFAULT_YEAR_START};
use aadt_forecast::policy::{
    ForecastPolicy, FORECAST_HORIZON, MIN_VALID_OBSERVATIONS, ROUNDING_STEP,
};
use clap::{Args, Subcommand};

pub mod fetch;
pub mod report;

/// Largest `--horizon` accepted.
pub const MAX_HORIZON: usize = 100;

/// Widest `--year-start`..`--year-end` span accepted, in years.
pub const MAX_YEAR_SPAN: usize = 200;

/// Year range and forecast policy overrides shared by the report commands.
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// First year read from the `AADT_<year>` fields
    #[arg(long, default_value_t = DEFAULT_YEAR_START)]
    pub year_start: i32,

    /// Last year read from the `AADT_<year>` fields
    #[arg(long, default_value_t = DEFAULT_YEAR_END)]
    pub year_end: i32,

    /// Number of years to forecast
    #[arg(long, default_value_t = FORECAST_HORIZON)]
    pub horizon: usize,

    /// Valid (non-zero) years required before a forecast is made
    #[arg(long, default_value_t = MIN_VALID_OBSERVATIONS)]
    pub min_observations: usize,

    /// Forecast values are rounded to a multiple of this
    #[arg(long, default_value_t = ROUNDING_STEP)]
    pub rounding_step: f64,
}

impl ViewArgs {
    pub fn to_view_config(&self) -> anyhow::Result<ViewConfig> {
        let years = YearRange::new(self.year_start, self.year_end)?;
        if years.len() > MAX_YEAR_SPAN {
            anyhow::bail!(
                "--year-start..--year-end spans {} years, at most {} allowed",
                years.len(),
                MAX_YEAR_SPAN
            );
        }
        if self.horizon > MAX_HORIZON {
            anyhow::bail!("--horizon must be at most {}, got {}", MAX_HORIZON, self.horizon);
        }
        if self.rounding_step <= 0.0 {
            anyhow::bail!("--rounding-step must be positive, got {}", self.rounding_step);
        }
        Ok(ViewConfig {
            years,
            policy: ForecastPolicy {
                min_observations: self.min_observations,
                horizon: self.horizon,
                rounding_step: self.rounding_step,
            },
        })
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Download the count station layer as one GeoJSON FeatureCollection
    Fetch {
        /// Output path for the station GeoJSON
        #[arg(short = 'o', long)]
        output: String,

        /// Feature layer URL (without the trailing `/query`)
        #[arg(long, default_value = fetch::DEFAULT_LAYER_URL)]
        url: String,

        /// Features requested per page
        #[arg(long, default_value_t = fetch::DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },

    /// Print the yearly history and forecast for one or all stations
    Forecast {
        /// Station file (GeoJSON, or CSV when the name ends in `.csv`)
        #[arg(short = 's', long)]
        stations: String,

        /// Only report this station id
        #[arg(long)]
        station: Option<String>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Print the chart configuration JSON for one station
    Chart {
        /// Station file (GeoJSON, or CSV when the name ends in `.csv`)
        #[arg(short = 's', long)]
        stations: String,

        /// Station id to chart
        #[arg(long)]
        station: String,

        #[command(flatten)]
        view: ViewArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Fetch {
            output,
            url,
            page_size,
        } => fetch::run_fetch(&output, &url, page_size).await,
        Command::Forecast {
            stations,
            station,
            view,
        } => report::run_forecast(&stations, station.as_deref(), &view.to_view_config()?),
        Command::Chart {
            stations,
            station,
            view,
        } => report::run_chart(&stations, &station, &view.to_view_config()?),
    }
}
