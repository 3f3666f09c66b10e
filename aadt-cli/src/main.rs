//! AADT CLI - Command line tool for traffic count station history and forecasts.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "aadt-cli",
    version,
    about = "Traffic count (AADT) station history and trend forecasts"
)]
struct Cli {
    #[command(subcommand)]
    command: aadt_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    aadt_cmd::run(cli.command).await
}
