//! CVD CLI - serve the COVID-19 dashboard views or summarize the source data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cvd-cli",
    version,
    about = "COVID-19 per-million dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cvd_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    cvd_cmd::run(cli.command).await
}
