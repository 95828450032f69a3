//! Command implementations for the CVD CLI.
//!
//! Provides subcommands to serve the dashboard views over HTTP and to
//! summarize the prepared dataset.

use clap::{Args, Subcommand};
use cvd_worldometer::{Dataset, DateIndex};
use std::path::PathBuf;

pub mod serve;
pub mod session;
pub mod summary;

/// Locations of the two source CSVs (plain or `.gz`).
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Daily records CSV (date, country, case and death counts)
    #[arg(
        short = 'd',
        long,
        env = "CVD_DAILY_CSV",
        default_value = "worldometer_coronavirus_daily_data.csv"
    )]
    pub daily_csv: PathBuf,

    /// Population CSV (country, population)
    #[arg(
        short = 'p',
        long,
        env = "CVD_POPULATION_CSV",
        default_value = "worldometer_coronavirus_summary_data.csv"
    )]
    pub population_csv: PathBuf,
}

impl SourceArgs {
    /// Load and prepare the dataset and build its date index.
    ///
    /// Fails on unreadable sources, missing columns, or a dataset without dates.
    pub fn load(&self) -> anyhow::Result<(Dataset, DateIndex)> {
        use anyhow::Context;

        let dataset = Dataset::load(&self.daily_csv, &self.population_csv).with_context(|| {
            format!(
                "Failed to load {} and {}",
                self.daily_csv.display(),
                self.population_csv.display()
            )
        })?;
        let index = DateIndex::build(&dataset);
        if index.is_empty() {
            anyhow::bail!(
                "No dated records left in {} after preparation",
                self.daily_csv.display()
            );
        }
        Ok((dataset, index))
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the dashboard views as JSON over HTTP
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 8050)]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Seconds a dashboard session may sit unused before it is dropped
        #[arg(long, env = "CVD_SESSION_IDLE_SECS", default_value_t = 1800)]
        session_idle_secs: u64,

        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Print countries, date range and preparation counts for the sources
    Summary {
        #[command(flatten)]
        sources: SourceArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve {
            port,
            host,
            session_idle_secs,
            sources,
        } => {
            let idle_timeout = std::time::Duration::from_secs(session_idle_secs);
            serve::run_serve(&host, port, idle_timeout, &sources).await
        }
        Command::Summary { sources } => summary::run_summary(&sources),
    }
}
