use chrono::NaiveDate;
use cvd_utils::labels::title_case;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One parsed row of the daily-records CSV, before the population join.
///
/// Numeric cells that were empty or unparseable are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub country: String,
    pub cumulative_total_cases: Option<f64>,
    pub daily_new_cases: Option<f64>,
    pub active_cases: Option<f64>,
    pub cumulative_total_deaths: Option<f64>,
    pub daily_new_deaths: Option<f64>,
}

/// One parsed row of the population (summary) CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationRow {
    pub country: String,
    pub population: Option<f64>,
}

/// A prepared (country, date) record: raw counts, the joined population and
/// the five per-million metrics derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub country: String,
    pub date: NaiveDate,
    pub cumulative_total_cases: Option<f64>,
    pub daily_new_cases: Option<f64>,
    pub active_cases: Option<f64>,
    pub cumulative_total_deaths: Option<f64>,
    pub daily_new_deaths: Option<f64>,
    pub population: Option<f64>,
    pub cases_per_million: Option<f64>,
    pub new_cases_per_million: Option<f64>,
    pub active_cases_per_million: Option<f64>,
    pub deaths_per_million: Option<f64>,
    pub new_deaths_per_million: Option<f64>,
}

/// Normalize a raw count to a per-million-population value.
///
/// Absent when either input is absent or the population is zero.
pub fn per_million(raw: Option<f64>, population: Option<f64>) -> Option<f64> {
    match (raw, population) {
        (Some(raw), Some(population)) if population != 0.0 => {
            Some((raw / population) * 1_000_000.0)
        }
        _ => None,
    }
}

impl DailyRecord {
    /// Build a record from a raw row and the country's joined population.
    pub fn derive(row: DailyRow, population: Option<f64>) -> Self {
        DailyRecord {
            cases_per_million: per_million(row.cumulative_total_cases, population),
            new_cases_per_million: per_million(row.daily_new_cases, population),
            active_cases_per_million: per_million(row.active_cases, population),
            deaths_per_million: per_million(row.cumulative_total_deaths, population),
            new_deaths_per_million: per_million(row.daily_new_deaths, population),
            country: row.country,
            date: row.date,
            cumulative_total_cases: row.cumulative_total_cases,
            daily_new_cases: row.daily_new_cases,
            active_cases: row.active_cases,
            cumulative_total_deaths: row.cumulative_total_deaths,
            daily_new_deaths: row.daily_new_deaths,
            population,
        }
    }
}

/// The per-million metrics selectable for the choropleth map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    CasesPerMillion,
    NewCasesPerMillion,
    ActiveCasesPerMillion,
    DeathsPerMillion,
    NewDeathsPerMillion,
}

impl Metric {
    /// All metrics in dropdown order.
    pub const ALL: [Metric; 5] = [
        Metric::CasesPerMillion,
        Metric::NewCasesPerMillion,
        Metric::ActiveCasesPerMillion,
        Metric::DeathsPerMillion,
        Metric::NewDeathsPerMillion,
    ];

    /// Column name of the derived field, e.g. `"deaths_per_million"`.
    pub fn field_name(&self) -> &'static str {
        match self {
            Metric::CasesPerMillion => "cases_per_million",
            Metric::NewCasesPerMillion => "new_cases_per_million",
            Metric::ActiveCasesPerMillion => "active_cases_per_million",
            Metric::DeathsPerMillion => "deaths_per_million",
            Metric::NewDeathsPerMillion => "new_deaths_per_million",
        }
    }

    /// Display label, e.g. `"Deaths Per Million"`.
    pub fn label(&self) -> String {
        title_case(self.field_name())
    }

    /// Read this metric's value from a prepared record.
    pub fn value(&self, record: &DailyRecord) -> Option<f64> {
        match self {
            Metric::CasesPerMillion => record.cases_per_million,
            Metric::NewCasesPerMillion => record.new_cases_per_million,
            Metric::ActiveCasesPerMillion => record.active_cases_per_million,
            Metric::DeathsPerMillion => record.deaths_per_million,
            Metric::NewDeathsPerMillion => record.new_deaths_per_million,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.field_name() == s.trim())
            .ok_or_else(|| format!("unknown metric `{}`", s))
    }
}
