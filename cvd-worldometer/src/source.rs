//! CSV readers for the two Worldometer source files.
//!
//! # CSV Formats
//!
//! - **Daily records** (has headers): `date,country,cumulative_total_cases,daily_new_cases,active_cases,cumulative_total_deaths,daily_new_deaths`
//! - **Population** (has headers): `country,...,population,...`
//!
//! Columns are located by header name, so extra columns and any column order
//! are accepted. A missing required column is a [`LoadError::MissingColumn`].
//! Paths ending in `.gz` are decompressed while reading.

use crate::error::LoadError;
use crate::record::{DailyRow, PopulationRow};
use csv::{ReaderBuilder, StringRecord};
use cvd_utils::dates::parse_date;
use flate2::read::GzDecoder;
use log::{info, warn};
use std::{fs::File, io::Read, path::Path};

/// Required columns of the daily-records CSV, in the order they are read.
pub const DAILY_COLUMNS: [&str; 7] = [
    "date",
    "country",
    "cumulative_total_cases",
    "daily_new_cases",
    "active_cases",
    "cumulative_total_deaths",
    "daily_new_deaths",
];

/// Required columns of the population CSV.
pub const POPULATION_COLUMNS: [&str; 2] = ["country", "population"];

/// Rows parsed from one source, plus the count of rows that were dropped
/// because their key fields (country, date) were unusable.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRows<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

/// Open a source file, transparently decompressing `.gz` files.
pub fn open_source(path: &Path) -> Result<Box<dyn Read>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Read the daily-records CSV at `path`.
pub fn read_daily_csv(path: &Path) -> Result<ParsedRows<DailyRow>, LoadError> {
    let reader = open_source(path)?;
    parse_daily_csv(reader, &path.display().to_string())
}

/// Read the population CSV at `path`.
pub fn read_population_csv(path: &Path) -> Result<ParsedRows<PopulationRow>, LoadError> {
    let reader = open_source(path)?;
    parse_population_csv(reader, &path.display().to_string())
}

/// Parse daily-record rows from any reader.
///
/// Rows with an empty country or an unparseable date are skipped; empty or
/// non-numeric count cells become `None`.
pub fn parse_daily_csv<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<ParsedRows<DailyRow>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let columns = locate_columns(rdr.headers()?, &DAILY_COLUMNS, source_name)?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let r = result?;
        let country = r.get(columns[1]).unwrap_or("").trim();
        let date = match parse_date(r.get(columns[0]).unwrap_or("")) {
            Ok(d) => d,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if country.is_empty() {
            skipped += 1;
            continue;
        }

        rows.push(DailyRow {
            date,
            country: country.to_string(),
            cumulative_total_cases: parse_number(r.get(columns[2])),
            daily_new_cases: parse_number(r.get(columns[3])),
            active_cases: parse_number(r.get(columns[4])),
            cumulative_total_deaths: parse_number(r.get(columns[5])),
            daily_new_deaths: parse_number(r.get(columns[6])),
        });
    }
    if skipped > 0 {
        warn!("source: {} skipped {} rows without a usable country or date", source_name, skipped);
    }
    info!("source: Loaded {} daily rows from {}", rows.len(), source_name);
    Ok(ParsedRows { rows, skipped })
}

/// Parse population rows from any reader.
pub fn parse_population_csv<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<ParsedRows<PopulationRow>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let columns = locate_columns(rdr.headers()?, &POPULATION_COLUMNS, source_name)?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let r = result?;
        let country = r.get(columns[0]).unwrap_or("").trim();
        if country.is_empty() {
            skipped += 1;
            continue;
        }
        rows.push(PopulationRow {
            country: country.to_string(),
            population: parse_number(r.get(columns[1])),
        });
    }
    if skipped > 0 {
        warn!("source: {} skipped {} rows without a country", source_name, skipped);
    }
    info!("source: Loaded {} population rows from {}", rows.len(), source_name);
    Ok(ParsedRows { rows, skipped })
}

/// Find the position of each required column in the header row.
fn locate_columns(
    headers: &StringRecord,
    required: &[&str],
    source_name: &str,
) -> Result<Vec<usize>, LoadError> {
    required
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|h| h.trim() == *column)
                .ok_or_else(|| LoadError::MissingColumn {
                    source_name: source_name.to_string(),
                    column: column.to_string(),
                })
        })
        .collect()
}

/// Parse a numeric cell. Empty, non-numeric and non-finite cells are absent.
fn parse_number(cell: Option<&str>) -> Option<f64> {
    let s = cell?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
