//! Dataset summary report.

use crate::SourceArgs;
use cvd_utils::dates::format_date;
use cvd_worldometer::{Dataset, DateIndex};
use log::info;
use std::io::Write;

/// Load the sources and print a summary to stdout.
pub fn run_summary(sources: &SourceArgs) -> anyhow::Result<()> {
    let (dataset, index) = sources.load()?;
    info!("Summarizing {} records", dataset.len());
    let stdout = std::io::stdout();
    write_summary(&dataset, &index, &mut stdout.lock())
}

/// Write the record count, date range, per-country spans and preparation
/// counters.
pub fn write_summary<W: Write>(dataset: &Dataset, index: &DateIndex, out: &mut W) -> anyhow::Result<()> {
    let stats = dataset.stats();
    writeln!(out, "records: {}", dataset.len())?;
    writeln!(out, "countries: {}", dataset.countries().count())?;
    if let (Some(first), Some(last)) = (index.first(), index.last()) {
        writeln!(
            out,
            "dates: {} ({} to {})",
            index.len(),
            format_date(&first),
            format_date(&last)
        )?;
    }
    writeln!(out, "skipped rows: {}", stats.skipped_rows)?;
    writeln!(out, "excluded territory rows: {}", stats.excluded_rows)?;
    writeln!(out, "duplicate rows: {}", stats.duplicate_rows)?;
    writeln!(out, "records without population: {}", stats.missing_population)?;
    for country in dataset.countries() {
        if let Some((start, end)) = dataset.date_bounds(country) {
            writeln!(
                out,
                "  {}: {} records, {} to {}",
                country,
                dataset.records_for(country).len(),
                format_date(&start),
                format_date(&end)
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvd_worldometer::source::{parse_daily_csv, parse_population_csv};

    #[test]
    fn test_write_summary() {
        let daily = parse_daily_csv(include_str!("../../fixtures/daily_sample.csv").as_bytes(), "daily").unwrap();
        let population = parse_population_csv(
            include_str!("../../fixtures/population_sample.csv").as_bytes(),
            "population",
        )
        .unwrap();
        let dataset = Dataset::prepare(daily.rows, population.rows);
        let index = DateIndex::build(&dataset);

        let mut out = Vec::new();
        write_summary(&dataset, &index, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("records: 15\n"));
        assert!(text.contains("dates: 6 (2020-01-22 to 2020-01-27)\n"));
        assert!(text.contains("excluded territory rows: 2\n"));
        assert!(text.contains("  Japan: 4 records, 2020-01-22 to 2020-01-25\n"));
    }

    #[test]
    fn test_load_from_files() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures");
        let sources = SourceArgs {
            daily_csv: root.join("daily_sample.csv"),
            population_csv: root.join("population_sample.csv"),
        };
        let (dataset, index) = sources.load().unwrap();
        assert_eq!(dataset.len(), 15);
        assert_eq!(dataset.stats().skipped_rows, 2);
        assert_eq!(index.len(), 6);

        let missing = SourceArgs {
            daily_csv: root.join("does_not_exist.csv"),
            population_csv: root.join("population_sample.csv"),
        };
        assert!(missing.load().is_err());
    }
}
