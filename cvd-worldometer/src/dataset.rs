//! The prepared, immutable table every view queries.

use crate::denylist::is_excluded;
use crate::error::LoadError;
use crate::record::{DailyRecord, DailyRow, PopulationRow};
use crate::source::{read_daily_csv, read_population_csv};
use chrono::NaiveDate;
use log::{info, warn};
use std::collections::{btree_map::Entry, BTreeMap, HashMap};
use std::path::Path;

/// Counters collected while loading and preparing the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareStats {
    /// Rows dropped by the CSV readers (no usable country or date)
    pub skipped_rows: usize,
    /// Rows removed because their country is on the denylist
    pub excluded_rows: usize,
    /// Repeated (country, date) rows; the first occurrence is kept
    pub duplicate_rows: usize,
    /// Kept records whose population is absent or zero
    pub missing_population: usize,
}

/// Daily records grouped by country, each country's records ordered by date.
///
/// Built once by [`Dataset::prepare`] and never mutated afterwards; share it by
/// reference (or behind an `Arc`) across all resolver calls.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    by_country: BTreeMap<String, Vec<DailyRecord>>,
    len: usize,
    stats: PrepareStats,
}

impl Dataset {
    /// Join daily rows to population, drop denylisted territories and derive
    /// the per-million metrics.
    ///
    /// A country without a population row keeps its records with an absent
    /// population and absent per-million values.
    pub fn prepare(daily: Vec<DailyRow>, population: Vec<PopulationRow>) -> Self {
        let mut stats = PrepareStats::default();

        let mut populations: HashMap<String, Option<f64>> = HashMap::new();
        for row in population {
            if populations.contains_key(&row.country) {
                warn!("prepare: duplicate population row for {}, keeping the first", row.country);
                continue;
            }
            populations.insert(row.country, row.population);
        }

        let mut grouped: BTreeMap<String, BTreeMap<NaiveDate, DailyRecord>> = BTreeMap::new();
        for row in daily {
            if is_excluded(&row.country) {
                stats.excluded_rows += 1;
                continue;
            }
            let population = populations.get(&row.country).copied().flatten();
            let by_date = grouped.entry(row.country.clone()).or_default();
            match by_date.entry(row.date) {
                Entry::Occupied(_) => {
                    stats.duplicate_rows += 1;
                    warn!("prepare: duplicate row for {} on {}, keeping the first", row.country, row.date);
                }
                Entry::Vacant(slot) => {
                    slot.insert(DailyRecord::derive(row, population));
                }
            }
        }

        let by_country: BTreeMap<String, Vec<DailyRecord>> = grouped
            .into_iter()
            .map(|(country, by_date)| (country, by_date.into_values().collect()))
            .collect();
        let len = by_country.values().map(Vec::len).sum();
        stats.missing_population = by_country
            .values()
            .flatten()
            .filter(|r| !matches!(r.population, Some(p) if p != 0.0))
            .count();

        info!(
            "prepare: {} records for {} countries ({} excluded, {} duplicates, {} without population)",
            len,
            by_country.len(),
            stats.excluded_rows,
            stats.duplicate_rows,
            stats.missing_population
        );
        Dataset {
            by_country,
            len,
            stats,
        }
    }

    /// Read both source files and prepare the dataset.
    pub fn load(daily_path: &Path, population_path: &Path) -> Result<Self, LoadError> {
        let daily = read_daily_csv(daily_path)?;
        let population = read_population_csv(population_path)?;
        let skipped = daily.skipped + population.skipped;
        let mut dataset = Dataset::prepare(daily.rows, population.rows);
        dataset.stats.skipped_rows = skipped;
        Ok(dataset)
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn stats(&self) -> PrepareStats {
        self.stats
    }

    /// Country names in sorted order.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.by_country.keys().map(String::as_str)
    }

    /// Every record for `country`, ordered by date. Empty for unknown countries.
    pub fn records_for(&self, country: &str) -> &[DailyRecord] {
        self.by_country
            .get(country)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Records for `country` with `start <= date <= end`.
    pub fn records_between(&self, country: &str, start: NaiveDate, end: NaiveDate) -> &[DailyRecord] {
        let records = self.records_for(country);
        let lo = records.partition_point(|r| r.date < start);
        let hi = records.partition_point(|r| r.date <= end);
        if hi <= lo {
            return &[];
        }
        &records[lo..hi]
    }

    /// The single record for `(country, date)`, if any.
    pub fn record_on(&self, country: &str, date: NaiveDate) -> Option<&DailyRecord> {
        let records = self.records_for(country);
        records
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &records[i])
    }

    /// The cross-section for one date, in country order.
    pub fn records_on(&self, date: NaiveDate) -> Vec<&DailyRecord> {
        self.by_country
            .keys()
            .filter_map(|country| self.record_on(country, date))
            .collect()
    }

    /// First and last recorded dates for `country`.
    pub fn date_bounds(&self, country: &str) -> Option<(NaiveDate, NaiveDate)> {
        let records = self.records_for(country);
        match (records.first(), records.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }

    /// Every record's date, grouped by country (not deduplicated).
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_country.values().flatten().map(|r| r.date)
    }
}
