//! Map View Resolver: the per-country cross-section for one metric and date.

use crate::models::{MapEntry, MapFrame, COLOR_SCALE, LOCATION_MODE};
use cvd_utils::{dates::format_date, labels::format_thousands};
use cvd_worldometer::{Dataset, DateIndex, DateIndexError, Metric};
use log::debug;

/// Build the choropleth frame for `metric` on the date at slider position
/// `date_index`.
///
/// Callers clamp `date_index` into the slider range first; an out-of-range
/// position is reported as [`DateIndexError::OutOfRange`].
pub fn resolve_map(
    dataset: &Dataset,
    index: &DateIndex,
    metric: Metric,
    date_index: usize,
) -> Result<MapFrame, DateIndexError> {
    let date = index.date_at(date_index)?;
    let entries: Vec<MapEntry> = dataset
        .records_on(date)
        .into_iter()
        .map(|record| MapEntry {
            country: record.country.clone(),
            value: metric.value(record),
            population: record.population,
            population_label: record.population.map(format_thousands),
        })
        .collect();
    debug!("map: {} on {} -> {} countries", metric, date, entries.len());

    let label = metric.label();
    Ok(MapFrame {
        metric,
        date,
        title: format!("{} on {}", label, format_date(&date)),
        colorbar_title: label,
        color_scale: COLOR_SCALE.to_string(),
        location_mode: LOCATION_MODE.to_string(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample;

    #[test]
    fn test_map_title_from_metric_and_date() {
        let (dataset, index) = sample();
        let frame = resolve_map(&dataset, &index, Metric::DeathsPerMillion, 5).unwrap();
        assert_eq!(frame.title, "Deaths Per Million on 2020-01-27");
        assert_eq!(frame.colorbar_title, "Deaths Per Million");
        assert_eq!(frame.color_scale, "Viridis");
    }

    #[test]
    fn test_map_selects_single_day() {
        let (dataset, index) = sample();
        let frame = resolve_map(&dataset, &index, Metric::CasesPerMillion, 0).unwrap();
        let countries: Vec<&str> = frame.entries.iter().map(|e| e.country.as_str()).collect();
        assert_eq!(countries, vec!["China", "Japan"]);

        let japan = &frame.entries[1];
        assert_eq!(japan.value, Some(2.0 / 126476461.0 * 1_000_000.0));
        assert_eq!(japan.population, Some(126476461.0));
        assert_eq!(japan.population_label.as_deref(), Some("126,476,461.00"));
    }

    #[test]
    fn test_map_carries_absent_values() {
        let (dataset, index) = sample();
        let frame = resolve_map(&dataset, &index, Metric::NewDeathsPerMillion, 2).unwrap();
        let atlantis = frame.entries.iter().find(|e| e.country == "Atlantis").unwrap();
        assert_eq!(atlantis.value, None);
        assert_eq!(atlantis.population, None);
        assert_eq!(atlantis.population_label, None);
    }

    #[test]
    fn test_map_out_of_range() {
        let (dataset, index) = sample();
        assert_eq!(
            resolve_map(&dataset, &index, Metric::CasesPerMillion, 6),
            Err(DateIndexError::OutOfRange { index: 6, len: 6 })
        );
    }
}
