//! Country Series Resolver for the two cumulative line charts.

use crate::models::{Placeholder, SeriesField, SeriesFrame, SeriesPoint, SeriesView};
use chrono::NaiveDate;
use cvd_utils::dates::format_date;
use cvd_worldometer::{Dataset, DateIndex, DateIndexError};
use log::debug;

/// The inclusive date window a country's line chart shows for slider
/// position `date_index`, or `None` when the country has no records.
///
/// The window starts at the country's first record and ends at the earlier of
/// its last record and the selected date. When the selected date is the
/// country's first record, the end moves one index step forward so the chart
/// is not a single point. The end can precede the start when the selected
/// date falls before the country's first record.
pub fn display_window(
    dataset: &Dataset,
    index: &DateIndex,
    country: &str,
    date_index: usize,
) -> Result<Option<(NaiveDate, NaiveDate)>, DateIndexError> {
    let selected = index.date_at(date_index)?;
    let Some((min_date, max_date)) = dataset.date_bounds(country) else {
        return Ok(None);
    };
    let end = if selected == min_date {
        let extended = index.date_at(index.next_position(date_index))?;
        max_date.min(extended)
    } else {
        max_date.min(selected)
    };
    Ok(Some((min_date, end)))
}

/// Resolve one line chart: `field` for `country` up to the selected date.
///
/// An unset country, a country without records, or an empty window all
/// resolve to [`SeriesView::NoData`].
pub fn resolve_series(
    dataset: &Dataset,
    index: &DateIndex,
    country: Option<&str>,
    field: SeriesField,
    date_index: usize,
) -> Result<SeriesView, DateIndexError> {
    let Some(country) = country else {
        return Ok(SeriesView::NoData(Placeholder::no_data(None)));
    };
    let Some((start, end)) = display_window(dataset, index, country, date_index)? else {
        debug!("series: no records for {}", country);
        return Ok(SeriesView::NoData(Placeholder::no_data(Some(country))));
    };

    let records = dataset.records_between(country, start, end);
    if records.is_empty() {
        debug!("series: empty window {}..={} for {}", start, end, country);
        return Ok(SeriesView::NoData(Placeholder::no_data(Some(country))));
    }

    let points = records
        .iter()
        .map(|record| SeriesPoint {
            date: record.date,
            value: field.value(record),
        })
        .collect::<Vec<_>>();
    debug!("series: {} for {} -> {} points", field, country, points.len());

    let label = field.label();
    Ok(SeriesView::Series(SeriesFrame {
        country: country.to_string(),
        field,
        title: format!("{} in {}", label, country),
        subtitle: format!("(from {} to {})", format_date(&start), format_date(&end)),
        x_title: "Date".to_string(),
        y_title: label,
        start,
        end,
        points,
    }))
}
