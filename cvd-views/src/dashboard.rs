use crate::map::resolve_map;
use crate::models::{Dashboard, SeriesField};
use crate::pie::resolve_pie;
use crate::selection::Selection;
use crate::series::resolve_series;
use cvd_worldometer::{Dataset, DateIndex, DateIndexError};

/// Resolve all four charts for one selection.
///
/// Line chart 1 plots cumulative cases for `country1`, line chart 2 plots
/// cumulative deaths for `country2`, and the pie uses `pie_country`.
pub fn resolve_dashboard(
    dataset: &Dataset,
    index: &DateIndex,
    selection: &Selection,
) -> Result<Dashboard, DateIndexError> {
    let date = index.date_at(selection.date_index)?;
    Ok(Dashboard {
        selection: selection.clone(),
        map: resolve_map(dataset, index, selection.metric, selection.date_index)?,
        line_chart_1: resolve_series(
            dataset,
            index,
            selection.country1.as_deref(),
            SeriesField::TotalCases,
            selection.date_index,
        )?,
        line_chart_2: resolve_series(
            dataset,
            index,
            selection.country2.as_deref(),
            SeriesField::TotalDeaths,
            selection.date_index,
        )?,
        pie_chart: resolve_pie(dataset, selection.pie_country.as_deref(), date),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample;
    use crate::models::{PieView, SeriesView};
    use crate::selection::{MapClick, UiEvent};
    use cvd_worldometer::Metric;

    #[test]
    fn test_default_dashboard() {
        let (dataset, index) = sample();
        let dashboard = resolve_dashboard(&dataset, &index, &Selection::default()).unwrap();
        assert_eq!(dashboard.map.title, "Cases Per Million on 2020-01-22");
        match &dashboard.line_chart_1 {
            SeriesView::Series(frame) => {
                assert_eq!(frame.title, "Cumulative Total Cases in China");
                assert_eq!(frame.points.len(), 2);
            }
            other => panic!("expected a series, got {:?}", other),
        }
        match &dashboard.line_chart_2 {
            SeriesView::Series(frame) => assert_eq!(frame.title, "Cumulative Total Deaths in China"),
            other => panic!("expected a series, got {:?}", other),
        }
        match &dashboard.pie_chart {
            PieView::Pie(frame) => assert_eq!(frame.values, vec![0.0, 554.0, 0.0]),
            other => panic!("expected a pie, got {:?}", other),
        }
    }

    #[test]
    fn test_dashboard_follows_map_click() {
        let (dataset, index) = sample();
        let mut selection = Selection::default();
        selection.apply(UiEvent::MetricChanged { metric: Metric::DeathsPerMillion }, &index);
        selection.apply(UiEvent::DateChanged { index: 5 }, &index);
        selection.apply(UiEvent::MapClicked { click: Some(MapClick::on("Japan")) }, &index);

        let dashboard = resolve_dashboard(&dataset, &index, &selection).unwrap();
        assert_eq!(dashboard.map.title, "Deaths Per Million on 2020-01-27");
        match &dashboard.line_chart_2 {
            SeriesView::Series(frame) => {
                assert_eq!(frame.country, "Japan");
                assert_eq!(frame.end, chrono::NaiveDate::from_ymd_opt(2020, 1, 25).unwrap());
            }
            other => panic!("expected a series, got {:?}", other),
        }
        assert!(matches!(dashboard.pie_chart, PieView::NoData(_)));
    }

    #[test]
    fn test_unclamped_selection_is_rejected() {
        let (dataset, index) = sample();
        let selection = Selection {
            date_index: 99,
            ..Selection::default()
        };
        assert!(resolve_dashboard(&dataset, &index, &selection).is_err());
    }
}
