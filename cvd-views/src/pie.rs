//! Daily Composition Resolver: new cases vs active cases vs new deaths.

use crate::models::{PieFrame, PieView, Placeholder};
use chrono::NaiveDate;
use cvd_utils::dates::format_date;
use cvd_worldometer::Dataset;
use log::debug;

/// Slice labels, in value order.
pub const PIE_LABELS: [&str; 3] = ["New Cases", "Active Cases", "New Deaths"];

/// Resolve the pie chart for `country` on `date`.
///
/// Missing counts are treated as zero. A day whose three counts are all zero
/// is [`PieView::NoSignificantData`]; an unset country or a day without a
/// record is [`PieView::NoData`].
pub fn resolve_pie(dataset: &Dataset, country: Option<&str>, date: NaiveDate) -> PieView {
    let Some(country) = country else {
        return PieView::NoData(Placeholder::no_data(None));
    };
    let Some(record) = dataset.record_on(country, date) else {
        debug!("pie: no record for {} on {}", country, date);
        return PieView::NoData(Placeholder::no_data(Some(country)));
    };

    let values = vec![
        record.daily_new_cases.unwrap_or(0.0),
        record.active_cases.unwrap_or(0.0),
        record.daily_new_deaths.unwrap_or(0.0),
    ];
    if values.iter().all(|v| *v == 0.0) {
        debug!("pie: all-zero composition for {} on {}", country, date);
        return PieView::NoSignificantData(Placeholder::no_significant_data(country));
    }

    PieView::Pie(PieFrame {
        country: country.to_string(),
        date,
        title: format!("New Cases vs Active Cases vs Deaths in {}", country),
        subtitle: format!("(as of {})", format_date(&date)),
        labels: PIE_LABELS.iter().map(|l| l.to_string()).collect(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample;

    fn ymd(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, m, d).unwrap()
    }

    #[test]
    fn test_pie_values_and_labels() {
        let (dataset, _) = sample();
        match resolve_pie(&dataset, Some("China"), ymd(1, 23)) {
            PieView::Pie(frame) => {
                assert_eq!(frame.values, vec![259.0, 778.0, 8.0]);
                assert_eq!(frame.labels, vec!["New Cases", "Active Cases", "New Deaths"]);
                assert_eq!(frame.title, "New Cases vs Active Cases vs Deaths in China");
                assert_eq!(frame.subtitle, "(as of 2020-01-23)");
            }
            other => panic!("expected a pie, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_values_count_as_zero() {
        let (dataset, _) = sample();
        match resolve_pie(&dataset, Some("Japan"), ymd(1, 22)) {
            PieView::Pie(frame) => assert_eq!(frame.values, vec![0.0, 2.0, 0.0]),
            other => panic!("expected a pie, got {:?}", other),
        }
    }

    #[test]
    fn test_all_zero_is_no_significant_data() {
        let (dataset, _) = sample();
        assert_eq!(
            resolve_pie(&dataset, Some("Japan"), ymd(1, 25)),
            PieView::NoSignificantData(Placeholder::no_significant_data("Japan"))
        );
    }

    #[test]
    fn test_no_record_is_no_data() {
        let (dataset, _) = sample();
        assert_eq!(
            resolve_pie(&dataset, Some("Japan"), ymd(1, 27)),
            PieView::NoData(Placeholder::no_data(Some("Japan")))
        );
        assert_eq!(
            resolve_pie(&dataset, Some("Reunion"), ymd(1, 22)),
            PieView::NoData(Placeholder::no_data(Some("Reunion")))
        );
        assert_eq!(
            resolve_pie(&dataset, None, ymd(1, 22)),
            PieView::NoData(Placeholder::no_data(None))
        );
    }
}
