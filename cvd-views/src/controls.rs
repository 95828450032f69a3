//! Option lists and slider settings for the dashboard controls.

use crate::selection::DEFAULT_COUNTRY;
use cvd_utils::dates::format_date;
use cvd_worldometer::{Dataset, DateIndex, Metric};
use serde::Serialize;
use std::collections::BTreeMap;

/// A metric dropdown entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricOption {
    pub value: Metric,
    pub label: String,
}

/// Date slider settings; `marks` maps each position to its date.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SliderSpec {
    pub min: usize,
    pub max: usize,
    pub step: usize,
    pub marks: BTreeMap<usize, String>,
}

/// Everything needed to lay out the dashboard's controls.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Controls {
    pub metrics: Vec<MetricOption>,
    pub default_metric: Metric,
    pub slider: SliderSpec,
    /// "Min: 2020-01-22"
    pub min_date_label: String,
    /// "Max: 2020-01-27"
    pub max_date_label: String,
    /// Sorted country names for the three country dropdowns
    pub countries: Vec<String>,
    pub default_country: String,
}

impl Controls {
    pub fn build(dataset: &Dataset, index: &DateIndex) -> Self {
        let metrics = Metric::ALL
            .into_iter()
            .map(|metric| MetricOption {
                value: metric,
                label: metric.label(),
            })
            .collect();
        let marks = index
            .dates()
            .iter()
            .enumerate()
            .map(|(i, date)| (i, format_date(date)))
            .collect();
        let date_label = |prefix: &str, date: Option<chrono::NaiveDate>| match date {
            Some(date) => format!("{}: {}", prefix, format_date(&date)),
            None => format!("{}: -", prefix),
        };

        Controls {
            metrics,
            default_metric: Metric::default(),
            slider: SliderSpec {
                min: 0,
                max: index.max_position().unwrap_or(0),
                step: 1,
                marks,
            },
            min_date_label: date_label("Min", index.first()),
            max_date_label: date_label("Max", index.last()),
            countries: dataset.countries().map(str::to_string).collect(),
            default_country: DEFAULT_COUNTRY.to_string(),
        }
    }
}
