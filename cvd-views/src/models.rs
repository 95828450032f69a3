//! View model structs for the dashboard charts.
//!
//! All structs derive `Serialize` so they can be handed to the chart renderer
//! as JSON. Dates serialize as `YYYY-MM-DD`.

use chrono::NaiveDate;
use cvd_utils::labels::title_case;
use cvd_worldometer::{DailyRecord, Metric};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::selection::Selection;

/// Plotly color scale used by the choropleth.
pub const COLOR_SCALE: &str = "Viridis";

/// How map locations are matched to shapes.
pub const LOCATION_MODE: &str = "country names";

/// One country's value on the choropleth.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapEntry {
    pub country: String,
    /// Selected metric value; `None` renders as "no data" on the map.
    pub value: Option<f64>,
    /// Carried for the hover tooltip only.
    pub population: Option<f64>,
    /// Population formatted for the tooltip, e.g. `"126,476,461.00"`.
    pub population_label: Option<String>,
}

/// The single-day cross-section for a choropleth map.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapFrame {
    pub metric: Metric,
    pub date: NaiveDate,
    /// e.g. "Deaths Per Million on 2020-01-27"
    pub title: String,
    pub colorbar_title: String,
    pub color_scale: String,
    pub location_mode: String,
    pub entries: Vec<MapEntry>,
}

/// The cumulative field plotted by a country line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesField {
    #[serde(rename = "cases", alias = "cumulative_total_cases")]
    TotalCases,
    #[serde(rename = "deaths", alias = "cumulative_total_deaths")]
    TotalDeaths,
}

impl SeriesField {
    pub fn field_name(&self) -> &'static str {
        match self {
            SeriesField::TotalCases => "cumulative_total_cases",
            SeriesField::TotalDeaths => "cumulative_total_deaths",
        }
    }

    /// e.g. "Cumulative Total Cases"
    pub fn label(&self) -> String {
        title_case(self.field_name())
    }

    pub fn value(&self, record: &DailyRecord) -> Option<f64> {
        match self {
            SeriesField::TotalCases => record.cumulative_total_cases,
            SeriesField::TotalDeaths => record.cumulative_total_deaths,
        }
    }
}

impl fmt::Display for SeriesField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for SeriesField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cases" | "cumulative_total_cases" => Ok(SeriesField::TotalCases),
            "deaths" | "cumulative_total_deaths" => Ok(SeriesField::TotalDeaths),
            other => Err(format!("unknown series field `{}`", other)),
        }
    }
}

/// A (date, value) pair on a line chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// A country's cumulative series over its display window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesFrame {
    pub country: String,
    pub field: SeriesField,
    /// e.g. "Cumulative Total Cases in Japan"
    pub title: String,
    /// e.g. "(from 2020-01-22 to 2020-01-23)"
    pub subtitle: String,
    pub x_title: String,
    pub y_title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub points: Vec<SeriesPoint>,
}

/// An annotated empty chart shown instead of data.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Placeholder {
    pub title: String,
    pub annotation: String,
    pub axes_visible: bool,
}

impl Placeholder {
    /// "No data available for {country}"
    pub fn no_data(country: Option<&str>) -> Self {
        let title = match country {
            Some(country) => format!("No data available for {}", country),
            None => "No data available".to_string(),
        };
        Placeholder {
            title,
            annotation: "No data available".to_string(),
            axes_visible: false,
        }
    }

    /// "No significant data available for {country}"
    pub fn no_significant_data(country: &str) -> Self {
        Placeholder {
            title: format!("No significant data available for {}", country),
            annotation: "No data to display".to_string(),
            axes_visible: false,
        }
    }
}

/// Result of the country series resolver.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeriesView {
    Series(SeriesFrame),
    NoData(Placeholder),
}

/// The three-way split of one country's day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PieFrame {
    pub country: String,
    pub date: NaiveDate,
    /// e.g. "New Cases vs Active Cases vs Deaths in Japan"
    pub title: String,
    /// e.g. "(as of 2020-01-23)"
    pub subtitle: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Result of the daily composition resolver.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PieView {
    Pie(PieFrame),
    NoSignificantData(Placeholder),
    NoData(Placeholder),
}

/// Every chart on the dashboard for one selection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub selection: Selection,
    pub map: MapFrame,
    pub line_chart_1: SeriesView,
    pub line_chart_2: SeriesView,
    pub pie_chart: PieView,
}
