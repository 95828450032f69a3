//! Chart-ready views for the COVID-19 dashboard.
//!
//! Each resolver is a pure function of the shared, read-only
//! [`Dataset`](cvd_worldometer::Dataset) / [`DateIndex`](cvd_worldometer::DateIndex)
//! and the current control values. Rendering happens elsewhere; the frames in
//! [`models`] carry every title and label the renderer needs.
//!
//! - [`map`]: the choropleth cross-section for one metric and date
//! - [`selection`]: per-session control state and map-click synchronization
//! - [`series`]: the cumulative line charts for one country
//! - [`pie`]: the daily composition split for one country and date
//! - [`dashboard`]: all four views for one [`selection::Selection`]
//! - [`controls`]: option lists and slider marks for the dashboard controls

pub mod controls;
pub mod dashboard;
pub mod map;
pub mod models;
pub mod pie;
pub mod selection;
pub mod series;

#[cfg(test)]
pub(crate) mod fixtures {
    use cvd_worldometer::source::{parse_daily_csv, parse_population_csv};
    use cvd_worldometer::{Dataset, DateIndex};

    const DAILY_CSV: &str = include_str!("../../fixtures/daily_sample.csv");
    const POPULATION_CSV: &str = include_str!("../../fixtures/population_sample.csv");

    /// The sample dataset: dates 2020-01-22..=2020-01-27, Japan 22..=25,
    /// Italy 26..=27, China on every date.
    pub(crate) fn sample() -> (Dataset, DateIndex) {
        let daily = parse_daily_csv(DAILY_CSV.as_bytes(), "daily").unwrap();
        let population = parse_population_csv(POPULATION_CSV.as_bytes(), "population").unwrap();
        let dataset = Dataset::prepare(daily.rows, population.rows);
        let index = DateIndex::build(&dataset);
        (dataset, index)
    }
}
