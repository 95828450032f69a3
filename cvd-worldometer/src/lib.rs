//! Core types and data preparation for the Worldometer COVID-19 dataset.
//!
//! - [`source`] reads the daily-records and population CSVs into raw rows
//! - [`dataset`] joins them, drops the [`denylist`] territories and derives
//!   the per-million metrics
//! - [`date_index`] maps slider positions to dates and back

pub mod dataset;
pub mod date_index;
pub mod denylist;
pub mod error;
pub mod record;
pub mod source;

pub use dataset::{Dataset, PrepareStats};
pub use date_index::DateIndex;
pub use error::{DateIndexError, LoadError};
pub use record::{DailyRecord, DailyRow, Metric, PopulationRow};
