//! Per-session control state and the Selection Synchronizer.
//!
//! A [`Selection`] belongs to exactly one session and is mutated in place by
//! that session's [`UiEvent`]s, in arrival order.

use cvd_worldometer::{DateIndex, Metric};
use log::debug;
use serde::{Deserialize, Serialize};

/// Country preselected in every country dropdown.
pub const DEFAULT_COUNTRY: &str = "China";

/// Current values of the dashboard controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub metric: Metric,
    /// Slider position into the [`DateIndex`]
    pub date_index: usize,
    /// Country for the cumulative cases chart
    pub country1: Option<String>,
    /// Country for the cumulative deaths chart
    pub country2: Option<String>,
    /// Country for the daily composition chart
    pub pie_country: Option<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            metric: Metric::default(),
            date_index: 0,
            country1: Some(DEFAULT_COUNTRY.to_string()),
            country2: Some(DEFAULT_COUNTRY.to_string()),
            pie_country: Some(DEFAULT_COUNTRY.to_string()),
        }
    }
}

/// A point of a map click payload, shaped like Plotly's `clickData.points[i]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClickPoint {
    #[serde(default)]
    pub location: Option<String>,
}

/// A map click payload: `{"points": [{"location": "Japan"}]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapClick {
    #[serde(default)]
    pub points: Vec<ClickPoint>,
}

impl MapClick {
    /// A click on a single country.
    pub fn on(country: &str) -> Self {
        MapClick {
            points: vec![ClickPoint {
                location: Some(country.to_string()),
            }],
        }
    }

    /// The clicked country: the first point's location.
    pub fn location(&self) -> Option<&str> {
        self.points.first().and_then(|p| p.location.as_deref())
    }
}

/// What a map click does to the three country selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Write these values into the selectors.
    Update {
        country1: String,
        country2: String,
        pie_country: String,
    },
    /// Leave all three selectors as they are.
    NoChange,
}

/// Propagate a map click to all three country selectors.
///
/// A clicked country overwrites every selector, discarding any independent
/// choice made before. A click without a country (outside any shape, or an
/// empty payload) is a no-op, not a reset.
pub fn on_map_click(click: Option<&MapClick>) -> SyncOutcome {
    match click.and_then(MapClick::location) {
        Some(country) => SyncOutcome::Update {
            country1: country.to_string(),
            country2: country.to_string(),
            pie_country: country.to_string(),
        },
        None => SyncOutcome::NoChange,
    }
}

/// A control change coming from the UI.
///
/// JSON form: `{"event": "date_changed", "index": 3}`,
/// `{"event": "map_clicked", "click": {"points": [{"location": "Japan"}]}}`.
/// A `null` country unsets that selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    MetricChanged {
        metric: Metric,
    },
    DateChanged {
        index: usize,
    },
    Country1Changed {
        #[serde(default)]
        country: Option<String>,
    },
    Country2Changed {
        #[serde(default)]
        country: Option<String>,
    },
    PieCountryChanged {
        #[serde(default)]
        country: Option<String>,
    },
    MapClicked {
        #[serde(default)]
        click: Option<MapClick>,
    },
}

impl Selection {
    /// Apply one UI event. Date positions are clamped into the slider range.
    ///
    /// Returns `false` when the event left the selection unchanged.
    pub fn apply(&mut self, event: UiEvent, index: &DateIndex) -> bool {
        let before = self.clone();
        match event {
            UiEvent::MetricChanged { metric } => self.metric = metric,
            UiEvent::DateChanged { index: position } => self.date_index = index.clamp(position),
            UiEvent::Country1Changed { country } => self.country1 = country,
            UiEvent::Country2Changed { country } => self.country2 = country,
            UiEvent::PieCountryChanged { country } => self.pie_country = country,
            UiEvent::MapClicked { click } => match on_map_click(click.as_ref()) {
                SyncOutcome::Update {
                    country1,
                    country2,
                    pie_country,
                } => {
                    self.country1 = Some(country1);
                    self.country2 = Some(country2);
                    self.pie_country = Some(pie_country);
                }
                SyncOutcome::NoChange => {}
            },
        }
        let changed = *self != before;
        debug!("selection: changed={} -> {:?}", changed, self);
        changed
    }
}
