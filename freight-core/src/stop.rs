//! Stops on an order's itinerary.
//!
//! A [`Stop`] holds either a full coordinate pair or none at all. The wire
//! form, [`StopRecord`], carries nullable latitude and longitude separately;
//! a record with only one of the two converts to an unlocated stop so that
//! the geocoder can resolve it.
//!
//! Fields the planner does not read, such as arrival windows or record
//! identifiers, ride along unchanged so that a planned stop list serialises
//! back to what was read, apart from its coordinates.

use std::collections::{BTreeMap, HashSet};

use geo::Coord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Role of a stop within an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    /// Freight is collected here.
    Pickup,
    /// Intermediate stop.
    #[default]
    Stop,
    /// Freight is delivered here.
    Dropoff,
}

/// A waypoint on an order, ordered by `sequence`.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use freight_core::{Stop, StopKind};
///
/// let stop = Stop::new(1, StopKind::Pickup)
///     .with_city("Pittsburgh")
///     .with_state("PA")
///     .with_location(40.44, -79.99);
///
/// assert_eq!(stop.latitude(), Some(40.44));
/// assert_eq!(stop.longitude(), Some(-79.99));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StopRecord", into = "StopRecord")]
pub struct Stop {
    /// Traversal position, unique within an order.
    pub sequence: i64,
    /// Role of the stop.
    pub kind: StopKind,
    /// Facility or location name.
    pub name: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// State or province code.
    pub state: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Resolved position, if known.
    pub location: Option<Coord<f64>>,
    /// Earliest scheduled arrival, as given.
    pub scheduled_arrival_early: Option<String>,
    /// Latest scheduled arrival, as given.
    pub scheduled_arrival_late: Option<String>,
    /// Other record fields, passed through untouched.
    pub extra: BTreeMap<String, Value>,
}

impl Stop {
    /// Construct an unlocated stop with no location hints.
    pub fn new(sequence: i64, kind: StopKind) -> Self {
        Self {
            sequence,
            kind,
            name: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            location: None,
            scheduled_arrival_early: None,
            scheduled_arrival_late: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set the arrival window.
    #[must_use]
    pub fn with_arrival_window(
        mut self,
        early: impl Into<String>,
        late: impl Into<String>,
    ) -> Self {
        self.scheduled_arrival_early = Some(early.into());
        self.scheduled_arrival_late = Some(late.into());
        self
    }

    /// Set the facility name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Set the city.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set the state.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the postal code.
    #[must_use]
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    /// Set the position from decimal degrees.
    #[must_use]
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(Coord {
            x: longitude,
            y: latitude,
        });
        self
    }

    /// Latitude in decimal degrees, if located.
    pub fn latitude(&self) -> Option<f64> {
        self.location.map(|coord| coord.y)
    }

    /// Longitude in decimal degrees, if located.
    pub fn longitude(&self) -> Option<f64> {
        self.location.map(|coord| coord.x)
    }

    /// Whether the stop carries a coordinate pair.
    pub fn is_located(&self) -> bool {
        self.location.is_some()
    }
}

/// Serialised form of a [`Stop`] with independently nullable coordinates.
///
/// Field aliases accept the column names used by the order records
/// (`stop_type`, `location_name`, `zip`, `lat`, `lng`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    /// Traversal position.
    pub sequence: i64,
    /// Role of the stop.
    #[serde(default, alias = "stop_type")]
    pub kind: StopKind,
    /// Facility or location name.
    #[serde(default, alias = "location_name")]
    pub name: Option<String>,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// City name.
    #[serde(default)]
    pub city: Option<String>,
    /// State or province code.
    #[serde(default)]
    pub state: Option<String>,
    /// Postal code.
    #[serde(default, alias = "zip")]
    pub postal_code: Option<String>,
    /// Latitude in decimal degrees.
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(default, alias = "lng")]
    pub longitude: Option<f64>,
    /// Earliest scheduled arrival.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_arrival_early: Option<String>,
    /// Latest scheduled arrival.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_arrival_late: Option<String>,
    /// Any other fields of the record.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl From<StopRecord> for Stop {
    fn from(record: StopRecord) -> Self {
        let location = match (record.latitude, record.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coord {
                x: longitude,
                y: latitude,
            }),
            (None, None) => None,
            _ => {
                log::debug!(
                    "stop {} has only one coordinate; treating it as unlocated",
                    record.sequence
                );
                None
            }
        };
        Self {
            sequence: record.sequence,
            kind: record.kind,
            name: record.name,
            address: record.address,
            city: record.city,
            state: record.state,
            postal_code: record.postal_code,
            location,
            scheduled_arrival_early: record.scheduled_arrival_early,
            scheduled_arrival_late: record.scheduled_arrival_late,
            extra: record.extra,
        }
    }
}

impl From<Stop> for StopRecord {
    fn from(stop: Stop) -> Self {
        Self {
            sequence: stop.sequence,
            kind: stop.kind,
            latitude: stop.latitude(),
            longitude: stop.longitude(),
            name: stop.name,
            address: stop.address,
            city: stop.city,
            state: stop.state,
            postal_code: stop.postal_code,
            scheduled_arrival_early: stop.scheduled_arrival_early,
            scheduled_arrival_late: stop.scheduled_arrival_late,
            extra: stop.extra,
        }
    }
}

/// Borrow `stops` in ascending `sequence` order.
///
/// The sort is stable, so stops sharing a sequence keep their input order.
pub fn sorted_by_sequence(stops: &[Stop]) -> Vec<&Stop> {
    let mut sorted: Vec<&Stop> = stops.iter().collect();
    sorted.sort_by_key(|stop| stop.sequence);
    sorted
}

/// Positions of the located stops in ascending `sequence` order.
pub fn located_waypoints(stops: &[Stop]) -> Vec<Coord<f64>> {
    sorted_by_sequence(stops)
        .into_iter()
        .filter_map(|stop| stop.location)
        .collect()
}

/// Errors returned by [`validate_stops`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StopListError {
    /// The order has no stops.
    #[error("at least one stop is required")]
    Empty,
    /// Two stops share a sequence number.
    #[error("stop sequence {sequence} appears more than once")]
    DuplicateSequence {
        /// The repeated sequence number.
        sequence: i64,
    },
}

/// Check that a stop list is non-empty and its sequences are unique.
///
/// # Examples
/// ```
/// use freight_core::{Stop, StopKind, StopListError, validate_stops};
///
/// let stops = vec![Stop::new(1, StopKind::Pickup), Stop::new(1, StopKind::Dropoff)];
/// assert_eq!(
///     validate_stops(&stops),
///     Err(StopListError::DuplicateSequence { sequence: 1 })
/// );
/// ```
pub fn validate_stops(stops: &[Stop]) -> Result<(), StopListError> {
    if stops.is_empty() {
        return Err(StopListError::Empty);
    }
    let mut seen = HashSet::with_capacity(stops.len());
    for stop in stops {
        if !seen.insert(stop.sequence) {
            return Err(StopListError::DuplicateSequence {
                sequence: stop.sequence,
            });
        }
    }
    Ok(())
}
