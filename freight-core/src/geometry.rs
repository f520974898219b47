//! Project an ordered stop list into a route path.
//!
//! The path is a snapshot of the stops at the time it was built. When stops
//! change the path is rebuilt from scratch.

use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stop::{Stop, located_waypoints};

const LINE_STRING: &str = "LineString";

/// Ordered polyline through the located stops of an order.
///
/// Serialises as a GeoJSON `LineString` with `[longitude, latitude]` pairs.
///
/// # Examples
/// ```
/// use freight_core::{Stop, StopKind, to_path};
///
/// let stops = vec![
///     Stop::new(1, StopKind::Pickup).with_location(40.0, -80.0),
///     Stop::new(2, StopKind::Dropoff).with_location(41.0, -81.0),
/// ];
/// let path = to_path(&stops).expect("two located stops");
/// assert_eq!(path.coordinates(), vec![[-80.0, 40.0], [-81.0, 41.0]]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GeoJsonLineString", try_from = "GeoJsonLineString")]
pub struct RouteGeometry {
    line: LineString<f64>,
}

impl RouteGeometry {
    /// Build a geometry from waypoints in traversal order.
    pub fn new(waypoints: Vec<Coord<f64>>) -> Self {
        Self {
            line: LineString::new(waypoints),
        }
    }

    /// Borrow the underlying line string.
    pub fn line_string(&self) -> &LineString<f64> {
        &self.line
    }

    /// Number of points on the path.
    pub fn len(&self) -> usize {
        self.line.0.len()
    }

    /// Whether the path has no points.
    pub fn is_empty(&self) -> bool {
        self.line.0.is_empty()
    }

    /// Points as `[longitude, latitude]` pairs.
    pub fn coordinates(&self) -> Vec<[f64; 2]> {
        self.line.coords().map(|coord| [coord.x, coord.y]).collect()
    }
}

/// Build the route path for `stops`.
///
/// Stops are ordered by `sequence` and those without coordinates are skipped,
/// so the path may have fewer points than there are stops. Returns `None`
/// when no stop is located; a single located stop yields a one-point path.
pub fn to_path(stops: &[Stop]) -> Option<RouteGeometry> {
    let waypoints = located_waypoints(stops);
    if waypoints.is_empty() {
        return None;
    }
    Some(RouteGeometry::new(waypoints))
}

/// GeoJSON wire shape of a [`RouteGeometry`].
#[derive(Debug, Serialize, Deserialize)]
struct GeoJsonLineString {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<[f64; 2]>,
}

/// Error decoding a GeoJSON geometry that is not a `LineString`.
#[derive(Debug, Error)]
#[error("expected GeoJSON type LineString, found {found}")]
pub struct GeometryTypeError {
    found: String,
}

impl From<RouteGeometry> for GeoJsonLineString {
    fn from(geometry: RouteGeometry) -> Self {
        Self {
            kind: LINE_STRING.to_owned(),
            coordinates: geometry.coordinates(),
        }
    }
}

impl TryFrom<GeoJsonLineString> for RouteGeometry {
    type Error = GeometryTypeError;

    fn try_from(value: GeoJsonLineString) -> Result<Self, Self::Error> {
        if value.kind != LINE_STRING {
            return Err(GeometryTypeError { found: value.kind });
        }
        Ok(Self::new(
            value
                .coordinates
                .into_iter()
                .map(|[x, y]| Coord { x, y })
                .collect(),
        ))
    }
}
