//! Route distance estimation with great-circle fallback.

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::LookupError;
use crate::distance::{haversine_miles, meters_to_miles, round_to_hundredths};
use crate::stop::{Stop, located_waypoints};

use super::RouteDistanceProvider;

/// How a distance estimate was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMethod {
    /// Road-network distance from the routing provider.
    Routed,
    /// Sum of Haversine segments between consecutive stops.
    GreatCircle,
}

/// Total route distance in miles, tagged with the method that produced it.
///
/// Exactly one method contributes to an estimate; the two are never blended.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceEstimate {
    /// The routing provider answered.
    Routed {
        /// Miles, rounded to two decimals.
        miles: f64,
    },
    /// The routing provider failed and great-circle segments were summed.
    Fallback {
        /// Miles, rounded to two decimals.
        miles: f64,
        /// Why the routing provider's answer was not used.
        reason: LookupError,
    },
}

impl DistanceEstimate {
    /// Distance in miles.
    pub fn miles(&self) -> f64 {
        match self {
            Self::Routed { miles } | Self::Fallback { miles, .. } => *miles,
        }
    }

    /// Method that produced the distance.
    pub fn method(&self) -> DistanceMethod {
        match self {
            Self::Routed { .. } => DistanceMethod::Routed,
            Self::Fallback { .. } => DistanceMethod::GreatCircle,
        }
    }
}

/// Estimate the total distance through the located stops.
///
/// Stops are ordered by `sequence` and unlocated stops are skipped. Returns
/// `None` when fewer than two stops are located, without consulting the
/// provider. Otherwise the provider's distance is used when it is a finite,
/// non-negative number of metres; any failure falls back to the summed
/// Haversine distance between consecutive stops.
///
/// # Examples
/// ```
/// use freight_core::{DistanceMethod, LookupError, Stop, StopKind, estimate_distance};
/// use freight_core::test_support::StubRouter;
///
/// let stops = vec![
///     Stop::new(1, StopKind::Pickup).with_location(40.0, -80.0),
///     Stop::new(2, StopKind::Dropoff).with_location(41.0, -81.0),
/// ];
///
/// let routed = estimate_distance(&stops, &StubRouter::with_meters(160_934.0)).unwrap();
/// assert_eq!(routed.miles(), 100.0);
///
/// let fallback = estimate_distance(&stops, &StubRouter::with_error(LookupError::NoMatch)).unwrap();
/// assert_eq!(fallback.method(), DistanceMethod::GreatCircle);
/// ```
pub fn estimate_distance<R: RouteDistanceProvider + ?Sized>(
    stops: &[Stop],
    provider: &R,
) -> Option<DistanceEstimate> {
    let waypoints = located_waypoints(stops);
    if waypoints.len() < 2 {
        return None;
    }

    let estimate = match provider
        .route_distance_meters(&waypoints)
        .and_then(checked_meters)
    {
        Ok(meters) => DistanceEstimate::Routed {
            miles: round_to_hundredths(meters_to_miles(meters)),
        },
        Err(reason) => {
            log::warn!("routing lookup failed ({reason}); using great-circle distance");
            DistanceEstimate::Fallback {
                miles: great_circle_miles(&waypoints),
                reason,
            }
        }
    };
    Some(estimate)
}

/// Total distance in miles, or `None` when fewer than two stops are located.
pub fn total_miles<R: RouteDistanceProvider + ?Sized>(stops: &[Stop], provider: &R) -> Option<f64> {
    estimate_distance(stops, provider).map(|estimate| estimate.miles())
}

/// Sum of Haversine segments through `waypoints`, rounded to two decimals.
pub fn great_circle_miles(waypoints: &[Coord<f64>]) -> f64 {
    let total: f64 = waypoints
        .windows(2)
        .map(|pair| match pair {
            [from, to] => haversine_miles(from.y, from.x, to.y, to.x),
            _ => 0.0,
        })
        .sum();
    round_to_hundredths(total)
}

fn checked_meters(meters: f64) -> Result<f64, LookupError> {
    if meters.is_finite() && meters >= 0.0 {
        Ok(meters)
    } else {
        Err(LookupError::Malformed {
            message: format!("route distance {meters} is not a non-negative number"),
        })
    }
}
