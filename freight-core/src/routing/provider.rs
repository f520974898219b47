//! Routing provider trait for road-network distance.

use geo::Coord;

use crate::LookupError;

/// Report the driving distance through ordered waypoints.
///
/// Waypoints use `x = longitude` and `y = latitude` and are visited in the
/// order given. Only the total distance is needed; no path geometry.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use freight_core::{LookupError, RouteDistanceProvider};
///
/// struct FixedDistance(f64);
///
/// impl RouteDistanceProvider for FixedDistance {
///     fn route_distance_meters(&self, waypoints: &[Coord<f64>]) -> Result<f64, LookupError> {
///         if waypoints.len() < 2 {
///             return Err(LookupError::EmptyInput);
///         }
///         Ok(self.0)
///     }
/// }
///
/// let waypoints = [Coord { x: -80.0, y: 40.0 }, Coord { x: -81.0, y: 41.0 }];
/// assert_eq!(FixedDistance(1000.0).route_distance_meters(&waypoints), Ok(1000.0));
/// ```
pub trait RouteDistanceProvider {
    /// Return the total route distance in metres.
    fn route_distance_meters(&self, waypoints: &[Coord<f64>]) -> Result<f64, LookupError>;
}

impl<T: RouteDistanceProvider + ?Sized> RouteDistanceProvider for &T {
    fn route_distance_meters(&self, waypoints: &[Coord<f64>]) -> Result<f64, LookupError> {
        (**self).route_distance_meters(waypoints)
    }
}

impl<T: RouteDistanceProvider + ?Sized> RouteDistanceProvider for Box<T> {
    fn route_distance_meters(&self, waypoints: &[Coord<f64>]) -> Result<f64, LookupError> {
        (**self).route_distance_meters(waypoints)
    }
}
