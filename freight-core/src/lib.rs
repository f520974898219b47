//! Core domain for freight route planning.
//!
//! Turns an order's ordered stops into a GeoJSON path and a total-mile
//! estimate. Geocoding and road routing sit behind the [`Geocoder`] and
//! [`RouteDistanceProvider`] traits so that the logic here stays free of I/O.
//! Lookup failures never escape: unresolved stops stay unlocated and the
//! distance falls back to great-circle segments.

#![forbid(unsafe_code)]

pub mod distance;
pub mod geocode;
pub mod geometry;
pub mod lookup;
pub mod planner;
pub mod routing;
pub mod stop;

#[doc(hidden)]
pub mod test_support;

pub use distance::{EARTH_RADIUS_MILES, MILES_PER_METER, haversine_miles};
pub use geocode::{Enrichment, FailedQuery, Geocoder, StopOutcome, candidate_queries, enrich};
pub use geometry::{GeometryTypeError, RouteGeometry, to_path};
pub use lookup::{LookupError, LookupErrorKind};
pub use planner::{Offline, PlanMode, RoutePlan, RoutePlanner};
pub use routing::{
    DistanceEstimate, DistanceMethod, RouteDistanceProvider, estimate_distance,
    great_circle_miles, total_miles,
};
pub use stop::{Stop, StopKind, StopListError, StopRecord, validate_stops};
