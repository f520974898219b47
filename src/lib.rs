//! Facade crate for the freight route planner.
//!
//! This crate re-exports the core domain types and, behind the `http`
//! feature, the HTTP geocoding and routing lookups.

#![forbid(unsafe_code)]

pub use freight_core::{
    DistanceEstimate, DistanceMethod, Enrichment, Geocoder, LookupError, LookupErrorKind, Offline,
    PlanMode, RouteDistanceProvider, RouteGeometry, RoutePlan, RoutePlanner, Stop, StopKind,
    StopListError, StopOutcome, StopRecord, candidate_queries, enrich, estimate_distance,
    haversine_miles, to_path, total_miles, validate_stops,
};

#[cfg(feature = "http")]
pub use freight_data::{
    HttpPlanner, ProviderBuildError,
    geocoding::{HttpGeocoder, HttpGeocoderConfig},
    http_planner,
    routing::{HttpRouteDistanceProvider, HttpRoutingConfig},
};
