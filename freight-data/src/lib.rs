//! HTTP lookups for freight route planning.
//!
//! Responsibilities:
//! - Implement [`freight_core::Geocoder`] over a Nominatim-style search API.
//! - Implement [`freight_core::RouteDistanceProvider`] over OSRM's Route API.
//! - Assemble a ready-to-use planner from the two.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `freight-core`).
//! - Map every transport and decoding failure onto
//!   [`freight_core::LookupError`]; never panic on service output.

use freight_core::{Geocoder, Offline, RouteDistanceProvider, RoutePlanner};

pub mod geocoding;
mod http;
pub mod routing;

pub use http::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ProviderBuildError};

use geocoding::{HttpGeocoder, HttpGeocoderConfig};
use routing::{HttpRouteDistanceProvider, HttpRoutingConfig};

/// Planner over boxed lookups, as returned by [`http_planner`].
pub type HttpPlanner = RoutePlanner<Box<dyn Geocoder>, Box<dyn RouteDistanceProvider>>;

/// Build a planner that geocodes and routes over HTTP.
///
/// A lookup whose client cannot be built is replaced by [`Offline`] and a
/// warning is logged, so planning still yields un-enriched stops and a
/// great-circle distance.
///
/// # Examples
/// ```no_run
/// use freight_core::{PlanMode, Stop, StopKind};
/// use freight_data::geocoding::HttpGeocoderConfig;
/// use freight_data::http_planner;
/// use freight_data::routing::HttpRoutingConfig;
///
/// let planner = http_planner(HttpGeocoderConfig::default(), HttpRoutingConfig::default());
/// let stops = vec![
///     Stop::new(1, StopKind::Pickup).with_city("Pittsburgh").with_state("PA"),
///     Stop::new(2, StopKind::Dropoff).with_city("Akron").with_state("OH"),
/// ];
/// let plan = planner.plan(&stops, PlanMode::Create);
/// println!("{:?} miles", plan.total_miles);
/// ```
pub fn http_planner(geocoding: HttpGeocoderConfig, routing: HttpRoutingConfig) -> HttpPlanner {
    let geocoder: Box<dyn Geocoder> = match HttpGeocoder::with_config(geocoding) {
        Ok(geocoder) => Box::new(geocoder),
        Err(err) => {
            log::warn!("geocoder unavailable ({err}); stops will not be geocoded");
            Box::new(Offline)
        }
    };
    let router: Box<dyn RouteDistanceProvider> =
        match HttpRouteDistanceProvider::with_config(routing) {
            Ok(router) => Box::new(router),
            Err(err) => {
                log::warn!("routing provider unavailable ({err}); using great-circle distance");
                Box::new(Offline)
            }
        };
    RoutePlanner::new(geocoder, router)
}
