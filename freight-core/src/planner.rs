//! Plan the route geometry and distance for an order's stops.
//!
//! [`RoutePlanner`] is the entry point used by order management on create
//! and on stop-list replacement. It never fails: lookups that go wrong leave
//! stops unlocated or switch the distance to the great-circle estimate.

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::{
    DistanceMethod, Geocoder, LookupError, RouteDistanceProvider, RouteGeometry, Stop, enrich,
    estimate_distance, to_path,
};

/// Why a plan is being computed.
///
/// Both modes recompute geometry and distance in full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    /// A new order.
    #[default]
    Create,
    /// The stop list of an existing order was replaced.
    Replace,
}

/// Derived route data for an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    /// Stops after geocoding, in input order.
    pub stops: Vec<Stop>,
    /// Path through the located stops, absent when none are located.
    pub route_geometry: Option<RouteGeometry>,
    /// Total miles, absent when fewer than two stops are located.
    pub total_miles: Option<f64>,
    /// How `total_miles` was computed.
    pub distance_method: Option<DistanceMethod>,
    /// Sequences of stops the geocoder could not resolve.
    #[serde(skip)]
    pub unresolved: Vec<i64>,
}

/// Geocodes stops, then builds the path and the distance estimate.
///
/// # Examples
/// ```
/// use freight_core::{PlanMode, RoutePlanner, Stop, StopKind};
/// use freight_core::test_support::{StubGeocoder, StubRouter};
///
/// let planner = RoutePlanner::new(
///     StubGeocoder::new().with_match("Erie, PA", 42.13, -80.09),
///     StubRouter::with_meters(160_934.0),
/// );
/// let stops = vec![
///     Stop::new(1, StopKind::Pickup).with_location(40.44, -79.99),
///     Stop::new(2, StopKind::Dropoff).with_city("Erie").with_state("PA"),
/// ];
///
/// let plan = planner.plan(&stops, PlanMode::Create);
/// assert_eq!(plan.route_geometry.map(|path| path.len()), Some(2));
/// assert_eq!(plan.total_miles, Some(100.0));
/// ```
#[derive(Debug, Clone)]
pub struct RoutePlanner<G, R> {
    geocoder: G,
    router: R,
}

impl<G, R> RoutePlanner<G, R>
where
    G: Geocoder,
    R: RouteDistanceProvider,
{
    /// Create a planner from a geocoder and a routing provider.
    pub fn new(geocoder: G, router: R) -> Self {
        Self { geocoder, router }
    }

    /// Compute the plan for `stops`.
    ///
    /// The input is not modified; the returned plan carries an enriched copy.
    pub fn plan(&self, stops: &[Stop], mode: PlanMode) -> RoutePlan {
        log::debug!("planning route for {} stops ({mode:?})", stops.len());
        let enrichment = enrich(stops, &self.geocoder);
        let unresolved = enrichment.unresolved();
        let route_geometry = to_path(&enrichment.stops);
        let estimate = estimate_distance(&enrichment.stops, &self.router);

        RoutePlan {
            route_geometry,
            total_miles: estimate.as_ref().map(|estimate| estimate.miles()),
            distance_method: estimate.as_ref().map(|estimate| estimate.method()),
            unresolved,
            stops: enrichment.stops,
        }
    }

    /// Borrow the geocoder.
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Borrow the routing provider.
    pub fn router(&self) -> &R {
        &self.router
    }
}

/// Lookup that always reports the service as unavailable.
///
/// Stands in for a geocoder or routing provider whose client could not be
/// built, so planning still yields un-enriched stops and a great-circle
/// distance.
#[derive(Debug, Default, Clone, Copy)]
pub struct Offline;

impl Offline {
    fn unavailable() -> LookupError {
        LookupError::Unavailable {
            url: "offline".to_owned(),
            message: "no client available".to_owned(),
        }
    }
}

impl Geocoder for Offline {
    fn lookup(&self, _query: &str) -> Result<Coord<f64>, LookupError> {
        Err(Self::unavailable())
    }
}

impl RouteDistanceProvider for Offline {
    fn route_distance_meters(&self, _waypoints: &[Coord<f64>]) -> Result<f64, LookupError> {
        Err(Self::unavailable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StopKind;
    use crate::test_support::{StubGeocoder, StubRouter};
    use rstest::{fixture, rstest};

    #[fixture]
    fn stops() -> Vec<Stop> {
        vec![
            Stop::new(1, StopKind::Pickup).with_location(40.0, -80.0),
            Stop::new(2, StopKind::Stop).with_city("Nowhere").with_state("ZZ"),
            Stop::new(3, StopKind::Dropoff).with_city("Akron").with_state("OH"),
        ]
    }

    #[rstest]
    #[case(PlanMode::Create)]
    #[case(PlanMode::Replace)]
    fn offline_planner_keeps_stops_unlocated(stops: Vec<Stop>, #[case] mode: PlanMode) {
        let planner = RoutePlanner::new(Offline, Offline);

        let plan = planner.plan(&stops, mode);

        assert_eq!(plan.stops, stops);
        assert_eq!(plan.route_geometry.map(|path| path.len()), Some(1));
        assert_eq!(plan.total_miles, None);
        assert_eq!(plan.distance_method, None);
        assert_eq!(plan.unresolved, vec![2, 3]);
    }

    #[rstest]
    fn geocoded_stops_join_path_and_distance(stops: Vec<Stop>) {
        let planner = RoutePlanner::new(
            StubGeocoder::new().with_match("Akron, OH", 41.0, -81.0),
            StubRouter::with_error(LookupError::ServiceStatus {
                code: "NoRoute".into(),
                message: String::new(),
            }),
        );

        let plan = planner.plan(&stops, PlanMode::Create);

        let path = plan.route_geometry.expect("path");
        assert_eq!(path.coordinates(), vec![[-80.0, 40.0], [-81.0, 41.0]]);
        assert_eq!(plan.distance_method, Some(DistanceMethod::GreatCircle));
        let miles = plan.total_miles.expect("miles");
        assert!((miles - 86.9).abs() < 1.0, "got {miles}");
        assert_eq!(plan.unresolved, vec![2]);
    }

    #[rstest]
    fn routed_distance_is_preferred(stops: Vec<Stop>) {
        let planner = RoutePlanner::new(
            StubGeocoder::new().with_match("Akron, OH", 41.0, -81.0),
            StubRouter::with_meters(160_934.0),
        );

        let plan = planner.plan(&stops, PlanMode::Replace);

        assert_eq!(plan.total_miles, Some(100.0));
        assert_eq!(plan.distance_method, Some(DistanceMethod::Routed));
    }

    #[rstest]
    fn lookups_stay_reachable_through_the_planner(stops: Vec<Stop>) {
        let planner = RoutePlanner::new(
            StubGeocoder::new().with_match("Akron, OH", 41.0, -81.0),
            StubRouter::with_meters(160_934.0),
        );

        let plan = planner.plan(&stops, PlanMode::Create);

        assert_eq!(plan.unresolved, vec![2]);
        assert!(
            planner
                .geocoder()
                .queries()
                .contains(&String::from("Akron, OH"))
        );
        assert_eq!(
            planner.router().requests(),
            vec![vec![Coord { x: -80.0, y: 40.0 }, Coord { x: -81.0, y: 41.0 }]]
        );
    }

    #[rstest]
    fn plan_serialises_geometry_and_miles(stops: Vec<Stop>) {
        let planner = RoutePlanner::new(Offline, StubRouter::with_meters(1609.34));
        let located: Vec<Stop> = stops
            .into_iter()
            .map(|stop| {
                if stop.is_located() {
                    stop
                } else {
                    stop.with_location(40.5, -80.5)
                }
            })
            .collect();

        let plan = planner.plan(&located, PlanMode::Create);
        let value = serde_json::to_value(&plan).expect("plan should serialise");

        assert_eq!(value["route_geometry"]["type"], "LineString");
        assert_eq!(value["total_miles"], 1.0);
        assert_eq!(value["distance_method"], "routed");
        assert!(value.get("unresolved").is_none());
    }
}
