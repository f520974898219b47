//! Test helpers for writing stop lists and building stub planners.

use camino::{Utf8Path, Utf8PathBuf};
use freight_core::{Geocoder, LookupError, RouteDistanceProvider, RoutePlanner};
use freight_core::test_support::{StubGeocoder, StubRouter};
use tempfile::TempDir;

use crate::plan::{BoxedPlanner, PlanConfig, PlannerBuilder};

/// Two stops: a located pickup and a dropoff known only by city.
pub(super) const SAMPLE_STOPS: &str = r#"[
  {"sequence": 1, "stop_type": "pickup", "location_name": "Mill", "city": "Pittsburgh", "state": "PA", "lat": 40.0, "lng": -80.0},
  {"sequence": 2, "stop_type": "dropoff", "city": "Wooster", "state": "OH", "zip": "44691"}
]"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).unwrap_or_else(|err| panic!("failed to write {path}: {err}"));
}

/// Temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn stops_path(&self) -> Utf8PathBuf {
        self.root.join("stops.json")
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace").field("root", &self.root).finish()
    }
}

/// Routing behaviour of a [`StubPlannerBuilder`].
#[derive(Debug, Clone, Copy)]
pub(super) enum StubRouting {
    /// Every route is 160 934 metres long.
    Answering,
    /// Every route request fails as unreachable.
    Unreachable,
}

/// Builds planners over deterministic stubs. Wooster, OH geocodes to
/// (41, -81); every other query has no match.
#[derive(Debug)]
pub(super) struct StubPlannerBuilder {
    pub(super) routing: StubRouting,
}

impl PlannerBuilder for StubPlannerBuilder {
    fn build(&self, _config: &PlanConfig) -> BoxedPlanner {
        let geocoder: Box<dyn Geocoder> =
            Box::new(StubGeocoder::new().with_match("Wooster, OH", 41.0, -81.0));
        let router: Box<dyn RouteDistanceProvider> = match self.routing {
            StubRouting::Answering => Box::new(StubRouter::with_meters(160_934.0)),
            StubRouting::Unreachable => Box::new(StubRouter::with_error(LookupError::Unavailable {
                url: "http://127.0.0.1:9/route/v1/driving".to_string(),
                message: "connection refused".to_string(),
            })),
        };
        RoutePlanner::new(geocoder, router)
    }
}
