//! Deterministic lookup doubles for unit and behaviour tests.
//!
//! Both stubs record the requests they receive so tests can assert how many
//! lookups were made and in which order.

use std::cell::RefCell;
use std::collections::HashMap;

use geo::Coord;

use crate::{Geocoder, LookupError, RouteDistanceProvider};

/// Geocoder answering from a fixed table of queries.
///
/// Queries without an entry return [`LookupError::NoMatch`].
#[derive(Debug, Default)]
pub struct StubGeocoder {
    answers: HashMap<String, Result<Coord<f64>, LookupError>>,
    queries: RefCell<Vec<String>>,
}

impl StubGeocoder {
    /// Create a geocoder that matches nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `query` to the given latitude and longitude.
    #[must_use]
    pub fn with_match(mut self, query: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        self.answers.insert(
            query.into(),
            Ok(Coord {
                x: longitude,
                y: latitude,
            }),
        );
        self
    }

    /// Fail `query` with the given error.
    #[must_use]
    pub fn with_error(mut self, query: impl Into<String>, error: LookupError) -> Self {
        self.answers.insert(query.into(), Err(error));
        self
    }

    /// Queries received so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl Geocoder for StubGeocoder {
    fn lookup(&self, query: &str) -> Result<Coord<f64>, LookupError> {
        self.queries.borrow_mut().push(query.to_owned());
        self.answers
            .get(query)
            .cloned()
            .unwrap_or(Err(LookupError::NoMatch))
    }
}

/// Routing provider returning a pre-configured answer.
///
/// Requests with fewer than two waypoints return
/// [`LookupError::EmptyInput`].
#[derive(Debug)]
pub struct StubRouter {
    response: Result<f64, LookupError>,
    requests: RefCell<Vec<Vec<Coord<f64>>>>,
}

impl StubRouter {
    /// Answer every request with `meters`.
    #[must_use]
    pub fn with_meters(meters: f64) -> Self {
        Self {
            response: Ok(meters),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Fail every request with `error`.
    #[must_use]
    pub fn with_error(error: LookupError) -> Self {
        Self {
            response: Err(error),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Waypoint lists received so far, in order.
    pub fn requests(&self) -> Vec<Vec<Coord<f64>>> {
        self.requests.borrow().clone()
    }
}

impl RouteDistanceProvider for StubRouter {
    fn route_distance_meters(&self, waypoints: &[Coord<f64>]) -> Result<f64, LookupError> {
        self.requests.borrow_mut().push(waypoints.to_vec());
        if waypoints.len() < 2 {
            return Err(LookupError::EmptyInput);
        }
        self.response.clone()
    }
}
