//! HTTP-based `RouteDistanceProvider` using OSRM's Route API.
//!
//! # Example
//!
//! ```no_run
//! use freight_core::RouteDistanceProvider;
//! use freight_data::routing::HttpRouteDistanceProvider;
//! use geo::Coord;
//!
//! let provider = HttpRouteDistanceProvider::new("http://localhost:5000")?;
//! let waypoints = [Coord { x: -80.0, y: 40.0 }, Coord { x: -81.0, y: 41.0 }];
//!
//! let meters = provider.route_distance_meters(&waypoints)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use freight_core::{LookupError, RouteDistanceProvider};
use geo::Coord;

use super::osrm::RouteResponse;
use crate::http::{BlockingClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ProviderBuildError, join_url};

/// Public OSRM demo server used when no base URL is configured.
pub const DEFAULT_ROUTING_URL: &str = "https://router.project-osrm.org";

/// Routing profile used when none is configured.
pub const DEFAULT_PROFILE: &str = "driving";

/// Configuration for [`HttpRouteDistanceProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRoutingConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// OSRM profile segment of the request path.
    pub profile: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpRoutingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ROUTING_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpRoutingConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Road distance provider backed by the OSRM Route API.
///
/// Waypoints are sent in the order given, as `lon,lat` pairs, with
/// `overview=false` since no geometry is needed. The distance of the first
/// route is returned.
///
/// Calls block the caller. From within a `current_thread` Tokio runtime the
/// request runs on a helper thread, so the caller's runtime makes no progress
/// until it completes.
#[derive(Debug)]
pub struct HttpRouteDistanceProvider {
    client: BlockingClient,
    config: HttpRoutingConfig,
}

impl HttpRouteDistanceProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRoutingConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpRoutingConfig) -> Result<Self, ProviderBuildError> {
        let client = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self { client, config })
    }

    /// Active configuration.
    pub fn config(&self) -> &HttpRoutingConfig {
        &self.config
    }

    /// Build the OSRM Route API URL for the given waypoints.
    ///
    /// The URL format is: `{base_url}/route/v1/{profile}/{coordinates}`
    /// where coordinates are semicolon-separated `lon,lat` pairs.
    fn build_route_url(&self, waypoints: &[Coord<f64>]) -> String {
        let coords: String = waypoints
            .iter()
            .map(|point| format!("{},{}", point.x, point.y))
            .collect::<Vec<_>>()
            .join(";");

        join_url(
            &self.config.base_url,
            &format!("route/v1/{}/{}", self.config.profile, coords),
        )
    }

    fn convert_response(response: RouteResponse) -> Result<f64, LookupError> {
        if !response.is_ok() {
            return Err(LookupError::ServiceStatus {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        let route = response.routes.first().ok_or(LookupError::NoMatch)?;
        route.distance.ok_or_else(|| LookupError::Malformed {
            message: "OSRM route missing distance".to_string(),
        })
    }
}

impl RouteDistanceProvider for HttpRouteDistanceProvider {
    fn route_distance_meters(&self, waypoints: &[Coord<f64>]) -> Result<f64, LookupError> {
        if waypoints.len() < 2 {
            return Err(LookupError::EmptyInput);
        }

        let url = self.build_route_url(waypoints);
        log::debug!("requesting route distance via {url}");
        let response: RouteResponse = self.client.get_json(&url, &[("overview", "false")])?;
        Self::convert_response(response)
    }
}
