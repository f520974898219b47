//! OSRM API response types for the Route service.
//!
//! The Route service finds the fastest route through the supplied coordinates
//! in the given order. Only the total distance of the best route is read.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route found between the coordinates
    /// - `"InvalidQuery"` - Invalid query parameters
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Alternative routes, best first.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// A single route from a [`RouteResponse`].
#[derive(Debug, Deserialize)]
pub struct Route {
    /// Total distance in metres.
    pub distance: Option<f64>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [{"distance": 160934.0, "duration": 5400.0, "legs": []}],
            "waypoints": []
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        assert_eq!(response.routes.len(), 1);
        assert_eq!(response.routes[0].distance, Some(160_934.0));
    }

    #[test]
    fn deserialise_error_response() {
        let json = r#"{
            "code": "NoRoute",
            "message": "Impossible route between points"
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert_eq!(
            response.message,
            Some("Impossible route between points".to_string())
        );
        assert!(response.routes.is_empty());
    }

    #[test]
    fn deserialise_route_without_distance() {
        let json = r#"{"code": "Ok", "routes": [{"duration": 10.0}]}"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(response.routes[0].distance, None);
    }
}
