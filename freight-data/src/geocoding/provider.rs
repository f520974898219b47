//! HTTP-based [`Geocoder`] using the Nominatim search API.

use std::time::Duration;

use freight_core::{Geocoder, LookupError};
use geo::Coord;

use super::nominatim::SearchResult;
use crate::http::{BlockingClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ProviderBuildError, join_url};

/// Public Nominatim instance used when no base URL is configured.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Configuration for [`HttpGeocoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpGeocoderConfig {
    /// Base URL of the search service.
    pub base_url: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent sent with every request. Nominatim's usage policy requires
    /// one that identifies the application.
    pub user_agent: String,
}

impl Default for HttpGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpGeocoderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
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

/// Geocoder backed by a Nominatim-compatible `/search` endpoint.
///
/// Each lookup issues one request with `limit=1` and reads the first result.
/// Requests are never retried.
///
/// # Examples
///
/// ```no_run
/// use freight_core::Geocoder;
/// use freight_data::geocoding::{HttpGeocoder, HttpGeocoderConfig};
/// use std::time::Duration;
///
/// let config = HttpGeocoderConfig::new("http://localhost:8080")
///     .with_timeout(Duration::from_secs(5));
/// let geocoder = HttpGeocoder::with_config(config)?;
/// let position = geocoder.lookup("Pittsburgh, PA")?;
/// println!("lat {} lon {}", position.y, position.x);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct HttpGeocoder {
    client: BlockingClient,
    config: HttpGeocoderConfig,
}

impl HttpGeocoder {
    /// Create a geocoder for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpGeocoderConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpGeocoderConfig) -> Result<Self, ProviderBuildError> {
        let client = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self { client, config })
    }

    /// Active configuration.
    pub fn config(&self) -> &HttpGeocoderConfig {
        &self.config
    }

    fn build_search_url(&self) -> String {
        join_url(&self.config.base_url, "search")
    }

    fn convert_response(results: Vec<SearchResult>) -> Result<Coord<f64>, LookupError> {
        let Some(first) = results.into_iter().next() else {
            return Err(LookupError::NoMatch);
        };

        let latitude = first
            .lat
            .as_ref()
            .and_then(|lat| lat.value())
            .filter(|lat| (-90.0..=90.0).contains(lat))
            .ok_or_else(|| LookupError::Malformed {
                message: format!("search result has no usable lat: {:?}", first.lat),
            })?;
        let longitude = first
            .lon
            .as_ref()
            .and_then(|lon| lon.value())
            .filter(|lon| (-180.0..=180.0).contains(lon))
            .ok_or_else(|| LookupError::Malformed {
                message: format!("search result has no usable lon: {:?}", first.lon),
            })?;

        Ok(Coord {
            x: longitude,
            y: latitude,
        })
    }
}

impl Geocoder for HttpGeocoder {
    fn lookup(&self, query: &str) -> Result<Coord<f64>, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::EmptyInput);
        }

        let url = self.build_search_url();
        log::debug!("geocoding {query:?} via {url}");
        let results: Vec<SearchResult> = self
            .client
            .get_json(&url, &[("q", query), ("format", "json"), ("limit", "1")])?;
        Self::convert_response(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::nominatim::Degrees;
    use rstest::rstest;

    fn result(lat: Option<Degrees>, lon: Option<Degrees>) -> SearchResult {
        SearchResult { lat, lon }
    }

    #[rstest]
    fn new_uses_default_configuration() {
        let geocoder = HttpGeocoder::new("http://geo.example.com").expect("geocoder should build");

        assert_eq!(geocoder.config(), &HttpGeocoderConfig::new("http://geo.example.com"));
        assert_eq!(geocoder.config().timeout, crate::DEFAULT_TIMEOUT);
    }

    #[rstest]
    fn build_search_url_strips_trailing_slash() {
        let geocoder = HttpGeocoder::new("http://geo.example.com/").expect("geocoder should build");

        assert_eq!(geocoder.build_search_url(), "http://geo.example.com/search");
    }

    #[rstest]
    fn convert_response_reads_first_result() {
        let coord = HttpGeocoder::convert_response(vec![
            result(
                Some(Degrees::Text("40.44".into())),
                Some(Degrees::Text("-79.99".into())),
            ),
            result(Some(Degrees::Number(0.0)), Some(Degrees::Number(0.0))),
        ])
        .expect("should convert");

        assert_eq!(coord, Coord { x: -79.99, y: 40.44 });
    }

    #[rstest]
    fn empty_results_are_no_match() {
        assert_eq!(
            HttpGeocoder::convert_response(Vec::new()),
            Err(LookupError::NoMatch)
        );
    }

    #[rstest]
    #[case(None, Some(Degrees::Number(-80.0)))]
    #[case(Some(Degrees::Text("north".into())), Some(Degrees::Number(-80.0)))]
    #[case(Some(Degrees::Number(95.0)), Some(Degrees::Number(-80.0)))]
    #[case(Some(Degrees::Number(40.0)), None)]
    #[case(Some(Degrees::Number(40.0)), Some(Degrees::Number(-200.0)))]
    fn unusable_coordinates_are_malformed(
        #[case] lat: Option<Degrees>,
        #[case] lon: Option<Degrees>,
    ) {
        let err = HttpGeocoder::convert_response(vec![result(lat, lon)]).expect_err("should fail");

        assert!(matches!(err, LookupError::Malformed { .. }), "got {err:?}");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_query_is_rejected_without_a_request(#[case] query: &str) {
        let geocoder = HttpGeocoder::new("http://127.0.0.1:9").expect("geocoder should build");

        assert_eq!(geocoder.lookup(query), Err(LookupError::EmptyInput));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpGeocoderConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(3))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(
            HttpGeocoderConfig::default().base_url,
            DEFAULT_GEOCODER_URL
        );
    }
}
