//! Failures reported by external geocoding and routing lookups.
//!
//! Every lookup returns `Result<_, LookupError>`. Callers in this crate absorb
//! the error explicitly: enrichment moves on to the next candidate query and
//! distance estimation falls back to great-circle segments.

use thiserror::Error;

/// Coarse classification of a [`LookupError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupErrorKind {
    /// Network failure, timeout or non-success HTTP status.
    ExternalServiceUnavailable,
    /// The service answered with an unexpected shape or status sentinel.
    MalformedResponse,
    /// A well-formed answer carried no usable result.
    NoMatch,
}

/// Errors from [`Geocoder::lookup`](crate::Geocoder::lookup) and
/// [`RouteDistanceProvider::route_distance_meters`](crate::RouteDistanceProvider::route_distance_meters).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The request could not be sent or the connection failed.
    #[error("request to {url} failed: {message}")]
    Unavailable { url: String, message: String },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },
    /// The service answered with a non-success HTTP status.
    #[error("request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },
    /// The body could not be decoded or lacked required fields.
    #[error("malformed response: {message}")]
    Malformed { message: String },
    /// The service reported a status other than its success sentinel.
    #[error("service returned {code}: {message}")]
    ServiceStatus { code: String, message: String },
    /// The service answered but found nothing.
    #[error("no match found")]
    NoMatch,
    /// The request had nothing to look up.
    #[error("at least one input is required")]
    EmptyInput,
}

impl LookupError {
    /// Classify the error.
    ///
    /// # Examples
    /// ```
    /// use freight_core::{LookupError, LookupErrorKind};
    ///
    /// assert_eq!(LookupError::NoMatch.kind(), LookupErrorKind::NoMatch);
    /// ```
    pub fn kind(&self) -> LookupErrorKind {
        match self {
            Self::Unavailable { .. } | Self::Timeout { .. } | Self::HttpStatus { .. } => {
                LookupErrorKind::ExternalServiceUnavailable
            }
            Self::Malformed { .. } | Self::ServiceStatus { .. } => {
                LookupErrorKind::MalformedResponse
            }
            Self::NoMatch | Self::EmptyInput => LookupErrorKind::NoMatch,
        }
    }
}
