//! HTTP road-distance lookups against OSRM routing services.
//!
//! [`HttpRouteDistanceProvider`] implements the synchronous
//! [`freight_core::RouteDistanceProvider`] trait by blocking on an
//! asynchronous `reqwest` call, keeping the core library embeddable in
//! synchronous contexts.
//!
//! # Example
//!
//! ```no_run
//! use freight_data::routing::{HttpRouteDistanceProvider, HttpRoutingConfig};
//! use std::time::Duration;
//!
//! let config = HttpRoutingConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(30))
//!     .with_user_agent("dispatch/1.0");
//! let provider = HttpRouteDistanceProvider::with_config(config)?;
//! # Ok::<(), freight_data::ProviderBuildError>(())
//! ```

mod osrm;
mod provider;

pub use provider::{
    DEFAULT_PROFILE, DEFAULT_ROUTING_URL, HttpRouteDistanceProvider, HttpRoutingConfig,
};
