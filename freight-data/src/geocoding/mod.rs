//! HTTP geocoding against Nominatim-compatible search services.
//!
//! [`HttpGeocoder`] implements [`freight_core::Geocoder`] by calling
//! `GET {base_url}/search?q=...&format=json&limit=1` and taking the first
//! result. An empty result list is reported as
//! [`LookupError::NoMatch`](freight_core::LookupError::NoMatch); a result
//! without usable `lat`/`lon` values as
//! [`LookupError::Malformed`](freight_core::LookupError::Malformed).

mod nominatim;
mod provider;

pub use provider::{DEFAULT_GEOCODER_URL, HttpGeocoder, HttpGeocoderConfig};
