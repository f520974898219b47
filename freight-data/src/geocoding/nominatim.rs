//! Nominatim search response types.
//!
//! `GET /search?format=json` answers with a JSON array of places. Nominatim
//! itself encodes `lat` and `lon` as strings; some compatible services send
//! plain numbers, so both are accepted.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Search/>

use serde::Deserialize;

/// One place from a search response.
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    /// Latitude in degrees.
    pub lat: Option<Degrees>,
    /// Longitude in degrees.
    pub lon: Option<Degrees>,
}

/// A coordinate component sent either as a number or as a decimal string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    /// The value in degrees, if it is a finite number.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}
