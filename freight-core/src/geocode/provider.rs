//! Geocoder trait for single place lookups.

use geo::Coord;

use crate::LookupError;

/// Resolve a free-text place description to a position.
///
/// Implementations issue one query and consider only the best result.
/// Returned coordinates use `x = longitude` and `y = latitude`.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use freight_core::{Geocoder, LookupError};
///
/// struct Pittsburgh;
///
/// impl Geocoder for Pittsburgh {
///     fn lookup(&self, query: &str) -> Result<Coord<f64>, LookupError> {
///         if query.starts_with("Pittsburgh") {
///             Ok(Coord { x: -79.99, y: 40.44 })
///         } else {
///             Err(LookupError::NoMatch)
///         }
///     }
/// }
///
/// assert!(Pittsburgh.lookup("Pittsburgh, PA").is_ok());
/// assert_eq!(Pittsburgh.lookup("Erie, PA"), Err(LookupError::NoMatch));
/// ```
pub trait Geocoder {
    /// Look up `query` and return the best match.
    ///
    /// Implementations must return `Err(LookupError::NoMatch)` when the
    /// service answers with an empty result set.
    fn lookup(&self, query: &str) -> Result<Coord<f64>, LookupError>;
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn lookup(&self, query: &str) -> Result<Coord<f64>, LookupError> {
        (**self).lookup(query)
    }
}

impl<T: Geocoder + ?Sized> Geocoder for Box<T> {
    fn lookup(&self, query: &str) -> Result<Coord<f64>, LookupError> {
        (**self).lookup(query)
    }
}
