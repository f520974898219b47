//! Great-circle distance and unit helpers.

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Miles per metre.
pub const MILES_PER_METER: f64 = 0.000_621_371;

/// Great-circle distance in miles between two points in decimal degrees.
///
/// Uses the Haversine formula. Inputs are not range-checked.
///
/// # Examples
/// ```
/// use freight_core::haversine_miles;
///
/// let miles = haversine_miles(40.0, -80.0, 41.0, -81.0);
/// assert!((miles - 86.9).abs() < 1.0);
/// assert_eq!(haversine_miles(40.0, -80.0, 40.0, -80.0), 0.0);
/// ```
pub fn haversine_miles(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lng2 - lng1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Convert metres to miles.
pub fn meters_to_miles(meters: f64) -> f64 {
    meters * MILES_PER_METER
}

/// Round to two decimal places.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
