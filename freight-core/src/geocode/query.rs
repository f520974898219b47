//! Candidate geocoding queries built from a stop's location hints.

use crate::Stop;

/// Build the queries to try for `stop`, most likely to resolve first.
///
/// The order is `"city, state"`, then the street address with city, state
/// and postal code, then `"name, city, state"`. The address query is only
/// built when an address is present, and the name query only when a name is
/// present. Blank hints are skipped; empty and duplicate queries are dropped.
///
/// # Examples
/// ```
/// use freight_core::{Stop, StopKind, candidate_queries};
///
/// let stop = Stop::new(1, StopKind::Pickup)
///     .with_name("Acme Steel")
///     .with_address("100 Mill Rd")
///     .with_city("Gary")
///     .with_state("IN")
///     .with_postal_code("46402");
///
/// assert_eq!(
///     candidate_queries(&stop),
///     vec![
///         "Gary, IN".to_string(),
///         "100 Mill Rd, Gary, IN, 46402".to_string(),
///         "Acme Steel, Gary, IN".to_string(),
///     ]
/// );
/// ```
pub fn candidate_queries(stop: &Stop) -> Vec<String> {
    let city = hint(stop.city.as_deref());
    let state = hint(stop.state.as_deref());
    let postal_code = hint(stop.postal_code.as_deref());

    let by_city = join([city, state]);
    let by_address = hint(stop.address.as_deref())
        .and_then(|address| join([Some(address), city, state, postal_code]));
    let by_name = hint(stop.name.as_deref()).and_then(|name| join([Some(name), city, state]));

    let mut queries: Vec<String> = Vec::with_capacity(3);
    for query in [by_city, by_address, by_name].into_iter().flatten() {
        if !queries.contains(&query) {
            queries.push(query);
        }
    }
    queries
}

fn hint(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn join<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    let present: Vec<&str> = parts.into_iter().flatten().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.join(", "))
    }
}
