//! Fill in missing stop coordinates from a geocoder.

use crate::{Geocoder, LookupError, Stop};

use super::candidate_queries;

/// A candidate query that did not resolve, with the reason.
pub type FailedQuery = (String, LookupError);

/// What enrichment did for a single stop.
#[derive(Debug, Clone, PartialEq)]
pub enum StopOutcome {
    /// The stop already had coordinates; no lookup was made.
    AlreadyLocated,
    /// A candidate query resolved the stop.
    Resolved {
        /// The query that produced the coordinates.
        query: String,
        /// Earlier candidates that failed.
        failures: Vec<FailedQuery>,
    },
    /// Every candidate failed, or the stop had no usable hints.
    Unresolved {
        /// Each candidate tried and why it failed.
        failures: Vec<FailedQuery>,
    },
}

impl StopOutcome {
    /// Number of lookups issued for the stop.
    pub fn lookups(&self) -> usize {
        match self {
            Self::AlreadyLocated => 0,
            Self::Resolved { failures, .. } => failures.len() + 1,
            Self::Unresolved { failures } => failures.len(),
        }
    }
}

/// Result of [`enrich`]: a new stop list plus a per-stop report.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    /// Copy of the input stops, in input order, with resolved coordinates.
    pub stops: Vec<Stop>,
    /// `(sequence, outcome)` pairs in processing order.
    pub outcomes: Vec<(i64, StopOutcome)>,
}

impl Enrichment {
    /// Total lookups issued across all stops.
    pub fn lookups(&self) -> usize {
        self.outcomes
            .iter()
            .map(|(_, outcome)| outcome.lookups())
            .sum()
    }

    /// Outcome for the stop with the given sequence.
    pub fn outcome(&self, sequence: i64) -> Option<&StopOutcome> {
        self.outcomes
            .iter()
            .find(|(candidate, _)| *candidate == sequence)
            .map(|(_, outcome)| outcome)
    }

    /// Sequences of stops that remain without coordinates.
    pub fn unresolved(&self) -> Vec<i64> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, StopOutcome::Unresolved { .. }))
            .map(|(sequence, _)| *sequence)
            .collect()
    }
}

/// Resolve coordinates for every stop that lacks them.
///
/// Stops are processed in ascending `sequence`. For each unlocated stop the
/// [`candidate_queries`] are tried in order until one resolves. Failed lookups
/// are recorded and never abort the pass; a stop whose candidates all fail
/// stays unlocated. Located stops are copied unchanged without a lookup.
///
/// # Examples
/// ```
/// use freight_core::{Stop, StopKind, enrich, test_support::StubGeocoder};
///
/// let geocoder = StubGeocoder::new().with_match("Gary, IN", 41.6, -87.3);
/// let stops = vec![Stop::new(1, StopKind::Pickup).with_city("Gary").with_state("IN")];
///
/// let enrichment = enrich(&stops, &geocoder);
/// assert_eq!(enrichment.stops[0].latitude(), Some(41.6));
/// assert!(stops[0].location.is_none());
/// ```
pub fn enrich<G: Geocoder + ?Sized>(stops: &[Stop], geocoder: &G) -> Enrichment {
    let mut enriched = stops.to_vec();
    let mut order: Vec<usize> = (0..enriched.len()).collect();
    order.sort_by_key(|&index| enriched.get(index).map(|stop| stop.sequence));

    let mut outcomes = Vec::with_capacity(enriched.len());
    for index in order {
        let Some(stop) = enriched.get_mut(index) else {
            continue;
        };
        let outcome = if stop.is_located() {
            StopOutcome::AlreadyLocated
        } else {
            resolve(stop, geocoder)
        };
        outcomes.push((stop.sequence, outcome));
    }

    Enrichment {
        stops: enriched,
        outcomes,
    }
}

fn resolve<G: Geocoder + ?Sized>(stop: &mut Stop, geocoder: &G) -> StopOutcome {
    let mut failures = Vec::new();
    for query in candidate_queries(stop) {
        match geocoder.lookup(&query) {
            Ok(coord) => {
                log::debug!("stop {} resolved by {query:?}", stop.sequence);
                stop.location = Some(coord);
                return StopOutcome::Resolved { query, failures };
            }
            Err(error) => {
                log::debug!("geocode query {query:?} for stop {} failed: {error}", stop.sequence);
                failures.push((query, error));
            }
        }
    }
    log::warn!(
        "could not geocode stop {} after {} queries; leaving it unlocated",
        stop.sequence,
        failures.len()
    );
    StopOutcome::Unresolved { failures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StopKind;
    use crate::test_support::StubGeocoder;
    use rstest::{fixture, rstest};

    #[fixture]
    fn full_hint_stop() -> Stop {
        Stop::new(1, StopKind::Pickup)
            .with_name("Acme Steel")
            .with_address("100 Mill Rd")
            .with_city("Gary")
            .with_state("IN")
    }

    #[rstest]
    fn first_successful_candidate_wins(full_hint_stop: Stop) {
        let geocoder = StubGeocoder::new()
            .with_match("100 Mill Rd, Gary, IN", 41.61, -87.33)
            .with_match("Acme Steel, Gary, IN", 0.0, 0.0);

        let enrichment = enrich(&[full_hint_stop], &geocoder);

        assert_eq!(enrichment.stops[0].latitude(), Some(41.61));
        assert_eq!(
            geocoder.queries(),
            vec!["Gary, IN".to_string(), "100 Mill Rd, Gary, IN".to_string()]
        );
        match enrichment.outcome(1) {
            Some(StopOutcome::Resolved { query, failures }) => {
                assert_eq!(query, "100 Mill Rd, Gary, IN");
                assert_eq!(failures.len(), 1);
            }
            other => panic!("expected Resolved, got {other:?}"),
        }
    }

    #[rstest]
    fn errors_fall_through_to_next_candidate(full_hint_stop: Stop) {
        let geocoder = StubGeocoder::new()
            .with_error(
                "Gary, IN",
                LookupError::Timeout {
                    url: "http://geo".into(),
                    timeout_secs: 10,
                },
            )
            .with_error(
                "100 Mill Rd, Gary, IN",
                LookupError::Malformed {
                    message: "lat missing".into(),
                },
            )
            .with_match("Acme Steel, Gary, IN", 41.6, -87.3);

        let enrichment = enrich(&[full_hint_stop], &geocoder);

        assert_eq!(enrichment.stops[0].longitude(), Some(-87.3));
        assert_eq!(enrichment.lookups(), 3);
    }

    #[rstest]
    fn all_candidates_failing_leaves_stop_unlocated(full_hint_stop: Stop) {
        let geocoder = StubGeocoder::new();

        let enrichment = enrich(&[full_hint_stop], &geocoder);

        assert_eq!(enrichment.stops[0].location, None);
        assert_eq!(enrichment.unresolved(), vec![1]);
        assert_eq!(enrichment.lookups(), 3);
    }

    #[rstest]
    fn stop_without_hints_is_unresolved_without_lookups() {
        let geocoder = StubGeocoder::new();
        let enrichment = enrich(&[Stop::new(4, StopKind::Stop)], &geocoder);
        assert_eq!(
            enrichment.outcome(4),
            Some(&StopOutcome::Unresolved {
                failures: Vec::new()
            })
        );
        assert!(geocoder.queries().is_empty());
    }

    #[rstest]
    fn located_stops_are_untouched() {
        let geocoder = StubGeocoder::new().with_match("Gary, IN", 0.0, 0.0);
        let stops = vec![
            Stop::new(1, StopKind::Pickup)
                .with_city("Gary")
                .with_state("IN")
                .with_location(41.6, -87.3),
        ];

        let enrichment = enrich(&stops, &geocoder);

        assert_eq!(enrichment.stops, stops);
        assert_eq!(enrichment.lookups(), 0);
        assert!(geocoder.queries().is_empty());
    }

    #[rstest]
    fn processes_in_sequence_order_and_keeps_input_order() {
        let geocoder = StubGeocoder::new()
            .with_match("Erie, PA", 42.1, -80.1)
            .with_match("Akron, OH", 41.1, -81.5);
        let stops = vec![
            Stop::new(2, StopKind::Dropoff).with_city("Erie").with_state("PA"),
            Stop::new(1, StopKind::Pickup).with_city("Akron").with_state("OH"),
        ];

        let enrichment = enrich(&stops, &geocoder);

        assert_eq!(
            geocoder.queries(),
            vec!["Akron, OH".to_string(), "Erie, PA".to_string()]
        );
        let sequences: Vec<i64> = enrichment.stops.iter().map(|s| s.sequence).collect();
        assert_eq!(sequences, vec![2, 1]);
        assert_eq!(enrichment.stops[0].latitude(), Some(42.1));
        assert_eq!(enrichment.stops[1].latitude(), Some(41.1));
    }

    #[rstest]
    fn enriching_twice_is_idempotent() {
        let geocoder = StubGeocoder::new().with_match("Erie, PA", 42.1, -80.1);
        let stops = vec![Stop::new(1, StopKind::Stop).with_city("Erie").with_state("PA")];

        let first = enrich(&stops, &geocoder);
        let second = enrich(&first.stops, &geocoder);

        assert_eq!(second.stops, first.stops);
        assert_eq!(second.lookups(), 0);
        assert_eq!(geocoder.queries().len(), 1);
    }
}
