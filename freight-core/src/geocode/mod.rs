//! Resolve stops that lack coordinates.
//!
//! The [`Geocoder`] trait abstracts a single place lookup. [`enrich`] builds
//! prioritised candidate queries for each unlocated stop and asks the
//! geocoder until one of them resolves.

mod enrich;
mod provider;
mod query;

pub use enrich::{Enrichment, FailedQuery, StopOutcome, enrich};
pub use provider::Geocoder;
pub use query::candidate_queries;
