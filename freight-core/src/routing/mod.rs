//! Estimate the total distance of an order's route.
//!
//! A [`RouteDistanceProvider`] reports road-network distance for an ordered
//! list of waypoints. [`estimate_distance`] prefers that answer and falls back
//! to summed great-circle segments when the provider fails.

mod estimate;
mod provider;

pub use estimate::{
    DistanceEstimate, DistanceMethod, estimate_distance, great_circle_miles, total_miles,
};
pub use provider::RouteDistanceProvider;
