//! Simulated Annealing (SA) for set cover.
//!
//! A single-solution trajectory search over subset selections. Neighbors
//! come from three adaptive moves (remove, add, swap); infeasible neighbors
//! are always rejected, equal-cost neighbors are accepted half the time to
//! wander plateaus, and worse neighbors follow the Metropolis rule. The
//! temperature cools geometrically, cools faster on large instances that
//! have stalled, and is periodically reheated.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Jacobs, L. W. & Brusco, M. J. (1995), "A local-search heuristic for
//!   large set-covering problems"

mod config;
mod neighborhood;
mod runner;
mod temperature;
mod types;

pub use config::SaConfig;
pub use neighborhood::move_probabilities;
pub use runner::{SaResult, SaRunner};
pub use temperature::{acceptance_probability, CoolingSchedule};
pub use types::{Move, MoveProbabilities};
