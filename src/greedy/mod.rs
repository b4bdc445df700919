//! Greedy approximation (Chvátal's max-coverage rule).
//!
//! Repeatedly picks the subset covering the most still-uncovered elements,
//! breaking ties by index, until the universe is covered. The result is
//! within a factor `H(d)` of optimal, where `d` is the largest subset size.
//!
//! The covering primitives here are also used by branch-and-bound (node
//! bound and primal completion) and by simulated annealing (initial
//! solution).
//!
//! # References
//!
//! - Chvátal, V. (1979), "A Greedy Heuristic for the Set-Covering Problem"
//! - Johnson, D. S. (1974), "Approximation Algorithms for Combinatorial Problems"

mod cover;
mod runner;

pub(crate) use cover::{complete_cover, efficiency_cover};
pub use runner::GreedyRunner;
