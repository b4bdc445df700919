//! Exact branch-and-bound.
//!
//! Depth-first search over one include/exclude decision per subset, with
//! subsets visited in descending-size order. Each node runs a greedy
//! completion over the undecided subsets: it proves dead ends, yields a
//! primal cover that can improve the incumbent, and supplies the maximum
//! single-subset gain used for the admissible bound
//! `ceil(uncovered / max gain)`. Nodes equivalent to an earlier visit with
//! no more selected subsets are pruned through a memo keyed on
//! `(frontier, covered)`.
//!
//! The search runs on an explicit node stack, so depth is bounded by memory
//! rather than the call stack.
//!
//! # References
//!
//! - Land, A. H. & Doig, A. G. (1960), "An Automatic Method of Solving
//!   Discrete Programming Problems"
//! - Balas, E. & Ho, A. (1980), "Set covering algorithms using cutting
//!   planes, heuristics, and subgradient optimization"

mod config;
mod runner;
mod types;

pub use config::{BnbConfig, SubsetOrdering};
pub use runner::{BnbResult, BnbRunner};
pub use types::BnbStats;
