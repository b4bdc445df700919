//! Minimum set cover solvers with an anytime contract.
//!
//! Given a universe `1..=n` and `m` candidate subsets, find the fewest
//! subsets whose union is the universe. Four strategies are provided:
//!
//! - **Branch and bound** ([`bnb`]): exact depth-first search with an
//!   admissible coverage bound, a greedy primal heuristic and state
//!   memoization. Proves optimality when it finishes.
//! - **Greedy approximation** ([`greedy`]): Chvátal's max-coverage rule.
//! - **Simulated annealing** ([`sa`]): adaptive remove/add/swap moves with
//!   Metropolis acceptance, size-dependent cooling and reheating.
//! - **Hill climbing** ([`hc`]): first-improvement single-flip descent from
//!   a random cover.
//!
//! Every solver polls a [`TimeBudget`] and returns a [`SolveResult`]: the
//! best feasible cover, a [`Trace`] of strict improvements over elapsed
//! time, and the reason it stopped. Instances on which some element lies
//! in no subset are rejected up front with
//! [`SetCoverError::InfeasibleInstance`].
//!
//! # Example
//!
//! ```
//! use u_setcover::{Algorithm, ProblemInstance, TimeBudget};
//! use std::time::Duration;
//!
//! let instance = ProblemInstance::new(5, vec![
//!     vec![1, 2, 3], vec![2, 4], vec![3, 4, 5], vec![1, 5],
//! ]).unwrap();
//! let budget = TimeBudget::starting_now(Duration::from_secs(1));
//! let result = Algorithm::BranchAndBound.solve(&instance, &budget, None).unwrap();
//! assert_eq!(result.best_cost, 2);
//! assert_eq!(result.one_based(), vec![1, 3]);
//! ```

pub mod algorithm;
pub mod bnb;
pub mod budget;
pub mod coverage;
pub mod error;
pub mod evaluate;
pub mod greedy;
pub mod hc;
pub mod instance;
pub mod io;
pub mod result;
pub mod sa;
pub mod trace;

pub use algorithm::Algorithm;
pub use budget::TimeBudget;
pub use coverage::CoverCounts;
pub use error::{Result, SetCoverError};
pub use evaluate::{coverage_of, evaluate, Evaluation};
pub use greedy::GreedyRunner;
pub use instance::ProblemInstance;
pub use result::{SolveResult, Termination};
pub use trace::{Checkpoint, Trace};
