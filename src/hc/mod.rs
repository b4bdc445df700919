//! Hill climbing with first-improvement single-flip moves.
//!
//! The state is an inclusion vector over the subsets. Starting from a
//! random feasible selection, each scan visits subsets in index order and
//! takes the first flip that keeps the selection a cover and lowers its
//! cost. Only removals can do that, so the climb ends at a cover with no
//! redundant member.

mod config;
mod runner;

pub use config::HcConfig;
pub use runner::HcRunner;
