//! Output shared by every solver.

use crate::trace::Trace;

/// Why a solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Exhaustive search finished: the solution is proven optimal.
    Optimal,
    /// The algorithm ran to its natural end (greedy pass, local optimum).
    Completed,
    /// Temperature fell to the configured minimum.
    Frozen,
    /// Too many iterations without improving the incumbent.
    Stagnated,
    /// A configured iteration or node limit was reached.
    IterationLimit,
    /// The wall-clock cutoff elapsed.
    Cutoff,
    /// The external cancel flag was raised.
    Cancelled,
}

/// Best solution found by a solve call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResult {
    /// Number of subsets in `best_solution`.
    pub best_cost: usize,
    /// 0-based subset indices, ascending and distinct.
    pub best_solution: Vec<usize>,
    /// Strict improvements over time; the last cost equals `best_cost`.
    pub trace: Trace,
    /// Why the solver stopped.
    pub termination: Termination,
    /// Algorithm-specific work counter (rounds, nodes, iterations, scans).
    pub iterations: usize,
}

impl SolveResult {
    pub(crate) fn new(
        mut best_solution: Vec<usize>,
        trace: Trace,
        termination: Termination,
        iterations: usize,
    ) -> Self {
        best_solution.sort_unstable();
        Self {
            best_cost: best_solution.len(),
            best_solution,
            trace,
            termination,
            iterations,
        }
    }

    /// Best solution as 1-based subset ids, the external numbering.
    pub fn one_based(&self) -> Vec<usize> {
        self.best_solution.iter().map(|&i| i + 1).collect()
    }

    /// Whether the solver proved optimality.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.termination == Termination::Optimal
    }
}
