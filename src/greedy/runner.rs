//! Greedy approximation execution.

use super::cover::complete_cover;
use crate::budget::TimeBudget;
use crate::error::{Result, SetCoverError};
use crate::instance::ProblemInstance;
use crate::result::{SolveResult, Termination};
use crate::trace::Trace;
use tracing::info;

/// Deterministic single-pass greedy solver.
///
/// At most `m` selection rounds, each scanning the remaining subsets. The
/// trace holds one checkpoint: the final cover's cost.
///
/// # Examples
///
/// ```
/// use u_setcover::{GreedyRunner, ProblemInstance, TimeBudget};
///
/// let instance = ProblemInstance::new(5, vec![
///     vec![1, 2, 3], vec![2, 4], vec![3, 4, 5], vec![1, 5],
/// ]).unwrap();
/// let result = GreedyRunner::run(&instance, &TimeBudget::unlimited()).unwrap();
/// assert_eq!(result.best_solution, vec![0, 2]);
/// assert_eq!(result.best_cost, 2);
/// ```
pub struct GreedyRunner;

impl GreedyRunner {
    /// Runs the greedy cover.
    ///
    /// Fails with [`SetCoverError::InfeasibleInstance`] before selecting
    /// anything when some element lies in no subset.
    pub fn run(instance: &ProblemInstance, budget: &TimeBudget) -> Result<SolveResult> {
        instance.check_feasible()?;

        info!(
            event = "solve_start",
            algorithm = "Approx",
            universe = instance.universe_size(),
            subsets = instance.subset_count(),
        );

        let candidates: Vec<usize> = (0..instance.subset_count()).collect();
        let completion = complete_cover(instance, &candidates, &instance.empty_cover())
            .ok_or_else(|| SetCoverError::InfeasibleInstance {
                uncovered: instance.uncoverable_elements(),
            })?;

        let rounds = completion.picks.len();
        let mut trace = Trace::new();
        trace.record(budget.elapsed_secs(), rounds);

        info!(
            event = "solve_end",
            algorithm = "Approx",
            cost = rounds,
            elapsed_ms = budget.elapsed().as_millis() as u64,
        );

        Ok(SolveResult::new(
            completion.picks,
            trace,
            Termination::Completed,
            rounds,
        ))
    }
}
