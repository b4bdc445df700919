//! Hill climbing execution loop.

use super::config::HcConfig;
use crate::budget::TimeBudget;
use crate::coverage::CoverCounts;
use crate::error::Result;
use crate::instance::ProblemInstance;
use crate::result::{SolveResult, Termination};
use crate::trace::Trace;
use fixedbitset::FixedBitSet;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

/// Executes first-improvement hill climbing on a set cover instance.
pub struct HcRunner;

impl HcRunner {
    /// Climbs from a seeded random cover until no flip improves it, the
    /// scan limit is reached, or the budget expires.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_setcover::hc::{HcConfig, HcRunner};
    /// use u_setcover::{evaluate, ProblemInstance, TimeBudget};
    ///
    /// let instance = ProblemInstance::new(5, vec![
    ///     vec![1, 2, 3], vec![2, 4], vec![3, 4, 5], vec![1, 5],
    /// ]).unwrap();
    /// let config = HcConfig::default().with_seed(1);
    /// let result = HcRunner::run(&instance, &config, &TimeBudget::unlimited()).unwrap();
    /// assert!(evaluate(&instance, &result.best_solution).feasible);
    /// ```
    pub fn run(
        instance: &ProblemInstance,
        config: &HcConfig,
        budget: &TimeBudget,
    ) -> Result<SolveResult> {
        instance.check_feasible()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        info!(
            event = "solve_start",
            algorithm = "HC",
            universe = instance.universe_size(),
            subsets = instance.subset_count(),
        );

        let (mut included, mut counts) = random_cover(instance, &mut rng);
        let mut cost = included.count_ones(..);

        let mut history = Trace::new();
        history.record(budget.elapsed_secs(), cost);

        let mut scans = 0usize;
        let termination = loop {
            if budget.expired() {
                break if budget.is_cancelled() {
                    Termination::Cancelled
                } else {
                    Termination::Cutoff
                };
            }
            if config.max_scans > 0 && scans >= config.max_scans {
                break Termination::IterationLimit;
            }

            scans += 1;
            let Some(index) = first_improvement(instance, &included, &counts) else {
                break Termination::Completed;
            };

            included.set(index, false);
            counts.remove(instance, index);
            cost -= 1;

            let elapsed = budget.elapsed_secs();
            history.record(elapsed, cost);
            debug!(
                event = "improvement",
                algorithm = "HC",
                cost,
                flipped = index,
                scan = scans,
                elapsed_secs = elapsed,
            );
        };

        info!(
            event = "solve_end",
            algorithm = "HC",
            cost,
            termination = ?termination,
            scans,
            elapsed_ms = budget.elapsed().as_millis() as u64,
        );

        Ok(SolveResult::new(
            included.ones().collect(),
            history,
            termination,
            scans,
        ))
    }
}

/// Includes subsets in a seeded random order until the universe is covered.
///
/// Draws are without replacement, so at most `m` subsets are tried; the
/// caller has already checked that all of them together form a cover.
fn random_cover(instance: &ProblemInstance, rng: &mut StdRng) -> (FixedBitSet, CoverCounts) {
    let mut order: Vec<usize> = (0..instance.subset_count()).collect();
    order.shuffle(rng);

    let mut included = FixedBitSet::with_capacity(instance.subset_count());
    let mut counts = CoverCounts::new(instance);
    for index in order {
        if counts.is_complete() {
            break;
        }
        included.insert(index);
        counts.add(instance, index);
    }
    (included, counts)
}

/// First index, in order, whose flip leaves a strictly cheaper cover.
///
/// Flipping an excluded subset in raises the cost, so only included ones
/// are candidates: removing one is feasible exactly when it is redundant.
fn first_improvement(
    instance: &ProblemInstance,
    included: &FixedBitSet,
    counts: &CoverCounts,
) -> Option<usize> {
    (0..instance.subset_count())
        .find(|&index| included.contains(index) && counts.is_redundant(instance, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetCoverError;
    use crate::evaluate::evaluate;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::time::Duration;

    fn example() -> ProblemInstance {
        ProblemInstance::new(5, vec![vec![1, 2, 3], vec![2, 4], vec![3, 4, 5], vec![1, 5]])
            .unwrap()
    }

    /// Pairs over 12 elements plus overlapping triples: plenty of redundancy.
    fn overlapping() -> ProblemInstance {
        let mut subsets: Vec<Vec<usize>> = (0..6).map(|k| vec![2 * k + 1, 2 * k + 2]).collect();
        subsets.extend((0..10).map(|k| vec![k + 1, k + 2, k + 3]));
        ProblemInstance::new(12, subsets).unwrap()
    }

    fn assert_local_optimum(instance: &ProblemInstance, result: &SolveResult) {
        assert!(evaluate(instance, &result.best_solution).feasible);
        let counts = CoverCounts::from_selection(instance, &result.best_solution);
        for &index in &result.best_solution {
            assert!(
                !counts.is_redundant(instance, index),
                "subset {index} is still removable in {:?}",
                result.best_solution
            );
        }
    }

    #[test]
    fn test_random_cover_is_feasible() {
        let instance = overlapping();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (included, counts) = random_cover(&instance, &mut rng);
            let selection: Vec<usize> = included.ones().collect();
            assert!(counts.is_complete());
            assert!(evaluate(&instance, &selection).feasible, "seed {seed}");
        }
    }

    #[test]
    fn test_first_improvement_takes_lowest_index() {
        let instance = example();
        let all = [0, 1, 2, 3];
        let counts = CoverCounts::from_selection(&instance, &all);
        let mut included = FixedBitSet::with_capacity(4);
        included.insert_range(..);
        // Every element is covered twice, so S0 is the first removable member.
        assert_eq!(first_improvement(&instance, &included, &counts), Some(0));
    }

    #[test]
    fn test_first_improvement_none_at_minimal_cover() {
        let instance = example();
        let counts = CoverCounts::from_selection(&instance, &[0, 2]);
        let mut included = FixedBitSet::with_capacity(4);
        included.insert(0);
        included.insert(2);
        assert_eq!(first_improvement(&instance, &included, &counts), None);
    }

    #[test]
    fn test_hc_reaches_local_optimum() {
        let instance = overlapping();
        for seed in 0..10 {
            let config = HcConfig::default().with_seed(seed);
            let result = HcRunner::run(&instance, &config, &TimeBudget::unlimited()).unwrap();
            assert_eq!(result.termination, Termination::Completed);
            assert_local_optimum(&instance, &result);
        }
    }

    #[test]
    fn test_hc_trace_steps_down_by_one() {
        let config = HcConfig::default().with_seed(4);
        let result = HcRunner::run(&overlapping(), &config, &TimeBudget::unlimited()).unwrap();
        let costs = result.trace.costs();
        for w in costs.windows(2) {
            assert_eq!(w[0], w[1] + 1);
        }
        assert_eq!(result.trace.last_cost(), Some(result.best_cost));
        // One improving scan per removal plus the final empty scan.
        assert_eq!(result.iterations, costs.len());
    }

    #[test]
    fn test_hc_deterministic_with_seed() {
        let instance = overlapping();
        let config = HcConfig::default().with_seed(99);
        let a = HcRunner::run(&instance, &config, &TimeBudget::unlimited()).unwrap();
        let b = HcRunner::run(&instance, &config, &TimeBudget::unlimited()).unwrap();
        assert_eq!(a.best_solution, b.best_solution);
        assert_eq!(a.trace.costs(), b.trace.costs());
    }

    #[test]
    fn test_hc_scan_limit() {
        let config = HcConfig::default().with_seed(2).with_max_scans(1);
        let result = HcRunner::run(&overlapping(), &config, &TimeBudget::unlimited()).unwrap();
        assert!(result.iterations <= 1);
        assert!(result.trace.len() <= 2);
        assert!(evaluate(&overlapping(), &result.best_solution).feasible);
    }

    #[test]
    fn test_hc_zero_cutoff_returns_initial() {
        let config = HcConfig::default().with_seed(5);
        let budget = TimeBudget::starting_now(Duration::ZERO);
        let result = HcRunner::run(&overlapping(), &config, &budget).unwrap();
        assert_eq!(result.termination, Termination::Cutoff);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.trace.len(), 1);
        assert!(evaluate(&overlapping(), &result.best_solution).feasible);
    }

    #[test]
    fn test_hc_cancellation() {
        let budget = TimeBudget::unlimited().with_cancel(Arc::new(AtomicBool::new(true)));
        let result = HcRunner::run(&example(), &HcConfig::default(), &budget).unwrap();
        assert_eq!(result.termination, Termination::Cancelled);
    }

    #[test]
    fn test_hc_duplicate_subsets() {
        let instance = ProblemInstance::new(2, vec![vec![1, 2], vec![1, 2], vec![2, 1]]).unwrap();
        let config = HcConfig::default().with_seed(8);
        let result = HcRunner::run(&instance, &config, &TimeBudget::unlimited()).unwrap();
        assert_eq!(result.best_cost, 1);
    }

    #[test]
    fn test_hc_infeasible_fails_fast() {
        let instance = ProblemInstance::new(3, vec![vec![1], vec![2]]).unwrap();
        let err = HcRunner::run(&instance, &HcConfig::default(), &TimeBudget::unlimited())
            .unwrap_err();
        assert!(matches!(
            err,
            SetCoverError::InfeasibleInstance { ref uncovered } if uncovered == &vec![3]
        ));
    }

    #[test]
    fn test_hc_empty_universe() {
        let instance = ProblemInstance::new(0, vec![vec![], vec![]]).unwrap();
        let result =
            HcRunner::run(&instance, &HcConfig::default(), &TimeBudget::unlimited()).unwrap();
        assert_eq!(result.best_cost, 0);
        assert!(result.best_solution.is_empty());
        assert_eq!(result.trace.costs(), vec![0]);
    }
}
