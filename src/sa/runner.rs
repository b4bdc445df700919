//! SA execution loop.

use super::config::SaConfig;
use super::neighborhood::Neighborhood;
use super::temperature::{acceptance_probability, CoolingSchedule};
use crate::budget::TimeBudget;
use crate::error::{Result, SetCoverError};
use crate::evaluate::evaluate;
use crate::greedy::{complete_cover, efficiency_cover};
use crate::instance::ProblemInstance;
use crate::result::{SolveResult, Termination};
use crate::trace::Trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// Best feasible cover, trace and termination reason.
    pub solution: SolveResult,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Final temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of accepted moves that improved the best cost.
    pub improving_moves: usize,

    /// Accepted feasible moves that tied the best cost.
    pub plateau_moves: usize,
}

impl From<SaResult> for SolveResult {
    fn from(result: SaResult) -> Self {
        result.solution
    }
}

/// Executes Simulated Annealing on a set cover instance.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA until the budget expires, the temperature freezes, or the
    /// search stagnates.
    ///
    /// The starting point is a greedy cover (efficiency-ranked on large
    /// instances), so the result is always feasible.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_setcover::sa::{SaConfig, SaRunner};
    /// use u_setcover::{ProblemInstance, TimeBudget};
    ///
    /// let instance = ProblemInstance::new(5, vec![
    ///     vec![1, 2, 3], vec![2, 4], vec![3, 4, 5], vec![1, 5],
    /// ]).unwrap();
    /// let config = SaConfig::default().with_seed(42);
    /// let result = SaRunner::run(&instance, &config, &TimeBudget::unlimited()).unwrap();
    /// assert_eq!(result.solution.best_cost, 2);
    /// ```
    pub fn run(
        instance: &ProblemInstance,
        config: &SaConfig,
        budget: &TimeBudget,
    ) -> Result<SaResult> {
        config.validate().map_err(SetCoverError::InvalidConfig)?;
        instance.check_feasible()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let large = instance.is_large(config.large_instance_threshold);
        let cooling_rate = config.cooling_rate_for(large);
        let max_no_improve = config.max_no_improve_for(large);

        info!(
            event = "solve_start",
            algorithm = "SA",
            universe = instance.universe_size(),
            subsets = instance.subset_count(),
            large,
            cooling_rate,
        );

        let initial = if large {
            efficiency_cover(instance)
        } else {
            let all: Vec<usize> = (0..instance.subset_count()).collect();
            complete_cover(instance, &all, &instance.empty_cover()).map(|done| done.picks)
        };
        let mut current = initial.ok_or_else(|| SetCoverError::InfeasibleInstance {
            uncovered: instance.uncoverable_elements(),
        })?;
        let initial_eval = evaluate(instance, &current);
        let mut current_cost = initial_eval.cost;
        let mut current_feasible = initial_eval.feasible;
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut history = Trace::new();
        history.record(budget.elapsed_secs(), best_cost);

        if instance.universe_size() == 0 {
            return Ok(SaResult {
                solution: SolveResult::new(best, history, Termination::Completed, 0),
                iterations: 0,
                final_temperature: config.initial_temperature,
                accepted_moves: 0,
                improving_moves: 0,
                plateau_moves: 0,
            });
        }

        let neighborhood = Neighborhood::new(instance, large);
        let schedule = CoolingSchedule::new(
            config.initial_temperature,
            cooling_rate,
            config.reheat_interval,
            large,
        );

        let mut temperature = config.initial_temperature;
        let mut iteration = 0usize;
        let mut last_improvement = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut plateau_moves = 0usize;

        let termination = loop {
            if budget.expired() {
                break if budget.is_cancelled() {
                    Termination::Cancelled
                } else {
                    Termination::Cutoff
                };
            }
            if temperature <= config.min_temperature {
                break Termination::Frozen;
            }
            if config.max_iterations > 0 && iteration >= config.max_iterations {
                break Termination::IterationLimit;
            }

            let mv = neighborhood.propose(&current, iteration, &mut rng);
            let mut neighbor = current.clone();
            mv.apply(&mut neighbor);
            let eval = evaluate(instance, &neighbor);

            let probability = acceptance_probability(
                current_cost,
                eval.cost,
                current_feasible,
                eval.feasible,
                temperature,
                iteration,
                large,
            );

            if rng.random::<f64>() < probability {
                current = neighbor;
                current_cost = eval.cost;
                current_feasible = eval.feasible;
                accepted_moves += 1;

                if current_feasible && current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                    improving_moves += 1;
                    last_improvement = iteration;
                    let elapsed = budget.elapsed_secs();
                    history.record(elapsed, best_cost);
                    debug!(
                        event = "improvement",
                        algorithm = "SA",
                        cost = best_cost,
                        iteration,
                        temperature,
                        elapsed_secs = elapsed,
                    );
                } else if current_feasible && current_cost == best_cost {
                    plateau_moves += 1;
                }
            }

            let previous = temperature;
            temperature = schedule.next(temperature, iteration, last_improvement);
            if temperature > previous {
                trace!(event = "reheat", iteration, temperature);
            }

            iteration += 1;
            if iteration - last_improvement > max_no_improve {
                break Termination::Stagnated;
            }
        };

        info!(
            event = "solve_end",
            algorithm = "SA",
            cost = best_cost,
            termination = ?termination,
            iterations = iteration,
            accepted = accepted_moves,
            final_temperature = temperature,
            elapsed_ms = budget.elapsed().as_millis() as u64,
        );

        Ok(SaResult {
            solution: SolveResult::new(best, history, termination, iteration),
            iterations: iteration,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            plateau_moves,
        })
    }
}
