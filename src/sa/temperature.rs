//! Acceptance criterion and adaptive cooling.

/// Iterations during which large instances use the scaled Metropolis rule.
const EARLY_PHASE_ITERATIONS: usize = 500;

/// Temperature scale applied in the early phase on large instances.
const EARLY_PHASE_SCALE: f64 = 0.8;

/// Stall length after which large instances cool with the squared rate.
const STALL_ITERATIONS: usize = 500;

/// Probability of moving from the current selection to a neighbor.
///
/// - feasible and strictly cheaper (or current infeasible): 1
/// - infeasible neighbor: 0, at any temperature
/// - feasible and equal cost: 0.5
/// - otherwise `exp((old - new) / T)`, with `T` scaled by 0.8 during the
///   first 500 iterations on large instances
///
/// # Examples
///
/// ```
/// use u_setcover::sa::acceptance_probability;
///
/// assert_eq!(acceptance_probability(5, 4, true, true, 10.0, 0, false), 1.0);
/// assert_eq!(acceptance_probability(5, 4, true, false, 1e9, 0, false), 0.0);
/// assert_eq!(acceptance_probability(5, 5, true, true, 10.0, 0, false), 0.5);
/// let p = acceptance_probability(5, 6, true, true, 10.0, 0, false);
/// assert!((p - (-0.1f64).exp()).abs() < 1e-12);
/// ```
pub fn acceptance_probability(
    old_cost: usize,
    new_cost: usize,
    old_feasible: bool,
    new_feasible: bool,
    temperature: f64,
    iteration: usize,
    large: bool,
) -> f64 {
    if new_feasible && (!old_feasible || new_cost < old_cost) {
        return 1.0;
    }
    if !new_feasible {
        return 0.0;
    }
    if new_cost == old_cost {
        return 0.5;
    }

    let delta = old_cost as f64 - new_cost as f64;
    if large && iteration < EARLY_PHASE_ITERATIONS {
        (delta / (temperature * EARLY_PHASE_SCALE)).exp().min(1.0)
    } else {
        (delta / temperature).exp()
    }
}

/// Geometric cooling with stall acceleration and periodic reheating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingSchedule {
    initial_temperature: f64,
    cooling_rate: f64,
    reheat_interval: usize,
    large: bool,
}

impl CoolingSchedule {
    pub fn new(
        initial_temperature: f64,
        cooling_rate: f64,
        reheat_interval: usize,
        large: bool,
    ) -> Self {
        Self {
            initial_temperature,
            cooling_rate,
            reheat_interval,
            large,
        }
    }

    /// Temperature after `iteration`.
    ///
    /// Multiplies by the cooling rate (its square on large instances stalled
    /// for more than 500 iterations). On every `reheat_interval`-th
    /// iteration the result is raised to at least 70% (large) or 50%
    /// (small) of the initial temperature.
    pub fn next(&self, temperature: f64, iteration: usize, last_improvement: usize) -> f64 {
        let stalled = iteration.saturating_sub(last_improvement) > STALL_ITERATIONS;
        let mut next = if self.large && stalled {
            temperature * self.cooling_rate * self.cooling_rate
        } else {
            temperature * self.cooling_rate
        };

        if self.reheat_interval > 0 && iteration.is_multiple_of(self.reheat_interval) {
            let floor = if self.large { 0.7 } else { 0.5 };
            next = next.max(self.initial_temperature * floor);
        }
        next
    }
}
