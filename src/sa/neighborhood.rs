//! Adaptive remove / add / swap neighborhood.

use super::types::{Move, MoveProbabilities};
use crate::coverage::CoverCounts;
use crate::instance::ProblemInstance;
use fixedbitset::FixedBitSet;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Prefer a redundant member over an arbitrary one in remove moves.
const REDUNDANT_REMOVE_BIAS: f64 = 0.7;
/// Target uncovered elements in add moves.
const TARGETED_ADD_BIAS: f64 = 0.8;
/// Swap out the least uniquely-covering member on large instances.
const LEAST_UNIQUE_SWAP_BIAS: f64 = 0.7;
/// Solution length above which large instances favor removal.
const LARGE_SOLUTION_LEN: usize = 20;
/// Early iterations during which small instances favor addition.
const EARLY_ITERATIONS: usize = 100;

/// Move-type probabilities for the current search state.
///
/// # Examples
///
/// ```
/// use u_setcover::sa::move_probabilities;
///
/// let p = move_probabilities(0, 30, true);
/// assert_eq!((p.remove, p.add, p.swap), (0.6, 0.2, 0.2));
/// let p = move_probabilities(50, 5, false);
/// assert_eq!((p.remove, p.add, p.swap), (0.3, 0.5, 0.2));
/// ```
pub fn move_probabilities(iteration: usize, solution_len: usize, large: bool) -> MoveProbabilities {
    let (remove, add, swap) = if large {
        if solution_len > LARGE_SOLUTION_LEN {
            (0.6, 0.2, 0.2)
        } else {
            (0.4, 0.4, 0.2)
        }
    } else if iteration < EARLY_ITERATIONS {
        (0.3, 0.5, 0.2)
    } else {
        (0.4, 0.4, 0.2)
    };
    MoveProbabilities { remove, add, swap }
}

/// Neighbor generator bound to one instance.
pub(crate) struct Neighborhood<'a> {
    instance: &'a ProblemInstance,
    large: bool,
}

impl<'a> Neighborhood<'a> {
    pub fn new(instance: &'a ProblemInstance, large: bool) -> Self {
        Self { instance, large }
    }

    /// Proposes one move from `current`.
    pub fn propose<R: Rng>(&self, current: &[usize], iteration: usize, rng: &mut R) -> Move {
        let probs = move_probabilities(iteration, current.len(), self.large);
        let draw: f64 = rng.random();

        if draw < probs.remove && !current.is_empty() {
            self.remove_move(current, rng)
        } else if draw < probs.remove + probs.add {
            self.add_move(current, rng)
        } else {
            self.swap_move(current, rng)
        }
    }

    fn remove_move<R: Rng>(&self, current: &[usize], rng: &mut R) -> Move {
        let counts = CoverCounts::from_selection(self.instance, current);
        let redundant: Vec<usize> = (0..current.len())
            .filter(|&pos| counts.is_redundant(self.instance, current[pos]))
            .collect();

        let prefer_redundant =
            !redundant.is_empty() && rng.random::<f64>() < REDUNDANT_REMOVE_BIAS;
        let position = if prefer_redundant {
            redundant[rng.random_range(0..redundant.len())]
        } else {
            rng.random_range(0..current.len())
        };

        Move::Remove { position }
    }

    fn add_move<R: Rng>(&self, current: &[usize], rng: &mut R) -> Move {
        let counts = CoverCounts::from_selection(self.instance, current);
        let uncovered = counts.uncovered();
        let selected = self.membership(current);

        if uncovered.count_ones(..) > 0 && rng.random::<f64>() < TARGETED_ADD_BIAS {
            if let Some(subset) = self.weighted_helpful(&selected, &uncovered, rng) {
                return Move::Add { subset };
            }
        }

        match self.unused(&selected).choose(rng) {
            Some(&subset) => Move::Add { subset },
            None => Move::Stay,
        }
    }

    fn swap_move<R: Rng>(&self, current: &[usize], rng: &mut R) -> Move {
        if current.is_empty() {
            return Move::Stay;
        }
        let selected = self.membership(current);
        let available = self.unused(&selected);
        if available.is_empty() {
            return Move::Stay;
        }

        let mut counts = CoverCounts::from_selection(self.instance, current);
        let position = if self.large && rng.random::<f64>() < LEAST_UNIQUE_SWAP_BIAS {
            // First member with the smallest unique contribution.
            (0..current.len())
                .min_by_key(|&pos| counts.unique_coverage(self.instance, current[pos]))
                .unwrap_or(0)
        } else {
            rng.random_range(0..current.len())
        };

        counts.remove(self.instance, current[position]);
        let uncovered = counts.uncovered();
        if let Some(subset) = self.weighted_helpful(&selected, &uncovered, rng) {
            return Move::Swap { position, subset };
        }

        match available.choose(rng) {
            Some(&subset) => Move::Swap { position, subset },
            None => Move::Stay,
        }
    }

    /// Samples an unused subset weighted by how many `uncovered` elements it
    /// adds, among the top-scoring fifth (at least 3) of helpful candidates.
    fn weighted_helpful<R: Rng>(
        &self,
        selected: &FixedBitSet,
        uncovered: &FixedBitSet,
        rng: &mut R,
    ) -> Option<usize> {
        let mut helpful: Vec<(usize, usize)> = (0..self.instance.subset_count())
            .filter(|&i| !selected.contains(i))
            .filter_map(|i| {
                let gain = self.instance.subset(i).intersection_count(uncovered);
                (gain > 0).then_some((i, gain))
            })
            .collect();
        if helpful.is_empty() {
            return None;
        }

        // stable: equal scores keep index order
        helpful.sort_by_key(|&(_, gain)| std::cmp::Reverse(gain));
        let top = (helpful.len() / 5).max(3).min(helpful.len());
        helpful[..top]
            .choose_weighted(rng, |&(_, gain)| gain)
            .ok()
            .map(|&(i, _)| i)
    }

    fn membership(&self, current: &[usize]) -> FixedBitSet {
        let mut selected = FixedBitSet::with_capacity(self.instance.subset_count());
        for &i in current {
            selected.insert(i);
        }
        selected
    }

    fn unused(&self, selected: &FixedBitSet) -> Vec<usize> {
        (0..self.instance.subset_count())
            .filter(|&i| !selected.contains(i))
            .collect()
    }
}
