//! Greedy covering primitives.

use crate::instance::ProblemInstance;
use fixedbitset::FixedBitSet;

/// Subsets a greedy pass added to reach full coverage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Completion {
    /// Chosen subset indices in pick order.
    pub picks: Vec<usize>,
    /// Newly covered elements of the first pick: the largest gain any
    /// candidate offered at the start. Zero when nothing was left to cover.
    pub first_gain: usize,
}

/// Max-coverage greedy over `candidates`, starting from `covered`.
///
/// Ties go to the candidate appearing first in `candidates`. Returns `None`
/// when the candidates cannot cover the remaining elements.
pub(crate) fn complete_cover(
    instance: &ProblemInstance,
    candidates: &[usize],
    covered: &FixedBitSet,
) -> Option<Completion> {
    let mut remaining = instance.universe();
    remaining.difference_with(covered);
    let mut left = remaining.count_ones(..);

    let mut used = vec![false; candidates.len()];
    let mut picks = Vec::new();
    let mut first_gain = 0;

    while left > 0 {
        let mut best: Option<(usize, usize)> = None;
        for (pos, &index) in candidates.iter().enumerate() {
            if used[pos] {
                continue;
            }
            let gain = instance.subset(index).intersection_count(&remaining);
            if gain > best.map_or(0, |(_, g)| g) {
                best = Some((pos, gain));
            }
        }

        let (pos, gain) = best?;
        if picks.is_empty() {
            first_gain = gain;
        }
        used[pos] = true;
        picks.push(candidates[pos]);
        remaining.difference_with(instance.subset(candidates[pos]));
        left -= gain;
    }

    Some(Completion { picks, first_gain })
}

/// Efficiency-ranked greedy from scratch over all subsets.
///
/// Each round picks the subset with the highest ratio of newly covered
/// elements to subset size, then the most newly covered elements, then the
/// lowest index. Scores are recomputed after every pick.
pub(crate) fn efficiency_cover(instance: &ProblemInstance) -> Option<Vec<usize>> {
    let mut remaining = instance.universe();
    let mut left = remaining.count_ones(..);
    let mut chosen = vec![false; instance.subset_count()];
    let mut picks = Vec::new();

    while left > 0 {
        // (index, gain, size)
        let mut best: Option<(usize, usize, usize)> = None;
        for index in 0..instance.subset_count() {
            if chosen[index] {
                continue;
            }
            let gain = instance.subset(index).intersection_count(&remaining);
            if gain == 0 {
                continue;
            }
            let size = instance.subset_len(index);
            let better = match best {
                None => true,
                Some((_, best_gain, best_size)) => {
                    // gain / size vs best_gain / best_size without floats
                    let lhs = gain * best_size;
                    let rhs = best_gain * size;
                    lhs > rhs || (lhs == rhs && gain > best_gain)
                }
            };
            if better {
                best = Some((index, gain, size));
            }
        }

        let (index, gain, _) = best?;
        chosen[index] = true;
        picks.push(index);
        remaining.difference_with(instance.subset(index));
        left -= gain;
    }

    Some(picks)
}
