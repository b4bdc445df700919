//! Search state for branch-and-bound.

use fixedbitset::FixedBitSet;

/// One pending search-tree node.
///
/// `frontier` is the position in the decision order of the next subset to
/// decide. Each node owns its coverage and selection; children get copies.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    pub frontier: usize,
    pub covered: FixedBitSet,
    pub selected: Vec<usize>,
}

impl SearchNode {
    pub fn root(universe_size: usize) -> Self {
        Self {
            frontier: 0,
            covered: FixedBitSet::with_capacity(universe_size),
            selected: Vec::new(),
        }
    }
}

/// Counters collected during a branch-and-bound run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbStats {
    /// Nodes popped and processed.
    pub nodes_explored: usize,
    /// Nodes cut by the lower bound or by an unreachable remainder.
    pub pruned_by_bound: usize,
    /// Nodes cut because an equivalent state was seen with fewer subsets.
    pub pruned_by_memo: usize,
    /// Include branches skipped because the subset added nothing new.
    pub pruned_dominated: usize,
    /// Leaves reached with every subset decided and coverage incomplete.
    pub dead_ends: usize,
    /// Covers found at accepting nodes or by greedy completion.
    pub solutions_found: usize,
    /// Deepest frontier reached.
    pub max_depth: usize,
    /// States held in the memo when the search stopped.
    pub memo_entries: usize,
}
