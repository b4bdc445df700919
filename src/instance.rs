//! Problem instance: universe and candidate subsets.
//!
//! Elements are labeled `1..=n` externally. Internally each subset is a
//! [`FixedBitSet`] of length `n` where bit `e - 1` stands for element `e`.

use crate::error::{Result, SetCoverError};
use fixedbitset::FixedBitSet;

/// An immutable Minimum Set Cover instance.
///
/// Holds the universe size `n` and the ordered list of `m` candidate
/// subsets. Subset identity is its position in that list (0-based).
/// Empty subsets are allowed; they never contribute coverage.
///
/// # Examples
///
/// ```
/// use u_setcover::ProblemInstance;
///
/// let instance = ProblemInstance::new(5, vec![
///     vec![1, 2, 3],
///     vec![2, 4],
///     vec![3, 4, 5],
///     vec![1, 5],
/// ]).unwrap();
/// assert_eq!(instance.universe_size(), 5);
/// assert_eq!(instance.subset_count(), 4);
/// assert!(instance.check_feasible().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemInstance {
    universe_size: usize,
    subsets: Vec<FixedBitSet>,
}

impl ProblemInstance {
    /// Builds an instance from 1-based element lists.
    ///
    /// Duplicate elements within a subset are collapsed. Returns
    /// [`SetCoverError::InvalidInstance`] when an element lies outside `1..=n`.
    pub fn new(universe_size: usize, subsets: Vec<Vec<usize>>) -> Result<Self> {
        let mut sets = Vec::with_capacity(subsets.len());
        for (index, members) in subsets.into_iter().enumerate() {
            let mut bits = FixedBitSet::with_capacity(universe_size);
            for element in members {
                if element == 0 || element > universe_size {
                    return Err(SetCoverError::InvalidInstance(format!(
                        "subset {} contains element {element} outside 1..={universe_size}",
                        index + 1
                    )));
                }
                bits.insert(element - 1);
            }
            sets.push(bits);
        }
        Ok(Self {
            universe_size,
            subsets: sets,
        })
    }

    /// Number of universe elements `n`.
    #[inline]
    pub fn universe_size(&self) -> usize {
        self.universe_size
    }

    /// Number of candidate subsets `m`.
    #[inline]
    pub fn subset_count(&self) -> usize {
        self.subsets.len()
    }

    /// Bitset view of subset `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= subset_count()`.
    #[inline]
    pub fn subset(&self, index: usize) -> &FixedBitSet {
        &self.subsets[index]
    }

    /// All subsets in index order.
    #[inline]
    pub fn subsets(&self) -> &[FixedBitSet] {
        &self.subsets
    }

    /// Cardinality of subset `index`.
    #[inline]
    pub fn subset_len(&self, index: usize) -> usize {
        self.subsets[index].count_ones(..)
    }

    /// 1-based members of subset `index`, ascending.
    pub fn members(&self, index: usize) -> Vec<usize> {
        self.subsets[index].ones().map(|bit| bit + 1).collect()
    }

    /// A bitset with every universe element set.
    pub fn universe(&self) -> FixedBitSet {
        let mut all = FixedBitSet::with_capacity(self.universe_size);
        all.insert_range(..);
        all
    }

    /// An empty coverage bitset sized to the universe.
    #[inline]
    pub fn empty_cover(&self) -> FixedBitSet {
        FixedBitSet::with_capacity(self.universe_size)
    }

    /// Whether the instance counts as "large" for size-adaptive heuristics.
    ///
    /// Large means `n > threshold` or `m > threshold`.
    #[inline]
    pub fn is_large(&self, threshold: usize) -> bool {
        self.universe_size > threshold || self.subsets.len() > threshold
    }

    /// 1-based elements that no subset contains.
    pub fn uncoverable_elements(&self) -> Vec<usize> {
        let mut reachable = self.empty_cover();
        for subset in &self.subsets {
            reachable.union_with(subset);
        }
        reachable.toggle_range(..);
        reachable.ones().map(|bit| bit + 1).collect()
    }

    /// Shared up-front feasibility check run by every solver.
    ///
    /// Fails with [`SetCoverError::InfeasibleInstance`] listing the elements
    /// no subset can cover.
    pub fn check_feasible(&self) -> Result<()> {
        let uncovered = self.uncoverable_elements();
        if uncovered.is_empty() {
            Ok(())
        } else {
            Err(SetCoverError::InfeasibleInstance { uncovered })
        }
    }
}
