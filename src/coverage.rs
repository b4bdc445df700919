//! Per-element cover multiplicities for a selection.
//!
//! Local search moves ask "which elements are uncovered", "can this member
//! be dropped" and "how much does this member cover alone". [`CoverCounts`]
//! answers all three from one pass over the selection.

use crate::instance::ProblemInstance;
use fixedbitset::FixedBitSet;

/// How many selected subsets cover each universe element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverCounts {
    counts: Vec<u32>,
    covered: usize,
}

impl CoverCounts {
    /// All-zero counts for the instance's universe.
    pub fn new(instance: &ProblemInstance) -> Self {
        Self {
            counts: vec![0; instance.universe_size()],
            covered: 0,
        }
    }

    /// Counts for an existing selection.
    pub fn from_selection(instance: &ProblemInstance, selection: &[usize]) -> Self {
        let mut counts = Self::new(instance);
        for &index in selection {
            counts.add(instance, index);
        }
        counts
    }

    /// Records subset `index` as selected.
    pub fn add(&mut self, instance: &ProblemInstance, index: usize) {
        for bit in instance.subset(index).ones() {
            if self.counts[bit] == 0 {
                self.covered += 1;
            }
            self.counts[bit] += 1;
        }
    }

    /// Records subset `index` as deselected. It must have been added before.
    pub fn remove(&mut self, instance: &ProblemInstance, index: usize) {
        for bit in instance.subset(index).ones() {
            debug_assert!(self.counts[bit] > 0, "removing a subset that was not added");
            self.counts[bit] -= 1;
            if self.counts[bit] == 0 {
                self.covered -= 1;
            }
        }
    }

    /// Number of universe elements covered at least once.
    #[inline]
    pub fn covered(&self) -> usize {
        self.covered
    }

    /// Whether every universe element is covered.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.covered == self.counts.len()
    }

    /// Bitset of elements with zero cover.
    pub fn uncovered(&self) -> FixedBitSet {
        let mut bits = FixedBitSet::with_capacity(self.counts.len());
        for (bit, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                bits.insert(bit);
            }
        }
        bits
    }

    /// Elements of selected subset `index` that no other selected subset covers.
    pub fn unique_coverage(&self, instance: &ProblemInstance, index: usize) -> usize {
        instance
            .subset(index)
            .ones()
            .filter(|&bit| self.counts[bit] == 1)
            .count()
    }

    /// Whether dropping selected subset `index` keeps the universe covered.
    pub fn is_redundant(&self, instance: &ProblemInstance, index: usize) -> bool {
        self.is_complete() && instance.subset(index).ones().all(|bit| self.counts[bit] >= 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> ProblemInstance {
        ProblemInstance::new(5, vec![vec![1, 2, 3], vec![2, 4], vec![3, 4, 5], vec![1, 5]])
            .unwrap()
    }

    #[test]
    fn test_add_remove_tracks_cover() {
        let inst = instance();
        let mut counts = CoverCounts::new(&inst);
        counts.add(&inst, 0);
        assert_eq!(counts.covered(), 3);
        counts.add(&inst, 2);
        assert!(counts.is_complete());
        counts.remove(&inst, 0);
        assert_eq!(counts.covered(), 3);
        assert_eq!(counts.uncovered().ones().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_redundancy_and_uniqueness() {
        let inst = instance();
        // {S0, S2, S3}: S3 = {1,5} is covered by S0 and S2.
        let counts = CoverCounts::from_selection(&inst, &[0, 2, 3]);
        assert!(counts.is_redundant(&inst, 3));
        assert!(!counts.is_redundant(&inst, 0));
        assert_eq!(counts.unique_coverage(&inst, 3), 0);
        assert_eq!(counts.unique_coverage(&inst, 0), 1); // element 2
        assert_eq!(counts.unique_coverage(&inst, 2), 1); // element 4
    }

    #[test]
    fn test_redundant_requires_complete_cover() {
        let inst = instance();
        let counts = CoverCounts::from_selection(&inst, &[1, 1]);
        assert!(!counts.is_redundant(&inst, 1));
    }
}
