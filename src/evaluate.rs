//! Solution evaluation: cost and feasibility of a selection.

use crate::instance::ProblemInstance;
use fixedbitset::FixedBitSet;

/// Cost and feasibility of a candidate selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Number of selected subsets.
    pub cost: usize,
    /// Whether the union of the selected subsets equals the universe.
    pub feasible: bool,
}

/// Union of the subsets at `selection`.
pub fn coverage_of(instance: &ProblemInstance, selection: &[usize]) -> FixedBitSet {
    let mut covered = instance.empty_cover();
    for &index in selection {
        covered.union_with(instance.subset(index));
    }
    covered
}

/// Evaluates a selection of subset indices.
///
/// `cost` is the selection length. An empty selection is infeasible unless
/// the universe itself is empty.
///
/// # Examples
///
/// ```
/// use u_setcover::{evaluate, ProblemInstance};
///
/// let instance = ProblemInstance::new(3, vec![vec![1, 2], vec![3]]).unwrap();
/// let eval = evaluate(&instance, &[0, 1]);
/// assert_eq!(eval.cost, 2);
/// assert!(eval.feasible);
/// assert!(!evaluate(&instance, &[0]).feasible);
/// ```
pub fn evaluate(instance: &ProblemInstance, selection: &[usize]) -> Evaluation {
    let covered = coverage_of(instance, selection);
    Evaluation {
        cost: selection.len(),
        feasible: covered.count_ones(..) == instance.universe_size(),
    }
}
