//! Move representation for the annealing neighborhood.

/// A single edit to the current selection.
///
/// Positions index into the selection vector; subsets are instance indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Drop the member at `position`.
    Remove { position: usize },
    /// Append subset `subset`.
    Add { subset: usize },
    /// Replace the member at `position` with `subset`.
    Swap { position: usize, subset: usize },
    /// No applicable edit (e.g. every subset already selected).
    Stay,
}

impl Move {
    /// Applies the move to `selection`, preserving the order of other members.
    pub fn apply(self, selection: &mut Vec<usize>) {
        match self {
            Move::Remove { position } => {
                selection.remove(position);
            }
            Move::Add { subset } => selection.push(subset),
            Move::Swap { position, subset } => selection[position] = subset,
            Move::Stay => {}
        }
    }
}

/// Probabilities of attempting each move type. They sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveProbabilities {
    pub remove: f64,
    pub add: f64,
    pub swap: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_moves() {
        let mut sel = vec![4, 1, 7];
        Move::Remove { position: 1 }.apply(&mut sel);
        assert_eq!(sel, vec![4, 7]);
        Move::Add { subset: 2 }.apply(&mut sel);
        assert_eq!(sel, vec![4, 7, 2]);
        Move::Swap {
            position: 0,
            subset: 9,
        }
        .apply(&mut sel);
        assert_eq!(sel, vec![9, 7, 2]);
        Move::Stay.apply(&mut sel);
        assert_eq!(sel, vec![9, 7, 2]);
    }
}
