//! Anytime trace of best-found cost over elapsed time.

/// One `(elapsed, best cost)` observation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Checkpoint {
    /// Seconds since the solve started.
    pub elapsed_secs: f64,
    /// Best feasible cost known at that time.
    pub cost: usize,
}

/// Append-only record of strict improvements.
///
/// Times never decrease and costs strictly decrease from one checkpoint to
/// the next. [`Trace::record`] silently drops an observation that would
/// break either rule, so callers can report every incumbent update.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    checkpoints: Vec<Checkpoint>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `cost` at `elapsed_secs` if it improves on the last checkpoint.
    ///
    /// Returns whether a checkpoint was appended. A timestamp earlier than
    /// the previous one is raised to it.
    pub fn record(&mut self, elapsed_secs: f64, cost: usize) -> bool {
        match self.checkpoints.last() {
            Some(last) if cost >= last.cost => false,
            Some(last) => {
                let elapsed_secs = elapsed_secs.max(last.elapsed_secs);
                self.checkpoints.push(Checkpoint { elapsed_secs, cost });
                true
            }
            None => {
                self.checkpoints.push(Checkpoint {
                    elapsed_secs: elapsed_secs.max(0.0),
                    cost,
                });
                true
            }
        }
    }

    /// All checkpoints in time order.
    #[inline]
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Best cost recorded so far.
    #[inline]
    pub fn last_cost(&self) -> Option<usize> {
        self.checkpoints.last().map(|c| c.cost)
    }

    /// Costs in recording order, without timestamps.
    pub fn costs(&self) -> Vec<usize> {
        self.checkpoints.iter().map(|c| c.cost).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }
}
