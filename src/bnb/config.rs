//! Branch-and-bound configuration.

/// Order in which subsets receive their include/exclude decision.
///
/// Ordering only affects how fast good incumbents appear, never the
/// optimal cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubsetOrdering {
    /// Largest subsets first; ties keep index order.
    #[default]
    DescendingSize,
    /// Plain index order.
    Index,
}

/// Configuration for [`BnbRunner`](super::BnbRunner).
///
/// # Examples
///
/// ```
/// use u_setcover::bnb::{BnbConfig, SubsetOrdering};
///
/// let config = BnbConfig::default()
///     .with_memoize(true)
///     .with_max_nodes(1_000_000)
///     .with_max_memo_entries(50_000)
///     .with_ordering(SubsetOrdering::Index);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbConfig {
    /// Prune nodes whose `(frontier, covered)` state was already reached
    /// with no more selected subsets.
    pub memoize: bool,

    /// Maximum number of memo states kept. Once full, states already stored
    /// are still checked and updated but new states are not added.
    pub max_memo_entries: usize,

    /// Maximum nodes to visit (hard budget). 0 = no limit.
    pub max_nodes: usize,

    /// Subset decision order.
    pub ordering: SubsetOrdering,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            memoize: true,
            max_memo_entries: 1_000_000,
            max_nodes: 0,
            ordering: SubsetOrdering::default(),
        }
    }
}

impl BnbConfig {
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn with_max_memo_entries(mut self, n: usize) -> Self {
        self.max_memo_entries = n;
        self
    }

    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = n;
        self
    }

    pub fn with_ordering(mut self, ordering: SubsetOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.memoize && self.max_memo_entries == 0 {
            return Err("max_memo_entries must be > 0 when memoize is enabled".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BnbConfig::default();
        assert!(config.memoize);
        assert_eq!(config.max_nodes, 0);
        assert_eq!(config.ordering, SubsetOrdering::DescendingSize);
        assert_eq!(config.max_memo_entries, 1_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_memo_capacity_rejected() {
        let config = BnbConfig::default().with_max_memo_entries(0);
        assert!(config.validate().is_err());
        assert!(config.with_memoize(false).validate().is_ok());
    }
}
