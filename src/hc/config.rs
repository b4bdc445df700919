//! Hill climbing configuration.

/// Configuration for [`HcRunner`](super::HcRunner).
///
/// # Examples
///
/// ```
/// use u_setcover::hc::HcConfig;
///
/// let config = HcConfig::default().with_seed(3).with_max_scans(50);
/// assert_eq!(config.seed, Some(3));
/// assert_eq!(config.max_scans, 50);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HcConfig {
    /// Random seed for the initial selection (None for random).
    pub seed: Option<u64>,

    /// Maximum number of neighbor scans. 0 = no limit.
    pub max_scans: usize,
}

impl HcConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_scans(mut self, n: usize) -> Self {
        self.max_scans = n;
        self
    }
}
