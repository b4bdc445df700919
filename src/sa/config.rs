//! SA configuration.

/// Configuration for the set cover Simulated Annealing solver.
///
/// Size-dependent defaults (`cooling_rate`, `max_no_improve`) are left as
/// `None` and resolved per instance: an instance is large when its universe
/// or subset count exceeds `large_instance_threshold`.
///
/// # Examples
///
/// ```
/// use u_setcover::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(50.0)
///     .with_min_temperature(0.01)
///     .with_cooling_rate(0.97)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.cooling_rate_for(true), 0.97);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Also the reference for reheating.
    pub initial_temperature: f64,

    /// Minimum temperature. The algorithm stops when T drops to this.
    pub min_temperature: f64,

    /// Geometric cooling factor in (0, 1). `None` = 0.95 small / 0.98 large.
    pub cooling_rate: Option<f64>,

    /// Reheat every this many iterations.
    pub reheat_interval: usize,

    /// Size above which an instance counts as large.
    pub large_instance_threshold: usize,

    /// Stop after this many iterations without improvement.
    /// `None` = 2000 small / 5000 large.
    pub max_no_improve: Option<usize>,

    /// Maximum total iterations (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 0.1,
            cooling_rate: None,
            reheat_interval: 1000,
            large_instance_threshold: 100,
            max_no_improve: None,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = Some(rate);
        self
    }

    pub fn with_reheat_interval(mut self, n: usize) -> Self {
        self.reheat_interval = n;
        self
    }

    pub fn with_large_instance_threshold(mut self, n: usize) -> Self {
        self.large_instance_threshold = n;
        self
    }

    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = Some(n);
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cooling factor in effect for an instance of the given size class.
    pub fn cooling_rate_for(&self, large: bool) -> f64 {
        self.cooling_rate
            .unwrap_or(if large { 0.98 } else { 0.95 })
    }

    /// Stagnation bound in effect for an instance of the given size class.
    pub fn max_no_improve_for(&self, large: bool) -> usize {
        self.max_no_improve
            .unwrap_or(if large { 5000 } else { 2000 })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature > 0.0) {
            return Err("initial_temperature must be positive".into());
        }
        if !(self.min_temperature > 0.0) {
            return Err("min_temperature must be positive".into());
        }
        if self.min_temperature >= self.initial_temperature {
            return Err("min_temperature must be less than initial_temperature".into());
        }
        if let Some(rate) = self.cooling_rate {
            if !(rate > 0.0 && rate < 1.0) {
                return Err(format!("cooling_rate must be in (0, 1), got {rate}"));
            }
        }
        if self.reheat_interval == 0 {
            return Err("reheat_interval must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert!((config.min_temperature - 0.1).abs() < 1e-12);
        assert_eq!(config.reheat_interval, 1000);
        assert_eq!(config.cooling_rate_for(false), 0.95);
        assert_eq!(config.cooling_rate_for(true), 0.98);
        assert_eq!(config.max_no_improve_for(false), 2000);
        assert_eq!(config.max_no_improve_for(true), 5000);
    }

    #[test]
    fn test_validate_ok() {
        assert!(SaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
        let config = SaConfig::default().with_initial_temperature(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        let config = SaConfig::default().with_cooling_rate(1.5);
        assert!(config.validate().is_err());
        let config = SaConfig::default().with_cooling_rate(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_reheat_interval() {
        let config = SaConfig::default().with_reheat_interval(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_overrides_win() {
        let config = SaConfig::default()
            .with_cooling_rate(0.9)
            .with_max_no_improve(10);
        assert_eq!(config.cooling_rate_for(true), 0.9);
        assert_eq!(config.max_no_improve_for(false), 10);
    }
}
