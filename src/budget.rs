//! Wall-clock budget polled by every solver.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A polling cutoff: start instant, allowed duration, optional cancel flag.
///
/// Solvers call [`TimeBudget::expired`] at bounded-cost points and unwind
/// to their last committed incumbent when it returns `true`.
#[derive(Debug, Clone)]
pub struct TimeBudget {
    start: Instant,
    cutoff: Duration,
    cancel: Option<Arc<AtomicBool>>,
}

impl TimeBudget {
    /// Budget of `cutoff` measured from `start`.
    pub fn new(start: Instant, cutoff: Duration) -> Self {
        Self {
            start,
            cutoff,
            cancel: None,
        }
    }

    /// Budget of `cutoff` starting now.
    pub fn starting_now(cutoff: Duration) -> Self {
        Self::new(Instant::now(), cutoff)
    }

    /// Budget from a cutoff in seconds.
    ///
    /// NaN and non-positive values clamp to zero. Values too large for a
    /// `Duration`, including `+inf`, become [`Duration::MAX`].
    pub fn from_secs_f64(start: Instant, cutoff_secs: f64) -> Self {
        let cutoff = if cutoff_secs.is_nan() || cutoff_secs <= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(cutoff_secs).unwrap_or(Duration::MAX)
        };
        Self::new(start, cutoff)
    }

    /// A budget that never expires on its own.
    pub fn unlimited() -> Self {
        Self::new(Instant::now(), Duration::MAX)
    }

    /// Attaches an external cancellation flag.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Instant the budget is measured from.
    #[inline]
    pub fn start(&self) -> Instant {
        self.start
    }

    /// Allowed duration.
    #[inline]
    pub fn cutoff(&self) -> Duration {
        self.cutoff
    }

    /// Time since `start`.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Seconds since `start`.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Whether the cancel flag has been raised.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Whether the cutoff has passed or the run was cancelled.
    #[inline]
    pub fn expired(&self) -> bool {
        self.is_cancelled() || self.elapsed() >= self.cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_cutoff_is_expired() {
        let budget = TimeBudget::starting_now(Duration::ZERO);
        assert!(budget.expired());
        assert!(!budget.is_cancelled());
    }

    #[test]
    fn test_unlimited_not_expired() {
        assert!(!TimeBudget::unlimited().expired());
    }

    #[test]
    fn test_cancel_flag_expires() {
        let flag = Arc::new(AtomicBool::new(false));
        let budget = TimeBudget::unlimited().with_cancel(flag.clone());
        assert!(!budget.expired());
        flag.store(true, Ordering::Relaxed);
        assert!(budget.expired());
        assert!(budget.is_cancelled());
    }

    #[test]
    fn test_from_secs_clamps_negative() {
        let budget = TimeBudget::from_secs_f64(Instant::now(), -3.0);
        assert_eq!(budget.cutoff(), Duration::ZERO);
        let budget = TimeBudget::from_secs_f64(Instant::now(), 1.5);
        assert_eq!(budget.cutoff(), Duration::from_millis(1500));
    }

    #[test]
    fn test_from_secs_nan_is_zero() {
        let budget = TimeBudget::from_secs_f64(Instant::now(), f64::NAN);
        assert_eq!(budget.cutoff(), Duration::ZERO);
        assert!(budget.expired());
    }

    #[test]
    fn test_from_secs_huge_saturates() {
        let budget = TimeBudget::from_secs_f64(Instant::now(), 1e20);
        assert_eq!(budget.cutoff(), Duration::MAX);
        assert!(!budget.expired());
    }

    #[test]
    fn test_from_secs_infinity_never_expires() {
        let budget = TimeBudget::from_secs_f64(Instant::now(), f64::INFINITY);
        assert_eq!(budget.cutoff(), Duration::MAX);
        assert!(!budget.expired());
    }
}
