//! Process-wide request quota
//!
//! Every outbound API call passes through [`RateLimiter::acquire`] first. The
//! limiter enforces a per-second cap over a one-second window and a larger
//! period cap tracked as a running counter for the life of the process.

use crate::config::RateLimitSettings;
use crate::error::{SearchError, ToolResult};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Length of the per-second quota window
const WINDOW: Duration = Duration::from_secs(1);

/// Source of time for window tracking
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Monotonic clock backed by [`Instant::now`]
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Counter state guarded by the limiter's lock
#[derive(Debug, Clone)]
pub struct RateBudget {
    pub per_second_limit: u64,
    pub per_period_limit: u64,
    pub second_count: u64,
    pub period_count: u64,
    pub window_start: Instant,
}

impl RateBudget {
    fn new(per_second_limit: u64, per_period_limit: u64, now: Instant) -> Self {
        Self {
            per_second_limit,
            per_period_limit,
            second_count: 0,
            period_count: 0,
            window_start: now,
        }
    }
}

/// Snapshot of the limiter counters for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateUsage {
    pub per_second_limit: u64,
    pub per_period_limit: u64,
    pub second_count: u64,
    pub period_count: u64,
}

/// Shared quota gate, cheap to clone
#[derive(Clone)]
pub struct RateLimiter {
    budget: Arc<Mutex<RateBudget>>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Create a limiter using the monotonic clock
    pub fn new(per_second_limit: u64, per_period_limit: u64) -> Self {
        Self::with_clock(per_second_limit, per_period_limit, Arc::new(MonotonicClock))
    }

    /// Create a limiter from settings
    pub fn from_settings(settings: &RateLimitSettings) -> Self {
        Self::new(settings.per_second, settings.per_period)
    }

    /// Create a limiter with a custom time source
    pub fn with_clock(per_second_limit: u64, per_period_limit: u64, clock: Arc<dyn Clock>) -> Self {
        let budget = RateBudget::new(per_second_limit, per_period_limit, clock.now());
        Self {
            budget: Arc::new(Mutex::new(budget)),
            clock,
        }
    }

    /// Take one unit of quota or fail with [`SearchError::RateLimitExceeded`].
    ///
    /// The window check and the counter update happen under one lock, so two
    /// concurrent callers never both take the last unit.
    pub fn acquire(&self) -> ToolResult<()> {
        let now = self.clock.now();
        let mut budget = self.budget.lock().unwrap_or_else(|e| e.into_inner());

        if now.saturating_duration_since(budget.window_start) > WINDOW {
            budget.second_count = 0;
            budget.window_start = now;
        }

        if budget.second_count >= budget.per_second_limit {
            warn!(limit = budget.per_second_limit, "Per-second rate limit reached");
            return Err(SearchError::RateLimitExceeded {
                window: "per-second",
                limit: budget.per_second_limit,
            });
        }
        if budget.period_count >= budget.per_period_limit {
            warn!(limit = budget.per_period_limit, "Period rate limit reached");
            return Err(SearchError::RateLimitExceeded {
                window: "per-period",
                limit: budget.per_period_limit,
            });
        }

        budget.second_count += 1;
        budget.period_count += 1;
        debug!(
            second = budget.second_count,
            period = budget.period_count,
            "Rate limit slot acquired"
        );
        Ok(())
    }

    /// Current counter values
    pub fn usage(&self) -> RateUsage {
        let budget = self.budget.lock().unwrap_or_else(|e| e.into_inner());
        RateUsage {
            per_second_limit: budget.per_second_limit,
            per_period_limit: budget.per_period_limit,
            second_count: budget.second_count,
            period_count: budget.period_count,
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::from_settings(&RateLimitSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    /// Clock that only moves when told to
    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(Instant::now()),
            })
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    #[test]
    fn test_third_call_without_delay_fails() {
        let clock = ManualClock::new();
        let limiter = RateLimiter::with_clock(1, 2, clock.clone());

        assert!(limiter.acquire().is_ok());
        assert!(matches!(
            limiter.acquire(),
            Err(SearchError::RateLimitExceeded { .. })
        ));
        assert!(matches!(
            limiter.acquire(),
            Err(SearchError::RateLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_window_rollover_allows_calls_up_to_period_limit() {
        let clock = ManualClock::new();
        let limiter = RateLimiter::with_clock(1, 2, clock.clone());

        assert!(limiter.acquire().is_ok());
        clock.advance(Duration::from_millis(1100));
        assert!(limiter.acquire().is_ok());

        clock.advance(Duration::from_millis(1100));
        match limiter.acquire() {
            Err(SearchError::RateLimitExceeded { window, limit }) => {
                assert_eq!(window, "per-period");
                assert_eq!(limit, 2);
            }
            other => panic!("expected period exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_window_needs_more_than_one_second() {
        let clock = ManualClock::new();
        let limiter = RateLimiter::with_clock(1, 100, clock.clone());

        assert!(limiter.acquire().is_ok());
        clock.advance(Duration::from_secs(1));
        assert!(limiter.acquire().is_err());
        clock.advance(Duration::from_millis(1));
        assert!(limiter.acquire().is_ok());
    }

    #[test]
    fn test_rejection_does_not_consume_quota() {
        let clock = ManualClock::new();
        let limiter = RateLimiter::with_clock(1, 10, clock.clone());

        limiter.acquire().unwrap();
        for _ in 0..5 {
            assert!(limiter.acquire().is_err());
        }
        let usage = limiter.usage();
        assert_eq!(usage.second_count, 1);
        assert_eq!(usage.period_count, 1);
    }

    #[test]
    fn test_clones_share_counters() {
        let limiter = RateLimiter::new(5, 100);
        let other = limiter.clone();

        limiter.acquire().unwrap();
        other.acquire().unwrap();

        assert_eq!(limiter.usage().period_count, 2);
    }

    #[test]
    fn test_concurrent_acquire_never_overspends() {
        let limiter = RateLimiter::new(1_000, 5);

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let limiter = limiter.clone();
                thread::spawn(move || limiter.acquire().is_ok())
            })
            .collect();

        let granted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(granted, 5);
        assert_eq!(limiter.usage().period_count, 5);
    }
}
