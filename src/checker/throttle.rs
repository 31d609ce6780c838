use crate::config::ThrottleConfig;
use rand::Rng;
use std::time::Duration;

/// Randomized delay applied before each network call
///
/// The delay is `min_delay` plus a uniformly random share of `jitter`,
/// so requests against the same host never arrive in a tight burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    min_delay: Duration,
    jitter: Duration,
}

impl Throttle {
    pub fn new(min_delay: Duration, jitter: Duration) -> Self {
        Self { min_delay, jitter }
    }

    pub fn from_config(config: &ThrottleConfig) -> Self {
        Self::new(
            Duration::from_millis(config.min_delay_ms),
            Duration::from_millis(config.jitter_ms),
        )
    }

    /// A throttle that never sleeps
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Picks the next delay in `[min_delay, min_delay + jitter)`
    pub fn next_delay(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.min_delay;
        }
        let share: f64 = rand::rng().random();
        self.min_delay + self.jitter.mul_f64(share)
    }

    /// Sleeps for the next delay
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::from_config(&ThrottleConfig::default())
    }
}
