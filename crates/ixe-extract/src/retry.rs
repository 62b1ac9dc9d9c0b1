//! Attempt budget and backoff between query attempts

use crate::error::{ExtractError, ExtractResult};
use ixe_core::ConnectionParameters;
use rand::Rng;
use std::time::Duration;

/// Largest backoff exponent; keeps the delay representable as a `Duration`
const MAX_EXPONENT: u32 = 62;

/// Upper bound for jitter at nanosecond resolution, so it stays below one second
const MAX_JITTER: f64 = 0.999_999_999;

/// How many times a query may be attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RetryPolicy {
    /// Allow `retries` retries after the first attempt
    pub fn new(retries: u32) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
        }
    }

    /// Read `retries` from the connection parameters.
    ///
    /// A value that is not a non-negative integer is a configuration error.
    pub fn from_params(params: &ConnectionParameters) -> ExtractResult<Self> {
        let retries = params
            .retries()
            .map_err(|e| ExtractError::Configuration(e.to_string()))?;
        Ok(Self::new(retries))
    }

    /// Total attempts allowed (`retries + 1`)
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether another attempt may follow `attempts_made` failed ones
    pub fn allows_another(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }

    /// Delay after the failed attempt with 0-based index `attempt`
    pub fn backoff(&self, attempt: u32) -> Duration {
        backoff_delay(attempt, rand::rng().random::<f64>())
    }
}

/// `2^attempt` seconds plus `jitter` seconds, jitter clamped to `[0, 1)`
pub fn backoff_delay(attempt: u32, jitter: f64) -> Duration {
    let base = 2f64.powi(attempt.min(MAX_EXPONENT) as i32);
    let jitter = if jitter.is_finite() {
        jitter.clamp(0.0, MAX_JITTER)
    } else {
        0.0
    };
    Duration::from_secs_f64(base + jitter)
}

/// Waits out a backoff delay.
pub trait Pause {
    fn pause(&mut self, delay: Duration);
}

/// Blocks the current thread for the delay
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleep;

impl Pause for ThreadSleep {
    fn pause(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}
