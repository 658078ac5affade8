//! Configuration types for the print client.

use std::time::Duration;

/// Status monitor settings.
///
/// Defaults follow the vendor's monitoring script:
/// - `poll_interval`: 500ms
/// - `timeout`: 15s, measured from dispatch
/// - `ready_polls`: 2 consecutive ready/waiting readings mean the job is done
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Delay between status queries.
    pub poll_interval: Duration,
    /// Wall-clock budget from dispatch until monitoring gives up.
    pub timeout: Duration,
    /// Consecutive Ready/Waiting polls required for completion.
    pub ready_polls: u32,
    /// Non-standard codes to treat as "still printing" instead of an error.
    pub transient_codes: Vec<i32>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            timeout: Duration::from_secs(15),
            ready_polls: 2,
            transient_codes: Vec::new(),
        }
    }
}

impl MonitorConfig {
    /// Default settings with a different poll interval and timeout.
    pub fn with_timing(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
            ..Self::default()
        }
    }
}

/// Retry settings for an unavailable driver.
///
/// Uses exponential backoff with optional jitter. Only errors where
/// `DriverError::is_retryable()` returns `true` are retried.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial attempt).
    pub max_attempts: u32,
    /// Initial delay between retries.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Whether to add random jitter to retry delays.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// `max_attempts` attempts with a fixed, jitter-free starting delay.
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            jitter: false,
            ..Self::default()
        }
    }
}

/// Options for a print call.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Copies to print. Must be at least 1.
    pub copies: u32,
    /// Stop the batch at the first failing copy.
    pub stop_at_error: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            copies: 1,
            stop_at_error: true,
        }
    }
}

impl PrintOptions {
    /// `copies` copies, stopping at the first error.
    pub fn copies(copies: u32) -> Self {
        Self {
            copies,
            ..Self::default()
        }
    }

    /// Whether to stop at the first failing copy.
    pub fn stop_at_error(mut self, stop: bool) -> Self {
        self.stop_at_error = stop;
        self
    }
}
