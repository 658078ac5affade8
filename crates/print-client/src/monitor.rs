//! Polling device status after dispatch until the job settles.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;
use zmlabel_core::PrinterConfig;

use crate::config::MonitorConfig;
use crate::driver::LabelDriver;
use crate::error::PrintError;
use crate::status::{DeviceStatus, StatusBucket};

/// Cooperative cancellation for a running monitor.
///
/// Clones share one flag; the monitor checks it between polls.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the monitor to stop before its next poll.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether [`cancel`](CancelToken::cancel) was called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// How monitoring ended.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MonitorOutcome {
    /// The device reported Ready/Waiting on enough consecutive polls.
    Completed {
        /// The last reading.
        status: DeviceStatus,
    },
    /// The device reported an error status.
    Failed {
        /// The error reading.
        status: DeviceStatus,
    },
    /// The time budget ran out first.
    TimedOut {
        /// The last reading, if any poll happened.
        last: Option<DeviceStatus>,
    },
    /// The caller cancelled.
    Cancelled,
}

impl MonitorOutcome {
    /// `true` only for [`MonitorOutcome::Completed`].
    pub fn is_completed(&self) -> bool {
        matches!(self, MonitorOutcome::Completed { .. })
    }
}

/// Summary of one monitoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorReport {
    /// How it ended.
    pub outcome: MonitorOutcome,
    /// Status queries made.
    pub polls: u32,
    /// Bucket of the last reading.
    pub bucket: StatusBucket,
}

/// Status monitor for one printer.
#[derive(Debug, Clone)]
pub struct StatusMonitor {
    config: MonitorConfig,
    cancel: CancelToken,
}

impl StatusMonitor {
    /// Monitor with its own cancellation token.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Share `cancel` with the caller.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that cancels this monitor.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Poll until completion, an error status, timeout, or cancellation.
    ///
    /// The timeout counts from `dispatched_at`, not from this call. A driver
    /// that cannot answer a status query ends monitoring with an error.
    pub fn run<D: LabelDriver>(
        &self,
        driver: &mut D,
        printer: &PrinterConfig,
        dispatched_at: Instant,
    ) -> Result<MonitorReport, PrintError> {
        let mut bucket = StatusBucket::Unknown;
        let mut last: Option<DeviceStatus> = None;
        let mut ready_streak = 0u32;
        let mut polls = 0u32;
        let deadline = dispatched_at
            .checked_add(self.config.timeout)
            .unwrap_or_else(|| dispatched_at + Duration::from_secs(86400));

        let outcome = loop {
            if self.cancel.is_cancelled() {
                tracing::info!(polls, "status monitoring cancelled");
                break MonitorOutcome::Cancelled;
            }
            if Instant::now() >= deadline {
                tracing::warn!(polls, timeout = ?self.config.timeout, "status monitoring timed out");
                break MonitorOutcome::TimedOut { last };
            }

            let status = driver.query_status(printer)?;
            polls += 1;
            let next = StatusBucket::classify(status.code, &self.config.transient_codes);
            if last.as_ref().is_none_or(|prev| prev.code != status.code) {
                tracing::info!(code = status.code, message = %status.message, from = %bucket, to = %next, "status changed");
            }
            bucket = next;

            match bucket {
                StatusBucket::Ready | StatusBucket::Waiting => {
                    ready_streak += 1;
                    if ready_streak >= self.config.ready_polls.max(1) {
                        break MonitorOutcome::Completed { status };
                    }
                }
                StatusBucket::Error => {
                    tracing::warn!(code = status.code, message = %status.message, "device reported an error");
                    break MonitorOutcome::Failed { status };
                }
                _ => ready_streak = 0,
            }
            last = Some(status);

            // Never sleep past the deadline.
            let remaining = deadline.saturating_duration_since(Instant::now());
            std::thread::sleep(self.config.poll_interval.min(remaining));
        };

        Ok(MonitorReport {
            outcome,
            polls,
            bucket,
        })
    }
}

impl Default for StatusMonitor {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}
