//! Retry wrapper that adds exponential-backoff retry logic to any `LabelDriver`.

use std::time::{Duration, SystemTime};

use zmlabel_core::{InterfaceKind, LabelConfig, PrinterConfig};

use crate::config::RetryConfig;
use crate::driver::{LabelDriver, PreviewImage, PrintJob, TagReadRequest};
use crate::error::DriverError;
use crate::status::DeviceStatus;

/// A wrapper that retries every driver call while the driver is unavailable.
///
/// A driver that ran and reported a failure code is never retried: a
/// dispatched copy may already be on the label stock.
pub struct RetryDriver<D> {
    inner: D,
    retry_config: RetryConfig,
}

impl<D> RetryDriver<D> {
    /// Create a new `RetryDriver` wrapping `inner` with the given retry configuration.
    pub fn new(inner: D, retry_config: RetryConfig) -> Self {
        Self {
            inner,
            retry_config,
        }
    }

    /// Unwrap the `RetryDriver`, returning the inner driver.
    pub fn into_inner(self) -> D {
        self.inner
    }

    /// Get a shared reference to the inner driver.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Get a mutable reference to the inner driver.
    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.inner
    }
}

impl<D: LabelDriver> LabelDriver for RetryDriver<D> {
    fn render_preview(&mut self, job: &PrintJob<'_>) -> Result<PreviewImage, DriverError> {
        retry_op(&self.retry_config, || self.inner.render_preview(job))
    }

    fn dispatch_print(&mut self, job: &PrintJob<'_>, copies: u32) -> Result<u32, DriverError> {
        retry_op(&self.retry_config, || self.inner.dispatch_print(job, copies))
    }

    fn query_status(&mut self, printer: &PrinterConfig) -> Result<DeviceStatus, DriverError> {
        retry_op(&self.retry_config, || self.inner.query_status(printer))
    }

    fn read_rfid_tag(
        &mut self,
        printer: &PrinterConfig,
        label: &LabelConfig,
        request: &TagReadRequest,
    ) -> Result<String, DriverError> {
        retry_op(&self.retry_config, || {
            self.inner.read_rfid_tag(printer, label, request)
        })
    }

    fn list_connected_devices(&mut self, interface: InterfaceKind) -> Result<Vec<String>, DriverError> {
        retry_op(&self.retry_config, || {
            self.inner.list_connected_devices(interface)
        })
    }

    fn supports_copy_count(&self) -> bool {
        self.inner.supports_copy_count()
    }
}

// ── Retry helper ───────────────────────────────────────────────────────

/// Execute `op`, retrying on retryable errors with exponential backoff.
///
/// Non-retryable errors are returned immediately. On exhausting all attempts
/// the last retryable error is wrapped in [`DriverError::RetriesExhausted`].
fn retry_op<T, F>(config: &RetryConfig, mut op: F) -> Result<T, DriverError>
where
    F: FnMut() -> Result<T, DriverError>,
{
    if config.max_attempts == 0 {
        return Err(DriverError::InvalidConfig(
            "max_attempts must be >= 1".into(),
        ));
    }

    let mut attempt = 0;
    loop {
        let err = match op() {
            Ok(val) => return Ok(val),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => e,
        };
        attempt += 1;
        if attempt >= config.max_attempts {
            return Err(DriverError::RetriesExhausted {
                attempts: config.max_attempts,
                last_error: Box::new(err),
            });
        }
        let delay = compute_delay(config, attempt - 1);
        tracing::warn!(attempt, max_attempts = config.max_attempts, ?delay, error = %err, "driver unavailable, retrying");
        std::thread::sleep(delay);
    }
}

/// Compute the backoff delay for the given `attempt` (0-indexed).
///
/// delay = min(initial_delay * 2^attempt, max_delay), optionally with jitter.
fn compute_delay(config: &RetryConfig, attempt: u32) -> Duration {
    let base = config
        .initial_delay
        .saturating_mul(2u32.saturating_pow(attempt));
    let capped = base.min(config.max_delay);

    if config.jitter {
        // Jitter in [capped/2, capped], seeded from the clock's nanoseconds.
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .subsec_nanos();
        let half = capped / 2;
        let jitter_range_nanos = capped.as_nanos().saturating_sub(half.as_nanos());
        if jitter_range_nanos == 0 {
            return capped;
        }
        let offset_nanos = u128::from(nanos) % jitter_range_nanos;
        half + Duration::from_nanos(offset_nanos as u64)
    } else {
        capped
    }
}
