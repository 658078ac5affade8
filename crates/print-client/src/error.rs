//! Typed error types for the print client.

use zmlabel_core::{InterfaceKind, ValidationError};

use crate::status::DeviceStatus;

/// Failures reported by a [`LabelDriver`](crate::LabelDriver).
///
/// Use [`DriverError::is_retryable()`] to tell a driver that could not be
/// reached from one that ran and reported a failure.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    /// The driver or device could not be reached (not loaded, unplugged,
    /// connection refused).
    #[error("driver unavailable: {reason}")]
    Unavailable {
        /// What the driver reported.
        reason: String,
    },

    /// The driver ran and reported a non-zero result code.
    #[error("driver failed with code {code}: {message}")]
    Failed {
        /// Driver result code.
        code: i32,
        /// Driver message for the code.
        message: String,
        /// Copies that printed before the failure.
        printed: u32,
    },

    /// All retry attempts have been exhausted.
    #[error("retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        /// Total number of attempts made.
        attempts: u32,
        /// The error from the final attempt.
        #[source]
        last_error: Box<DriverError>,
    },

    /// An invalid retry configuration was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DriverError {
    /// Returns `true` if this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DriverError::Unavailable { .. })
    }

    /// Shorthand for [`DriverError::Unavailable`].
    pub fn unavailable(reason: impl Into<String>) -> Self {
        DriverError::Unavailable {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`DriverError::Failed`] with nothing printed.
    pub fn failed(code: i32, message: impl Into<String>) -> Self {
        Self::failed_after(0, code, message)
    }

    /// A failure that struck after `printed` copies of a batch came out.
    pub fn failed_after(printed: u32, code: i32, message: impl Into<String>) -> Self {
        DriverError::Failed {
            code,
            message: message.into(),
            printed,
        }
    }
}

/// Errors from the print pipeline, the status monitor, and the payload
/// runner.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    // -- Pre-dispatch --
    /// The job failed validation; the driver was not contacted.
    #[error("invalid print job: {0}")]
    Validation(#[from] ValidationError),

    /// The operation needs an RFID-capable interface.
    #[error("{interface} interface does not support RFID")]
    UnsupportedInterface {
        /// Interface of the configured printer.
        interface: InterfaceKind,
    },

    /// A wire payload did not decode to a usable document.
    #[error("payload cannot be executed: {reason}")]
    InvalidPayload {
        /// Why the payload is unusable.
        reason: String,
    },

    /// The pre-print status check found the device busy or faulted.
    #[error("printer not ready: {status}")]
    NotReady {
        /// Status reported by the device.
        status: DeviceStatus,
    },

    // -- Driver --
    /// The driver could not be reached. Fatal to the call.
    #[error("driver unavailable")]
    DriverUnavailable(#[source] DriverError),

    /// The driver reported a failure outside a print batch.
    #[error("device error {code}: {message}")]
    Device {
        /// Driver result code.
        code: i32,
        /// Driver message for the code.
        message: String,
    },
}

impl PrintError {
    /// Returns `true` if the same call may succeed once the driver is back.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PrintError::DriverUnavailable(e) if e.is_retryable())
    }
}

impl From<DriverError> for PrintError {
    fn from(err: DriverError) -> Self {
        match err {
            DriverError::Failed { code, message, .. } => PrintError::Device { code, message },
            other => PrintError::DriverUnavailable(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(DriverError::unavailable("unplugged").is_retryable());
        assert!(PrintError::from(DriverError::unavailable("x")).is_retryable());
    }

    #[test]
    fn non_retryable_errors() {
        assert!(!DriverError::failed(81, "paper out").is_retryable());
        assert!(
            !DriverError::RetriesExhausted {
                attempts: 3,
                last_error: Box::new(DriverError::unavailable("x")),
            }
            .is_retryable()
        );
        assert!(!DriverError::InvalidConfig("x".into()).is_retryable());
        assert!(!PrintError::Validation(ValidationError::ZeroCopies).is_retryable());
        assert!(!PrintError::from(DriverError::failed(-1, "x")).is_retryable());
    }

    #[test]
    fn driver_failures_map_to_device_errors() {
        match PrintError::from(DriverError::failed(88, "head open")) {
            PrintError::Device { code, message } => {
                assert_eq!(code, 88);
                assert_eq!(message, "head open");
            }
            other => panic!("expected Device, got {other:?}"),
        }
        assert!(matches!(
            PrintError::from(DriverError::unavailable("gone")),
            PrintError::DriverUnavailable(DriverError::Unavailable { .. })
        ));
    }
}
