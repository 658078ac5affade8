//! Device status codes and their buckets.

use serde::Serialize;

/// Idle and ready.
pub const STATUS_READY: i32 = 0;
/// Printing.
pub const STATUS_PRINTING: i32 = 4;
/// Idle, waiting for the next job.
pub const STATUS_WAITING: i32 = 96;

/// A raw status reading from the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceStatus {
    /// Driver status code.
    pub code: i32,
    /// Driver message for the code.
    pub message: String,
}

impl DeviceStatus {
    /// Construct a reading.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Bucket under the fixed table, with no extra transient codes.
    pub fn bucket(&self) -> StatusBucket {
        StatusBucket::classify(self.code, &[])
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            write!(f, "code {}", self.code)
        } else {
            write!(f, "code {} ({})", self.code, self.message)
        }
    }
}

/// Coarse state of the device.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBucket {
    /// Nothing observed yet.
    Unknown,
    /// Idle and ready.
    Ready,
    /// Idle, waiting for the next job.
    Waiting,
    /// Working on a job.
    Printing,
    /// Anything else: paper out, head open, cover open, comms failure.
    Error,
}

impl StatusBucket {
    /// Map a status code. Codes in `transient` count as [`StatusBucket::Printing`].
    pub fn classify(code: i32, transient: &[i32]) -> Self {
        match code {
            STATUS_READY => StatusBucket::Ready,
            STATUS_WAITING => StatusBucket::Waiting,
            STATUS_PRINTING => StatusBucket::Printing,
            c if transient.contains(&c) => StatusBucket::Printing,
            _ => StatusBucket::Error,
        }
    }

    /// Ready or Waiting: the device can take a job.
    pub fn is_idle(self) -> bool {
        matches!(self, StatusBucket::Ready | StatusBucket::Waiting)
    }
}

impl std::fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusBucket::Unknown => write!(f, "unknown"),
            StatusBucket::Ready => write!(f, "ready"),
            StatusBucket::Waiting => write!(f, "waiting"),
            StatusBucket::Printing => write!(f, "printing"),
            StatusBucket::Error => write!(f, "error"),
        }
    }
}
