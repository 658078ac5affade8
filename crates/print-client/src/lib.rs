//! zmlabel print client: drive a label printer through a [`LabelDriver`].
//!
//! The pipeline validates a job, composes printer settings, label geometry,
//! and elements into one request, and hands it to the driver. After
//! dispatch a [`StatusMonitor`] polls the device until the job settles.
//! Nothing here talks to hardware directly; [`VirtualPrinter`] stands in
//! for a device in tests and in the CLI.
mod config;
mod driver;
mod error;
mod monitor;
mod payload;
mod pipeline;
mod retry;
mod status;
mod virtual_printer;

pub use config::{MonitorConfig, PrintOptions, RetryConfig};
pub use driver::{LabelDriver, PreviewImage, PrintJob, TagArea, TagReadRequest};
pub use error::{DriverError, PrintError};
pub use monitor::{CancelToken, MonitorOutcome, MonitorReport, StatusMonitor};
pub use payload::{PayloadOutcome, PayloadSummary, run_document, run_payload};
pub use pipeline::{
    PrintOutcome, PrintProgress, list_devices, preview, print, print_with_progress, query_status,
    read_uhf_tag, validate_job,
};
pub use retry::RetryDriver;
pub use status::{DeviceStatus, STATUS_PRINTING, STATUS_READY, STATUS_WAITING, StatusBucket};
pub use virtual_printer::{DispatchRecord, VirtualPrinter};

use std::time::Instant;

use zmlabel_core::{LabelConfig, LabelElement, PrinterConfig};

// ── Print and monitor ───────────────────────────────────────────────────

/// Print, then monitor the device until the job settles.
///
/// Monitoring runs only when every copy dispatched cleanly; the timeout
/// counts from the moment the first copy was handed to the driver.
pub fn print_and_monitor<D: LabelDriver>(
    driver: &mut D,
    printer: &PrinterConfig,
    label: &LabelConfig,
    elements: &[LabelElement],
    options: &PrintOptions,
    monitor: &StatusMonitor,
) -> Result<(PrintOutcome, Option<MonitorReport>), PrintError> {
    let dispatched_at = Instant::now();
    let outcome = print(driver, printer, label, elements, options)?;
    if !outcome.is_success() {
        return Ok((outcome, None));
    }
    let report = monitor.run(driver, printer, dispatched_at)?;
    Ok((outcome, Some(report)))
}
