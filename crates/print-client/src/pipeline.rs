//! Preview and print: validate, compose, delegate to the driver.
//!
//! The pipeline never retries. Wrap the driver in a
//! [`RetryDriver`](crate::RetryDriver) for that.

use std::ops::ControlFlow;

use serde::Serialize;
use zmlabel_core::{
    InterfaceKind, LabelConfig, LabelElement, PrinterConfig, RfidDataType,
    ValidationError,
};

use crate::config::PrintOptions;
use crate::driver::{LabelDriver, PreviewImage, PrintJob, TagReadRequest};
use crate::error::{DriverError, PrintError};
use crate::status::DeviceStatus;

/// Slack when comparing element extents against the label edge.
const EDGE_TOLERANCE_MM: f64 = 1e-6;

// ── Validation ──────────────────────────────────────────────────────────

/// Everything checked before a job reaches the driver.
///
/// Config and element construction checks, non-empty barcode and RFID
/// payloads, even-length hex for HEX RFID data, and declared bounds inside
/// the label.
pub fn validate_job(job: &PrintJob<'_>) -> Result<(), ValidationError> {
    job.printer.validate()?;
    job.label.validate()?;
    for element in job.elements {
        element.validate()?;
        check_payload(element)?;
        check_bounds(element, job.label)?;
    }
    Ok(())
}

fn check_payload(element: &LabelElement) -> Result<(), ValidationError> {
    let empty = || ValidationError::EmptyPayload {
        name: element.name().to_string(),
    };
    match element {
        LabelElement::Barcode(e) if e.data.is_empty() => Err(empty()),
        LabelElement::Rfid(e) if e.data.is_empty() => Err(empty()),
        LabelElement::Rfid(e) if e.data_type == RfidDataType::Hex => hex::decode(&e.data)
            .map(drop)
            .map_err(|err| ValidationError::InvalidHex {
                name: e.name.clone(),
                reason: err.to_string(),
            }),
        _ => Ok(()),
    }
}

fn check_bounds(element: &LabelElement, label: &LabelConfig) -> Result<(), ValidationError> {
    let Some(bounds) = element.bounds() else {
        return Ok(());
    };
    let out = |axis, extent, limit| ValidationError::OutOfBounds {
        name: element.name().to_string(),
        axis,
        extent,
        limit,
    };
    if bounds.right() > label.width_mm + EDGE_TOLERANCE_MM {
        return Err(out('x', bounds.right(), label.width_mm));
    }
    if bounds.bottom() > label.height_mm + EDGE_TOLERANCE_MM {
        return Err(out('y', bounds.bottom(), label.height_mm));
    }
    Ok(())
}

// ── Preview ─────────────────────────────────────────────────────────────

/// Render a preview.
///
/// A job that fails validation is an error and never reaches the driver.
/// `Ok(None)` means the driver could not render it.
pub fn preview<D: LabelDriver>(
    driver: &mut D,
    printer: &PrinterConfig,
    label: &LabelConfig,
    elements: &[LabelElement],
) -> Result<Option<PreviewImage>, ValidationError> {
    let job = PrintJob::new(printer, label, elements);
    validate_job(&job)?;
    tracing::debug!(elements = elements.len(), "rendering preview");
    match driver.render_preview(&job) {
        Ok(image) => Ok(Some(image)),
        Err(err) => {
            tracing::warn!(error = %err, "preview failed");
            Ok(None)
        }
    }
}

// ── Print ───────────────────────────────────────────────────────────────

/// Reported after each copy (or after the single batch call).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintProgress {
    /// Copies attempted so far.
    pub attempted: u32,
    /// Copies that printed.
    pub printed: u32,
    /// Copies requested.
    pub total: u32,
    /// Result code of the latest attempt; 0 on success.
    pub last_code: i32,
}

/// Result of a print call.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintOutcome {
    /// 0 on full success, otherwise the first failing driver code.
    pub code: i32,
    /// Copies the driver reported as printed.
    pub printed: u32,
    /// Copies requested.
    pub requested: u32,
    /// The progress callback stopped the batch.
    pub aborted: bool,
    /// Status read after a failure.
    pub final_status: Option<DeviceStatus>,
}

impl PrintOutcome {
    /// Every requested copy printed.
    pub fn is_success(&self) -> bool {
        self.code == 0 && self.printed == self.requested
    }
}

/// Print `options.copies` copies.
pub fn print<D: LabelDriver>(
    driver: &mut D,
    printer: &PrinterConfig,
    label: &LabelConfig,
    elements: &[LabelElement],
    options: &PrintOptions,
) -> Result<PrintOutcome, PrintError> {
    print_with_progress(driver, printer, label, elements, options, |_| {
        ControlFlow::Continue(())
    })
}

/// Print with a progress callback that can stop the batch between copies.
///
/// Validation failures and a zero copy count return before the driver is
/// contacted. An unavailable driver ends the call with
/// [`PrintError::DriverUnavailable`]. A driver failure code is reported in
/// the outcome, and the device status is read once more afterwards.
///
/// A driver with native copy counts gets the whole batch in one call. If
/// that call fails part way and `stop_at_error` is off, the copies after the
/// failing one are dispatched one at a time.
pub fn print_with_progress<D, F>(
    driver: &mut D,
    printer: &PrinterConfig,
    label: &LabelConfig,
    elements: &[LabelElement],
    options: &PrintOptions,
    mut on_progress: F,
) -> Result<PrintOutcome, PrintError>
where
    D: LabelDriver,
    F: FnMut(PrintProgress) -> ControlFlow<(), ()>,
{
    let job = PrintJob::new(printer, label, elements);
    validate_job(&job)?;
    if options.copies == 0 {
        return Err(ValidationError::ZeroCopies.into());
    }

    let total = options.copies;
    let mut outcome = PrintOutcome {
        code: 0,
        printed: 0,
        requested: total,
        aborted: false,
        final_status: None,
    };

    // First copy number still to dispatch one at a time.
    let mut next = 1;
    if driver.supports_copy_count() {
        tracing::debug!(copies = total, "dispatching batch");
        let (code, printed) = dispatch(driver, &job, total)?;
        outcome.code = code;
        outcome.printed = printed.min(total);
        // A failed batch stopped on the copy after the last one printed.
        let attempted = if code == 0 {
            total
        } else {
            (outcome.printed + 1).min(total)
        };
        let flow = on_progress(PrintProgress {
            attempted,
            printed: outcome.printed,
            total,
            last_code: code,
        });
        next = attempted + 1;
        if code != 0 && options.stop_at_error {
            next = total + 1;
        } else if flow.is_break() && attempted < total {
            tracing::info!(printed = outcome.printed, total, "batch stopped by caller");
            outcome.aborted = true;
            next = total + 1;
        }
    }

    for attempted in next..=total {
        tracing::debug!(copy = attempted, total, "dispatching copy");
        let (code, printed) = dispatch(driver, &job, 1)?;
        outcome.printed += printed.min(1);
        if code != 0 && outcome.code == 0 {
            outcome.code = code;
        }
        let flow = on_progress(PrintProgress {
            attempted,
            printed: outcome.printed,
            total,
            last_code: code,
        });
        if code != 0 && options.stop_at_error {
            break;
        }
        if flow.is_break() && attempted < total {
            tracing::info!(printed = outcome.printed, total, "batch stopped by caller");
            outcome.aborted = true;
            break;
        }
    }

    if outcome.code != 0 {
        outcome.final_status = driver
            .query_status(printer)
            .inspect_err(|err| tracing::warn!(error = %err, "final status query failed"))
            .ok();
        tracing::warn!(
            code = outcome.code,
            printed = outcome.printed,
            requested = total,
            status = ?outcome.final_status,
            "print finished with errors"
        );
    }
    Ok(outcome)
}

/// One driver call, as `(code, printed)`. A failure code is a result; an
/// unreachable driver is an error.
fn dispatch<D: LabelDriver>(driver: &mut D, job: &PrintJob<'_>, copies: u32) -> Result<(i32, u32), PrintError> {
    match driver.dispatch_print(job, copies) {
        Ok(printed) => Ok((0, printed)),
        Err(DriverError::Failed { code, message, printed }) => {
            tracing::warn!(code, %message, printed, "driver reported a failure");
            Ok((code, printed))
        }
        Err(err) => Err(PrintError::DriverUnavailable(err)),
    }
}

// ── Pass-through ────────────────────────────────────────────────────────

/// Read UHF tag memory. RFID interfaces only.
pub fn read_uhf_tag<D: LabelDriver>(
    driver: &mut D,
    printer: &PrinterConfig,
    label: &LabelConfig,
    request: &TagReadRequest,
) -> Result<String, PrintError> {
    if !printer.interface.is_rfid() {
        return Err(PrintError::UnsupportedInterface {
            interface: printer.interface,
        });
    }
    printer.validate()?;
    label.validate()?;
    tracing::debug!(area = ?request.area, power = request.power, "reading tag");
    Ok(driver.read_rfid_tag(printer, label, request)?)
}

/// Devices reachable over `interface`.
pub fn list_devices<D: LabelDriver>(driver: &mut D, interface: InterfaceKind) -> Result<Vec<String>, PrintError> {
    Ok(driver.list_connected_devices(interface)?)
}

/// Current device status.
pub fn query_status<D: LabelDriver>(driver: &mut D, printer: &PrinterConfig) -> Result<DeviceStatus, PrintError> {
    Ok(driver.query_status(printer)?)
}
