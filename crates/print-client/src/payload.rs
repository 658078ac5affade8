//! Executing a decoded wire payload according to its `Operate` field.

use serde::Serialize;
use zmlabel_core::{CodecError, LabelDocument, Operate, WireDecoded};

use crate::config::PrintOptions;
use crate::driver::{LabelDriver, PreviewImage};
use crate::error::PrintError;
use crate::pipeline::{self, PrintOutcome};

/// What running a payload did.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadOutcome {
    /// A preview was requested; `None` if rendering failed.
    Previewed(Option<PreviewImage>),
    /// A print was requested and dispatched.
    Printed(PrintOutcome),
    /// No recognized operation; nothing was dispatched.
    NoAction {
        /// The `Operate` value, if any.
        operate: Option<String>,
    },
}

/// Serializable summary of a [`PayloadOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PayloadSummary {
    /// Preview rendered or not.
    Previewed {
        /// Whether an image came back.
        rendered: bool,
    },
    /// Print result.
    Printed(PrintOutcome),
    /// Nothing done.
    NoAction {
        /// The `Operate` value, if any.
        operate: Option<String>,
    },
}

impl PayloadOutcome {
    /// Summary without the image bytes.
    pub fn summary(&self) -> PayloadSummary {
        match self {
            PayloadOutcome::Previewed(image) => PayloadSummary::Previewed {
                rendered: image.is_some(),
            },
            PayloadOutcome::Printed(outcome) => PayloadSummary::Printed(outcome.clone()),
            PayloadOutcome::NoAction { operate } => PayloadSummary::NoAction {
                operate: operate.clone(),
            },
        }
    }
}

/// Run a decoded payload.
///
/// Print requests first check that the device reports Ready or Waiting and
/// fail with [`PrintError::NotReady`] otherwise. An unrecognized or absent
/// `Operate` dispatches nothing, even when the config blocks are unusable.
/// Malformed JSON is always [`PrintError::InvalidPayload`].
pub fn run_payload<D: LabelDriver>(
    driver: &mut D,
    decoded: WireDecoded,
    stop_at_error: bool,
) -> Result<PayloadOutcome, PrintError> {
    if let Some(err @ CodecError::Format { .. }) = &decoded.error {
        return Err(PrintError::InvalidPayload { reason: err.to_string() });
    }
    if !matches!(decoded.operate, Some(Operate::Print | Operate::Preview)) {
        return Ok(no_action(decoded.operate.as_ref()));
    }
    let copies = decoded.copies;
    let operate = decoded.operate.clone();
    let error = decoded.error.clone();
    let Some(doc) = decoded.into_document() else {
        return Err(PrintError::InvalidPayload {
            reason: error.map_or_else(|| "missing printer or label settings".to_string(), |e| e.to_string()),
        });
    };
    run_document(driver, &doc, copies, operate.as_ref(), stop_at_error)
}

/// Run `operate` against an already decoded document.
pub fn run_document<D: LabelDriver>(
    driver: &mut D,
    doc: &LabelDocument,
    copies: u32,
    operate: Option<&Operate>,
    stop_at_error: bool,
) -> Result<PayloadOutcome, PrintError> {
    match operate {
        Some(Operate::Preview) => Ok(PayloadOutcome::Previewed(pipeline::preview(
            driver,
            &doc.printer,
            &doc.label,
            &doc.elements,
        )?)),
        Some(Operate::Print) => {
            let status = driver.query_status(&doc.printer)?;
            if !status.bucket().is_idle() {
                tracing::warn!(code = status.code, message = %status.message, "printer not ready, print refused");
                return Err(PrintError::NotReady { status });
            }
            let options = PrintOptions::copies(copies).stop_at_error(stop_at_error);
            pipeline::print(driver, &doc.printer, &doc.label, &doc.elements, &options).map(PayloadOutcome::Printed)
        }
        other => Ok(no_action(other)),
    }
}

fn no_action(operate: Option<&Operate>) -> PayloadOutcome {
    let operate = operate.map(ToString::to_string);
    tracing::info!(operate = ?operate, "no action taken");
    PayloadOutcome::NoAction { operate }
}
