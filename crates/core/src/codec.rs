//! Status shared by the LSF and wire codecs.

use serde::Serialize;
use zmlabel_diagnostics::{Diagnostic, Severity};

/// Why a decode did not produce the whole document.
///
/// Returned alongside best-effort data, never raised. The diagnostics
/// carried next to it say what exactly went wrong.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CodecError {
    /// The input is not well-formed; nothing was decoded.
    #[error("malformed input: {message}")]
    Format {
        /// What was malformed, with its location.
        message: String,
    },
    /// The version marker is missing or names an unsupported version.
    #[error("version error: {message}")]
    Version {
        /// What was found instead.
        message: String,
    },
    /// Decoding finished but some records were skipped or defaulted.
    #[error("partially decoded: {problems} record(s) skipped or defaulted")]
    Partial {
        /// Number of records affected.
        problems: usize,
    },
}

impl CodecError {
    /// `Partial` when `problems > 0`, otherwise no error.
    pub(crate) fn partial(problems: usize) -> Option<Self> {
        (problems > 0).then_some(CodecError::Partial { problems })
    }
}

/// Log a diagnostic through `tracing` and keep it.
pub(crate) fn push(diags: &mut Vec<Diagnostic>, diag: Diagnostic) {
    match diag.severity {
        Severity::Info => tracing::debug!(code = %diag.id, "{}", diag.message),
        _ => tracing::warn!(code = %diag.id, "{}", diag.message),
    }
    diags.push(diag);
}
