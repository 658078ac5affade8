//! Diagnostics for the zmlabel codecs.
//!
//! The LSF and wire decoders never fail outright. Everything they notice
//! while recovering (dropped records, defaulted sections, ignored slots)
//! comes back as a [`Diagnostic`] next to the decoded data, and variable-data
//! binding reports duplicate or unbindable names the same way. Codes live in
//! [`codes`]; [`explain`] turns one into a paragraph for `zmlabel explain`.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use std::collections::BTreeMap;

use serde::Serialize;

/// How much a diagnostic matters to the decoded result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Data was dropped or replaced by a default.
    Error,
    /// Recovered, but possibly not what the author meant.
    Warn,
    /// Informational note.
    Info,
}

/// Byte range into LSF text. Wire diagnostics point at a JSON offset with a
/// zero-width span, or carry none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte; never before `start`.
    pub end: usize,
}

impl Span {
    /// The range `[start, end)`. An `end` before `start` collapses to an
    /// empty span at `start`.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Zero-width span at `pos`.
    pub fn empty(pos: usize) -> Self {
        Self::new(pos, pos)
    }
}

/// One finding from a codec or from binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Code from [`codes`], e.g. `ZML1104`.
    pub id: &'static str,
    /// Severity.
    pub severity: Severity,
    /// Message for people.
    pub message: String,
    /// Where in the input, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Record index, slot name, element name, and similar. Sorted keys keep
    /// JSON output stable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    fn with_severity(id: &'static str, severity: Severity, message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            id,
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// An `Error` diagnostic.
    pub fn error(id: &'static str, message: impl Into<String>, span: Option<Span>) -> Self {
        Self::with_severity(id, Severity::Error, message, span)
    }

    /// A `Warn` diagnostic.
    pub fn warn(id: &'static str, message: impl Into<String>, span: Option<Span>) -> Self {
        Self::with_severity(id, Severity::Warn, message, span)
    }

    /// An `Info` diagnostic.
    pub fn info(id: &'static str, message: impl Into<String>, span: Option<Span>) -> Self {
        Self::with_severity(id, Severity::Info, message, span)
    }

    /// Attach context entries.
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Explanation of this diagnostic's code.
    pub fn explain(&self) -> Option<&'static str> {
        explain(self.id)
    }

    /// `true` for [`Severity::Error`].
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Explanation of a diagnostic code, if it is one of ours.
pub fn explain(id: &str) -> Option<&'static str> {
    codes::explain_code(id)
}
