//! zmlabel core library.
//!
//! The label document model ([`PrinterConfig`], [`LabelConfig`],
//! [`LabelElement`]) and its two serializations: the legacy LSF record file
//! ([`decode_lsf`] / [`encode_lsf`]) and the wire JSON payload exchanged with
//! label designers ([`decode_wire`] / [`encode_wire`]). Variable data is bound
//! by logical name with [`update_element_data`].
//!
//! Codecs never fail outright. They return best-effort data together with
//! [`Diagnostic`]s and an optional [`CodecError`] describing what was lost.

#![warn(missing_docs)]

/// Build a diagnostic context map from `key => value` pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Variable-data binding by logical name.
pub mod binding;
/// Codec status shared by LSF and wire.
pub mod codec;
/// The legacy LSF label file.
pub mod lsf;
/// Printer and label configuration, and the element variants.
pub mod model;
/// The wire JSON payload.
pub mod wire;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Model
pub use model::{
    BarcodeElement, BarcodeKind, Bounds, DashStyle, ElementKind, FontStyle, HAlign, HriPosition,
    ImageElement, ImageSource, InterfaceKind, LabelConfig, LabelDocument, LabelElement,
    PrinterConfig, PrinterConfigBuilder, RfidDataBlock, RfidDataType, RfidElement, RfidEncoder,
    ShapeElement, ShapeKind, TextElement, TextEncoding, VAlign, ValidationError,
};

// Codecs
pub use codec::CodecError;
pub use lsf::{LsfDecoded, decode_lsf, encode_lsf};
pub use wire::{Operate, WireDecoded, decode_wire, encode_wire};

// Binding
pub use binding::{BindReport, apply_bindings, find_element, update_element_data};

// Diagnostics (re-exported from the diagnostics crate)
pub use zmlabel_diagnostics::{Diagnostic, Severity, Span, codes, explain};
