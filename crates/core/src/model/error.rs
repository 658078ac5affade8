//! Construction-time validation errors for the document model.

use super::config::InterfaceKind;
use super::element::ElementKind;

/// A config or element value failed validation.
///
/// Fatal to the construction (or dispatch) that produced it, never to the
/// process. Codecs turn these into diagnostics and skip the offending record.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent or empty.
    #[error("{field} is required")]
    Missing {
        /// Field name as it appears in the model.
        field: &'static str,
    },

    /// A numeric field is outside its valid range.
    #[error("{field} out of range: {reason}")]
    OutOfRange {
        /// Field name as it appears in the model.
        field: &'static str,
        /// What the valid range is and what was given.
        reason: String,
    },

    /// An enumeration code or name is not part of the closed set.
    #[error("unknown {field}: {value:?}")]
    UnknownValue {
        /// Field name as it appears in the model.
        field: &'static str,
        /// The rejected code or name.
        value: String,
    },

    /// The interface kind requires an identifier that was not provided.
    #[error("{interface} interface requires {field}")]
    MissingIdentifier {
        /// Interface that needs the identifier.
        interface: InterfaceKind,
        /// The missing identifier field.
        field: &'static str,
    },

    /// The element variant has no payload field to replace.
    #[error("{kind} elements carry no payload")]
    NoPayload {
        /// Variant that was asked for a payload.
        kind: ElementKind,
    },

    /// A barcode or RFID element is about to be dispatched with no data.
    #[error("element '{name}' has an empty payload")]
    EmptyPayload {
        /// Logical name of the element.
        name: String,
    },

    /// A HEX RFID payload is not an even-length hex string.
    #[error("element '{name}' payload is not valid hex: {reason}")]
    InvalidHex {
        /// Logical name of the element.
        name: String,
        /// Decoder message.
        reason: String,
    },

    /// An element's declared bounds reach past the label edge.
    #[error("element '{name}' extends past the label ({axis} reaches {extent} mm, label is {limit} mm)")]
    OutOfBounds {
        /// Logical name of the element.
        name: String,
        /// `'x'` or `'y'`.
        axis: char,
        /// Far edge of the element on that axis.
        extent: f64,
        /// Label size on that axis.
        limit: f64,
    },

    /// A print was requested with zero copies.
    #[error("copies must be at least 1")]
    ZeroCopies,
}

/// Check that `value` is finite and `>= 0`.
pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: format!("must be a finite value >= 0, got {value}"),
        });
    }
    Ok(())
}

/// Check that `value` is finite and `> 0`.
pub(crate) fn positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: format!("must be a finite value > 0, got {value}"),
        });
    }
    Ok(())
}

/// Check that an integer setting lies within `[min, max]`.
pub(crate) fn within(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            reason: format!("must be between {min} and {max}, got {value}"),
        });
    }
    Ok(())
}
