//! Label document model: printer and label configuration plus the closed
//! set of element variants.

pub mod config;
pub mod defaults;
pub mod element;
pub mod enums;
pub mod error;

pub use config::{InterfaceKind, LabelConfig, PrinterConfig, PrinterConfigBuilder};
pub use element::{
    BarcodeElement, Bounds, ElementKind, ImageElement, ImageSource, LabelElement, RfidElement,
    ShapeElement, TextElement,
};
pub use enums::{
    BarcodeKind, DashStyle, FontStyle, HAlign, HriPosition, RfidDataBlock, RfidDataType,
    RfidEncoder, ShapeKind, TextEncoding, VAlign,
};
pub use error::ValidationError;

use serde::{Deserialize, Serialize};

/// A complete label: where it prints, what stock it prints on, and what is
/// on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelDocument {
    /// Printer settings.
    pub printer: PrinterConfig,
    /// Label stock geometry.
    pub label: LabelConfig,
    /// Elements in drawing order.
    pub elements: Vec<LabelElement>,
}

impl LabelDocument {
    /// Assemble a document.
    pub fn new(printer: PrinterConfig, label: LabelConfig, elements: Vec<LabelElement>) -> Self {
        Self {
            printer,
            label,
            elements,
        }
    }
}
