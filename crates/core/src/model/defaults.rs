//! Default values shared by the model constructors and both codecs.
//!
//! A field that is absent from an LSF record or a wire object takes the value
//! listed here, so the two representations agree on what "not specified"
//! means.

/// Printer resolution in dots per inch.
pub const DPI: u32 = 300;
/// Print speed setting.
pub const SPEED: u32 = 4;
/// Print darkness setting.
pub const DARKNESS: u32 = 10;
/// Gap/black-mark detection enabled.
pub const HAS_GAP: bool = true;

/// Label width in millimeters.
pub const LABEL_WIDTH_MM: f64 = 60.0;
/// Label height in millimeters.
pub const LABEL_HEIGHT_MM: f64 = 40.0;
/// Gap between labels in millimeters.
pub const LABEL_GAP_MM: f64 = 2.0;

/// Copies requested by a payload that does not say.
pub const COPIES: u32 = 1;

/// Font used when a text element names none.
pub const FONT_NAME: &str = "Arial";
/// Font size in points.
pub const FONT_SIZE_PT: f64 = 10.0;

/// Barcode module scale.
pub const BARCODE_SCALE: f64 = 1.0;
/// Barcode bar height in millimeters.
pub const BARCODE_HEIGHT_MM: f64 = 10.0;

/// Shape outline width in millimeters.
pub const LINE_WIDTH_MM: f64 = 0.4;

/// RFID write attempts before the driver reports an error.
pub const RFID_RETRIES: u32 = 1;
