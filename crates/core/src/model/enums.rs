//! Closed enumerations carried by element fields.
//!
//! Each enumeration has a numeric code shared by the LSF and wire formats.

use serde::{Deserialize, Serialize};

/// Define an enum whose variants map one-to-one onto numeric codes.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant in code order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Numeric code used by both serializations.
            pub fn code(self) -> u32 {
                match self {
                    $($name::$variant => $code),+
                }
            }

            /// Inverse of [`code`](Self::code).
            pub fn from_code(code: u32) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

coded_enum! {
    /// Horizontal alignment of text or a barcode within its box.
    #[derive(Default)]
    HAlign {
        /// Left edge.
        #[default]
        Left = 0,
        /// Centered.
        Center = 1,
        /// Right edge.
        Right = 2,
    }
}

coded_enum! {
    /// Vertical alignment of text within its box.
    #[derive(Default)]
    VAlign {
        /// Top edge.
        #[default]
        Top = 0,
        /// Centered.
        Middle = 1,
        /// Bottom edge.
        Bottom = 2,
    }
}

coded_enum! {
    /// Where a barcode prints its human-readable interpretation.
    #[derive(Default)]
    HriPosition {
        /// Under the bars.
        #[default]
        Below = 0,
        /// Over the bars.
        Above = 1,
        /// Not printed.
        Hidden = 2,
    }
}

coded_enum! {
    /// Geometric primitive drawn by a shape element.
    #[derive(Default)]
    ShapeKind {
        /// Axis-aligned rectangle from start to end corner.
        #[default]
        Rectangle = 0,
        /// Straight line from start to end point.
        Line = 1,
        /// Ellipse inscribed in the start/end box.
        Ellipse = 2,
    }
}

coded_enum! {
    /// Outline dash pattern.
    #[derive(Default)]
    DashStyle {
        /// Continuous stroke.
        #[default]
        Solid = 0,
        /// Dashes.
        Dash = 1,
        /// Dots.
        Dot = 2,
        /// Dash, dot.
        DashDot = 3,
        /// Dash, dot, dot.
        DashDotDot = 4,
    }
}

coded_enum! {
    /// RFID encoder family.
    RfidEncoder {
        /// UHF (EPC Gen2) encoder.
        Uhf = 0,
        /// HF (ISO 15693) encoder.
        Hf = 1,
    }
}

coded_enum! {
    /// Tag memory bank an RFID payload is written to.
    #[derive(Default)]
    RfidDataBlock {
        /// EPC bank.
        #[default]
        Epc = 0,
        /// User memory.
        User = 1,
        /// TID bank.
        Tid = 2,
    }
}

coded_enum! {
    /// How an RFID payload string is interpreted.
    #[derive(Default)]
    RfidDataType {
        /// Characters, encoded with the element's text encoding.
        #[default]
        Ascii = 0,
        /// Hex digits, two per byte.
        Hex = 1,
    }
}

coded_enum! {
    /// Character encoding for ASCII RFID payloads.
    ///
    /// Code 0 is reserved for "driver default" and maps to `None` at the
    /// element level.
    TextEncoding {
        /// UTF-8.
        Utf8 = 1,
        /// GBK.
        Gbk = 2,
        /// UTF-16, little endian.
        Utf16Le = 3,
    }
}

// ── Barcode symbology ───────────────────────────────────────────────────

/// Barcode symbology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeKind {
    /// Code 128 with automatic subset switching.
    Code128Auto,
    /// Code 128 subset A.
    Code128A,
    /// Code 128 subset B.
    Code128B,
    /// Code 128 subset C.
    Code128C,
    /// GS1-128 (UCC/EAN-128).
    Gs1Code128,
    /// Code 39.
    Code39,
    /// Code 93.
    Code93,
    /// EAN-13.
    Ean13,
    /// EAN-8.
    Ean8,
    /// UPC-A.
    UpcA,
    /// ITF-14.
    Itf14,
    /// QR Code.
    QrCode,
    /// Data Matrix.
    DataMatrix,
    /// PDF417.
    Pdf417,
}

const BARCODE_TABLE: &[(BarcodeKind, &str)] = &[
    (BarcodeKind::Code128Auto, "Code 128 Auto"),
    (BarcodeKind::Code128A, "Code 128 A"),
    (BarcodeKind::Code128B, "Code 128 B"),
    (BarcodeKind::Code128C, "Code 128 C"),
    (BarcodeKind::Gs1Code128, "GS1-128"),
    (BarcodeKind::Code39, "Code 39"),
    (BarcodeKind::Code93, "Code 93"),
    (BarcodeKind::Ean13, "EAN-13"),
    (BarcodeKind::Ean8, "EAN-8"),
    (BarcodeKind::UpcA, "UPC-A"),
    (BarcodeKind::Itf14, "ITF-14"),
    (BarcodeKind::QrCode, "QR Code"),
    (BarcodeKind::DataMatrix, "Data Matrix"),
    (BarcodeKind::Pdf417, "PDF417"),
];

impl BarcodeKind {
    /// LSF `Mode` code: the variant's row in the designer's symbology list.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u32) -> Option<Self> {
        let index = usize::try_from(code).ok()?;
        BARCODE_TABLE.get(index).map(|(k, _)| *k)
    }

    /// Designer display name, as written to wire payloads.
    pub fn display_name(self) -> &'static str {
        BARCODE_TABLE[self as usize].1
    }

    /// Parse a designer name, ignoring case, spaces, `-` and `_`.
    ///
    /// `"Code 128 Auto"`, `"code128auto"` and `"CODE_128_AUTO"` all match.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = fold_name(name);
        BARCODE_TABLE
            .iter()
            .find(|(_, n)| fold_name(n) == wanted)
            .map(|(k, _)| *k)
    }

    /// `true` for the two-dimensional symbologies.
    pub fn is_2d(self) -> bool {
        matches!(
            self,
            BarcodeKind::QrCode | BarcodeKind::DataMatrix | BarcodeKind::Pdf417
        )
    }
}

impl std::fmt::Display for BarcodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

// ── Font style ──────────────────────────────────────────────────────────

/// Text style bitmask: bold 1, italic 2, underline 4, strikeout 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontStyle(u8);

impl FontStyle {
    /// No styling.
    pub const REGULAR: FontStyle = FontStyle(0);
    /// Bold.
    pub const BOLD: FontStyle = FontStyle(1);
    /// Italic.
    pub const ITALIC: FontStyle = FontStyle(2);
    /// Underline.
    pub const UNDERLINE: FontStyle = FontStyle(4);
    /// Strikeout.
    pub const STRIKEOUT: FontStyle = FontStyle(8);

    const MASK: u32 = 0b1111;

    /// Raw bits.
    pub fn bits(self) -> u32 {
        u32::from(self.0)
    }

    /// Build from raw bits; `None` if any undefined bit is set.
    pub fn from_bits(bits: u32) -> Option<Self> {
        if bits & !Self::MASK != 0 {
            return None;
        }
        u8::try_from(bits).ok().map(FontStyle)
    }

    /// `true` when every flag in `other` is set.
    pub fn contains(self, other: FontStyle) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for FontStyle {
    type Output = FontStyle;

    fn bitor(self, rhs: FontStyle) -> FontStyle {
        FontStyle(self.0 | rhs.0)
    }
}
