//! Label elements: the closed set of things that can be placed on a label.
//!
//! Every variant is built through its own constructor plus chained setters
//! and validated by `build()`, which yields a [`LabelElement`]. After
//! construction only the payload changes, through
//! [`LabelElement::with_payload`] or [`LabelElement::set_payload`].

use serde::{Deserialize, Serialize};

use super::defaults;
use super::enums::{
    BarcodeKind, DashStyle, FontStyle, HAlign, HriPosition, RfidDataBlock, RfidDataType,
    RfidEncoder, ShapeKind, TextEncoding, VAlign,
};
use super::error::{ValidationError, non_negative, positive};

const MM_PER_POINT: f64 = 25.4 / 72.0;

// ── Kind tag ────────────────────────────────────────────────────────────

/// Stable type tag for an element variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// [`TextElement`].
    Text,
    /// [`BarcodeElement`].
    Barcode,
    /// [`ShapeElement`].
    Shape,
    /// [`ImageElement`].
    Image,
    /// [`RfidElement`].
    Rfid,
}

impl ElementKind {
    /// Lowercase tag.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Barcode => "barcode",
            ElementKind::Shape => "shape",
            ElementKind::Image => "image",
            ElementKind::Rfid => "rfid",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned box an element declares it occupies, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub x_mm: f64,
    /// Top edge.
    pub y_mm: f64,
    /// Width (0 when the driver decides).
    pub width_mm: f64,
    /// Height (0 when the driver decides).
    pub height_mm: f64,
}

impl Bounds {
    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x_mm + self.width_mm
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y_mm + self.height_mm
    }
}

fn check_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Missing { field: "name" });
    }
    Ok(())
}

fn check_position(x_mm: f64, y_mm: f64) -> Result<(), ValidationError> {
    non_negative("x", x_mm)?;
    non_negative("y", y_mm)
}

// ── Text ────────────────────────────────────────────────────────────────

/// A run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct TextElement {
    /// Logical name.
    pub name: String,
    /// Left edge.
    pub x_mm: f64,
    /// Top edge.
    pub y_mm: f64,
    /// The text.
    pub data: String,
    /// Font family.
    pub font_name: String,
    /// Font size in points.
    pub font_size_pt: f64,
    /// Bold/italic/underline/strikeout flags.
    pub style: FontStyle,
    /// Wrap within `wrap_width_mm`.
    pub multiline: bool,
    /// Wrap width; 0 when single-line.
    pub wrap_width_mm: f64,
    /// Horizontal alignment.
    pub align: HAlign,
    /// Vertical alignment.
    pub valign: VAlign,
}

impl TextElement {
    /// Single-line text at the origin in the default font.
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x_mm: 0.0,
            y_mm: 0.0,
            data: data.into(),
            font_name: defaults::FONT_NAME.to_string(),
            font_size_pt: defaults::FONT_SIZE_PT,
            style: FontStyle::REGULAR,
            multiline: false,
            wrap_width_mm: 0.0,
            align: HAlign::Left,
            valign: VAlign::Top,
        }
    }

    /// Position.
    pub fn at(mut self, x_mm: f64, y_mm: f64) -> Self {
        self.x_mm = x_mm;
        self.y_mm = y_mm;
        self
    }

    /// Font family and size.
    pub fn font(mut self, name: impl Into<String>, size_pt: f64) -> Self {
        self.font_name = name.into();
        self.font_size_pt = size_pt;
        self
    }

    /// Style flags.
    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// Wrap text within `width_mm`.
    pub fn wrap(mut self, width_mm: f64) -> Self {
        self.multiline = true;
        self.wrap_width_mm = width_mm;
        self
    }

    /// Horizontal and vertical alignment.
    pub fn align(mut self, align: HAlign, valign: VAlign) -> Self {
        self.align = align;
        self.valign = valign;
        self
    }

    /// Validate and wrap as a [`LabelElement`].
    pub fn build(self) -> Result<LabelElement, ValidationError> {
        self.validate()?;
        Ok(LabelElement::Text(self))
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name(&self.name)?;
        check_position(self.x_mm, self.y_mm)?;
        positive("font size", self.font_size_pt)?;
        non_negative("wrap width", self.wrap_width_mm)?;
        if self.multiline && self.wrap_width_mm <= 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "wrap width",
                reason: "multiline text needs a wrap width > 0".into(),
            });
        }
        Ok(())
    }
}

// ── Barcode ─────────────────────────────────────────────────────────────

/// A 1D or 2D barcode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct BarcodeElement {
    /// Logical name.
    pub name: String,
    /// Left edge.
    pub x_mm: f64,
    /// Top edge.
    pub y_mm: f64,
    /// Encoded data.
    pub data: String,
    /// Symbology.
    pub symbology: BarcodeKind,
    /// Module scale.
    pub scale: f64,
    /// Bar height.
    pub height_mm: f64,
    /// Horizontal alignment.
    pub align: HAlign,
    /// Human-readable text position.
    pub hri: HriPosition,
}

impl BarcodeElement {
    /// Barcode at the origin with default scale and height.
    pub fn new(name: impl Into<String>, symbology: BarcodeKind, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x_mm: 0.0,
            y_mm: 0.0,
            data: data.into(),
            symbology,
            scale: defaults::BARCODE_SCALE,
            height_mm: defaults::BARCODE_HEIGHT_MM,
            align: HAlign::Left,
            hri: HriPosition::Below,
        }
    }

    /// Position.
    pub fn at(mut self, x_mm: f64, y_mm: f64) -> Self {
        self.x_mm = x_mm;
        self.y_mm = y_mm;
        self
    }

    /// Module scale.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Bar height.
    pub fn height(mut self, height_mm: f64) -> Self {
        self.height_mm = height_mm;
        self
    }

    /// Horizontal alignment.
    pub fn align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    /// Human-readable text position.
    pub fn hri(mut self, hri: HriPosition) -> Self {
        self.hri = hri;
        self
    }

    /// Validate and wrap as a [`LabelElement`].
    pub fn build(self) -> Result<LabelElement, ValidationError> {
        self.validate()?;
        Ok(LabelElement::Barcode(self))
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name(&self.name)?;
        check_position(self.x_mm, self.y_mm)?;
        positive("barcode scale", self.scale)?;
        positive("barcode height", self.height_mm)
    }
}

// ── Shape ───────────────────────────────────────────────────────────────

/// A rectangle, line, or ellipse between a start and an end point.
///
/// The start point is the element position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ShapeElement {
    /// Logical name.
    pub name: String,
    /// Start x.
    pub x_mm: f64,
    /// Start y.
    pub y_mm: f64,
    /// End x.
    pub end_x_mm: f64,
    /// End y.
    pub end_y_mm: f64,
    /// Primitive.
    pub shape: ShapeKind,
    /// Outline width.
    pub line_width_mm: f64,
    /// Rectangle corner radius.
    pub corner_radius_mm: f64,
    /// Fill the interior.
    pub fill: bool,
    /// Outline dash pattern.
    pub dash: DashStyle,
}

impl ShapeElement {
    /// Shape from `start` to `end` with a default solid outline.
    pub fn new(
        name: impl Into<String>,
        shape: ShapeKind,
        start: (f64, f64),
        end: (f64, f64),
    ) -> Self {
        Self {
            name: name.into(),
            x_mm: start.0,
            y_mm: start.1,
            end_x_mm: end.0,
            end_y_mm: end.1,
            shape,
            line_width_mm: defaults::LINE_WIDTH_MM,
            corner_radius_mm: 0.0,
            fill: false,
            dash: DashStyle::Solid,
        }
    }

    /// Outline width.
    pub fn line_width(mut self, width_mm: f64) -> Self {
        self.line_width_mm = width_mm;
        self
    }

    /// Corner radius.
    pub fn corner_radius(mut self, radius_mm: f64) -> Self {
        self.corner_radius_mm = radius_mm;
        self
    }

    /// Fill the interior.
    pub fn filled(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    /// Dash pattern.
    pub fn dash(mut self, dash: DashStyle) -> Self {
        self.dash = dash;
        self
    }

    /// Validate and wrap as a [`LabelElement`].
    pub fn build(self) -> Result<LabelElement, ValidationError> {
        self.validate()?;
        Ok(LabelElement::Shape(self))
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name(&self.name)?;
        check_position(self.x_mm, self.y_mm)?;
        non_negative("end x", self.end_x_mm)?;
        non_negative("end y", self.end_y_mm)?;
        positive("line width", self.line_width_mm)?;
        non_negative("corner radius", self.corner_radius_mm)
    }
}

// ── Image ───────────────────────────────────────────────────────────────

/// Where an image's pixels come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// Path to an image file the driver loads.
    File(String),
    /// Encoded image bytes.
    Bytes(#[serde(with = "hex::serde")] Vec<u8>),
}

/// A bitmap image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ImageElement {
    /// Logical name.
    pub name: String,
    /// Left edge.
    pub x_mm: f64,
    /// Top edge.
    pub y_mm: f64,
    /// Pixel source.
    pub source: ImageSource,
    /// Fixed width; 0 for natural size.
    pub width_mm: f64,
    /// Fixed height; 0 for natural size.
    pub height_mm: f64,
}

impl ImageElement {
    /// Image loaded from `path`.
    pub fn from_file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_source(name, ImageSource::File(path.into()))
    }

    /// Image from encoded bytes.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::with_source(name, ImageSource::Bytes(bytes))
    }

    pub(crate) fn with_source(name: impl Into<String>, source: ImageSource) -> Self {
        Self {
            name: name.into(),
            x_mm: 0.0,
            y_mm: 0.0,
            source,
            width_mm: 0.0,
            height_mm: 0.0,
        }
    }

    /// Position.
    pub fn at(mut self, x_mm: f64, y_mm: f64) -> Self {
        self.x_mm = x_mm;
        self.y_mm = y_mm;
        self
    }

    /// Fixed size.
    pub fn size(mut self, width_mm: f64, height_mm: f64) -> Self {
        self.width_mm = width_mm;
        self.height_mm = height_mm;
        self
    }

    /// Validate and wrap as a [`LabelElement`].
    pub fn build(self) -> Result<LabelElement, ValidationError> {
        self.validate()?;
        Ok(LabelElement::Image(self))
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name(&self.name)?;
        check_position(self.x_mm, self.y_mm)?;
        let empty = match &self.source {
            ImageSource::File(path) => path.trim().is_empty(),
            ImageSource::Bytes(bytes) => bytes.is_empty(),
        };
        if empty {
            return Err(ValidationError::Missing { field: "image source" });
        }
        non_negative("image width", self.width_mm)?;
        non_negative("image height", self.height_mm)
    }
}

// ── RFID ────────────────────────────────────────────────────────────────

/// Data written to the RFID inlay. Prints nothing visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct RfidElement {
    /// Logical name.
    pub name: String,
    /// Carried through the formats; not used for geometry.
    pub x_mm: f64,
    /// Carried through the formats; not used for geometry.
    pub y_mm: f64,
    /// Tag data.
    pub data: String,
    /// Encoder family.
    pub encoder: RfidEncoder,
    /// Memory bank.
    pub block: RfidDataBlock,
    /// How `data` is interpreted.
    pub data_type: RfidDataType,
    /// Write attempts before the driver reports an error.
    pub retries: u32,
    /// Text encoding for ASCII data; `None` is the driver default.
    pub encoding: Option<TextEncoding>,
    /// First block for HF writes.
    pub hf_start_block: Option<u32>,
}

impl RfidElement {
    /// ASCII payload to the EPC bank.
    pub fn new(name: impl Into<String>, encoder: RfidEncoder, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x_mm: 0.0,
            y_mm: 0.0,
            data: data.into(),
            encoder,
            block: RfidDataBlock::Epc,
            data_type: RfidDataType::Ascii,
            retries: defaults::RFID_RETRIES,
            encoding: None,
            hf_start_block: None,
        }
    }

    /// Memory bank.
    pub fn block(mut self, block: RfidDataBlock) -> Self {
        self.block = block;
        self
    }

    /// Data interpretation.
    pub fn data_type(mut self, data_type: RfidDataType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Write attempts.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Text encoding.
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// HF start block.
    pub fn hf_start_block(mut self, block: u32) -> Self {
        self.hf_start_block = Some(block);
        self
    }

    /// Validate and wrap as a [`LabelElement`].
    pub fn build(self) -> Result<LabelElement, ValidationError> {
        self.validate()?;
        Ok(LabelElement::Rfid(self))
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name(&self.name)?;
        check_position(self.x_mm, self.y_mm)?;
        if self.hf_start_block.is_some() && self.encoder != RfidEncoder::Hf {
            return Err(ValidationError::OutOfRange {
                field: "hf start block",
                reason: "only valid for the HF encoder".into(),
            });
        }
        Ok(())
    }
}

// ── Element ─────────────────────────────────────────────────────────────

/// One element of a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LabelElement {
    /// Text.
    Text(TextElement),
    /// Barcode.
    Barcode(BarcodeElement),
    /// Rectangle, line, or ellipse.
    Shape(ShapeElement),
    /// Bitmap image.
    Image(ImageElement),
    /// RFID tag data.
    Rfid(RfidElement),
}

impl LabelElement {
    /// Type tag.
    pub fn kind(&self) -> ElementKind {
        match self {
            LabelElement::Text(_) => ElementKind::Text,
            LabelElement::Barcode(_) => ElementKind::Barcode,
            LabelElement::Shape(_) => ElementKind::Shape,
            LabelElement::Image(_) => ElementKind::Image,
            LabelElement::Rfid(_) => ElementKind::Rfid,
        }
    }

    /// Logical name.
    pub fn name(&self) -> &str {
        match self {
            LabelElement::Text(e) => &e.name,
            LabelElement::Barcode(e) => &e.name,
            LabelElement::Shape(e) => &e.name,
            LabelElement::Image(e) => &e.name,
            LabelElement::Rfid(e) => &e.name,
        }
    }

    /// Position in millimeters.
    pub fn position(&self) -> (f64, f64) {
        match self {
            LabelElement::Text(e) => (e.x_mm, e.y_mm),
            LabelElement::Barcode(e) => (e.x_mm, e.y_mm),
            LabelElement::Shape(e) => (e.x_mm, e.y_mm),
            LabelElement::Image(e) => (e.x_mm, e.y_mm),
            LabelElement::Rfid(e) => (e.x_mm, e.y_mm),
        }
    }

    /// Copy moved to `(x_mm, y_mm)`. A shape's end point moves with it.
    pub fn repositioned(&self, x_mm: f64, y_mm: f64) -> Result<Self, ValidationError> {
        check_position(x_mm, y_mm)?;
        let mut moved = self.clone();
        match &mut moved {
            LabelElement::Text(e) => (e.x_mm, e.y_mm) = (x_mm, y_mm),
            LabelElement::Barcode(e) => (e.x_mm, e.y_mm) = (x_mm, y_mm),
            LabelElement::Image(e) => (e.x_mm, e.y_mm) = (x_mm, y_mm),
            LabelElement::Rfid(e) => (e.x_mm, e.y_mm) = (x_mm, y_mm),
            LabelElement::Shape(e) => {
                e.end_x_mm += x_mm - e.x_mm;
                e.end_y_mm += y_mm - e.y_mm;
                (e.x_mm, e.y_mm) = (x_mm, y_mm);
            }
        }
        moved.validate()?;
        Ok(moved)
    }

    /// Current payload: the data string, or an image's file path.
    ///
    /// `None` for shapes and byte-sourced images.
    pub fn payload(&self) -> Option<&str> {
        match self {
            LabelElement::Text(e) => Some(&e.data),
            LabelElement::Barcode(e) => Some(&e.data),
            LabelElement::Rfid(e) => Some(&e.data),
            LabelElement::Image(e) => match &e.source {
                ImageSource::File(path) => Some(path),
                ImageSource::Bytes(_) => None,
            },
            LabelElement::Shape(_) => None,
        }
    }

    /// Equivalent element with only the payload replaced.
    pub fn with_payload(&self, value: impl Into<String>) -> Result<Self, ValidationError> {
        let mut updated = self.clone();
        updated.set_payload(value)?;
        Ok(updated)
    }

    /// Replace the payload in place.
    ///
    /// Shapes fail with [`ValidationError::NoPayload`]; an image needs a
    /// non-empty path. On error the element is unchanged.
    pub fn set_payload(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        match self {
            LabelElement::Text(e) => e.data = value,
            LabelElement::Barcode(e) => e.data = value,
            LabelElement::Rfid(e) => e.data = value,
            LabelElement::Image(e) => {
                if value.trim().is_empty() {
                    return Err(ValidationError::Missing { field: "image source" });
                }
                e.source = ImageSource::File(value);
            }
            LabelElement::Shape(_) => {
                return Err(ValidationError::NoPayload {
                    kind: ElementKind::Shape,
                });
            }
        }
        Ok(())
    }

    /// Box the element declares on the label. RFID elements have none.
    ///
    /// Text reports its wrap width and one line of height; barcodes report
    /// their bar height with a driver-decided width.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            LabelElement::Text(e) => Some(Bounds {
                x_mm: e.x_mm,
                y_mm: e.y_mm,
                width_mm: e.wrap_width_mm,
                height_mm: e.font_size_pt * MM_PER_POINT,
            }),
            LabelElement::Barcode(e) => Some(Bounds {
                x_mm: e.x_mm,
                y_mm: e.y_mm,
                width_mm: 0.0,
                height_mm: e.height_mm,
            }),
            LabelElement::Shape(e) => {
                let left = e.x_mm.min(e.end_x_mm);
                let top = e.y_mm.min(e.end_y_mm);
                Some(Bounds {
                    x_mm: left,
                    y_mm: top,
                    width_mm: e.x_mm.max(e.end_x_mm) - left,
                    height_mm: e.y_mm.max(e.end_y_mm) - top,
                })
            }
            LabelElement::Image(e) => Some(Bounds {
                x_mm: e.x_mm,
                y_mm: e.y_mm,
                width_mm: e.width_mm,
                height_mm: e.height_mm,
            }),
            LabelElement::Rfid(_) => None,
        }
    }

    /// Run the variant's construction checks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            LabelElement::Text(e) => e.validate(),
            LabelElement::Barcode(e) => e.validate(),
            LabelElement::Shape(e) => e.validate(),
            LabelElement::Image(e) => e.validate(),
            LabelElement::Rfid(e) => e.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text() -> LabelElement {
        TextElement::new("title", "Hello")
            .at(2.0, 3.0)
            .font("Arial", 12.0)
            .build()
            .unwrap()
    }

    #[test]
    fn with_payload_of_current_value_is_identity() {
        let samples = vec![
            text(),
            BarcodeElement::new("sku", BarcodeKind::Code128Auto, "A-1").build().unwrap(),
            ImageElement::from_file("logo", "logo.png").build().unwrap(),
            RfidElement::new("tag", RfidEncoder::Uhf, "E200").build().unwrap(),
        ];
        for element in samples {
            let current = element.payload().unwrap().to_string();
            assert_eq!(element.with_payload(current).unwrap(), element);
        }
    }

    #[test]
    fn with_payload_replaces_only_the_payload() {
        let updated = text().with_payload("World").unwrap();
        let LabelElement::Text(t) = &updated else {
            panic!("expected text");
        };
        assert_eq!(t.data, "World");
        assert_eq!((t.x_mm, t.y_mm, t.font_size_pt), (2.0, 3.0, 12.0));
    }

    #[test]
    fn shapes_have_no_payload() {
        let mut shape = ShapeElement::new("box", ShapeKind::Rectangle, (1.0, 1.0), (5.0, 5.0))
            .build()
            .unwrap();
        assert_eq!(shape.payload(), None);
        assert_eq!(
            shape.set_payload("x"),
            Err(ValidationError::NoPayload {
                kind: ElementKind::Shape
            })
        );
    }

    #[test]
    fn construction_rejects_bad_values() {
        assert!(TextElement::new("", "x").build().is_err());
        assert!(TextElement::new("t", "x").at(-1.0, 0.0).build().is_err());
        assert!(TextElement::new("t", "x").font("Arial", 0.0).build().is_err());
        assert!(TextElement::new("t", "x").wrap(0.0).build().is_err());
        assert!(BarcodeElement::new("b", BarcodeKind::QrCode, "x").scale(0.0).build().is_err());
        assert!(BarcodeElement::new("b", BarcodeKind::QrCode, "x").height(f64::INFINITY).build().is_err());
        assert!(ShapeElement::new("s", ShapeKind::Line, (0.0, 0.0), (1.0, 1.0)).line_width(0.0).build().is_err());
        assert!(ImageElement::from_file("i", "").build().is_err());
        assert!(ImageElement::from_bytes("i", Vec::new()).build().is_err());
    }

    #[test]
    fn hf_start_block_requires_hf_encoder() {
        assert!(RfidElement::new("r", RfidEncoder::Uhf, "x").hf_start_block(4).build().is_err());
        assert!(RfidElement::new("r", RfidEncoder::Hf, "x").hf_start_block(4).build().is_ok());
    }

    #[test]
    fn reposition_moves_shape_end_point() {
        let shape = ShapeElement::new("line", ShapeKind::Line, (1.0, 2.0), (11.0, 2.0))
            .build()
            .unwrap();
        let moved = shape.repositioned(5.0, 5.0).unwrap();
        let LabelElement::Shape(s) = moved else {
            panic!("expected shape");
        };
        assert_eq!((s.x_mm, s.y_mm, s.end_x_mm, s.end_y_mm), (5.0, 5.0, 15.0, 5.0));
        assert!(text().repositioned(-1.0, 0.0).is_err());
    }

    #[test]
    fn bounds_normalize_shape_corners() {
        let shape = ShapeElement::new("s", ShapeKind::Rectangle, (10.0, 8.0), (4.0, 2.0))
            .build()
            .unwrap();
        let b = shape.bounds().unwrap();
        assert_eq!((b.x_mm, b.y_mm, b.right(), b.bottom()), (4.0, 2.0, 10.0, 8.0));
        let rfid = RfidElement::new("r", RfidEncoder::Uhf, "x").build().unwrap();
        assert!(rfid.bounds().is_none());
    }
}
