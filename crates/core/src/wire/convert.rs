//! Field mapping between wire records and the model, per variant.

use super::records::{NameOrCode, WireLabel, WireObject, WirePrinter};
use crate::model::{
    BarcodeElement, BarcodeKind, DashStyle, ElementKind, FontStyle, HAlign, HriPosition,
    ImageElement, ImageSource, InterfaceKind, LabelConfig, LabelElement, PrinterConfig,
    RfidDataBlock, RfidDataType, RfidElement, RfidEncoder, ShapeElement, ShapeKind, TextElement,
    TextEncoding, VAlign, ValidationError, defaults,
};

fn code<T>(field: &'static str, value: Option<u32>, lookup: impl Fn(u32) -> Option<T>) -> Result<Option<T>, ValidationError> {
    value
        .map(|c| {
            lookup(c).ok_or_else(|| ValidationError::UnknownValue {
                field,
                value: c.to_string(),
            })
        })
        .transpose()
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing { field })
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

// ── Printer / label ─────────────────────────────────────────────────────

/// Interface from the wire name; `None` when the name is present but unknown.
pub(crate) fn interface(p: &WirePrinter) -> Option<InterfaceKind> {
    match non_empty(p.interface.as_ref()) {
        None => Some(InterfaceKind::Usb),
        Some(name) => InterfaceKind::from_wire_name(name),
    }
}

pub(crate) fn printer_config(p: &WirePrinter, interface: InterfaceKind) -> Result<PrinterConfig, ValidationError> {
    let mut builder = PrinterConfig::builder(interface)
        .dpi(p.dpi.unwrap_or(defaults::DPI))
        .speed(p.speed.unwrap_or(defaults::SPEED))
        .darkness(p.darkness.unwrap_or(defaults::DARKNESS))
        .has_gap(p.has_gap.unwrap_or(defaults::HAS_GAP));
    if let Some(address) = &p.address {
        builder = builder.address(address.as_str());
    }
    if let Some(serial) = &p.serial {
        builder = builder.serial(serial.as_str());
    }
    if let Some(name) = &p.driver_name {
        builder = builder.driver_name(name.as_str());
    }
    builder.build()
}

pub(crate) fn wire_printer(config: &PrinterConfig, copies: u32) -> WirePrinter {
    WirePrinter {
        interface: Some(config.interface.wire_name().to_string()),
        copies: Some(copies),
        dpi: Some(config.dpi),
        speed: Some(config.speed),
        darkness: Some(config.darkness),
        serial: config.serial.clone(),
        address: config.address.clone(),
        driver_name: config.driver_name.clone(),
        has_gap: Some(config.has_gap),
    }
}

pub(crate) fn label_config(l: &WireLabel) -> Result<LabelConfig, ValidationError> {
    LabelConfig::new(
        l.width.unwrap_or(defaults::LABEL_WIDTH_MM),
        l.height.unwrap_or(defaults::LABEL_HEIGHT_MM),
        l.gap.unwrap_or(defaults::LABEL_GAP_MM),
    )
}

pub(crate) fn wire_label(config: &LabelConfig) -> WireLabel {
    WireLabel {
        width: Some(config.width_mm),
        height: Some(config.height_mm),
        gap: Some(config.gap_mm),
    }
}

// ── Elements ────────────────────────────────────────────────────────────

/// Build the `kind` variant from `obj`, applying defaults for absent fields.
pub(crate) fn to_element(kind: ElementKind, obj: &WireObject) -> Result<LabelElement, ValidationError> {
    let name = obj.name.clone().unwrap_or_default();
    let data = obj.data.clone().unwrap_or_default();
    let x = obj.x.unwrap_or(0.0);
    let y = obj.y.unwrap_or(0.0);

    match kind {
        ElementKind::Text => {
            let mut e = TextElement::new(name, data).at(x, y);
            if let Some(font) = &obj.font {
                e.font_name.clone_from(font);
            }
            e.font_size_pt = obj.font_size.unwrap_or(defaults::FONT_SIZE_PT);
            e.style = code("fontstyle", obj.font_style, FontStyle::from_bits)?.unwrap_or_default();
            e.align = code("texttextalign", obj.text_align, HAlign::from_code)?.unwrap_or_default();
            e.valign = code("texttextvalign", obj.text_valign, VAlign::from_code)?.unwrap_or_default();
            e.multiline = obj.multiline.unwrap_or(false);
            e.wrap_width_mm = obj.text_width.unwrap_or(0.0);
            e.build()
        }
        ElementKind::Barcode => {
            let symbology = match required("barcodekind", obj.barcode_kind.as_ref())? {
                NameOrCode::Name(n) => BarcodeKind::from_name(n),
                NameOrCode::Code(c) => BarcodeKind::from_code(*c),
            }
            .ok_or_else(|| ValidationError::UnknownValue {
                field: "barcodekind",
                value: match obj.barcode_kind.as_ref() {
                    Some(NameOrCode::Name(n)) => n.clone(),
                    Some(NameOrCode::Code(c)) => c.to_string(),
                    None => String::new(),
                },
            })?;
            let mut e = BarcodeElement::new(name, symbology, data).at(x, y);
            e.scale = obj.barcode_scale.unwrap_or(defaults::BARCODE_SCALE);
            e.height_mm = obj.barcode_height.unwrap_or(defaults::BARCODE_HEIGHT_MM);
            e.align = code("barcodealign", obj.barcode_align, HAlign::from_code)?.unwrap_or_default();
            e.hri = code("textposition", obj.text_position, HriPosition::from_code)?.unwrap_or_default();
            e.build()
        }
        ElementKind::Shape => {
            let shape = code("rectangleclass", obj.shape_class, ShapeKind::from_code)?.unwrap_or_default();
            let start = (obj.start_x.unwrap_or(x), obj.start_y.unwrap_or(y));
            let end = (
                required("endXposition", obj.end_x)?,
                required("endYposition", obj.end_y)?,
            );
            let mut e = ShapeElement::new(name, shape, start, end);
            e.line_width_mm = obj.line_width.unwrap_or(defaults::LINE_WIDTH_MM);
            e.corner_radius_mm = obj.corner_radius.unwrap_or(0.0);
            e.fill = obj.fill.unwrap_or(false);
            e.dash = code("lineDashStyle", obj.dash_style, DashStyle::from_code)?.unwrap_or_default();
            e.build()
        }
        ElementKind::Image => {
            let source = if let Some(digits) = non_empty(obj.image_data.as_ref()) {
                let bytes = hex::decode(digits.trim()).map_err(|err| ValidationError::UnknownValue {
                    field: "imagedata",
                    value: err.to_string(),
                })?;
                ImageSource::Bytes(bytes)
            } else {
                ImageSource::File(required("imagefile", non_empty(obj.image_file.as_ref()))?.to_string())
            };
            let mut e = ImageElement::with_source(name, source).at(x, y);
            e.width_mm = obj.image_width.unwrap_or(0.0);
            e.height_mm = obj.image_height.unwrap_or(0.0);
            e.build()
        }
        ElementKind::Rfid => {
            let encoder = code("RFIDEncodertype", obj.rfid_encoder, RfidEncoder::from_code)?;
            let encoder = required("RFIDEncodertype", encoder)?;
            let mut e = RfidElement::new(name, encoder, data);
            (e.x_mm, e.y_mm) = (x, y);
            e.block = code("RFIDDatablock", obj.rfid_block, RfidDataBlock::from_code)?.unwrap_or_default();
            e.data_type = code("RFIDDatatype", obj.rfid_data_type, RfidDataType::from_code)?.unwrap_or_default();
            e.retries = obj.rfid_retries.unwrap_or(defaults::RFID_RETRIES);
            e.encoding = match obj.rfid_encoding {
                None | Some(0) => None,
                other => code("RFIDTextencoding", other, TextEncoding::from_code)?,
            };
            // Designer exports carry HFstartblock for UHF tags too.
            if encoder == RfidEncoder::Hf {
                e.hf_start_block = obj.hf_start_block;
            }
            e.build()
        }
    }
}

/// Sparse record holding only the fields of the element's own variant.
pub(crate) fn to_wire(element: &LabelElement) -> WireObject {
    let (x, y) = element.position();
    let mut obj = WireObject {
        name: Some(element.name().to_string()),
        x: Some(x),
        y: Some(y),
        ..WireObject::default()
    };
    match element {
        LabelElement::Text(e) => {
            obj.data = Some(e.data.clone());
            obj.font = Some(e.font_name.clone());
            obj.font_size = Some(e.font_size_pt);
            obj.font_style = Some(e.style.bits());
            obj.text_align = Some(e.align.code());
            obj.text_valign = Some(e.valign.code());
            obj.multiline = Some(e.multiline);
            obj.text_width = Some(e.wrap_width_mm);
        }
        LabelElement::Barcode(e) => {
            obj.data = Some(e.data.clone());
            obj.barcode_kind = Some(NameOrCode::Name(e.symbology.display_name().to_string()));
            obj.barcode_scale = Some(e.scale);
            obj.barcode_height = Some(e.height_mm);
            obj.barcode_align = Some(e.align.code());
            obj.text_position = Some(e.hri.code());
        }
        LabelElement::Shape(e) => {
            obj.shape_class = Some(e.shape.code());
            obj.start_x = Some(e.x_mm);
            obj.start_y = Some(e.y_mm);
            obj.end_x = Some(e.end_x_mm);
            obj.end_y = Some(e.end_y_mm);
            obj.line_width = Some(e.line_width_mm);
            obj.corner_radius = Some(e.corner_radius_mm);
            obj.fill = Some(e.fill);
            obj.dash_style = Some(e.dash.code());
        }
        LabelElement::Image(e) => {
            match &e.source {
                ImageSource::File(path) => obj.image_file = Some(path.clone()),
                ImageSource::Bytes(bytes) => obj.image_data = Some(hex::encode_upper(bytes)),
            }
            obj.image_width = Some(e.width_mm);
            obj.image_height = Some(e.height_mm);
        }
        LabelElement::Rfid(e) => {
            obj.data = Some(e.data.clone());
            obj.rfid_encoder = Some(e.encoder.code());
            obj.rfid_block = Some(e.block.code());
            obj.rfid_data_type = Some(e.data_type.code());
            obj.rfid_encoding = Some(e.encoding.map_or(0, TextEncoding::code));
            obj.rfid_retries = Some(e.retries);
            obj.hf_start_block = e.hf_start_block;
        }
    }
    obj
}
