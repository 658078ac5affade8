//! Model to LSF text.
//!
//! Always writes the current schema version with one `[Printer]`, one
//! `[Label]`, and one `[Object]` record per element, in element order.

use std::fmt::Write as _;

use super::lexer::{MARKER_PREFIX, escape};
use super::schema::{self, Unit};
use crate::model::{ImageSource, LabelConfig, LabelDocument, LabelElement, PrinterConfig};

struct Writer {
    out: String,
}

impl Writer {
    fn section(&mut self, name: &str) {
        let _ = write!(self.out, "\n[{name}]\n");
    }

    fn text(&mut self, key: &str, value: &str) {
        let _ = writeln!(self.out, "{key}={}", escape(value));
    }

    fn integer(&mut self, key: &str, value: u32) {
        let _ = writeln!(self.out, "{key}={value}");
    }

    fn flag(&mut self, key: &str, value: bool) {
        self.integer(key, u32::from(value));
    }

    /// Model value quantized to the stored integer unit.
    fn scaled(&mut self, key: &str, value: f64, unit: Unit) {
        let stored = (value * unit.factor()).round() as i64;
        let _ = writeln!(self.out, "{key}={stored}");
    }
}

pub(super) fn encode(doc: &LabelDocument) -> String {
    let mut w = Writer {
        out: format!("{MARKER_PREFIX}{}\n", schema::CURRENT_VERSION),
    };
    printer(&mut w, &doc.printer);
    label(&mut w, &doc.label);
    for element in &doc.elements {
        object(&mut w, element);
    }
    w.out
}

fn printer(w: &mut Writer, p: &PrinterConfig) {
    w.section(schema::PRINTER_SECTION);
    w.integer("Interface", p.interface.code());
    w.integer("Dpi", p.dpi);
    w.integer("Speed", p.speed);
    w.integer("Darkness", p.darkness);
    if let Some(address) = &p.address {
        w.text("Address", address);
    }
    if let Some(serial) = &p.serial {
        w.text("Serial", serial);
    }
    if let Some(driver) = &p.driver_name {
        w.text("Driver", driver);
    }
    w.flag("Gap", p.has_gap);
}

fn label(w: &mut Writer, l: &LabelConfig) {
    w.section(schema::LABEL_SECTION);
    w.scaled("Width", l.width_mm, Unit::Micrometers);
    w.scaled("Height", l.height_mm, Unit::Micrometers);
    w.scaled("Gap", l.gap_mm, Unit::Micrometers);
}

fn object(w: &mut Writer, element: &LabelElement) {
    let record = schema::for_kind(element.kind());
    w.section(schema::OBJECT_SECTION);
    w.integer("Kind", record.code.unwrap_or_default());
    w.text("Name", element.name());
    let (x, y) = element.position();
    w.scaled("X", x, Unit::Micrometers);
    w.scaled("Y", y, Unit::Micrometers);

    match element {
        LabelElement::Text(e) => {
            w.text("Data", &e.data);
            w.text("Font", &e.font_name);
            w.scaled("Size", e.font_size_pt, Unit::DeciPoints);
            w.integer("Mode", e.style.bits());
            w.integer("Align", e.align.code());
            w.integer("VAlign", e.valign.code());
            w.flag("Flag", e.multiline);
            w.scaled("Width", e.wrap_width_mm, Unit::Micrometers);
        }
        LabelElement::Barcode(e) => {
            w.text("Data", &e.data);
            w.integer("Mode", e.symbology.code());
            w.scaled("Param", e.scale, Unit::Hundredths);
            w.scaled("Height", e.height_mm, Unit::Micrometers);
            w.integer("Align", e.align.code());
            w.integer("Extra", e.hri.code());
        }
        LabelElement::Shape(e) => {
            w.integer("Mode", e.shape.code());
            w.scaled("Width", e.end_x_mm, Unit::Micrometers);
            w.scaled("Height", e.end_y_mm, Unit::Micrometers);
            w.scaled("Param", e.line_width_mm, Unit::Micrometers);
            w.scaled("Extra", e.corner_radius_mm, Unit::Micrometers);
            w.flag("Flag", e.fill);
            w.integer("Style", e.dash.code());
        }
        LabelElement::Image(e) => {
            let source = match &e.source {
                ImageSource::File(path) => format!("file:{path}"),
                ImageSource::Bytes(bytes) => format!("hex:{}", hex::encode_upper(bytes)),
            };
            w.text("Source", &source);
            w.scaled("Width", e.width_mm, Unit::Micrometers);
            w.scaled("Height", e.height_mm, Unit::Micrometers);
        }
        LabelElement::Rfid(e) => {
            w.text("Data", &e.data);
            w.integer("Mode", e.encoder.code());
            w.integer("Extra", e.block.code());
            w.integer("Style", e.data_type.code());
            w.integer("Param", e.retries);
            w.integer("Encoding", e.encoding.map_or(0, |enc| enc.code()));
            if let Some(block) = e.hf_start_block {
                w.integer("Block", block);
            }
        }
    }
}
