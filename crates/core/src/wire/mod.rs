//! The wire JSON payload exchanged with label designer front ends.
//!
//! ```json
//! {
//!   "Printer": { "printerinterface": "USB", "printnum": 1, "printerdpi": 300 },
//!   "LabelFormat": { "labelwidth": 60, "labelheight": 40, "labelrowgap": 2 },
//!   "LabelObjectList": [ { "ObjectName": "text-1", "textfont": "Arial", "objectdata": "Hi" } ],
//!   "Operate": "print"
//! }
//! ```
//!
//! Decoding is lenient: absent fields take defaults, unknown fields are
//! ignored, and a malformed object is dropped with its index reported while
//! the rest of the batch decodes. Encoding writes sparse objects holding only
//! the fields of each element's own variant.

mod classify;
mod convert;
mod records;

use serde::Serialize;
use zmlabel_diagnostics::{Diagnostic, Span, codes};

use self::records::{RawPayload, WireLabel, WireObject, WirePrinter};
use crate::codec::{self, CodecError};
use crate::model::{
    InterfaceKind, LabelConfig, LabelDocument, LabelElement, PrinterConfig, defaults,
};

// ── Operate ─────────────────────────────────────────────────────────────

/// What the payload asks the receiver to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operate {
    /// Print the label.
    Print,
    /// Render a preview only.
    Preview,
    /// Anything else. Nothing is dispatched.
    Other(String),
}

impl Operate {
    /// Case-insensitive parse; unrecognized values become [`Operate::Other`].
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("print") {
            Operate::Print
        } else if trimmed.eq_ignore_ascii_case("preview") {
            Operate::Preview
        } else {
            Operate::Other(value.to_string())
        }
    }

    /// Value written to the `Operate` field.
    pub fn as_str(&self) -> &str {
        match self {
            Operate::Print => "print",
            Operate::Preview => "preview",
            Operate::Other(value) => value,
        }
    }
}

impl std::fmt::Display for Operate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Decode ──────────────────────────────────────────────────────────────

/// Everything a wire decode produced.
///
/// On a `Format` error the configs are `None` and there are no elements. On
/// `Partial` a config is `None` only when its block was present but invalid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireDecoded {
    /// Printer settings.
    pub printer: Option<PrinterConfig>,
    /// Label geometry.
    pub label: Option<LabelConfig>,
    /// Decoded elements, in payload order.
    pub elements: Vec<LabelElement>,
    /// Requested copy count (`printnum`). Not validated here.
    pub copies: u32,
    /// Requested operation, if the payload had one.
    pub operate: Option<Operate>,
    /// Indices into `LabelObjectList` of objects dropped as malformed.
    pub failed: Vec<usize>,
    /// Everything noticed while decoding.
    pub diagnostics: Vec<Diagnostic>,
    /// Overall status; `None` when the payload decoded cleanly.
    pub error: Option<CodecError>,
}

impl WireDecoded {
    fn failed(diag: Diagnostic, error: CodecError) -> Self {
        tracing::warn!(code = %diag.id, "{}", diag.message);
        Self {
            printer: None,
            label: None,
            elements: Vec::new(),
            copies: defaults::COPIES,
            operate: None,
            failed: Vec::new(),
            diagnostics: vec![diag],
            error: Some(error),
        }
    }

    /// `true` when nothing was dropped or invalid.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The decoded document, if both config blocks were usable.
    pub fn into_document(self) -> Option<LabelDocument> {
        Some(LabelDocument::new(self.printer?, self.label?, self.elements))
    }
}

/// Decode a wire JSON payload. Never fails; problems are reported in the
/// result.
pub fn decode_wire(input: &str) -> WireDecoded {
    let value: serde_json::Value = match serde_json::from_str(input) {
        Ok(value) => value,
        Err(err) => {
            let span = offset_of(input, err.line(), err.column()).map(Span::empty);
            let message = format!("invalid JSON: {err}");
            let diag = Diagnostic::error(codes::WIRE_INVALID_JSON, message.clone(), span);
            return WireDecoded::failed(diag, CodecError::Format { message });
        }
    };
    if !value.is_object() {
        let message = "payload must be a JSON object".to_string();
        let diag = Diagnostic::error(codes::WIRE_INVALID_JSON, message.clone(), None);
        return WireDecoded::failed(diag, CodecError::Format { message });
    }
    let raw: RawPayload = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(err) => {
            let message = format!("unexpected payload shape: {err}");
            let diag = Diagnostic::error(codes::WIRE_INVALID_JSON, message.clone(), None);
            return WireDecoded::failed(diag, CodecError::Format { message });
        }
    };

    let mut d = Decoder::default();
    let (printer, copies) = d.printer(raw.printer);
    let label = d.label(raw.label);
    let elements = raw
        .objects
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| d.object(index, value))
        .collect();
    let operate = raw.operate.map(|op| d.operate(&op));

    WireDecoded {
        printer,
        label,
        elements,
        copies,
        operate,
        error: CodecError::partial(d.problems),
        failed: d.failed,
        diagnostics: d.diags,
    }
}

#[derive(Default)]
struct Decoder {
    diags: Vec<Diagnostic>,
    failed: Vec<usize>,
    problems: usize,
}

impl Decoder {
    fn invalid_config(&mut self, block: &str, reason: impl std::fmt::Display) {
        codec::push(
            &mut self.diags,
            Diagnostic::error(
                codes::WIRE_INVALID_CONFIG,
                format!("invalid {block} block: {reason}"),
                None,
            )
            .with_context(ctx!("block" => block)),
        );
        self.problems += 1;
    }

    fn printer(&mut self, block: Option<serde_json::Value>) -> (Option<PrinterConfig>, u32) {
        let Some(block) = block else {
            return (Some(PrinterConfig::default()), defaults::COPIES);
        };
        let wire: WirePrinter = match serde_json::from_value(block) {
            Ok(wire) => wire,
            Err(err) => {
                self.invalid_config("Printer", err);
                return (None, defaults::COPIES);
            }
        };
        let copies = wire.copies.unwrap_or(defaults::COPIES);
        let interface = convert::interface(&wire).unwrap_or_else(|| {
            let name = wire.interface.as_deref().unwrap_or_default();
            codec::push(
                &mut self.diags,
                Diagnostic::warn(
                    codes::WIRE_UNKNOWN_INTERFACE,
                    format!("unknown printer interface {name:?}, using USB"),
                    None,
                )
                .with_context(ctx!("interface" => name)),
            );
            InterfaceKind::Usb
        });
        match convert::printer_config(&wire, interface) {
            Ok(config) => (Some(config), copies),
            Err(err) => {
                self.invalid_config("Printer", err);
                (None, copies)
            }
        }
    }

    fn label(&mut self, block: Option<serde_json::Value>) -> Option<LabelConfig> {
        let Some(block) = block else {
            return Some(LabelConfig::default());
        };
        let result = serde_json::from_value::<WireLabel>(block)
            .map_err(|err| err.to_string())
            .and_then(|wire| convert::label_config(&wire).map_err(|err| err.to_string()));
        match result {
            Ok(config) => Some(config),
            Err(reason) => {
                self.invalid_config("LabelFormat", reason);
                None
            }
        }
    }

    fn invalid_object(&mut self, index: usize, name: Option<&str>, reason: impl std::fmt::Display) {
        let name = name.unwrap_or_default();
        codec::push(
            &mut self.diags,
            Diagnostic::error(
                codes::WIRE_INVALID_OBJECT,
                format!("object {index} ({name:?}) dropped: {reason}"),
                None,
            )
            .with_context(ctx!("index" => index.to_string(), "name" => name)),
        );
        self.failed.push(index);
        self.problems += 1;
    }

    fn object(&mut self, index: usize, value: serde_json::Value) -> Option<LabelElement> {
        let obj: WireObject = match serde_json::from_value(value) {
            Ok(obj) => obj,
            Err(err) => {
                self.invalid_object(index, None, err);
                return None;
            }
        };
        let Some(kind) = classify::classify(&obj) else {
            let name = obj.name.as_deref().unwrap_or_default();
            codec::push(
                &mut self.diags,
                Diagnostic::warn(
                    codes::WIRE_UNCLASSIFIED_OBJECT,
                    format!("object {index} ({name:?}) matches no element kind, skipped"),
                    None,
                )
                .with_context(ctx!("index" => index.to_string(), "name" => name)),
            );
            return None;
        };
        match convert::to_element(kind, &obj) {
            Ok(element) => Some(element),
            Err(err) => {
                self.invalid_object(index, obj.name.as_deref(), format_args!("{kind}: {err}"));
                None
            }
        }
    }

    fn operate(&mut self, value: &str) -> Operate {
        let op = Operate::parse(value);
        if let Operate::Other(other) = &op {
            codec::push(
                &mut self.diags,
                Diagnostic::warn(
                    codes::WIRE_UNKNOWN_OPERATE,
                    format!("unknown operation {other:?}, no action will be taken"),
                    None,
                ),
            );
        }
        op
    }
}

/// Byte offset of a 1-based line/column pair reported by `serde_json`.
fn offset_of(input: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = input
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(input.len()))
}

// ── Encode ──────────────────────────────────────────────────────────────

/// Encode a document as a wire payload.
///
/// `Operate` is written only when `operate` is given.
pub fn encode_wire(doc: &LabelDocument, copies: u32, operate: Option<&Operate>) -> serde_json::Value {
    let objects: Vec<WireObject> = doc.elements.iter().map(convert::to_wire).collect();
    let mut payload = serde_json::json!({
        "Printer": convert::wire_printer(&doc.printer, copies),
        "LabelFormat": convert::wire_label(&doc.label),
        "LabelObjectList": objects,
    });
    if let (Some(op), Some(map)) = (operate, payload.as_object_mut()) {
        map.insert("Operate".into(), op.as_str().into());
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BarcodeElement, BarcodeKind, DashStyle, FontStyle, HAlign, HriPosition, ImageElement,
        RfidDataBlock, RfidDataType, RfidElement, RfidEncoder, ShapeElement, ShapeKind,
        TextElement, TextEncoding, VAlign,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_document() -> LabelDocument {
        let printer = PrinterConfig::builder(InterfaceKind::RfidNetwork)
            .address("192.168.1.40")
            .dpi(203)
            .speed(6)
            .darkness(18)
            .has_gap(false)
            .build()
            .unwrap();
        let label = LabelConfig::new(103.0, 40.0, 4.0).unwrap();
        let elements = vec![
            TextElement::new("text-1", "Batch 2504170000")
                .at(77.96986, 12.6299973)
                .font("SimHei", 5.5)
                .style(FontStyle::BOLD | FontStyle::UNDERLINE)
                .wrap(24.0)
                .align(HAlign::Right, VAlign::Bottom)
                .build()
                .unwrap(),
            BarcodeElement::new("barcode-1", BarcodeKind::Gs1Code128, "(01)09501101530008")
                .at(78.02, 23.51)
                .scale(1.5)
                .height(6.56)
                .hri(HriPosition::Above)
                .build()
                .unwrap(),
            ShapeElement::new("line-1", ShapeKind::Line, (2.0, 30.0), (100.0, 30.0))
                .line_width(0.3)
                .dash(DashStyle::Dot)
                .build()
                .unwrap(),
            ImageElement::from_bytes("image-1", vec![0x00, 0x7f, 0xff])
                .at(5.0, 5.0)
                .size(10.0, 10.0)
                .build()
                .unwrap(),
            ImageElement::from_file("image-2", "logos/acme.bmp")
                .at(20.0, 5.0)
                .build()
                .unwrap(),
            RfidElement::new("rfidhf-1", RfidEncoder::Hf, "0A1B2C3D")
                .block(RfidDataBlock::User)
                .data_type(RfidDataType::Hex)
                .retries(3)
                .encoding(TextEncoding::Gbk)
                .hf_start_block(4)
                .build()
                .unwrap(),
        ];
        LabelDocument::new(printer, label, elements)
    }

    #[test]
    fn round_trip_is_exact() {
        let doc = sample_document();
        let payload = encode_wire(&doc, 3, Some(&Operate::Print));
        let decoded = decode_wire(&payload.to_string());
        assert!(decoded.is_ok(), "{:?}", decoded.diagnostics);
        assert!(decoded.diagnostics.is_empty());
        assert_eq!(decoded.copies, 3);
        assert_eq!(decoded.operate, Some(Operate::Print));
        assert_eq!(decoded.into_document(), Some(doc));
    }

    #[test]
    fn encoded_objects_are_sparse() {
        let doc = sample_document();
        let payload = encode_wire(&doc, 1, None);
        assert!(payload.get("Operate").is_none());
        let objects = payload["LabelObjectList"].as_array().unwrap();
        let text = objects[0].as_object().unwrap();
        assert!(text.contains_key("textfont"));
        assert!(!text.contains_key("barcodekind"));
        assert!(!text.contains_key("rectangleclass"));
        assert_eq!(objects[1]["barcodekind"], json!("GS1-128"));
        assert_eq!(objects[2]["startXposition"], objects[2]["Xposition"]);
        assert_eq!(objects[3]["imagedata"], json!("007FFF"));
        assert_eq!(payload["Printer"]["printerinterface"], json!("RFID_NET"));
    }

    #[test]
    fn absent_fields_take_defaults() {
        let decoded = decode_wire(
            r#"{"LabelObjectList": [
                {"ObjectName": "t", "textfont": "Arial"},
                {"ObjectName": "b", "barcodekind": 11, "objectdata": "hello"}
            ]}"#,
        );
        assert!(decoded.is_ok());
        assert_eq!(decoded.printer, Some(PrinterConfig::default()));
        assert_eq!(decoded.label, Some(LabelConfig::default()));
        assert_eq!(decoded.copies, 1);
        assert_eq!(decoded.operate, None);

        let LabelElement::Text(text) = &decoded.elements[0] else {
            panic!("expected text");
        };
        assert_eq!(text.font_size_pt, defaults::FONT_SIZE_PT);
        assert_eq!(text.data, "");
        let LabelElement::Barcode(code) = &decoded.elements[1] else {
            panic!("expected barcode");
        };
        assert_eq!(code.symbology, BarcodeKind::QrCode);
        assert_eq!(code.height_mm, defaults::BARCODE_HEIGHT_MM);

        // Re-encoding fills every default explicitly and decodes identically.
        let doc = decoded.into_document().unwrap();
        let again = decode_wire(&encode_wire(&doc, 1, None).to_string());
        assert_eq!(again.into_document(), Some(doc));
    }

    #[test]
    fn malformed_object_is_dropped_and_reported() {
        let decoded = decode_wire(
            r#"{"LabelObjectList": [
                {"ObjectName": "a", "textfont": "Arial", "objectdata": "1"},
                {"ObjectName": "b", "textfont": "Arial", "objectdata": "2"},
                {"ObjectName": "c", "rectangleclass": 0, "endXposition": 5},
                {"ObjectName": "d", "textfont": "Arial", "objectdata": "4"}
            ]}"#,
        );
        assert_eq!(decoded.failed, vec![2]);
        assert_eq!(decoded.error, Some(CodecError::Partial { problems: 1 }));
        let names: Vec<_> = decoded.elements.iter().map(LabelElement::name).collect();
        assert_eq!(names, ["a", "b", "d"]);
        let diag = decoded
            .diagnostics
            .iter()
            .find(|d| d.id == codes::WIRE_INVALID_OBJECT)
            .unwrap();
        assert!(diag.message.contains("endYposition"), "{}", diag.message);
    }

    #[test]
    fn bad_codes_and_hex_drop_the_object() {
        let decoded = decode_wire(
            r#"{"LabelObjectList": [
                {"ObjectName": "b", "barcodekind": "Aztec"},
                {"ObjectName": "r", "RFIDEncodertype": 7},
                {"ObjectName": "i", "imagedata": "XYZ"},
                {"ObjectName": "t", "textfont": "Arial", "fontsize": "big"},
                {"ObjectName": "s", "rectangleclass": 1, "endXposition": 5, "endYposition": 5}
            ]}"#,
        );
        assert_eq!(decoded.failed, vec![0, 1, 2, 3]);
        assert_eq!(decoded.elements.len(), 1);
    }

    #[test]
    fn unclassified_object_warns_without_failing() {
        let decoded = decode_wire(r#"{"LabelObjectList": [{"ObjectName": "x", "objectdata": "?"}]}"#);
        assert!(decoded.is_ok());
        assert!(decoded.failed.is_empty());
        assert!(decoded.elements.is_empty());
        assert_eq!(decoded.diagnostics[0].id, codes::WIRE_UNCLASSIFIED_OBJECT);
    }

    #[test]
    fn unknown_interface_falls_back_to_usb() {
        let decoded = decode_wire(r#"{"Printer": {"printerinterface": "bluetooth", "printerdpi": 600}}"#);
        assert!(decoded.is_ok());
        let printer = decoded.printer.unwrap();
        assert_eq!(printer.interface, InterfaceKind::Usb);
        assert_eq!(printer.dpi, 600);
        assert_eq!(decoded.diagnostics[0].id, codes::WIRE_UNKNOWN_INTERFACE);
    }

    #[test]
    fn interface_names_are_case_insensitive_and_empty_strings_are_absent() {
        let decoded = decode_wire(
            r#"{"Printer": {"printerinterface": "net", "printernetip": "10.1.1.9", "printermbsn": ""}}"#,
        );
        let printer = decoded.printer.unwrap();
        assert_eq!(printer.interface, InterfaceKind::Network);
        assert_eq!(printer.address.as_deref(), Some("10.1.1.9"));
        assert_eq!(printer.serial, None);
    }

    #[test]
    fn network_printer_without_address_is_invalid() {
        let decoded = decode_wire(r#"{"Printer": {"printerinterface": "NETWORK", "printernetip": ""}}"#);
        assert_eq!(decoded.printer, None);
        assert_eq!(decoded.label, Some(LabelConfig::default()));
        assert_eq!(decoded.error, Some(CodecError::Partial { problems: 1 }));
        assert_eq!(decoded.diagnostics[0].id, codes::WIRE_INVALID_CONFIG);
    }

    #[test]
    fn invalid_label_geometry_is_reported() {
        let decoded = decode_wire(r#"{"LabelFormat": {"labelwidth": 0}}"#);
        assert_eq!(decoded.label, None);
        assert!(decoded.printer.is_some());
        assert!(decoded.into_document().is_none());
    }

    #[test]
    fn invalid_json_is_a_format_error_with_location() {
        let input = "{\n  \"Printer\": {,\n}";
        let decoded = decode_wire(input);
        assert!(matches!(decoded.error, Some(CodecError::Format { .. })));
        assert!(decoded.elements.is_empty());
        let span = decoded.diagnostics[0].span.unwrap();
        assert_eq!(&input[span.start..=span.start], ",");
    }

    #[test]
    fn non_object_payload_is_a_format_error() {
        for input in ["[1, 2]", "\"print\"", r#"{"LabelObjectList": 5}"#] {
            let decoded = decode_wire(input);
            assert!(matches!(decoded.error, Some(CodecError::Format { .. })), "{input}");
        }
    }

    #[test]
    fn operate_is_case_insensitive() {
        assert_eq!(Operate::parse("PREVIEW"), Operate::Preview);
        assert_eq!(Operate::parse(" Print "), Operate::Print);
        assert_eq!(Operate::parse("reprint"), Operate::Other("reprint".into()));

        let decoded = decode_wire(r#"{"Operate": "archive"}"#);
        assert!(decoded.is_ok());
        assert_eq!(decoded.operate, Some(Operate::Other("archive".into())));
        assert_eq!(decoded.diagnostics[0].id, codes::WIRE_UNKNOWN_OPERATE);
    }

    #[test]
    fn hf_start_block_is_ignored_for_uhf() {
        let decoded = decode_wire(
            r#"{"LabelObjectList": [
                {"ObjectName": "rfid-1", "RFIDEncodertype": 0, "objectdata": "ABC", "HFstartblock": 3, "RFIDTextencoding": 0}
            ]}"#,
        );
        let LabelElement::Rfid(tag) = &decoded.elements[0] else {
            panic!("expected rfid");
        };
        assert_eq!(tag.hf_start_block, None);
        assert_eq!(tag.encoding, None);
    }
}
