//! The legacy LSF label file format.
//!
//! ```text
//! LSF/2
//!
//! [Printer]
//! Interface=0
//! Dpi=300
//!
//! [Label]
//! Width=60000
//! Height=40000
//!
//! [Object]
//! Kind=1
//! Name=title
//! X=2000
//! Y=3000
//! Data=Hello
//! ```
//!
//! Lengths are integer micrometers, font sizes tenths of a point, barcode
//! scale hundredths; enumerations and booleans are integer codes. See
//! [`schema`] for what each key means per record kind.

mod decode;
mod encode;
pub(crate) mod lexer;
pub mod schema;

use serde::Serialize;
use zmlabel_diagnostics::Diagnostic;

use crate::codec::CodecError;
use crate::model::{LabelConfig, LabelDocument, LabelElement, PrinterConfig};

/// Everything an LSF decode produced.
///
/// On a `Format` or `Version` error the configs are `None` and there are no
/// elements. On `Partial` the configs are present (possibly defaulted) and
/// `elements` holds every record that decoded cleanly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LsfDecoded {
    /// Schema version from the marker line.
    pub version: Option<u32>,
    /// Printer settings.
    pub printer: Option<PrinterConfig>,
    /// Label geometry.
    pub label: Option<LabelConfig>,
    /// Decoded elements, in file order.
    pub elements: Vec<LabelElement>,
    /// Everything noticed while decoding.
    pub diagnostics: Vec<Diagnostic>,
    /// Overall status; `None` when the file decoded cleanly.
    pub error: Option<CodecError>,
}

impl LsfDecoded {
    fn failed(version: Option<u32>, diag: Diagnostic, error: CodecError) -> Self {
        tracing::warn!(code = %diag.id, "{}", diag.message);
        Self {
            version,
            printer: None,
            label: None,
            elements: Vec::new(),
            diagnostics: vec![diag],
            error: Some(error),
        }
    }

    /// `true` when nothing was skipped or defaulted.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The decoded document, if the header sections were produced.
    pub fn into_document(self) -> Option<LabelDocument> {
        Some(LabelDocument::new(self.printer?, self.label?, self.elements))
    }
}

/// Decode LSF text. Never fails; problems are reported in the result.
pub fn decode_lsf(input: &str) -> LsfDecoded {
    decode::decode(input)
}

/// Encode a document as LSF text at the current schema version.
pub fn encode_lsf(doc: &LabelDocument) -> String {
    encode::encode(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BarcodeElement, BarcodeKind, DashStyle, FontStyle, HAlign, HriPosition, ImageElement,
        InterfaceKind, RfidDataBlock, RfidDataType, RfidElement, RfidEncoder, ShapeElement,
        ShapeKind, TextElement, TextEncoding, VAlign,
    };
    use pretty_assertions::assert_eq;
    use zmlabel_diagnostics::codes;

    fn sample_document() -> LabelDocument {
        let printer = PrinterConfig::builder(InterfaceKind::RfidNetwork)
            .address("10.0.0.7")
            .dpi(203)
            .darkness(18)
            .has_gap(false)
            .build()
            .unwrap();
        let label = LabelConfig::new(103.0, 40.0, 4.0).unwrap();
        let elements = vec![
            TextElement::new("title", "Line one\nLine = two \\ end")
                .at(2.5, 3.25)
                .font("SimHei", 10.5)
                .style(FontStyle::BOLD | FontStyle::ITALIC)
                .wrap(50.0)
                .align(HAlign::Center, VAlign::Middle)
                .build()
                .unwrap(),
            BarcodeElement::new("sku", BarcodeKind::QrCode, "https://example.com/a?b=c")
                .at(70.0, 5.0)
                .scale(1.25)
                .height(20.0)
                .align(HAlign::Right)
                .hri(HriPosition::Hidden)
                .build()
                .unwrap(),
            ShapeElement::new("frame", ShapeKind::Rectangle, (1.0, 1.0), (102.0, 39.0))
                .line_width(0.4)
                .corner_radius(2.0)
                .filled(true)
                .dash(DashStyle::DashDot)
                .build()
                .unwrap(),
            ImageElement::from_bytes("logo", vec![0x42, 0x4d, 0x00, 0xff])
                .at(80.0, 20.0)
                .size(15.0, 0.0)
                .build()
                .unwrap(),
            ImageElement::from_file("photo", "C:\\labels\\photo.png")
                .build()
                .unwrap(),
            RfidElement::new("epc", RfidEncoder::Uhf, "E2003412")
                .data_type(RfidDataType::Hex)
                .retries(3)
                .build()
                .unwrap(),
            RfidElement::new("hf", RfidEncoder::Hf, "hello")
                .block(RfidDataBlock::User)
                .encoding(TextEncoding::Gbk)
                .hf_start_block(4)
                .build()
                .unwrap(),
        ];
        LabelDocument::new(printer, label, elements)
    }

    #[test]
    fn round_trip_every_variant() {
        let doc = sample_document();
        let text = encode_lsf(&doc);
        let decoded = decode_lsf(&text);
        assert!(decoded.is_ok(), "diagnostics: {:?}", decoded.diagnostics);
        assert_eq!(decoded.version, Some(2));
        assert_eq!(decoded.into_document(), Some(doc));
    }

    #[test]
    fn encode_writes_version_marker_and_one_record_per_element() {
        let doc = sample_document();
        let text = encode_lsf(&doc);
        assert!(text.starts_with("LSF/2\n"));
        assert_eq!(text.matches("[Object]").count(), doc.elements.len());
        assert_eq!(text.matches("[Printer]").count(), 1);
        assert!(text.contains("Width=103000\n"));
        assert!(text.contains("Size=105\n"));
    }

    #[test]
    fn lossy_fields_quantize() {
        let doc = LabelDocument::new(
            PrinterConfig::default(),
            LabelConfig::default(),
            vec![
                TextElement::new("t", "x")
                    .at(1.00049, 0.0)
                    .font("Arial", 9.96)
                    .build()
                    .unwrap(),
            ],
        );
        let decoded = decode_lsf(&encode_lsf(&doc)).into_document().unwrap();
        let crate::model::LabelElement::Text(t) = &decoded.elements[0] else {
            panic!("expected text");
        };
        assert_eq!(t.x_mm, 1.0);
        assert_eq!(t.font_size_pt, 10.0);
    }

    const FIVE_RECORDS: &str = "\
LSF/2
[Printer]
Interface=0
[Label]
Width=60000
Height=40000
Gap=2000
[Object]
Kind=1
Name=a
Data=one
[Object]
Kind=9
Name=mystery
[Object]
Kind=2
Name=b
Mode=0
Data=123
[Object]
Kind=3
Name=c
Width=10000
Height=10000
[Object]
Kind=5
Name=d
Mode=0
Data=EPC
";

    #[test]
    fn unknown_kind_is_skipped_not_fatal() {
        let decoded = decode_lsf(FIVE_RECORDS);
        assert_eq!(decoded.elements.len(), 4);
        let names: Vec<_> = decoded.elements.iter().map(|e| e.name()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
        assert!(decoded.is_ok());
        assert!(
            decoded
                .diagnostics
                .iter()
                .any(|d| d.id == codes::LSF_UNKNOWN_KIND)
        );
    }

    #[test]
    fn v1_file_defaults_newer_slots() {
        let input = "\
LSF/1
[Printer]
Dpi=300
Driver=Ignored
[Label]
Width=50000
Height=30000
Gap=3000
[Object]
Kind=1
Name=t
Data=x
VAlign=2
[Object]
Kind=2
Name=b
Mode=5
Extra=1
";
        let decoded = decode_lsf(input);
        assert!(decoded.is_ok(), "{:?}", decoded.diagnostics);
        let doc = decoded.clone().into_document().unwrap();
        assert_eq!(doc.printer.driver_name, None);
        let crate::model::LabelElement::Text(t) = &doc.elements[0] else {
            panic!("expected text");
        };
        assert_eq!(t.valign, VAlign::Top);
        let crate::model::LabelElement::Barcode(b) = &doc.elements[1] else {
            panic!("expected barcode");
        };
        assert_eq!(b.symbology, BarcodeKind::Code39);
        assert_eq!(b.hri, HriPosition::Below);
        let newer = decoded
            .diagnostics
            .iter()
            .filter(|d| d.id == codes::LSF_SLOT_NEWER_THAN_VERSION)
            .count();
        assert_eq!(newer, 3);
    }

    #[test]
    fn missing_marker_is_version_error() {
        let decoded = decode_lsf("[Printer]\nDpi=300\n");
        assert!(matches!(decoded.error, Some(CodecError::Version { .. })));
        assert!(decoded.elements.is_empty());
        assert!(decoded.printer.is_none());
        assert_eq!(decoded.diagnostics[0].id, codes::LSF_MISSING_MARKER);
    }

    #[test]
    fn unsupported_version_is_version_error() {
        let decoded = decode_lsf("# comment first\nLSF/3\n[Printer]\n");
        assert!(matches!(decoded.error, Some(CodecError::Version { .. })));
        assert_eq!(decoded.diagnostics[0].id, codes::LSF_UNSUPPORTED_VERSION);
    }

    #[test]
    fn malformed_line_is_format_error_with_no_elements() {
        let input = "LSF/2\n[Object]\nKind=1\nName=a\nthis is not valid\n";
        let decoded = decode_lsf(input);
        assert!(matches!(decoded.error, Some(CodecError::Format { .. })));
        assert!(decoded.elements.is_empty());
        let diag = &decoded.diagnostics[0];
        assert_eq!(diag.id, codes::LSF_MALFORMED_LINE);
        let span = diag.span.unwrap();
        assert_eq!(&input[span.start..span.end], "this is not valid");
    }

    #[test]
    fn entry_before_section_is_format_error() {
        let decoded = decode_lsf("LSF/2\nDpi=300\n");
        assert!(matches!(decoded.error, Some(CodecError::Format { .. })));
        assert_eq!(decoded.diagnostics[0].id, codes::LSF_ENTRY_OUTSIDE_SECTION);
    }

    #[test]
    fn missing_sections_use_defaults_and_report_partial() {
        let decoded = decode_lsf("LSF/2\n[Object]\nKind=1\nName=a\n");
        assert_eq!(decoded.error, Some(CodecError::Partial { problems: 2 }));
        assert_eq!(decoded.printer, Some(PrinterConfig::default()));
        assert_eq!(decoded.label, Some(LabelConfig::default()));
        assert_eq!(decoded.elements.len(), 1);
    }

    #[test]
    fn invalid_record_is_skipped_with_partial() {
        let input = "\
LSF/2
[Printer]
[Label]
[Object]
Kind=2
Name=no-symbology
Data=1
[Object]
Kind=1
Name=bad-size
Size=0
[Object]
Kind=1
Name=bad-number
X=twelve
[Object]
Kind=1
Name=ok
";
        let decoded = decode_lsf(input);
        assert_eq!(decoded.error, Some(CodecError::Partial { problems: 3 }));
        assert_eq!(decoded.elements.len(), 1);
        assert_eq!(decoded.elements[0].name(), "ok");
        let ids: Vec<&str> = decoded.diagnostics.iter().map(|d| d.id).collect();
        assert!(ids.contains(&codes::LSF_REQUIRED_SLOT));
        assert!(ids.contains(&codes::LSF_INVALID_RECORD));
        assert!(ids.contains(&codes::LSF_INVALID_NUMBER));
    }

    #[test]
    fn duplicate_header_keeps_first() {
        let input = "LSF/2\n[Printer]\nDpi=203\n[Label]\n[Printer]\nDpi=600\n";
        let decoded = decode_lsf(input);
        assert_eq!(decoded.printer.as_ref().map(|p| p.dpi), Some(203));
        assert!(
            decoded
                .diagnostics
                .iter()
                .any(|d| d.id == codes::LSF_DUPLICATE_SECTION)
        );
    }

    #[test]
    fn network_printer_without_address_falls_back_to_defaults() {
        let decoded = decode_lsf("LSF/2\n[Printer]\nInterface=1\n[Label]\n");
        assert_eq!(decoded.printer, Some(PrinterConfig::default()));
        assert_eq!(decoded.error, Some(CodecError::Partial { problems: 1 }));
    }
}
