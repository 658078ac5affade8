//! LSF files as the legacy designer wrote them.

mod common;

use pretty_assertions::assert_eq;
use zmlabel_core::{
    CodecError, HAlign, InterfaceKind, LabelElement, RfidDataType, RfidEncoder, ShapeKind,
    codes, decode_lsf, encode_lsf,
};

#[test]
fn version_one_file_decodes_with_defaults() {
    let decoded = decode_lsf(&common::fixture("shipping_v1.lsf"));
    assert!(decoded.is_ok(), "{:#?}", decoded.diagnostics);
    assert_eq!(decoded.version, Some(1));

    let printer = decoded.printer.clone().unwrap();
    assert_eq!(printer.interface, InterfaceKind::RfidUsb);
    assert_eq!(printer.dpi, 203);
    assert_eq!(printer.serial.as_deref(), Some("ZM-0042"));
    assert_eq!(printer.driver_name, None);

    let label = decoded.label.unwrap();
    assert_eq!((label.width_mm, label.height_mm, label.gap_mm), (100.0, 50.0, 3.0));

    let [text, barcode, shape, tag] = decoded.elements.as_slice() else {
        panic!("expected four elements, got {}", decoded.elements.len());
    };

    let LabelElement::Text(text) = text else { panic!("text") };
    assert_eq!(text.data, "ACME Corp.\nDock 7");
    assert_eq!(text.font_size_pt, 12.0);
    assert!(text.multiline);

    let LabelElement::Barcode(barcode) = barcode else { panic!("barcode") };
    assert_eq!(barcode.scale, 1.5);
    assert_eq!(barcode.align, HAlign::Center);

    let LabelElement::Shape(shape) = shape else { panic!("shape") };
    assert_eq!(shape.shape, ShapeKind::Line);
    assert_eq!((shape.end_x_mm, shape.end_y_mm), (98.0, 35.0));
    assert_eq!(shape.line_width_mm, 0.5);

    let LabelElement::Rfid(tag) = tag else { panic!("rfid") };
    assert_eq!(tag.encoder, RfidEncoder::Uhf);
    assert_eq!(tag.data_type, RfidDataType::Hex);
    assert_eq!(tag.retries, 2);
    assert_eq!(tag.encoding, None);
}

#[test]
fn re_encoding_upgrades_to_the_current_version() {
    let doc = decode_lsf(&common::fixture("shipping_v1.lsf"))
        .into_document()
        .unwrap();
    let text = encode_lsf(&doc);
    assert!(text.starts_with("LSF/2\n"));

    let again = decode_lsf(&text);
    assert!(again.is_ok(), "{:#?}", again.diagnostics);
    assert_eq!(again.version, Some(2));
    assert_eq!(again.into_document(), Some(doc));
}

#[test]
fn skipped_records_leave_the_rest() {
    let mut text = common::fixture("shipping_v1.lsf");
    text.push_str("\n[Object]\nKind=3\nName=broken\nWidth=-5000\nHeight=1000\n");
    text.push_str("\n[Object]\nKind=42\nName=future\n");

    let decoded = decode_lsf(&text);
    assert_eq!(decoded.elements.len(), 4);
    assert_eq!(decoded.error, Some(CodecError::Partial { problems: 1 }));
    let ids: Vec<_> = decoded.diagnostics.iter().map(|d| d.id).collect();
    assert!(ids.contains(&codes::LSF_INVALID_RECORD), "{ids:?}");
    assert!(ids.contains(&codes::LSF_UNKNOWN_KIND), "{ids:?}");
}

#[test]
fn crlf_line_endings_are_accepted() {
    let text = common::fixture("shipping_v1.lsf").replace('\n', "\r\n");
    let decoded = decode_lsf(&text);
    assert!(decoded.is_ok(), "{:#?}", decoded.diagnostics);
    assert_eq!(decoded.elements.len(), 4);
    assert_eq!(decoded.elements[0].payload(), Some("ACME Corp.\nDock 7"));
}
