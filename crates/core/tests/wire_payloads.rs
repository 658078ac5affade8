//! Wire payloads as label designers send them.

mod common;

use pretty_assertions::assert_eq;
use zmlabel_core::{
    BarcodeKind, ElementKind, InterfaceKind, LabelElement, Operate, RfidEncoder, TextEncoding,
    decode_lsf, decode_wire, encode_lsf, encode_wire, update_element_data,
};

#[test]
fn designer_export_decodes_by_name_prefix() {
    let decoded = decode_wire(&common::fixture("designer_payload.json"));
    assert!(decoded.is_ok(), "{:#?}", decoded.diagnostics);
    assert_eq!(decoded.operate, Some(Operate::Preview));
    assert_eq!(decoded.copies, 1);

    let printer = decoded.printer.as_ref().unwrap();
    assert_eq!(printer.interface, InterfaceKind::RfidUsb);
    assert_eq!(printer.darkness, 18);
    assert_eq!(printer.serial, None);
    assert_eq!(printer.address, None);

    let label = decoded.label.unwrap();
    assert_eq!((label.width_mm, label.height_mm, label.gap_mm), (103.0, 40.0, 4.0));

    let kinds: Vec<_> = decoded.elements.iter().map(LabelElement::kind).collect();
    assert_eq!(
        kinds,
        [
            ElementKind::Rfid,
            ElementKind::Text,
            ElementKind::Barcode,
            ElementKind::Text,
            ElementKind::Text,
        ]
    );

    let LabelElement::Rfid(tag) = &decoded.elements[0] else { unreachable!() };
    assert_eq!(tag.encoder, RfidEncoder::Uhf);
    assert_eq!(tag.encoding, Some(TextEncoding::Utf8));
    assert_eq!(tag.hf_start_block, None);

    let LabelElement::Barcode(code) = &decoded.elements[2] else { unreachable!() };
    assert_eq!(code.symbology, BarcodeKind::Code128Auto);
    assert_eq!(code.data, "25041700001");
    assert_eq!(code.scale, 1.5);

    let LabelElement::Text(text) = &decoded.elements[1] else { unreachable!() };
    assert_eq!(text.font_name, "微软雅黑");
    assert_eq!(text.font_size_pt, 4.5);
}

#[test]
fn bound_payload_survives_both_formats() {
    let mut doc = decode_wire(&common::fixture("designer_payload.json"))
        .into_document()
        .unwrap();
    let report = update_element_data(&mut doc.elements, "barcode-1-42", "25041700002");
    assert!(report.updated);

    let wire = decode_wire(&encode_wire(&doc, 2, Some(&Operate::Print)).to_string());
    assert_eq!(wire.copies, 2);
    let from_wire = wire.into_document().unwrap();
    assert_eq!(from_wire, doc);

    // LSF keeps micrometers, so compare after one LSF pass.
    let lsf_once = decode_lsf(&encode_lsf(&doc)).into_document().unwrap();
    let lsf_twice = decode_lsf(&encode_lsf(&lsf_once)).into_document().unwrap();
    assert_eq!(lsf_once, lsf_twice);
    assert_eq!(lsf_once.elements[2].payload(), Some("25041700002"));
}
