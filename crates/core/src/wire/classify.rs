//! Deciding which element variant a wire object is.

use super::records::WireObject;
use crate::model::ElementKind;

/// Variants whose discriminant field is populated, in variant order.
pub(crate) fn discriminants(obj: &WireObject) -> Vec<ElementKind> {
    let populated = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.is_empty());
    let mut kinds = Vec::new();
    if obj.font.is_some() {
        kinds.push(ElementKind::Text);
    }
    if obj.barcode_kind.is_some() {
        kinds.push(ElementKind::Barcode);
    }
    if obj.shape_class.is_some() {
        kinds.push(ElementKind::Shape);
    }
    if populated(&obj.image_data) || populated(&obj.image_file) {
        kinds.push(ElementKind::Image);
    }
    if obj.rfid_encoder.is_some() {
        kinds.push(ElementKind::Rfid);
    }
    kinds
}

/// Variant implied by an `ObjectName` such as `text-3` or `rfiduhf-01`.
pub(crate) fn from_name_prefix(name: &str) -> Option<ElementKind> {
    const PREFIXES: &[(&str, ElementKind)] = &[
        ("text", ElementKind::Text),
        ("barcode", ElementKind::Barcode),
        ("qrcode", ElementKind::Barcode),
        ("rect", ElementKind::Shape),
        ("line", ElementKind::Shape),
        ("ellipse", ElementKind::Shape),
        ("shape", ElementKind::Shape),
        ("image", ElementKind::Image),
        ("img", ElementKind::Image),
        ("rfid", ElementKind::Rfid),
    ];
    let name = name.trim().to_ascii_lowercase();
    PREFIXES
        .iter()
        .find(|(prefix, _)| name.starts_with(prefix))
        .map(|(_, kind)| *kind)
}

/// One populated discriminant decides; several defer to the name prefix;
/// none leaves the object unclassified.
pub(crate) fn classify(obj: &WireObject) -> Option<ElementKind> {
    match discriminants(obj).as_slice() {
        [] => None,
        [only] => Some(*only),
        _ => obj.name.as_deref().and_then(from_name_prefix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: serde_json::Value) -> WireObject {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn single_discriminant_decides() {
        assert_eq!(classify(&obj(json!({"ObjectName": "rfid-1", "textfont": "Arial"}))), Some(ElementKind::Text));
        assert_eq!(classify(&obj(json!({"rectangleclass": 1}))), Some(ElementKind::Shape));
    }

    #[test]
    fn empty_image_fields_are_not_discriminants() {
        let o = obj(json!({"imagedata": "", "imagefile": "", "barcodekind": "EAN-13"}));
        assert_eq!(discriminants(&o), vec![ElementKind::Barcode]);
    }

    #[test]
    fn designer_exports_fall_back_to_name_prefix() {
        let full = json!({
            "textfont": "SimHei",
            "barcodekind": "Code 128 Auto",
            "rectangleclass": 0,
            "imagedata": "",
            "RFIDEncodertype": 0
        });
        let mut named = full.clone();
        named["ObjectName"] = json!("rfiduhf-01");
        assert_eq!(classify(&obj(named)), Some(ElementKind::Rfid));

        let mut named = full.clone();
        named["ObjectName"] = json!("QRCode-2");
        assert_eq!(classify(&obj(named)), Some(ElementKind::Barcode));

        let mut named = full;
        named["ObjectName"] = json!("label-7");
        assert_eq!(classify(&obj(named)), None);
    }

    #[test]
    fn no_discriminant_is_unclassified() {
        assert_eq!(classify(&obj(json!({"ObjectName": "text-1", "objectdata": "x"}))), None);
    }
}
