//! Serde mirrors of the wire JSON payload.
//!
//! Field names follow the label designer's export exactly. Every field is
//! optional; defaults are applied when converting to the model.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level payload, with each block kept raw so a bad block does not
/// sink the others.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPayload {
    #[serde(rename = "Printer")]
    pub(crate) printer: Option<serde_json::Value>,
    #[serde(rename = "LabelFormat")]
    pub(crate) label: Option<serde_json::Value>,
    #[serde(rename = "LabelObjectList")]
    pub(crate) objects: Vec<serde_json::Value>,
    #[serde(rename = "Operate")]
    pub(crate) operate: Option<String>,
}

/// `Printer` block.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct WirePrinter {
    #[serde(rename = "printerinterface", skip_serializing_if = "Option::is_none")]
    pub(crate) interface: Option<String>,
    #[serde(rename = "printnum", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) copies: Option<u32>,
    #[serde(rename = "printerdpi", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) dpi: Option<u32>,
    #[serde(rename = "printSpeed", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) speed: Option<u32>,
    #[serde(rename = "printDarkness", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) darkness: Option<u32>,
    #[serde(rename = "printermbsn", skip_serializing_if = "Option::is_none")]
    pub(crate) serial: Option<String>,
    #[serde(rename = "printernetip", skip_serializing_if = "Option::is_none")]
    pub(crate) address: Option<String>,
    #[serde(rename = "printername", skip_serializing_if = "Option::is_none")]
    pub(crate) driver_name: Option<String>,
    #[serde(rename = "printerhasgap", deserialize_with = "opt_bool", skip_serializing_if = "Option::is_none")]
    pub(crate) has_gap: Option<bool>,
}

/// `LabelFormat` block, millimeters.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct WireLabel {
    #[serde(rename = "labelwidth", skip_serializing_if = "Option::is_none")]
    pub(crate) width: Option<f64>,
    #[serde(rename = "labelheight", skip_serializing_if = "Option::is_none")]
    pub(crate) height: Option<f64>,
    #[serde(rename = "labelrowgap", skip_serializing_if = "Option::is_none")]
    pub(crate) gap: Option<f64>,
}

/// A symbology given by designer name or by numeric code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum NameOrCode {
    Name(String),
    Code(u32),
}

/// One entry of `LabelObjectList`. Designer exports fill in every field for
/// every element; the encoder writes only the fields of the element's own
/// variant.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct WireObject {
    #[serde(rename = "ObjectName", skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(rename = "objectdata", skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<String>,
    #[serde(rename = "Xposition", skip_serializing_if = "Option::is_none")]
    pub(crate) x: Option<f64>,
    #[serde(rename = "Yposition", skip_serializing_if = "Option::is_none")]
    pub(crate) y: Option<f64>,

    // Text
    #[serde(rename = "textfont", skip_serializing_if = "Option::is_none")]
    pub(crate) font: Option<String>,
    #[serde(rename = "fontsize", skip_serializing_if = "Option::is_none")]
    pub(crate) font_size: Option<f64>,
    #[serde(rename = "fontstyle", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) font_style: Option<u32>,
    #[serde(rename = "texttextalign", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) text_align: Option<u32>,
    #[serde(rename = "texttextvalign", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) text_valign: Option<u32>,
    #[serde(rename = "ismultiline", deserialize_with = "opt_bool", skip_serializing_if = "Option::is_none")]
    pub(crate) multiline: Option<bool>,
    #[serde(rename = "textwidth", skip_serializing_if = "Option::is_none")]
    pub(crate) text_width: Option<f64>,

    // Barcode
    #[serde(rename = "barcodekind", skip_serializing_if = "Option::is_none")]
    pub(crate) barcode_kind: Option<NameOrCode>,
    #[serde(rename = "barcodescale", skip_serializing_if = "Option::is_none")]
    pub(crate) barcode_scale: Option<f64>,
    #[serde(rename = "barcodeheight", skip_serializing_if = "Option::is_none")]
    pub(crate) barcode_height: Option<f64>,
    #[serde(rename = "barcodealign", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) barcode_align: Option<u32>,
    #[serde(rename = "textposition", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) text_position: Option<u32>,

    // Shape
    #[serde(rename = "rectangleclass", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) shape_class: Option<u32>,
    #[serde(rename = "cornerRadius", skip_serializing_if = "Option::is_none")]
    pub(crate) corner_radius: Option<f64>,
    #[serde(rename = "startXposition", skip_serializing_if = "Option::is_none")]
    pub(crate) start_x: Option<f64>,
    #[serde(rename = "startYposition", skip_serializing_if = "Option::is_none")]
    pub(crate) start_y: Option<f64>,
    #[serde(rename = "endXposition", skip_serializing_if = "Option::is_none")]
    pub(crate) end_x: Option<f64>,
    #[serde(rename = "endYposition", skip_serializing_if = "Option::is_none")]
    pub(crate) end_y: Option<f64>,
    #[serde(rename = "lineWidth", skip_serializing_if = "Option::is_none")]
    pub(crate) line_width: Option<f64>,
    #[serde(rename = "lineDashStyle", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) dash_style: Option<u32>,
    #[serde(rename = "fillRectangle", deserialize_with = "opt_bool", skip_serializing_if = "Option::is_none")]
    pub(crate) fill: Option<bool>,

    // Image
    #[serde(rename = "imagedata", skip_serializing_if = "Option::is_none")]
    pub(crate) image_data: Option<String>,
    #[serde(rename = "imagefile", skip_serializing_if = "Option::is_none")]
    pub(crate) image_file: Option<String>,
    #[serde(rename = "imagewidth", skip_serializing_if = "Option::is_none")]
    pub(crate) image_width: Option<f64>,
    #[serde(rename = "imageheight", skip_serializing_if = "Option::is_none")]
    pub(crate) image_height: Option<f64>,

    // RFID
    #[serde(rename = "RFIDEncodertype", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) rfid_encoder: Option<u32>,
    #[serde(rename = "RFIDDatablock", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) rfid_block: Option<u32>,
    #[serde(rename = "RFIDDatatype", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) rfid_data_type: Option<u32>,
    #[serde(rename = "RFIDTextencoding", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) rfid_encoding: Option<u32>,
    #[serde(rename = "RFIDerrortimes", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) rfid_retries: Option<u32>,
    #[serde(rename = "HFstartblock", deserialize_with = "opt_u32", skip_serializing_if = "Option::is_none")]
    pub(crate) hf_start_block: Option<u32>,
}

/// Accept `3` and `3.0`; reject fractions and negatives.
fn opt_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    let Some(value) = Option::<f64>::deserialize(d)? else {
        return Ok(None);
    };
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(Some(value as u32))
    } else {
        Err(D::Error::custom(format!("expected a non-negative integer, got {value}")))
    }
}

/// Accept `true`/`false` and the designer's `0`/`1`.
fn opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrInt {
        Bool(bool),
        Int(i64),
    }
    match Option::<BoolOrInt>::deserialize(d)? {
        None => Ok(None),
        Some(BoolOrInt::Bool(b)) => Ok(Some(b)),
        Some(BoolOrInt::Int(0)) => Ok(Some(false)),
        Some(BoolOrInt::Int(1)) => Ok(Some(true)),
        Some(BoolOrInt::Int(other)) => Err(D::Error::custom(format!("expected a boolean, got {other}"))),
    }
}
