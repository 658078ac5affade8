//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. Ranges: `ZML1xxx` LSF codec, `ZML2xxx` wire codec,
//! `ZML3xxx` variable-data binding.

// ── LSF codec ───────────────────────────────────────────────────────────

/// A line is neither blank, a comment, a section header, nor `Key=Value`.
pub const LSF_MALFORMED_LINE: &str = "ZML1001";
/// An entry appears before any `[Section]` header.
pub const LSF_ENTRY_OUTSIDE_SECTION: &str = "ZML1002";
/// The `LSF/<n>` version marker is missing.
pub const LSF_MISSING_MARKER: &str = "ZML1010";
/// The version marker names a version this decoder does not read.
pub const LSF_UNSUPPORTED_VERSION: &str = "ZML1011";
/// A required header section (`[Printer]` or `[Label]`) is missing.
pub const LSF_MISSING_SECTION: &str = "ZML1101";
/// A section appears more than once; the first one is kept.
pub const LSF_DUPLICATE_SECTION: &str = "ZML1102";
/// An unrecognized section name; its entries are skipped.
pub const LSF_UNKNOWN_SECTION: &str = "ZML1103";
/// An `[Object]` record has a `Kind` that maps to no element variant.
pub const LSF_UNKNOWN_KIND: &str = "ZML1104";
/// A numeric slot could not be parsed as a number.
pub const LSF_INVALID_NUMBER: &str = "ZML1105";
/// A required slot is missing from a record.
pub const LSF_REQUIRED_SLOT: &str = "ZML1106";
/// A slot is not defined for this record kind and was ignored.
pub const LSF_UNKNOWN_SLOT: &str = "ZML1107";
/// A slot is newer than the file's schema version and was ignored.
pub const LSF_SLOT_NEWER_THAN_VERSION: &str = "ZML1108";
/// A record decoded but failed model validation and was skipped.
pub const LSF_INVALID_RECORD: &str = "ZML1109";
/// An enumeration code is outside the known set.
pub const LSF_INVALID_ENUM: &str = "ZML1110";

// ── Wire codec ──────────────────────────────────────────────────────────

/// The payload is not valid JSON or does not have the expected shape.
pub const WIRE_INVALID_JSON: &str = "ZML2001";
/// `printerinterface` names no known interface; USB is used instead.
pub const WIRE_UNKNOWN_INTERFACE: &str = "ZML2101";
/// Printer or label settings failed validation.
pub const WIRE_INVALID_CONFIG: &str = "ZML2102";
/// An element record matches no element variant and was dropped.
pub const WIRE_UNCLASSIFIED_OBJECT: &str = "ZML2103";
/// An element record failed to decode or validate and was dropped.
pub const WIRE_INVALID_OBJECT: &str = "ZML2104";
/// `Operate` is neither `print` nor `preview`; nothing is dispatched.
pub const WIRE_UNKNOWN_OPERATE: &str = "ZML2105";

// ── Variable-data binding ───────────────────────────────────────────────

/// Several elements share the logical name; the first one was updated.
pub const BIND_DUPLICATE_NAME: &str = "ZML3001";
/// The named element has no payload to replace.
pub const BIND_NO_PAYLOAD: &str = "ZML3002";
/// The value is not a valid payload for the named element.
pub const BIND_INVALID_VALUE: &str = "ZML3003";

/// Every code defined in this module, in declaration order.
pub const ALL: &[&str] = &[
    LSF_MALFORMED_LINE,
    LSF_ENTRY_OUTSIDE_SECTION,
    LSF_MISSING_MARKER,
    LSF_UNSUPPORTED_VERSION,
    LSF_MISSING_SECTION,
    LSF_DUPLICATE_SECTION,
    LSF_UNKNOWN_SECTION,
    LSF_UNKNOWN_KIND,
    LSF_INVALID_NUMBER,
    LSF_REQUIRED_SLOT,
    LSF_UNKNOWN_SLOT,
    LSF_SLOT_NEWER_THAN_VERSION,
    LSF_INVALID_RECORD,
    LSF_INVALID_ENUM,
    WIRE_INVALID_JSON,
    WIRE_UNKNOWN_INTERFACE,
    WIRE_INVALID_CONFIG,
    WIRE_UNCLASSIFIED_OBJECT,
    WIRE_INVALID_OBJECT,
    WIRE_UNKNOWN_OPERATE,
    BIND_DUPLICATE_NAME,
    BIND_NO_PAYLOAD,
    BIND_INVALID_VALUE,
];

pub(crate) fn explain_code(id: &str) -> Option<&'static str> {
    let text = match id {
        LSF_MALFORMED_LINE => {
            "LSF lines must be blank, a comment starting with '#' or ';', a \
             [Section] header, or a Key=Value entry. The file is not well-formed \
             and nothing from it is used."
        }
        LSF_ENTRY_OUTSIDE_SECTION => {
            "A Key=Value entry appeared before the first [Section] header. The \
             file is not well-formed."
        }
        LSF_MISSING_MARKER => {
            "The first significant line of an LSF file must be the version \
             marker, e.g. 'LSF/2'."
        }
        LSF_UNSUPPORTED_VERSION => {
            "The version marker names a schema version this decoder cannot \
             read. Supported versions are 1 and 2."
        }
        LSF_MISSING_SECTION => {
            "The [Printer] or [Label] header section is missing. Default \
             printer or label settings were substituted."
        }
        LSF_DUPLICATE_SECTION => {
            "A header section appears more than once. The first occurrence is \
             used and later ones are ignored."
        }
        LSF_UNKNOWN_SECTION => "The section name is not recognized; its entries are skipped.",
        LSF_UNKNOWN_KIND => {
            "The record's Kind does not name a known element variant (1 text, \
             2 barcode, 3 shape, 4 image, 5 RFID). The record is skipped."
        }
        LSF_INVALID_NUMBER => {
            "A slot that holds a driver-native number could not be parsed. \
             Lengths are integer micrometers, font sizes tenths of a point."
        }
        LSF_REQUIRED_SLOT => "A slot that has no default for this record kind is missing.",
        LSF_UNKNOWN_SLOT => "The slot is not defined for this record kind and was ignored.",
        LSF_SLOT_NEWER_THAN_VERSION => {
            "The slot was introduced in a later schema version than the file \
             declares. It was ignored and its default applied."
        }
        LSF_INVALID_RECORD => {
            "The record decoded but its values failed element or configuration \
             validation (negative size, zero scale, missing identifier). It is \
             skipped."
        }
        LSF_INVALID_ENUM => "An enumeration code is outside the set defined for this slot.",
        WIRE_INVALID_JSON => "The payload is not valid JSON or does not have the expected shape.",
        WIRE_UNKNOWN_INTERFACE => {
            "printerinterface must be one of USB, NET, DRIVER, RFID_USB, \
             RFID_NET (case-insensitive). USB was used instead."
        }
        WIRE_INVALID_CONFIG => {
            "The Printer or LabelFormat block failed validation, e.g. a network \
             interface without printernetip."
        }
        WIRE_UNCLASSIFIED_OBJECT => {
            "The element record has no discriminant field and its ObjectName \
             prefix names no element kind. It was dropped."
        }
        WIRE_INVALID_OBJECT => {
            "The element record has a field of the wrong type or a value that \
             failed validation. It was dropped; the rest of the list is kept."
        }
        WIRE_UNKNOWN_OPERATE => {
            "Operate is neither 'print' nor 'preview'. The payload is decoded \
             but no print or preview is performed."
        }
        BIND_DUPLICATE_NAME => {
            "More than one element carries this logical name. The first match \
             was updated; logical names should be unique within a label."
        }
        BIND_NO_PAYLOAD => "Shape elements carry no data; variable data cannot be bound to them.",
        BIND_INVALID_VALUE => {
            "The value cannot be used as the element's payload, e.g. an empty \
             path for a file-sourced image. The element is unchanged."
        }
        _ => return None,
    };
    Some(text)
}
