//! The LSF slot table.
//!
//! `[Object]` records reuse a small set of keys (`Mode`, `Flag`, `Width`,
//! `Height`, `Param`, `Extra`, `Style`) whose meaning depends on the
//! record's `Kind`. This module is the single place that says what each key
//! means per kind, which schema version introduced it, and whether it may be
//! omitted. The decoder and encoder both read from here.

use crate::model::ElementKind;

/// Newest schema version; the encoder always writes this.
pub const CURRENT_VERSION: u32 = 2;
/// Oldest schema version the decoder reads.
pub const OLDEST_VERSION: u32 = 1;

/// Printer settings section.
pub const PRINTER_SECTION: &str = "Printer";
/// Label geometry section.
pub const LABEL_SECTION: &str = "Label";
/// One element per occurrence.
pub const OBJECT_SECTION: &str = "Object";

/// Unit a slot value is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Free text, escaped.
    Text,
    /// Unsigned integer code or count.
    Integer,
    /// `0` or `1`.
    Flag,
    /// Length in integer micrometers.
    Micrometers,
    /// Font size in integer tenths of a point.
    DeciPoints,
    /// Scale in integer hundredths.
    Hundredths,
}

impl Unit {
    /// Model units per stored unit.
    pub fn factor(self) -> f64 {
        match self {
            Unit::Micrometers => 1000.0,
            Unit::DeciPoints => 10.0,
            Unit::Hundredths => 100.0,
            Unit::Text | Unit::Integer | Unit::Flag => 1.0,
        }
    }
}

/// One key a record may carry.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    /// Key as written in the file.
    pub key: &'static str,
    /// What the key means for this kind.
    pub meaning: &'static str,
    /// Storage unit.
    pub unit: Unit,
    /// Schema version that introduced the key.
    pub since: u32,
    /// `true` when the record is invalid without it.
    pub required: bool,
}

const fn slot(key: &'static str, meaning: &'static str, unit: Unit, since: u32, required: bool) -> Slot {
    Slot {
        key,
        meaning,
        unit,
        since,
        required,
    }
}

/// Slot layout of one section or record kind.
#[derive(Debug, Clone, Copy)]
pub struct RecordSchema {
    /// Element variant; `None` for the header sections.
    pub kind: Option<ElementKind>,
    /// `Kind` code for object records.
    pub code: Option<u32>,
    /// Keys defined for this record.
    pub slots: &'static [Slot],
}

impl RecordSchema {
    /// Look up a key.
    pub fn slot(&self, key: &str) -> Option<&'static Slot> {
        self.slots.iter().find(|s| s.key == key)
    }
}

// ── Header sections ─────────────────────────────────────────────────────

/// `[Printer]` keys.
pub const PRINTER: RecordSchema = RecordSchema {
    kind: None,
    code: None,
    slots: &[
        slot("Interface", "interface kind code", Unit::Integer, 1, false),
        slot("Dpi", "print head resolution", Unit::Integer, 1, false),
        slot("Speed", "print speed", Unit::Integer, 1, false),
        slot("Darkness", "print darkness", Unit::Integer, 1, false),
        slot("Address", "network address", Unit::Text, 1, false),
        slot("Serial", "USB device serial", Unit::Text, 1, false),
        slot("Driver", "installed driver name", Unit::Text, 2, false),
        slot("Gap", "gap detection flag", Unit::Flag, 1, false),
    ],
};

/// `[Label]` keys.
pub const LABEL: RecordSchema = RecordSchema {
    kind: None,
    code: None,
    slots: &[
        slot("Width", "label width", Unit::Micrometers, 1, false),
        slot("Height", "label height", Unit::Micrometers, 1, false),
        slot("Gap", "gap between labels", Unit::Micrometers, 1, false),
    ],
};

// ── Object records ──────────────────────────────────────────────────────

/// Keys every `[Object]` record shares.
pub const COMMON: &[Slot] = &[
    slot("Kind", "element variant code", Unit::Integer, 1, true),
    slot("Name", "logical name", Unit::Text, 1, true),
    slot("X", "left edge", Unit::Micrometers, 1, false),
    slot("Y", "top edge", Unit::Micrometers, 1, false),
];

/// Text (`Kind=1`).
pub const TEXT: RecordSchema = RecordSchema {
    kind: Some(ElementKind::Text),
    code: Some(1),
    slots: &[
        slot("Data", "text", Unit::Text, 1, false),
        slot("Font", "font family", Unit::Text, 1, false),
        slot("Size", "font size", Unit::DeciPoints, 1, false),
        slot("Mode", "style flags", Unit::Integer, 1, false),
        slot("Align", "horizontal alignment code", Unit::Integer, 1, false),
        slot("VAlign", "vertical alignment code", Unit::Integer, 2, false),
        slot("Flag", "multiline flag", Unit::Flag, 1, false),
        slot("Width", "wrap width", Unit::Micrometers, 1, false),
    ],
};

/// Barcode (`Kind=2`).
pub const BARCODE: RecordSchema = RecordSchema {
    kind: Some(ElementKind::Barcode),
    code: Some(2),
    slots: &[
        slot("Data", "encoded data", Unit::Text, 1, false),
        slot("Mode", "symbology code", Unit::Integer, 1, true),
        slot("Param", "module scale", Unit::Hundredths, 1, false),
        slot("Height", "bar height", Unit::Micrometers, 1, false),
        slot("Align", "horizontal alignment code", Unit::Integer, 1, false),
        slot("Extra", "human-readable text position code", Unit::Integer, 2, false),
    ],
};

/// Shape (`Kind=3`).
pub const SHAPE: RecordSchema = RecordSchema {
    kind: Some(ElementKind::Shape),
    code: Some(3),
    slots: &[
        slot("Mode", "shape kind code", Unit::Integer, 1, false),
        slot("Width", "end x", Unit::Micrometers, 1, true),
        slot("Height", "end y", Unit::Micrometers, 1, true),
        slot("Param", "line width", Unit::Micrometers, 1, false),
        slot("Extra", "corner radius", Unit::Micrometers, 2, false),
        slot("Flag", "fill flag", Unit::Flag, 1, false),
        slot("Style", "dash style code", Unit::Integer, 2, false),
    ],
};

/// Image (`Kind=4`).
pub const IMAGE: RecordSchema = RecordSchema {
    kind: Some(ElementKind::Image),
    code: Some(4),
    slots: &[
        slot("Source", "file:<path> or hex:<bytes>", Unit::Text, 1, true),
        slot("Width", "fixed width", Unit::Micrometers, 1, false),
        slot("Height", "fixed height", Unit::Micrometers, 1, false),
    ],
};

/// RFID (`Kind=5`).
pub const RFID: RecordSchema = RecordSchema {
    kind: Some(ElementKind::Rfid),
    code: Some(5),
    slots: &[
        slot("Data", "tag data", Unit::Text, 1, false),
        slot("Mode", "encoder kind code", Unit::Integer, 1, true),
        slot("Extra", "data block code", Unit::Integer, 1, false),
        slot("Style", "data type code", Unit::Integer, 1, false),
        slot("Param", "write retry count", Unit::Integer, 1, false),
        slot("Encoding", "text encoding code, 0 for driver default", Unit::Integer, 2, false),
        slot("Block", "HF start block", Unit::Integer, 2, false),
    ],
};

/// Every object record schema, in `Kind` order.
pub const OBJECTS: &[RecordSchema] = &[TEXT, BARCODE, SHAPE, IMAGE, RFID];

/// Schema for a `Kind` code.
pub fn for_code(code: u32) -> Option<&'static RecordSchema> {
    OBJECTS.iter().find(|s| s.code == Some(code))
}

/// Schema for an element variant.
pub fn for_kind(kind: ElementKind) -> &'static RecordSchema {
    match kind {
        ElementKind::Text => &TEXT,
        ElementKind::Barcode => &BARCODE,
        ElementKind::Shape => &SHAPE,
        ElementKind::Image => &IMAGE,
        ElementKind::Rfid => &RFID,
    }
}

/// Look up a key in an object record, common keys first.
pub fn object_slot(schema: &RecordSchema, key: &str) -> Option<&'static Slot> {
    COMMON.iter().find(|s| s.key == key).or_else(|| schema.slot(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_are_one_based_and_dense() {
        for (i, schema) in OBJECTS.iter().enumerate() {
            assert_eq!(schema.code, Some(i as u32 + 1));
            let kind = schema.kind.unwrap();
            assert_eq!(for_kind(kind).code, schema.code);
        }
        assert!(for_code(0).is_none());
        assert!(for_code(6).is_none());
    }

    #[test]
    fn no_kind_redefines_a_common_key() {
        for schema in OBJECTS {
            for s in schema.slots {
                assert!(
                    COMMON.iter().all(|c| c.key != s.key),
                    "{:?} redefines {}",
                    schema.kind,
                    s.key
                );
            }
        }
    }

    #[test]
    fn slot_versions_are_supported() {
        for schema in OBJECTS.iter().chain([&PRINTER, &LABEL]) {
            for s in schema.slots {
                assert!((OLDEST_VERSION..=CURRENT_VERSION).contains(&s.since));
            }
        }
    }

    #[test]
    fn merged_slots_mean_different_things() {
        assert_eq!(TEXT.slot("Width").unwrap().meaning, "wrap width");
        assert_eq!(SHAPE.slot("Width").unwrap().meaning, "end x");
        assert_eq!(SHAPE.slot("Param").unwrap().unit, Unit::Micrometers);
        assert_eq!(BARCODE.slot("Param").unwrap().unit, Unit::Hundredths);
    }
}
