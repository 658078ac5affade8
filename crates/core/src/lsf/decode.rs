//! LSF text to model.
//!
//! Structure errors (a malformed line, a bad version marker) stop decoding.
//! Everything past that is best-effort: a bad record is skipped with a
//! diagnostic and the rest of the file is still used.

use zmlabel_diagnostics::{Diagnostic, Span, codes};

use super::LsfDecoded;
use super::lexer::{self, Line, LineKind};
use super::schema::{self, RecordSchema, Slot};
use crate::codec::{self, CodecError};
use crate::model::{
    BarcodeElement, BarcodeKind, DashStyle, ElementKind, FontStyle, HAlign, HriPosition,
    ImageElement, ImageSource, InterfaceKind, LabelConfig, LabelElement, PrinterConfig,
    RfidDataBlock, RfidDataType, RfidElement, RfidEncoder, ShapeElement, ShapeKind, TextElement,
    TextEncoding, VAlign,
};

// ── Structure ───────────────────────────────────────────────────────────

struct RawEntry<'a> {
    key: &'a str,
    value: &'a str,
    span: Span,
}

struct RawSection<'a> {
    name: &'a str,
    span: Span,
    entries: Vec<RawEntry<'a>>,
}

pub(super) fn decode(input: &str) -> LsfDecoded {
    let lines = lexer::lines(input);
    let mut significant = lines
        .iter()
        .filter(|l| !matches!(l.kind, LineKind::Blank | LineKind::Comment));

    let version = match read_marker(significant.next()) {
        Ok(v) => v,
        Err(diag) => {
            let error = CodecError::Version {
                message: diag.message.clone(),
            };
            return LsfDecoded::failed(None, diag, error);
        }
    };

    let sections = match collect_sections(significant) {
        Ok(sections) => sections,
        Err(diag) => {
            let error = CodecError::Format {
                message: diag.message.clone(),
            };
            return LsfDecoded::failed(Some(version), diag, error);
        }
    };

    Decoder {
        version,
        diags: Vec::new(),
        problems: 0,
    }
    .run(&sections)
}

fn read_marker(line: Option<&Line<'_>>) -> Result<u32, Diagnostic> {
    let Some(line) = line else {
        return Err(Diagnostic::error(
            codes::LSF_MISSING_MARKER,
            "input is empty; expected an 'LSF/<n>' version marker",
            None,
        ));
    };
    match line.kind {
        LineKind::Marker(Some(v)) if (schema::OLDEST_VERSION..=schema::CURRENT_VERSION).contains(&v) => {
            Ok(v)
        }
        LineKind::Marker(found) => Err(Diagnostic::error(
            codes::LSF_UNSUPPORTED_VERSION,
            match found {
                Some(v) => format!(
                    "LSF version {v} is not supported (expected {} to {})",
                    schema::OLDEST_VERSION,
                    schema::CURRENT_VERSION
                ),
                None => "version marker has no version number".to_string(),
            },
            Some(line.span),
        )),
        _ => Err(Diagnostic::error(
            codes::LSF_MISSING_MARKER,
            format!(
                "line {}: expected an 'LSF/<n>' version marker before any content",
                line.number
            ),
            Some(line.span),
        )),
    }
}

fn collect_sections<'l, 'a: 'l>(
    lines: impl Iterator<Item = &'l Line<'a>>,
) -> Result<Vec<RawSection<'a>>, Diagnostic> {
    let mut sections: Vec<RawSection<'a>> = Vec::new();
    for line in lines {
        match line.kind {
            LineKind::Section(name) => sections.push(RawSection {
                name,
                span: line.span,
                entries: Vec::new(),
            }),
            LineKind::Entry { key, value } => {
                let Some(current) = sections.last_mut() else {
                    return Err(Diagnostic::error(
                        codes::LSF_ENTRY_OUTSIDE_SECTION,
                        format!("line {}: '{key}' appears before any [Section] header", line.number),
                        Some(line.span),
                    ));
                };
                current.entries.push(RawEntry {
                    key,
                    value,
                    span: line.span,
                });
            }
            LineKind::Marker(_) | LineKind::Malformed => {
                return Err(Diagnostic::error(
                    codes::LSF_MALFORMED_LINE,
                    format!(
                        "line {}: expected a [Section] header, a Key=Value entry, or a comment",
                        line.number
                    ),
                    Some(line.span),
                ));
            }
            LineKind::Blank | LineKind::Comment => {}
        }
    }
    Ok(sections)
}

// ── Records ─────────────────────────────────────────────────────────────

struct Decoder {
    version: u32,
    diags: Vec<Diagnostic>,
    /// Records skipped or replaced by defaults.
    problems: usize,
}

impl Decoder {
    fn run(mut self, sections: &[RawSection<'_>]) -> LsfDecoded {
        let mut printer_section = None;
        let mut label_section = None;
        let mut objects = Vec::new();

        for section in sections {
            if section.name.eq_ignore_ascii_case(schema::PRINTER_SECTION) {
                self.keep_first(&mut printer_section, section);
            } else if section.name.eq_ignore_ascii_case(schema::LABEL_SECTION) {
                self.keep_first(&mut label_section, section);
            } else if section.name.eq_ignore_ascii_case(schema::OBJECT_SECTION) {
                objects.push(section);
            } else {
                self.push(Diagnostic::warn(
                    codes::LSF_UNKNOWN_SECTION,
                    format!("unknown section [{}] skipped", section.name),
                    Some(section.span),
                ));
            }
        }

        let printer = self.printer(printer_section);
        let label = self.label(label_section);
        let elements: Vec<LabelElement> = objects
            .iter()
            .enumerate()
            .filter_map(|(index, section)| self.object(index, section))
            .collect();

        tracing::debug!(
            version = self.version,
            elements = elements.len(),
            problems = self.problems,
            "decoded LSF document"
        );

        LsfDecoded {
            version: Some(self.version),
            printer: Some(printer),
            label: Some(label),
            elements,
            error: CodecError::partial(self.problems),
            diagnostics: self.diags,
        }
    }

    fn push(&mut self, diag: Diagnostic) {
        codec::push(&mut self.diags, diag);
    }

    fn problem(&mut self, diag: Diagnostic) {
        self.problems += 1;
        self.push(diag);
    }

    fn keep_first<'s, 'a>(
        &mut self,
        slot: &mut Option<&'s RawSection<'a>>,
        section: &'s RawSection<'a>,
    ) {
        if slot.is_some() {
            self.push(Diagnostic::warn(
                codes::LSF_DUPLICATE_SECTION,
                format!("duplicate [{}] section ignored", section.name),
                Some(section.span),
            ));
        } else {
            *slot = Some(section);
        }
    }

    fn missing_section(&mut self, name: &str) {
        self.problem(Diagnostic::error(
            codes::LSF_MISSING_SECTION,
            format!("[{name}] section is missing; defaults used"),
            None,
        ));
    }

    /// Fold a reader's diagnostics into the document's. Returns `false`
    /// when the record could not be read.
    fn absorb(&mut self, reader: RecordReader<'_, '_>) -> bool {
        for diag in reader.diags {
            self.push(diag);
        }
        if reader.failed {
            self.problems += 1;
        }
        !reader.failed
    }

    fn printer(&mut self, section: Option<&RawSection<'_>>) -> PrinterConfig {
        let Some(section) = section else {
            self.missing_section(schema::PRINTER_SECTION);
            return PrinterConfig::default();
        };
        let mut r = RecordReader::new(section, &schema::PRINTER, false, self.version);
        r.check_keys();

        let interface = r
            .code("Interface", InterfaceKind::from_code)
            .unwrap_or_default();
        let mut builder = PrinterConfig::builder(interface);
        if let Some(dpi) = r.integer("Dpi") {
            builder = builder.dpi(dpi);
        }
        if let Some(speed) = r.integer("Speed") {
            builder = builder.speed(speed);
        }
        if let Some(darkness) = r.integer("Darkness") {
            builder = builder.darkness(darkness);
        }
        if let Some(address) = r.text("Address") {
            builder = builder.address(address);
        }
        if let Some(serial) = r.text("Serial") {
            builder = builder.serial(serial);
        }
        if let Some(driver) = r.text("Driver") {
            builder = builder.driver_name(driver);
        }
        if let Some(gap) = r.flag("Gap") {
            builder = builder.has_gap(gap);
        }

        if !self.absorb(r) {
            return PrinterConfig::default();
        }
        builder.build().unwrap_or_else(|err| {
            self.problem(Diagnostic::error(
                codes::LSF_INVALID_RECORD,
                format!("[Printer] section rejected ({err}); defaults used"),
                Some(section.span),
            ));
            PrinterConfig::default()
        })
    }

    fn label(&mut self, section: Option<&RawSection<'_>>) -> LabelConfig {
        let Some(section) = section else {
            self.missing_section(schema::LABEL_SECTION);
            return LabelConfig::default();
        };
        let mut r = RecordReader::new(section, &schema::LABEL, false, self.version);
        r.check_keys();
        let fallback = LabelConfig::default();
        let width = r.scaled("Width").unwrap_or(fallback.width_mm);
        let height = r.scaled("Height").unwrap_or(fallback.height_mm);
        let gap = r.scaled("Gap").unwrap_or(fallback.gap_mm);

        if !self.absorb(r) {
            return fallback;
        }
        LabelConfig::new(width, height, gap).unwrap_or_else(|err| {
            self.problem(Diagnostic::error(
                codes::LSF_INVALID_RECORD,
                format!("[Label] section rejected ({err}); defaults used"),
                Some(section.span),
            ));
            fallback
        })
    }

    fn object(&mut self, index: usize, section: &RawSection<'_>) -> Option<LabelElement> {
        let Some(kind_entry) = section.entries.iter().rev().find(|e| e.key == "Kind") else {
            self.problem(
                Diagnostic::error(
                    codes::LSF_REQUIRED_SLOT,
                    format!("object record {index} has no Kind; skipped"),
                    Some(section.span),
                )
                .with_context(ctx!("record" => index.to_string(), "slot" => "Kind")),
            );
            return None;
        };
        let Ok(code) = kind_entry.value.trim().parse::<u32>() else {
            self.problem(
                Diagnostic::error(
                    codes::LSF_INVALID_NUMBER,
                    format!("object record {index}: Kind={} is not a number", kind_entry.value.trim()),
                    Some(kind_entry.span),
                )
                .with_context(ctx!("record" => index.to_string(), "slot" => "Kind")),
            );
            return None;
        };
        let Some(record_schema) = schema::for_code(code) else {
            self.push(
                Diagnostic::warn(
                    codes::LSF_UNKNOWN_KIND,
                    format!("object record {index}: unknown Kind {code}; skipped"),
                    Some(kind_entry.span),
                )
                .with_context(ctx!("record" => index.to_string(), "kind" => code.to_string())),
            );
            return None;
        };
        let kind = record_schema.kind?;

        let mut r = RecordReader::new(section, record_schema, true, self.version);
        r.check_keys();
        let element = read_element(&mut r, kind);
        if !self.absorb(r) {
            return None;
        }
        let element = element?;
        if let Err(err) = element.validate() {
            self.problem(
                Diagnostic::error(
                    codes::LSF_INVALID_RECORD,
                    format!("{kind} '{}' skipped: {err}", element.name()),
                    Some(section.span),
                )
                .with_context(ctx!("record" => index.to_string(), "name" => element.name())),
            );
            return None;
        }
        Some(element)
    }
}

fn read_element(r: &mut RecordReader<'_, '_>, kind: ElementKind) -> Option<LabelElement> {
    let name = r.text("Name").unwrap_or_default();
    let x = r.scaled("X").unwrap_or(0.0);
    let y = r.scaled("Y").unwrap_or(0.0);
    let data = r.text("Data").unwrap_or_default();

    let element = match kind {
        ElementKind::Text => {
            let mut e = TextElement::new(name, data).at(x, y);
            if let Some(font) = r.text("Font") {
                e.font_name = font;
            }
            if let Some(size) = r.scaled("Size") {
                e.font_size_pt = size;
            }
            if let Some(style) = r.code("Mode", FontStyle::from_bits) {
                e.style = style;
            }
            if let Some(align) = r.code("Align", HAlign::from_code) {
                e.align = align;
            }
            if let Some(valign) = r.code("VAlign", VAlign::from_code) {
                e.valign = valign;
            }
            if let Some(multiline) = r.flag("Flag") {
                e.multiline = multiline;
            }
            if let Some(width) = r.scaled("Width") {
                e.wrap_width_mm = width;
            }
            LabelElement::Text(e)
        }
        ElementKind::Barcode => {
            let symbology = r.code("Mode", BarcodeKind::from_code)?;
            let mut e = BarcodeElement::new(name, symbology, data).at(x, y);
            if let Some(scale) = r.scaled("Param") {
                e.scale = scale;
            }
            if let Some(height) = r.scaled("Height") {
                e.height_mm = height;
            }
            if let Some(align) = r.code("Align", HAlign::from_code) {
                e.align = align;
            }
            if let Some(hri) = r.code("Extra", HriPosition::from_code) {
                e.hri = hri;
            }
            LabelElement::Barcode(e)
        }
        ElementKind::Shape => {
            let shape = r.code("Mode", ShapeKind::from_code).unwrap_or_default();
            let end_x = r.scaled("Width")?;
            let end_y = r.scaled("Height")?;
            let mut e = ShapeElement::new(name, shape, (x, y), (end_x, end_y));
            if let Some(width) = r.scaled("Param") {
                e.line_width_mm = width;
            }
            if let Some(radius) = r.scaled("Extra") {
                e.corner_radius_mm = radius;
            }
            if let Some(fill) = r.flag("Flag") {
                e.fill = fill;
            }
            if let Some(dash) = r.code("Style", DashStyle::from_code) {
                e.dash = dash;
            }
            LabelElement::Shape(e)
        }
        ElementKind::Image => {
            let source = r.image_source("Source")?;
            let mut e = ImageElement::with_source(name, source).at(x, y);
            if let Some(width) = r.scaled("Width") {
                e.width_mm = width;
            }
            if let Some(height) = r.scaled("Height") {
                e.height_mm = height;
            }
            LabelElement::Image(e)
        }
        ElementKind::Rfid => {
            let encoder = r.code("Mode", RfidEncoder::from_code)?;
            let mut e = RfidElement::new(name, encoder, data);
            (e.x_mm, e.y_mm) = (x, y);
            if let Some(block) = r.code("Extra", RfidDataBlock::from_code) {
                e.block = block;
            }
            if let Some(data_type) = r.code("Style", RfidDataType::from_code) {
                e.data_type = data_type;
            }
            if let Some(retries) = r.integer("Param") {
                e.retries = retries;
            }
            e.encoding = match r.integer("Encoding") {
                None | Some(0) => None,
                Some(_) => r.code("Encoding", TextEncoding::from_code),
            };
            if let Some(start) = r.integer("Block") {
                if encoder == RfidEncoder::Hf {
                    e.hf_start_block = Some(start);
                } else {
                    r.note_ignored("Block", "applies only to the HF encoder");
                }
            }
            LabelElement::Rfid(e)
        }
    };
    Some(element)
}

// ── Slot access ─────────────────────────────────────────────────────────

/// Typed access to one section's entries, collecting diagnostics.
struct RecordReader<'s, 'a> {
    section: &'s RawSection<'a>,
    schema: &'static RecordSchema,
    /// `[Object]` records also accept the common keys.
    object: bool,
    version: u32,
    diags: Vec<Diagnostic>,
    failed: bool,
}

impl<'s, 'a> RecordReader<'s, 'a> {
    fn new(
        section: &'s RawSection<'a>,
        schema: &'static RecordSchema,
        object: bool,
        version: u32,
    ) -> Self {
        Self {
            section,
            schema,
            object,
            version,
            diags: Vec::new(),
            failed: false,
        }
    }

    fn slot(&self, key: &str) -> Option<&'static Slot> {
        if self.object {
            schema::object_slot(self.schema, key)
        } else {
            self.schema.slot(key)
        }
    }

    fn fail(&mut self, diag: Diagnostic) {
        self.failed = true;
        self.diags.push(diag);
    }

    /// Flag unknown keys, keys newer than the file, and missing required keys.
    fn check_keys(&mut self) {
        let section = self.section;
        for entry in &section.entries {
            match self.slot(entry.key) {
                None => self.diags.push(
                    Diagnostic::warn(
                        codes::LSF_UNKNOWN_SLOT,
                        format!("[{}] key '{}' is not defined here; ignored", section.name, entry.key),
                        Some(entry.span),
                    )
                    .with_context(ctx!("slot" => entry.key)),
                ),
                Some(slot) if slot.since > self.version => self.diags.push(
                    Diagnostic::info(
                        codes::LSF_SLOT_NEWER_THAN_VERSION,
                        format!(
                            "'{}' needs LSF/{} but the file is LSF/{}; default used",
                            entry.key, slot.since, self.version
                        ),
                        Some(entry.span),
                    )
                    .with_context(ctx!("slot" => entry.key)),
                ),
                Some(_) => {}
            }
        }

        let common: &[Slot] = if self.object { schema::COMMON } else { &[] };
        let missing: Vec<&'static str> = common
            .iter()
            .chain(self.schema.slots)
            .filter(|s| s.required && s.since <= self.version)
            .filter(|s| self.raw(s.key).is_none())
            .map(|s| s.key)
            .collect();
        for key in missing {
            self.fail(
                Diagnostic::error(
                    codes::LSF_REQUIRED_SLOT,
                    format!("[{}] record is missing required key '{key}'", section.name),
                    Some(section.span),
                )
                .with_context(ctx!("slot" => key)),
            );
        }
    }

    /// Last entry for `key`, unless the key is unknown or newer than the file.
    fn raw(&self, key: &str) -> Option<&'s RawEntry<'a>> {
        let slot = self.slot(key)?;
        if slot.since > self.version {
            return None;
        }
        let section: &'s RawSection<'a> = self.section;
        section.entries.iter().rev().find(|e| e.key == key)
    }

    fn text(&self, key: &str) -> Option<String> {
        self.raw(key).map(|e| lexer::unescape(e.value))
    }

    fn number(&mut self, key: &str) -> Option<i64> {
        let entry = self.raw(key)?;
        let value = entry.value.trim();
        match value.parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                self.fail(
                    Diagnostic::error(
                        codes::LSF_INVALID_NUMBER,
                        format!("{key}={value} is not an integer"),
                        Some(entry.span),
                    )
                    .with_context(ctx!("slot" => key)),
                );
                None
            }
        }
    }

    fn integer(&mut self, key: &str) -> Option<u32> {
        let n = self.number(key)?;
        match u32::try_from(n) {
            Ok(v) => Some(v),
            Err(_) => {
                let span = self.raw(key).map(|e| e.span);
                self.fail(
                    Diagnostic::error(
                        codes::LSF_INVALID_NUMBER,
                        format!("{key}={n} is out of range"),
                        span,
                    )
                    .with_context(ctx!("slot" => key)),
                );
                None
            }
        }
    }

    /// A stored integer converted to model units by the slot's unit factor.
    fn scaled(&mut self, key: &str) -> Option<f64> {
        let factor = self.slot(key).map_or(1.0, |s| s.unit.factor());
        self.number(key).map(|n| n as f64 / factor)
    }

    fn flag(&mut self, key: &str) -> Option<bool> {
        match self.integer(key)? {
            0 => Some(false),
            1 => Some(true),
            other => {
                self.invalid_code(key, other);
                None
            }
        }
    }

    fn code<T>(&mut self, key: &str, lookup: impl Fn(u32) -> Option<T>) -> Option<T> {
        let n = self.integer(key)?;
        let value = lookup(n);
        if value.is_none() {
            self.invalid_code(key, n);
        }
        value
    }

    fn invalid_code(&mut self, key: &str, code: u32) {
        let span = self.raw(key).map(|e| e.span);
        self.fail(
            Diagnostic::error(
                codes::LSF_INVALID_ENUM,
                format!("{key}={code} is not a valid code for [{}]", self.section.name),
                span,
            )
            .with_context(ctx!("slot" => key)),
        );
    }

    fn image_source(&mut self, key: &str) -> Option<ImageSource> {
        let entry = self.raw(key)?;
        let value = lexer::unescape(entry.value);
        if let Some(digits) = value.strip_prefix("hex:") {
            return match hex::decode(digits.trim()) {
                Ok(bytes) => Some(ImageSource::Bytes(bytes)),
                Err(err) => {
                    self.fail(
                        Diagnostic::error(
                            codes::LSF_INVALID_RECORD,
                            format!("{key} has invalid hex image data: {err}"),
                            Some(entry.span),
                        )
                        .with_context(ctx!("slot" => key)),
                    );
                    None
                }
            };
        }
        let path = value.strip_prefix("file:").unwrap_or(&value);
        Some(ImageSource::File(path.to_string()))
    }

    fn note_ignored(&mut self, key: &str, why: &str) {
        let span = self.raw(key).map(|e| e.span);
        self.diags.push(
            Diagnostic::warn(
                codes::LSF_UNKNOWN_SLOT,
                format!("'{key}' {why}; ignored"),
                span,
            )
            .with_context(ctx!("slot" => key)),
        );
    }
}
