//! Line classification for LSF text.
//!
//! LSF is line-oriented: every line is blank, a comment, the version marker,
//! a `[Section]` header, or a `Key=Value` entry. Lines borrow from the input
//! and keep their byte offsets for diagnostic spans.

use zmlabel_diagnostics::Span;

/// Prefix of the version marker line (`LSF/2`).
pub(crate) const MARKER_PREFIX: &str = "LSF/";

/// Classification of one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// Empty or whitespace only.
    Blank,
    /// Starts with `#` or `;` after leading whitespace.
    Comment,
    /// `LSF/<n>`; `None` when `<n>` is not a number.
    Marker(Option<u32>),
    /// `[Name]`, name trimmed.
    Section(&'a str),
    /// `Key=Value`: key trimmed, value verbatim and still escaped.
    Entry { key: &'a str, value: &'a str },
    /// Anything else.
    Malformed,
}

/// A classified line with its span (line terminator excluded).
#[derive(Debug, Clone)]
pub(crate) struct Line<'a> {
    pub(crate) kind: LineKind<'a>,
    pub(crate) span: Span,
    /// 1-based line number.
    pub(crate) number: usize,
}

/// Split `input` into classified lines. Accepts `\n` and `\r\n` endings.
pub(crate) fn lines(input: &str) -> Vec<Line<'_>> {
    let mut out = Vec::new();
    let mut start = 0usize;
    for (idx, raw) in input.split('\n').enumerate() {
        let end = start + raw.len();
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        // A trailing newline leaves one empty piece that is not a line.
        if !(end == input.len() && raw.is_empty() && idx > 0) {
            out.push(Line {
                kind: classify(text),
                span: Span::new(start, start + text.len()),
                number: idx + 1,
            });
        }
        start = end + 1;
    }
    out
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with('#') || trimmed.starts_with(';') {
        return LineKind::Comment;
    }
    if let Some(rest) = trimmed.strip_prefix(MARKER_PREFIX) {
        return LineKind::Marker(rest.trim().parse().ok());
    }
    if let Some(inner) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        let name = inner.trim();
        if name.is_empty() {
            return LineKind::Malformed;
        }
        return LineKind::Section(name);
    }
    match line.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => LineKind::Entry {
            key: key.trim(),
            value,
        },
        _ => LineKind::Malformed,
    }
}

/// Escape `\`, newline, and carriage return for a value.
pub(crate) fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape`]. Unknown escapes are kept verbatim.
pub(crate) fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<LineKind<'_>> {
        lines(input).into_iter().map(|l| l.kind).collect()
    }

    #[test]
    fn classifies_each_line_shape() {
        let input = "LSF/2\n\n# note\n; note\n[Printer]\nDpi = 300\nnot an entry\n";
        assert_eq!(
            kinds(input),
            vec![
                LineKind::Marker(Some(2)),
                LineKind::Blank,
                LineKind::Comment,
                LineKind::Comment,
                LineKind::Section("Printer"),
                LineKind::Entry {
                    key: "Dpi",
                    value: " 300"
                },
                LineKind::Malformed,
            ]
        );
    }

    #[test]
    fn value_keeps_later_equals_signs() {
        assert_eq!(
            kinds("Data=a=b"),
            vec![LineKind::Entry {
                key: "Data",
                value: "a=b"
            }]
        );
    }

    #[test]
    fn spans_exclude_crlf() {
        let ls = lines("LSF/1\r\n[Label]\r\n");
        assert_eq!(ls.len(), 2);
        assert_eq!(ls[0].span, Span::new(0, 5));
        assert_eq!(ls[1].span, Span::new(7, 14));
        assert_eq!(ls[1].number, 2);
    }

    #[test]
    fn empty_key_or_section_is_malformed() {
        assert_eq!(kinds("=value"), vec![LineKind::Malformed]);
        assert_eq!(kinds("[ ]"), vec![LineKind::Malformed]);
    }

    #[test]
    fn escape_round_trips_control_characters() {
        let raw = "line one\nline two\\end\r";
        let escaped = escape(raw);
        assert!(!escaped.contains('\n'));
        assert_eq!(unescape(&escaped), raw);
        assert_eq!(unescape("C:\\path"), "C:\\path");
    }
}
