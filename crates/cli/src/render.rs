//! Pretty diagnostic rendering using ariadne.
//!
//! Converts [`Diagnostic`]s into ariadne [`Report`]s for coloured,
//! source-annotated terminal output on stderr. JSON output embeds the
//! diagnostics in each command's result object instead.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use zmlabel_diagnostics::{Diagnostic, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, human-readable output.
    Pretty,
    /// One machine-readable JSON object on stdout.
    Json,
}

impl Format {
    /// Use the explicit choice, else pretty for a terminal and JSON for pipes.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warn => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Blue,
        _ => Color::White,
    }
}

fn context_note(diag: &Diagnostic) -> Option<String> {
    diag.context.as_ref().filter(|ctx| !ctx.is_empty()).map(|ctx| {
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ")
    })
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics to stderr.
///
/// Diagnostics with a span get source context; the rest print as
/// standalone lines. Wire payload diagnostics mostly have no span.
pub(crate) fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let config = Config::default().with_compact(false);
    let mut cache = (filename, Source::from(source));

    for diag in diagnostics {
        let note = context_note(diag);
        if let Some(span) = &diag.span {
            // Clamp to the source; a truncated file must not panic the renderer.
            let start = span.start.min(source.len());
            let end = span.end.min(source.len()).max(start);

            let mut builder = Report::build(report_kind(diag.severity), (filename, start..end))
                .with_code(diag.id)
                .with_message(&diag.message)
                .with_config(config)
                .with_label(
                    Label::new((filename, start..end))
                        .with_message(note.clone().unwrap_or_else(|| diag.message.clone()))
                        .with_color(severity_color(diag.severity)),
                );
            if let Some(note) = note {
                builder = builder.with_note(note);
            }
            if let Some(explanation) = diag.explain() {
                builder = builder.with_help(explanation);
            }
            builder.finish().eprint(&mut cache).ok();
        } else {
            let kind_str = match diag.severity {
                Severity::Error => "error",
                Severity::Warn => "warning",
                Severity::Info => "info",
                _ => "diagnostic",
            };
            eprintln!("{kind_str}[{}]: {}", diag.id, diag.message);
            if let Some(note) = note {
                eprintln!("  = note: {note}");
            }
            if let Some(explanation) = diag.explain() {
                eprintln!("  = help: {explanation}");
            }
        }
    }
}

// ── Summary line ────────────────────────────────────────────────────────

/// Coloured `2 errors, 1 warning` line on stderr; nothing when clean.
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    let (mut errors, mut warnings, mut infos) = (0usize, 0usize, 0usize);
    for d in diagnostics {
        match d.severity {
            Severity::Error => errors += 1,
            Severity::Info => infos += 1,
            _ => warnings += 1,
        }
    }
    if errors + warnings + infos == 0 {
        return;
    }

    let mut parts = Vec::new();
    if errors > 0 {
        let s = if errors == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{errors} error{s}").fg(Color::Red)));
    }
    if warnings > 0 {
        let s = if warnings == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{warnings} warning{s}").fg(Color::Yellow)));
    }
    if infos > 0 {
        parts.push(format!("{}", format!("{infos} info").fg(Color::Blue)));
    }
    eprintln!("{}", parts.join(", "));
}

/// Green or red status word followed by a detail, on stderr.
pub(crate) fn status_line(ok: bool, word: &str, detail: &str) {
    let color = if ok { Color::Green } else { Color::Red };
    eprintln!("{}: {detail}", word.fg(color));
}
