//! Loading label documents from LSF or wire JSON files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use zmlabel_core::{
    CodecError, Diagnostic, LabelDocument, Operate, WireDecoded, decode_lsf, decode_wire,
    encode_lsf, encode_wire,
};

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DocFormat {
    /// Label designer save file (`.lsf`).
    Lsf,
    /// Wire JSON payload (`.json`).
    Json,
}

impl DocFormat {
    /// `.json` files are wire payloads; everything else is read as LSF.
    pub(crate) fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocFormat::Json,
            _ => DocFormat::Lsf,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            DocFormat::Lsf => "lsf",
            DocFormat::Json => "json",
        }
    }
}

/// A decoded file plus everything the codec reported.
#[derive(Debug)]
pub(crate) struct Loaded {
    pub(crate) path: String,
    pub(crate) source: String,
    pub(crate) format: DocFormat,
    pub(crate) document: Option<LabelDocument>,
    /// LSF schema version; `None` for wire payloads.
    pub(crate) version: Option<u32>,
    /// Copies requested by a wire payload; 1 for LSF.
    pub(crate) copies: u32,
    pub(crate) operate: Option<Operate>,
    /// Wire object indices that failed to convert.
    pub(crate) failed: Vec<usize>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) error: Option<CodecError>,
}

/// Read and decode `path`, detecting the format unless one is given.
pub(crate) fn load(path: &Path, format: Option<DocFormat>) -> Result<Loaded> {
    let source = fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    let format = format.unwrap_or_else(|| DocFormat::detect(path));
    let path = path.display().to_string();
    tracing::debug!(file = %path, format = format.as_str(), "loading document");

    Ok(match format {
        DocFormat::Lsf => {
            let decoded = decode_lsf(&source);
            let version = decoded.version;
            let diagnostics = decoded.diagnostics.clone();
            let error = decoded.error.clone();
            Loaded {
                path,
                source,
                format,
                document: decoded.into_document(),
                version,
                copies: 1,
                operate: None,
                failed: Vec::new(),
                diagnostics,
                error,
            }
        }
        DocFormat::Json => {
            let decoded = decode_wire(&source);
            from_wire(path, source, decoded)
        }
    })
}

fn from_wire(path: String, source: String, decoded: WireDecoded) -> Loaded {
    let copies = decoded.copies;
    let operate = decoded.operate.clone();
    let failed = decoded.failed.clone();
    let diagnostics = decoded.diagnostics.clone();
    let error = decoded.error.clone();
    Loaded {
        path,
        source,
        format: DocFormat::Json,
        document: decoded.into_document(),
        version: None,
        copies,
        operate,
        failed,
        diagnostics,
        error,
    }
}

impl Loaded {
    /// The document, or an error naming why decoding produced none.
    pub(crate) fn require_document(&self) -> Result<&LabelDocument> {
        self.document.as_ref().with_context(|| {
            let reason = self
                .error
                .as_ref()
                .map_or_else(|| "missing printer or label settings".to_string(), ToString::to_string);
            format!("'{}' has no usable label: {reason}", self.path)
        })
    }
}

/// Serialize `doc` in `format`.
pub(crate) fn encode(doc: &LabelDocument, format: DocFormat, copies: u32, operate: Option<&Operate>) -> Result<String> {
    Ok(match format {
        DocFormat::Lsf => encode_lsf(doc),
        DocFormat::Json => {
            let mut text = serde_json::to_string_pretty(&encode_wire(doc, copies, operate))?;
            text.push('\n');
            text
        }
    })
}
