//! Log subscriber setup.
//!
//! `ZMLABEL_LOG_LEVEL` takes an `EnvFilter` directive (default `warn`) and
//! `--log-level` overrides it. `ZMLABEL_LOG_FORMAT` picks the line layout.
//! Logs go to stderr so JSON results on stdout stay parseable, and also to
//! a file when `--log-file` or `ZMLABEL_LOG_FILE` names one.

use std::env;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow, bail};
use tracing::Subscriber;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, Registry};

pub(crate) const LEVEL_ENV: &str = "ZMLABEL_LOG_LEVEL";
pub(crate) const FORMAT_ENV: &str = "ZMLABEL_LOG_FORMAT";
pub(crate) const FILE_ENV: &str = "ZMLABEL_LOG_FILE";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Line layout of the `fmt` subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            other => bail!("{FORMAT_ENV} must be one of full|compact|pretty, got '{other}'"),
        }
    }
}

fn directive(cli_level: Option<&str>, env_level: Option<String>) -> String {
    cli_level
        .map(str::to_string)
        .or(env_level)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}

fn log_file(cli_file: Option<&Path>, env_file: Option<PathBuf>) -> Option<PathBuf> {
    cli_file
        .map(Path::to_path_buf)
        .or(env_file)
        .filter(|p| !p.as_os_str().is_empty())
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn console_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer().with_writer(io::stderr);
    match format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
    }
}

/// Install the global subscriber.
pub(crate) fn init(cli_level: Option<&str>, cli_file: Option<&Path>) -> Result<()> {
    let directive = directive(cli_level, env::var(LEVEL_ENV).ok());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter '{directive}'"))?;
    let format = match env::var(FORMAT_ENV) {
        Ok(value) => LogFormat::parse(&value)?,
        Err(_) => LogFormat::default(),
    };

    let mut layers: Vec<BoxedLayer> = vec![console_layer(format)];
    if let Some(path) = log_file(cli_file, env::var_os(FILE_ENV).map(PathBuf::from)) {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file '{}'", path.display()))?;
        // Plain full-format lines; no colour codes in files.
        layers.push(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)).boxed());
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_environment() {
        assert_eq!(directive(Some("debug"), Some("info".into())), "debug");
        assert_eq!(directive(None, Some("zmlabel_core=trace".into())), "zmlabel_core=trace");
        assert_eq!(directive(None, None), "warn");
        assert_eq!(directive(None, Some("  ".into())), "warn");
    }

    #[test]
    fn log_file_flag_beats_environment() {
        let flag = Path::new("cli.log");
        assert_eq!(log_file(Some(flag), Some("env.log".into())), Some(PathBuf::from("cli.log")));
        assert_eq!(log_file(None, Some("env.log".into())), Some(PathBuf::from("env.log")));
        assert_eq!(log_file(None, Some(PathBuf::new())), None);
        assert_eq!(log_file(None, None), None);
    }

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!(LogFormat::parse("Compact").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::parse(" pretty ").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("").unwrap(), LogFormat::Full);
        assert!(LogFormat::parse("json").is_err());
    }
}
