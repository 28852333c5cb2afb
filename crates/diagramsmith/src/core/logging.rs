//! Tracing subscriber setup
//!
//! The library only emits `tracing` events; binaries call [`init_logging`]
//! once to install a subscriber. Output always goes to stderr so diagram
//! source on stdout stays clean.
//!
//! # Usage
//!
//! ```rust
//! use diagramsmith::core::logging::init_logging;
//!
//! // Initialize with default settings
//! let _ = init_logging(None, None);
//!
//! // Or with custom level and format
//! let _ = init_logging(Some("debug"), Some("pretty"));
//! ```
//!
//! # Log Formats
//!
//! - `compact`: one line per event
//! - `pretty`: multi-line with colors and source locations
//! - `json`: one object per event
//!
//! # Environment Variables
//!
//! - `DIAGRAMSMITH_LOG_LEVEL`: Set log level (trace|debug|info|warn|error|off)
//! - `RUST_LOG`: Alternative way to set log level (tracing-subscriber standard)
//! - `DIAGRAMSMITH_LOG_FORMAT`: Set log format (compact|pretty|json)
//!
//! # Filtering Logs
//!
//! Every extractor and emitter logs under its own module path:
//!
//! ```bash
//! RUST_LOG="diagramsmith::plugins::sequence::extractor=trace" diagramsmith generate -t sequence -i notes.txt
//! ```

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

/// Environment variable holding the filter directive
pub const LEVEL_ENV: &str = "DIAGRAMSMITH_LOG_LEVEL";
/// Environment variable holding the output format
pub const FORMAT_ENV: &str = "DIAGRAMSMITH_LOG_FORMAT";

/// Filter used when neither an argument nor the environment sets one
const DEFAULT_LEVEL: &str = "warn";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single line per event, no targets or spans
    #[default]
    Compact,
    /// Multi-line with colors, source locations and span activity
    Pretty,
    /// One JSON object per event, span timings on close
    Json,
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }

    /// The stderr fmt layer for this format
    fn layer(self) -> BoxedLayer {
        let base = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        match self {
            LogFormat::Compact => Box::new(
                base.compact()
                    .with_target(false)
                    .with_span_events(FmtSpan::NONE),
            ),
            LogFormat::Pretty => Box::new(
                base.pretty()
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::ACTIVE),
            ),
            LogFormat::Json => Box::new(
                base.json()
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE),
            ),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::variants()
            .iter()
            .position(|v| *v == name)
            .map(|i| [LogFormat::Compact, LogFormat::Pretty, LogFormat::Json][i])
            .ok_or_else(|| format!("Unknown log format: {}", s))
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter directive from the argument, then `DIAGRAMSMITH_LOG_LEVEL`, then `RUST_LOG`
fn resolve_filter(level: Option<&str>) -> EnvFilter {
    let directive = level
        .map(str::to_string)
        .or_else(|| std::env::var(LEVEL_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
    // malformed directives fall back to the default
    EnvFilter::try_new(directive.trim()).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

fn resolve_format(format: Option<&str>) -> Result<LogFormat, String> {
    match format.map(str::to_string).or_else(|| std::env::var(FORMAT_ENV).ok()) {
        Some(name) => name.parse().map_err(|e| format!("Invalid log format: {}", e)),
        None => Ok(LogFormat::default()),
    }
}

/// Install the global tracing subscriber
///
/// `level` is any `EnvFilter` directive (`debug`, `off`,
/// `diagramsmith::plugins=trace`). When `None`, the environment decides and
/// the default is `warn`. `format` is `compact`, `pretty` or `json`, defaulting
/// to `DIAGRAMSMITH_LOG_FORMAT` and then `compact`.
///
/// Fails if the format is unknown or a global subscriber is already
/// installed; callers that may initialize twice can ignore the error.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = resolve_format(format)?;
    let filter = resolve_filter(level);

    Registry::default()
        .with(format.layer())
        .with(filter)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_log_format_display_round_trips() {
        for name in LogFormat::variants() {
            assert_eq!(name.parse::<LogFormat>().unwrap().to_string(), *name);
        }
        assert_eq!(LogFormat::default(), LogFormat::Compact);
    }

    #[test]
    fn test_explicit_format_wins() {
        assert_eq!(resolve_format(Some(" Pretty ")).unwrap(), LogFormat::Pretty);
        assert!(resolve_format(Some("yaml")).is_err());
    }

    #[test]
    fn test_invalid_format_is_rejected_before_install() {
        let err = init_logging(Some("info"), Some("yaml")).unwrap_err();
        assert!(err.to_string().contains("Invalid log format"));
    }
}
