//! Support for structured logging.

use std::{fmt, io::stderr, str::FromStr};

use tracing_subscriber::EnvFilter;

use crate::common::*;

/// The filter we use when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info";

/// What log format we should use.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub(crate) enum LogFormat {
    /// Pretty, indented, multi-line log entries.
    Indented,
    /// Single-line log entries.
    #[default]
    Flat,
    /// JSON records.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Indented => "indented".fmt(f),
            LogFormat::Flat => "flat".fmt(f),
            LogFormat::Json => "json".fmt(f),
        }
    }
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "indented" => Ok(LogFormat::Indented),
            "flat" => Ok(LogFormat::Flat),
            "json" => Ok(LogFormat::Json),
            _ => Err(format_err!("unknown log format: {}", s)),
        }
    }
}

/// Send `tracing` events to standard error in `format`, filtered by
/// `RUST_LOG`.
pub(crate) fn init_logging(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr);
    let result = match format {
        LogFormat::Indented => builder.pretty().try_init(),
        LogFormat::Flat => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|err| format_err!("could not initialize logging: {}", err))
}

#[test]
fn parse_and_display() {
    for format in [LogFormat::Indented, LogFormat::Flat, LogFormat::Json] {
        assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
    }
    assert!("yaml".parse::<LogFormat>().is_err());
}
