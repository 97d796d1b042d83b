use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(
                    f,
                    "invalid log level/filter '{}': unable to build EnvFilter",
                    value
                )
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Where log lines go. One-shot CLI commands keep stdout for their own
/// output, so they log to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Stdout,
    Stderr,
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_with_sink(config, LogSink::Stdout)
}

pub fn init_with_sink(config: &TelemetryConfig, sink: LogSink) -> Result<(), TelemetryError> {
    let env_filter = build_filter(&config.log_level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false);

    match sink {
        LogSink::Stdout => builder.try_init(),
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
    }
    .map_err(TelemetryError::Subscriber)
}

fn build_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(log_level).map_err(|source| TelemetryError::EnvFilter {
            value: log_level.to_string(),
            source,
        }),
    }
}
