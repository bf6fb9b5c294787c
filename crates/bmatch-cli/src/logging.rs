//! Subscriber setup for the `bmatch` binary.
//!
//! The filter comes from `--log-level`, else `BMATCH_TRACE`, else `off`.
//! `BMATCH_LOG_FORMAT` picks `pretty` (default) or `json`, and
//! `BMATCH_LOG_FILE` adds an appending file sink next to stderr.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, LoggingError> {
        if value.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if value.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Err(LoggingError::InvalidFormat(value.to_string()))
        }
    }
}

#[derive(Debug)]
pub enum LoggingError {
    InvalidFilter(String),
    InvalidFormat(String),
    LogFile(io::Error),
    Init(String),
}

impl LoggingError {
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter(_) => "LOG_INVALID_FILTER",
            LoggingError::InvalidFormat(_) => "LOG_INVALID_FORMAT",
            LoggingError::LogFile(_) => "LOG_FILE",
            LoggingError::Init(_) => "LOG_INIT",
        }
    }
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::InvalidFilter(msg) => {
                write!(f, "[{}] Invalid log filter: {}", self.code(), msg)
            }
            LoggingError::InvalidFormat(value) => write!(
                f,
                "[{}] Invalid BMATCH_LOG_FORMAT '{}' (expected 'json' or 'pretty')",
                self.code(),
                value
            ),
            LoggingError::LogFile(err) => {
                write!(f, "[{}] Failed to open log file: {}", self.code(), err)
            }
            LoggingError::Init(msg) => {
                write!(f, "[{}] Failed to initialize logging: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for LoggingError {}

fn open_log_file(path: &str) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LoggingError::LogFile)
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if level.eq_ignore_ascii_case("off") {
        Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
    } else {
        EnvFilter::try_new(level).map_err(|err| LoggingError::InvalidFilter(err.to_string()))
    }
}

/// Install the global subscriber.
///
/// Returns `false` without touching anything when a subscriber is already
/// set.
pub fn init_logging(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level_value = level
        .map(str::to_string)
        .or_else(|| env::var("BMATCH_TRACE").ok())
        .unwrap_or_else(|| "off".to_string());
    let filter = build_filter(&level_value)?;

    let format = env::var("BMATCH_LOG_FORMAT")
        .ok()
        .map_or(Ok(LogFormat::Pretty), |value| LogFormat::parse(&value))?;
    let log_file = env::var("BMATCH_LOG_FILE")
        .ok()
        .map(|path| open_log_file(&path).map(Mutex::new))
        .transpose()?;
    let map_init_err = |err: tracing_subscriber::util::TryInitError| {
        LoggingError::Init(err.to_string())
    };

    match format {
        LogFormat::Json => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .json();
            let file_layer = log_file.map(|file| {
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .json()
            });
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .map_err(map_init_err)?;
        }
        LogFormat::Pretty => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .pretty();
            let file_layer = log_file.map(|file| {
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .pretty()
            });
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .map_err(map_init_err)?;
        }
    }

    Ok(true)
}
