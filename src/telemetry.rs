//! Structured logging initialization.
//!
//! Dispatch emits `tracing` events with structured fields (`request_id`,
//! `component`, `action`, `latency_us`, ...). This module installs a
//! subscriber for them: JSON lines for production, pretty output for
//! development, filtered by `RUST_LOG` or the configured level.

use anyhow::{Context, Result};
use std::env;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
    /// Extra filter directives (comma-separated, e.g. `ewcrouter::router=debug`)
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
    /// Write through a non-blocking background writer
    pub async_logging: bool,
}

impl LogConfig {
    /// Parse configuration from `EWC_LOG_*` environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from `lookup`, keyed by environment variable name.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: lookup("EWC_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: LogFormat::parse(&lookup("EWC_LOG_FORMAT").unwrap_or_default()),
            target_filter: lookup("EWC_LOG_TARGET_FILTER"),
            include_location: lookup("EWC_LOG_INCLUDE_LOCATION")
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
            async_logging: lookup("EWC_LOG_ASYNC")
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Configuration for local development
    #[must_use]
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            target_filter: None,
            include_location: true,
            async_logging: false,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.to_lowercase()));
        if let Some(target_filter) = &self.target_filter {
            for directive in target_filter.split(',').map(str::trim).filter(|d| !d.is_empty()) {
                match directive.parse() {
                    Ok(directive) => filter = filter.add_directive(directive),
                    Err(e) => tracing::warn!(directive, error = %e, "Ignoring invalid log filter directive"),
                }
            }
        }
        filter
    }
}

/// Install the global subscriber.
///
/// Returns the background writer guard when `async_logging` is set; keep it
/// alive for the lifetime of the process so buffered lines are flushed.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let (writer, guard) = if config.async_logging {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());
        (tracing_subscriber::fmt::writer::BoxMakeWriter::new(non_blocking), Some(guard))
    } else {
        (tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stdout), None)
    };

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}
