#![forbid(unsafe_code)]

//! Structured log output for applications embedding modalkit.
//!
//! The library crates only emit `tracing` events. This module installs a
//! global `tracing-subscriber` that writes them as JSON lines to stderr.
//!
//! The filter is read from `MODALKIT_LOG` using `EnvFilter` syntax
//! (e.g. `modalkit_core=debug`), defaulting to `info`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "MODALKIT_LOG";

/// Errors from [`init`].
#[derive(Debug)]
pub enum LoggingError {
    /// The filter in `MODALKIT_LOG` could not be parsed.
    InvalidFilter(String),
    /// A global subscriber is already installed.
    AlreadyInitialized,
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFilter(msg) => write!(f, "invalid {LOG_ENV} filter: {msg}"),
            Self::AlreadyInitialized => write!(f, "a global tracing subscriber is already set"),
        }
    }
}

impl std::error::Error for LoggingError {}

/// Build the filter from `MODALKIT_LOG`, or `info` if unset.
///
/// # Errors
///
/// [`LoggingError::InvalidFilter`] if the variable is set but malformed.
pub fn filter_from_env() -> Result<EnvFilter, LoggingError> {
    match std::env::var(LOG_ENV) {
        Ok(directives) => {
            EnvFilter::try_new(directives).map_err(|e| LoggingError::InvalidFilter(e.to_string()))
        }
        Err(_) => Ok(EnvFilter::new("info")),
    }
}

/// Install a JSON subscriber on stderr as the global default.
///
/// # Errors
///
/// - [`LoggingError::InvalidFilter`] if `MODALKIT_LOG` is malformed.
/// - [`LoggingError::AlreadyInitialized`] if called twice or another
///   subscriber was installed first.
pub fn init() -> Result<(), LoggingError> {
    let filter = filter_from_env()?;
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}
