//! Error types for LogFox operations.

use thiserror::Error;

/// The main error type for LogFox operations.
///
/// Logging itself is infallible by construction. The only failures a log
/// call can produce are the two guard-clause variants, [`ContextCapture`]
/// and [`Precondition`]; everything else belongs to configuration and I/O
/// around the logger.
///
/// [`ContextCapture`]: LogFoxError::ContextCapture
/// [`Precondition`]: LogFoxError::Precondition
#[derive(Error, Debug)]
pub enum LogFoxError {
    /// The caller's context (source name, member, line) could not be resolved.
    ///
    /// The log call is aborted and nothing is emitted.
    #[error("Could not capture caller context: {0}")]
    ContextCapture(String),

    /// An operation was requested before the host runtime was ready.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl LogFoxError {
    /// Whether this error is one of the guard clauses that drop a single log call.
    pub fn is_dropped_call(&self) -> bool {
        matches!(self, LogFoxError::ContextCapture(_) | LogFoxError::Precondition(_))
    }
}

/// A specialized Result type for LogFox operations.
pub type Result<T> = std::result::Result<T, LogFoxError>;

/// Helper macro to bail out with a LogFoxError
///
/// # Example
///
/// ```ignore
/// if !running {
///     bail!(Precondition, "host is not running");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::LogFoxError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::LogFoxError::$variant(format!($fmt, $($arg)*)))
    };
    ($msg:expr) => {
        return Err($crate::LogFoxError::Other($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::LogFoxError::Other(format!($fmt, $($arg)*)))
    };
}
