//! Error types for the compensation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the calculators and their configuration can produce.
//! Failures of the upstream proxy are boundary concerns and live in
//! [`crate::api::ProxyError`].

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the compensation engine.
///
/// # Example
///
/// ```
/// use compensation_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "edad".to_string(),
///     message: "must be greater than zero".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid input 'edad': must be greater than zero");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A calculator input was missing, out of range, or inconsistent.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The wire name of the offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No statutory amounts are effective on the requested date.
    #[error("No statutory amounts effective on {date}")]
    RatesNotFound {
        /// The date for which amounts were requested.
        date: NaiveDate,
    },

    /// A tool invocation named an operation that does not exist.
    #[error("Tool not found: {name}")]
    ToolNotFound {
        /// The requested tool name.
        name: String,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// An [`EngineError::InvalidInput`] for a value whose derived amounts
    /// exceed the range of [`rust_decimal::Decimal`].
    pub fn value_too_large(field: impl Into<String>) -> Self {
        Self::invalid_input(field, "value too large")
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
