//! Error types for the pension engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building payment schedules
//! or resolving State Pension age.

use thiserror::Error;

/// The main error type for the pension engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. Producing an
/// empty schedule (end year before start year) is not an error.
///
/// # Example
///
/// ```
/// use pension_engine::error::EngineError;
///
/// let error = EngineError::InvalidConfiguration {
///     message: "cycle length 30 is not one of 7, 14, 28, 91".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid configuration: cycle length 30 is not one of 7, 14, 28, 91"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Caller input did not have the required shape (NI code, date of birth, year).
    #[error("Malformed {field} '{value}': {message}")]
    MalformedInput {
        /// The name of the offending input.
        field: String,
        /// The value as supplied by the caller.
        value: String,
        /// A description of what was expected.
        message: String,
    },

    /// A configuration value was rejected (cycle length, rule table, grid anchors).
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// A description of the rejected configuration.
        message: String,
    },

    /// An internal invariant was broken. Indicates a defect, not bad input.
    #[error("Internal invariant violated: {message}")]
    InternalInvariant {
        /// A description of the broken invariant.
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
}

impl EngineError {
    /// Shorthand for a [`EngineError::MalformedInput`].
    pub fn malformed(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        EngineError::MalformedInput {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
