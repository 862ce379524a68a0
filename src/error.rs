//! Error types for the scheduling engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing wages or
//! assembling publish batches.

use thiserror::Error;

/// The main error type for the scheduling engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use roster_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A schedule operation was attempted without a location context.
    #[error("Missing location context for schedule operation")]
    MissingLocation,

    /// A publish was attempted for a week that contains no shifts at all.
    #[error("Nothing to publish for week {week_id}: no shifts scheduled")]
    NothingToPublish {
        /// The week that was requested.
        week_id: String,
    },

    /// An aggregate passed to an operation belongs to a different week.
    #[error("Aggregate for employee '{employee_id}' belongs to week {found}, expected {expected}")]
    WeekMismatch {
        /// The employee whose aggregate was mismatched.
        employee_id: String,
        /// The week the aggregate belongs to.
        found: String,
        /// The week the operation targets.
        expected: String,
    },

    /// An overtime mode string was not one of "weekly" or "daily".
    #[error("Invalid overtime mode: '{mode}'")]
    InvalidOvertimeMode {
        /// The mode string that failed to parse.
        mode: String,
    },

    /// A shift timestamp string did not match the `DD-MM-YYYY HH:mm` format.
    #[error("Invalid shift time '{value}': {message}")]
    InvalidTimeFormat {
        /// The string that failed to parse.
        value: String,
        /// A description of the parse error.
        message: String,
    },

    /// A week identifier string did not match the `YYYY-Www` format.
    #[error("Invalid week id: '{value}'")]
    InvalidWeekId {
        /// The string that failed to parse.
        value: String,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
