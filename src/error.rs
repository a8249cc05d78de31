//! Error types for the take-home pay engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during tax calculation and
//! country configuration loading.

use thiserror::Error;

/// The main error type for the take-home pay engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use takehome_engine::error::EngineError;
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

    /// Country was not found in the loaded configuration.
    #[error("Country not found: {name}")]
    CountryNotFound {
        /// The country name that was not found.
        name: String,
    },

    /// A bracket table violated the ordering or contiguity invariants.
    #[error("Invalid bracket table: {message}")]
    InvalidBrackets {
        /// A description of what made the table invalid.
        message: String,
    },

    /// A monetary or fractional input was out of its valid domain.
    #[error("Invalid amount '{field}': {message}")]
    InvalidAmount {
        /// The input field that was invalid.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },

    /// The gross-from-net search exceeded its iteration budget.
    #[error("Gross search for net {target_net} did not converge within {iterations} iterations")]
    NonConvergent {
        /// The target annual net income that was being solved for.
        target_net: f64,
        /// The iteration budget that was exhausted.
        iterations: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
