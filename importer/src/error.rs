//! Error types for the sheet import run.
//!
//! - [`ApiError`] - remote Sheet Database API failures
//! - [`ReaderError`] - input file reading and decoding
//! - [`OutputError`] - action log serialization and writing
//! - [`ConfigError`] - invalid run configuration
//! - [`ImportError`] - top-level errors that abort a run
//!
//! Only file-level and setup errors ever reach [`ImportError`]. Failures of
//! individual remote calls are caught per row and end up in the action log.

use thiserror::Error;

// =============================================================================
// Remote API Errors
// =============================================================================

/// Errors from a single call against the remote API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Connection or transport level failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    /// Response body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Created record came back without its identifier.
    #[error("Response is missing the '{field}' identifier")]
    MissingId { field: &'static str },
}

// =============================================================================
// Input Errors
// =============================================================================

/// Errors while reading the TSV input.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Failed to read file.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited text.
    #[error("Invalid TSV format: {0}")]
    Csv(#[from] csv::Error),

    /// No header and no rows.
    #[error("No data found in the TSV file")]
    Empty,
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while writing the action log.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize action log: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors in the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Base URL is not an http(s) address.
    #[error("Invalid API base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),

    /// HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

// =============================================================================
// Import Errors (top-level)
// =============================================================================

/// Errors that abort the whole import run.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Reader(#[from] ReaderError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for remote API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for input reading.
pub type ReaderResult<T> = Result<T, ReaderError>;

/// Result type for the whole run.
pub type ImportResult<T> = Result<T, ImportError>;
