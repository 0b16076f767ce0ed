#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Only fatal conditions are errors. Per-type and per-field anomalies found
//! while compiling (unknown type names, malformed generics, unrecognized
//! validation keys) degrade to defaults and never surface here.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// String errors default to `General`; the other string-carrying variants
/// must be built explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// JSON decoding or encoding failed (IR, config file or document).
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// YAML encoding or config decoding failed.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// The upstream source parser failed to run or reported failure.
    #[from(ignore)]
    #[display("Parser Error: {_0}")]
    Parser(String),

    /// Invalid generator configuration.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
