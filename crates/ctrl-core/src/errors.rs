//! Cross-cutting error types for llmctrl.
//!
//! Loader errors (`LoadError`) and configuration errors (`ConfigError`) are
//! defined in their respective crates. Everything converges on `anyhow` in
//! the `ctrl-cli` binary.

use thiserror::Error;

/// Errors raised while building or parsing core types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string tag did not match any known enum value.
    #[error("Unknown {field} value: {value:?}")]
    UnknownValue { field: String, value: String },

    /// A category table or id violated its constraints.
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
