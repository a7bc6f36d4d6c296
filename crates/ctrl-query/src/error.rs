//! Load error types for ctrl-query.

use std::path::PathBuf;

/// Errors from loading and validating a dataset snapshot.
///
/// These are the only failures the query layer produces: once an engine is
/// built, every operation is infallible.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The dataset or overlay file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an array.
    #[error("dataset must be a JSON array of records, found {found}")]
    NotAnArray { found: &'static str },

    /// A single record failed validation.
    #[error(
        "record #{index} (id {}): invalid `{field}`: {reason}",
        .id.as_deref().unwrap_or("<missing>")
    )]
    InvalidRecord {
        index: usize,
        id: Option<String>,
        field: String,
        reason: String,
    },

    /// The analyses overlay is not an object of id -> text.
    #[error("invalid analyses overlay: {0}")]
    InvalidAnalyses(String),
}
