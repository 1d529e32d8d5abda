use kubewhy_types::ValidationError;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid decision: {0}")]
    Validation(#[from] ValidationError),

    #[error("decision not found: {0}")]
    NotFound(String),

    #[error("invalid decision data in {path}: {reason}")]
    InvalidData { path: String, reason: String },

    #[error("{step} failed for {path}: {source}")]
    Io {
        step: &'static str,
        path: String,
        source: std::io::Error,
    },

    #[error("failed to encode decision: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    pub fn is_invalid_data(&self) -> bool {
        matches!(self, StoreError::InvalidData { .. })
    }
}

/// Adapter for `map_err` that tags an I/O failure with its step and path.
pub(crate) fn io_error(
    step: &'static str,
    path: impl fmt::Display,
) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_string();
    move |source| StoreError::Io { step, path, source }
}
