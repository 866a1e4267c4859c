use thiserror::Error;

/// Errors produced while decoding, encoding or validating directory payloads.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to decode employee payload: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("failed to encode employee payload: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("employee record {index} has an empty required field `{field}`")]
    InvalidRecord { index: usize, field: &'static str },
}

impl ModelError {
    /// True when the payload itself was unreadable (syntax, shape or type).
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ModelError::Decoding(_) | ModelError::InvalidRecord { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
