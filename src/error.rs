// ⚠️ Error taxonomy
// One enum for every failure the classification pipeline can raise

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifError {
    /// Malformed value, bad `k`, insufficient neighbors, strict-mode missing cell
    #[error("Validation error: {0}")]
    Validation(String),

    /// Input table does not carry exactly the expected columns
    #[error("Schema error: {0}")]
    Schema(String),

    /// Attribute name with no matching computation
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl ClassifError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ClassifError::Validation(msg.into())
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        ClassifError::Schema(msg.into())
    }

    pub fn invalid_attribute(name: impl Into<String>) -> Self {
        ClassifError::InvalidAttribute(name.into())
    }
}

pub type Result<T> = std::result::Result<T, ClassifError>;
