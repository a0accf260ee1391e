use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("Invalid device key: {0}")]
    InvalidKey(String),

    #[error("Failed to seal value: {0}")]
    Seal(String),

    #[error("Failed to open sealed value: {0}")]
    Open(String),

    #[error("Value is not sealed")]
    NotSealed,

    #[error("Unsupported sealed value version {0}")]
    UnsupportedVersion(u32),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type EncryptionResult<T> = Result<T, EncryptionError>;
