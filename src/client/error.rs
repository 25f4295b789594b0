// ==========================================
// Ministry Performance Tracking - Client Layer Errors
// ==========================================
// Responsibility: error taxonomy for the measurement backend boundary
// Tooling: thiserror derive macro
// ==========================================

use thiserror::Error;

/// Client layer error type
#[derive(Error, Debug)]
pub enum ClientError {
    // ===== Transport errors =====
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    // ===== Protocol errors =====
    #[error("error status from measurement backend: status={status}, body={body}")]
    ErrorStatus { status: u16, body: String },

    #[error("response body could not be decoded: {0}")]
    Decode(String),

    // ===== Configuration errors =====
    #[error("invalid client configuration: {0}")]
    Configuration(String),

    // ===== Generic =====
    #[error("internal client error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if err.is_builder() {
            ClientError::Configuration(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Result type alias
pub type ClientResult<T> = Result<T, ClientError>;
