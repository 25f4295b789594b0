// ==========================================
// Ministry Performance Tracking - API Layer Errors
// ==========================================
// Responsibility: convert lower-layer errors into the errors presentation
// collaborators see. Partial-data conditions never surface here - only
// the single top-level payload decode failure and boundary breakage do.
// ==========================================

use thiserror::Error;

use crate::client::error::ClientError;
use crate::engine::normalizer::NormalizeError;

/// API layer error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== Input errors =====
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The one whole-call data failure: payload decodable as neither shape
    #[error("assignment payload rejected: {0}")]
    MalformedPayload(#[from] NormalizeError),

    // ===== Boundary errors =====
    #[error("measurement backend unavailable: {0}")]
    Backend(#[from] ClientError),

    // ===== Generic =====
    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias
pub type ApiResult<T> = Result<T, ApiError>;
