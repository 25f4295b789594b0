// ==========================================
// Ministry Performance Tracking - API Layer
// ==========================================
// Responsibility: the surface presentation collaborators call.
// ==========================================

pub mod error;
pub mod reporting_api;

pub use error::{ApiError, ApiResult};
pub use reporting_api::ReportingApi;
