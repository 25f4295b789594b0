// ==========================================
// Ministry Performance Tracking - Client Layer
// ==========================================
// Responsibility: the remote measurement boundary - query/row DTOs, the
// client and directory traits, their error type, and the HTTP adapter.
// ==========================================

pub mod error;
pub mod http_client;
pub mod measurement_client;

pub use error::{ClientError, ClientResult};
pub use http_client::HttpMeasurementClient;
pub use measurement_client::{MeasurementClient, MeasurementQuery, RawMeasurementRow, UserDirectory};
