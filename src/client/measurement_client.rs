// ==========================================
// Ministry Performance Tracking - Measurement Query Interface
// ==========================================
// Responsibility: define the remote measurement boundary (no implementation)
// Implementors: HttpMeasurementClient (production), test mocks
// Rule: the engine never sees transports, only these traits
// ==========================================

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::error::ClientResult;
use crate::domain::types::Subject;

// ==========================================
// MeasurementQuery
// ==========================================
/// Parameters of one remote measurement call: one subject, one fiscal
/// year. When fan-out is in effect the sector/subsector scope is the
/// SUBJECT's own, not the requester's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasurementQuery {
    pub subject_id: String,
    /// Canonical (capitalized, space-normalized) role label
    pub role_label: String,
    pub fiscal_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsector_id: Option<String>,
}

// ==========================================
// RawMeasurementRow
// ==========================================
/// One per-KPI figure set as shipped by the backend, tagged with the
/// goal/KRA label pair used for grouping. Period maps arrive with
/// whatever keys the producer chose; normalization happens on ingest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMeasurementRow {
    #[serde(default)]
    pub kpi_id: Option<String>,
    #[serde(default)]
    pub kpi_name: Option<String>,
    /// Goal description label
    #[serde(default)]
    pub goal: Option<String>,
    /// KRA name label
    #[serde(default)]
    pub kra: Option<String>,
    #[serde(default)]
    pub targets: IndexMap<String, Value>,
    #[serde(default)]
    pub performance: IndexMap<String, Value>,
    #[serde(default)]
    pub ratios: IndexMap<String, Value>,
}

// ==========================================
// MeasurementClient trait
// ==========================================
#[async_trait]
pub trait MeasurementClient: Send + Sync {
    /// Fetch the per-KPI figures for one (subject, fiscal year) pair.
    ///
    /// # Parameters
    /// - query: subject id, canonical role label, fiscal year, scope
    ///
    /// # Returns
    /// - Ok(rows): zero or more per-KPI figure rows
    /// - Err(ClientError): transport or protocol failure (the fetcher
    ///   degrades this to an empty partial result)
    async fn fetch_measurements(&self, query: &MeasurementQuery)
        -> ClientResult<Vec<RawMeasurementRow>>;
}

// ==========================================
// UserDirectory trait
// ==========================================
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// List every known user, in the directory's stable order.
    /// Fan-out filtering (by sector, by role class) happens in the
    /// fetcher, not here.
    async fn list_users(&self) -> ClientResult<Vec<Subject>>;
}
