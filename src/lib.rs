// ==========================================
// Ministry Performance Tracking - KPI Aggregation & Reporting Engine
// ==========================================
// System role: the hierarchical aggregation core behind the dashboard
// tables, printable reports, and validation screens.
// Stateless per invocation: normalize -> fetch -> merge -> aggregate.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Client layer - measurement backend boundary
pub mod client;

// Engine layer - aggregation pipeline stages
pub mod engine;

// Configuration layer
pub mod config;

// Logging
pub mod logging;

// API layer - facade for presentation collaborators
pub mod api;

// ==========================================
// Core type re-exports
// ==========================================

// Domain types
pub use domain::{AssignmentTree, Goal, GroupedRow, Kpi, Kra, MeasurementRecord, PeriodMap, Role, RoleClass, Subject};

// Engines
pub use engine::{
    AggregationReport, AssignmentNormalizer, FiscalYearWindow, HierarchyAggregator,
    MeasurementFetcher, PeriodKey, RatioValue, RecordMerger,
};

// Client boundary
pub use client::{HttpMeasurementClient, MeasurementClient, MeasurementQuery, UserDirectory};

// API
pub use api::{ApiError, ApiResult, ReportingApi};

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// System name
pub const APP_NAME: &str = "Ministry KPI Aggregation Engine";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
