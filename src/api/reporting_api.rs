// ==========================================
// Ministry Performance Tracking - Reporting API
// ==========================================
// Responsibility: the facade presentation collaborators call - one
// entry point running the full aggregation pipeline, plus the
// on-demand ratio detail used by cell dialogs.
// Architecture: API layer -> engine stages -> client boundary
// ==========================================

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::client::measurement_client::{MeasurementClient, UserDirectory};
use crate::domain::measurement::GroupedRow;
use crate::domain::types::Subject;
use crate::engine::aggregator::{AggregationReport, HierarchyAggregator};
use crate::engine::fetcher::MeasurementFetcher;
use crate::engine::merger::RecordMerger;
use crate::engine::normalizer::AssignmentNormalizer;
use crate::engine::period::{resolve_number, FiscalYearWindow};
use crate::engine::ratio::{ratio_percent_f64, RatioValue};

// ==========================================
// ReportingApi
// ==========================================
pub struct ReportingApi {
    fetcher: MeasurementFetcher,
}

impl ReportingApi {
    /// # Parameters
    /// - client: measurement backend boundary
    /// - directory: user directory used for fan-out
    pub fn new(client: Arc<dyn MeasurementClient>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { fetcher: MeasurementFetcher::new(client, directory) }
    }

    /// Build the grouped performance report for the current window
    /// (today's fiscal year and the one before).
    pub async fn build_report(
        &self,
        payload: &Value,
        requester: &Subject,
    ) -> ApiResult<AggregationReport> {
        self.build_report_for_window(payload, requester, &FiscalYearWindow::today())
            .await
    }

    /// Build the grouped performance report for an explicit window.
    ///
    /// # Parameters
    /// - payload: raw assignment payload (either accepted shape)
    /// - requester: identity the aggregation runs for; fan-out follows
    ///   its role class
    /// - window: current + previous fiscal year
    ///
    /// # Returns
    /// - Ok(AggregationReport): grouped rows with ratio cells filled
    /// - Err(ApiError): unrecognized payload, empty requester id, or an
    ///   unreachable user directory - never a partial-data condition
    #[instrument(skip(self, payload, requester), fields(requester = %requester.id))]
    pub async fn build_report_for_window(
        &self,
        payload: &Value,
        requester: &Subject,
        window: &FiscalYearWindow,
    ) -> ApiResult<AggregationReport> {
        // === Step 1: validate input ===
        if requester.id.trim().is_empty() {
            return Err(ApiError::InvalidInput("requester id must not be empty".to_string()));
        }

        // === Step 2: normalize the assignment payload (no I/O) ===
        let tree = AssignmentNormalizer::normalize(payload)?;

        // === Step 3: fetch partial records (concurrent I/O) ===
        let records = self.fetcher.fetch_all(requester, window).await?;

        // === Step 4: merge to one record per KPI ===
        let merged = RecordMerger::merge(records);

        // === Step 5: aggregate into grouped rows ===
        let report = HierarchyAggregator::aggregate_with_ratios(&tree, &merged, window);

        info!(
            groups = report.group_count(),
            rows = report.row_count(),
            fiscal_year = window.current,
            "performance report built"
        );
        Ok(report)
    }

    /// On-demand ratio for one report cell, as shown in detail dialogs.
    /// Resolves performance and target through the period fallback
    /// ladder, then computes through the shared ratio implementation.
    ///
    /// # Parameters
    /// - row: the grouped row the dialog opened on
    /// - period_key: raw period key of the cell ("q1", "year-2016", ...)
    /// - window: the report's fiscal-year window
    pub fn kpi_ratio_detail(
        row: &GroupedRow,
        period_key: &str,
        window: &FiscalYearWindow,
    ) -> RatioValue {
        let performance = resolve_number(&row.performance, period_key, window);
        let target = resolve_number(&row.targets, period_key, window);
        match (performance, target) {
            (Some(performance), Some(target)) => ratio_percent_f64(performance, target),
            _ => RatioValue::NoRatio,
        }
    }
}
