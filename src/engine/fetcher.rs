// ==========================================
// Ministry Performance Tracking - Measurement Fetcher
// ==========================================
// Responsibility: plan and issue the remote measurement calls for one
// aggregation pass - role-dependent fan-out across subjects, times the
// two-fiscal-year window.
// Rule: every (subject, year) call runs concurrently; a failed call
// degrades to an empty partial result and never aborts the batch.
// Rule: results are flattened in plan order (subject, then year), so
// output order is deterministic regardless of completion order.
// ==========================================

use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::client::error::ClientResult;
use crate::client::measurement_client::{MeasurementClient, MeasurementQuery, RawMeasurementRow, UserDirectory};
use crate::domain::measurement::{canonical_period_map, MeasurementRecord};
use crate::domain::types::{RoleClass, Subject};
use crate::engine::period::FiscalYearWindow;

// ==========================================
// MeasurementFetcher
// ==========================================
pub struct MeasurementFetcher {
    client: Arc<dyn MeasurementClient>,
    directory: Arc<dyn UserDirectory>,
}

impl MeasurementFetcher {
    /// # Parameters
    /// - client: measurement backend boundary
    /// - directory: user directory used for fan-out
    pub fn new(client: Arc<dyn MeasurementClient>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { client, directory }
    }

    /// Fetch all partial measurement records for a requester.
    ///
    /// # Parameters
    /// - requester: identity the aggregation runs for
    /// - window: current + previous fiscal year
    ///
    /// # Returns
    /// - Ok(records): flat, unmerged record list in (subject, year) plan
    ///   order; failed calls contribute nothing
    /// - Err(ClientError): only when the user directory itself is
    ///   unreachable (no fan-out plan can be built)
    #[instrument(skip(self, requester), fields(requester = %requester.id, role = %requester.role))]
    pub async fn fetch_all(
        &self,
        requester: &Subject,
        window: &FiscalYearWindow,
    ) -> ClientResult<Vec<MeasurementRecord>> {
        let started = Instant::now();
        let batch_id = Uuid::new_v4();

        // === Step 1: resolve fan-out subjects ===
        let subjects = self.resolve_subjects(requester).await?;

        // === Step 2: build the (subject x fiscal year) call plan ===
        let plan: Vec<MeasurementQuery> = subjects
            .iter()
            .flat_map(|subject| {
                window.years().into_iter().map(move |fiscal_year| MeasurementQuery {
                    subject_id: subject.id.clone(),
                    role_label: subject.role.label().to_string(),
                    fiscal_year,
                    sector_id: subject.sector_id.clone(),
                    subsector_id: subject.subsector_id.clone(),
                })
            })
            .collect();

        info!(
            batch_id = %batch_id,
            subjects = subjects.len(),
            calls = plan.len(),
            "measurement fetch batch started"
        );

        // === Step 3: launch every call concurrently ===
        // join_all returns results in input order; completion order is
        // irrelevant to the output.
        let calls = plan.iter().map(|query| async move {
            match self.client.fetch_measurements(query).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn!(
                        subject = %query.subject_id,
                        fiscal_year = query.fiscal_year,
                        error = %e,
                        "measurement call failed, continuing with empty partial result"
                    );
                    Vec::new()
                }
            }
        });
        let batches: Vec<Vec<RawMeasurementRow>> = join_all(calls).await;

        // === Step 4: flatten in plan order ===
        let mut records = Vec::new();
        let mut dropped_rows = 0usize;
        for rows in batches {
            for row in rows {
                match record_from_row(row) {
                    Some(record) => records.push(record),
                    None => dropped_rows += 1,
                }
            }
        }
        if dropped_rows > 0 {
            warn!(batch_id = %batch_id, dropped_rows, "measurement rows without a KPI reference dropped");
        }

        info!(
            batch_id = %batch_id,
            records = records.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "measurement fetch batch completed"
        );
        Ok(records)
    }

    /// Fan-out policy by role class:
    /// - Strategic: every known user
    /// - Chief: every non-oversight user in the requester's sector
    ///   (the requester itself is not queried)
    /// - Staff: the requester only
    async fn resolve_subjects(&self, requester: &Subject) -> ClientResult<Vec<Subject>> {
        match requester.role.class() {
            RoleClass::Strategic => self.directory.list_users().await,
            RoleClass::Chief => {
                let users = self.directory.list_users().await?;
                Ok(users
                    .into_iter()
                    .filter(|user| {
                        user.id != requester.id
                            && user.sector_id == requester.sector_id
                            && user.role.class() == RoleClass::Staff
                    })
                    .collect())
            }
            RoleClass::Staff => Ok(vec![requester.clone()]),
        }
    }
}

/// Convert one wire row into a domain record, normalizing period-map
/// keys. Rows with neither KPI id nor name are unusable and dropped.
fn record_from_row(row: RawMeasurementRow) -> Option<MeasurementRecord> {
    let record = MeasurementRecord {
        kpi_id: row.kpi_id.filter(|s| !s.is_empty()),
        kpi_name: row.kpi_name.filter(|s| !s.is_empty()),
        goal_label: row.goal.filter(|s| !s.is_empty()),
        kra_label: row.kra.filter(|s| !s.is_empty()),
        targets: canonical_period_map(row.targets),
        performance: canonical_period_map(row.performance),
        ratios: canonical_period_map(row.ratios),
    };
    record.kpi_ref()?;
    Some(record)
}
