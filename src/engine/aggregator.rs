// ==========================================
// Ministry Performance Tracking - Hierarchy Aggregator
// ==========================================
// Responsibility: join the normalized assignment tree with merged
// measurement records into rows grouped by (Goal, KRA) for rendering.
// Rule: grouping key is "<GoalDescription>|||<KRAName>" - labels, not
// ids. Two goals sharing a description text land in one visual group;
// the dashboard groups by label and this is the documented contract.
// Rule: a KPI without a merged record gets empty maps, not an error.
// ==========================================

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::hierarchy::AssignmentTree;
use crate::domain::measurement::{GroupedRow, MeasurementRecord};
use crate::engine::period::{resolve, resolve_number, FiscalYearWindow};
use crate::engine::ratio::{ratio_percent_f64, RatioValue};

/// Separator inside the composite group key
pub const GROUP_KEY_SEPARATOR: &str = "|||";

/// Compose the group key for a (goal description, KRA name) pair
pub fn group_key(goal_description: &str, kra_name: &str) -> String {
    format!("{}{}{}", goal_description, GROUP_KEY_SEPARATOR, kra_name)
}

// ==========================================
// AggregationReport
// ==========================================
/// Ordered mapping from group key to grouped rows - the engine's final
/// output, consumed by table/report/modal presentation collaborators.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationReport {
    groups: IndexMap<String, Vec<GroupedRow>>,
}

impl AggregationReport {
    pub fn groups(&self) -> &IndexMap<String, Vec<GroupedRow>> {
        &self.groups
    }

    pub fn group(&self, key: &str) -> Option<&[GroupedRow]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn row_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ==========================================
// HierarchyAggregator
// ==========================================
pub struct HierarchyAggregator;

impl HierarchyAggregator {
    /// Join tree and merged records into grouped rows.
    ///
    /// # Parameters
    /// - tree: canonical assignment tree (read-only)
    /// - merged: one measurement record per KPI reference
    /// - window: fiscal-year window the report covers
    ///
    /// # Returns
    /// - AggregationReport in tree walk order
    pub fn aggregate(
        tree: &AssignmentTree,
        merged: &IndexMap<String, MeasurementRecord>,
        window: &FiscalYearWindow,
    ) -> AggregationReport {
        Self::build(tree, merged, window, false)
    }

    /// Same as `aggregate`, additionally filling absent ratio cells for
    /// the window's standard periods from targets/performance.
    pub fn aggregate_with_ratios(
        tree: &AssignmentTree,
        merged: &IndexMap<String, MeasurementRecord>,
        window: &FiscalYearWindow,
    ) -> AggregationReport {
        Self::build(tree, merged, window, true)
    }

    fn build(
        tree: &AssignmentTree,
        merged: &IndexMap<String, MeasurementRecord>,
        window: &FiscalYearWindow,
        precompute_ratios: bool,
    ) -> AggregationReport {
        let mut groups: IndexMap<String, Vec<GroupedRow>> = IndexMap::new();

        // Depth-first walk in tree order keeps group and row order
        // deterministic.
        for (goal, kra, kpi) in tree.iter_kpis() {
            // merged records are keyed informally: id when the producer
            // sent one, else display name
            let record = merged.get(&kpi.id).or_else(|| merged.get(&kpi.name));

            let mut row = match record {
                Some(record) => GroupedRow {
                    kpi_id: kpi.id.clone(),
                    kpi_name: kpi.name.clone(),
                    targets: record.targets.clone(),
                    performance: record.performance.clone(),
                    ratios: record.ratios.clone(),
                },
                None => GroupedRow {
                    kpi_id: kpi.id.clone(),
                    kpi_name: kpi.name.clone(),
                    targets: Default::default(),
                    performance: Default::default(),
                    ratios: Default::default(),
                },
            };

            if precompute_ratios {
                fill_ratio_cells(&mut row, window);
            }

            groups
                .entry(group_key(&goal.description, &kra.name))
                .or_default()
                .push(row);
        }

        let report = AggregationReport { groups };
        debug!(
            groups = report.group_count(),
            rows = report.row_count(),
            "hierarchy aggregation completed"
        );
        report
    }
}

/// Fill absent ratio cells for the window's standard periods, computing
/// performance/target through the shared ratio implementation.
fn fill_ratio_cells(row: &mut GroupedRow, window: &FiscalYearWindow) {
    for period in window.period_keys() {
        let storage_key = period.storage_key();
        if resolve(&row.ratios, &storage_key, window).is_some() {
            continue;
        }
        let target = resolve_number(&row.targets, &storage_key, window);
        let performance = resolve_number(&row.performance, &storage_key, window);
        if let (Some(performance), Some(target)) = (performance, target) {
            if let RatioValue::Percent(percent) = ratio_percent_f64(performance, target) {
                row.ratios.insert(storage_key, Value::from(percent));
            }
        }
    }
}
