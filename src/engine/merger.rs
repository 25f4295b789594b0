// ==========================================
// Ministry Performance Tracking - Record Merger
// ==========================================
// Responsibility: fold the flat list of partial measurement records
// into one record per KPI reference.
// Rule: deterministic given input order - records fold in list order,
// later values overwrite earlier ones for the same (field, period key),
// first-seen order of KPIs and period keys is preserved.
// ==========================================

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::domain::measurement::{MeasurementRecord, PeriodMap};

// ==========================================
// RecordMerger
// ==========================================
pub struct RecordMerger;

impl RecordMerger {
    /// Merge partial records into one record per KPI reference.
    ///
    /// # Parameters
    /// - records: unmerged records in fetch plan order
    ///
    /// # Returns
    /// - insertion-ordered index: KPI reference -> merged record.
    ///   Merging a list concatenated with itself equals merging it once.
    pub fn merge(records: Vec<MeasurementRecord>) -> IndexMap<String, MeasurementRecord> {
        let input_len = records.len();
        let mut merged: IndexMap<String, MeasurementRecord> = IndexMap::new();

        for record in records {
            let Some(kpi_ref) = record.kpi_ref().map(str::to_string) else {
                warn!("measurement record without KPI reference skipped during merge");
                continue;
            };
            match merged.entry(kpi_ref) {
                indexmap::map::Entry::Occupied(mut entry) => {
                    merge_into(entry.get_mut(), record);
                }
                indexmap::map::Entry::Vacant(entry) => {
                    entry.insert(record);
                }
            }
        }

        debug!(input = input_len, merged = merged.len(), "measurement records merged");
        merged
    }
}

/// Fold `incoming` into `existing`: union the three period maps and
/// backfill display metadata the earlier records lacked.
fn merge_into(existing: &mut MeasurementRecord, incoming: MeasurementRecord) {
    if existing.kpi_id.is_none() {
        existing.kpi_id = incoming.kpi_id;
    }
    if existing.kpi_name.is_none() {
        existing.kpi_name = incoming.kpi_name;
    }
    if existing.goal_label.is_none() {
        existing.goal_label = incoming.goal_label;
    }
    if existing.kra_label.is_none() {
        existing.kra_label = incoming.kra_label;
    }
    merge_period_map(&mut existing.targets, incoming.targets);
    merge_period_map(&mut existing.performance, incoming.performance);
    merge_period_map(&mut existing.ratios, incoming.ratios);
}

/// IndexMap::insert keeps the first-seen position of an existing key
/// while replacing its value - exactly the overwrite-but-order-stable
/// contract the merge guarantees.
fn merge_period_map(existing: &mut PeriodMap, incoming: PeriodMap) {
    for (key, value) in incoming {
        existing.insert(key, value);
    }
}
