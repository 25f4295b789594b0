// ==========================================
// Ministry Performance Tracking - Measurement Records
// ==========================================
// Responsibility: per-KPI measurement data as it flows through the engine
// Rule: period maps keep raw producer values lossless; numeric coercion
//       happens only at the point of use (ratio computation, rendering)
// ==========================================

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

// ==========================================
// PeriodMap
// ==========================================
/// Insertion-ordered map from a normalized period key string
/// ("year-2016", "q1-2016", bare "q1"/"year") to the raw figure the
/// producer shipped. Values stay as raw JSON: producers occasionally send
/// numeric strings or junk, and the guards live downstream.
pub type PeriodMap = IndexMap<String, Value>;

/// Normalize raw period-map keys: trim + ASCII lowercase, first-seen
/// key order preserved. Later duplicates (after normalization) overwrite.
pub fn canonical_period_map(raw: IndexMap<String, Value>) -> PeriodMap {
    let mut map = PeriodMap::with_capacity(raw.len());
    for (key, value) in raw {
        map.insert(key.trim().to_ascii_lowercase(), value);
    }
    map
}

// ==========================================
// MeasurementRecord
// ==========================================
/// One partial measurement record for a KPI, as returned by a single
/// remote call. Several records for the same KPI may arrive from
/// different (subject, fiscal year) calls; the merger folds them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeasurementRecord {
    /// KPI id, when the producer sent one
    pub kpi_id: Option<String>,
    /// KPI display name
    pub kpi_name: Option<String>,
    /// Goal description label, used for grouping
    pub goal_label: Option<String>,
    /// KRA name label, used for grouping
    pub kra_label: Option<String>,
    pub targets: PeriodMap,
    pub performance: PeriodMap,
    pub ratios: PeriodMap,
}

impl MeasurementRecord {
    /// Informal KPI reference: id when present, else name
    pub fn kpi_ref(&self) -> Option<&str> {
        self.kpi_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.kpi_name.as_deref().filter(|s| !s.is_empty()))
    }

    /// True when no period map carries any entry
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty() && self.performance.is_empty() && self.ratios.is_empty()
    }
}

// ==========================================
// GroupedRow
// ==========================================
/// One row per KPI inside a (Goal, KRA) group. Purely derived - built
/// fresh on every aggregation call, never persisted. Presentation
/// collaborators read the maps through the period resolver per cell.
#[derive(Debug, Clone, Serialize)]
pub struct GroupedRow {
    pub kpi_id: String,
    pub kpi_name: String,
    pub targets: PeriodMap,
    pub performance: PeriodMap,
    pub ratios: PeriodMap,
}
