// ==========================================
// Ministry Performance Tracking - Engine Layer
// ==========================================
// Responsibility: the aggregation pipeline stages - normalize, resolve
// periods, fetch, merge, aggregate, compute ratios.
// Rule: engines hold no persistent state; one invocation is one pass.
// ==========================================

pub mod aggregator;
pub mod fetcher;
pub mod merger;
pub mod normalizer;
pub mod period;
pub mod ratio;

pub use aggregator::{group_key, AggregationReport, HierarchyAggregator, GROUP_KEY_SEPARATOR};
pub use fetcher::MeasurementFetcher;
pub use merger::RecordMerger;
pub use normalizer::{AssignmentNormalizer, NormalizeError};
pub use period::{
    fiscal_year_for, parse_period_key, resolve, resolve_number, FiscalYearWindow, PeriodKey,
    RawPeriodKey,
};
pub use ratio::{as_number, ratio_percent, ratio_percent_f64, RatioValue};
