// ==========================================
// Ministry Performance Tracking - Domain Layer
// ==========================================
// Responsibility: entities and value types shared by engine, client and
// API layers. No I/O, no business rules.
// ==========================================

pub mod hierarchy;
pub mod measurement;
pub mod types;

pub use hierarchy::{AssignmentTree, Goal, Kpi, Kra};
pub use measurement::{canonical_period_map, GroupedRow, MeasurementRecord, PeriodMap};
pub use types::{Role, RoleClass, Subject};
