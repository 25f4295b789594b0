// ==========================================
// Ministry Performance Tracking - Goal/KRA/KPI Hierarchy
// ==========================================
// Responsibility: canonical assignment tree entities
// Rule: parentage is a strict tree - a KPI belongs to exactly one KRA,
//       a KRA to exactly one Goal
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Goal - top-level strategic objective
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub description: String,
    /// Key result areas under this goal, in first-seen order
    pub kras: Vec<Kra>,
}

// ==========================================
// KRA - key result area under a goal
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kra {
    pub id: String,
    pub name: String,
    pub goal_id: String,
    /// Indicators under this KRA, in first-seen order
    pub kpis: Vec<Kpi>,
}

// ==========================================
// KPI - measurable indicator under a KRA
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub id: String,
    pub name: String,
    pub kra_id: String,
}

// ==========================================
// AssignmentTree - canonical normalizer output
// ==========================================
/// The canonical Goal -> KRA -> KPI tree produced by assignment
/// normalization. Read-only for the rest of the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentTree {
    pub goals: Vec<Goal>,
}

impl AssignmentTree {
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Total number of KPI leaves
    pub fn kpi_count(&self) -> usize {
        self.goals
            .iter()
            .flat_map(|g| g.kras.iter())
            .map(|k| k.kpis.len())
            .sum()
    }

    /// Depth-first walk over (goal, kra, kpi) triples in tree order
    pub fn iter_kpis(&self) -> impl Iterator<Item = (&Goal, &Kra, &Kpi)> {
        self.goals.iter().flat_map(|goal| {
            goal.kras.iter().flat_map(move |kra| {
                kra.kpis.iter().map(move |kpi| (goal, kra, kpi))
            })
        })
    }
}
