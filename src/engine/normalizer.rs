// ==========================================
// Ministry Performance Tracking - Assignment Normalizer
// ==========================================
// Responsibility: decode either raw assignment shape into the canonical
// Goal -> KRA -> KPI tree.
// Rule: shape is decided by structured decode at the boundary, not by
// field sniffing. A JSON object must decode as the keyed hierarchy; a
// JSON array is an edge list; anything else is the one whole-call error.
// Rule: a malformed edge is dropped to the log, never failing the batch.
// ==========================================

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::hierarchy::{AssignmentTree, Goal, Kpi, Kra};

// ==========================================
// Errors
// ==========================================

/// The only failure a normalization call can raise: a top-level payload
/// decodable as neither accepted shape. Partial problems inside an edge
/// list are dropped, not raised.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("assignment payload is neither a keyed hierarchy nor an edge list: {0}")]
    UnrecognizedPayload(String),
}

// ==========================================
// Raw shapes
// ==========================================

// Shape (a): keyed hierarchy - goal id -> { description, kras: kra id ->
// { name, kpis: kpi id -> { name } } }. IndexMap keeps the payload's
// key order, which fixes the output order.
#[derive(Debug, Deserialize)]
struct KeyedGoalNode {
    description: String,
    #[serde(default)]
    kras: IndexMap<String, KeyedKraNode>,
}

#[derive(Debug, Deserialize)]
struct KeyedKraNode {
    name: String,
    #[serde(default)]
    kpis: IndexMap<String, KeyedKpiNode>,
}

#[derive(Debug, Deserialize)]
struct KeyedKpiNode {
    name: String,
}

// Shape (b): edge list - each element references a KPI and, through it,
// a KRA and a Goal. Every reference is optional at the decode level so
// that one bad edge never fails the list.
#[derive(Debug, Deserialize)]
struct EdgeRecord {
    kpi: Option<EdgeKpi>,
}

#[derive(Debug, Deserialize)]
struct EdgeKpi {
    id: Option<String>,
    name: Option<String>,
    kra: Option<EdgeKra>,
}

#[derive(Debug, Deserialize)]
struct EdgeKra {
    id: Option<String>,
    name: Option<String>,
    goal: Option<EdgeGoal>,
}

#[derive(Debug, Deserialize)]
struct EdgeGoal {
    id: Option<String>,
    description: Option<String>,
}

// ==========================================
// AssignmentNormalizer
// ==========================================

pub struct AssignmentNormalizer;

impl AssignmentNormalizer {
    /// Normalize a raw assignment payload into the canonical tree.
    ///
    /// # Parameters
    /// - payload: raw JSON, either a keyed hierarchy object or an edge
    ///   list array (no caller-supplied discriminator)
    ///
    /// # Returns
    /// - Ok(AssignmentTree): goals/KRAs/KPIs in first-seen payload order
    /// - Err(NormalizeError): top-level shape not recognized
    pub fn normalize(payload: &Value) -> Result<AssignmentTree, NormalizeError> {
        match payload {
            Value::Object(_) => {
                let keyed: IndexMap<String, KeyedGoalNode> =
                    serde_json::from_value(payload.clone())
                        .map_err(|e| NormalizeError::UnrecognizedPayload(e.to_string()))?;
                Ok(Self::from_keyed(keyed))
            }
            Value::Array(edges) => Ok(Self::from_edges(edges)),
            other => Err(NormalizeError::UnrecognizedPayload(format!(
                "expected object or array, got {}",
                json_type_name(other)
            ))),
        }
    }

    // ==========================================
    // Shape (a): keyed hierarchy
    // ==========================================
    fn from_keyed(keyed: IndexMap<String, KeyedGoalNode>) -> AssignmentTree {
        let goals = keyed
            .into_iter()
            .map(|(goal_id, goal_node)| {
                let kras = goal_node
                    .kras
                    .into_iter()
                    .map(|(kra_id, kra_node)| {
                        let kpis = kra_node
                            .kpis
                            .into_iter()
                            .map(|(kpi_id, kpi_node)| Kpi {
                                id: kpi_id,
                                name: kpi_node.name,
                                kra_id: kra_id.clone(),
                            })
                            .collect();
                        Kra {
                            id: kra_id,
                            name: kra_node.name,
                            goal_id: goal_id.clone(),
                            kpis,
                        }
                    })
                    .collect();
                Goal {
                    id: goal_id,
                    description: goal_node.description,
                    kras,
                }
            })
            .collect();

        let tree = AssignmentTree { goals };
        debug!(goals = tree.goals.len(), kpis = tree.kpi_count(), "keyed assignment payload normalized");
        tree
    }

    // ==========================================
    // Shape (b): edge list
    // ==========================================
    fn from_edges(edges: &[Value]) -> AssignmentTree {
        // Insertion-ordered accumulators keyed by id avoid duplicate
        // nodes while preserving first-seen order.
        let mut goals: IndexMap<String, GoalAccum> = IndexMap::new();
        let mut placed_kpis: HashSet<String> = HashSet::new();
        let mut dropped = 0usize;

        for (index, raw_edge) in edges.iter().enumerate() {
            let edge: EdgeRecord = match serde_json::from_value(raw_edge.clone()) {
                Ok(edge) => edge,
                Err(e) => {
                    warn!(index, error = %e, "assignment edge dropped: undecodable");
                    dropped += 1;
                    continue;
                }
            };

            let Some((kpi, kra, goal)) = resolve_edge_refs(edge) else {
                warn!(index, "assignment edge dropped: missing KPI/KRA/Goal reference");
                dropped += 1;
                continue;
            };

            // A KPI already placed stays where it first landed
            if !placed_kpis.insert(kpi.id.clone()) {
                warn!(index, kpi_id = %kpi.id, "assignment edge dropped: KPI already placed");
                dropped += 1;
                continue;
            }

            let goal_accum = goals.entry(goal.id.clone()).or_insert_with(|| GoalAccum {
                description: goal.description,
                kras: IndexMap::new(),
            });
            let kra_accum = goal_accum
                .kras
                .entry(kra.id.clone())
                .or_insert_with(|| KraAccum { name: kra.name, kpis: Vec::new() });
            kra_accum.kpis.push(Kpi {
                id: kpi.id,
                name: kpi.name,
                kra_id: kra.id,
            });
        }

        let tree = AssignmentTree {
            goals: goals
                .into_iter()
                .map(|(goal_id, accum)| Goal {
                    kras: accum
                        .kras
                        .into_iter()
                        .map(|(kra_id, kra)| Kra {
                            id: kra_id,
                            name: kra.name,
                            goal_id: goal_id.clone(),
                            kpis: kra.kpis,
                        })
                        .collect(),
                    id: goal_id,
                    description: accum.description,
                })
                .collect(),
        };

        debug!(
            edges = edges.len(),
            dropped,
            goals = tree.goals.len(),
            kpis = tree.kpi_count(),
            "edge-list assignment payload normalized"
        );
        tree
    }
}

struct GoalAccum {
    description: String,
    kras: IndexMap<String, KraAccum>,
}

struct KraAccum {
    name: String,
    kpis: Vec<Kpi>,
}

/// Resolved references of one edge; None when any link in the
/// KPI -> KRA -> Goal chain is missing its id.
struct ResolvedKpi {
    id: String,
    name: String,
}
struct ResolvedKra {
    id: String,
    name: String,
}
struct ResolvedGoal {
    id: String,
    description: String,
}

fn resolve_edge_refs(edge: EdgeRecord) -> Option<(ResolvedKpi, ResolvedKra, ResolvedGoal)> {
    let kpi = edge.kpi?;
    let kpi_id = kpi.id.filter(|s| !s.is_empty())?;
    let kra = kpi.kra?;
    let kra_id = kra.id.filter(|s| !s.is_empty())?;
    let goal = kra.goal?;
    let goal_id = goal.id.filter(|s| !s.is_empty())?;

    Some((
        ResolvedKpi {
            name: kpi.name.unwrap_or_else(|| kpi_id.clone()),
            id: kpi_id,
        },
        ResolvedKra {
            name: kra.name.unwrap_or_else(|| kra_id.clone()),
            id: kra_id,
        },
        ResolvedGoal {
            description: goal.description.unwrap_or_else(|| goal_id.clone()),
            id: goal_id,
        },
    ))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
