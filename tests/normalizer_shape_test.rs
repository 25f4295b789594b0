// ==========================================
// AssignmentNormalizer shape-invariance tests
// ==========================================
// Target: both raw payload shapes describing the same logical hierarchy
// must normalize to structurally identical trees.
// ==========================================

use serde_json::json;

use ministry_kpi_engine::engine::AssignmentNormalizer;
use ministry_kpi_engine::logging;

// ==========================================
// Shape invariance
// ==========================================

#[test]
fn test_edge_list_and_keyed_map_produce_identical_trees() {
    logging::init_test();

    let edge_payload = json!([
        {
            "kpi": {
                "id": "P1", "name": "Sites Connected",
                "kra": {
                    "id": "K1", "name": "Network Expansion",
                    "goal": { "id": "G1", "description": "Digital Infrastructure" }
                }
            }
        },
        {
            "kpi": {
                "id": "P2", "name": "Backbone Km",
                "kra": {
                    "id": "K1", "name": "Network Expansion",
                    "goal": { "id": "G1", "description": "Digital Infrastructure" }
                }
            }
        },
        {
            "kpi": {
                "id": "P3", "name": "Services Online",
                "kra": {
                    "id": "K2", "name": "Digitized Services",
                    "goal": { "id": "G2", "description": "Service Delivery" }
                }
            }
        }
    ]);

    let keyed_payload = json!({
        "G1": {
            "description": "Digital Infrastructure",
            "kras": {
                "K1": {
                    "name": "Network Expansion",
                    "kpis": {
                        "P1": { "name": "Sites Connected" },
                        "P2": { "name": "Backbone Km" }
                    }
                }
            }
        },
        "G2": {
            "description": "Service Delivery",
            "kras": {
                "K2": {
                    "name": "Digitized Services",
                    "kpis": { "P3": { "name": "Services Online" } }
                }
            }
        }
    });

    let from_edges = AssignmentNormalizer::normalize(&edge_payload).unwrap();
    let from_keyed = AssignmentNormalizer::normalize(&keyed_payload).unwrap();

    assert_eq!(from_edges, from_keyed);
    assert_eq!(from_edges.kpi_count(), 3);

    let goal_ids: Vec<&str> = from_edges.goals.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(goal_ids, vec!["G1", "G2"]);
}

// ==========================================
// Partial-data tolerance
// ==========================================

#[test]
fn test_partially_malformed_edge_list_still_normalizes() {
    logging::init_test();

    let payload = json!([
        { "kpi": { "id": "P1", "name": "No KRA at all" } },
        42,
        {
            "kpi": {
                "id": "P2", "name": "Sites Connected",
                "kra": {
                    "id": "K1", "name": "Network Expansion",
                    "goal": { "id": "G1", "description": "Digital Infrastructure" }
                }
            }
        }
    ]);

    let tree = AssignmentNormalizer::normalize(&payload).unwrap();
    assert_eq!(tree.kpi_count(), 1);
    assert_eq!(tree.goals.len(), 1);
}
