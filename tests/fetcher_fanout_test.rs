// ==========================================
// MeasurementFetcher fan-out tests
// ==========================================
// Target: role-dependent fan-out, subject-scoped queries, failure
// degradation, deterministic plan order.
// ==========================================

mod test_helpers;

use serde_json::json;
use std::sync::Arc;

use ministry_kpi_engine::engine::{FiscalYearWindow, MeasurementFetcher};
use ministry_kpi_engine::logging;

use test_helpers::{measurement_row, subject, MockClient, MockDirectory};

fn sector_directory() -> MockDirectory {
    MockDirectory::new(vec![
        subject("W1", "network engineer", Some("S1"), Some("SS1")),
        subject("W2", "field officer", Some("S1"), Some("SS2")),
        subject("W3", "field officer", Some("S2"), None),
        subject("C1", "chief ceo", Some("S1"), None),
    ])
}

// ==========================================
// Chief fan-out: sector staff only, subject-scoped
// ==========================================

#[tokio::test]
async fn test_chief_fans_out_to_sector_staff_with_their_own_scope() {
    logging::init_test();

    let requester = subject("C1", "chief ceo", Some("S1"), None);
    let client = Arc::new(MockClient::new());
    let fetcher = MeasurementFetcher::new(client.clone(), Arc::new(sector_directory()));

    let window = FiscalYearWindow::new(2016);
    fetcher.fetch_all(&requester, &window).await.unwrap();

    let queries = client.recorded_queries();
    // 2 sector-S1 staff x 2 fiscal years
    assert_eq!(queries.len(), 4);

    // plan order: subject, then year (current first)
    let plan: Vec<(String, i32)> = queries
        .iter()
        .map(|q| (q.subject_id.clone(), q.fiscal_year))
        .collect();
    assert_eq!(
        plan,
        vec![
            ("W1".to_string(), 2016),
            ("W1".to_string(), 2015),
            ("W2".to_string(), 2016),
            ("W2".to_string(), 2015),
        ]
    );

    // each query carries the SUBJECT's own scope, not the requester's
    let w2_query = queries.iter().find(|q| q.subject_id == "W2").unwrap();
    assert_eq!(w2_query.subsector_id.as_deref(), Some("SS2"));
    assert_eq!(w2_query.sector_id.as_deref(), Some("S1"));

    // role labels are canonical
    assert!(queries.iter().all(|q| q.role_label == "Network Engineer" || q.role_label == "Field Officer"));
}

// ==========================================
// Strategic fan-out: every known user
// ==========================================

#[tokio::test]
async fn test_strategic_fans_out_to_every_user() {
    logging::init_test();

    let requester = subject("B1", "strategic affairs lead", None, None);
    let client = Arc::new(MockClient::new());
    let fetcher = MeasurementFetcher::new(client.clone(), Arc::new(sector_directory()));

    let window = FiscalYearWindow::new(2016);
    fetcher.fetch_all(&requester, &window).await.unwrap();

    // 4 directory users x 2 fiscal years
    assert_eq!(client.recorded_queries().len(), 8);
}

// ==========================================
// Staff: self only
// ==========================================

#[tokio::test]
async fn test_staff_queries_only_itself() {
    logging::init_test();

    let requester = subject("W1", "network engineer", Some("S1"), Some("SS1"));
    let client = Arc::new(MockClient::new());
    let fetcher = MeasurementFetcher::new(client.clone(), Arc::new(sector_directory()));

    let window = FiscalYearWindow::new(2016);
    fetcher.fetch_all(&requester, &window).await.unwrap();

    let queries = client.recorded_queries();
    assert_eq!(queries.len(), 2);
    assert!(queries.iter().all(|q| q.subject_id == "W1"));
}

// ==========================================
// Failure degradation inside a fan-out batch
// ==========================================

#[tokio::test]
async fn test_one_failed_subject_call_does_not_abort_batch() {
    logging::init_test();

    let requester = subject("C1", "chief ceo", Some("S1"), None);
    let client = Arc::new(
        MockClient::new()
            .with_failure("W1", 2016)
            .with_rows(
                "W2",
                2016,
                vec![measurement_row(
                    "P1",
                    "Sites Connected",
                    "Digital Infrastructure",
                    "Network Expansion",
                    &[("year-2016", json!(10))],
                    &[],
                )],
            ),
    );
    let fetcher = MeasurementFetcher::new(client.clone(), Arc::new(sector_directory()));

    let window = FiscalYearWindow::new(2016);
    let records = fetcher.fetch_all(&requester, &window).await.unwrap();

    // all four calls were still issued; only W2's one row came back
    assert_eq!(client.recorded_queries().len(), 4);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kpi_id.as_deref(), Some("P1"));
}
