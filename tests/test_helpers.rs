// ==========================================
// Shared test helpers - mock boundary implementations
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use ministry_kpi_engine::client::error::{ClientError, ClientResult};
use ministry_kpi_engine::client::measurement_client::{
    MeasurementClient, MeasurementQuery, RawMeasurementRow, UserDirectory,
};
use ministry_kpi_engine::domain::types::Subject;

// ==========================================
// Subjects
// ==========================================

pub fn subject(id: &str, role: &str, sector: Option<&str>, subsector: Option<&str>) -> Subject {
    Subject::new(
        id,
        role,
        sector.map(str::to_string),
        subsector.map(str::to_string),
    )
}

// ==========================================
// Mock user directory
// ==========================================

pub struct MockDirectory {
    pub users: Vec<Subject>,
}

impl MockDirectory {
    pub fn new(users: Vec<Subject>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserDirectory for MockDirectory {
    async fn list_users(&self) -> ClientResult<Vec<Subject>> {
        Ok(self.users.clone())
    }
}

// ==========================================
// Mock measurement client
// ==========================================
// Canned rows per (subject id, fiscal year); optional failure pairs.
// Every issued query is recorded for assertion.

pub struct MockClient {
    pub responses: HashMap<(String, i32), Vec<RawMeasurementRow>>,
    pub failing: Vec<(String, i32)>,
    pub recorded: Mutex<Vec<MeasurementQuery>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            failing: Vec::new(),
            recorded: Mutex::new(Vec::new()),
        }
    }

    pub fn with_rows(mut self, subject_id: &str, fiscal_year: i32, rows: Vec<RawMeasurementRow>) -> Self {
        self.responses.insert((subject_id.to_string(), fiscal_year), rows);
        self
    }

    pub fn with_failure(mut self, subject_id: &str, fiscal_year: i32) -> Self {
        self.failing.push((subject_id.to_string(), fiscal_year));
        self
    }

    pub fn recorded_queries(&self) -> Vec<MeasurementQuery> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl MeasurementClient for MockClient {
    async fn fetch_measurements(
        &self,
        query: &MeasurementQuery,
    ) -> ClientResult<Vec<RawMeasurementRow>> {
        self.recorded.lock().unwrap().push(query.clone());
        let pair = (query.subject_id.clone(), query.fiscal_year);
        if self.failing.contains(&pair) {
            return Err(ClientError::Transport("injected failure".to_string()));
        }
        Ok(self.responses.get(&pair).cloned().unwrap_or_default())
    }
}

// ==========================================
// Row and payload builders
// ==========================================

pub fn period_map(entries: &[(&str, Value)]) -> IndexMap<String, Value> {
    let mut map = IndexMap::new();
    for (key, value) in entries {
        map.insert(key.to_string(), value.clone());
    }
    map
}

pub fn measurement_row(
    kpi_id: &str,
    kpi_name: &str,
    goal: &str,
    kra: &str,
    targets: &[(&str, Value)],
    performance: &[(&str, Value)],
) -> RawMeasurementRow {
    RawMeasurementRow {
        kpi_id: Some(kpi_id.to_string()),
        kpi_name: Some(kpi_name.to_string()),
        goal: Some(goal.to_string()),
        kra: Some(kra.to_string()),
        targets: period_map(targets),
        performance: period_map(performance),
        ratios: IndexMap::new(),
    }
}

/// Edge-list assignment payload with a single Goal/KRA/KPI chain
pub fn single_kpi_edge_payload(
    goal: (&str, &str),
    kra: (&str, &str),
    kpi: (&str, &str),
) -> Value {
    json!([
        {
            "kpi": {
                "id": kpi.0,
                "name": kpi.1,
                "kra": {
                    "id": kra.0,
                    "name": kra.1,
                    "goal": { "id": goal.0, "description": goal.1 }
                }
            }
        }
    ])
}
