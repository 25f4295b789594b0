// ==========================================
// Ministry Performance Tracking - HTTP Measurement Client
// ==========================================
// Responsibility: reqwest-backed implementation of the measurement
// query and user directory interfaces.
// Rule: transport concerns (timeout, auth header, status mapping) stop
// here; the engine above sees only ClientResult values.
// ==========================================

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::client::error::{ClientError, ClientResult};
use crate::client::measurement_client::{
    MeasurementClient, MeasurementQuery, RawMeasurementRow, UserDirectory,
};
use crate::config::ClientConfig;
use crate::domain::types::{Role, Subject};

// ==========================================
// HttpMeasurementClient
// ==========================================
pub struct HttpMeasurementClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpMeasurementClient {
    /// Build a client from configuration.
    ///
    /// # Parameters
    /// - config: base URL, timeout, optional bearer token
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Build a client from the environment (KPI_API_* variables)
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url_trimmed(), path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: Option<&MeasurementQuery>,
    ) -> ClientResult<T> {
        let mut request = self.http.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::ErrorStatus { status: status.as_u16(), body });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MeasurementClient for HttpMeasurementClient {
    #[instrument(skip(self), fields(subject = %query.subject_id, fiscal_year = query.fiscal_year))]
    async fn fetch_measurements(
        &self,
        query: &MeasurementQuery,
    ) -> ClientResult<Vec<RawMeasurementRow>> {
        let url = self.endpoint("measurements");
        let rows: Vec<RawMeasurementRow> = self.get_json(&url, Some(query)).await?;
        debug!(rows = rows.len(), "measurement call completed");
        Ok(rows)
    }
}

// ==========================================
// User directory over the same backend
// ==========================================

/// Wire shape of one directory entry; the role label is normalized at
/// this boundary so nothing downstream sees raw casing/spacing.
#[derive(Debug, Deserialize)]
struct UserEntry {
    id: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    sector_id: Option<String>,
    #[serde(default)]
    subsector_id: Option<String>,
}

#[async_trait]
impl UserDirectory for HttpMeasurementClient {
    #[instrument(skip(self))]
    async fn list_users(&self) -> ClientResult<Vec<Subject>> {
        let url = self.endpoint("users");
        let entries: Vec<UserEntry> = self.get_json(&url, None).await?;
        debug!(users = entries.len(), "user directory fetched");
        Ok(entries
            .into_iter()
            .map(|entry| Subject {
                id: entry.id,
                role: Role::normalize(&entry.role),
                sector_id: entry.sector_id,
                subsector_id: entry.subsector_id,
            })
            .collect())
    }
}
