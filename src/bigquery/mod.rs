//! Minimal BigQuery REST API client.
//!
//! Covers the two calls this tool needs: listing tables in a dataset and
//! running a synchronous query. Authentication is a bearer access token
//! supplied by the ambient environment (`gcloud auth print-access-token`).

pub mod models;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::{BqCostError, Result};
use models::{QueryRequest, QueryResponse, TableListResponse};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Server-side wait passed to `jobs.query`; must stay below the HTTP timeout.
const QUERY_WAIT_MS: u64 = 30_000;

const BIGQUERY_BASE_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// BigQuery API client.
#[derive(Clone)]
pub struct BigQuery {
    client: Client,
    access_token: String,
    base_url: String,
}

impl BigQuery {
    /// Create a client against the production endpoint.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(access_token, BIGQUERY_BASE_URL)
    }

    /// Create a client against a custom endpoint. Tests point this at a
    /// local mock server.
    pub fn with_base_url(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(BqCostError::Http)?;

        Ok(BigQuery {
            client,
            access_token: access_token.into(),
            base_url: base_url.into(),
        })
    }

    /// List the table ids of a dataset.
    ///
    /// # Errors
    /// `NotFound` when the dataset does not exist; `Auth`/`Api`/`Http` for
    /// other failures.
    pub async fn list_tables(&self, project: &str, dataset: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/projects/{}/datasets/{}/tables",
            self.base_url, project, dataset
        );

        let response: TableListResponse = self.get(&url).await?;
        Ok(response
            .tables
            .into_iter()
            .map(|t| t.table_reference.table_id)
            .collect())
    }

    /// Run a query, block until the server reports it complete, and follow
    /// result pages until the full row set has been received.
    ///
    /// # Errors
    /// `QueryIncomplete` if the job outlives the server-side wait;
    /// `UnexpectedResponse` if pages cannot be fetched or rows are missing;
    /// `Auth`/`Api`/`Http` for transport and server failures.
    pub async fn query(&self, project: &str, sql: &str) -> Result<QueryResponse> {
        let url = format!("{}/projects/{}/queries", self.base_url, project);
        let body = QueryRequest {
            query: sql.to_string(),
            use_legacy_sql: false,
            timeout_ms: QUERY_WAIT_MS,
        };

        let mut response: QueryResponse = self.post(&url, &body).await?;

        if response.job_complete != Some(true) {
            return Err(BqCostError::QueryIncomplete);
        }

        let mut rows = response.rows.take().unwrap_or_default();
        let mut page_token = response.page_token.take();

        while let Some(token) = page_token {
            let job_id = response
                .job_reference
                .as_ref()
                .map(|job| job.job_id.as_str())
                .ok_or_else(|| BqCostError::UnexpectedResponse {
                    context: "paginated response carries no job id".to_string(),
                })?;

            debug!(job_id = %job_id, "Fetching next result page");
            let page_url = format!(
                "{}/projects/{}/queries/{}?pageToken={}&timeoutMs={}",
                self.base_url, project, job_id, token, QUERY_WAIT_MS
            );
            let page: QueryResponse = self.get(&page_url).await?;
            rows.extend(page.rows.unwrap_or_default());
            page_token = page.page_token;
        }

        // totalRows counts the complete result set; receiving fewer rows
        // means pages were lost.
        if let Some(total) = response.total_rows.as_deref() {
            let expected =
                total
                    .parse::<usize>()
                    .map_err(|e| BqCostError::UnexpectedResponse {
                        context: format!("unparseable totalRows '{total}': {e}"),
                    })?;
            if expected != rows.len() {
                return Err(BqCostError::UnexpectedResponse {
                    context: format!("expected {expected} rows, received {}", rows.len()),
                });
            }
        }

        response.rows = Some(rows);
        Ok(response)
    }

    /// Make an authenticated GET request.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %url, "GET request");

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make an authenticated POST request.
    async fn post<T, B>(&self, url: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        debug!(url = %url, "POST request");

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| {
                warn!(error = %e, body = %text, "Failed to parse response");
                BqCostError::UnexpectedResponse {
                    context: e.to_string(),
                }
            })
        } else if status == StatusCode::NOT_FOUND {
            Err(BqCostError::NotFound(text))
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(BqCostError::Auth(text))
        } else {
            Err(BqCostError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}
