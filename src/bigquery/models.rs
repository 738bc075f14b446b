//! Request and response bodies for the BigQuery REST API (v2).
//!
//! Scalar cell values arrive as JSON strings (or null); numbers are parsed
//! by the caller.

use serde::{Deserialize, Serialize};

/// Body for `POST /projects/{project}/queries` (`jobs.query`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub query: String,
    pub use_legacy_sql: bool,
    /// How long the server holds the request open waiting for the job.
    pub timeout_ms: u64,
}

// https://cloud.google.com/bigquery/docs/reference/rest/v2/jobs/query
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub job_complete: Option<bool>,
    #[serde(default)]
    pub job_reference: Option<JobReference>,
    /// Row count of the complete result set, serialized as a string by the
    /// API. May exceed `rows.len()` when the result is paginated.
    #[serde(default)]
    pub total_rows: Option<String>,
    /// Present when further result pages must be fetched via
    /// `jobs.getQueryResults`.
    #[serde(default)]
    pub page_token: Option<String>,
    #[serde(default)]
    pub rows: Option<Vec<TableRow>>,
}

/// Id of the job created for a query; needed to fetch later result pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
    pub project_id: String,
    pub job_id: String,
}

/// One result row: a list of cells in select-list order.
#[derive(Debug, Clone, Deserialize)]
pub struct TableRow {
    pub f: Vec<TableCell>,
}

/// One cell; `v` is null for SQL NULL.
#[derive(Debug, Clone, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub v: Option<String>,
}

// https://cloud.google.com/bigquery/docs/reference/rest/v2/tables/list
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableListResponse {
    #[serde(default)]
    pub tables: Vec<TableListItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableListItem {
    pub table_reference: TableListReference,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableListReference {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}
