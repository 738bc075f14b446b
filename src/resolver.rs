//! Locates the billing export table inside the configured dataset.

use tracing::info;

use crate::bigquery::BigQuery;
use crate::constants::EXPORT_TABLE_PREFIX;
use crate::error::{BqCostError, Result};
use crate::types::TableReference;

/// Find the billing export table in `project.dataset` by its
/// `gcp_billing_export_v1_` name prefix.
///
/// # Errors
/// `DatasetNotFound` when the dataset does not exist, `ExportTableNotFound`
/// when it holds no export table yet.
pub async fn find_billing_export_table(
    client: &BigQuery,
    project: &str,
    dataset: &str,
) -> Result<TableReference> {
    let tables = client
        .list_tables(project, dataset)
        .await
        .map_err(|e| match e {
            BqCostError::NotFound(_) => BqCostError::DatasetNotFound {
                project: project.to_string(),
                dataset: dataset.to_string(),
            },
            other => other,
        })?;

    let table = tables
        .into_iter()
        .find(|id| id.starts_with(EXPORT_TABLE_PREFIX))
        .ok_or_else(|| BqCostError::ExportTableNotFound {
            project: project.to_string(),
            dataset: dataset.to_string(),
            prefix: EXPORT_TABLE_PREFIX,
        })?;

    info!(table = %table, "Resolved billing export table");
    Ok(TableReference::new(project, dataset, table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn table_list(ids: &[&str]) -> serde_json::Value {
        json!({
            "tables": ids.iter().map(|id| json!({
                "tableReference": {
                    "projectId": "my-proj",
                    "datasetId": "billing_export",
                    "tableId": id
                }
            })).collect::<Vec<_>>()
        })
    }

    async fn server_with_tables(ids: &[&str]) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/my-proj/datasets/billing_export/tables"))
            .respond_with(ResponseTemplate::new(200).set_body_json(table_list(ids)))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_resolves_export_table_among_others() {
        let server = server_with_tables(&["foo", "gcp_billing_export_v1_20230101"]).await;
        let client = BigQuery::with_base_url("t", server.uri()).unwrap();

        let table = find_billing_export_table(&client, "my-proj", "billing_export")
            .await
            .unwrap();
        assert_eq!(
            table,
            TableReference::new("my-proj", "billing_export", "gcp_billing_export_v1_20230101")
        );
    }

    #[tokio::test]
    async fn test_picks_first_matching_table() {
        let server = server_with_tables(&[
            "gcp_billing_export_v1_0000",
            "gcp_billing_export_v1_1111",
        ])
        .await;
        let client = BigQuery::with_base_url("t", server.uri()).unwrap();

        let table = find_billing_export_table(&client, "my-proj", "billing_export")
            .await
            .unwrap();
        assert_eq!(table.table, "gcp_billing_export_v1_0000");
    }

    #[tokio::test]
    async fn test_no_export_table() {
        let server = server_with_tables(&["foo", "bar"]).await;
        let client = BigQuery::with_base_url("t", server.uri()).unwrap();

        let err = find_billing_export_table(&client, "my-proj", "billing_export")
            .await
            .unwrap_err();
        assert!(matches!(err, BqCostError::ExportTableNotFound { .. }));
        assert!(err.to_string().contains("gcp_billing_export_v1_"));
        assert!(err.hint().is_some());
    }

    #[tokio::test]
    async fn test_empty_dataset() {
        let server = server_with_tables(&[]).await;
        let client = BigQuery::with_base_url("t", server.uri()).unwrap();

        let err = find_billing_export_table(&client, "my-proj", "billing_export")
            .await
            .unwrap_err();
        assert!(matches!(err, BqCostError::ExportTableNotFound { .. }));
    }

    #[tokio::test]
    async fn test_dataset_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;
        let client = BigQuery::with_base_url("t", server.uri()).unwrap();

        let err = find_billing_export_table(&client, "my-proj", "billing_export")
            .await
            .unwrap_err();
        assert!(matches!(err, BqCostError::DatasetNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "dataset 'my-proj.billing_export' not found"
        );
        assert!(err.hint().is_some());
    }
}
