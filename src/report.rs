//! Builds and runs the monthly aggregation query and prints the report.

use tracing::info;

use crate::bigquery::BigQuery;
use crate::bigquery::models::{QueryResponse, TableRow};
use crate::error::{BqCostError, Result};
use crate::formatting::{NO_DATA_MESSAGE, render_table, render_title};
use crate::types::{BillingRow, DateRange, MonthSelector, TableReference};

/// SQL summing cost per (project, currency) over the half-open range,
/// skipping zero/credit lines, ranked by spend.
pub fn monthly_cost_query(table: &TableReference, range: &DateRange) -> String {
    format!(
        "SELECT project.id AS project_id, SUM(cost) AS total_cost, currency \
         FROM `{table}` \
         WHERE usage_start_time >= TIMESTAMP('{start}') \
         AND usage_start_time < TIMESTAMP('{end}') \
         AND cost > 0 \
         GROUP BY project_id, currency \
         ORDER BY total_cost DESC",
        table = table,
        start = range.start,
        end = range.end,
    )
}

/// Run the report for an already-resolved table and range, printing the
/// ranked table (or the no-data message) to stdout.
pub async fn print_monthly_costs(
    client: &BigQuery,
    table: &TableReference,
    range: &DateRange,
    selector: MonthSelector,
) -> Result<()> {
    let sql = monthly_cost_query(table, range);
    println!("{}", render_title(selector, range));

    info!(table = %table, range = %range, "Executing aggregation query");
    let response = client.query(&table.project, &sql).await?;
    let rows = billing_rows(response)?;

    if rows.is_empty() {
        println!("{NO_DATA_MESSAGE}");
        return Ok(());
    }

    print!("{}", render_table(&rows));
    Ok(())
}

/// Convert the raw query response into billing rows.
fn billing_rows(response: QueryResponse) -> Result<Vec<BillingRow>> {
    response
        .rows
        .unwrap_or_default()
        .into_iter()
        .map(billing_row)
        .collect()
}

fn billing_row(row: TableRow) -> Result<BillingRow> {
    // Cells come back in select-list order: project_id, total_cost, currency.
    let [project, cost, currency] = <[_; 3]>::try_from(row.f).map_err(|cells| {
        BqCostError::UnexpectedResponse {
            context: format!("expected 3 cells per row, got {}", cells.len()),
        }
    })?;

    let cost_text = cost.v.ok_or_else(|| BqCostError::UnexpectedResponse {
        context: "null total_cost cell".to_string(),
    })?;
    let total_cost = cost_text
        .parse::<f64>()
        .map_err(|e| BqCostError::UnexpectedResponse {
            context: format!("unparseable total_cost '{cost_text}': {e}"),
        })?;

    let currency = currency.v.ok_or_else(|| BqCostError::UnexpectedResponse {
        context: "null currency cell".to_string(),
    })?;

    Ok(BillingRow {
        project_id: project.v,
        total_cost,
        currency,
    })
}
