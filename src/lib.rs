// Module declarations
pub mod bigquery;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod report;
pub mod resolver;
pub mod types;

// Re-export commonly used items
pub use config::{Cli, Config};
pub use error::{BqCostError, Result};
pub use types::{BillingRow, DateRange, MonthSelector, TableReference};

use bigquery::BigQuery;
use chrono::Utc;

/// Run one report against the production BigQuery endpoint: resolve the
/// export table, compute the month range, query, print.
pub async fn run(config: &Config) -> Result<()> {
    let client = BigQuery::new(config.access_token.as_str())?;
    run_with_client(&client, config).await
}

/// Same as [`run`] with an injected client, so tests can point the whole
/// pipeline at a mock server.
pub async fn run_with_client(client: &BigQuery, config: &Config) -> Result<()> {
    let table =
        resolver::find_billing_export_table(client, &config.project, &config.dataset).await?;
    let today = Utc::now().date_naive();
    let range = DateRange::for_month(config.month, today);
    report::print_monthly_costs(client, &table, &range, config.month).await
}
