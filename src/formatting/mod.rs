//! Plain-text rendering of the cost report.

use std::fmt::Write;

use crate::types::{BillingRow, DateRange, MonthSelector};

/// Printed instead of a table when the query returns zero rows.
pub const NO_DATA_MESSAGE: &str = "No billing data found for the specified period.";

const PROJECT_WIDTH: usize = 40;
const COST_WIDTH: usize = 15;

/// Title line stating what period the report covers.
pub fn render_title(selector: MonthSelector, range: &DateRange) -> String {
    format!(
        "--- Running query for {} month ({} to {}) ---",
        selector, range.start, range.end
    )
}

/// Header, dash rule, and one line per row, cost-descending as queried.
pub fn render_table(rows: &[BillingRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<PROJECT_WIDTH$} | {:<COST_WIDTH$} | {}",
        "Project ID", "Total Cost", "Currency"
    );
    let _ = writeln!(out, "{}", "-".repeat(65));
    for row in rows {
        let _ = writeln!(
            out,
            "{:<PROJECT_WIDTH$} | {:>COST_WIDTH$.2} | {}",
            row.project_label(),
            row.total_cost,
            row.currency
        );
    }
    out
}
