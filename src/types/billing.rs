use crate::constants::NO_PROJECT_LABEL;

/// One aggregated result row: total spend for a (project, currency) pair
/// over the queried month.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingRow {
    /// Absent for charges not attributed to a project (taxes, adjustments).
    pub project_id: Option<String>,
    pub total_cost: f64,
    pub currency: String,
}

impl BillingRow {
    /// The project id as shown in the report.
    pub fn project_label(&self) -> &str {
        self.project_id.as_deref().unwrap_or(NO_PROJECT_LABEL)
    }
}
