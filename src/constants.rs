/// Billing export tables are created by GCP with this name prefix;
/// the suffix is the billing account id.
pub const EXPORT_TABLE_PREFIX: &str = "gcp_billing_export_v1_";

/// Dataset queried when neither the flag nor the environment names one.
pub const DEFAULT_DATASET: &str = "billing_export";

/// Label shown for charges that carry no project id (taxes, adjustments).
pub const NO_PROJECT_LABEL: &str = "N/A";
