use thiserror::Error;

#[derive(Error, Debug)]
pub enum BqCostError {
    // Configuration errors
    #[error("missing configuration: {what} ({hint})")]
    MissingConfig {
        what: &'static str,
        hint: &'static str,
    },

    #[error("invalid month '{0}'. Use 'current' or 'last'")]
    InvalidMonth(String),

    // Resolution errors
    #[error("dataset '{project}.{dataset}' not found")]
    DatasetNotFound { project: String, dataset: String },

    #[error("no billing export table ({prefix}*) found in dataset '{project}.{dataset}'")]
    ExportTableNotFound {
        project: String,
        dataset: String,
        prefix: &'static str,
    },

    // BigQuery API errors
    #[error("request to BigQuery failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("not authorized to access BigQuery: {0}")]
    Auth(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("BigQuery API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("query did not complete within the server-side wait")]
    QueryIncomplete,

    #[error("unexpected BigQuery response: {context}")]
    UnexpectedResponse { context: String },
}

impl BqCostError {
    /// Extra console line printed after the main message for failures the
    /// user can act on.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            BqCostError::DatasetNotFound { .. } => {
                Some("Make sure billing export to BigQuery is configured for this project.")
            }
            BqCostError::ExportTableNotFound { .. } => Some(
                "It may take some time for the table to be created after setting up the export.",
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BqCostError>;
