use std::fmt;

/// Fully qualified id of the resolved billing export table. Resolved once
/// per invocation and used verbatim in the query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReference {
    pub project: String,
    pub dataset: String,
    pub table: String,
}

impl TableReference {
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        TableReference {
            project: project.into(),
            dataset: dataset.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project, self.dataset, self.table)
    }
}
