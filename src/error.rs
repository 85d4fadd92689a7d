use std::path::PathBuf;

/// Failure while turning a dataset into a query batch.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("dataset is empty, cannot derive miss queries from its maximum")]
    EmptyDataset,

    #[error("miss queries above maximum {max} overflow i64")]
    MissOverflow { max: i64 },
}

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("cannot read {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no column named `{column}`", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{} row {row}: `{value}` is not an integer identifier", path.display())]
    InvalidId {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("dataset `{label}`: {source}")]
    Queries {
        label: String,
        #[source]
        source: QueryError,
    },

    #[error("{0}")]
    Timing(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot write {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BenchError {
    /// The stage of the run that failed, for the top-level diagnostic.
    pub fn stage(&self) -> &'static str {
        match self {
            BenchError::Load { .. }
            | BenchError::MissingColumn { .. }
            | BenchError::InvalidId { .. } => "load",
            BenchError::Queries { .. } => "query construction",
            BenchError::Timing(_) => "timing",
            BenchError::Config(_) => "config",
            BenchError::Save { .. } | BenchError::Json(_) => "output",
        }
    }
}
