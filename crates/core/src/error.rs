use thiserror::Error;

/// Dashboard error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DashboardError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Duplicate identifier {id} in collection {collection}")]
    DuplicateIdentifier { collection: String, id: String },

    #[error("Selection unavailable: {0}")]
    SelectionUnavailable(String),

    #[error("Store error: {0}")]
    Store(String),
}
