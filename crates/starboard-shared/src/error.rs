use thiserror::Error;

/// Errors produced when parsing user-facing filter values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown sort key: {0}")]
    SortKey(String),

    #[error("Unknown sort order: {0}")]
    SortOrder(String),
}
