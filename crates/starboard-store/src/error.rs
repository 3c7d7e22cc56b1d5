use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport failure talking to the hosted store.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A write asked for the stored representation but got no rows back.
    #[error("Store returned no record")]
    EmptyResponse,

    /// The targeted record does not exist.
    #[error("Record not found")]
    NotFound,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
