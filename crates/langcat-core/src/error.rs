//! Unified Error Model
use thiserror::Error;

/// Failures raised by a catalog store implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("STORE/UNAVAILABLE: {0}")]
    Unavailable(String),

    #[error("STORE/LOAD: {0}")]
    Load(String),
}

/// Failures surfaced by the query engine.
///
/// Zero matches is not an error; it resolves to an empty list or `Absent`.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("QUERY/CANCELLED: {0}")]
    Cancelled(String),
}
