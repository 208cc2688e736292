//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by `ScoreStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScoreStoreError {
    #[error("score store must be created inside a Tokio runtime")]
    NoRuntime,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    ScoreStore(#[from] ScoreStoreError),
}
