use std::sync::Arc;

use storage::repository::{KeyValueRepository, Storage};
use storage::snapshot::ScoreSnapshotStore;

use crate::Clock;
use crate::error::AppServicesError;
use crate::score::{ScoreConfig, ScoreStore};

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    scores: ScoreStore,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// If the database cannot be opened or migrated, the session still starts
    /// from an empty board and every flush fails quietly.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if no Tokio runtime is available.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: ScoreConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = match Storage::sqlite(db_url).await {
            Ok(storage) => storage,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "score database unavailable; scores will not be saved this session"
                );
                Storage::unavailable(err.to_string())
            }
        };
        Self::from_storage(&storage, clock, config).await
    }

    /// Build services over a fresh in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if no Tokio runtime is available.
    pub async fn in_memory(clock: Clock, config: ScoreConfig) -> Result<Self, AppServicesError> {
        Self::from_storage(&Storage::in_memory(), clock, config).await
    }

    /// Build services over an existing storage aggregate.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if no Tokio runtime is available.
    pub async fn from_storage(
        storage: &Storage,
        clock: Clock,
        config: ScoreConfig,
    ) -> Result<Self, AppServicesError> {
        let kv: Arc<dyn KeyValueRepository> = Arc::clone(&storage.kv);
        let scores = ScoreStore::open(ScoreSnapshotStore::new(kv), config, clock).await?;
        Ok(Self { scores })
    }

    #[must_use]
    pub fn scores(&self) -> ScoreStore {
        self.scores.clone()
    }
}
