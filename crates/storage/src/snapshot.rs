//! Durable representation of the score board.
//!
//! Two independent entries live in the key-value namespace:
//! `globalScore` holds a JSON integer and `topicScores` a JSON object of
//! topic id to integer. Each entry is decoded on its own, so a damaged
//! `topicScores` never discards a readable `globalScore`.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tutor_core::model::{ScoreBoard, TopicId};

use crate::repository::{KeyValueRepository, StorageError};

pub const GLOBAL_SCORE_KEY: &str = "globalScore";
pub const TOPIC_SCORES_KEY: &str = "topicScores";

/// How one persisted entry was recovered during load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Restored,
    Missing,
    Corrupt,
    Unavailable,
}

impl EntryStatus {
    /// True when the default value was substituted.
    #[must_use]
    pub fn is_fallback(self) -> bool {
        !matches!(self, EntryStatus::Restored)
    }
}

/// Result of reading the snapshot, with per-entry recovery status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotLoad {
    pub board: ScoreBoard,
    pub global: EntryStatus,
    pub topics: EntryStatus,
}

/// Reads and writes the score snapshot through a `KeyValueRepository`.
#[derive(Clone)]
pub struct ScoreSnapshotStore {
    kv: Arc<dyn KeyValueRepository>,
}

impl ScoreSnapshotStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueRepository>) -> Self {
        Self { kv }
    }

    /// Load the persisted board, substituting defaults per entry.
    ///
    /// Never fails: unavailable storage and corrupt values fall back to
    /// `0` / an empty map for the affected entry only.
    pub async fn load(&self) -> SnapshotLoad {
        let (global, global_status) = self.read_entry::<u64>(GLOBAL_SCORE_KEY).await;
        let (topics, topics_status) = self
            .read_entry::<BTreeMap<TopicId, u64>>(TOPIC_SCORES_KEY)
            .await;

        SnapshotLoad {
            board: ScoreBoard::from_persisted(global, topics),
            global: global_status,
            topics: topics_status,
        }
    }

    /// Write both entries for `board`.
    ///
    /// Each entry is attempted even if the other fails.
    ///
    /// # Errors
    ///
    /// Returns the first `StorageError` encountered.
    pub async fn save(&self, board: &ScoreBoard) -> Result<(), StorageError> {
        let global = encode_global(board)?;
        let topics = encode_topics(board)?;

        let global_result = self.kv.put(GLOBAL_SCORE_KEY, &global).await;
        let topics_result = self.kv.put(TOPIC_SCORES_KEY, &topics).await;
        global_result.and(topics_result)
    }

    async fn read_entry<T>(&self, key: &str) -> (T, EntryStatus)
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.kv.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return (T::default(), EntryStatus::Missing),
            Err(err) => {
                tracing::warn!(key, error = %err, "score storage unavailable, using default");
                return (T::default(), EntryStatus::Unavailable);
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => (value, EntryStatus::Restored),
            Err(err) => {
                tracing::warn!(key, error = %err, "corrupt score entry, using default");
                (T::default(), EntryStatus::Corrupt)
            }
        }
    }
}

fn encode_global(board: &ScoreBoard) -> Result<String, StorageError> {
    serde_json::to_string(&board.global()).map_err(|e| StorageError::Serialization(e.to_string()))
}

fn encode_topics(board: &ScoreBoard) -> Result<String, StorageError> {
    serde_json::to_string(board.topics()).map_err(|e| StorageError::Serialization(e.to_string()))
}
