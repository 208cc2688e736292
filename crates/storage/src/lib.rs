#![forbid(unsafe_code)]

pub mod repository;
pub mod snapshot;
pub mod sqlite;

pub use repository::{
    InMemoryRepository, KeyValueRepository, Storage, StorageError, UnavailableRepository,
};
pub use snapshot::{EntryStatus, ScoreSnapshotStore, SnapshotLoad};
