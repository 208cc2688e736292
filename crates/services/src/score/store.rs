use std::collections::BTreeMap;
use std::sync::Arc;

use storage::snapshot::ScoreSnapshotStore;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tutor_core::Clock;
use tutor_core::model::{Points, ScoreBoard, TopicId};

use super::config::ScoreConfig;
use super::flusher::{FlushReport, FlushScheduler, FlushState};
use crate::error::ScoreStoreError;

/// Session-scoped score totals shared by every practice widget.
///
/// Cheap to clone; all clones see the same board. Mutations are applied and
/// broadcast to subscribers before the call returns, and each one schedules a
/// debounced write of the snapshot. Reads never wait on storage.
#[derive(Clone)]
pub struct ScoreStore {
    inner: Arc<Inner>,
}

struct Inner {
    board: watch::Sender<ScoreBoard>,
    flusher: FlushScheduler,
}

impl ScoreStore {
    /// Load the persisted snapshot and start a store bound to the current runtime.
    ///
    /// Missing or corrupt entries fall back to their defaults individually.
    ///
    /// # Errors
    ///
    /// Returns `ScoreStoreError::NoRuntime` if polled outside a Tokio runtime.
    pub async fn open(
        snapshots: ScoreSnapshotStore,
        config: ScoreConfig,
        clock: Clock,
    ) -> Result<Self, ScoreStoreError> {
        let runtime = Handle::try_current().map_err(|_| ScoreStoreError::NoRuntime)?;
        let load = snapshots.load().await;
        if load.global.is_fallback() || load.topics.is_fallback() {
            tracing::info!(
                global = ?load.global,
                topics = ?load.topics,
                "score snapshot partially restored"
            );
        }
        tracing::info!(
            global = load.board.global(),
            topics = load.board.topics().len(),
            "score store opened"
        );
        Ok(Self::build(load.board, snapshots, config, clock, runtime))
    }

    /// Start a store from an in-memory board without reading storage.
    ///
    /// # Errors
    ///
    /// Returns `ScoreStoreError::NoRuntime` when called outside a Tokio runtime.
    pub fn with_board(
        board: ScoreBoard,
        snapshots: ScoreSnapshotStore,
        config: ScoreConfig,
        clock: Clock,
    ) -> Result<Self, ScoreStoreError> {
        let runtime = Handle::try_current().map_err(|_| ScoreStoreError::NoRuntime)?;
        Ok(Self::build(board, snapshots, config, clock, runtime))
    }

    fn build(
        board: ScoreBoard,
        snapshots: ScoreSnapshotStore,
        config: ScoreConfig,
        clock: Clock,
        runtime: Handle,
    ) -> Self {
        let (sender, receiver) = watch::channel(board);
        let flusher = FlushScheduler::new(runtime, config.flush_delay, clock, snapshots, receiver);
        Self {
            inner: Arc::new(Inner {
                board: sender,
                flusher,
            }),
        }
    }

    /// Award `amount` points, optionally credited to `topic` as well.
    pub fn add_points(&self, amount: Points, topic: Option<&TopicId>) {
        self.inner
            .board
            .send_if_modified(|board| board.add_points(amount, topic));
        self.inner.flusher.schedule();
    }

    /// Zero one topic's subtotal. The global total keeps points already earned.
    pub fn reset_topic(&self, topic: &TopicId) {
        self.inner
            .board
            .send_if_modified(|board| board.reset_topic(topic));
        self.inner.flusher.schedule();
    }

    /// Zero the global total and forget every topic.
    pub fn reset_all(&self) {
        self.inner.board.send_if_modified(ScoreBoard::reset_all);
        self.inner.flusher.schedule();
    }

    #[must_use]
    pub fn global(&self) -> u64 {
        self.inner.board.borrow().global()
    }

    #[must_use]
    pub fn topics(&self) -> BTreeMap<TopicId, u64> {
        self.inner.board.borrow().topics().clone()
    }

    #[must_use]
    pub fn topic(&self, topic: &TopicId) -> Option<u64> {
        self.inner.board.borrow().topic(topic)
    }

    /// Copy of the whole board.
    #[must_use]
    pub fn board(&self) -> ScoreBoard {
        self.inner.board.borrow().clone()
    }

    /// Receiver that is notified whenever a mutation changes the board.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScoreBoard> {
        self.inner.board.subscribe()
    }

    /// Write the current board now instead of waiting for the quiet period.
    ///
    /// # Errors
    ///
    /// Returns `ScoreStoreError::Storage` if the write fails.
    pub async fn flush_now(&self) -> Result<(), ScoreStoreError> {
        self.inner.flusher.flush_now().await?;
        Ok(())
    }

    #[must_use]
    pub fn flush_state(&self) -> FlushState {
        self.inner.flusher.state()
    }

    #[must_use]
    pub fn flush_report(&self) -> FlushReport {
        self.inner.flusher.report()
    }

    /// True when both handles share the same underlying board.
    #[must_use]
    pub fn same_store(&self, other: &ScoreStore) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for ScoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let board = self.inner.board.borrow();
        f.debug_struct("ScoreStore")
            .field("global", &board.global())
            .field("topics", &board.topics().len())
            .finish_non_exhaustive()
    }
}
