//! Debounced persistence of the score board.
//!
//! Every mutation reschedules a single timer; the write happens once the board
//! has been quiet for the configured delay. The timer only hands off to a
//! detached write task, so cancelling it never interrupts a write that has
//! already started.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use storage::repository::StorageError;
use storage::snapshot::ScoreSnapshotStore;
use tokio::runtime::Handle;
use tokio::sync::{Mutex as AsyncMutex, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tutor_core::Clock;
use tutor_core::model::ScoreBoard;

/// Where the flusher is in its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushState {
    Idle,
    Pending { deadline: Instant },
    Flushing,
}

/// Counters for completed flush attempts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub attempts: u64,
    pub failures: u64,
    pub last_success_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

struct Schedule {
    generation: u64,
    timer: Option<JoinHandle<()>>,
    state: FlushState,
}

struct Shared {
    delay: Duration,
    clock: Clock,
    snapshots: ScoreSnapshotStore,
    board: watch::Receiver<ScoreBoard>,
    schedule: Mutex<Schedule>,
    report: Mutex<FlushReport>,
    write_lock: AsyncMutex<()>,
}

pub(crate) struct FlushScheduler {
    runtime: Handle,
    shared: Arc<Shared>,
}

impl FlushScheduler {
    pub(crate) fn new(
        runtime: Handle,
        delay: Duration,
        clock: Clock,
        snapshots: ScoreSnapshotStore,
        board: watch::Receiver<ScoreBoard>,
    ) -> Self {
        Self {
            runtime,
            shared: Arc::new(Shared {
                delay,
                clock,
                snapshots,
                board,
                schedule: Mutex::new(Schedule {
                    generation: 0,
                    timer: None,
                    state: FlushState::Idle,
                }),
                report: Mutex::new(FlushReport::default()),
                write_lock: AsyncMutex::new(()),
            }),
        }
    }

    /// Cancel any pending flush and start a new quiet period from now.
    pub(crate) fn schedule(&self) {
        let _enter = self.runtime.enter();
        let deadline = Instant::now() + self.shared.delay;

        let mut schedule = self.shared.lock_schedule();
        if let Some(timer) = schedule.timer.take() {
            timer.abort();
        }
        schedule.generation = schedule.generation.wrapping_add(1);
        schedule.state = FlushState::Pending { deadline };

        let generation = schedule.generation;
        let shared = Arc::clone(&self.shared);
        schedule.timer = Some(self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            tokio::spawn(async move {
                // Failures are recorded and logged inside `flush`.
                let _ = shared.flush(generation).await;
            });
        }));
    }

    /// Cancel any pending timer and write the current board immediately.
    pub(crate) async fn flush_now(&self) -> Result<(), StorageError> {
        let generation = {
            let mut schedule = self.shared.lock_schedule();
            if let Some(timer) = schedule.timer.take() {
                timer.abort();
            }
            schedule.generation = schedule.generation.wrapping_add(1);
            schedule.generation
        };
        self.shared.flush(generation).await
    }

    pub(crate) fn state(&self) -> FlushState {
        self.shared.lock_schedule().state
    }

    pub(crate) fn report(&self) -> FlushReport {
        self.shared
            .report
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Shared {
    fn lock_schedule(&self) -> MutexGuard<'_, Schedule> {
        self.schedule.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moves the state machine only if no newer mutation has been scheduled.
    fn transition(&self, generation: u64, state: FlushState) {
        let mut schedule = self.lock_schedule();
        if schedule.generation == generation {
            schedule.state = state;
            if state == FlushState::Idle {
                schedule.timer = None;
            }
        }
    }

    async fn flush(&self, generation: u64) -> Result<(), StorageError> {
        let _write = self.write_lock.lock().await;
        self.transition(generation, FlushState::Flushing);

        let board = self.board.borrow().clone();
        let result = self.snapshots.save(&board).await;

        {
            let mut report = self.report.lock().unwrap_or_else(PoisonError::into_inner);
            report.attempts = report.attempts.saturating_add(1);
            match &result {
                Ok(()) => {
                    report.last_success_at = Some(self.clock.now());
                    report.last_error = None;
                    tracing::debug!(
                        global = board.global(),
                        topics = board.topics().len(),
                        "scores flushed"
                    );
                }
                Err(err) => {
                    report.failures = report.failures.saturating_add(1);
                    report.last_error = Some(err.to_string());
                    tracing::warn!(error = %err, "score flush failed; will retry on next change");
                }
            }
        }

        self.transition(generation, FlushState::Idle);
        result
    }
}
