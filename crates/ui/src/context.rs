use std::sync::Arc;

use dioxus::prelude::*;
use services::ScoreStore;
use thiserror::Error;

pub trait UiApp: Send + Sync {
    fn scores(&self) -> ScoreStore;
}

#[derive(Clone)]
pub struct AppContext {
    scores: ScoreStore,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            scores: app.scores(),
        }
    }

    #[must_use]
    pub fn scores(&self) -> ScoreStore {
        self.scores.clone()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ScoreAccessError {
    #[error("scores are unavailable: this view was rendered outside a learning session")]
    OutsideSession,
}

/// Resolve the session's `ScoreStore` from the component tree.
///
/// Components rendered without an `AppContext` ancestor get
/// `ScoreAccessError::OutsideSession` instead of a throwaway empty store.
/// The first failure per component is logged at error level.
pub fn try_use_score_store() -> Result<ScoreStore, ScoreAccessError> {
    let ctx = try_use_context::<AppContext>();
    let missing = ctx.is_none();
    use_hook(move || {
        if missing {
            tracing::error!("score store requested outside an AppContext");
        }
    });
    ctx.map(|ctx| ctx.scores())
        .ok_or(ScoreAccessError::OutsideSession)
}
