pub mod app;
pub mod context;
pub mod vm;
pub mod views;

pub use app::App;
pub use context::{AppContext, ScoreAccessError, UiApp, build_app_context, try_use_score_store};
