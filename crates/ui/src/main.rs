#![allow(non_snake_case)]

use std::sync::Arc;

use services::{Clock, ScoreConfig, ScoreStore};
use ui::{App, UiApp, build_app_context};

struct PreviewApp {
    scores: ScoreStore,
}

impl UiApp for PreviewApp {
    fn scores(&self) -> ScoreStore {
        self.scores.clone()
    }
}

// Standalone preview with an in-memory store; the real binary lives in `crates/app`.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let services = runtime.block_on(services::AppServices::in_memory(
        Clock::system(),
        ScoreConfig::from_env(),
    ))?;
    let app: Arc<dyn UiApp> = Arc::new(PreviewApp {
        scores: services.scores(),
    });
    let context = build_app_context(&app);

    let _guard = runtime.enter();
    dioxus::LaunchBuilder::desktop().with_context(context).launch(App);
    Ok(())
}
