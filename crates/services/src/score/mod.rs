mod config;
mod flusher;
mod store;

pub use config::{DEFAULT_FLUSH_DELAY, FLUSH_DELAY_ENV, ScoreConfig};
pub use flusher::{FlushReport, FlushState};
pub use store::ScoreStore;
