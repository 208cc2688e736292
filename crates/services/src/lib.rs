#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod score;

pub use tutor_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, ScoreStoreError};
pub use score::{FlushReport, FlushState, ScoreConfig, ScoreStore};
