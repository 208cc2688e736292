use std::env;
use std::time::Duration;

/// Quiet period after the last mutation before scores are written.
pub const DEFAULT_FLUSH_DELAY: Duration = Duration::from_millis(300);

/// Environment variable overriding the flush delay, in milliseconds.
pub const FLUSH_DELAY_ENV: &str = "TUTOR_SCORE_FLUSH_MS";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreConfig {
    pub flush_delay: Duration,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            flush_delay: DEFAULT_FLUSH_DELAY,
        }
    }
}

impl ScoreConfig {
    /// Read the config from `TUTOR_SCORE_FLUSH_MS`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(env::var(FLUSH_DELAY_ENV).ok().as_deref())
    }

    /// Parse a raw millisecond value; blank or invalid input keeps the default.
    #[must_use]
    pub fn from_env_value(raw: Option<&str>) -> Self {
        let flush_delay = raw
            .map(str::trim)
            .filter(|val| !val.is_empty())
            .and_then(|val| match val.parse::<u64>() {
                Ok(ms) => Some(Duration::from_millis(ms)),
                Err(_) => {
                    tracing::warn!(value = val, "ignoring invalid {FLUSH_DELAY_ENV}");
                    None
                }
            })
            .unwrap_or(DEFAULT_FLUSH_DELAY);
        Self { flush_delay }
    }

    #[must_use]
    pub fn with_flush_delay(mut self, flush_delay: Duration) -> Self {
        self.flush_delay = flush_delay;
        self
    }
}
