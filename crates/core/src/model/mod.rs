mod ids;
mod score;

pub use ids::{TopicId, TopicIdError};
pub use score::{Points, ScoreBoard};
