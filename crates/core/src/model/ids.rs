use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stable identifier of a curriculum topic, e.g. `"prime-composite"`.
///
/// Always non-empty with surrounding whitespace removed. Serializes as a bare
/// string so it can key a JSON object; deserializing accepts only that
/// canonical form, so two stored keys can never collapse into one.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TopicId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TopicIdError {
    #[error("topic id cannot be empty")]
    Empty,
    #[error("topic id {0:?} has surrounding whitespace")]
    Untrimmed(String),
}

impl TopicId {
    /// Creates a new `TopicId`.
    ///
    /// # Errors
    ///
    /// Returns `TopicIdError::Empty` if the id is blank after trimming.
    pub fn new(id: impl Into<String>) -> Result<Self, TopicIdError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(TopicIdError::Empty);
        }
        if trimmed.len() == id.len() {
            Ok(Self(id))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TopicId {
    type Error = TopicIdError;

    /// Strict conversion: the value must already be trimmed.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().len() != value.len() {
            return Err(TopicIdError::Untrimmed(value));
        }
        Self::new(value)
    }
}

impl From<TopicId> for String {
    fn from(id: TopicId) -> Self {
        id.0
    }
}

impl AsRef<str> for TopicId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({})", self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TopicId {
    type Err = TopicIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
