use std::collections::BTreeMap;

use crate::model::TopicId;

/// Points awarded for one completed exercise.
///
/// Unsigned so a negative or fractional award cannot be expressed.
pub type Points = u32;

/// Running score totals for a learning session.
///
/// `global` counts every awarded point, with or without a topic, so it may
/// exceed the sum of the per-topic subtotals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    global: u64,
    topics: BTreeMap<TopicId, u64>,
}

impl ScoreBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a board from persisted totals.
    #[must_use]
    pub fn from_persisted(global: u64, topics: BTreeMap<TopicId, u64>) -> Self {
        Self { global, topics }
    }

    /// Adds `amount` to the global total and, when given, to the topic subtotal.
    ///
    /// Totals saturate at `u64::MAX`. Returns whether the board changed.
    pub fn add_points(&mut self, amount: Points, topic: Option<&TopicId>) -> bool {
        let amount = u64::from(amount);
        let before_global = self.global;
        self.global = self.global.saturating_add(amount);
        let mut changed = self.global != before_global;

        if let Some(topic) = topic {
            match self.topics.get_mut(topic) {
                Some(value) => {
                    let next = value.saturating_add(amount);
                    changed |= next != *value;
                    *value = next;
                }
                None => {
                    self.topics.insert(topic.clone(), amount);
                    changed = true;
                }
            }
        }

        changed
    }

    /// Zeroes one topic, keeping its key. The global total is not revoked.
    pub fn reset_topic(&mut self, topic: &TopicId) -> bool {
        match self.topics.insert(topic.clone(), 0) {
            Some(previous) => previous != 0,
            None => true,
        }
    }

    /// Zeroes the global total and drops every topic key.
    pub fn reset_all(&mut self) -> bool {
        let changed = self.global != 0 || !self.topics.is_empty();
        self.global = 0;
        self.topics.clear();
        changed
    }

    #[must_use]
    pub fn global(&self) -> u64 {
        self.global
    }

    #[must_use]
    pub fn topics(&self) -> &BTreeMap<TopicId, u64> {
        &self.topics
    }

    /// Subtotal for a topic; `None` means the topic was never awarded or reset.
    #[must_use]
    pub fn topic(&self, topic: &TopicId) -> Option<u64> {
        self.topics.get(topic).copied()
    }

    #[must_use]
    pub fn topic_sum(&self) -> u64 {
        self.topics
            .values()
            .fold(0_u64, |acc, value| acc.saturating_add(*value))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global == 0 && self.topics.is_empty()
    }
}
