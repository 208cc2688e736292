use tutor_core::model::{Points, TopicId};

/// Result of checking a typed answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// First correct answer; the caller should award the points.
    Correct,
    Incorrect,
    /// Already solved; no further points.
    AlreadyCompleted,
}

impl AnswerOutcome {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            AnswerOutcome::Correct => "Correct!",
            AnswerOutcome::Incorrect => "Not quite. Try again.",
            AnswerOutcome::AlreadyCompleted => "Already solved.",
        }
    }
}

/// One practice question and whether the learner has solved it.
///
/// Owns the once-per-exercise guard: only the first correct answer reports
/// `AnswerOutcome::Correct`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeItemVm {
    topic: Option<TopicId>,
    prompt: String,
    expected: String,
    points: Points,
    completed: bool,
}

impl PracticeItemVm {
    #[must_use]
    pub fn new(
        topic: &str,
        prompt: impl Into<String>,
        expected: impl Into<String>,
        points: Points,
    ) -> Self {
        let topic = TopicId::new(topic).ok();
        if topic.is_none() {
            tracing::warn!(
                "practice item without a valid topic id; points count toward the total only"
            );
        }
        Self {
            topic,
            prompt: prompt.into(),
            expected: expected.into(),
            points,
            completed: false,
        }
    }

    /// Compare `answer` with the expected literal, ignoring case and surrounding
    /// whitespace.
    pub fn check(&mut self, answer: &str) -> AnswerOutcome {
        if self.completed {
            return AnswerOutcome::AlreadyCompleted;
        }
        if normalize(answer) == normalize(&self.expected) {
            self.completed = true;
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect
        }
    }

    /// Make the item answerable again, e.g. after its topic was reset.
    pub fn reopen(&mut self) {
        self.completed = false;
    }

    #[must_use]
    pub fn topic(&self) -> Option<&TopicId> {
        self.topic.as_ref()
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn points(&self) -> Points {
        self.points
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

fn normalize(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
