use tutor_core::model::{ScoreBoard, TopicId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicScoreVm {
    pub id: String,
    pub label: String,
    pub points: u64,
    pub points_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreSummaryVm {
    pub global: u64,
    pub global_label: String,
    pub topics: Vec<TopicScoreVm>,
}

impl ScoreSummaryVm {
    #[must_use]
    pub fn has_topics(&self) -> bool {
        !self.topics.is_empty()
    }
}

#[must_use]
pub fn map_score_summary(board: &ScoreBoard) -> ScoreSummaryVm {
    let topics = board
        .topics()
        .iter()
        .map(|(id, points)| TopicScoreVm {
            id: id.to_string(),
            label: topic_label(id),
            points: *points,
            points_label: points_label(*points),
        })
        .collect();

    ScoreSummaryVm {
        global: board.global(),
        global_label: format!("Total: {}", points_label(board.global())),
        topics,
    }
}

/// "prime-composite" -> "Prime Composite"
#[must_use]
pub fn topic_label(id: &TopicId) -> String {
    id.as_str()
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn points_label(points: u64) -> String {
    if points == 1 {
        "1 point".to_string()
    } else {
        format!("{points} points")
    }
}
