mod practice_vm;
mod score_vm;

pub use practice_vm::{AnswerOutcome, PracticeItemVm};
pub use score_vm::{ScoreSummaryVm, TopicScoreVm, map_score_summary, points_label, topic_label};
