mod notice;
mod practice;
mod score;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use notice::SessionRequired;
pub use practice::PracticeExercise;
pub use score::ScoreSummaryView;
