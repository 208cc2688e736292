use dioxus::prelude::*;
use tutor_core::model::ScoreBoard;

use crate::context::try_use_score_store;
use crate::views::SessionRequired;
use crate::vm::{ScoreSummaryVm, TopicScoreVm, map_score_summary};

#[component]
pub fn ScoreSummaryView() -> Element {
    let store = try_use_score_store();
    let mut board = use_signal(|| {
        store
            .as_ref()
            .map(|store| store.board())
            .unwrap_or_default()
    });

    let subscription = store.as_ref().ok().cloned();
    use_future(move || {
        let store = subscription.clone();
        async move {
            let Some(store) = store else {
                return;
            };
            let mut rx = store.subscribe();
            // Catch up on anything that changed between the first render and now.
            let current = rx.borrow_and_update().clone();
            if *board.peek() != current {
                board.set(current);
            }
            while rx.changed().await.is_ok() {
                let next: ScoreBoard = rx.borrow_and_update().clone();
                board.set(next);
            }
        }
    });

    if let Err(error) = store {
        return rsx! { SessionRequired { error } };
    }

    let summary = map_score_summary(&board.read());
    let has_topics = summary.has_topics();
    let ScoreSummaryVm {
        global_label,
        topics,
        ..
    } = summary;

    rsx! {
        section { class: "score-summary",
            h2 { "Your progress" }
            p { class: "score-total", "{global_label}" }

            if has_topics {
                ul { class: "score-topics",
                    for topic in topics {
                        TopicScoreRow { key: "{topic.id}", topic }
                    }
                }
            } else {
                p { class: "score-empty", "No topic points yet." }
            }
        }
    }
}

#[component]
fn TopicScoreRow(topic: TopicScoreVm) -> Element {
    rsx! {
        li { class: "score-topic",
            span { class: "score-topic-name", "{topic.label}" }
            span { class: "score-topic-points", "{topic.points_label}" }
        }
    }
}
