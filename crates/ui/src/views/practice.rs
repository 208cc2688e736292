use dioxus::prelude::*;
use tutor_core::model::Points;

use crate::context::try_use_score_store;
use crate::views::SessionRequired;
use crate::vm::{AnswerOutcome, PracticeItemVm};

/// A single typed-answer exercise that awards points once when solved.
#[component]
pub fn PracticeExercise(
    topic: String,
    prompt: String,
    answer: String,
    points: Points,
) -> Element {
    let store = try_use_score_store();
    let mut item =
        use_signal(|| PracticeItemVm::new(&topic, prompt.clone(), answer.clone(), points));
    let mut draft = use_signal(String::new);
    let mut feedback = use_signal(|| None::<AnswerOutcome>);

    let store = match store {
        Ok(store) => store,
        Err(error) => return rsx! { SessionRequired { error } },
    };
    let store_for_reset = store.clone();

    let prompt_text = item.read().prompt().to_string();
    let completed = item.read().is_completed();
    let has_topic = item.read().topic().is_some();

    rsx! {
        div { class: if completed { "practice-item practice-item-done" } else { "practice-item" },
            p { class: "practice-prompt", "{prompt_text}" }
            input {
                class: "practice-answer",
                r#type: "text",
                value: "{draft}",
                disabled: completed,
                oninput: move |evt| draft.set(evt.value()),
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: completed,
                onclick: move |_| {
                    let answer = draft.read().clone();
                    let outcome = item.write().check(&answer);
                    if outcome == AnswerOutcome::Correct {
                        let award = item.read();
                        store.add_points(award.points(), award.topic());
                    }
                    feedback.set(Some(outcome));
                },
                "Check"
            }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                disabled: !has_topic,
                onclick: move |_| {
                    let topic = item.read().topic().cloned();
                    if let Some(topic) = topic {
                        store_for_reset.reset_topic(&topic);
                    }
                    item.write().reopen();
                    draft.set(String::new());
                    feedback.set(None);
                },
                "Reset topic"
            }
            if let Some(outcome) = feedback() {
                p { class: "practice-feedback", "{outcome.message()}" }
            }
        }
    }
}
