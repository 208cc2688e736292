use dioxus::prelude::*;

use crate::views::{PracticeExercise, ScoreSummaryView};

struct WarmUp {
    topic: &'static str,
    prompt: &'static str,
    answer: &'static str,
    points: u32,
}

const WARM_UPS: &[WarmUp] = &[
    WarmUp {
        topic: "prime-composite",
        prompt: "Is 21 prime or composite?",
        answer: "composite",
        points: 10,
    },
    WarmUp {
        topic: "fractions-review",
        prompt: "Simplify 6/8.",
        answer: "3/4",
        points: 10,
    },
    WarmUp {
        topic: "ratios",
        prompt: "Write 10:15 in simplest form.",
        answer: "2:3",
        points: 20,
    },
];

#[component]
pub fn App() -> Element {
    rsx! {
        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                main { class: "content",
                    ScoreSummaryView {}
                    section { class: "practice",
                        h2 { "Warm-up" }
                        for warm_up in WARM_UPS {
                            PracticeExercise {
                                key: "{warm_up.topic}",
                                topic: warm_up.topic.to_string(),
                                prompt: warm_up.prompt.to_string(),
                                answer: warm_up.answer.to_string(),
                                points: warm_up.points,
                            }
                        }
                    }
                }
            }
        }
    }
}
