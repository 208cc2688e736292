use dioxus::prelude::*;

use crate::context::ScoreAccessError;

/// Shown in place of a score-dependent view when no session is in scope.
#[component]
pub fn SessionRequired(error: ScoreAccessError) -> Element {
    rsx! {
        div { class: "notice notice-error", role: "alert",
            p { "{error}" }
        }
    }
}
