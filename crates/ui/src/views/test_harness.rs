use std::any::Any;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use dioxus::core::{ElementId, Mutation, NoOpMutations};
use dioxus::html::{
    PlatformEventData, SerializedFormData, SerializedHtmlEventConverter, SerializedMouseData,
    set_event_converter,
};
use dioxus::prelude::*;
use services::{ScoreConfig, ScoreStore};
use storage::repository::Storage;
use storage::snapshot::ScoreSnapshotStore;
use tutor_core::model::ScoreBoard;
use tutor_core::time::fixed_clock;

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::{PracticeExercise, ScoreSummaryView};

#[derive(Clone)]
struct TestApp {
    scores: ScoreStore,
}

impl UiApp for TestApp {
    fn scores(&self) -> ScoreStore {
        self.scores.clone()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Summary,
    Practice,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    context: Option<AppContext>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    if let Some(context) = props.context.clone() {
        use_context_provider(|| context);
    }
    match props.view {
        ViewKind::Summary => rsx! { ScoreSummaryView {} },
        ViewKind::Practice => rsx! {
            PracticeExercise {
                topic: "prime-composite".to_string(),
                prompt: "Is 21 prime or composite?".to_string(),
                answer: "composite".to_string(),
                points: 10,
            }
        },
    }
}

pub struct Listeners(Vec<(String, ElementId)>);

impl Listeners {
    /// Elements listening for `event` (e.g. `"click"`).
    pub fn for_event(&self, event: &str) -> Vec<ElementId> {
        self.0
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, id)| *id)
            .collect()
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub scores: Option<ScoreStore>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Like `rebuild`, but also returns every listener the first render
    /// attached, as `(event name, element)` in document order.
    pub fn rebuild_with_listeners(&mut self) -> Listeners {
        let mutations = self.dom.rebuild_to_vec();
        drive_dom(&mut self.dom);
        let attached = mutations
            .edits
            .into_iter()
            .filter_map(|edit| match edit {
                Mutation::NewEventListener { name, id } => Some((name, id)),
                _ => None,
            })
            .collect();
        Listeners(attached)
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn click(&mut self, element: ElementId) {
        self.dispatch("click", Box::<SerializedMouseData>::default(), element);
    }

    pub fn type_text(&mut self, element: ElementId, text: &str) {
        let data = SerializedFormData::new(text.to_string(), Vec::new());
        self.dispatch("input", Box::new(data), element);
    }

    fn dispatch(&mut self, name: &str, data: Box<dyn Any>, element: ElementId) {
        set_event_converter(Box::new(SerializedHtmlEventConverter));
        let event = Event::new(Rc::new(PlatformEventData::new(data)) as Rc<dyn Any>, true);
        self.dom.runtime().handle_event(name, event, element);
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Build a store over fresh in-memory storage. Must run inside a Tokio runtime.
pub fn in_memory_store(board: ScoreBoard) -> ScoreStore {
    let storage = Storage::in_memory();
    ScoreStore::with_board(
        board,
        ScoreSnapshotStore::new(Arc::clone(&storage.kv)),
        ScoreConfig::default(),
        fixed_clock(),
    )
    .expect("score store inside runtime")
}

pub fn setup_view_harness(view: ViewKind, scores: Option<ScoreStore>) -> ViewHarness {
    let context = scores.clone().map(|scores| {
        let app: Arc<dyn UiApp> = Arc::new(TestApp { scores });
        build_app_context(&app)
    });

    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { context, view });

    ViewHarness { dom, scores }
}
