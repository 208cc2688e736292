use tutor_core::model::{ScoreBoard, TopicId};

use super::test_harness::{ViewKind, in_memory_store, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn score_summary_renders_totals_and_topics() {
    let store = in_memory_store(ScoreBoard::new());
    store.add_points(40, Some(&TopicId::new("fractions-review").unwrap()));
    store.add_points(80, Some(&TopicId::new("prime-composite").unwrap()));
    store.add_points(1, None);

    let mut harness = setup_view_harness(ViewKind::Summary, Some(store));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Total: 121 points"), "missing total in {html}");
    assert!(html.contains("Fractions Review"), "missing topic in {html}");
    assert!(html.contains("80 points"), "missing topic points in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn score_summary_renders_reset_topic_as_zero() {
    let store = in_memory_store(ScoreBoard::new());
    let ratios = TopicId::new("ratios").unwrap();
    store.add_points(20, Some(&ratios));
    store.reset_topic(&ratios);

    let mut harness = setup_view_harness(ViewKind::Summary, Some(store));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Total: 20 points"), "missing total in {html}");
    assert!(html.contains("Ratios"), "reset topic should stay listed in {html}");
    assert!(html.contains(">0 points<"), "missing zeroed topic in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn score_summary_empty_state() {
    let store = in_memory_store(ScoreBoard::new());
    let mut harness = setup_view_harness(ViewKind::Summary, Some(store));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("No topic points yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn score_summary_outside_session_renders_error() {
    let mut harness = setup_view_harness(ViewKind::Summary, None);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("outside a learning session"), "missing error in {html}");
    assert!(!html.contains("Total:"), "should not render a zeroed store in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_exercise_renders_prompt() {
    let store = in_memory_store(ScoreBoard::new());
    let mut harness = setup_view_harness(ViewKind::Practice, Some(store));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Is 21 prime or composite?"), "missing prompt in {html}");
    assert!(html.contains("Check"), "missing check button in {html}");
    assert!(html.contains("Reset topic"), "missing reset button in {html}");
    assert_eq!(harness.scores.as_ref().map(|s| s.global()), Some(0));
}

#[tokio::test(flavor = "current_thread")]
async fn practice_exercise_outside_session_renders_error() {
    let mut harness = setup_view_harness(ViewKind::Practice, None);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("outside a learning session"), "missing error in {html}");
    assert!(!html.contains("Check"), "should not render the exercise in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn score_summary_follows_later_mutations() {
    let store = in_memory_store(ScoreBoard::new());
    let mut harness = setup_view_harness(ViewKind::Summary, Some(store.clone()));
    harness.rebuild();
    harness.drive_async().await;
    assert!(harness.render().contains("Total: 0 points"));

    let ratios = TopicId::new("ratios").unwrap();
    store.add_points(25, Some(&ratios));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Total: 25 points"), "total did not update in {html}");
    assert!(html.contains("Ratios"), "new topic missing in {html}");

    store.reset_all();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Total: 0 points"), "reset not shown in {html}");
    assert!(html.contains("No topic points yet."), "topics not cleared in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_exercise_awards_once_until_topic_reset() {
    let store = in_memory_store(ScoreBoard::new());
    let topic = TopicId::new("prime-composite").unwrap();
    let mut harness = setup_view_harness(ViewKind::Practice, Some(store.clone()));

    let listeners = harness.rebuild_with_listeners();
    let clicks = listeners.for_event("click");
    let [check, reset] = clicks[..] else {
        panic!("expected check and reset buttons, got {clicks:?}");
    };
    let inputs = listeners.for_event("input");
    let [answer] = inputs[..] else {
        panic!("expected one answer input, got {inputs:?}");
    };

    harness.type_text(answer, "prime");
    harness.click(check);
    assert_eq!(store.global(), 0);
    assert!(harness.render().contains("Not quite"));

    harness.type_text(answer, " Composite ");
    harness.click(check);
    harness.click(check);
    assert_eq!(store.global(), 10);
    assert_eq!(store.topic(&topic), Some(10));

    harness.click(reset);
    assert_eq!(store.global(), 10);
    assert_eq!(store.topic(&topic), Some(0));
    assert!(!harness.render().contains("Already solved"));

    harness.type_text(answer, "composite");
    harness.click(check);
    assert_eq!(store.global(), 20);
    assert_eq!(store.topic(&topic), Some(10));
}
