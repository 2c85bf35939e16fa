mod common;

use common::StubEmbedder;
use formpilot_core::strategies::choice::select_index;
use formpilot_core::Thresholds;

fn options(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn exact_match_preempts_semantic_scoring() {
    // "Crimson" is nearly collinear with "Red", but the exact stage runs
    // exhaustively first and must win without touching the embedder.
    let embedder = StubEmbedder::new([
        ("Red", &[1.0, 0.0]),
        ("Crimson", &[0.99, 0.141]),
        ("Blue", &[0.0, 1.0]),
    ]);

    let chosen = select_index(
        &options(&["Red", "Crimson", "Blue"]),
        "Red",
        &embedder,
        Thresholds::default(),
    )
    .await;

    assert_eq!(chosen, Some(0));
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn exact_stage_is_exhaustive_before_partial_begins() {
    // "Redwood" contains "red" and sits at an earlier index, but the exact
    // pass over all options finds "Red" first.
    let embedder = StubEmbedder::new([]);

    let chosen = select_index(
        &options(&["Redwood", "Red"]),
        "red",
        &embedder,
        Thresholds::default(),
    )
    .await;

    assert_eq!(chosen, Some(1));
}

#[tokio::test]
async fn partial_match_works_in_both_directions() {
    let embedder = StubEmbedder::new([]);

    // Value contained in option.
    let chosen = select_index(
        &options(&["Dark Red", "Blue"]),
        "red",
        &embedder,
        Thresholds::default(),
    )
    .await;
    assert_eq!(chosen, Some(0));

    // Option contained in value.
    let chosen = select_index(
        &options(&["Red", "Blue"]),
        "Light Red",
        &embedder,
        Thresholds::default(),
    )
    .await;
    assert_eq!(chosen, Some(0));
}

#[tokio::test]
async fn semantic_stage_takes_first_option_over_the_high_gate() {
    let embedder = StubEmbedder::new([
        ("Red", &[1.0, 0.0]),
        ("Vermillion", &[0.75, 0.661]),
        ("Azure", &[0.1, 0.995]),
    ]);

    let chosen = select_index(
        &options(&["Vermillion", "Azure"]),
        "Red",
        &embedder,
        Thresholds::default(),
    )
    .await;

    // 0.75 > 0.7: selected by the semantic stage.
    assert_eq!(chosen, Some(0));
}

#[tokio::test]
async fn best_available_fallback_needs_only_the_floor() {
    let embedder = StubEmbedder::new([
        ("Red", &[1.0, 0.0]),
        ("Vermillion", &[0.65, 0.76]),
        ("Azure", &[0.1, 0.995]),
    ]);

    let chosen = select_index(
        &options(&["Vermillion", "Azure"]),
        "Red",
        &embedder,
        Thresholds::default(),
    )
    .await;

    // 0.65 misses the 0.7 gate but clears the 0.5 floor as global best.
    assert_eq!(chosen, Some(0));
}

#[tokio::test]
async fn nothing_above_the_floor_selects_nothing() {
    let embedder = StubEmbedder::new([
        ("Red", &[1.0, 0.0]),
        ("Vermillion", &[0.4, 0.917]),
        ("Azure", &[0.1, 0.995]),
    ]);

    let chosen = select_index(
        &options(&["Vermillion", "Azure"]),
        "Red",
        &embedder,
        Thresholds::default(),
    )
    .await;

    assert_eq!(chosen, None);
}

#[tokio::test]
async fn empty_option_list_selects_nothing() {
    let embedder = StubEmbedder::new([("Red", &[1.0, 0.0])]);

    let chosen = select_index(&[], "Red", &embedder, Thresholds::default()).await;
    assert_eq!(chosen, None);
}

#[tokio::test]
async fn embedder_failure_degrades_to_no_selection() {
    // No stub vectors at all: the semantic stages cannot run, and the
    // strategy reports "no selection" instead of erroring.
    let embedder = StubEmbedder::new([]);

    let chosen = select_index(
        &options(&["Vermillion", "Azure"]),
        "Red",
        &embedder,
        Thresholds::default(),
    )
    .await;

    assert_eq!(chosen, None);
}
