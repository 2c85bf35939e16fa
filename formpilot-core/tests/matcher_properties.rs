mod common;

use common::StubEmbedder;
use formpilot_core::{FieldMatcher, Profile};
use std::sync::Arc;

fn ada_profile() -> Profile {
    Profile::from_pairs([("Full Name", "Ada Lovelace"), ("Birth Date", "12/10/1815")])
}

fn ada_embedder() -> Arc<StubEmbedder> {
    // Unit vectors: "Full Name" on the x axis, "Birth Date" on the y axis.
    // Each question vector is unit length, so its similarity to a field is
    // simply the matching component.
    Arc::new(StubEmbedder::new([
        ("Full Name", &[1.0, 0.0, 0.0]),
        ("Birth Date", &[0.0, 1.0, 0.0]),
        ("What is your full name?", &[0.95, 0.312, 0.0]),
        ("When were you born?", &[0.2, 0.8, 0.566]),
        ("Do you like trains?", &[0.3, 0.25, 0.92]),
    ]))
}

#[tokio::test]
async fn matches_the_highest_similarity_field() {
    let embedder = ada_embedder();
    let matcher = FieldMatcher::new(&ada_profile(), embedder).await.unwrap();

    let matched = matcher
        .best_field("What is your full name?", 0.5)
        .await
        .unwrap()
        .expect("similarity 0.95 clears the 0.5 floor");

    assert_eq!(matched.field, "Full Name");
    assert!(matched.score > 0.9);
    assert_eq!(matcher.value_of(&matched.field), Some("Ada Lovelace"));
}

#[tokio::test]
async fn below_threshold_is_a_skip_not_an_error() {
    let embedder = ada_embedder();
    let matcher = FieldMatcher::new(&ada_profile(), embedder).await.unwrap();

    let matched = matcher.best_field("Do you like trains?", 0.5).await.unwrap();
    assert!(matched.is_none());
}

#[tokio::test]
async fn lowering_the_threshold_never_removes_a_match() {
    let embedder = ada_embedder();
    let matcher = FieldMatcher::new(&ada_profile(), embedder).await.unwrap();

    // "When were you born?" scores about 0.8 against Birth Date.
    let mut matched_at = Vec::new();
    for threshold in [0.9_f32, 0.75, 0.5, 0.3, 0.0] {
        let hit = matcher
            .best_field("When were you born?", threshold)
            .await
            .unwrap()
            .is_some();
        matched_at.push(hit);
    }

    // Once the threshold drops below the score, the match appears and stays.
    assert_eq!(matched_at, vec![false, true, true, true, true]);
}

#[tokio::test]
async fn ties_keep_the_first_profile_field() {
    let profile = Profile::from_pairs([("Home Address", "12 Crescent"), ("Mailing Address", "PO 7")]);
    let embedder = Arc::new(StubEmbedder::new([
        ("Home Address", &[1.0, 0.0]),
        ("Mailing Address", &[1.0, 0.0]),
        ("Address?", &[1.0, 0.0]),
    ]));
    let matcher = FieldMatcher::new(&profile, embedder).await.unwrap();

    let matched = matcher.best_field("Address?", 0.5).await.unwrap().unwrap();
    assert_eq!(matched.field, "Home Address");
}

#[tokio::test]
async fn field_embeddings_are_computed_exactly_once() {
    let embedder = ada_embedder();
    let matcher = FieldMatcher::new(&ada_profile(), embedder.clone())
        .await
        .unwrap();
    // One embed per profile field at construction.
    assert_eq!(embedder.calls(), 2);

    matcher
        .best_field("What is your full name?", 0.5)
        .await
        .unwrap();
    matcher
        .best_field("When were you born?", 0.5)
        .await
        .unwrap();

    // Two more calls, one per question, none for the cached fields.
    assert_eq!(embedder.calls(), 4);
}
