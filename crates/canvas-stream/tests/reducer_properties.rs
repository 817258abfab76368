//! Property tests for the streaming artifact reducer.
//!
//! Core guarantees exercised here:
//! - Every delta reaches the kind hook and the generic transition exactly
//!   once, in buffer order, however the triggers are spread over appends.
//! - Redundant triggers with no buffer growth change nothing.
//! - Without hooks, the final artifact equals the left fold of the generic
//!   transition over the exact delta sequence.

use canvas_artifact::{fold, Artifact, ArtifactKind, Delta, DeltaKind};
use canvas_stream::KindRegistry;
use canvas_test_utils::{create_reducer, recording_registry};
use proptest::prelude::*;
use serde_json::json;

fn delta_strategy() -> impl Strategy<Value = Delta> {
    prop_oneof![
        "[a-z0-9-]{1,8}".prop_map(Delta::id),
        "[A-Za-z ]{0,12}".prop_map(Delta::title),
        prop_oneof![
            Just(ArtifactKind::Text),
            Just(ArtifactKind::Code),
            Just(ArtifactKind::Image),
            Just(ArtifactKind::Sheet),
        ]
        .prop_map(Delta::kind),
        Just(Delta::clear()),
        Just(Delta::finish()),
        "[a-z]{0,6}".prop_map(Delta::text),
        "[a-z]{0,6}".prop_map(Delta::code),
        Just(Delta::new("data-unknown", json!({"x": 1}))),
        any::<i64>().prop_map(|n| Delta::new(DeltaKind::Title, n)),
    ]
}

/// A delta sequence plus the batch sizes it is appended in, and how many
/// redundant triggers follow each batch.
fn schedule_strategy() -> impl Strategy<Value = (Vec<Delta>, Vec<(usize, usize)>)> {
    prop::collection::vec(delta_strategy(), 0..40).prop_flat_map(|deltas| {
        let len = deltas.len();
        (
            Just(deltas),
            prop::collection::vec((1..=len.max(1), 1usize..3), 0..=len),
        )
    })
}

/// Append `deltas` following `batches`, triggering after every batch.
/// Returns the total number of deltas the reducer reported as processed.
fn drive(
    reducer: &mut canvas_stream::StreamReducer,
    deltas: &[Delta],
    batches: &[(usize, usize)],
) -> usize {
    let mut appended = 0;
    let mut processed = 0;
    for &(size, triggers) in batches {
        let end = (appended + size).min(deltas.len());
        reducer.buffer().extend(deltas[appended..end].iter().cloned());
        appended = end;
        for _ in 0..triggers {
            processed += reducer.process().processed;
        }
    }
    reducer.buffer().extend(deltas[appended..].iter().cloned());
    processed += reducer.process().processed;
    processed += reducer.process().processed;
    processed
}

proptest! {
    #[test]
    fn prop_each_delta_folded_once_in_order((deltas, batches) in schedule_strategy()) {
        let (registry, hooks) = recording_registry();
        let mut reducer = create_reducer(registry);

        let processed = drive(&mut reducer, &deltas, &batches);
        prop_assert_eq!(processed, deltas.len());
        prop_assert_eq!(
            reducer.cursor(),
            deltas.len().checked_sub(1)
        );

        // Recording hooks leave the store alone, so the kind in force at each
        // delta is the kind of the generic fold over the deltas before it
        for (kind, hook) in &hooks {
            let expected: Vec<Delta> = deltas
                .iter()
                .enumerate()
                .filter(|(i, _)| {
                    fold(None, &deltas[..*i]).map(|a| a.kind).unwrap_or_default() == *kind
                })
                .map(|(_, d)| d.clone())
                .collect();
            prop_assert_eq!(hook.seen(), expected);
        }
        let seen: usize = hooks.iter().map(|(_, hook)| hook.seen().len()).sum();
        prop_assert_eq!(seen, deltas.len());
    }

    #[test]
    fn prop_generic_state_is_left_fold((deltas, batches) in schedule_strategy()) {
        let mut reducer = create_reducer(KindRegistry::new());
        drive(&mut reducer, &deltas, &batches);

        prop_assert_eq!(reducer.store().artifact(), fold(None, &deltas));
    }

    #[test]
    fn prop_retrigger_is_idempotent(deltas in prop::collection::vec(delta_strategy(), 1..30)) {
        let mut reducer = create_reducer(KindRegistry::with_defaults());
        reducer.buffer().extend(deltas);
        reducer.process();

        let before = reducer.store().get();
        let cursor = reducer.cursor();
        for _ in 0..3 {
            prop_assert!(reducer.process().is_noop());
        }
        prop_assert_eq!(reducer.store().get(), before);
        prop_assert_eq!(reducer.cursor(), cursor);
    }
}

#[test]
fn hooks_see_deltas_exactly_once_in_index_order() {
    let (registry, hooks) = recording_registry();
    let mut reducer = create_reducer(registry);
    let text_hook = &hooks[0].1;

    reducer.buffer().append(Delta::title("t"));
    reducer.process();
    reducer.buffer().extend([Delta::text("a"), Delta::text("b")]);
    reducer.process();
    reducer.process();
    reducer.buffer().append(Delta::text("c"));
    reducer.process();

    assert_eq!(
        text_hook.seen(),
        vec![
            Delta::title("t"),
            Delta::text("a"),
            Delta::text("b"),
            Delta::text("c")
        ]
    );
}

#[test]
fn kind_hook_does_not_see_its_own_kind_change() {
    let (registry, hooks) = recording_registry();
    let mut reducer = create_reducer(registry);
    let (_, text_hook) = &hooks[0];
    let (_, code_hook) = &hooks[1];

    reducer.buffer().extend([
        Delta::title("script"),
        Delta::kind(ArtifactKind::Code),
        Delta::code("print(1)"),
    ]);
    reducer.process();

    assert_eq!(code_hook.seen_kinds(), vec![DeltaKind::CodeDelta]);
    assert_eq!(text_hook.seen_kinds(), vec![DeltaKind::Title, DeltaKind::Kind]);
}

#[test]
fn kind_change_as_first_delta_reaches_default_kind_hook() {
    let (registry, hooks) = recording_registry();
    let mut reducer = create_reducer(registry);

    reducer.buffer().extend([Delta::kind(ArtifactKind::Code), Delta::code("x = 1")]);
    reducer.process();

    let seen: Vec<_> = hooks.iter().map(|(k, h)| (*k, h.seen_kinds())).collect();
    assert_eq!(
        seen,
        vec![
            (ArtifactKind::Text, vec![DeltaKind::Kind]),
            (ArtifactKind::Code, vec![DeltaKind::CodeDelta]),
            (ArtifactKind::Image, vec![]),
            (ArtifactKind::Sheet, vec![]),
        ]
    );
}

#[test]
fn first_deltas_reach_default_kind_hook() {
    let (registry, hooks) = recording_registry();
    let mut reducer = create_reducer(registry);

    reducer.buffer().extend([Delta::title("a"), Delta::title("b")]);
    reducer.process();

    assert_eq!(
        hooks[0].1.seen_kinds(),
        vec![DeltaKind::Title, DeltaKind::Title]
    );
    assert!(hooks[1..].iter().all(|(_, h)| h.seen().is_empty()));
}

#[test]
fn bootstrap_from_set_title() {
    let mut reducer = create_reducer(KindRegistry::with_defaults());
    reducer.buffer().append(Delta::title("Untitled"));
    reducer.process();

    assert_eq!(
        reducer.store().artifact(),
        Some(Artifact {
            title: "Untitled".to_string(),
            ..Artifact::bootstrap()
        })
    );
}
