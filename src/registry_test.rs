use super::*;
use crate::features::progress::{ProgressAction, ProgressReducer, ProgressState};
use crate::features::writing::{WritingAction, WritingReducer};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
struct FakeProgress;

impl Slice for FakeProgress {
    const KEY: &'static str = "progress";

    fn initial() -> Self {
        Self
    }
}

struct FakeProgressReducer;

impl Reducer for FakeProgressReducer {
    type Slice = FakeProgress;

    fn reduce(&self, _slice: &FakeProgress, _action: &Action) -> Option<FakeProgress> {
        None
    }
}

fn completed(xp: u64) -> Action {
    ProgressAction::LessonCompleted { lesson_id: Uuid::new_v4(), xp }.into()
}

#[test]
fn insert_reducer_is_idempotent_per_key() {
    let mut registry = Registry::new();
    assert_eq!(registry.insert_reducer(ProgressReducer), Ok(true));
    assert_eq!(registry.insert_reducer(ProgressReducer), Ok(false));
    assert_eq!(registry.reducer_keys(), vec!["progress"]);
}

#[test]
fn insert_reducer_rejects_other_type_under_same_key() {
    let mut registry = Registry::new();
    registry.insert_reducer(ProgressReducer).unwrap();
    assert_eq!(
        registry.insert_reducer(FakeProgressReducer),
        Err(StoreError::SliceTypeMismatch { key: "progress" })
    );
}

#[test]
fn remove_reducer_reports_presence() {
    let mut registry = Registry::new();
    registry.insert_reducer(ProgressReducer).unwrap();
    assert!(registry.remove_reducer("progress"));
    assert!(!registry.remove_reducer("progress"));
    assert!(!registry.has_reducer("progress"));
}

#[test]
fn reduce_only_replaces_changed_slices() {
    let mut registry = Registry::new();
    registry.insert_reducer(ProgressReducer).unwrap();
    registry.insert_reducer(WritingReducer).unwrap();
    let tree = StateTree::new()
        .with_slice(ProgressState::initial())
        .with_slice(crate::features::writing::WritingState::initial());
    let writing_before = tree.raw("writing").cloned().unwrap();

    let next = registry.reduce(&tree, &completed(10), true).unwrap();

    assert_eq!(next.version(), tree.version() + 1);
    assert_eq!(next.slice::<ProgressState>().unwrap().xp, 10);
    assert!(Arc::ptr_eq(next.raw("writing").unwrap(), &writing_before));
}

#[test]
fn reduce_without_changes_returns_same_snapshot() {
    let mut registry = Registry::new();
    registry.insert_reducer(WritingReducer).unwrap();
    let tree = StateTree::new().with_slice(crate::features::writing::WritingState::initial());

    // Undo with nothing drawn is a no-op.
    let next = registry.reduce(&tree, &WritingAction::StrokeUndone.into(), true).unwrap();
    assert!(next.ptr_eq(&tree));
}

#[test]
fn reducer_returning_equal_value_keeps_identity() {
    let mut registry = Registry::new();
    registry.insert_reducer(WritingReducer).unwrap();
    let tree = StateTree::new().with_slice(crate::features::writing::WritingState::initial());

    // Clearing an empty drawing yields an equal slice.
    let next = registry.reduce(&tree, &WritingAction::DrawingCleared.into(), true).unwrap();
    assert!(next.ptr_eq(&tree));
}

#[test]
fn strict_reduce_fails_on_mismatched_slice() {
    let mut registry = Registry::new();
    registry.insert_reducer(ProgressReducer).unwrap();
    let tree = StateTree::new().with_slice(FakeProgress);

    assert_eq!(
        registry.reduce(&tree, &completed(5), true).unwrap_err(),
        StoreError::SliceTypeMismatch { key: "progress" }
    );
}

#[test]
fn lax_reduce_restarts_mismatched_slice_from_default() {
    let mut registry = Registry::new();
    registry.insert_reducer(ProgressReducer).unwrap();
    let tree = StateTree::new().with_slice(FakeProgress);

    let next = registry.reduce(&tree, &completed(5), false).unwrap();
    assert_eq!(next.slice::<ProgressState>().unwrap().xp, 5);
}

#[test]
fn effects_are_keyed_by_name() {
    struct Noop;
    impl Effect for Noop {
        fn on_action(&self, _action: &Action, _ctx: &EffectContext) {}
    }

    let mut registry = Registry::new();
    assert!(registry.insert_effect("noop", Arc::new(Noop)));
    assert!(!registry.insert_effect("noop", Arc::new(Noop)));
    assert_eq!(registry.effect_keys(), vec!["noop"]);
    assert!(registry.remove_effect("noop"));
    assert!(registry.effects().is_empty());
}
