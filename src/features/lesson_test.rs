use super::*;
use crate::tree::StateTree;

fn lesson(title: &str) -> Lesson {
    Lesson { id: Uuid::new_v4(), course_id: Uuid::new_v4(), title: title.into(), position: 1, body: String::new() }
}

fn word(term: &str, translation: &str) -> Word {
    Word { id: Uuid::new_v4(), term: term.into(), translation: translation.into(), reading: None }
}

fn reduce(state: &LessonState, action: LessonAction) -> Option<LessonState> {
    LessonReducer.reduce(state, &action.into())
}

#[test]
fn empty_tree_reads_as_loading() {
    let state = StateTree::new();
    assert!(*select_lesson_loading(&state));
    assert!(select_lesson_data(&state).is_none());
    assert!(select_lesson_vocabulary(&state).is_empty());
}

#[test]
fn loaded_lesson_is_selectable() {
    let open = lesson("Greetings");
    let state = StateTree::new().with_slice(LessonState {
        requested_id: Some(open.id),
        lesson: Some(open.clone()),
        vocabulary: vec![word("hola", "hello"), word("adiós", "goodbye")],
        loading: false,
        error: None,
    });

    assert_eq!(*select_lesson_data(&state), Some(open.clone()));
    assert_eq!(*select_lesson_id(&state), Some(open.id));
    assert_eq!(select_lesson_vocabulary(&state).len(), 2);
    assert!(!*select_lesson_loading(&state));
}

#[test]
fn fetch_requested_drops_the_previous_lesson() {
    let loaded = LessonState { lesson: Some(lesson("Numbers")), loading: false, ..LessonState::initial() };
    let next = reduce(&loaded, LessonAction::FetchRequested { lesson_id: Uuid::new_v4() }).unwrap();
    assert!(next.lesson.is_none());
    assert!(next.loading);
}

#[test]
fn fetch_failure_stops_loading_and_keeps_error() {
    let lesson_id = Uuid::new_v4();
    let requested = reduce(&LessonState::initial(), LessonAction::FetchRequested { lesson_id }).unwrap();
    let next = reduce(&requested, LessonAction::FetchFailed { lesson_id, error: "lesson not found".into() }).unwrap();
    assert!(!next.loading);
    assert_eq!(next.error.as_deref(), Some("lesson not found"));
}

#[test]
fn cleared_returns_to_default() {
    let colors = lesson("Colors");
    let requested = reduce(&LessonState::initial(), LessonAction::FetchRequested { lesson_id: colors.id }).unwrap();
    let loaded =
        reduce(&requested, LessonAction::FetchSucceeded { lesson: colors, vocabulary: vec![word("rojo", "red")] }).unwrap();
    assert_eq!(reduce(&loaded, LessonAction::Cleared), Some(LessonState::initial()));
}

#[test]
fn late_answer_for_previous_lesson_is_dropped() {
    let (first, second) = (lesson("Food"), lesson("Weather"));
    let state = reduce(&LessonState::initial(), LessonAction::FetchRequested { lesson_id: first.id }).unwrap();
    let state = reduce(&state, LessonAction::FetchRequested { lesson_id: second.id }).unwrap();
    let state = reduce(&state, LessonAction::FetchSucceeded { lesson: second.clone(), vocabulary: Vec::new() }).unwrap();

    let late = LessonAction::FetchSucceeded { lesson: first.clone(), vocabulary: vec![word("pan", "bread")] };
    assert!(reduce(&state, late).is_none());
    let late_error = LessonAction::FetchFailed { lesson_id: first.id, error: "timeout".into() };
    assert!(reduce(&state, late_error).is_none());

    let tree = StateTree::new().with_slice(state);
    assert_eq!(*select_lesson_id(&tree), Some(second.id));
    assert!(!*select_lesson_loading(&tree));
}

#[test]
fn answer_without_request_is_dropped() {
    let unrequested = LessonAction::FetchSucceeded { lesson: lesson("Travel"), vocabulary: Vec::new() };
    assert!(reduce(&LessonState::initial(), unrequested).is_none());
}

#[test]
fn other_features_are_ignored() {
    let action: Action = crate::features::writing::WritingAction::DrawingCleared.into();
    assert!(LessonReducer.reduce(&LessonState::initial(), &action).is_none());
}
