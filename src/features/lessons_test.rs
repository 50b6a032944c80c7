use super::*;
use crate::tree::StateTree;

fn summary(course_id: Uuid, title: &str, position: u32) -> LessonSummary {
    LessonSummary { id: Uuid::new_v4(), course_id, title: title.into(), position }
}

fn reduce(state: &LessonsState, action: LessonsAction) -> Option<LessonsState> {
    LessonsReducer.reduce(state, &action.into())
}

#[test]
fn answers_for_previous_course_are_dropped() {
    let (first, second) = (Uuid::new_v4(), Uuid::new_v4());
    let requested = reduce(&LessonsState::initial(), LessonsAction::FetchRequested { course_id: first }).unwrap();
    let switched = reduce(&requested, LessonsAction::FetchRequested { course_id: second }).unwrap();

    let late = LessonsAction::FetchSucceeded { course_id: first, lessons: vec![summary(first, "Intro", 1)] };
    assert!(reduce(&switched, late).is_none());

    let done = reduce(&switched, LessonsAction::FetchSucceeded {
        course_id: second,
        lessons: vec![summary(second, "Basics", 1)],
    })
    .unwrap();
    let tree = StateTree::new().with_slice(done);
    assert_eq!(select_lessons_data(&tree).len(), 1);
    assert!(!*select_lessons_loading(&tree));
}

#[test]
fn refetching_same_course_keeps_list() {
    let course_id = Uuid::new_v4();
    let loaded = LessonsState {
        course_id: Some(course_id),
        lessons: vec![summary(course_id, "Verbs", 2)],
        ..LessonsState::initial()
    };
    let refreshing = reduce(&loaded, LessonsAction::FetchRequested { course_id }).unwrap();
    assert_eq!(refreshing.lessons.len(), 1);
    assert!(refreshing.loading);
}
