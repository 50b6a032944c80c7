use super::*;
use crate::features::admin::CrudAction;
use crate::model::Word;
use serde_json::json;
use uuid::Uuid;

#[test]
fn actions_parse_from_tagged_json() {
    let action: Action = serde_json::from_value(json!({
        "feature": "flashcards",
        "action": { "type": "fetch_requested" }
    }))
    .unwrap();
    assert_eq!(action, Action::Flashcards(FlashcardsAction::FetchRequested));
    assert_eq!(action.feature(), "flashcards");
}

#[test]
fn courses_fetch_defaults_to_first_page() {
    let action: Action = serde_json::from_value(json!({
        "feature": "courses",
        "action": { "type": "fetch_requested" }
    }))
    .unwrap();
    assert_eq!(action, Action::Courses(CoursesAction::FetchRequested { page: 1 }));
}

#[test]
fn admin_actions_carry_resource_and_op() {
    let id = Uuid::new_v4();
    let action: Action = serde_json::from_value(json!({
        "feature": "admin",
        "action": {
            "resource": "words",
            "op": { "type": "deleted", "id": id }
        }
    }))
    .unwrap();
    assert_eq!(action, Action::Admin(AdminAction::Words(CrudAction::<Word>::Deleted { id })));
}

#[test]
fn feature_actions_convert_into_action() {
    let action: Action = WritingAction::DrawingCleared.into();
    assert_eq!(action.feature(), "writing");
}

#[test]
fn unknown_feature_is_rejected() {
    let result = serde_json::from_value::<Action>(json!({ "feature": "karaoke", "action": {} }));
    assert!(result.is_err());
}
