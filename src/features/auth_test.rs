use super::*;
use crate::tree::StateTree;
use uuid::Uuid;

fn user() -> User {
    User { id: Uuid::new_v4(), email: "ana@example.com".into(), display_name: "Ana".into() }
}

fn reduce(state: &AuthState, action: AuthAction) -> Option<AuthState> {
    AuthReducer.reduce(state, &action.into())
}

#[test]
fn login_then_logout() {
    let requested = reduce(&AuthState::initial(), AuthAction::LoginRequested { email: "ana@example.com".into() }).unwrap();
    let signed_in = reduce(&requested, AuthAction::LoginSucceeded { user: user(), token: "t0k".into() }).unwrap();

    let tree = StateTree::new().with_slice(signed_in.clone());
    assert!(*select_is_authenticated(&tree));
    assert_eq!(select_auth_token(&tree).as_deref(), Some("t0k"));

    assert_eq!(reduce(&signed_in, AuthAction::LoggedOut), Some(AuthState::initial()));
}

#[test]
fn failed_login_clears_session() {
    let failed = reduce(&AuthState::initial(), AuthAction::LoginFailed { error: "bad password".into() }).unwrap();
    let tree = StateTree::new().with_slice(failed);
    assert!(!*select_is_authenticated(&tree));
    assert_eq!(select_auth_error(&tree).as_deref(), Some("bad password"));
}

#[test]
fn token_is_not_serialized() {
    let state = AuthState { user: Some(user()), token: Some("secret".into()), ..AuthState::initial() };
    let json = serde_json::to_value(&state).unwrap();
    assert!(json.get("token").is_none());
}
