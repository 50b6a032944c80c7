//! Session slice: who is signed in.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::StoreError;
use crate::model::User;
use crate::registry::Reducer;
use crate::slice::Slice;
use crate::store::Store;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AuthState {
    pub user: Option<User>,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Slice for AuthState {
    const KEY: &'static str = "auth";

    fn initial() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthAction {
    LoginRequested { email: String },
    LoginSucceeded { user: User, token: String },
    LoginFailed { error: String },
    LoggedOut,
}

pub struct AuthReducer;

impl Reducer for AuthReducer {
    type Slice = AuthState;

    fn reduce(&self, state: &AuthState, action: &Action) -> Option<AuthState> {
        let Action::Auth(action) = action else {
            return None;
        };
        match action {
            AuthAction::LoginRequested { .. } => Some(AuthState { loading: true, error: None, ..state.clone() }),
            AuthAction::LoginSucceeded { user, token } => {
                Some(AuthState { user: Some(user.clone()), token: Some(token.clone()), loading: false, error: None })
            }
            AuthAction::LoginFailed { error } => {
                Some(AuthState { user: None, token: None, loading: false, error: Some(error.clone()) })
            }
            AuthAction::LoggedOut => Some(AuthState::initial()),
        }
    }
}

crate::field_selectors! {
    domain select_auth_domain(AUTH): AuthState;
    select_auth_user: Option<User> = |s| s.user.clone();
    select_auth_token: Option<String> = |s| s.token.clone();
    select_auth_loading: bool = |s| s.loading;
    select_auth_error: Option<String> = |s| s.error.clone();
    select_is_authenticated: bool = |s| s.user.is_some() && s.token.is_some();
}

/// Inject the session reducer.
///
/// # Errors
///
/// Propagates [`StoreError::SliceTypeMismatch`] from reducer injection.
pub fn install(store: &Store) -> Result<(), StoreError> {
    store.inject_reducer(AuthReducer)?;
    Ok(())
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
