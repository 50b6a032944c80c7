//! Lesson detail slice: the open lesson and the vocabulary it introduces.
//!
//! The default slice is `loading: true`: the lesson screen requests its
//! content on mount, so an uninitialized slice reads as a pending fetch.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::action::Action;
use crate::api::LearningApi;
use crate::error::StoreError;
use crate::model::{Lesson, Word};
use crate::registry::{Effect, Reducer};
use crate::slice::Slice;
use crate::store::{EffectContext, Store};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LessonState {
    /// Lesson most recently requested; responses for any other id are stale.
    pub requested_id: Option<Uuid>,
    pub lesson: Option<Lesson>,
    pub vocabulary: Vec<Word>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Slice for LessonState {
    const KEY: &'static str = "lesson";

    fn initial() -> Self {
        Self { requested_id: None, lesson: None, vocabulary: Vec::new(), loading: true, error: None }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LessonAction {
    FetchRequested { lesson_id: Uuid },
    FetchSucceeded { lesson: Lesson, vocabulary: Vec<Word> },
    FetchFailed { lesson_id: Uuid, error: String },
    /// Leave the lesson screen; back to the default slice.
    Cleared,
}

pub struct LessonReducer;

impl Reducer for LessonReducer {
    type Slice = LessonState;

    fn reduce(&self, state: &LessonState, action: &Action) -> Option<LessonState> {
        let Action::Lesson(action) = action else {
            return None;
        };
        match action {
            LessonAction::FetchRequested { lesson_id } => Some(LessonState {
                requested_id: Some(*lesson_id),
                lesson: None,
                vocabulary: Vec::new(),
                loading: true,
                error: None,
            }),
            // Answers for a lesson the user already navigated away from are stale.
            LessonAction::FetchSucceeded { lesson, .. } if state.requested_id != Some(lesson.id) => None,
            LessonAction::FetchFailed { lesson_id, .. } if state.requested_id != Some(*lesson_id) => None,
            LessonAction::FetchSucceeded { lesson, vocabulary } => Some(LessonState {
                lesson: Some(lesson.clone()),
                vocabulary: vocabulary.clone(),
                loading: false,
                error: None,
                ..state.clone()
            }),
            LessonAction::FetchFailed { error, .. } => {
                Some(LessonState { loading: false, error: Some(error.clone()), ..state.clone() })
            }
            LessonAction::Cleared => Some(LessonState::initial()),
        }
    }
}

pub struct LoadLesson {
    api: Arc<dyn LearningApi>,
}

impl LoadLesson {
    pub fn new(api: Arc<dyn LearningApi>) -> Self {
        Self { api }
    }
}

impl Effect for LoadLesson {
    fn on_action(&self, action: &Action, ctx: &EffectContext) {
        let Action::Lesson(LessonAction::FetchRequested { lesson_id }) = action else {
            return;
        };
        let api = Arc::clone(&self.api);
        let lesson_id = *lesson_id;
        ctx.spawn(async move {
            let outcome = match api.fetch_lesson(lesson_id).await {
                Ok((lesson, vocabulary)) => LessonAction::FetchSucceeded { lesson, vocabulary },
                Err(e) => {
                    warn!(error = %e, %lesson_id, "lesson fetch failed");
                    LessonAction::FetchFailed { lesson_id, error: e.to_string() }
                }
            };
            vec![outcome.into()]
        });
    }
}

crate::field_selectors! {
    domain select_lesson_domain(LESSON): LessonState;
    select_lesson_data: Option<Lesson> = |s| s.lesson.clone();
    select_lesson_vocabulary: Vec<Word> = |s| s.vocabulary.clone();
    select_lesson_loading: bool = |s| s.loading;
    select_lesson_error: Option<String> = |s| s.error.clone();
    /// Id of the open lesson, once loaded.
    select_lesson_id: Option<Uuid> = |s| s.lesson.as_ref().map(|l| l.id);
}

/// Inject the lesson reducer and loader.
///
/// # Errors
///
/// Propagates [`StoreError::SliceTypeMismatch`] from reducer injection.
pub fn install(store: &Store, api: Arc<dyn LearningApi>) -> Result<(), StoreError> {
    store.inject_reducer(LessonReducer)?;
    store.inject_effect(LessonState::KEY, LoadLesson::new(api));
    Ok(())
}

#[cfg(test)]
#[path = "lesson_test.rs"]
mod tests;
