//! Lesson list of the selected course.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::action::Action;
use crate::api::LearningApi;
use crate::error::StoreError;
use crate::model::LessonSummary;
use crate::registry::{Effect, Reducer};
use crate::slice::Slice;
use crate::store::{EffectContext, Store};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LessonsState {
    pub course_id: Option<Uuid>,
    pub lessons: Vec<LessonSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Slice for LessonsState {
    const KEY: &'static str = "lessons";

    fn initial() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LessonsAction {
    FetchRequested { course_id: Uuid },
    FetchSucceeded { course_id: Uuid, lessons: Vec<LessonSummary> },
    FetchFailed { course_id: Uuid, error: String },
}

pub struct LessonsReducer;

impl Reducer for LessonsReducer {
    type Slice = LessonsState;

    fn reduce(&self, state: &LessonsState, action: &Action) -> Option<LessonsState> {
        let Action::Lessons(action) = action else {
            return None;
        };
        match action {
            LessonsAction::FetchRequested { course_id } => {
                // Switching course drops the previous list.
                let lessons = if state.course_id == Some(*course_id) { state.lessons.clone() } else { Vec::new() };
                Some(LessonsState { course_id: Some(*course_id), lessons, loading: true, error: None })
            }
            // Answers for a course the user already navigated away from are stale.
            LessonsAction::FetchSucceeded { course_id, .. } | LessonsAction::FetchFailed { course_id, .. }
                if state.course_id != Some(*course_id) =>
            {
                None
            }
            LessonsAction::FetchSucceeded { lessons, .. } => {
                Some(LessonsState { lessons: lessons.clone(), loading: false, error: None, ..state.clone() })
            }
            LessonsAction::FetchFailed { error, .. } => {
                Some(LessonsState { loading: false, error: Some(error.clone()), ..state.clone() })
            }
        }
    }
}

pub struct LoadLessons {
    api: Arc<dyn LearningApi>,
}

impl LoadLessons {
    pub fn new(api: Arc<dyn LearningApi>) -> Self {
        Self { api }
    }
}

impl Effect for LoadLessons {
    fn on_action(&self, action: &Action, ctx: &EffectContext) {
        let Action::Lessons(LessonsAction::FetchRequested { course_id }) = action else {
            return;
        };
        let api = Arc::clone(&self.api);
        let course_id = *course_id;
        ctx.spawn(async move {
            let outcome = match api.fetch_lessons(course_id).await {
                Ok(lessons) => LessonsAction::FetchSucceeded { course_id, lessons },
                Err(e) => {
                    warn!(error = %e, %course_id, "lesson list fetch failed");
                    LessonsAction::FetchFailed { course_id, error: e.to_string() }
                }
            };
            vec![outcome.into()]
        });
    }
}

crate::field_selectors! {
    domain select_lessons_domain(LESSONS): LessonsState;
    select_lessons_data: Vec<LessonSummary> = |s| s.lessons.clone();
    select_lessons_course_id: Option<Uuid> = |s| s.course_id;
    select_lessons_loading: bool = |s| s.loading;
    select_lessons_error: Option<String> = |s| s.error.clone();
}

/// Inject the lesson list reducer and loader.
///
/// # Errors
///
/// Propagates [`StoreError::SliceTypeMismatch`] from reducer injection.
pub fn install(store: &Store, api: Arc<dyn LearningApi>) -> Result<(), StoreError> {
    store.inject_reducer(LessonsReducer)?;
    store.inject_effect(LessonsState::KEY, LoadLessons::new(api));
    Ok(())
}

#[cfg(test)]
#[path = "lessons_test.rs"]
mod tests;
