//! Course catalogue slice.
//!
//! SYSTEM CONTEXT
//! ==============
//! Backs the course browser. `FetchRequested` flips the loading flag and is
//! picked up by `LoadCourses`, which answers with `FetchSucceeded` or
//! `FetchFailed` through the update queue.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::action::Action;
use crate::api::LearningApi;
use crate::error::StoreError;
use crate::model::{Course, Pagination};
use crate::registry::{Effect, Reducer};
use crate::slice::Slice;
use crate::store::{EffectContext, Store};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CoursesState {
    pub courses: Vec<Course>,
    pub loading: bool,
    pub error: Option<String>,
    pub pagination: Pagination,
}

impl Slice for CoursesState {
    const KEY: &'static str = "courses";

    fn initial() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoursesAction {
    FetchRequested {
        #[serde(default = "first_page")]
        page: u32,
    },
    FetchSucceeded {
        courses: Vec<Course>,
        pagination: Pagination,
    },
    FetchFailed {
        error: String,
    },
}

fn first_page() -> u32 {
    1
}

pub struct CoursesReducer;

impl Reducer for CoursesReducer {
    type Slice = CoursesState;

    fn reduce(&self, state: &CoursesState, action: &Action) -> Option<CoursesState> {
        let Action::Courses(action) = action else {
            return None;
        };
        match action {
            CoursesAction::FetchRequested { .. } => Some(CoursesState { loading: true, error: None, ..state.clone() }),
            CoursesAction::FetchSucceeded { courses, pagination } => {
                Some(CoursesState { courses: courses.clone(), loading: false, error: None, pagination: *pagination })
            }
            CoursesAction::FetchFailed { error } => {
                Some(CoursesState { loading: false, error: Some(error.clone()), ..state.clone() })
            }
        }
    }
}

pub struct LoadCourses {
    api: Arc<dyn LearningApi>,
}

impl LoadCourses {
    pub fn new(api: Arc<dyn LearningApi>) -> Self {
        Self { api }
    }
}

impl Effect for LoadCourses {
    fn on_action(&self, action: &Action, ctx: &EffectContext) {
        let Action::Courses(CoursesAction::FetchRequested { page }) = action else {
            return;
        };
        let api = Arc::clone(&self.api);
        let page = *page;
        ctx.spawn(async move {
            let outcome = match api.fetch_courses(page).await {
                Ok((courses, pagination)) => CoursesAction::FetchSucceeded { courses, pagination },
                Err(e) => {
                    warn!(error = %e, page, "course fetch failed");
                    CoursesAction::FetchFailed { error: e.to_string() }
                }
            };
            vec![outcome.into()]
        });
    }
}

crate::field_selectors! {
    /// The courses slice, or its default when not injected.
    domain select_courses_domain(COURSES): CoursesState;
    select_courses_data: Vec<Course> = |s| s.courses.clone();
    select_courses_loading: bool = |s| s.loading;
    select_courses_error: Option<String> = |s| s.error.clone();
    select_courses_pagination: Pagination = |s| s.pagination;
}

/// Inject the courses reducer and loader.
///
/// # Errors
///
/// Propagates [`StoreError::SliceTypeMismatch`] from reducer injection.
pub fn install(store: &Store, api: Arc<dyn LearningApi>) -> Result<(), StoreError> {
    store.inject_reducer(CoursesReducer)?;
    store.inject_effect(CoursesState::KEY, LoadCourses::new(api));
    Ok(())
}
