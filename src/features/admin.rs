//! Administrative CRUD screens.
//!
//! DESIGN
//! ======
//! Every admin screen is the same list/detail editor over a different record
//! type, so one generic `CrudState<T>` slice and one `CrudReducer<T>` serve
//! all of them. Each record type picks its slice key and the action variant
//! that carries its operations through `AdminEntity`.
//!
//! No effect answers admin requests: `LearningApi` has no admin endpoints.
//! The host that performs the request dispatches the outcome itself
//! (`FetchSucceeded`/`FetchFailed` after `FetchRequested`, `Saved`/`SaveFailed`
//! after `SaveRequested`); until then `loading` or `saving` stays set.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::Action;
use crate::error::StoreError;
use crate::model::{AdminUser, Course, FlashcardSet, LessonSummary, Pagination, Word};
use crate::registry::Reducer;
use crate::slice::Slice;
use crate::store::Store;

/// A record type editable from an admin screen.
pub trait AdminEntity: Clone + PartialEq + fmt::Debug + Send + Sync + Serialize + 'static {
    const SLICE_KEY: &'static str;

    fn id(&self) -> Uuid;

    /// The CRUD operation carried by `action` for this record type, if any.
    fn crud_action(action: &Action) -> Option<&CrudAction<Self>>;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CrudState<T> {
    pub items: Vec<T>,
    pub selected_id: Option<Uuid>,
    pub pagination: Pagination,
    pub loading: bool,
    /// A create or update is in flight.
    pub saving: bool,
    pub error: Option<String>,
}

impl<T> Default for CrudState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected_id: None,
            pagination: Pagination::default(),
            loading: false,
            saving: false,
            error: None,
        }
    }
}

impl<T: AdminEntity> CrudState<T> {
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        let id = self.selected_id?;
        self.items.iter().find(|item| item.id() == id)
    }
}

impl<T: AdminEntity> Slice for CrudState<T> {
    const KEY: &'static str = T::SLICE_KEY;

    fn initial() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CrudAction<T> {
    /// Marks the list as loading. The host answers with `FetchSucceeded` or
    /// `FetchFailed`.
    FetchRequested { page: u32 },
    FetchSucceeded { items: Vec<T>, pagination: Pagination },
    FetchFailed { error: String },
    /// Marks a save in flight. The host answers with `Saved` or `SaveFailed`.
    SaveRequested { item: T },
    /// Create or update confirmed by the backend; upserts by id.
    Saved { item: T },
    SaveFailed { error: String },
    Deleted { id: Uuid },
    Selected { id: Option<Uuid> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resource", content = "op", rename_all = "snake_case")]
pub enum AdminAction {
    Users(CrudAction<AdminUser>),
    Courses(CrudAction<Course>),
    Lessons(CrudAction<LessonSummary>),
    Words(CrudAction<Word>),
    FlashcardSets(CrudAction<FlashcardSet>),
}

macro_rules! admin_entity {
    ($ty:ty, $key:literal, $variant:ident, |$item:ident| $id:expr) => {
        impl AdminEntity for $ty {
            const SLICE_KEY: &'static str = $key;

            fn id(&self) -> Uuid {
                let $item = self;
                $id
            }

            fn crud_action(action: &Action) -> Option<&CrudAction<Self>> {
                match action {
                    Action::Admin(AdminAction::$variant(op)) => Some(op),
                    _ => None,
                }
            }
        }
    };
}

admin_entity!(AdminUser, "adminUsers", Users, |u| u.id);
admin_entity!(Course, "adminCourses", Courses, |c| c.id);
admin_entity!(LessonSummary, "adminLessons", Lessons, |l| l.id);
admin_entity!(Word, "adminWords", Words, |w| w.id);
admin_entity!(FlashcardSet, "adminFlashcardSets", FlashcardSets, |f| f.id);

pub struct CrudReducer<T>(PhantomData<fn() -> T>);

impl<T> CrudReducer<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for CrudReducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: AdminEntity> Reducer for CrudReducer<T> {
    type Slice = CrudState<T>;

    fn reduce(&self, state: &CrudState<T>, action: &Action) -> Option<CrudState<T>> {
        let op = T::crud_action(action)?;
        let mut next = state.clone();
        match op {
            CrudAction::FetchRequested { .. } => {
                next.loading = true;
                next.error = None;
            }
            CrudAction::FetchSucceeded { items, pagination } => {
                next.items.clone_from(items);
                next.pagination = *pagination;
                next.loading = false;
                next.error = None;
                if next.selected().is_none() {
                    next.selected_id = None;
                }
            }
            CrudAction::FetchFailed { error } => {
                next.loading = false;
                next.error = Some(error.clone());
            }
            CrudAction::SaveRequested { .. } => {
                next.saving = true;
                next.error = None;
            }
            CrudAction::Saved { item } => {
                match next.items.iter_mut().find(|existing| existing.id() == item.id()) {
                    Some(existing) => existing.clone_from(item),
                    None => {
                        next.items.push(item.clone());
                        next.pagination.total += 1;
                    }
                }
                next.saving = false;
            }
            CrudAction::SaveFailed { error } => {
                next.saving = false;
                next.error = Some(error.clone());
            }
            CrudAction::Deleted { id } => {
                let before = next.items.len();
                next.items.retain(|item| item.id() != *id);
                if next.items.len() == before {
                    return None;
                }
                next.pagination.total = next.pagination.total.saturating_sub(1);
                if next.selected_id == Some(*id) {
                    next.selected_id = None;
                }
            }
            CrudAction::Selected { id } => {
                if id.is_some_and(|id| !state.items.iter().any(|item| item.id() == id)) {
                    return None;
                }
                next.selected_id = *id;
            }
        }
        Some(next)
    }
}

macro_rules! admin_selectors {
    ($entity:ty, $domain:ident, $resolver:ident, $data:ident, $selected:ident, $loading:ident, $saving:ident, $error:ident, $pagination:ident) => {
        crate::field_selectors! {
            domain $domain($resolver): CrudState<$entity>;
            $data: Vec<$entity> = |s| s.items.clone();
            $selected: Option<$entity> = |s| s.selected().cloned();
            $loading: bool = |s| s.loading;
            $saving: bool = |s| s.saving;
            $error: Option<String> = |s| s.error.clone();
            $pagination: Pagination = |s| s.pagination;
        }
    };
}

admin_selectors!(
    AdminUser,
    select_admin_users_domain,
    ADMIN_USERS,
    select_admin_users_data,
    select_admin_users_selected,
    select_admin_users_loading,
    select_admin_users_saving,
    select_admin_users_error,
    select_admin_users_pagination
);
admin_selectors!(
    Course,
    select_admin_courses_domain,
    ADMIN_COURSES,
    select_admin_courses_data,
    select_admin_courses_selected,
    select_admin_courses_loading,
    select_admin_courses_saving,
    select_admin_courses_error,
    select_admin_courses_pagination
);
admin_selectors!(
    LessonSummary,
    select_admin_lessons_domain,
    ADMIN_LESSONS,
    select_admin_lessons_data,
    select_admin_lessons_selected,
    select_admin_lessons_loading,
    select_admin_lessons_saving,
    select_admin_lessons_error,
    select_admin_lessons_pagination
);
admin_selectors!(
    Word,
    select_admin_words_domain,
    ADMIN_WORDS,
    select_admin_words_data,
    select_admin_words_selected,
    select_admin_words_loading,
    select_admin_words_saving,
    select_admin_words_error,
    select_admin_words_pagination
);
admin_selectors!(
    FlashcardSet,
    select_admin_flashcard_sets_domain,
    ADMIN_FLASHCARD_SETS,
    select_admin_flashcard_sets_data,
    select_admin_flashcard_sets_selected,
    select_admin_flashcard_sets_loading,
    select_admin_flashcard_sets_saving,
    select_admin_flashcard_sets_error,
    select_admin_flashcard_sets_pagination
);

/// Inject the reducers of every admin screen.
///
/// # Errors
///
/// Propagates [`StoreError::SliceTypeMismatch`] from reducer injection.
pub fn install(store: &Store) -> Result<(), StoreError> {
    store.inject_reducer(CrudReducer::<AdminUser>::new())?;
    store.inject_reducer(CrudReducer::<Course>::new())?;
    store.inject_reducer(CrudReducer::<LessonSummary>::new())?;
    store.inject_reducer(CrudReducer::<Word>::new())?;
    store.inject_reducer(CrudReducer::<FlashcardSet>::new())?;
    Ok(())
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
