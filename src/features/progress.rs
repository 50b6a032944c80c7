//! Learner progress: completed lessons, experience points, streak.

use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::Action;
use crate::error::StoreError;
use crate::features::lesson::{LessonState, select_lesson_domain};
use crate::registry::Reducer;
use crate::select::{Combined, Select, SelectorFn};
use crate::slice::Slice;
use crate::store::Store;
use crate::tree::StateTree;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProgressState {
    /// Completed lesson ids in completion order, without duplicates.
    pub completed_lessons: Vec<Uuid>,
    pub xp: u64,
    pub streak_days: u32,
}

impl Slice for ProgressState {
    const KEY: &'static str = "progress";

    fn initial() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressAction {
    LessonCompleted { lesson_id: Uuid, xp: u64 },
    StreakUpdated { days: u32 },
    Reset,
}

pub struct ProgressReducer;

impl Reducer for ProgressReducer {
    type Slice = ProgressState;

    fn reduce(&self, state: &ProgressState, action: &Action) -> Option<ProgressState> {
        let Action::Progress(action) = action else {
            return None;
        };
        match action {
            // Repeating a lesson earns nothing.
            ProgressAction::LessonCompleted { lesson_id, .. } if state.completed_lessons.contains(lesson_id) => None,
            ProgressAction::LessonCompleted { lesson_id, xp } => {
                let mut next = state.clone();
                next.completed_lessons.push(*lesson_id);
                next.xp = next.xp.saturating_add(*xp);
                Some(next)
            }
            ProgressAction::StreakUpdated { days } => Some(ProgressState { streak_days: *days, ..state.clone() }),
            ProgressAction::Reset => Some(ProgressState::initial()),
        }
    }
}

crate::field_selectors! {
    domain select_progress_domain(PROGRESS): ProgressState;
    select_completed_lessons: Vec<Uuid> = |s| s.completed_lessons.clone();
    select_xp: u64 = |s| s.xp;
    select_streak_days: u32 = |s| s.streak_days;
}

/// Whether the open lesson is already completed. `false` while no lesson is
/// loaded.
pub fn select_lesson_completed(state: &StateTree) -> Arc<bool> {
    static SELECTOR: LazyLock<Combined<SelectorFn<LessonState>, SelectorFn<ProgressState>, bool>> =
        LazyLock::new(|| {
            Combined::new(
                select_lesson_domain as SelectorFn<LessonState>,
                select_progress_domain as SelectorFn<ProgressState>,
                |lesson, progress| lesson.lesson.as_ref().is_some_and(|l| progress.completed_lessons.contains(&l.id)),
            )
        });
    SELECTOR.select(state)
}

/// Inject the progress reducer.
///
/// # Errors
///
/// Propagates [`StoreError::SliceTypeMismatch`] from reducer injection.
pub fn install(store: &Store) -> Result<(), StoreError> {
    store.inject_reducer(ProgressReducer)?;
    Ok(())
}

#[cfg(test)]
#[path = "progress_test.rs"]
mod tests;
