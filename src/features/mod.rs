//! Feature slices of the learning application.
//!
//! DESIGN
//! ======
//! State is split by feature (`courses`, `lesson`, `flashcards`, etc.) so each
//! screen depends on a small, focused record. Every feature module owns its
//! slice type and default, its actions and reducer, its selectors, and an
//! `install` function that registers it with a store on first use.

pub mod admin;
pub mod auth;
pub mod courses;
pub mod flashcards;
pub mod lesson;
pub mod lessons;
pub mod progress;
pub mod vocabulary;
pub mod writing;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::api::LearningApi;
use crate::error::StoreError;
use crate::model::{AdminUser, Course, FlashcardSet, LessonSummary, Word};
use crate::slice::Slice;
use crate::store::Store;

/// Install every feature. Safe to call more than once.
///
/// # Errors
///
/// Propagates [`StoreError::SliceTypeMismatch`] from reducer injection.
pub fn install_all(store: &Store, api: Arc<dyn LearningApi>) -> Result<(), StoreError> {
    auth::install(store)?;
    courses::install(store, Arc::clone(&api))?;
    lessons::install(store, Arc::clone(&api))?;
    lesson::install(store, Arc::clone(&api))?;
    flashcards::install(store, Arc::clone(&api))?;
    vocabulary::install(store, api)?;
    writing::install(store)?;
    progress::install(store)?;
    admin::install(store)?;
    Ok(())
}

/// Every feature's default slice as JSON, keyed by slice key.
///
/// # Errors
///
/// Returns the `serde_json` error if a slice fails to serialize.
pub fn default_slices() -> Result<Value, serde_json::Error> {
    fn put<S: Slice + serde::Serialize>(map: &mut Map<String, Value>) -> Result<(), serde_json::Error> {
        map.insert(S::KEY.to_string(), serde_json::to_value(S::initial())?);
        Ok(())
    }

    let mut map = Map::new();
    put::<auth::AuthState>(&mut map)?;
    put::<courses::CoursesState>(&mut map)?;
    put::<lessons::LessonsState>(&mut map)?;
    put::<lesson::LessonState>(&mut map)?;
    put::<flashcards::FlashcardsState>(&mut map)?;
    put::<vocabulary::VocabularyState>(&mut map)?;
    put::<writing::WritingState>(&mut map)?;
    put::<progress::ProgressState>(&mut map)?;
    put::<admin::CrudState<AdminUser>>(&mut map)?;
    put::<admin::CrudState<Course>>(&mut map)?;
    put::<admin::CrudState<LessonSummary>>(&mut map)?;
    put::<admin::CrudState<Word>>(&mut map)?;
    put::<admin::CrudState<FlashcardSet>>(&mut map)?;
    Ok(Value::Object(map))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
