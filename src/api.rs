//! Learning backend boundary.
//!
//! DESIGN
//! ======
//! Effects talk to the backend through the `LearningApi` trait so the store
//! never depends on a concrete HTTP client. `InMemoryApi` serves a JSON
//! fixture and backs the CLI and the tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Course, DEFAULT_PER_PAGE, FlashcardSet, Lesson, LessonSummary, Pagination, Word};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait LearningApi: Send + Sync {
    /// One page of the course catalogue. `page` is 1-based.
    async fn fetch_courses(&self, page: u32) -> Result<(Vec<Course>, Pagination), ApiError>;

    /// Lessons of a course, ordered by position.
    async fn fetch_lessons(&self, course_id: Uuid) -> Result<Vec<LessonSummary>, ApiError>;

    /// Lesson content plus the vocabulary it introduces.
    async fn fetch_lesson(&self, lesson_id: Uuid) -> Result<(Lesson, Vec<Word>), ApiError>;

    async fn fetch_flashcard_sets(&self) -> Result<Vec<FlashcardSet>, ApiError>;

    /// Words whose term or translation contains `query`, case-insensitively.
    async fn search_vocabulary(&self, query: &str) -> Result<Vec<Word>, ApiError>;
}

// =============================================================================
// FIXTURE BACKEND
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRecord {
    #[serde(flatten)]
    pub lesson: Lesson,
    #[serde(default)]
    pub vocabulary: Vec<Word>,
}

/// Backend content loaded from JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub lessons: Vec<LessonRecord>,
    #[serde(default)]
    pub flashcard_sets: Vec<FlashcardSet>,
    /// Words searchable on their own, in addition to lesson vocabulary.
    #[serde(default)]
    pub words: Vec<Word>,
}

pub struct InMemoryApi {
    fixture: Fixture,
    per_page: u32,
    lesson_index: HashMap<Uuid, usize>,
}

impl InMemoryApi {
    #[must_use]
    pub fn new(fixture: Fixture) -> Self {
        let lesson_index = fixture.lessons.iter().enumerate().map(|(i, r)| (r.lesson.id, i)).collect();
        Self { fixture, per_page: DEFAULT_PER_PAGE, lesson_index }
    }

    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Parse a fixture from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }
}

#[async_trait]
impl LearningApi for InMemoryApi {
    async fn fetch_courses(&self, page: u32) -> Result<(Vec<Course>, Pagination), ApiError> {
        let page = page.max(1);
        let per_page = self.per_page as usize;
        let start = (page as usize - 1).saturating_mul(per_page);
        let courses = self.fixture.courses.iter().skip(start).take(per_page).cloned().collect();
        let pagination = Pagination { page, per_page: self.per_page, total: self.fixture.courses.len() as u64 };
        Ok((courses, pagination))
    }

    async fn fetch_lessons(&self, course_id: Uuid) -> Result<Vec<LessonSummary>, ApiError> {
        if !self.fixture.courses.iter().any(|c| c.id == course_id) {
            return Err(ApiError::NotFound { kind: "course", id: course_id });
        }
        let mut lessons: Vec<LessonSummary> = self
            .fixture
            .lessons
            .iter()
            .filter(|r| r.lesson.course_id == course_id)
            .map(|r| r.lesson.summary())
            .collect();
        lessons.sort_by_key(|l| l.position);
        Ok(lessons)
    }

    async fn fetch_lesson(&self, lesson_id: Uuid) -> Result<(Lesson, Vec<Word>), ApiError> {
        let record = self
            .lesson_index
            .get(&lesson_id)
            .and_then(|&i| self.fixture.lessons.get(i))
            .ok_or(ApiError::NotFound { kind: "lesson", id: lesson_id })?;
        Ok((record.lesson.clone(), record.vocabulary.clone()))
    }

    async fn fetch_flashcard_sets(&self) -> Result<Vec<FlashcardSet>, ApiError> {
        Ok(self.fixture.flashcard_sets.clone())
    }

    async fn search_vocabulary(&self, query: &str) -> Result<Vec<Word>, ApiError> {
        let needle = query.trim().to_lowercase();
        let mut seen = std::collections::HashSet::new();
        let words = self
            .fixture
            .words
            .iter()
            .chain(self.fixture.lessons.iter().flat_map(|r| r.vocabulary.iter()))
            .filter(|w| word_matches(w, &needle))
            .filter(|w| seen.insert(w.id))
            .cloned()
            .collect();
        Ok(words)
    }
}

/// Case-insensitive containment on term, translation, or reading.
/// `needle` must already be lowercase; an empty needle matches everything.
pub(crate) fn word_matches(word: &Word, needle: &str) -> bool {
    needle.is_empty()
        || word.term.to_lowercase().contains(needle)
        || word.translation.to_lowercase().contains(needle)
        || word.reading.as_deref().is_some_and(|r| r.to_lowercase().contains(needle))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
