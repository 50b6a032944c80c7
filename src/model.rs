//! Domain records carried inside feature slices.
//!
//! These mirror the payloads the learning backend returns. They are plain
//! data: no behavior beyond small constructors used by fixtures and tests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A course in the catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    /// Target language, e.g. `"ja"`.
    pub language: String,
    /// CEFR-style level label, e.g. `"A1"`.
    pub level: String,
}

/// A lesson as listed under its course.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSummary {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    /// 1-based position within the course.
    pub position: u32,
}

/// Full lesson content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub position: u32,
    pub body: String,
}

impl Lesson {
    #[must_use]
    pub fn summary(&self) -> LessonSummary {
        LessonSummary { id: self.id, course_id: self.course_id, title: self.title.clone(), position: self.position }
    }
}

/// A vocabulary entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: Uuid,
    pub term: String,
    pub translation: String,
    #[serde(default)]
    pub reading: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// A named deck of flashcards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardSet {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Flashcard>,
}

impl FlashcardSet {
    /// Empty set with a fresh id.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), cards: Vec::new() }
    }
}

/// A character practiced in the writing screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub glyph: String,
    pub meaning: String,
    pub stroke_count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// One pen-down to pen-up path on the drawing canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
}

/// The signed-in learner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Learner,
    Editor,
    Admin,
}

/// A user account as managed from the admin screens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub role: Role,
}

/// Page position of a list screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: DEFAULT_PER_PAGE, total: 0 }
    }
}

impl Pagination {
    /// Number of pages needed for `total` items; at least one.
    #[must_use]
    pub fn page_count(&self) -> u64 {
        if self.per_page == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(self.per_page)).max(1)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.page_count()
    }
}

pub const DEFAULT_PER_PAGE: u32 = 20;
