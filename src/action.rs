//! The closed set of actions understood by the store.
//!
//! Actions serialize as `{"feature": "...", "action": {"type": "...", ...}}`
//! so scripts and logs stay readable.

use serde::{Deserialize, Serialize};

use crate::features::admin::AdminAction;
use crate::features::auth::AuthAction;
use crate::features::courses::CoursesAction;
use crate::features::flashcards::FlashcardsAction;
use crate::features::lesson::LessonAction;
use crate::features::lessons::LessonsAction;
use crate::features::progress::ProgressAction;
use crate::features::vocabulary::VocabularyAction;
use crate::features::writing::WritingAction;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "feature", content = "action", rename_all = "snake_case")]
pub enum Action {
    Auth(AuthAction),
    Courses(CoursesAction),
    Lessons(LessonsAction),
    Lesson(LessonAction),
    Flashcards(FlashcardsAction),
    Vocabulary(VocabularyAction),
    Writing(WritingAction),
    Progress(ProgressAction),
    Admin(AdminAction),
}

impl Action {
    /// Feature the action belongs to, for logging.
    #[must_use]
    pub fn feature(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Courses(_) => "courses",
            Self::Lessons(_) => "lessons",
            Self::Lesson(_) => "lesson",
            Self::Flashcards(_) => "flashcards",
            Self::Vocabulary(_) => "vocabulary",
            Self::Writing(_) => "writing",
            Self::Progress(_) => "progress",
            Self::Admin(_) => "admin",
        }
    }
}

macro_rules! impl_from_feature_action {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for Action {
                fn from(action: $ty) -> Self {
                    Self::$variant(action)
                }
            }
        )+
    };
}

impl_from_feature_action!(
    Auth(AuthAction),
    Courses(CoursesAction),
    Lessons(LessonsAction),
    Lesson(LessonAction),
    Flashcards(FlashcardsAction),
    Vocabulary(VocabularyAction),
    Writing(WritingAction),
    Progress(ProgressAction),
    Admin(AdminAction),
);

#[cfg(test)]
#[path = "action_test.rs"]
mod tests;
