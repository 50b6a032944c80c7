//! Writing practice: the character being traced and the learner's strokes.
//!
//! An attempt is graded by how close the drawn stroke count is to the
//! character's expected stroke count.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::StoreError;
use crate::model::{Character, Stroke};
use crate::registry::Reducer;
use crate::slice::Slice;
use crate::store::Store;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WritingState {
    pub characters: Vec<Character>,
    pub current_character: Option<Character>,
    /// Strokes drawn for the current attempt, in drawing order.
    pub drawing_data: Vec<Stroke>,
    /// Score of the last submitted attempt, 0 to 100.
    pub score: Option<u8>,
}

impl Slice for WritingState {
    const KEY: &'static str = "writing";

    fn initial() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WritingAction {
    CharactersLoaded { characters: Vec<Character> },
    CharacterSelected { glyph: String },
    StrokeDrawn { stroke: Stroke },
    StrokeUndone,
    DrawingCleared,
    AttemptSubmitted,
}

/// Grade `drawn` strokes against `expected`; 100 means an exact match.
#[must_use]
pub fn score_attempt(drawn: usize, expected: u32) -> u8 {
    let expected = expected as usize;
    if drawn == 0 && expected == 0 {
        return 100;
    }
    let (lo, hi) = if drawn < expected { (drawn, expected) } else { (expected, drawn) };
    u8::try_from(lo * 100 / hi).unwrap_or(100)
}

pub struct WritingReducer;

impl Reducer for WritingReducer {
    type Slice = WritingState;

    fn reduce(&self, state: &WritingState, action: &Action) -> Option<WritingState> {
        let Action::Writing(action) = action else {
            return None;
        };
        match action {
            WritingAction::CharactersLoaded { characters } => {
                let current_character = state
                    .current_character
                    .as_ref()
                    .and_then(|c| characters.iter().find(|x| x.glyph == c.glyph))
                    .cloned();
                let drawing_data = if current_character.is_some() { state.drawing_data.clone() } else { Vec::new() };
                Some(WritingState { characters: characters.clone(), current_character, drawing_data, score: None })
            }
            WritingAction::CharacterSelected { glyph } => {
                let character = state.characters.iter().find(|c| &c.glyph == glyph)?.clone();
                Some(WritingState {
                    current_character: Some(character),
                    drawing_data: Vec::new(),
                    score: None,
                    ..state.clone()
                })
            }
            WritingAction::StrokeDrawn { stroke } => {
                state.current_character.as_ref()?;
                let mut next = state.clone();
                next.drawing_data.push(stroke.clone());
                next.score = None;
                Some(next)
            }
            WritingAction::StrokeUndone => {
                let mut next = state.clone();
                next.drawing_data.pop()?;
                next.score = None;
                Some(next)
            }
            WritingAction::DrawingCleared => {
                Some(WritingState { drawing_data: Vec::new(), score: None, ..state.clone() })
            }
            WritingAction::AttemptSubmitted => {
                let character = state.current_character.as_ref()?;
                let score = score_attempt(state.drawing_data.len(), character.stroke_count);
                Some(WritingState { score: Some(score), ..state.clone() })
            }
        }
    }
}

crate::field_selectors! {
    domain select_writing_domain(WRITING): WritingState;
    select_writing_characters: Vec<Character> = |s| s.characters.clone();
    select_current_character: Option<Character> = |s| s.current_character.clone();
    select_drawing_data: Vec<Stroke> = |s| s.drawing_data.clone();
    select_writing_score: Option<u8> = |s| s.score;
    select_stroke_count: usize = |s| s.drawing_data.len();
    /// Strokes still expected for the current character.
    select_strokes_remaining: u32 = |s| {
        let drawn = u32::try_from(s.drawing_data.len()).unwrap_or(u32::MAX);
        s.current_character.as_ref().map_or(0, |c| c.stroke_count.saturating_sub(drawn))
    };
}

/// Inject the writing reducer. Writing practice has no backend effect.
///
/// # Errors
///
/// Propagates [`StoreError::SliceTypeMismatch`] from reducer injection.
pub fn install(store: &Store) -> Result<(), StoreError> {
    store.inject_reducer(WritingReducer)?;
    Ok(())
}

#[cfg(test)]
#[path = "writing_test.rs"]
mod tests;
