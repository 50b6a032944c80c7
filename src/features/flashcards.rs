//! Flashcard decks and the study session over one of them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::action::Action;
use crate::api::LearningApi;
use crate::error::StoreError;
use crate::model::{Flashcard, FlashcardSet};
use crate::registry::{Effect, Reducer};
use crate::slice::Slice;
use crate::store::{EffectContext, Store};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FlashcardsState {
    pub flashcard_sets: Vec<FlashcardSet>,
    /// Set opened for study, if any.
    pub active_set_id: Option<Uuid>,
    /// Position within the active set.
    pub card_index: usize,
    /// Whether the back of the current card is shown.
    pub revealed: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl Slice for FlashcardsState {
    const KEY: &'static str = "flashcards";

    fn initial() -> Self {
        Self::default()
    }
}

impl FlashcardsState {
    fn active_set(&self) -> Option<&FlashcardSet> {
        let id = self.active_set_id?;
        self.flashcard_sets.iter().find(|s| s.id == id)
    }

    fn active_len(&self) -> usize {
        self.active_set().map_or(0, |s| s.cards.len())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlashcardsAction {
    FetchRequested,
    FetchSucceeded { sets: Vec<FlashcardSet> },
    FetchFailed { error: String },
    SetOpened { set_id: Uuid },
    CardFlipped,
    NextCard,
    PreviousCard,
}

pub struct FlashcardsReducer;

impl Reducer for FlashcardsReducer {
    type Slice = FlashcardsState;

    fn reduce(&self, state: &FlashcardsState, action: &Action) -> Option<FlashcardsState> {
        let Action::Flashcards(action) = action else {
            return None;
        };
        match action {
            FlashcardsAction::FetchRequested => Some(FlashcardsState { loading: true, error: None, ..state.clone() }),
            FlashcardsAction::FetchSucceeded { sets } => {
                let mut next = FlashcardsState { flashcard_sets: sets.clone(), loading: false, error: None, ..state.clone() };
                // The open set may have vanished from the refreshed list.
                if next.active_set().is_none() {
                    next.active_set_id = None;
                    next.card_index = 0;
                    next.revealed = false;
                }
                Some(next)
            }
            FlashcardsAction::FetchFailed { error } => {
                Some(FlashcardsState { loading: false, error: Some(error.clone()), ..state.clone() })
            }
            FlashcardsAction::SetOpened { set_id } => {
                if !state.flashcard_sets.iter().any(|s| s.id == *set_id) {
                    return None;
                }
                Some(FlashcardsState { active_set_id: Some(*set_id), card_index: 0, revealed: false, ..state.clone() })
            }
            FlashcardsAction::CardFlipped => {
                state.active_set_id?;
                Some(FlashcardsState { revealed: !state.revealed, ..state.clone() })
            }
            FlashcardsAction::NextCard => {
                let len = state.active_len();
                if len == 0 {
                    return None;
                }
                Some(FlashcardsState { card_index: (state.card_index + 1) % len, revealed: false, ..state.clone() })
            }
            FlashcardsAction::PreviousCard => {
                let len = state.active_len();
                if len == 0 {
                    return None;
                }
                Some(FlashcardsState { card_index: (state.card_index + len - 1) % len, revealed: false, ..state.clone() })
            }
        }
    }
}

pub struct LoadFlashcards {
    api: Arc<dyn LearningApi>,
}

impl LoadFlashcards {
    pub fn new(api: Arc<dyn LearningApi>) -> Self {
        Self { api }
    }
}

impl Effect for LoadFlashcards {
    fn on_action(&self, action: &Action, ctx: &EffectContext) {
        if !matches!(action, Action::Flashcards(FlashcardsAction::FetchRequested)) {
            return;
        }
        let api = Arc::clone(&self.api);
        ctx.spawn(async move {
            let outcome = match api.fetch_flashcard_sets().await {
                Ok(sets) => FlashcardsAction::FetchSucceeded { sets },
                Err(e) => {
                    warn!(error = %e, "flashcard fetch failed");
                    FlashcardsAction::FetchFailed { error: e.to_string() }
                }
            };
            vec![outcome.into()]
        });
    }
}

crate::field_selectors! {
    domain select_flashcards_domain(FLASHCARDS): FlashcardsState;
    /// All loaded sets.
    select_flashcards_data: Vec<FlashcardSet> = |s| s.flashcard_sets.clone();
    select_flashcards_loading: bool = |s| s.loading;
    select_flashcards_error: Option<String> = |s| s.error.clone();
    select_active_set: Option<FlashcardSet> = |s| s.active_set().cloned();
    select_card_index: usize = |s| s.card_index;
    select_card_revealed: bool = |s| s.revealed;
    /// Card under study, `None` when no set is open or the set is empty.
    select_current_card: Option<Flashcard> = |s| s.active_set().and_then(|set| set.cards.get(s.card_index)).cloned();
}

/// Inject the flashcards reducer and loader.
///
/// # Errors
///
/// Propagates [`StoreError::SliceTypeMismatch`] from reducer injection.
pub fn install(store: &Store, api: Arc<dyn LearningApi>) -> Result<(), StoreError> {
    store.inject_reducer(FlashcardsReducer)?;
    store.inject_effect(FlashcardsState::KEY, LoadFlashcards::new(api));
    Ok(())
}

#[cfg(test)]
#[path = "flashcards_test.rs"]
mod tests;
