//! Vocabulary browser: server-side search plus a local filter while typing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::action::Action;
use crate::api::{LearningApi, word_matches};
use crate::error::StoreError;
use crate::model::Word;
use crate::registry::{Effect, Reducer};
use crate::slice::Slice;
use crate::store::{EffectContext, Store};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VocabularyState {
    pub words: Vec<Word>,
    pub query: String,
    /// Query of the search in flight; responses for any other query are stale.
    pub pending_query: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Slice for VocabularyState {
    const KEY: &'static str = "vocabulary";

    fn initial() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VocabularyAction {
    /// Text typed into the search box; filters loaded words locally.
    QueryChanged { query: String },
    FetchRequested { query: String },
    FetchSucceeded { query: String, words: Vec<Word> },
    FetchFailed { query: String, error: String },
}

pub struct VocabularyReducer;

impl Reducer for VocabularyReducer {
    type Slice = VocabularyState;

    fn reduce(&self, state: &VocabularyState, action: &Action) -> Option<VocabularyState> {
        let Action::Vocabulary(action) = action else {
            return None;
        };
        match action {
            VocabularyAction::QueryChanged { query } => Some(VocabularyState { query: query.clone(), ..state.clone() }),
            VocabularyAction::FetchRequested { query } => Some(VocabularyState {
                query: query.clone(),
                pending_query: Some(query.clone()),
                loading: true,
                error: None,
                ..state.clone()
            }),
            // A newer search superseded this one; its own response clears `loading`.
            VocabularyAction::FetchSucceeded { query, .. } | VocabularyAction::FetchFailed { query, .. }
                if state.pending_query.as_ref() != Some(query) =>
            {
                None
            }
            VocabularyAction::FetchSucceeded { words, .. } => Some(VocabularyState {
                words: words.clone(),
                pending_query: None,
                loading: false,
                error: None,
                ..state.clone()
            }),
            VocabularyAction::FetchFailed { error, .. } => Some(VocabularyState {
                pending_query: None,
                loading: false,
                error: Some(error.clone()),
                ..state.clone()
            }),
        }
    }
}

pub struct SearchVocabulary {
    api: Arc<dyn LearningApi>,
}

impl SearchVocabulary {
    pub fn new(api: Arc<dyn LearningApi>) -> Self {
        Self { api }
    }
}

impl Effect for SearchVocabulary {
    fn on_action(&self, action: &Action, ctx: &EffectContext) {
        let Action::Vocabulary(VocabularyAction::FetchRequested { query }) = action else {
            return;
        };
        let api = Arc::clone(&self.api);
        let query = query.clone();
        ctx.spawn(async move {
            let outcome = match api.search_vocabulary(&query).await {
                Ok(words) => VocabularyAction::FetchSucceeded { query, words },
                Err(e) => {
                    warn!(error = %e, %query, "vocabulary search failed");
                    VocabularyAction::FetchFailed { query, error: e.to_string() }
                }
            };
            vec![outcome.into()]
        });
    }
}

crate::field_selectors! {
    domain select_vocabulary_domain(VOCABULARY): VocabularyState;
    select_vocabulary_data: Vec<Word> = |s| s.words.clone();
    select_vocabulary_query: String = |s| s.query.clone();
    select_vocabulary_loading: bool = |s| s.loading;
    select_vocabulary_error: Option<String> = |s| s.error.clone();
    /// Loaded words matching the current query.
    select_vocabulary_matches: Vec<Word> = |s| {
        let needle = s.query.trim().to_lowercase();
        s.words.iter().filter(|w| word_matches(w, &needle)).cloned().collect()
    };
}

/// Inject the vocabulary reducer and search effect.
///
/// # Errors
///
/// Propagates [`StoreError::SliceTypeMismatch`] from reducer injection.
pub fn install(store: &Store, api: Arc<dyn LearningApi>) -> Result<(), StoreError> {
    store.inject_reducer(VocabularyReducer)?;
    store.inject_effect(VocabularyState::KEY, SearchVocabulary::new(api));
    Ok(())
}

#[cfg(test)]
#[path = "vocabulary_test.rs"]
mod tests;
