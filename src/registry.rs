//! Reducer and effect registry.
//!
//! DESIGN
//! ======
//! Features register their update logic on first use. Registration is a
//! presence check keyed by slice or effect name, so installing a feature
//! twice is harmless. Reducers are type-erased behind `ErasedReducer` so one
//! registry can hold every feature's slice type; the erased wrapper is also
//! where a slice of the wrong type is detected.
//!
//! Reducers run in injection order. A reducer returning `None`, or a value
//! equal to the current one, leaves its slice untouched: the slice `Arc` and
//! every selector cache keyed on it survive the dispatch.

use std::any::TypeId;
use std::sync::Arc;

use tracing::warn;

use crate::action::Action;
use crate::error::StoreError;
use crate::slice::Slice;
use crate::store::EffectContext;
use crate::tree::{SliceRef, StateTree};

/// Pure update logic for one slice.
pub trait Reducer: Send + Sync + 'static {
    type Slice: Slice;

    /// Return the next slice, or `None` when `action` does not change it.
    fn reduce(&self, slice: &Self::Slice, action: &Action) -> Option<Self::Slice>;
}

/// Background logic reacting to dispatched actions.
///
/// Effects run after the reducers, outside the write lock. Long-running work
/// goes through [`EffectContext::spawn`], whose resulting actions are fed back
/// through the store's update queue.
pub trait Effect: Send + Sync + 'static {
    fn on_action(&self, action: &Action, ctx: &EffectContext);
}

// =============================================================================
// TYPE ERASURE
// =============================================================================

pub(crate) trait ErasedReducer: Send + Sync {
    fn key(&self) -> &'static str;
    fn slice_type(&self) -> TypeId;
    fn reduce(&self, current: Option<&SliceRef>, action: &Action, strict: bool) -> Result<Option<SliceRef>, StoreError>;
}

struct TypedReducer<R>(R);

impl<R: Reducer> ErasedReducer for TypedReducer<R> {
    fn key(&self) -> &'static str {
        R::Slice::KEY
    }

    fn slice_type(&self) -> TypeId {
        TypeId::of::<R::Slice>()
    }

    fn reduce(&self, current: Option<&SliceRef>, action: &Action, strict: bool) -> Result<Option<SliceRef>, StoreError> {
        let Some(entry) = current else {
            let initial = R::Slice::initial();
            let next = self.0.reduce(&initial, action).unwrap_or(initial);
            return Ok(Some(Arc::new(next)));
        };
        match Arc::clone(entry).downcast::<R::Slice>() {
            Ok(slice) => Ok(self
                .0
                .reduce(&slice, action)
                .filter(|next| next != &*slice)
                .map(|next| Arc::new(next) as SliceRef)),
            Err(_) if strict => Err(StoreError::SliceTypeMismatch { key: R::Slice::KEY }),
            Err(_) => {
                warn!(key = R::Slice::KEY, "slice type mismatch; reducing from default");
                let initial = R::Slice::initial();
                let next = self.0.reduce(&initial, action).unwrap_or(initial);
                Ok(Some(Arc::new(next)))
            }
        }
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

#[derive(Default)]
pub struct Registry {
    reducers: Vec<Box<dyn ErasedReducer>>,
    effects: Vec<(&'static str, Arc<dyn Effect>)>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_reducer(&self, key: &str) -> bool {
        self.reducers.iter().any(|r| r.key() == key)
    }

    #[must_use]
    pub fn has_effect(&self, key: &str) -> bool {
        self.effects.iter().any(|(k, _)| *k == key)
    }

    /// Registered reducer keys in injection order.
    #[must_use]
    pub fn reducer_keys(&self) -> Vec<&'static str> {
        self.reducers.iter().map(|r| r.key()).collect()
    }

    /// Registered effect keys in injection order.
    #[must_use]
    pub fn effect_keys(&self) -> Vec<&'static str> {
        self.effects.iter().map(|(k, _)| *k).collect()
    }

    /// Register `reducer` unless its key is already taken.
    ///
    /// Returns `Ok(false)` when a reducer for the same slice type is present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SliceTypeMismatch`] when the key is held by a
    /// reducer for a different slice type.
    pub fn insert_reducer<R: Reducer>(&mut self, reducer: R) -> Result<bool, StoreError> {
        let key = R::Slice::KEY;
        if let Some(existing) = self.reducers.iter().find(|r| r.key() == key) {
            if existing.slice_type() == TypeId::of::<R::Slice>() {
                return Ok(false);
            }
            return Err(StoreError::SliceTypeMismatch { key });
        }
        self.reducers.push(Box::new(TypedReducer(reducer)));
        Ok(true)
    }

    pub fn remove_reducer(&mut self, key: &str) -> bool {
        let before = self.reducers.len();
        self.reducers.retain(|r| r.key() != key);
        self.reducers.len() != before
    }

    /// Register `effect` under `key` unless the key is already taken.
    pub fn insert_effect(&mut self, key: &'static str, effect: Arc<dyn Effect>) -> bool {
        if self.has_effect(key) {
            return false;
        }
        self.effects.push((key, effect));
        true
    }

    pub fn remove_effect(&mut self, key: &str) -> bool {
        let before = self.effects.len();
        self.effects.retain(|(k, _)| *k != key);
        self.effects.len() != before
    }

    /// Snapshot of the registered effects, so they can run without the lock.
    pub(crate) fn effects(&self) -> Vec<Arc<dyn Effect>> {
        self.effects.iter().map(|(_, e)| Arc::clone(e)).collect()
    }

    /// Run every reducer against `tree` and return the resulting tree.
    ///
    /// When no slice changes, the returned tree is the same snapshot.
    pub(crate) fn reduce(&self, tree: &StateTree, action: &Action, strict: bool) -> Result<StateTree, StoreError> {
        let mut changes = Vec::new();
        for reducer in &self.reducers {
            if let Some(next) = reducer.reduce(tree.raw(reducer.key()), action, strict)? {
                changes.push((reducer.key(), next));
            }
        }
        Ok(tree.with_many(changes))
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
