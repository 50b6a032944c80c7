//! Immutable, versioned state snapshots.
//!
//! DESIGN
//! ======
//! A `StateTree` maps slice keys to type-erased slice values behind `Arc`.
//! Every write returns a new tree: the key map is cloned (one `Arc` bump per
//! slice) and only the changed entry is replaced. Unchanged slices keep their
//! identity, which is what selector memoization keys on.
//!
//! The tree itself never mutates, so a snapshot handed to a render pass stays
//! consistent for as long as it is held.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::StoreError;
use crate::slice::Slice;

/// Type-erased slice value as stored in the tree.
pub type SliceRef = Arc<dyn Any + Send + Sync>;

#[derive(Clone, Default)]
pub struct StateTree {
    version: u64,
    slices: Arc<HashMap<&'static str, SliceRef>>,
}

impl fmt::Debug for StateTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.slices.keys().copied().collect();
        keys.sort_unstable();
        f.debug_struct("StateTree").field("version", &self.version).field("slices", &keys).finish()
    }
}

impl StateTree {
    /// Empty tree at version 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes that produced this snapshot.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.slices.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Registered slice keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self.slices.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Raw entry for `key`, if present.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&SliceRef> {
        self.slices.get(key)
    }

    /// Typed slice lookup. Absent keys and values of another type both
    /// yield `None`; use [`StateTree::try_slice`] to tell them apart.
    #[must_use]
    pub fn slice<S: Slice>(&self) -> Option<Arc<S>> {
        self.try_slice::<S>().ok().flatten()
    }

    /// Typed slice lookup that reports a mismatched value type.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SliceTypeMismatch`] when `S::KEY` holds a value
    /// that is not an `S`.
    pub fn try_slice<S: Slice>(&self) -> Result<Option<Arc<S>>, StoreError> {
        match self.slices.get(S::KEY) {
            None => Ok(None),
            Some(entry) => Arc::clone(entry)
                .downcast::<S>()
                .map(Some)
                .map_err(|_| StoreError::SliceTypeMismatch { key: S::KEY }),
        }
    }

    /// New tree with `value` stored under `S::KEY`.
    #[must_use]
    pub fn with_slice<S: Slice>(&self, value: S) -> Self {
        self.with_slice_arc(Arc::new(value))
    }

    /// New tree with an existing slice allocation stored under `S::KEY`.
    #[must_use]
    pub fn with_slice_arc<S: Slice>(&self, value: Arc<S>) -> Self {
        self.with_raw(S::KEY, value)
    }

    /// New tree with a raw entry stored under `key`.
    #[must_use]
    pub fn with_raw(&self, key: &'static str, value: SliceRef) -> Self {
        let mut slices = (*self.slices).clone();
        slices.insert(key, value);
        Self { version: self.version + 1, slices: Arc::new(slices) }
    }

    /// New tree without `key`. Returns an identical snapshot when the key was
    /// never present.
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        if !self.slices.contains_key(key) {
            return self.clone();
        }
        let mut slices = (*self.slices).clone();
        slices.remove(key);
        Self { version: self.version + 1, slices: Arc::new(slices) }
    }

    /// Apply several entry replacements as one write.
    #[must_use]
    pub(crate) fn with_many(&self, changes: Vec<(&'static str, SliceRef)>) -> Self {
        if changes.is_empty() {
            return self.clone();
        }
        let mut slices = (*self.slices).clone();
        for (key, value) in changes {
            slices.insert(key, value);
        }
        Self { version: self.version + 1, slices: Arc::new(slices) }
    }

    /// True when both handles point at the same snapshot.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.version == other.version && Arc::ptr_eq(&self.slices, &other.slices)
    }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tests;
