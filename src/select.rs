//! Memoized derived-state selectors.
//!
//! DESIGN
//! ======
//! A selector is split in two steps:
//!
//! 1. Slice resolution ([`SliceSelector`]): look the slice up by key and
//!    substitute the declared default when it is absent. The default is
//!    allocated once per resolver, so repeated misses return the same `Arc`.
//! 2. Projection ([`Memoized`], [`Combined`]): derive a value from the
//!    resolved input(s). The last inputs and output are cached; a call whose
//!    inputs are pointer-equal to the cached ones returns the cached output.
//!
//! All field selectors of one feature share one resolver, but each keeps its
//! own cache. The cache holds strong references to its inputs, so a freed
//! slice can never be confused with a new allocation at the same address.
//!
//! Hit or miss, the result is the same value; memoization only decides
//! whether the projection runs and whether callers get the same `Arc` back.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

use crate::slice::Slice;
use crate::tree::StateTree;

/// Anything that derives a shared value from a state snapshot.
pub trait Select: Send + Sync {
    type Output: Send + Sync + 'static;

    fn select(&self, state: &StateTree) -> Arc<Self::Output>;
}

impl<T: Select + ?Sized> Select for &T {
    type Output = T::Output;

    fn select(&self, state: &StateTree) -> Arc<Self::Output> {
        (**self).select(state)
    }
}

/// A plain selector function, such as one generated by `field_selectors!`.
pub type SelectorFn<T> = fn(&StateTree) -> Arc<T>;

impl<T: Send + Sync + 'static> Select for SelectorFn<T> {
    type Output = T;

    fn select(&self, state: &StateTree) -> Arc<T> {
        self(state)
    }
}

// =============================================================================
// SLICE RESOLUTION
// =============================================================================

/// Resolves one feature slice, falling back to its declared default.
pub struct SliceSelector<S: Slice> {
    default: Arc<S>,
}

impl<S: Slice> SliceSelector<S> {
    #[must_use]
    pub fn new() -> Self {
        Self { default: Arc::new(S::initial()) }
    }

    /// The default slice this resolver substitutes for a missing key.
    #[must_use]
    pub fn default_slice(&self) -> &Arc<S> {
        &self.default
    }
}

impl<S: Slice> Default for SliceSelector<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Slice> Select for SliceSelector<S> {
    type Output = S;

    fn select(&self, state: &StateTree) -> Arc<S> {
        match state.try_slice::<S>() {
            Ok(Some(slice)) => slice,
            Ok(None) => Arc::clone(&self.default),
            Err(err) => {
                warn!(key = S::KEY, error = %err, "slice type mismatch; reading default");
                Arc::clone(&self.default)
            }
        }
    }
}

// =============================================================================
// SINGLE-INPUT PROJECTION
// =============================================================================

type Entry<I, O> = Option<(Arc<I>, Arc<O>)>;

/// A projection of one input selector, cached on the input's identity.
pub struct Memoized<P: Select, O> {
    input: P,
    project: fn(&P::Output) -> O,
    cache: Mutex<Entry<P::Output, O>>,
    recomputations: AtomicU64,
}

impl<P: Select, O: Send + Sync + 'static> Memoized<P, O> {
    #[must_use]
    pub fn new(input: P, project: fn(&P::Output) -> O) -> Self {
        Self { input, project, cache: Mutex::new(None), recomputations: AtomicU64::new(0) }
    }

    /// How many times the projection has run.
    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }

    /// Drop the cached pair; the next call recomputes.
    pub fn reset(&self) {
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl<P: Select, O: Send + Sync + 'static> Select for Memoized<P, O> {
    type Output = O;

    fn select(&self, state: &StateTree) -> Arc<O> {
        let input = self.input.select(state);
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((last_input, last_output)) = cache.as_ref() {
            if Arc::ptr_eq(last_input, &input) {
                return Arc::clone(last_output);
            }
        }
        let output = Arc::new((self.project)(&input));
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        *cache = Some((input, Arc::clone(&output)));
        output
    }
}

/// Build a memoized selector from an input selector and a projection.
#[must_use]
pub fn create_selector<P: Select, O: Send + Sync + 'static>(input: P, project: fn(&P::Output) -> O) -> Memoized<P, O> {
    Memoized::new(input, project)
}

// =============================================================================
// TWO-INPUT PROJECTION
// =============================================================================

type Entry2<A, B, O> = Option<(Arc<A>, Arc<B>, Arc<O>)>;

/// A projection over two input selectors, cached on both identities.
pub struct Combined<A: Select, B: Select, O> {
    left: A,
    right: B,
    project: fn(&A::Output, &B::Output) -> O,
    cache: Mutex<Entry2<A::Output, B::Output, O>>,
    recomputations: AtomicU64,
}

impl<A: Select, B: Select, O: Send + Sync + 'static> Combined<A, B, O> {
    #[must_use]
    pub fn new(left: A, right: B, project: fn(&A::Output, &B::Output) -> O) -> Self {
        Self { left, right, project, cache: Mutex::new(None), recomputations: AtomicU64::new(0) }
    }

    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }
}

impl<A: Select, B: Select, O: Send + Sync + 'static> Select for Combined<A, B, O> {
    type Output = O;

    fn select(&self, state: &StateTree) -> Arc<O> {
        let left = self.left.select(state);
        let right = self.right.select(state);
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((last_left, last_right, last_output)) = cache.as_ref() {
            if Arc::ptr_eq(last_left, &left) && Arc::ptr_eq(last_right, &right) {
                return Arc::clone(last_output);
            }
        }
        let output = Arc::new((self.project)(&left, &right));
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        *cache = Some((left, right, Arc::clone(&output)));
        output
    }
}

// =============================================================================
// FEATURE SELECTOR MACRO
// =============================================================================

/// Declare a feature's slice resolver and its field selectors.
///
/// ```ignore
/// field_selectors! {
///     /// The flashcards slice.
///     domain select_flashcards_domain(FLASHCARDS): FlashcardsState;
///     /// Loaded sets.
///     select_flashcards_data: Vec<FlashcardSet> = |s| s.flashcard_sets.clone();
/// }
/// ```
///
/// Each field selector is a function `fn(&StateTree) -> Arc<T>` backed by a
/// lazily created [`Memoized`] static sharing the resolver.
#[macro_export]
macro_rules! field_selectors {
    (
        $(#[$dmeta:meta])*
        domain $domain:ident($resolver:ident): $slice:ty;
        $(
            $(#[$meta:meta])*
            $name:ident: $out:ty = |$s:ident| $body:expr;
        )+
    ) => {
        static $resolver: ::std::sync::LazyLock<$crate::select::SliceSelector<$slice>> =
            ::std::sync::LazyLock::new($crate::select::SliceSelector::new);

        $(#[$dmeta])*
        pub fn $domain(state: &$crate::tree::StateTree) -> ::std::sync::Arc<$slice> {
            $crate::select::Select::select(&*$resolver, state)
        }

        $(
            $(#[$meta])*
            pub fn $name(state: &$crate::tree::StateTree) -> ::std::sync::Arc<$out> {
                static SELECTOR: ::std::sync::LazyLock<
                    $crate::select::Memoized<&'static $crate::select::SliceSelector<$slice>, $out>,
                > = ::std::sync::LazyLock::new(|| {
                    $crate::select::Memoized::new(&*$resolver, |$s: &$slice| -> $out { $body })
                });
                $crate::select::Select::select(&*SELECTOR, state)
            }
        )+
    };
}

#[cfg(test)]
#[path = "select_test.rs"]
mod tests;
