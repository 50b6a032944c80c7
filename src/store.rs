//! The live state container.
//!
//! DESIGN
//! ======
//! `Store` is a cheap `Clone` handle around shared inner state:
//!
//! - the current `StateTree`, published through a `tokio::sync::watch`
//!   channel so UI code can wait for new snapshots
//! - the reducer/effect `Registry`, whose mutex also serializes writes
//! - a bounded mpsc queue for actions produced by effects
//!
//! `dispatch` is synchronous: reducers run under the registry lock, a new
//! snapshot is published only when some slice changed, then effects see the
//! action. Effects that need I/O spawn tokio tasks through `EffectContext`;
//! their follow-up actions go through the queue, which `spawn_queue` drains
//! one action at a time.
//!
//! IDLE TRACKING
//! =============
//! `pending` counts spawned effect tasks plus queued actions not yet
//! dispatched. It reaches zero only when no more actions can arrive without
//! outside input, which is what `settled` waits for.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Notify, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::registry::{Effect, Reducer, Registry};
use crate::slice::Slice;
use crate::tree::StateTree;

#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    config: StoreConfig,
    registry: Mutex<Registry>,
    state: watch::Sender<StateTree>,
    queue_tx: mpsc::Sender<Action>,
    queue_rx: Mutex<Option<mpsc::Receiver<Action>>>,
    pending: AtomicUsize,
    idle: Notify,
}

impl Store {
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self::with_state(config, StateTree::new())
    }

    /// Store starting from a preloaded snapshot. Slices already present are
    /// kept when their reducer is injected.
    #[must_use]
    pub fn with_state(config: StoreConfig, preloaded: StateTree) -> Self {
        let (state, _) = watch::channel(preloaded);
        let (queue_tx, queue_rx) = mpsc::channel(config.effect_queue_capacity);
        Self {
            inner: Arc::new(StoreInner {
                config,
                registry: Mutex::new(Registry::new()),
                state,
                queue_tx,
                queue_rx: Mutex::new(Some(queue_rx)),
                pending: AtomicUsize::new(0),
                idle: Notify::new(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> StoreConfig {
        self.inner.config
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> StateTree {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified whenever a new snapshot is published.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StateTree> {
        self.inner.state.subscribe()
    }

    /// Apply a selector to the current snapshot.
    pub fn select<R>(&self, selector: impl FnOnce(&StateTree) -> R) -> R {
        selector(&self.state())
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.inner.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // INJECTION
    // =========================================================================

    /// Register a feature reducer on first use and initialize its slice.
    ///
    /// Returns `Ok(false)` when the reducer is already registered.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SliceTypeMismatch`] when the key belongs to a
    /// different slice type, either in the registry or (in strict mode) in
    /// the preloaded tree.
    pub fn inject_reducer<R: Reducer>(&self, reducer: R) -> Result<bool, StoreError> {
        let key = R::Slice::KEY;
        let mut registry = self.registry();
        if !registry.insert_reducer(reducer)? {
            return Ok(false);
        }

        let current = self.state();
        match current.try_slice::<R::Slice>() {
            Ok(Some(_)) => debug!(key, "keeping preloaded slice"),
            Ok(None) => {
                self.inner.state.send_replace(current.with_slice(R::Slice::initial()));
            }
            Err(err) if self.inner.config.strict_slices => {
                registry.remove_reducer(key);
                return Err(err);
            }
            Err(_) => {
                warn!(key, "replacing preloaded slice of unexpected type");
                self.inner.state.send_replace(current.with_slice(R::Slice::initial()));
            }
        }
        info!(key, "reducer injected");
        Ok(true)
    }

    /// Unregister a reducer and drop its slice from the tree.
    pub fn eject_reducer(&self, key: &str) -> bool {
        let mut registry = self.registry();
        if !registry.remove_reducer(key) {
            return false;
        }
        let current = self.state();
        let next = current.without(key);
        if !next.ptr_eq(&current) {
            self.inner.state.send_replace(next);
        }
        info!(key, "reducer ejected");
        true
    }

    /// Register an effect on first use. Returns `false` if `key` is taken.
    pub fn inject_effect(&self, key: &'static str, effect: impl Effect) -> bool {
        let inserted = self.registry().insert_effect(key, Arc::new(effect));
        if inserted {
            info!(key, "effect injected");
        }
        inserted
    }

    pub fn eject_effect(&self, key: &str) -> bool {
        let removed = self.registry().remove_effect(key);
        if removed {
            info!(key, "effect ejected");
        }
        removed
    }

    #[must_use]
    pub fn has_reducer(&self, key: &str) -> bool {
        self.registry().has_reducer(key)
    }

    #[must_use]
    pub fn has_effect(&self, key: &str) -> bool {
        self.registry().has_effect(key)
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Run `action` through every reducer, publish the result, then offer the
    /// action to every effect. Returns the snapshot after the reducers ran.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`StoreError::SliceTypeMismatch`] when a
    /// reducer finds a slice of an unexpected type. No snapshot is published
    /// and no effect runs in that case.
    pub fn dispatch(&self, action: Action) -> Result<StateTree, StoreError> {
        let (snapshot, effects) = {
            let registry = self.registry();
            let current = self.state();
            let next = registry.reduce(&current, &action, self.inner.config.strict_slices)?;
            if !next.ptr_eq(&current) {
                self.inner.state.send_replace(next.clone());
            }
            (next, registry.effects())
        };
        debug!(feature = action.feature(), version = snapshot.version(), "action dispatched");

        let ctx = EffectContext { store: self.clone(), state: snapshot.clone() };
        for effect in effects {
            effect.on_action(&action, &ctx);
        }
        Ok(snapshot)
    }

    /// Push an action onto the update queue.
    ///
    /// Waits while the queue is full. Actions are dispatched only once
    /// [`Store::spawn_queue`] is running.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::QueueClosed`] if the queue task has stopped.
    pub async fn enqueue(&self, action: Action) -> Result<(), StoreError> {
        self.begin_work();
        if self.inner.queue_tx.send(action).await.is_err() {
            self.finish_work();
            return Err(StoreError::QueueClosed);
        }
        Ok(())
    }

    /// Start the task that drains the update queue.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::QueueAlreadyRunning`] on a second call.
    pub fn spawn_queue(&self) -> Result<JoinHandle<()>, StoreError> {
        let mut rx = self
            .inner
            .queue_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(StoreError::QueueAlreadyRunning)?;
        let store = self.clone();
        info!(capacity = self.inner.config.effect_queue_capacity, "action queue started");
        Ok(tokio::spawn(async move {
            while let Some(action) = rx.recv().await {
                if let Err(e) = store.dispatch(action) {
                    warn!(error = %e, "queued action failed");
                }
                store.finish_work();
            }
        }))
    }

    /// Resolve once no effect task is running and the queue is empty.
    ///
    /// Never resolves if actions were enqueued but the queue was not started.
    pub async fn settled(&self) {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.inner.pending.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }

    fn begin_work(&self) {
        self.inner.pending.fetch_add(1, Ordering::SeqCst);
    }

    fn finish_work(&self) {
        if self.inner.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}

// =============================================================================
// EFFECT CONTEXT
// =============================================================================

/// What an effect sees when it is offered an action.
pub struct EffectContext {
    store: Store,
    state: StateTree,
}

impl EffectContext {
    /// Snapshot produced by the action being handled.
    #[must_use]
    pub fn state(&self) -> &StateTree {
        &self.state
    }

    /// Run `work` on the tokio runtime and enqueue the actions it returns.
    ///
    /// Outside a runtime the work is dropped with a warning.
    pub fn spawn<F>(&self, work: F)
    where
        F: Future<Output = Vec<Action>> + Send + 'static,
    {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("effect work dropped: no tokio runtime");
            return;
        };
        let store = self.store.clone();
        store.begin_work();
        let work_guard = WorkGuard(store.clone());
        handle.spawn(async move {
            // Released on completion, panic, or cancellation.
            let _work_guard = work_guard;
            for action in work.await {
                if let Err(e) = store.enqueue(action).await {
                    warn!(error = %e, "effect follow-up dropped");
                }
            }
        });
    }
}

/// One unit of effect work counted in `pending`.
struct WorkGuard(Store);

impl Drop for WorkGuard {
    fn drop(&mut self) {
        self.0.finish_work();
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
