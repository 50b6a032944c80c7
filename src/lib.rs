//! State layer of the lingua learning front-end.
//!
//! ARCHITECTURE
//! ============
//! - [`tree`]: immutable, versioned state snapshots keyed by slice.
//! - [`select`]: memoized selectors that resolve a slice (or its default)
//!   and project a field, recomputing only when the slice changes.
//! - [`registry`] and [`store`]: register-on-first-use reducers and effects,
//!   the live container, and its single update queue.
//! - [`features`]: one module per screen area with its slice, actions,
//!   reducer, selectors, and effects.
//! - [`api`]: the backend boundary used by effects.

pub mod action;
pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod registry;
pub mod select;
pub mod slice;
pub mod store;
pub mod tree;

pub use action::Action;
pub use config::StoreConfig;
pub use error::{ConfigError, StoreError};
pub use select::{Combined, Memoized, Select, SelectorFn, SliceSelector, create_selector};
pub use slice::Slice;
pub use store::{EffectContext, Store};
pub use tree::StateTree;
