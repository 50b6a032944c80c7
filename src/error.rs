//! Error types shared by the store, registry, and configuration layers.

// =============================================================================
// STORE ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// A slice key holds a value whose type differs from the one expected.
    #[error("slice `{key}` holds a value of an unexpected type")]
    SliceTypeMismatch { key: &'static str },
    /// `spawn_queue` was called on a store whose queue is already running.
    #[error("action queue is already running")]
    QueueAlreadyRunning,
    /// The action queue receiver was dropped.
    #[error("action queue is closed")]
    QueueClosed,
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}
