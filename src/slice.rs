//! Feature slice contract.
//!
//! DESIGN
//! ======
//! A slice is the part of the state tree owned by one feature. Its record
//! type is declared statically, so a selector's field projection is checked
//! at compile time instead of being a runtime key lookup.

use std::fmt;

/// A statically typed feature slice stored under a fixed key.
pub trait Slice: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Key of this slice in the state tree.
    const KEY: &'static str;

    /// Declared default value, used when the slice is not registered.
    fn initial() -> Self;
}
