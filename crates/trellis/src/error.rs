//! Error types for tree edits, layout passes and blueprints.

use std::result::Result as StdResult;

use thiserror::Error;

use crate::ItemId;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
///
/// Every variant is a caller contract violation: the engine never recovers
/// from these internally and never clamps its inputs.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// The item does not exist in the tree.
    #[error("item not found: {0:?}")]
    ItemNotFound(ItemId),

    /// The child already has a parent.
    #[error("item already attached: {0:?}")]
    AlreadyAttached(ItemId),

    /// Attaching would make an item its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Requested parent.
        parent: ItemId,
        /// Requested child.
        child: ItemId,
    },

    /// A child index is past the end of the child list.
    #[error("index {index} out of bounds for {len} children")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of children.
        len: usize,
    },

    /// Layout was requested on an item that has a parent.
    #[error("layout requires a root item, {0:?} has a parent")]
    NotRoot(ItemId),

    /// Layout was requested on a root whose width or height is undefined.
    #[error("root {0:?} has an undefined width or height")]
    UndefinedRootSize(ItemId),

    /// Layout was requested on a root with a self-sizing hook.
    #[error("root {0:?} has a pending self-sizing hook")]
    RootSelfSizing(ItemId),

    /// A style value violates its invariants.
    #[error("invalid style: {0}")]
    InvalidStyle(String),

    /// Layout produced a frame with a NaN component.
    #[error("layout produced a NaN frame for {0:?}")]
    NanFrame(ItemId),

    /// A blueprint could not be parsed or serialized.
    #[error("blueprint: {0}")]
    Blueprint(String),

    /// Internal error.
    #[error("internal: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Blueprint(e.to_string())
    }
}
