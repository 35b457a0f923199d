//! Convenience re-exports for common Trellis types.

pub use crate::{
    Blueprint, Built, ItemId, SelfSizing, Tree, error,
    geom::{Rect, Sides, Size, UNDEFINED},
    style::{
        AlignContent, AlignItems, AlignSelf, Basis, Direction, Justify, Position, Style, Wrap,
    },
};

/// Common result alias for Trellis operations.
pub type Result<T> = error::Result<T>;
