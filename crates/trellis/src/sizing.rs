//! Hooks that let a host report the natural size of an item's content.

use crate::{ItemId, geom::Size};

/// Natural-size provider for an item whose content is measured outside the
/// layout engine.
///
/// The engine calls [`SelfSizing::size`] during the flow pass with the size
/// it currently proposes for the item. Each `NaN` component of the returned
/// size leaves the proposal unchanged; any other value replaces it, except on
/// the cross axis of a stretch-aligned item, where stretching wins.
///
/// Implementations must not lay out the tree they are attached to.
pub trait SelfSizing: Send + Sync {
    /// Return the natural size of `item` given the proposed size.
    fn size(&self, item: ItemId, proposed: Size) -> Size;
}

impl<F> SelfSizing for F
where
    F: Fn(ItemId, Size) -> Size + Send + Sync,
{
    fn size(&self, item: ItemId, proposed: Size) -> Size {
        self(item, proposed)
    }
}

/// A fixed natural size, regardless of the proposal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixed(pub Size);

impl SelfSizing for Fixed {
    fn size(&self, _item: ItemId, _proposed: Size) -> Size {
        self.0
    }
}
