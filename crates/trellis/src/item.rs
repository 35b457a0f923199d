use std::fmt;

use crate::{ItemId, geom::Rect, sizing::SelfSizing, style::Style};

/// Item data stored in the tree arena.
pub struct Item {
    /// Layout inputs.
    pub(crate) style: Style,
    /// Parent in the arena tree.
    pub(crate) parent: Option<ItemId>,
    /// Children in insertion order.
    pub(crate) children: Vec<ItemId>,
    /// Frame relative to the parent's origin, written by layout.
    pub(crate) frame: Rect,
    /// Optional natural-size provider.
    pub(crate) self_sizing: Option<Box<dyn SelfSizing>>,
}

impl Item {
    /// Construct a detached item.
    pub(crate) fn new(style: Style) -> Self {
        Self {
            style,
            parent: None,
            children: Vec::new(),
            frame: Rect::zero(),
            self_sizing: None,
        }
    }

    /// Return the item's style.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Return the item's parent, if any.
    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    /// Return the item's children in insertion order.
    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    /// Return the frame computed by the last layout.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Return true if a self-sizing hook is installed.
    pub fn has_self_sizing(&self) -> bool {
        self.self_sizing.is_some()
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("style", &self.style)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("frame", &self.frame)
            .field("self_sizing", &self.self_sizing.is_some())
            .finish()
    }
}
