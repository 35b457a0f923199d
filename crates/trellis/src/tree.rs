use slotmap::SlotMap;
use tracing::debug;

use crate::{
    ItemId,
    blueprint::{self, Blueprint, Built},
    engine::{self, Frames, Measurement},
    error::{Error, Result},
    geom::{Rect, Size, is_defined},
    item::Item,
    sizing::SelfSizing,
    style::{Basis, Style},
};

/// Arena of layout items.
///
/// Items are created detached, then attached under a parent with
/// [`Tree::add`] or [`Tree::insert_at`]. Any detached item is a root and can
/// be laid out on its own.
#[derive(Debug, Default)]
pub struct Tree {
    /// Item storage arena.
    pub(crate) items: SlotMap<ItemId, Item>,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items in the arena.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the arena holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return true if the item exists.
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(id)
    }

    /// Return a reference to an item by id.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Look up an item, failing if it does not exist.
    fn get(&self, id: ItemId) -> Result<&Item> {
        self.items.get(id).ok_or(Error::ItemNotFound(id))
    }

    /// Look up an item mutably, failing if it does not exist.
    fn get_mut(&mut self, id: ItemId) -> Result<&mut Item> {
        self.items.get_mut(id).ok_or(Error::ItemNotFound(id))
    }

    /// Create a detached item with the given style.
    pub fn new_item(&mut self, style: Style) -> Result<ItemId> {
        style.validate()?;
        Ok(self.items.insert(Item::new(style)))
    }

    /// Return the parent of an item.
    pub fn parent(&self, id: ItemId) -> Result<Option<ItemId>> {
        Ok(self.get(id)?.parent)
    }

    /// Return the children of an item in insertion order.
    pub fn children(&self, id: ItemId) -> Result<&[ItemId]> {
        Ok(&self.get(id)?.children)
    }

    /// Return the number of children of an item.
    pub fn child_count(&self, id: ItemId) -> Result<usize> {
        Ok(self.get(id)?.children.len())
    }

    /// Return the child at `index`.
    pub fn child_at(&self, id: ItemId, index: usize) -> Result<ItemId> {
        let children = &self.get(id)?.children;
        children.get(index).copied().ok_or(Error::IndexOutOfBounds {
            index,
            len: children.len(),
        })
    }

    /// Walk parent links up to the root of the tree containing `id`.
    pub fn root_of(&self, id: ItemId) -> Result<ItemId> {
        let mut current = id;
        while let Some(parent) = self.get(current)?.parent {
            current = parent;
        }
        Ok(current)
    }

    /// Return true if `ancestor` is `node` or one of its ancestors.
    fn is_ancestor(&self, ancestor: ItemId, node: ItemId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.items.get(id).and_then(|item| item.parent);
        }
        false
    }

    /// Append a detached child to a parent.
    pub fn add(&mut self, parent: ItemId, child: ItemId) -> Result<()> {
        let index = self.child_count(parent)?;
        self.insert_at(parent, index, child)
    }

    /// Insert a detached child at `index` in a parent's child list.
    ///
    /// Fails without modifying either tree if the child already has a
    /// parent, if attaching would create a cycle, or if `index` is past the
    /// end of the child list.
    pub fn insert_at(&mut self, parent: ItemId, index: usize, child: ItemId) -> Result<()> {
        let len = self.get(parent)?.children.len();
        if self.get(child)?.parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        if index > len {
            return Err(Error::IndexOutOfBounds { index, len });
        }

        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.insert(index, child);
        Ok(())
    }

    /// Detach a child from its parent. Detaching a root is a no-op.
    pub fn remove(&mut self, child: ItemId) -> Result<()> {
        let Some(parent) = self.get(child)?.parent else {
            return Ok(());
        };
        self.get_mut(parent)?.children.retain(|id| *id != child);
        self.get_mut(child)?.parent = None;
        Ok(())
    }

    /// Detach and return the child at `index`.
    pub fn remove_at(&mut self, parent: ItemId, index: usize) -> Result<ItemId> {
        let child = self.child_at(parent, index)?;
        self.remove(child)?;
        Ok(child)
    }

    /// Detach an item and destroy it together with all its descendants.
    pub fn remove_subtree(&mut self, id: ItemId) -> Result<()> {
        self.remove(id)?;
        for node in self.subtree_pre_order(id)? {
            self.items.remove(node);
        }
        Ok(())
    }

    /// Collect a subtree in pre-order.
    pub fn subtree_pre_order(&self, root: ItemId) -> Result<Vec<ItemId>> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let item = self.get(id)?;
            out.push(id);
            stack.extend(item.children.iter().rev().copied());
        }
        Ok(out)
    }

    /// Return an item's style.
    pub fn style(&self, id: ItemId) -> Result<&Style> {
        Ok(&self.get(id)?.style)
    }

    /// Replace an item's style after validating it.
    pub fn set_style(&mut self, id: ItemId, style: Style) -> Result<()> {
        let item = self.get_mut(id)?;
        style.validate()?;
        item.style = style;
        Ok(())
    }

    /// Update an item's style in place. The update is discarded if the result
    /// fails validation.
    pub fn with_style(&mut self, id: ItemId, f: impl FnOnce(&mut Style)) -> Result<()> {
        let mut style = self.get(id)?.style;
        f(&mut style);
        self.set_style(id, style)
    }

    /// Set the requested width and height.
    pub fn set_size(&mut self, id: ItemId, width: f32, height: f32) -> Result<()> {
        self.with_style(id, |s| {
            s.width = width;
            s.height = height;
        })
    }

    /// Set the grow factor.
    pub fn set_grow(&mut self, id: ItemId, grow: f32) -> Result<()> {
        self.with_style(id, |s| s.grow = grow)
    }

    /// Set the shrink factor.
    pub fn set_shrink(&mut self, id: ItemId, shrink: f32) -> Result<()> {
        self.with_style(id, |s| s.shrink = shrink)
    }

    /// Set the basis.
    pub fn set_basis(&mut self, id: ItemId, basis: Basis) -> Result<()> {
        self.with_style(id, |s| s.basis = basis)
    }

    /// Set the sibling order.
    pub fn set_order(&mut self, id: ItemId, order: i32) -> Result<()> {
        self.with_style(id, |s| s.order = order)
    }

    /// Show or hide an item.
    pub fn set_visible(&mut self, id: ItemId, visible: bool) -> Result<()> {
        self.with_style(id, |s| s.visible = visible)
    }

    /// Install a self-sizing hook on an item.
    pub fn set_self_sizing(&mut self, id: ItemId, hook: impl SelfSizing + 'static) -> Result<()> {
        self.get_mut(id)?.self_sizing = Some(Box::new(hook));
        Ok(())
    }

    /// Remove an item's self-sizing hook, if any.
    pub fn clear_self_sizing(&mut self, id: ItemId) -> Result<()> {
        self.get_mut(id)?.self_sizing = None;
        Ok(())
    }

    /// Return the frame written by the last layout.
    pub fn frame(&self, id: ItemId) -> Result<Rect> {
        Ok(self.get(id)?.frame)
    }

    /// Lay out the tree rooted at `root` using the root's own width and
    /// height, and store every item's frame.
    ///
    /// Hidden items, and every item below them, get a zero frame. Nothing is
    /// written if the pass fails.
    pub fn layout(&mut self, root: ItemId) -> Result<()> {
        let style = self.get(root)?.style;
        if self.get(root)?.parent.is_some() {
            return Err(Error::NotRoot(root));
        }
        if !is_defined(style.width) || !is_defined(style.height) {
            return Err(Error::UndefinedRootSize(root));
        }
        let frames = self.arrange(root, Size::new(style.width, style.height))?;
        self.commit(root, &frames)
    }

    /// Compute frames for the subtree at `root` within `size`, without
    /// storing them.
    pub fn arrange(&self, root: ItemId, size: Size) -> Result<Frames> {
        engine::arrange(self, root, size)
    }

    /// Compute the natural size of the subtree at `root`, without storing
    /// any frames.
    pub fn measure(&self, root: ItemId, available: Size) -> Result<Measurement> {
        engine::measure(self, root, available)
    }

    /// Instantiate a blueprint as a new detached subtree.
    ///
    /// If any style is invalid or a name is used twice, every item created
    /// so far is removed again and the tree is left as it was.
    pub fn build(&mut self, bp: &Blueprint) -> Result<Built> {
        blueprint::build(self, bp)
    }

    /// Describe the subtree at `root` as an unnamed blueprint.
    pub fn blueprint(&self, root: ItemId) -> Result<Blueprint> {
        blueprint::describe(self, root)
    }

    /// Store computed frames on every item of a subtree.
    pub fn commit(&mut self, root: ItemId, frames: &Frames) -> Result<()> {
        let nodes = self.subtree_pre_order(root)?;
        debug!(?root, items = nodes.len(), "commit frames");
        for id in nodes {
            let frame = frames.get(id).copied().unwrap_or_default();
            self.get_mut(id)?.frame = frame;
        }
        Ok(())
    }
}
