//! The flex layout pass.
//!
//! Layout runs as a pure function over a borrowed [`Tree`]: frames are
//! computed into a [`Frames`] map and never written to the tree directly.
//! [`Tree::layout`] commits the map once the whole pass has succeeded, so a
//! failed pass leaves every item's previous frame untouched.
//!
//! Two modes share the algorithm. [`Mode::Arrange`] honors every flex
//! property. [`Mode::Measure`] computes natural sizes for a host doing a
//! two-phase measure/arrange: shrink factors are treated as zero and every
//! child aligns to the cross start, without touching the stored styles.

/// Per-container line bookkeeping and distribution formulas.
mod flow;

use std::ops::Range;

use slotmap::SecondaryMap;
use tracing::{debug, trace, warn};

use self::flow::{Flow, Line, content_offsets, justify_offsets};
use crate::{
    ItemId, Tree,
    error::{Error, Result},
    geom::{Axis, Rect, Size, is_defined},
    item::Item,
    style::{AlignItems, Basis, Position, Style},
};

/// Frames keyed by item. Each frame is relative to its parent's origin.
pub type Frames = SecondaryMap<ItemId, Rect>;

/// Whether a pass produces final frames or natural sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Final placement; every flex property applies.
    Arrange,
    /// Natural sizing; shrink is ignored and children align to the cross start.
    Measure,
}

/// Result of a measuring pass.
#[derive(Debug, Clone)]
pub struct Measurement {
    /// Natural size of the root.
    pub size: Size,
    /// Frames computed while measuring.
    pub frames: Frames,
}

/// Lay out the subtree at `root` into a box of `size`.
///
/// The root's frame is `(0, 0, size.w, size.h)`. Items that were not visited
/// (hidden subtrees) have no entry in the returned map.
pub fn arrange(tree: &Tree, root: ItemId, size: Size) -> Result<Frames> {
    check_root(tree, root)?;
    if !size.is_finite() || size.w < 0.0 || size.h < 0.0 {
        return Err(Error::UndefinedRootSize(root));
    }
    debug!(?root, w = size.w, h = size.h, "arrange");

    let mut pass = LayoutPass::new(tree, Mode::Arrange);
    pass.frames.insert(root, size.rect());
    pass.layout_item(root, size)?;
    pass.finish()
}

/// Compute the natural size of the subtree at `root` within `available`.
///
/// Either axis of `available` may be infinite. A defined root width or
/// height takes precedence over the available size on that axis.
pub fn measure(tree: &Tree, root: ItemId, available: Size) -> Result<Measurement> {
    let item = check_root(tree, root)?;
    if available.w.is_nan() || available.h.is_nan() {
        return Err(Error::UndefinedRootSize(root));
    }
    let style = item.style;
    let alloc = Size::new(
        if is_defined(style.width) {
            style.width
        } else {
            available.w
        },
        if is_defined(style.height) {
            style.height
        } else {
            available.h
        },
    );
    debug!(?root, w = alloc.w, h = alloc.h, "measure");

    let mut pass = LayoutPass::new(tree, Mode::Measure);
    pass.layout_item(root, alloc)?;
    let size = pass.natural_size(item, alloc)?;
    pass.frames.insert(root, size.rect());
    let frames = pass.finish()?;
    Ok(Measurement { size, frames })
}

/// Check the root preconditions shared by every pass.
fn check_root(tree: &Tree, root: ItemId) -> Result<&Item> {
    let item = tree.items.get(root).ok_or(Error::ItemNotFound(root))?;
    if item.parent.is_some() {
        return Err(Error::NotRoot(root));
    }
    if item.self_sizing.is_some() {
        return Err(Error::RootSelfSizing(root));
    }
    Ok(item)
}

/// Floor a length at zero. NaN is kept so that [`LayoutPass::finish`] reports it.
fn non_negative(v: f32) -> f32 {
    if v < 0.0 { 0.0 } else { v }
}

/// Size of an absolutely positioned item on one axis.
fn absolute_size(size: f32, lead: f32, trail: f32, dim: f32) -> f32 {
    if is_defined(size) {
        size
    } else if is_defined(lead) && is_defined(trail) && dim.is_finite() {
        (dim - lead - trail).max(0.0)
    } else {
        0.0
    }
}

/// Position of an absolutely positioned item on one axis.
fn absolute_pos(lead: f32, trail: f32, size: f32, dim: f32) -> f32 {
    if is_defined(lead) {
        lead
    } else if is_defined(trail) && dim.is_finite() {
        dim - size - trail
    } else {
        0.0
    }
}

/// One layout traversal over a borrowed tree.
struct LayoutPass<'a> {
    /// Tree being laid out.
    tree: &'a Tree,
    /// Pass mode.
    mode: Mode,
    /// Frames computed so far.
    frames: Frames,
}

impl<'a> LayoutPass<'a> {
    /// Create an empty pass.
    fn new(tree: &'a Tree, mode: Mode) -> Self {
        Self {
            tree,
            mode,
            frames: SecondaryMap::new(),
        }
    }

    /// Look up an item.
    fn item(&self, id: ItemId) -> Result<&'a Item> {
        self.tree.items.get(id).ok_or(Error::ItemNotFound(id))
    }

    /// Borrow the in-progress frame of a flow child.
    fn frame_mut(&mut self, id: ItemId) -> Result<&mut Rect> {
        self.frames
            .get_mut(id)
            .ok_or_else(|| Error::Internal(format!("no frame recorded for {id:?}")))
    }

    /// Resolved cross-axis alignment of a child.
    fn align(&self, child: &Style, parent: &Style) -> AlignItems {
        match self.mode {
            Mode::Arrange => child.align_self.resolve(parent.align_items),
            Mode::Measure => AlignItems::Start,
        }
    }

    /// Effective shrink factor of a child.
    fn shrink(&self, child: &Style) -> f32 {
        match self.mode {
            Mode::Arrange => child.shrink,
            Mode::Measure => 0.0,
        }
    }

    /// Reject the pass if any frame has a NaN component.
    fn finish(self) -> Result<Frames> {
        if let Some((id, frame)) = self.frames.iter().find(|(_, f)| f.has_nan()) {
            warn!(?id, ?frame, "layout produced a NaN frame");
            return Err(Error::NanFrame(id));
        }
        Ok(self.frames)
    }

    /// Children of a container in visit order.
    fn ordered_children(&self, item: &Item) -> Result<Vec<ItemId>> {
        let mut keyed = Vec::with_capacity(item.children.len());
        for &child in &item.children {
            keyed.push((self.item(child)?.style.order, child));
        }
        if keyed.iter().any(|(order, _)| *order != 0) {
            keyed.sort_by_key(|(order, _)| *order);
        }
        Ok(keyed.into_iter().map(|(_, id)| id).collect())
    }

    /// Lay out the children of `id`, which has been allocated `size`.
    fn layout_item(&mut self, id: ItemId, size: Size) -> Result<()> {
        let item = self.item(id)?;
        if item.children.is_empty() {
            return Ok(());
        }
        let style = item.style;
        let order = self.ordered_children(item)?;
        let mut flow = Flow::new(&style, size, self.mode);
        let (main, cross) = (flow.main, flow.cross);

        let mut line_start = 0;
        let mut count = 0;
        for (i, &child_id) in order.iter().enumerate() {
            let child = self.item(child_id)?;
            let cs = &child.style;
            if !cs.visible {
                continue;
            }
            if cs.position == Position::Absolute {
                self.place_absolute(child_id, cs, size)?;
                continue;
            }

            let mut frame = Rect::new(0.0, 0.0, cs.width, cs.height);
            if frame.extent(main).is_nan() {
                frame.set_extent(main, 0.0);
            }
            if frame.extent(cross).is_nan() && !flow.wrap {
                frame.set_extent(cross, flow.cross_default(&cs.margin));
            }

            let align = self.align(cs, &style);
            if let Some(hook) = &child.self_sizing {
                let natural = hook.size(child_id, frame.size());
                for axis in [Axis::Horizontal, Axis::Vertical] {
                    if axis == cross && align == AlignItems::Stretch {
                        continue;
                    }
                    let v = natural.along(axis);
                    if is_defined(v) {
                        frame.set_extent(axis, v);
                    }
                }
            }

            match cs.basis {
                Basis::Auto => {}
                Basis::Length(v) => {
                    frame.set_extent(main, non_negative(v - cs.margin.total(main)));
                }
                Basis::Relative(f) if flow.bounded() => {
                    let v = f * flow.main_dim - cs.margin.total(main);
                    frame.set_extent(main, non_negative(v));
                }
                Basis::Relative(_) => {}
            }

            let child_size = frame.extent(main);
            if flow.wrap {
                if flow.free < child_size {
                    self.layout_line(&style, &order, line_start..i, &mut flow, count)?;
                    flow.reset();
                    line_start = i;
                    count = 0;
                }
                let thickness = frame.extent(cross);
                if is_defined(thickness) {
                    flow.thickness = flow
                        .thickness
                        .max(thickness + cs.margin.total(cross));
                } else {
                    flow.need_lines = true;
                }
            }

            flow.grows += cs.grow;
            flow.shrinks += self.shrink(cs);
            flow.free -= child_size + cs.margin.total(main);
            count += 1;
            self.frames.insert(child_id, frame);
        }

        self.layout_line(&style, &order, line_start..order.len(), &mut flow, count)?;

        if flow.need_lines && !flow.lines.is_empty() {
            self.align_lines(&order, &flow)?;
        }
        Ok(())
    }

    /// Size, place and lay out an absolutely positioned child.
    fn place_absolute(&mut self, id: ItemId, cs: &Style, size: Size) -> Result<()> {
        let w = absolute_size(cs.width, cs.left, cs.right, size.w);
        let h = absolute_size(cs.height, cs.top, cs.bottom, size.h);
        let frame = Rect::new(
            absolute_pos(cs.left, cs.right, w, size.w),
            absolute_pos(cs.top, cs.bottom, h, size.h),
            w,
            h,
        );
        self.frames.insert(id, frame);
        self.layout_item(id, frame.size())
    }

    /// Resolve one line: distribute free space, align, place and recurse.
    fn layout_line(
        &mut self,
        style: &Style,
        order: &[ItemId],
        range: Range<usize>,
        flow: &mut Flow,
        count: usize,
    ) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        let (main, cross) = (flow.main, flow.cross);
        if flow.reverse_lines {
            flow.cross_pos -= flow.thickness;
        }
        let line_pos = flow.cross_pos;

        let (offset, spacing) = if flow.bounded() && flow.grows == 0.0 && flow.free > 0.0 {
            justify_offsets(flow.justify, flow.free, count)
        } else {
            (0.0, 0.0)
        };
        let mut pos = if flow.reverse {
            flow.padding.leading(main) + flow.main_dim - offset
        } else {
            flow.padding.leading(main) + offset
        };
        trace!(
            count,
            free = flow.free,
            grows = flow.grows,
            shrinks = flow.shrinks,
            thickness = flow.thickness,
            "line"
        );

        for &child_id in &order[range.clone()] {
            let child = self.item(child_id)?;
            let cs = &child.style;
            if !cs.visible || cs.position == Position::Absolute {
                continue;
            }
            let align = self.align(cs, style);
            let shrink = self.shrink(cs);

            let mut flex = 0.0;
            if flow.bounded() {
                if flow.free > 0.0 {
                    if cs.grow > 0.0 && flow.grows > 0.0 {
                        flex = flow.free / flow.grows * cs.grow;
                    }
                } else if flow.free < 0.0 && shrink > 0.0 && flow.shrinks > 0.0 {
                    flex = flow.free / flow.shrinks * shrink;
                }
            }

            let thickness = flow.thickness;
            let frame = self.frame_mut(child_id)?;
            frame.set_extent(main, non_negative(frame.extent(main) + flex));

            let lead = cs.margin.leading(cross);
            let trail = cs.margin.trailing(cross);
            let extent = frame.extent(cross);
            let mut cross_pos = line_pos;
            if extent.is_nan() {
                // Deferred until the line thickness is final.
                cross_pos += lead;
            } else {
                match align {
                    AlignItems::Start => cross_pos += lead,
                    AlignItems::End => cross_pos += thickness - extent - trail,
                    AlignItems::Center => cross_pos += (thickness - extent + lead - trail) / 2.0,
                    AlignItems::Stretch => {
                        if cs.extent(cross).is_nan() {
                            frame.set_extent(cross, non_negative(thickness - lead - trail));
                        }
                        cross_pos += lead;
                    }
                }
            }
            frame.set_pos(cross, cross_pos);

            let lead = cs.margin.leading(main);
            let trail = cs.margin.trailing(main);
            if flow.reverse {
                pos -= trail + frame.extent(main);
                frame.set_pos(main, pos);
                pos -= spacing + lead;
            } else {
                pos += lead;
                frame.set_pos(main, pos);
                pos += frame.extent(main) + spacing + trail;
            }

            let resolved = *frame;
            if !resolved.has_nan() {
                self.layout_item(child_id, resolved.size())?;
            }
        }

        if flow.wrap {
            if !flow.reverse_lines {
                flow.cross_pos += flow.thickness;
            }
            flow.lines.push(Line {
                range,
                size: flow.thickness,
                pos: line_pos,
            });
            flow.lines_total += flow.thickness;
        }
        Ok(())
    }

    /// Distribute free cross space between lines and settle deferred sizes.
    fn align_lines(&mut self, order: &[ItemId], flow: &Flow) -> Result<()> {
        let cross = flow.cross;
        let free = flow.cross_dim - flow.lines_total;
        let (offset, gap, grow) = if free > 0.0 && free.is_finite() {
            content_offsets(flow.align_content, free, flow.lines.len())
        } else {
            (0.0, 0.0, 0.0)
        };
        let lead = flow.padding.leading(cross);
        let mut pos = if flow.reverse_lines {
            lead + flow.cross_dim - offset
        } else {
            lead + offset
        };

        for line in &flow.lines {
            let extent = line.size + grow;
            if flow.reverse_lines {
                pos -= extent;
            }
            let delta = pos - line.pos;
            trace!(pos, extent, delta, "settle line");

            for &child_id in &order[line.range.clone()] {
                let child = self.item(child_id)?;
                let cs = &child.style;
                if !cs.visible || cs.position == Position::Absolute {
                    continue;
                }
                let frame = self.frame_mut(child_id)?;
                if frame.extent(cross).is_nan() {
                    frame.set_extent(cross, non_negative(extent - cs.margin.total(cross)));
                    frame.set_pos(cross, pos + cs.margin.leading(cross));
                    let size = frame.size();
                    self.layout_item(child_id, size)?;
                } else {
                    frame.set_pos(cross, frame.pos(cross) + delta);
                }
            }

            if flow.reverse_lines {
                pos -= gap;
            } else {
                pos += extent + gap;
            }
        }
        Ok(())
    }

    /// Natural size of a measured root: the extent of its flow children plus
    /// padding, clamped to the allocation where it is finite.
    fn natural_size(&self, root: &Item, alloc: Size) -> Result<Size> {
        let style = &root.style;
        let mut out = [0.0f32; 2];
        for (slot, axis) in out.iter_mut().zip([Axis::Horizontal, Axis::Vertical]) {
            let requested = style.extent(axis);
            if is_defined(requested) {
                *slot = requested;
                continue;
            }
            let mut far = style.padding.leading(axis);
            for &child_id in &root.children {
                let child = self.item(child_id)?;
                let cs = &child.style;
                if !cs.visible || cs.position == Position::Absolute {
                    continue;
                }
                if let Some(frame) = self.frames.get(child_id) {
                    far = far.max(frame.far(axis) + cs.margin.trailing(axis));
                }
            }
            let natural = far + style.padding.trailing(axis);
            let limit = alloc.along(axis);
            *slot = if limit.is_finite() {
                natural.min(limit)
            } else {
                natural
            };
        }
        Ok(Size::new(out[0], out[1]))
    }
}
