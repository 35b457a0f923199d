//! Per-container bookkeeping for the flow pass.

use std::ops::Range;

use crate::{
    geom::{Axis, Sides, Size},
    style::{AlignContent, Justify, Style, Wrap},
};

use super::Mode;

/// A closed line of flow children.
#[derive(Debug, Clone)]
pub(super) struct Line {
    /// Indices into the container's visit order.
    pub(super) range: Range<usize>,
    /// Cross-axis thickness.
    pub(super) size: f32,
    /// Cross-axis position the line was first placed at.
    pub(super) pos: f32,
}

/// Running layout state for one container.
#[derive(Debug)]
pub(super) struct Flow {
    /// Main axis.
    pub(super) main: Axis,
    /// Cross axis.
    pub(super) cross: Axis,
    /// Place children from the main-axis end.
    pub(super) reverse: bool,
    /// Children may wrap onto several lines.
    pub(super) wrap: bool,
    /// Stack lines from the cross-axis end.
    pub(super) reverse_lines: bool,
    /// Content size on the main axis.
    pub(super) main_dim: f32,
    /// Content size on the cross axis.
    pub(super) cross_dim: f32,
    /// Container padding.
    pub(super) padding: Sides,
    /// Remaining free main-axis space on the current line.
    pub(super) free: f32,
    /// Sum of grow factors on the current line.
    pub(super) grows: f32,
    /// Sum of shrink factors on the current line.
    pub(super) shrinks: f32,
    /// Cross-axis thickness of the current line.
    pub(super) thickness: f32,
    /// Cross-axis position of the next line.
    pub(super) cross_pos: f32,
    /// Some child's cross size was deferred to line sizing.
    pub(super) need_lines: bool,
    /// Closed lines, recorded when `need_lines` is set.
    pub(super) lines: Vec<Line>,
    /// Sum of closed line thicknesses.
    pub(super) lines_total: f32,
    /// Main-axis justification.
    pub(super) justify: Justify,
    /// Distribution of space between lines.
    pub(super) align_content: AlignContent,
}

impl Flow {
    /// Resolve axes and the content box of a container allocated `size`.
    pub(super) fn new(style: &Style, size: Size, mode: Mode) -> Self {
        let main = style.direction.axis();
        let cross = main.cross();
        let padding = style.padding;
        let main_dim = (size.along(main) - padding.total(main)).max(0.0);
        let cross_dim = (size.along(cross) - padding.total(cross)).max(0.0);
        let wrap =
            style.wrap != Wrap::NoWrap && !(mode == Mode::Measure && !main_dim.is_finite());

        // Reverse placement needs a far edge; an unbounded measuring axis has
        // none, and only extents matter there.
        let reverse = style.direction.is_reverse() && main_dim.is_finite();
        let reverse_lines = wrap && style.wrap == Wrap::WrapReverse && cross_dim.is_finite();

        let cross_pos = if reverse_lines {
            padding.leading(cross) + cross_dim
        } else {
            padding.leading(cross)
        };

        let mut flow = Self {
            main,
            cross,
            reverse,
            wrap,
            reverse_lines,
            main_dim,
            cross_dim,
            padding,
            free: 0.0,
            grows: 0.0,
            shrinks: 0.0,
            thickness: 0.0,
            cross_pos,
            need_lines: false,
            lines: Vec::new(),
            lines_total: 0.0,
            justify: style.justify_content,
            align_content: style.align_content,
        };
        flow.reset();
        flow
    }

    /// Start a fresh line.
    pub(super) fn reset(&mut self) {
        self.thickness = if self.wrap { 0.0 } else { self.cross_dim };
        self.free = self.main_dim;
        self.grows = 0.0;
        self.shrinks = 0.0;
    }

    /// True if free main-axis space can be distributed.
    pub(super) fn bounded(&self) -> bool {
        self.main_dim.is_finite()
    }

    /// Default cross size for a child with an undefined cross size.
    pub(super) fn cross_default(&self, margin: &Sides) -> f32 {
        if self.cross_dim.is_finite() {
            (self.cross_dim - margin.total(self.cross)).max(0.0)
        } else {
            0.0
        }
    }
}

/// Leading offset and inter-item spacing for justification.
///
/// `free` is the positive free space and `count` the number of items
/// sharing it.
pub(super) fn justify_offsets(justify: Justify, free: f32, count: usize) -> (f32, f32) {
    let n = count as f32;
    match justify {
        Justify::Start => (0.0, 0.0),
        Justify::End => (free, 0.0),
        Justify::Center => (free / 2.0, 0.0),
        Justify::SpaceBetween => {
            if count > 1 {
                (0.0, free / (n - 1.0))
            } else {
                (0.0, 0.0)
            }
        }
        Justify::SpaceAround => {
            if count > 0 {
                let s = free / n;
                (s / 2.0, s)
            } else {
                (0.0, 0.0)
            }
        }
        Justify::SpaceEvenly => {
            let s = free / (n + 1.0);
            (s, s)
        }
    }
}

/// Leading offset, inter-line gap and per-line growth for `align_content`.
pub(super) fn content_offsets(align: AlignContent, free: f32, count: usize) -> (f32, f32, f32) {
    match align {
        AlignContent::Stretch => {
            if count > 0 {
                (0.0, 0.0, free / count as f32)
            } else {
                (0.0, 0.0, 0.0)
            }
        }
        AlignContent::Start => (0.0, 0.0, 0.0),
        AlignContent::End => (free, 0.0, 0.0),
        AlignContent::Center => (free / 2.0, 0.0, 0.0),
        AlignContent::SpaceBetween => {
            let (pos, gap) = justify_offsets(Justify::SpaceBetween, free, count);
            (pos, gap, 0.0)
        }
        AlignContent::SpaceAround => {
            let (pos, gap) = justify_offsets(Justify::SpaceAround, free, count);
            (pos, gap, 0.0)
        }
        AlignContent::SpaceEvenly => {
            let (pos, gap) = justify_offsets(Justify::SpaceEvenly, free, count);
            (pos, gap, 0.0)
        }
    }
}
