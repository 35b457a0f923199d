use serde::{Deserialize, Serialize};

use super::{Axis, Point, Size};

/// An axis-aligned rectangle: a frame produced by layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Construct a rectangle from position and size components.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            tl: Point::new(x, y),
            w,
            h,
        }
    }

    /// The zero rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The size of this rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// The position along an axis.
    pub fn pos(&self, axis: Axis) -> f32 {
        self.tl.along(axis)
    }

    /// The extent along an axis.
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }

    /// Set the position along an axis.
    pub fn set_pos(&mut self, axis: Axis, v: f32) {
        self.tl.set_along(axis, v);
    }

    /// Set the extent along an axis.
    pub fn set_extent(&mut self, axis: Axis, v: f32) {
        match axis {
            Axis::Horizontal => self.w = v,
            Axis::Vertical => self.h = v,
        }
    }

    /// The far edge along an axis (position plus extent).
    pub fn far(&self, axis: Axis) -> f32 {
        self.pos(axis) + self.extent(axis)
    }

    /// True if any component is NaN.
    pub fn has_nan(&self) -> bool {
        self.tl.x.is_nan() || self.tl.y.is_nan() || self.w.is_nan() || self.h.is_nan()
    }
}
