use serde::{Deserialize, Serialize};

use super::{Axis, Point, Rect};

/// A `Size` is a rectangle that has a width and height but no location.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Size {
    /// Construct a size.
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// The zero size.
    pub fn zero() -> Self {
        Self { w: 0.0, h: 0.0 }
    }

    /// An unbounded size, used for measuring natural extents.
    pub fn infinite() -> Self {
        Self {
            w: f32::INFINITY,
            h: f32::INFINITY,
        }
    }

    /// The extent along an axis.
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }

    /// Return a `Rect` with the same dimensions, located at the origin.
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.w,
            h: self.h,
        }
    }

    /// True if both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.h.is_finite()
    }
}
