use serde::{Deserialize, Serialize};

use super::Axis;

/// A location in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Construct a point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// The coordinate along an axis.
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Set the coordinate along an axis.
    pub fn set_along(&mut self, axis: Axis, v: f32) {
        match axis {
            Axis::Horizontal => self.x = v,
            Axis::Vertical => self.y = v,
        }
    }
}
