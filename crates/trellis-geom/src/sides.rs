use serde::{Deserialize, Serialize};

use super::{Axis, Error, Result};

/// Thickness on each side of a box, used for margins and padding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sides {
    /// Left thickness.
    pub left: f32,
    /// Top thickness.
    pub top: f32,
    /// Right thickness.
    pub right: f32,
    /// Bottom thickness.
    pub bottom: f32,
}

impl Sides {
    /// Construct sides in left, top, right, bottom order.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same thickness on every side.
    pub fn all(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Zero thickness.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Thickness on the leading edge of an axis (left or top).
    pub fn leading(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Thickness on the trailing edge of an axis (right or bottom).
    pub fn trailing(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    /// Combined thickness along an axis.
    pub fn total(&self, axis: Axis) -> f32 {
        self.leading(axis) + self.trailing(axis)
    }

    /// Check that every side is a finite, non-negative number.
    pub fn non_negative(self) -> Result<Self> {
        for (name, v) in [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::Geometry(format!(
                    "{name} must be finite and non-negative, got {v}"
                )));
            }
        }
        Ok(self)
    }
}
