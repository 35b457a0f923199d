//! Geometry primitives used by the trellis layout engine.
//!
//! All quantities are `f32`. An undefined length is represented as `NaN`;
//! see [`is_defined`].

#![warn(missing_docs)]

/// Main/cross axis selection.
mod axis;
/// Error types for geometry operations.
mod error;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// Four-sided thickness (margins and padding).
mod sides;
/// Width/height size type.
mod size;

pub use axis::Axis;
pub use error::{Error, Result};
pub use point::Point;
pub use rect::Rect;
pub use sides::Sides;
pub use size::Size;

/// Marker value for an undefined length.
pub const UNDEFINED: f32 = f32::NAN;

/// Return true if a length is defined (not NaN).
#[inline]
pub fn is_defined(v: f32) -> bool {
    !v.is_nan()
}
