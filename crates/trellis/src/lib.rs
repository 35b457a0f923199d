//! A flex-box layout engine over an arena of items.
//!
//! Items live in a [`Tree`] and carry a [`Style`] describing both how the
//! item sits in its parent and how it arranges its own children. Layout
//! produces a frame rectangle per item, relative to the parent's origin.

pub mod blueprint;
pub mod dump;
mod engine;
pub mod error;
mod id;
mod item;
pub mod prelude;
pub mod sizing;
pub mod style;
mod tree;

pub use trellis_geom as geom;

pub use blueprint::{Blueprint, Built};
pub use dump::dump;
pub use engine::{Frames, Measurement, Mode, arrange, measure};
pub use error::{Error, Result};
pub use id::ItemId;
pub use item::Item;
pub use sizing::{Fixed, SelfSizing};
pub use style::{
    AlignContent, AlignItems, AlignSelf, Basis, Direction, Justify, Position, Style, Wrap,
};
pub use tree::Tree;

pub use geom::{Axis, Point, Rect, Sides, Size, UNDEFINED};
