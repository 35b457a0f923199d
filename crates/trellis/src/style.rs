//! Per-item layout inputs.
//!
//! A [`Style`] carries both the item properties (size, margins, flex factors,
//! alignment override) and the container properties that apply to the item's
//! children. Undefined lengths are `NaN`; in serialized form they are simply
//! omitted.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    geom::{Axis, Sides, UNDEFINED, is_defined},
};

/// Main-axis direction of a container.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Left to right.
    #[default]
    Row,
    /// Right to left.
    RowReverse,
    /// Top to bottom.
    Column,
    /// Bottom to top.
    ColumnReverse,
}

impl Direction {
    /// The main axis for this direction.
    pub fn axis(self) -> Axis {
        match self {
            Self::Row | Self::RowReverse => Axis::Horizontal,
            Self::Column | Self::ColumnReverse => Axis::Vertical,
        }
    }

    /// True if items are placed from the far end of the main axis.
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// Line wrapping behavior of a container.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Wrap {
    /// All items share a single line.
    #[default]
    NoWrap,
    /// Overflowing items start a new line after the current one.
    Wrap,
    /// Overflowing items start a new line, lines stack from the cross end.
    WrapReverse,
}

/// Distribution of free main-axis space when nothing grows.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Justify {
    /// Pack items at the start.
    #[default]
    Start,
    /// Pack items at the end.
    End,
    /// Center items.
    Center,
    /// First and last items touch the edges, equal gaps between.
    SpaceBetween,
    /// Equal space around every item, half-size gaps at the edges.
    SpaceAround,
    /// Equal gaps between items and at both edges.
    SpaceEvenly,
}

/// Default cross-axis alignment of a container's children.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    /// Align to the cross start.
    Start,
    /// Align to the cross end.
    End,
    /// Center on the cross axis.
    Center,
    /// Fill the line thickness.
    #[default]
    Stretch,
}

/// Per-item override of the parent's [`AlignItems`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignSelf {
    /// Use the parent's `align_items`.
    #[default]
    Auto,
    /// Align to the cross start.
    Start,
    /// Align to the cross end.
    End,
    /// Center on the cross axis.
    Center,
    /// Fill the line thickness.
    Stretch,
}

impl AlignSelf {
    /// Resolve against the parent's `align_items`.
    pub fn resolve(self, parent: AlignItems) -> AlignItems {
        match self {
            Self::Auto => parent,
            Self::Start => AlignItems::Start,
            Self::End => AlignItems::End,
            Self::Center => AlignItems::Center,
            Self::Stretch => AlignItems::Stretch,
        }
    }
}

/// Distribution of free cross-axis space between wrapped lines.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignContent {
    /// Pack lines at the start.
    Start,
    /// Pack lines at the end.
    End,
    /// Center lines.
    Center,
    /// Grow every line by an equal share.
    #[default]
    Stretch,
    /// First and last lines touch the edges.
    SpaceBetween,
    /// Equal space around every line.
    SpaceAround,
    /// Equal gaps between lines and at both edges.
    SpaceEvenly,
}

/// Positioning scheme of an item.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    /// Participates in flow layout.
    #[default]
    Relative,
    /// Placed by its offsets, outside of flow.
    Absolute,
}

/// Initial main-axis size before grow and shrink.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Basis {
    /// Use the item's own main-axis size.
    #[default]
    Auto,
    /// An absolute length.
    Length(f32),
    /// A fraction in `[0, 1]` of the container's content size.
    Relative(f32),
}

/// Layout inputs for one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Style {
    /// Requested width, `NaN` when undefined.
    #[serde(with = "length", skip_serializing_if = "length::is_undefined")]
    pub width: f32,
    /// Requested height, `NaN` when undefined.
    #[serde(with = "length", skip_serializing_if = "length::is_undefined")]
    pub height: f32,

    /// Absolute offset from the container's left edge.
    #[serde(with = "length", skip_serializing_if = "length::is_undefined")]
    pub left: f32,
    /// Absolute offset from the container's right edge.
    #[serde(with = "length", skip_serializing_if = "length::is_undefined")]
    pub right: f32,
    /// Absolute offset from the container's top edge.
    #[serde(with = "length", skip_serializing_if = "length::is_undefined")]
    pub top: f32,
    /// Absolute offset from the container's bottom edge.
    #[serde(with = "length", skip_serializing_if = "length::is_undefined")]
    pub bottom: f32,

    /// Outer spacing.
    pub margin: Sides,
    /// Inner spacing, non-negative.
    pub padding: Sides,

    /// Share of positive free space.
    pub grow: f32,
    /// Share of negative free space.
    pub shrink: f32,
    /// Initial main-axis size.
    pub basis: Basis,
    /// Visit order among siblings.
    pub order: i32,
    /// Positioning scheme.
    pub position: Position,
    /// Hidden items take no space and get a zero frame.
    pub visible: bool,
    /// Cross-axis alignment override.
    pub align_self: AlignSelf,

    /// Main-axis direction for children.
    pub direction: Direction,
    /// Wrapping of children into lines.
    pub wrap: Wrap,
    /// Main-axis distribution of free space.
    pub justify_content: Justify,
    /// Default cross-axis alignment of children.
    pub align_items: AlignItems,
    /// Distribution of free space between lines.
    pub align_content: AlignContent,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            width: UNDEFINED,
            height: UNDEFINED,
            left: UNDEFINED,
            right: UNDEFINED,
            top: UNDEFINED,
            bottom: UNDEFINED,
            margin: Sides::zero(),
            padding: Sides::zero(),
            grow: 0.0,
            shrink: 1.0,
            basis: Basis::Auto,
            order: 0,
            position: Position::Relative,
            visible: true,
            align_self: AlignSelf::Auto,
            direction: Direction::Row,
            wrap: Wrap::NoWrap,
            justify_content: Justify::Start,
            align_items: AlignItems::Stretch,
            align_content: AlignContent::Stretch,
        }
    }
}

impl Style {
    /// A container laying children out left to right.
    pub fn row() -> Self {
        Self::default()
    }

    /// A container laying children out top to bottom.
    pub fn column() -> Self {
        Self {
            direction: Direction::Column,
            ..Self::default()
        }
    }

    /// Set the main-axis direction.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set both requested dimensions.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the requested width.
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Set the requested height.
    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Set the grow factor.
    pub fn grow(mut self, grow: f32) -> Self {
        self.grow = grow;
        self
    }

    /// Set the shrink factor.
    pub fn shrink(mut self, shrink: f32) -> Self {
        self.shrink = shrink;
        self
    }

    /// Set the basis.
    pub fn basis(mut self, basis: Basis) -> Self {
        self.basis = basis;
        self
    }

    /// Set the sibling order.
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Set the margins.
    pub fn margin(mut self, margin: Sides) -> Self {
        self.margin = margin;
        self
    }

    /// Set the padding.
    pub fn padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self
    }

    /// Set line wrapping.
    pub fn wrap(mut self, wrap: Wrap) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set main-axis justification.
    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify_content = justify;
        self
    }

    /// Set the default cross-axis alignment of children.
    pub fn align_items(mut self, align: AlignItems) -> Self {
        self.align_items = align;
        self
    }

    /// Set the cross-axis alignment override.
    pub fn align_self(mut self, align: AlignSelf) -> Self {
        self.align_self = align;
        self
    }

    /// Set the distribution of space between lines.
    pub fn align_content(mut self, align: AlignContent) -> Self {
        self.align_content = align;
        self
    }

    /// Make the item absolutely positioned at the given offsets.
    pub fn absolute(mut self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        self.position = Position::Absolute;
        self.left = left;
        self.top = top;
        self.right = right;
        self.bottom = bottom;
        self
    }

    /// Set visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Requested size along an axis.
    pub(crate) fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Check every invariant of the style.
    pub fn validate(&self) -> Result<()> {
        factor("grow", self.grow)?;
        factor("shrink", self.shrink)?;
        match self.basis {
            Basis::Auto => {}
            Basis::Length(v) => {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::InvalidStyle(format!(
                        "basis length must be finite and non-negative, got {v}"
                    )));
                }
            }
            Basis::Relative(v) => {
                if !(0.0..=1.0).contains(&v) {
                    return Err(Error::InvalidStyle(format!(
                        "relative basis must lie in [0, 1], got {v}"
                    )));
                }
            }
        }
        self.padding
            .non_negative()
            .map_err(|e| Error::InvalidStyle(format!("padding {e}")))?;
        for (name, v) in [
            ("margin left", self.margin.left),
            ("margin top", self.margin.top),
            ("margin right", self.margin.right),
            ("margin bottom", self.margin.bottom),
        ] {
            if !v.is_finite() {
                return Err(Error::InvalidStyle(format!("{name} must be finite, got {v}")));
            }
        }
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if is_defined(v) && (!v.is_finite() || v < 0.0) {
                return Err(Error::InvalidStyle(format!(
                    "{name} must be undefined or finite and non-negative, got {v}"
                )));
            }
        }
        for (name, v) in [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ] {
            if v.is_infinite() {
                return Err(Error::InvalidStyle(format!("{name} must not be infinite")));
            }
        }
        Ok(())
    }
}

/// Check a grow or shrink factor.
fn factor(name: &str, v: f32) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidStyle(format!(
            "{name} must be finite and non-negative, got {v}"
        )))
    }
}

/// Serde adapter mapping `NaN` to an absent or null length.
mod length {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::geom::UNDEFINED;

    /// True if the length should be omitted.
    pub(super) fn is_undefined(v: &f32) -> bool {
        v.is_nan()
    }

    /// Serialize a length, writing `null` for `NaN`.
    pub(super) fn serialize<S: Serializer>(v: &f32, s: S) -> Result<S::Ok, S::Error> {
        if v.is_nan() {
            s.serialize_none()
        } else {
            s.serialize_some(v)
        }
    }

    /// Deserialize a length, reading `null` as `NaN`.
    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f32, D::Error> {
        Ok(Option::<f32>::deserialize(d)?.unwrap_or(UNDEFINED))
    }
}
