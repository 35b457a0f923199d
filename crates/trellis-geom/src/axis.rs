use serde::{Deserialize, Serialize};

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// The x axis; sizes are widths.
    Horizontal,
    /// The y axis; sizes are heights.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}
