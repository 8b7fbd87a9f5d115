use crate::constraints::Constraints;
use crate::units::{IntPx, Position, Size};

/// The primary axis of a flex or flow layout.
///
/// Children are laid out along the main axis and aligned on the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Main axis runs left to right (Row).
    Horizontal,
    /// Main axis runs top to bottom (Column).
    Vertical,
}

impl Axis {
    /// Returns the opposite axis.
    #[inline]
    pub fn cross_axis(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Horizontal)
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Axis::Vertical)
    }

    /// Extent of `size` along this axis.
    #[inline]
    pub fn main_of(self, size: Size) -> IntPx {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Extent of `size` across this axis.
    #[inline]
    pub fn cross_of(self, size: Size) -> IntPx {
        self.cross_axis().main_of(size)
    }

    /// Builds a size from main/cross extents.
    pub fn size(self, main: IntPx, cross: IntPx) -> Size {
        match self {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }

    /// Builds a position from main/cross offsets.
    pub fn position(self, main: IntPx, cross: IntPx) -> Position {
        match self {
            Axis::Horizontal => Position::new(main, cross),
            Axis::Vertical => Position::new(cross, main),
        }
    }

    /// `(min_main, max_main, min_cross, max_cross)` of `constraints`.
    pub fn split(self, constraints: Constraints) -> (IntPx, IntPx, IntPx, IntPx) {
        match self {
            Axis::Horizontal => (
                constraints.min_width,
                constraints.max_width,
                constraints.min_height,
                constraints.max_height,
            ),
            Axis::Vertical => (
                constraints.min_height,
                constraints.max_height,
                constraints.min_width,
                constraints.max_width,
            ),
        }
    }

    /// Builds constraints from main/cross bounds.
    pub fn constraints(
        self,
        min_main: IntPx,
        max_main: IntPx,
        min_cross: IntPx,
        max_cross: IntPx,
    ) -> Constraints {
        match self {
            Axis::Horizontal => Constraints::new(min_main, max_main, min_cross, max_cross),
            Axis::Vertical => Constraints::new(min_cross, max_cross, min_main, max_main),
        }
    }
}
