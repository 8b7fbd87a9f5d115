//! Alignment utilities for positioning content

use crate::units::{IntPx, Position, Size};

/// Alignment across both axes used for positioning content within a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alignment {
    /// Horizontal alignment component.
    pub horizontal: HorizontalAlignment,
    /// Vertical alignment component.
    pub vertical: VerticalAlignment,
}

impl Alignment {
    /// Creates a new [`Alignment`] from explicit horizontal and vertical components.
    pub const fn new(horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub const TOP_START: Self = Self::new(HorizontalAlignment::Start, VerticalAlignment::Top);
    pub const TOP_CENTER: Self = Self::new(
        HorizontalAlignment::CenterHorizontally,
        VerticalAlignment::Top,
    );
    pub const TOP_END: Self = Self::new(HorizontalAlignment::End, VerticalAlignment::Top);
    pub const CENTER_START: Self = Self::new(
        HorizontalAlignment::Start,
        VerticalAlignment::CenterVertically,
    );
    pub const CENTER: Self = Self::new(
        HorizontalAlignment::CenterHorizontally,
        VerticalAlignment::CenterVertically,
    );
    pub const CENTER_END: Self = Self::new(
        HorizontalAlignment::End,
        VerticalAlignment::CenterVertically,
    );
    pub const BOTTOM_START: Self =
        Self::new(HorizontalAlignment::Start, VerticalAlignment::Bottom);
    pub const BOTTOM_CENTER: Self = Self::new(
        HorizontalAlignment::CenterHorizontally,
        VerticalAlignment::Bottom,
    );
    pub const BOTTOM_END: Self = Self::new(HorizontalAlignment::End, VerticalAlignment::Bottom);

    /// Offset of a `child` box aligned inside a `container` box.
    ///
    /// The offset is computed from the free space and the bias and rounded once,
    /// so odd free space never loses a pixel at the end edge.
    pub fn align(&self, container: Size, child: Size) -> Position {
        Position::new(
            self.horizontal.align(container.width, child.width),
            self.vertical.align(container.height, child.height),
        )
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::TOP_START
    }
}

fn biased_offset(available: IntPx, child: IntPx, bias: f32) -> IntPx {
    let free = (available - child).to_f32();
    if !free.is_finite() {
        return IntPx::ZERO;
    }
    IntPx::round(free / 2.0 * (1.0 + bias))
}

/// Alignment along the horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Align children to the leading edge.
    Start,
    /// Align children to the horizontal center.
    CenterHorizontally,
    /// Align children to the trailing edge.
    End,
}

impl HorizontalAlignment {
    /// Position on the `[-1, 1]` start-to-end range.
    pub fn bias(&self) -> f32 {
        match self {
            HorizontalAlignment::Start => -1.0,
            HorizontalAlignment::CenterHorizontally => 0.0,
            HorizontalAlignment::End => 1.0,
        }
    }

    /// Computes the horizontal offset for alignment.
    pub fn align(&self, available: IntPx, child: IntPx) -> IntPx {
        biased_offset(available, child, self.bias())
    }
}

/// Alignment along the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalAlignment {
    /// Align children to the top edge.
    Top,
    /// Align children to the vertical center.
    CenterVertically,
    /// Align children to the bottom edge.
    Bottom,
}

impl VerticalAlignment {
    /// Position on the `[-1, 1]` top-to-bottom range.
    pub fn bias(&self) -> f32 {
        match self {
            VerticalAlignment::Top => -1.0,
            VerticalAlignment::CenterVertically => 0.0,
            VerticalAlignment::Bottom => 1.0,
        }
    }

    /// Computes the vertical offset for alignment.
    pub fn align(&self, available: IntPx, child: IntPx) -> IntPx {
        biased_offset(available, child, self.bias())
    }
}

#[cfg(test)]
#[path = "tests/alignment_tests.rs"]
mod tests;
