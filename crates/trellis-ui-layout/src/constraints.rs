//! Layout constraints system

use crate::units::{IntPx, Size};

/// Immutable bounds offered to a child during measurement.
///
/// Every combinator keeps `0 <= min <= max` on both axes; `max` may be
/// [`IntPx::INFINITY`]. Inconsistent inputs are clamped rather than rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Constraints {
    pub min_width: IntPx,
    pub max_width: IntPx,
    pub min_height: IntPx,
    pub max_height: IntPx,
}

impl Constraints {
    /// Creates constraints, clamping mins at zero and maxes at their min.
    pub fn new(min_width: IntPx, max_width: IntPx, min_height: IntPx, max_height: IntPx) -> Self {
        let min_width = min_width.coerce_at_least(IntPx::ZERO);
        let min_height = min_height.coerce_at_least(IntPx::ZERO);
        Self {
            min_width,
            max_width: max_width.coerce_at_least(min_width),
            min_height,
            max_height: max_height.coerce_at_least(min_height),
        }
    }

    /// Constraints that accept any size.
    pub const fn unbounded() -> Self {
        Self {
            min_width: IntPx::ZERO,
            max_width: IntPx::INFINITY,
            min_height: IntPx::ZERO,
            max_height: IntPx::INFINITY,
        }
    }

    /// Creates constraints with exact width and height.
    pub fn tight(width: IntPx, height: IntPx) -> Self {
        Self::new(width, width, height, height)
    }

    /// Creates constraints with loose bounds (min = 0, max = given values).
    pub fn loose(max_width: IntPx, max_height: IntPx) -> Self {
        Self::new(IntPx::ZERO, max_width, IntPx::ZERO, max_height)
    }

    /// Exact width, unbounded height.
    pub fn fixed_width(width: IntPx) -> Self {
        Self::new(width, width, IntPx::ZERO, IntPx::INFINITY)
    }

    /// Exact height, unbounded width.
    pub fn fixed_height(height: IntPx) -> Self {
        Self::new(IntPx::ZERO, IntPx::INFINITY, height, height)
    }

    /// Returns true if exactly one finite size satisfies these constraints.
    pub fn is_tight(&self) -> bool {
        self.has_tight_width() && self.has_tight_height()
    }

    /// Returns true if the width is tight (min == max). An infinite max is never tight.
    #[inline]
    pub fn has_tight_width(&self) -> bool {
        self.max_width.is_finite() && self.min_width == self.max_width
    }

    /// Returns true if the height is tight (min == max). An infinite max is never tight.
    #[inline]
    pub fn has_tight_height(&self) -> bool {
        self.max_height.is_finite() && self.min_height == self.max_height
    }

    #[inline]
    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    #[inline]
    pub fn has_bounded_height(&self) -> bool {
        self.max_height.is_finite()
    }

    /// Returns true if only the zero size satisfies these constraints.
    pub fn is_zero(&self) -> bool {
        self.max_width == IntPx::ZERO && self.max_height == IntPx::ZERO
    }

    /// Clamps a size into these constraints.
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            size.width.coerce_in(self.min_width, self.max_width),
            size.height.coerce_in(self.min_height, self.max_height),
        )
    }

    /// Returns true if `size` lies within these constraints on both axes.
    pub fn satisfied_by(&self, size: Size) -> bool {
        self.min_width <= size.width
            && size.width <= self.max_width
            && self.min_height <= size.height
            && size.height <= self.max_height
    }

    /// Fixes the given axes to a single value, clamped into the current bounds.
    pub fn tighten(self, width: Option<IntPx>, height: Option<IntPx>) -> Self {
        let (min_width, max_width) = match width {
            Some(width) => {
                let width = width.coerce_in(self.min_width, self.max_width);
                (width, width)
            }
            None => (self.min_width, self.max_width),
        };
        let (min_height, max_height) = match height {
            Some(height) => {
                let height = height.coerce_in(self.min_height, self.max_height);
                (height, height)
            }
            None => (self.min_height, self.max_height),
        };
        Self::new(min_width, max_width, min_height, max_height)
    }

    /// Creates new constraints with loosened minimums (min = 0).
    pub fn loosen(self) -> Self {
        Self {
            min_width: IntPx::ZERO,
            min_height: IntPx::ZERO,
            ..self
        }
    }

    /// Shifts both bounds of each axis by the given deltas, clamping at zero and
    /// never letting a max fall below its min. Infinite maxes stay infinite.
    pub fn offset(self, horizontal: IntPx, vertical: IntPx) -> Self {
        Self::new(
            (self.min_width + horizontal).coerce_at_least(IntPx::ZERO),
            (self.max_width + horizontal).coerce_at_least(IntPx::ZERO),
            (self.min_height + vertical).coerce_at_least(IntPx::ZERO),
            (self.max_height + vertical).coerce_at_least(IntPx::ZERO),
        )
    }

    /// Intersects with `other`: each bound of `self` is clamped into `other`'s range.
    pub fn enforce(self, other: Constraints) -> Self {
        Self::new(
            self.min_width.coerce_in(other.min_width, other.max_width),
            self.max_width.coerce_in(other.min_width, other.max_width),
            self.min_height.coerce_in(other.min_height, other.max_height),
            self.max_height.coerce_in(other.min_height, other.max_height),
        )
    }

    /// Creates new constraints with the given width bounds.
    pub fn copy_with_width(self, min_width: IntPx, max_width: IntPx) -> Self {
        Self::new(min_width, max_width, self.min_height, self.max_height)
    }

    /// Creates new constraints with the given height bounds.
    pub fn copy_with_height(self, min_height: IntPx, max_height: IntPx) -> Self {
        Self::new(self.min_width, self.max_width, min_height, max_height)
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
#[path = "tests/constraints_tests.rs"]
mod tests;
