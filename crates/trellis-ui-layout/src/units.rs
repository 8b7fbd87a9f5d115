//! Integer pixel units used by every layout computation

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// An integer pixel value. `IntPx::INFINITY` marks an unbounded dimension and is
/// preserved by arithmetic: any operation with an infinite left operand (or an
/// infinite addend) stays infinite.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntPx(pub i32);

impl IntPx {
    pub const ZERO: IntPx = IntPx(0);
    pub const INFINITY: IntPx = IntPx(i32::MAX);

    #[inline]
    pub const fn new(value: i32) -> Self {
        IntPx(value)
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_finite(self) -> bool {
        self.0 != i32::MAX
    }

    #[inline]
    pub fn coerce_at_least(self, minimum: IntPx) -> IntPx {
        self.max(minimum)
    }

    #[inline]
    pub fn coerce_at_most(self, maximum: IntPx) -> IntPx {
        self.min(maximum)
    }

    /// Clamps into `[minimum, maximum]`. The lower bound wins when they cross.
    #[inline]
    pub fn coerce_in(self, minimum: IntPx, maximum: IntPx) -> IntPx {
        self.min(maximum).max(minimum)
    }

    /// Converts to `f32`, mapping the infinite sentinel to `f32::INFINITY`.
    pub fn to_f32(self) -> f32 {
        if self.is_finite() {
            self.0 as f32
        } else {
            f32::INFINITY
        }
    }

    /// Rounds a float to the nearest pixel, saturating non-finite values to infinity.
    pub fn round(value: f32) -> IntPx {
        if !value.is_finite() || value >= i32::MAX as f32 {
            IntPx::INFINITY
        } else {
            IntPx(value.round() as i32)
        }
    }
}

impl fmt::Debug for IntPx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_finite() {
            write!(f, "{}.ipx", self.0)
        } else {
            f.write_str("Infinity.ipx")
        }
    }
}

impl fmt::Display for IntPx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<i32> for IntPx {
    fn from(value: i32) -> Self {
        IntPx(value)
    }
}

impl Add for IntPx {
    type Output = IntPx;

    fn add(self, rhs: IntPx) -> IntPx {
        if !self.is_finite() || !rhs.is_finite() {
            return IntPx::INFINITY;
        }
        IntPx(self.0.saturating_add(rhs.0).min(i32::MAX - 1))
    }
}

impl AddAssign for IntPx {
    fn add_assign(&mut self, rhs: IntPx) {
        *self = *self + rhs;
    }
}

impl Sub for IntPx {
    type Output = IntPx;

    fn sub(self, rhs: IntPx) -> IntPx {
        if !self.is_finite() {
            return IntPx::INFINITY;
        }
        if !rhs.is_finite() {
            return IntPx(i32::MIN + 1);
        }
        IntPx(self.0.saturating_sub(rhs.0).min(i32::MAX - 1))
    }
}

impl SubAssign for IntPx {
    fn sub_assign(&mut self, rhs: IntPx) {
        *self = *self - rhs;
    }
}

impl Neg for IntPx {
    type Output = IntPx;

    /// The infinite sentinel negates to itself.
    fn neg(self) -> IntPx {
        if !self.is_finite() {
            return IntPx::INFINITY;
        }
        IntPx(self.0.saturating_neg())
    }
}

impl Mul<i32> for IntPx {
    type Output = IntPx;

    fn mul(self, rhs: i32) -> IntPx {
        if !self.is_finite() {
            return IntPx::INFINITY;
        }
        IntPx(self.0.saturating_mul(rhs).min(i32::MAX - 1))
    }
}

impl Mul<f32> for IntPx {
    type Output = IntPx;

    fn mul(self, rhs: f32) -> IntPx {
        if !self.is_finite() {
            return IntPx::INFINITY;
        }
        IntPx::round(self.0 as f32 * rhs)
    }
}

impl Div<i32> for IntPx {
    type Output = IntPx;

    fn div(self, rhs: i32) -> IntPx {
        if !self.is_finite() {
            return IntPx::INFINITY;
        }
        IntPx::round(self.0 as f32 / rhs as f32)
    }
}

impl Div<f32> for IntPx {
    type Output = IntPx;

    fn div(self, rhs: f32) -> IntPx {
        if !self.is_finite() {
            return IntPx::INFINITY;
        }
        IntPx::round(self.0 as f32 / rhs)
    }
}

/// Width and height of a measured layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: IntPx,
    pub height: IntPx,
}

impl Size {
    pub const ZERO: Size = Size {
        width: IntPx::ZERO,
        height: IntPx::ZERO,
    };

    pub const fn new(width: IntPx, height: IntPx) -> Self {
        Self { width, height }
    }

    pub const fn px(width: i32, height: i32) -> Self {
        Self::new(IntPx(width), IntPx(height))
    }
}

/// Offset of a layout relative to its parent's content box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: IntPx,
    pub y: IntPx,
}

impl Position {
    pub const ZERO: Position = Position {
        x: IntPx::ZERO,
        y: IntPx::ZERO,
    };

    pub const fn new(x: IntPx, y: IntPx) -> Self {
        Self { x, y }
    }

    pub const fn px(x: i32, y: i32) -> Self {
        Self::new(IntPx(x), IntPx(y))
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Position) {
        *self = *self + rhs;
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Insets on each side of a box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EdgeInsets {
    pub left: IntPx,
    pub top: IntPx,
    pub right: IntPx,
    pub bottom: IntPx,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        left: IntPx::ZERO,
        top: IntPx::ZERO,
        right: IntPx::ZERO,
        bottom: IntPx::ZERO,
    };

    pub fn uniform(all: i32) -> Self {
        Self::from_components(all, all, all, all)
    }

    pub fn horizontal(horizontal: i32) -> Self {
        Self::from_components(horizontal, 0, horizontal, 0)
    }

    pub fn vertical(vertical: i32) -> Self {
        Self::from_components(0, vertical, 0, vertical)
    }

    pub fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self::from_components(horizontal, vertical, horizontal, vertical)
    }

    pub fn from_components(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: IntPx(left),
            top: IntPx(top),
            right: IntPx(right),
            bottom: IntPx(bottom),
        }
    }

    /// `left + right`.
    pub fn horizontal_sum(&self) -> IntPx {
        self.left + self.right
    }

    /// `top + bottom`.
    pub fn vertical_sum(&self) -> IntPx {
        self.top + self.bottom
    }

    /// Offset of the inset content box.
    pub fn origin(&self) -> Position {
        Position::new(self.left, self.top)
    }
}

#[cfg(test)]
#[path = "tests/units_tests.rs"]
mod tests;
