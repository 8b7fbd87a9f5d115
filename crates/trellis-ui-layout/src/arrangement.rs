//! Main-axis distribution of children.

use crate::units::IntPx;

/// How a row, column or flow run spreads its children along the main axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LinearArrangement {
    /// Packed against the leading edge.
    #[default]
    Start,
    /// Packed against the trailing edge.
    End,
    /// Packed in the middle.
    Center,
    /// First and last child touch the edges, free space split between the others.
    SpaceBetween,
    /// Every child gets an equal share of free space, half of it on each side.
    SpaceAround,
    /// Equal gaps before, between and after the children.
    SpaceEvenly,
    /// Packed against the leading edge with a fixed gap between children.
    SpacedBy(IntPx),
}

impl LinearArrangement {
    pub fn spaced_by(spacing: IntPx) -> Self {
        Self::SpacedBy(spacing)
    }

    /// Gap that does not depend on free space, added to a container's content size.
    pub fn fixed_spacing(&self) -> IntPx {
        match *self {
            Self::SpacedBy(spacing) => spacing.coerce_at_least(IntPx::ZERO),
            _ => IntPx::ZERO,
        }
    }

    /// Writes the leading-edge offset of each child into `positions`.
    ///
    /// Free space is what `total` leaves after `sizes`; an unbounded or overflowed
    /// total has none, so every arrangement then packs from the start (`SpacedBy`
    /// still inserts its gap).
    pub fn arrange(&self, total: IntPx, sizes: &[IntPx], positions: &mut [IntPx]) {
        debug_assert_eq!(sizes.len(), positions.len());
        if sizes.is_empty() {
            return;
        }
        let used: f32 = sizes.iter().map(|size| size.to_f32()).sum();
        let free = if total.is_finite() {
            (total.to_f32() - used).max(0.0)
        } else {
            0.0
        };
        let (leading, gap) = self.leading_and_gap(free, sizes.len() as f32);

        // Offsets accumulate unrounded so fractional gaps do not drift.
        let mut cursor = leading;
        for (size, position) in sizes.iter().zip(positions.iter_mut()) {
            *position = IntPx::round(cursor);
            cursor += size.to_f32() + gap;
        }
    }

    fn leading_and_gap(&self, free: f32, count: f32) -> (f32, f32) {
        match *self {
            Self::Start => (0.0, 0.0),
            Self::End => (free, 0.0),
            Self::Center => (free / 2.0, 0.0),
            Self::SpaceBetween if count > 1.0 => (0.0, free / (count - 1.0)),
            Self::SpaceBetween => (0.0, 0.0),
            Self::SpaceAround => (free / count / 2.0, free / count),
            Self::SpaceEvenly => {
                let gap = free / (count + 1.0);
                (gap, gap)
            }
            Self::SpacedBy(_) => (0.0, self.fixed_spacing().to_f32()),
        }
    }
}

#[cfg(test)]
#[path = "tests/arrangement_tests.rs"]
mod tests;
