//! Alignment lines published by layouts for ancestor-driven alignment

use crate::units::{IntPx, Position};
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};

/// Function combining two values of the same line reported by different children.
pub type LineMerger = fn(IntPx, IntPx) -> IntPx;

/// Which axis an alignment line's value is measured on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineOrientation {
    /// A horizontal line, such as a baseline. Its value is a y offset.
    Horizontal,
    /// A vertical line. Its value is an x offset.
    Vertical,
}

const FIRST_BASELINE_ID: u32 = 1;
const LAST_BASELINE_ID: u32 = 2;
static NEXT_LINE_ID: AtomicU32 = AtomicU32::new(16);

/// A named offset a layout can publish to its ancestors.
///
/// Lines are compared by identity: two lines created by separate calls are
/// different even if their names and merge functions match.
#[derive(Clone, Copy)]
pub struct AlignmentLine {
    id: u32,
    name: &'static str,
    orientation: LineOrientation,
    merger: LineMerger,
}

/// The first baseline of text content. Merging keeps the topmost value.
pub const FIRST_BASELINE: AlignmentLine = AlignmentLine {
    id: FIRST_BASELINE_ID,
    name: "FirstBaseline",
    orientation: LineOrientation::Horizontal,
    merger: merge_min,
};

/// The last baseline of text content. Merging keeps the bottommost value.
pub const LAST_BASELINE: AlignmentLine = AlignmentLine {
    id: LAST_BASELINE_ID,
    name: "LastBaseline",
    orientation: LineOrientation::Horizontal,
    merger: merge_max,
};

pub fn merge_min(a: IntPx, b: IntPx) -> IntPx {
    a.min(b)
}

pub fn merge_max(a: IntPx, b: IntPx) -> IntPx {
    a.max(b)
}

impl AlignmentLine {
    pub fn new(name: &'static str, orientation: LineOrientation, merger: LineMerger) -> Self {
        Self {
            id: NEXT_LINE_ID.fetch_add(1, Ordering::Relaxed),
            name,
            orientation,
            merger,
        }
    }

    /// A line whose value is a y offset.
    pub fn horizontal(name: &'static str, merger: LineMerger) -> Self {
        Self::new(name, LineOrientation::Horizontal, merger)
    }

    /// A line whose value is an x offset.
    pub fn vertical(name: &'static str, merger: LineMerger) -> Self {
        Self::new(name, LineOrientation::Vertical, merger)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn orientation(&self) -> LineOrientation {
        self.orientation
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == LineOrientation::Vertical
    }

    pub fn merge(&self, a: IntPx, b: IntPx) -> IntPx {
        (self.merger)(a, b)
    }

    /// The component of `position` this line's values are measured on.
    pub fn offset_of(&self, position: Position) -> IntPx {
        match self.orientation {
            LineOrientation::Horizontal => position.y,
            LineOrientation::Vertical => position.x,
        }
    }
}

impl PartialEq for AlignmentLine {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AlignmentLine {}

impl Hash for AlignmentLine {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for AlignmentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}({:?})", self.name, self.id, self.orientation)
    }
}

/// Small insertion-ordered map from lines to offsets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlignmentLineMap {
    entries: SmallVec<[(AlignmentLine, IntPx); 2]>,
}

impl AlignmentLineMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, line: &AlignmentLine) -> Option<IntPx> {
        self.entries
            .iter()
            .find(|(key, _)| key == line)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, line: &AlignmentLine) -> bool {
        self.get(line).is_some()
    }

    /// Sets `line` to `value`, replacing any previous value.
    pub fn insert(&mut self, line: AlignmentLine, value: IntPx) {
        match self.entries.iter_mut().find(|(key, _)| *key == line) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((line, value)),
        }
    }

    /// Adds `value` for `line`, combining with an existing value through the
    /// line's merge function.
    pub fn merge(&mut self, line: AlignmentLine, value: IntPx) {
        match self.entries.iter_mut().find(|(key, _)| *key == line) {
            Some((key, existing)) => *existing = key.merge(*existing, value),
            None => self.entries.push((line, value)),
        }
    }

    /// Inserts every entry of `other`, overriding values already present.
    pub fn extend_overriding(&mut self, other: &AlignmentLineMap) {
        for (line, value) in other.iter() {
            self.insert(line, value);
        }
    }

    /// Shifts every value by the component of `position` on its line's axis.
    pub fn offset_by(&self, position: Position) -> AlignmentLineMap {
        self.iter()
            .map(|(line, value)| (line, value + line.offset_of(position)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AlignmentLine, IntPx)> + '_ {
        self.entries.iter().copied()
    }

    pub fn lines(&self) -> impl Iterator<Item = AlignmentLine> + '_ {
        self.entries.iter().map(|(line, _)| *line)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<(AlignmentLine, IntPx)> for AlignmentLineMap {
    fn from_iter<I: IntoIterator<Item = (AlignmentLine, IntPx)>>(iter: I) -> Self {
        let mut map = AlignmentLineMap::new();
        for (line, value) in iter {
            map.insert(line, value);
        }
        map
    }
}

#[cfg(test)]
#[path = "tests/alignment_line_tests.rs"]
mod tests;
