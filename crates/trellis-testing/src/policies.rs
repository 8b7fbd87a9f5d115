//! Measure policies that record or script what the engine does with them.

use std::cell::Cell;
use std::rc::Rc;
use trellis_core::{MutableState, StateRuntime};
use trellis_ui_layout::{
    policy_intrinsic, AlignmentLine, AlignmentLineMap, Constraints, IntPx, IntrinsicKind,
    IntrinsicScope, LayoutError, MeasurePolicy, MeasureResult, MeasureScope, Measurable, Size,
};

/// Shared invocation counters of a [`CountingPolicy`].
#[derive(Clone, Debug, Default)]
pub struct Counters {
    measures: Rc<Cell<usize>>,
    placements: Rc<Cell<usize>>,
}

impl Counters {
    /// Times the measure block ran.
    pub fn measures(&self) -> usize {
        self.measures.get()
    }

    /// Times the placement block ran.
    pub fn placements(&self) -> usize {
        self.placements.get()
    }

    /// Both counts, then resets them to zero.
    pub fn take(&self) -> (usize, usize) {
        (self.measures.replace(0), self.placements.replace(0))
    }
}

/// Wraps a policy and counts how often its measure and placement blocks run.
///
/// Intrinsic queries are forwarded and not counted.
pub struct CountingPolicy {
    inner: Rc<dyn MeasurePolicy>,
    counters: Counters,
}

impl CountingPolicy {
    pub fn new(inner: impl MeasurePolicy + 'static) -> (Self, Counters) {
        let counters = Counters::default();
        (
            Self {
                inner: Rc::new(inner),
                counters: counters.clone(),
            },
            counters,
        )
    }
}

impl MeasurePolicy for CountingPolicy {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        self.counters.measures.set(self.counters.measures.get() + 1);
        let result = self.inner.measure(scope, measurables, constraints)?;
        let placements = Rc::clone(&self.counters.placements);
        let size = result.size;
        let lines = result.alignment_lines.clone();
        Ok(MeasureResult::new(size, lines, move |scope| {
            placements.set(placements.get() + 1);
            result.place_children(scope)
        }))
    }

    fn min_intrinsic_width(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        height: IntPx,
    ) -> IntPx {
        policy_intrinsic(&*self.inner, scope, measurables, IntrinsicKind::MinWidth(height))
    }

    fn max_intrinsic_width(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        height: IntPx,
    ) -> IntPx {
        policy_intrinsic(&*self.inner, scope, measurables, IntrinsicKind::MaxWidth(height))
    }

    fn min_intrinsic_height(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        width: IntPx,
    ) -> IntPx {
        policy_intrinsic(&*self.inner, scope, measurables, IntrinsicKind::MinHeight(width))
    }

    fn max_intrinsic_height(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        width: IntPx,
    ) -> IntPx {
        policy_intrinsic(&*self.inner, scope, measurables, IntrinsicKind::MaxHeight(width))
    }

    fn debug_name(&self) -> &str {
        self.inner.debug_name()
    }
}

/// A childless node whose size and alignment lines are observable state.
///
/// Writing the size or a line value invalidates the node's measure, so tests can
/// resize a leaf between passes the way a real content change would.
#[derive(Clone)]
pub struct FixedSizePolicy {
    pub size: MutableState<Size>,
    pub lines: Vec<(AlignmentLine, MutableState<IntPx>)>,
}

impl FixedSizePolicy {
    pub fn new(runtime: &StateRuntime, width: i32, height: i32) -> Self {
        Self {
            size: runtime.mutable_state_of(Size::px(width, height)),
            lines: Vec::new(),
        }
    }

    /// Adds a reported line and returns the state holding its value.
    pub fn with_line(
        mut self,
        runtime: &StateRuntime,
        line: AlignmentLine,
        value: i32,
    ) -> (Self, MutableState<IntPx>) {
        let state = runtime.mutable_state_of(IntPx(value));
        self.lines.push((line, state.clone()));
        (self, state)
    }

    pub fn resize(&self, width: i32, height: i32) {
        log::trace!("fixed-size policy resized to {}x{}", width, height);
        self.size.set(Size::px(width, height));
    }
}

impl MeasurePolicy for FixedSizePolicy {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        _measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let size = self.size.get(scope);
        let lines: AlignmentLineMap = self
            .lines
            .iter()
            .map(|(line, value)| (*line, value.get(scope)))
            .collect();
        Ok(MeasureResult::leaf(constraints.constrain(size)).with_alignment_lines(lines))
    }

    fn min_intrinsic_width(
        &self,
        _scope: &dyn IntrinsicScope,
        _measurables: &[Measurable],
        _height: IntPx,
    ) -> IntPx {
        self.size.get_untracked().width
    }

    fn max_intrinsic_width(
        &self,
        _scope: &dyn IntrinsicScope,
        _measurables: &[Measurable],
        _height: IntPx,
    ) -> IntPx {
        self.size.get_untracked().width
    }

    fn min_intrinsic_height(
        &self,
        _scope: &dyn IntrinsicScope,
        _measurables: &[Measurable],
        _width: IntPx,
    ) -> IntPx {
        self.size.get_untracked().height
    }

    fn max_intrinsic_height(
        &self,
        _scope: &dyn IntrinsicScope,
        _measurables: &[Measurable],
        _width: IntPx,
    ) -> IntPx {
        self.size.get_untracked().height
    }

    fn debug_name(&self) -> &str {
        "FixedSize"
    }
}
