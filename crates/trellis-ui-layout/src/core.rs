//! Core layout traits and types shared by Trellis layouts.

use crate::alignment_line::{AlignmentLine, AlignmentLineMap};
use crate::constraints::Constraints;
use crate::error::LayoutError;
use crate::intrinsics::IntrinsicKind;
use crate::units::{IntPx, Position, Size};
use std::any::Any;
use std::fmt;
use std::rc::Rc;
use trellis_core::{NodeId, ReadObserver, StateId};

/// Parent data for flex layouts (Row/Column weights and fill).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlexParentData {
    /// Weight for distributing remaining space in the main axis.
    /// If > 0.0, this child participates in weighted distribution.
    pub weight: f32,

    /// Whether to fill the allocated space when using weight.
    /// If true, child gets tight constraints; if false, child gets loose constraints.
    pub fill: bool,
}

impl FlexParentData {
    pub fn new(weight: f32, fill: bool) -> Self {
        Self { weight, fill }
    }

    pub fn has_weight(&self) -> bool {
        self.weight > 0.0
    }
}

/// Handle to a child that can be measured at most once per measure or layout block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Measurable {
    node: NodeId,
}

impl Measurable {
    pub fn new(node: NodeId) -> Self {
        Self { node }
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }
}

/// Result of measuring a child: its size, and the handle needed to place it.
///
/// Placeables produced while computing intrinsics carry no node. Placing them
/// does nothing and they report no alignment lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placeable {
    node: Option<NodeId>,
    size: Size,
}

impl Placeable {
    pub fn new(node: NodeId, size: Size) -> Self {
        Self {
            node: Some(node),
            size,
        }
    }

    /// A placeable detached from any node.
    pub fn detached(size: Size) -> Self {
        Self { node: None, size }
    }

    pub fn width(&self) -> IntPx {
        self.size.width
    }

    pub fn height(&self) -> IntPx {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn node_id(&self) -> Option<NodeId> {
        self.node
    }
}

/// Read-only view used to answer intrinsic size queries about children.
///
/// Intrinsic queries never measure, so they may be asked any number of times and
/// from any phase.
pub trait IntrinsicScope {
    fn min_intrinsic_width(&self, measurable: Measurable, height: IntPx) -> IntPx;

    fn max_intrinsic_width(&self, measurable: Measurable, height: IntPx) -> IntPx;

    fn min_intrinsic_height(&self, measurable: Measurable, width: IntPx) -> IntPx;

    fn max_intrinsic_height(&self, measurable: Measurable, width: IntPx) -> IntPx;

    /// Data the child attached for its parent's policy, after modifiers are folded in.
    fn parent_data(&self, measurable: Measurable) -> Option<&dyn Any>;

    fn intrinsic(&self, measurable: Measurable, kind: IntrinsicKind) -> IntPx {
        match kind {
            IntrinsicKind::MinWidth(height) => self.min_intrinsic_width(measurable, height),
            IntrinsicKind::MaxWidth(height) => self.max_intrinsic_width(measurable, height),
            IntrinsicKind::MinHeight(width) => self.min_intrinsic_height(measurable, width),
            IntrinsicKind::MaxHeight(width) => self.max_intrinsic_height(measurable, width),
        }
    }
}

impl dyn IntrinsicScope + '_ {
    /// Returns the child's parent data if it is of type `T`.
    pub fn parent_data_as<T: 'static>(&self, measurable: Measurable) -> Option<&T> {
        self.parent_data(measurable)
            .and_then(|data| data.downcast_ref::<T>())
    }

    /// The flex weight and fill attached to `measurable`, or the inflexible default.
    pub fn flex_parent_data(&self, measurable: Measurable) -> FlexParentData {
        self.parent_data_as::<FlexParentData>(measurable)
            .copied()
            .unwrap_or_default()
    }
}

/// Scope handed to a policy's measure block.
///
/// Reads of observable state made through the scope make the node's measure
/// depend on that state.
pub trait MeasureScope: ReadObserver {
    /// Measures `measurable`. A child may be measured at most once per block.
    fn measure(
        &mut self,
        measurable: Measurable,
        constraints: Constraints,
    ) -> Result<Placeable, LayoutError>;

    /// Value of `line` reported by a measured child, in the child's coordinates.
    fn alignment_line(
        &mut self,
        placeable: &Placeable,
        line: &AlignmentLine,
    ) -> Result<Option<IntPx>, LayoutError>;

    fn intrinsics(&self) -> &dyn IntrinsicScope;
}

/// Scope handed to a measure result's placement block.
pub trait PlacementScope: ReadObserver {
    /// Places a child relative to the parent's content box. Placing the same child
    /// twice moves it; the last position wins.
    fn place(&mut self, placeable: &Placeable, position: Position) -> Result<(), LayoutError>;

    fn place_at(&mut self, placeable: &Placeable, x: IntPx, y: IntPx) -> Result<(), LayoutError> {
        self.place(placeable, Position::new(x, y))
    }

    /// Measures a child from the placement block. Such a measurement does not
    /// make the parent's size depend on the child.
    fn measure(
        &mut self,
        measurable: Measurable,
        constraints: Constraints,
    ) -> Result<Placeable, LayoutError>;

    fn alignment_line(
        &mut self,
        placeable: &Placeable,
        line: &AlignmentLine,
    ) -> Result<Option<IntPx>, LayoutError>;

    fn intrinsics(&self) -> &dyn IntrinsicScope;
}

type PlacementBlock = Rc<dyn Fn(&mut dyn PlacementScope) -> Result<(), LayoutError>>;

/// Size, provided alignment lines and deferred placement of a measured layout.
#[derive(Clone)]
pub struct MeasureResult {
    pub size: Size,
    pub alignment_lines: AlignmentLineMap,
    placement: PlacementBlock,
}

impl MeasureResult {
    pub fn new(
        size: Size,
        alignment_lines: AlignmentLineMap,
        placement: impl Fn(&mut dyn PlacementScope) -> Result<(), LayoutError> + 'static,
    ) -> Self {
        Self {
            size,
            alignment_lines,
            placement: Rc::new(placement),
        }
    }

    /// A result that places each measured child at a precomputed position.
    pub fn with_placements(size: Size, placements: Vec<Placement>) -> Self {
        Self::new(size, AlignmentLineMap::new(), move |scope| {
            for placement in &placements {
                scope.place(&placement.placeable, placement.position)?;
            }
            Ok(())
        })
    }

    /// A result without children to place.
    pub fn leaf(size: Size) -> Self {
        Self::new(size, AlignmentLineMap::new(), |_| Ok(()))
    }

    pub fn with_alignment_lines(mut self, alignment_lines: AlignmentLineMap) -> Self {
        self.alignment_lines = alignment_lines;
        self
    }

    /// Runs the placement block.
    pub fn place_children(&self, scope: &mut dyn PlacementScope) -> Result<(), LayoutError> {
        (self.placement)(scope)
    }
}

impl fmt::Debug for MeasureResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasureResult")
            .field("size", &self.size)
            .field("alignment_lines", &self.alignment_lines)
            .finish_non_exhaustive()
    }
}

/// Placement information for a measured child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub placeable: Placeable,
    pub position: Position,
}

impl Placement {
    pub fn new(placeable: Placeable, position: Position) -> Self {
        Self {
            placeable,
            position,
        }
    }
}

/// Policy responsible for measuring and placing children.
pub trait MeasurePolicy {
    /// Runs the measure block with the provided children and constraints.
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError>;

    /// Computes the minimum intrinsic width of this policy.
    fn min_intrinsic_width(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        height: IntPx,
    ) -> IntPx {
        measuring_intrinsic(self, scope, measurables, IntrinsicKind::MinWidth(height))
    }

    /// Computes the maximum intrinsic width of this policy.
    fn max_intrinsic_width(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        height: IntPx,
    ) -> IntPx {
        measuring_intrinsic(self, scope, measurables, IntrinsicKind::MaxWidth(height))
    }

    /// Computes the minimum intrinsic height of this policy.
    fn min_intrinsic_height(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        width: IntPx,
    ) -> IntPx {
        measuring_intrinsic(self, scope, measurables, IntrinsicKind::MinHeight(width))
    }

    /// Computes the maximum intrinsic height of this policy.
    fn max_intrinsic_height(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        width: IntPx,
    ) -> IntPx {
        measuring_intrinsic(self, scope, measurables, IntrinsicKind::MaxHeight(width))
    }

    fn debug_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Dispatches an [`IntrinsicKind`] to the matching policy method.
pub fn policy_intrinsic<P: MeasurePolicy + ?Sized>(
    policy: &P,
    scope: &dyn IntrinsicScope,
    measurables: &[Measurable],
    kind: IntrinsicKind,
) -> IntPx {
    match kind {
        IntrinsicKind::MinWidth(height) => policy.min_intrinsic_width(scope, measurables, height),
        IntrinsicKind::MaxWidth(height) => policy.max_intrinsic_width(scope, measurables, height),
        IntrinsicKind::MinHeight(width) => policy.min_intrinsic_height(scope, measurables, width),
        IntrinsicKind::MaxHeight(width) => policy.max_intrinsic_height(scope, measurables, width),
    }
}

/// Answers an intrinsic query by running the policy's measure block against
/// stand-in children whose measured size is their own intrinsic size.
///
/// A width query measures with an unbounded width and the given height as the
/// max height; a height query is symmetric.
pub fn measuring_intrinsic<P: MeasurePolicy + ?Sized>(
    policy: &P,
    scope: &dyn IntrinsicScope,
    measurables: &[Measurable],
    kind: IntrinsicKind,
) -> IntPx {
    let constraints = match kind {
        IntrinsicKind::MinWidth(height) | IntrinsicKind::MaxWidth(height) => {
            Constraints::new(IntPx::ZERO, IntPx::INFINITY, IntPx::ZERO, height)
        }
        IntrinsicKind::MinHeight(width) | IntrinsicKind::MaxHeight(width) => {
            Constraints::new(IntPx::ZERO, width, IntPx::ZERO, IntPx::INFINITY)
        }
    };
    let mut estimate = IntrinsicEstimateScope { scope, kind };
    match policy.measure(&mut estimate, measurables, constraints) {
        Ok(result) if kind.is_width() => result.size.width,
        Ok(result) => result.size.height,
        Err(err) => {
            log::warn!(
                "intrinsic {:?} of {} failed: {}",
                kind,
                policy.debug_name(),
                err
            );
            IntPx::ZERO
        }
    }
}

struct IntrinsicEstimateScope<'a> {
    scope: &'a dyn IntrinsicScope,
    kind: IntrinsicKind,
}

impl ReadObserver for IntrinsicEstimateScope<'_> {
    fn record_read(&mut self, _state: StateId) {}
}

impl MeasureScope for IntrinsicEstimateScope<'_> {
    fn measure(
        &mut self,
        measurable: Measurable,
        constraints: Constraints,
    ) -> Result<Placeable, LayoutError> {
        let size = if self.kind.is_width() {
            let height = if constraints.has_bounded_height() {
                constraints.max_height
            } else {
                constraints.min_height
            };
            let width = self.scope.intrinsic(
                measurable,
                self.kind.with_cross_size(constraints.max_height),
            );
            Size::new(width, height)
        } else {
            let width = if constraints.has_bounded_width() {
                constraints.max_width
            } else {
                constraints.min_width
            };
            let height = self.scope.intrinsic(
                measurable,
                self.kind.with_cross_size(constraints.max_width),
            );
            Size::new(width, height)
        };
        Ok(Placeable::detached(size))
    }

    fn alignment_line(
        &mut self,
        _placeable: &Placeable,
        _line: &AlignmentLine,
    ) -> Result<Option<IntPx>, LayoutError> {
        Ok(None)
    }

    fn intrinsics(&self) -> &dyn IntrinsicScope {
        self.scope
    }
}

#[cfg(test)]
#[path = "tests/core_tests.rs"]
mod tests;
