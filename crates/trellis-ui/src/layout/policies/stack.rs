use smallvec::SmallVec;
use trellis_ui_layout::{
    Alignment, Constraints, IntPx, LayoutError, MeasurePolicy, MeasureResult, MeasureScope,
    Measurable, Placeable, Placement, Position, Size,
};

/// How a child of a [`StackMeasurePolicy`] is sized and placed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StackParentData {
    /// The child sizes the stack and is aligned inside it. A loose child is
    /// measured without the stack's min constraints.
    Aligned { alignment: Alignment, loose: bool },
    /// The child fills the stack.
    Expanded,
    /// The child is placed at insets from the stack's edges. With both insets
    /// of an axis set the child's size on that axis is fixed; with neither, the
    /// fallback alignment positions it.
    Positioned {
        left: Option<IntPx>,
        top: Option<IntPx>,
        right: Option<IntPx>,
        bottom: Option<IntPx>,
        fallback: Alignment,
    },
}

impl StackParentData {
    pub fn aligned(alignment: Alignment) -> Self {
        StackParentData::Aligned {
            alignment,
            loose: true,
        }
    }

    /// Aligned child that receives the stack's min constraints.
    pub fn aligned_tight(alignment: Alignment) -> Self {
        StackParentData::Aligned {
            alignment,
            loose: false,
        }
    }

    pub fn expanded() -> Self {
        StackParentData::Expanded
    }

    pub fn positioned(
        left: Option<i32>,
        top: Option<i32>,
        right: Option<i32>,
        bottom: Option<i32>,
    ) -> Self {
        StackParentData::Positioned {
            left: left.map(IntPx),
            top: top.map(IntPx),
            right: right.map(IntPx),
            bottom: bottom.map(IntPx),
            fallback: Alignment::CENTER,
        }
    }

    /// Replaces the fallback alignment of a positioned child.
    pub fn with_fallback(self, alignment: Alignment) -> Self {
        match self {
            StackParentData::Positioned {
                left,
                top,
                right,
                bottom,
                ..
            } => StackParentData::Positioned {
                left,
                top,
                right,
                bottom,
                fallback: alignment,
            },
            other => other,
        }
    }
}

/// Overlays children. Aligned children determine the size; expanded and
/// positioned children are fitted into it afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct StackMeasurePolicy {
    /// Alignment of children that carry no [`StackParentData`].
    pub default_alignment: Alignment,
}

impl StackMeasurePolicy {
    pub fn new(default_alignment: Alignment) -> Self {
        Self { default_alignment }
    }
}

impl Default for StackMeasurePolicy {
    fn default() -> Self {
        Self::new(Alignment::TOP_START)
    }
}

/// Size and offset of a positioned child on one axis.
fn inset_bounds(
    start: Option<IntPx>,
    end: Option<IntPx>,
    available: IntPx,
) -> (IntPx, IntPx) {
    match (start, end) {
        (Some(start), Some(end)) => {
            let size = (available - start - end).coerce_at_least(IntPx::ZERO);
            (size, size)
        }
        _ => (IntPx::ZERO, available),
    }
}

fn inset_offset(
    start: Option<IntPx>,
    end: Option<IntPx>,
    available: IntPx,
    child: IntPx,
    fallback: IntPx,
) -> IntPx {
    match (start, end) {
        (Some(start), _) => start,
        (None, Some(end)) => available - end - child,
        (None, None) => fallback,
    }
}

impl MeasurePolicy for StackMeasurePolicy {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let data: SmallVec<[StackParentData; 8]> = measurables
            .iter()
            .map(|m| {
                scope
                    .intrinsics()
                    .parent_data_as::<StackParentData>(*m)
                    .copied()
                    .unwrap_or_else(|| StackParentData::aligned(self.default_alignment))
            })
            .collect();

        let mut placeables: SmallVec<[Option<Placeable>; 8]> =
            SmallVec::from_elem(None, measurables.len());
        let mut content = Size::ZERO;
        let mut has_expanded = false;
        for (index, measurable) in measurables.iter().enumerate() {
            match data[index] {
                StackParentData::Aligned { loose, .. } => {
                    let child_constraints = if loose {
                        constraints.loosen()
                    } else {
                        constraints
                    };
                    let placeable = scope.measure(*measurable, child_constraints)?;
                    content.width = content.width.max(placeable.width());
                    content.height = content.height.max(placeable.height());
                    placeables[index] = Some(placeable);
                }
                StackParentData::Expanded => has_expanded = true,
                StackParentData::Positioned { .. } => {}
            }
        }

        let mut size = constraints.constrain(content);
        if has_expanded {
            if constraints.has_bounded_width() {
                size.width = constraints.max_width;
            }
            if constraints.has_bounded_height() {
                size.height = constraints.max_height;
            }
        }

        for (index, measurable) in measurables.iter().enumerate() {
            match data[index] {
                StackParentData::Expanded => {
                    let tight = Constraints::tight(size.width, size.height);
                    placeables[index] = Some(scope.measure(*measurable, tight)?);
                }
                StackParentData::Positioned {
                    left,
                    top,
                    right,
                    bottom,
                    ..
                } => {
                    let (min_width, max_width) = inset_bounds(left, right, size.width);
                    let (min_height, max_height) = inset_bounds(top, bottom, size.height);
                    let child_constraints =
                        Constraints::new(min_width, max_width, min_height, max_height);
                    placeables[index] = Some(scope.measure(*measurable, child_constraints)?);
                }
                StackParentData::Aligned { .. } => {}
            }
        }

        let mut placements = Vec::with_capacity(measurables.len());
        for (placeable, data) in placeables.iter().zip(data.iter()) {
            let Some(placeable) = placeable else {
                continue;
            };
            let position = match *data {
                StackParentData::Aligned { alignment, .. } => {
                    alignment.align(size, placeable.size())
                }
                StackParentData::Expanded => Position::ZERO,
                StackParentData::Positioned {
                    left,
                    top,
                    right,
                    bottom,
                    fallback,
                } => {
                    let aligned = fallback.align(size, placeable.size());
                    Position::new(
                        inset_offset(left, right, size.width, placeable.width(), aligned.x),
                        inset_offset(top, bottom, size.height, placeable.height(), aligned.y),
                    )
                }
            };
            placements.push(Placement::new(*placeable, position));
        }

        Ok(MeasureResult::with_placements(size, placements))
    }

    fn debug_name(&self) -> &str {
        "Stack"
    }
}
