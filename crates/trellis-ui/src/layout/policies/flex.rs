use smallvec::SmallVec;
use trellis_ui_layout::{
    AlignmentLine, Axis, Constraints, FlexParentData, HorizontalAlignment, IntPx,
    IntrinsicKind, IntrinsicScope, LayoutError, LayoutSize, LinearArrangement, MeasurePolicy,
    MeasureResult, MeasureScope, Measurable, Placeable, Placement, VerticalAlignment,
};

/// Unified flex layout policy that powers both Row and Column.
///
/// - Children never see the incoming min constraints.
/// - Inflexible children are measured first with a loose main axis; flexible
///   children then share what is left by weight.
/// - When the main axis is unbounded and the flex expands, weights are ignored
///   and flexible children wrap their content.
#[derive(Clone, Debug, PartialEq)]
pub struct FlexMeasurePolicy {
    /// Main axis direction (Horizontal for Row, Vertical for Column)
    pub axis: Axis,
    pub main_axis_size: LayoutSize,
    pub cross_axis_size: LayoutSize,
    /// Arrangement along the main axis
    pub main_axis_alignment: LinearArrangement,
    pub cross_axis_alignment: CrossAxisAlignment,
}

/// Cross-axis alignment for flex layouts.
/// This is axis-agnostic and gets interpreted based on the flex axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrossAxisAlignment {
    /// Align to the start of the cross axis (Top for Row, Start for Column)
    Start,
    /// Align to the center of the cross axis
    Center,
    /// Align to the end of the cross axis (Bottom for Row, End for Column)
    End,
    /// Force children to fill the bounded cross axis.
    Stretch,
    /// Line up the children's values of an alignment line. Children without
    /// the line sit at the cross-axis start.
    AlignmentLine(AlignmentLine),
}

impl CrossAxisAlignment {
    fn align(&self, available: IntPx, child: IntPx) -> IntPx {
        match self {
            CrossAxisAlignment::Center => {
                VerticalAlignment::CenterVertically.align(available, child)
            }
            CrossAxisAlignment::End => (available - child).coerce_at_least(IntPx::ZERO),
            _ => IntPx::ZERO,
        }
    }
}

impl Default for CrossAxisAlignment {
    fn default() -> Self {
        CrossAxisAlignment::Start
    }
}

impl From<HorizontalAlignment> for CrossAxisAlignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Start => CrossAxisAlignment::Start,
            HorizontalAlignment::CenterHorizontally => CrossAxisAlignment::Center,
            HorizontalAlignment::End => CrossAxisAlignment::End,
        }
    }
}

impl From<VerticalAlignment> for CrossAxisAlignment {
    fn from(alignment: VerticalAlignment) -> Self {
        match alignment {
            VerticalAlignment::Top => CrossAxisAlignment::Start,
            VerticalAlignment::CenterVertically => CrossAxisAlignment::Center,
            VerticalAlignment::Bottom => CrossAxisAlignment::End,
        }
    }
}

impl FlexMeasurePolicy {
    pub fn new(
        axis: Axis,
        main_axis_alignment: LinearArrangement,
        cross_axis_alignment: CrossAxisAlignment,
    ) -> Self {
        Self {
            axis,
            main_axis_size: LayoutSize::Wrap,
            cross_axis_size: LayoutSize::Wrap,
            main_axis_alignment,
            cross_axis_alignment,
        }
    }

    /// Creates a FlexMeasurePolicy for Row (horizontal main axis).
    pub fn row(
        horizontal_arrangement: LinearArrangement,
        cross_axis_alignment: impl Into<CrossAxisAlignment>,
    ) -> Self {
        Self::new(
            Axis::Horizontal,
            horizontal_arrangement,
            cross_axis_alignment.into(),
        )
    }

    /// Creates a FlexMeasurePolicy for Column (vertical main axis).
    pub fn column(
        vertical_arrangement: LinearArrangement,
        cross_axis_alignment: impl Into<CrossAxisAlignment>,
    ) -> Self {
        Self::new(
            Axis::Vertical,
            vertical_arrangement,
            cross_axis_alignment.into(),
        )
    }

    /// A row or column whose flexible children share the whole bounded main axis.
    pub fn flex(axis: Axis) -> Self {
        Self {
            main_axis_size: LayoutSize::Expand,
            ..Self::new(axis, LinearArrangement::Start, CrossAxisAlignment::Start)
        }
    }

    pub fn with_main_axis_size(mut self, size: LayoutSize) -> Self {
        self.main_axis_size = size;
        self
    }

    pub fn with_cross_axis_size(mut self, size: LayoutSize) -> Self {
        self.cross_axis_size = size;
        self
    }

    fn spacing(&self, count: usize) -> IntPx {
        self.main_axis_alignment.fixed_spacing() * count.saturating_sub(1) as i32
    }

    fn stretches(&self) -> bool {
        matches!(self.cross_axis_alignment, CrossAxisAlignment::Stretch)
    }

    /// `max(size / weight) * total_weight + fixed` over the children's main-axis
    /// intrinsics at `cross` extent.
    fn intrinsic_main_axis_size(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        kind: IntrinsicKind,
    ) -> IntPx {
        let mut weight_unit_space = IntPx::ZERO;
        let mut fixed_space = self.spacing(measurables.len());
        let mut total_weight = 0.0f32;
        for &measurable in measurables {
            let data = scope.flex_parent_data(measurable);
            let size = scope.intrinsic(measurable, kind);
            if data.has_weight() {
                total_weight += data.weight;
                weight_unit_space = weight_unit_space.max(size / data.weight);
            } else {
                fixed_space += size;
            }
        }
        weight_unit_space * total_weight + fixed_space
    }

    /// Largest cross-axis intrinsic when inflexible children take their max
    /// main-axis intrinsic and flexible children share `main_available`.
    fn intrinsic_cross_axis_size(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        kind: IntrinsicKind,
    ) -> IntPx {
        let main_available = kind.cross_size();
        let main_kind = match self.axis {
            Axis::Horizontal => IntrinsicKind::MaxWidth(IntPx::INFINITY),
            Axis::Vertical => IntrinsicKind::MaxHeight(IntPx::INFINITY),
        };
        let mut fixed_space = self.spacing(measurables.len());
        let mut cross_max = IntPx::ZERO;
        let mut total_weight = 0.0f32;
        for &measurable in measurables {
            let data = scope.flex_parent_data(measurable);
            if data.has_weight() {
                total_weight += data.weight;
                continue;
            }
            let main = scope.intrinsic(measurable, main_kind);
            fixed_space += main;
            cross_max = cross_max.max(scope.intrinsic(measurable, kind.with_cross_size(main)));
        }
        if total_weight == 0.0 {
            return cross_max;
        }
        let weight_unit =
            (main_available - fixed_space).coerce_at_least(IntPx::ZERO) / total_weight;
        for &measurable in measurables {
            let data = scope.flex_parent_data(measurable);
            if data.has_weight() {
                let main = weight_unit * data.weight;
                cross_max = cross_max.max(scope.intrinsic(measurable, kind.with_cross_size(main)));
            }
        }
        cross_max
    }

    /// Accumulates a measured child into the running main and cross extents.
    fn track(
        &self,
        scope: &mut dyn MeasureScope,
        placeable: &Placeable,
        used_space: &mut IntPx,
        cross_space: &mut IntPx,
        extent: &mut LineExtent,
    ) -> Result<(), LayoutError> {
        *used_space += self.axis.main_of(placeable.size());
        let cross = self.axis.cross_of(placeable.size());
        *cross_space = (*cross_space).max(cross);
        if let CrossAxisAlignment::AlignmentLine(line) = self.cross_axis_alignment {
            if let Some(position) = scope.alignment_line(placeable, &line)? {
                extent.before = extent.before.max(position);
                extent.after = extent.after.max(cross - position);
            }
        }
        Ok(())
    }

    fn intrinsic(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        kind: IntrinsicKind,
    ) -> IntPx {
        if kind.is_width() == self.axis.is_horizontal() {
            self.intrinsic_main_axis_size(scope, measurables, kind)
        } else {
            self.intrinsic_cross_axis_size(scope, measurables, kind)
        }
    }
}

impl Default for FlexMeasurePolicy {
    fn default() -> Self {
        Self::row(LinearArrangement::Start, CrossAxisAlignment::Start)
    }
}

/// Tracks the extent on each side of the cross-axis alignment line.
#[derive(Default)]
struct LineExtent {
    before: IntPx,
    after: IntPx,
}

impl MeasurePolicy for FlexMeasurePolicy {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let axis = self.axis;
        let (min_main, max_main, min_cross, max_cross) = axis.split(constraints);
        let parent_data: SmallVec<[FlexParentData; 8]> = measurables
            .iter()
            .map(|m| scope.intrinsics().flex_parent_data(*m))
            .collect();

        let stretch_min = if self.stretches() && max_cross.is_finite() {
            max_cross
        } else {
            IntPx::ZERO
        };

        let mut placeables: SmallVec<[Option<Placeable>; 8]> =
            SmallVec::from_elem(None, measurables.len());
        let mut total_weight = 0.0f32;
        let mut used_space = self.spacing(measurables.len());
        let mut cross_space = IntPx::ZERO;
        let mut extent = LineExtent::default();

        for (index, measurable) in measurables.iter().enumerate() {
            if parent_data[index].has_weight() {
                total_weight += parent_data[index].weight;
                continue;
            }
            let placeable = scope.measure(
                *measurable,
                axis.constraints(IntPx::ZERO, max_main, stretch_min, max_cross),
            )?;
            self.track(scope, &placeable, &mut used_space, &mut cross_space, &mut extent)?;
            placeables[index] = Some(placeable);
        }

        if total_weight > 0.0 {
            let target_space = match self.main_axis_size {
                LayoutSize::Expand => max_main,
                LayoutSize::Wrap => min_main,
            };
            let flexible_space = (target_space - used_space).coerce_at_least(IntPx::ZERO);
            for (index, measurable) in measurables.iter().enumerate() {
                let data = parent_data[index];
                if !data.has_weight() {
                    continue;
                }
                let child_constraints = if flexible_space.is_finite() {
                    let share = IntPx::round(flexible_space.to_f32() * data.weight / total_weight)
                        .coerce_at_least(IntPx::ZERO);
                    let min = if data.fill { share } else { IntPx::ZERO };
                    axis.constraints(min, share, stretch_min, max_cross)
                } else {
                    axis.constraints(IntPx::ZERO, IntPx::INFINITY, stretch_min, max_cross)
                };
                let placeable = scope.measure(*measurable, child_constraints)?;
                self.track(scope, &placeable, &mut used_space, &mut cross_space, &mut extent)?;
                placeables[index] = Some(placeable);
            }
        }

        let main_size = if self.main_axis_size == LayoutSize::Expand && max_main.is_finite() {
            max_main
        } else {
            used_space.coerce_in(min_main, max_main)
        };
        let cross_size = if self.cross_axis_size == LayoutSize::Expand && max_cross.is_finite() {
            max_cross
        } else {
            cross_space
                .max(extent.before + extent.after)
                .coerce_in(min_cross, max_cross)
        };

        let placeables: SmallVec<[Placeable; 8]> = placeables.into_iter().flatten().collect();
        let main_sizes: SmallVec<[IntPx; 8]> = placeables
            .iter()
            .map(|p| axis.main_of(p.size()))
            .collect();
        let mut main_positions: SmallVec<[IntPx; 8]> =
            SmallVec::from_elem(IntPx::ZERO, placeables.len());
        self.main_axis_alignment
            .arrange(main_size, &main_sizes, &mut main_positions);

        let mut placements = Vec::with_capacity(placeables.len());
        for (placeable, main) in placeables.iter().zip(main_positions.iter()) {
            let cross = match self.cross_axis_alignment {
                CrossAxisAlignment::AlignmentLine(line) => scope
                    .alignment_line(placeable, &line)?
                    .map_or(IntPx::ZERO, |position| extent.before - position),
                alignment => alignment.align(cross_size, axis.cross_of(placeable.size())),
            };
            placements.push(Placement::new(*placeable, axis.position(*main, cross)));
        }

        Ok(MeasureResult::with_placements(
            axis.size(main_size, cross_size),
            placements,
        ))
    }

    fn min_intrinsic_width(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        height: IntPx,
    ) -> IntPx {
        self.intrinsic(scope, measurables, IntrinsicKind::MinWidth(height))
    }

    fn max_intrinsic_width(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        height: IntPx,
    ) -> IntPx {
        self.intrinsic(scope, measurables, IntrinsicKind::MaxWidth(height))
    }

    fn min_intrinsic_height(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        width: IntPx,
    ) -> IntPx {
        self.intrinsic(scope, measurables, IntrinsicKind::MinHeight(width))
    }

    fn max_intrinsic_height(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        width: IntPx,
    ) -> IntPx {
        self.intrinsic(scope, measurables, IntrinsicKind::MaxHeight(width))
    }

    fn debug_name(&self) -> &str {
        match self.axis {
            Axis::Horizontal => "Row",
            Axis::Vertical => "Column",
        }
    }
}
