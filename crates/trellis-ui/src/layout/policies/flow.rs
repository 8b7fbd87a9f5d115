use smallvec::SmallVec;
use trellis_ui_layout::{
    Axis, Constraints, IntPx, LayoutError, LayoutSize, LinearArrangement,
    MeasurePolicy, MeasureResult, MeasureScope, Measurable, Placeable, Placement,
};

/// Alignment of a child inside its run, on the flow's cross axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlowCrossAxisAlignment {
    #[default]
    Start,
    Center,
    End,
}

impl FlowCrossAxisAlignment {
    fn align(&self, run: IntPx, child: IntPx) -> IntPx {
        match self {
            FlowCrossAxisAlignment::Start => IntPx::ZERO,
            FlowCrossAxisAlignment::Center => (run - child) / 2,
            FlowCrossAxisAlignment::End => run - child,
        }
    }
}

/// Lays children out in runs along the main axis, starting a new run whenever
/// the next child would overflow the bounded main-axis max.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowMeasurePolicy {
    pub axis: Axis,
    pub main_axis_size: LayoutSize,
    pub main_axis_alignment: LinearArrangement,
    pub main_axis_spacing: IntPx,
    pub cross_axis_alignment: FlowCrossAxisAlignment,
    pub cross_axis_spacing: IntPx,
    /// Arrangement of the last run; `None` reuses `main_axis_alignment`.
    pub last_line_main_axis_alignment: Option<LinearArrangement>,
}

impl FlowMeasurePolicy {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            main_axis_size: LayoutSize::Wrap,
            main_axis_alignment: LinearArrangement::Start,
            main_axis_spacing: IntPx::ZERO,
            cross_axis_alignment: FlowCrossAxisAlignment::Start,
            cross_axis_spacing: IntPx::ZERO,
            last_line_main_axis_alignment: None,
        }
    }

    pub fn row() -> Self {
        Self::new(Axis::Horizontal)
    }

    pub fn column() -> Self {
        Self::new(Axis::Vertical)
    }

    fn last_line_alignment(&self) -> LinearArrangement {
        self.last_line_main_axis_alignment
            .unwrap_or(self.main_axis_alignment)
    }
}

/// Children of one run and the run's extents.
struct Run {
    placeables: SmallVec<[Placeable; 8]>,
    main: IntPx,
    cross: IntPx,
}

impl Run {
    fn new() -> Self {
        Self {
            placeables: SmallVec::new(),
            main: IntPx::ZERO,
            cross: IntPx::ZERO,
        }
    }
}

impl MeasurePolicy for FlowMeasurePolicy {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let axis = self.axis;
        let (min_main, max_main, min_cross, max_cross) = axis.split(constraints);
        let child_constraints = axis.constraints(IntPx::ZERO, max_main, IntPx::ZERO, max_cross);
        let spacing = self.main_axis_spacing.coerce_at_least(IntPx::ZERO);

        let mut runs: Vec<Run> = Vec::new();
        let mut current = Run::new();
        for measurable in measurables {
            let placeable = scope.measure(*measurable, child_constraints)?;
            let child_main = axis.main_of(placeable.size());
            if !current.placeables.is_empty() && current.main + spacing + child_main > max_main {
                runs.push(std::mem::replace(&mut current, Run::new()));
            }
            if !current.placeables.is_empty() {
                current.main += spacing;
            }
            current.main += child_main;
            current.cross = current.cross.max(axis.cross_of(placeable.size()));
            current.placeables.push(placeable);
        }
        if !current.placeables.is_empty() {
            runs.push(current);
        }

        let widest_run = runs.iter().map(|run| run.main).max().unwrap_or(IntPx::ZERO);
        let main_size = if self.main_axis_size == LayoutSize::Expand && max_main.is_finite() {
            max_main
        } else {
            widest_run.coerce_in(min_main, max_main)
        };
        let cross_spacing = self.cross_axis_spacing.coerce_at_least(IntPx::ZERO);
        let run_gaps = runs.len().saturating_sub(1) as i32;
        let content_cross = runs
            .iter()
            .map(|run| run.cross)
            .fold(IntPx::ZERO, |sum, cross| sum + cross)
            + cross_spacing * run_gaps;
        let cross_size = content_cross.coerce_in(min_cross, max_cross);

        let mut placements = Vec::with_capacity(measurables.len());
        let mut run_offset = IntPx::ZERO;
        let last = runs.len().saturating_sub(1);
        for (index, run) in runs.iter().enumerate() {
            let arrangement = if index == last {
                self.last_line_alignment()
            } else {
                self.main_axis_alignment
            };
            let sizes: SmallVec<[IntPx; 8]> = run
                .placeables
                .iter()
                .map(|p| axis.main_of(p.size()))
                .collect();
            let gaps = spacing * run.placeables.len().saturating_sub(1) as i32;
            let mut positions: SmallVec<[IntPx; 8]> = SmallVec::from_elem(IntPx::ZERO, sizes.len());
            arrangement.arrange(main_size - gaps, &sizes, &mut positions);

            let slots = run.placeables.iter().zip(positions.iter()).enumerate();
            for (slot, (placeable, main)) in slots {
                let cross = self
                    .cross_axis_alignment
                    .align(run.cross, axis.cross_of(placeable.size()));
                placements.push(Placement::new(
                    *placeable,
                    axis.position(*main + spacing * slot as i32, run_offset + cross),
                ));
            }
            run_offset += run.cross + cross_spacing;
        }

        Ok(MeasureResult::with_placements(
            axis.size(main_size, cross_size),
            placements,
        ))
    }

    fn debug_name(&self) -> &str {
        match self.axis {
            Axis::Horizontal => "FlowRow",
            Axis::Vertical => "FlowColumn",
        }
    }
}
