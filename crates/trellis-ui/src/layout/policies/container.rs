use trellis_ui_layout::{
    Alignment, AlignmentLineMap, Constraints, EdgeInsets, IntPx, LayoutError, MeasurePolicy,
    MeasureResult, MeasureScope, Measurable, Position, Size,
};

/// A box with padding, alignment and optional fixed dimensions around a single
/// child.
///
/// On an axis where the container fills (tight or `expanded`, and bounded) its
/// size does not depend on the child. When it fills both axes the child is only
/// measured from the placement block, so a change in the child's size relays
/// out the container without measuring it again.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerMeasurePolicy {
    pub padding: EdgeInsets,
    pub alignment: Alignment,
    pub expanded: bool,
    pub width: Option<IntPx>,
    pub height: Option<IntPx>,
    /// Extra constraints intersected with the incoming ones.
    pub constraints: Constraints,
}

impl ContainerMeasurePolicy {
    pub fn new() -> Self {
        Self {
            padding: EdgeInsets::ZERO,
            alignment: Alignment::CENTER,
            expanded: false,
            width: None,
            height: None,
            constraints: Constraints::unbounded(),
        }
    }

    /// A container of exactly `width` x `height` when the parent allows it.
    pub fn sized(width: i32, height: i32) -> Self {
        Self {
            width: Some(IntPx(width)),
            height: Some(IntPx(height)),
            ..Self::new()
        }
    }

    pub fn expanded() -> Self {
        Self {
            expanded: true,
            ..Self::new()
        }
    }

    pub fn with_padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_width(mut self, width: i32) -> Self {
        self.width = Some(IntPx(width));
        self
    }

    pub fn with_height(mut self, height: i32) -> Self {
        self.height = Some(IntPx(height));
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }
}

impl Default for ContainerMeasurePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurePolicy for ContainerMeasurePolicy {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        incoming: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let container = self
            .constraints
            .tighten(self.width, self.height)
            .enforce(incoming);
        let horizontal = self.padding.horizontal_sum();
        let vertical = self.padding.vertical_sum();
        let child_constraints = container.loosen().offset(-horizontal, -vertical);
        let child = measurables.first().copied();

        let fills_width =
            (container.has_tight_width() || self.expanded) && container.has_bounded_width();
        let fills_height =
            (container.has_tight_height() || self.expanded) && container.has_bounded_height();

        let measured = match child {
            Some(child) if !fills_width || !fills_height => {
                Some(scope.measure(child, child_constraints)?)
            }
            _ => None,
        };
        let child_size = measured.map_or(Size::ZERO, |placeable| placeable.size());
        let width = if fills_width {
            container.max_width
        } else {
            (child_size.width + horizontal).coerce_at_least(container.min_width)
        };
        let height = if fills_height {
            container.max_height
        } else {
            (child_size.height + vertical).coerce_at_least(container.min_height)
        };

        let size = Size::new(width, height);
        let padding = self.padding;
        let alignment = self.alignment;
        Ok(MeasureResult::new(size, AlignmentLineMap::new(), move |scope| {
            let placeable = match (measured, child) {
                (Some(placeable), _) => placeable,
                (None, Some(child)) => scope.measure(child, child_constraints)?,
                (None, None) => return Ok(()),
            };
            let content = Size::new(size.width - horizontal, size.height - vertical);
            let aligned = alignment.align(content, placeable.size());
            scope.place(
                &placeable,
                Position::new(padding.left + aligned.x, padding.top + aligned.y),
            )
        }))
    }

    fn debug_name(&self) -> &str {
        "Container"
    }
}
