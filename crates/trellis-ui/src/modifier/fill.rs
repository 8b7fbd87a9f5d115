use trellis_ui_layout::{Constraints, LayoutModifier};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillDirection {
    Horizontal,
    Vertical,
    Both,
}

/// Expands the wrapped content to the bounded max on the chosen axes.
/// Unbounded axes are left as they are.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillModifier {
    pub direction: FillDirection,
}

impl FillModifier {
    pub fn new(direction: FillDirection) -> Self {
        Self { direction }
    }
}

impl LayoutModifier for FillModifier {
    fn modify_constraints(&self, constraints: Constraints) -> Constraints {
        let fill_width = matches!(self.direction, FillDirection::Horizontal | FillDirection::Both)
            && constraints.has_bounded_width();
        let fill_height = matches!(self.direction, FillDirection::Vertical | FillDirection::Both)
            && constraints.has_bounded_height();
        constraints.tighten(
            fill_width.then_some(constraints.max_width),
            fill_height.then_some(constraints.max_height),
        )
    }

    fn debug_name(&self) -> &str {
        "fill"
    }
}
