use trellis_ui_layout::{
    Constraints, EdgeInsets, IntPx, IntrinsicKind, LayoutModifier, Position, Size,
};

/// Insets the wrapped content on each side.
///
/// The content is measured with the incoming constraints shrunk by the insets and
/// placed at the top-left inset; the node is the content plus the insets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaddingModifier {
    pub insets: EdgeInsets,
}

impl PaddingModifier {
    pub fn new(insets: EdgeInsets) -> Self {
        Self { insets }
    }
}

impl LayoutModifier for PaddingModifier {
    fn modify_constraints(&self, constraints: Constraints) -> Constraints {
        constraints.offset(-self.insets.horizontal_sum(), -self.insets.vertical_sum())
    }

    fn modify_size(&self, _constraints: Constraints, content_size: Size) -> Size {
        Size::new(
            content_size.width + self.insets.horizontal_sum(),
            content_size.height + self.insets.vertical_sum(),
        )
    }

    fn modify_position(&self, _content_size: Size, _size: Size) -> Position {
        self.insets.origin()
    }

    fn intrinsic(&self, kind: IntrinsicKind, inner: &dyn Fn(IntrinsicKind) -> IntPx) -> IntPx {
        let horizontal = self.insets.horizontal_sum();
        let vertical = self.insets.vertical_sum();
        if kind.is_width() {
            let height = (kind.cross_size() - vertical).coerce_at_least(IntPx::ZERO);
            inner(kind.with_cross_size(height)) + horizontal
        } else {
            let width = (kind.cross_size() - horizontal).coerce_at_least(IntPx::ZERO);
            inner(kind.with_cross_size(width)) + vertical
        }
    }

    fn debug_name(&self) -> &str {
        "padding"
    }
}
