use trellis_ui_layout::{Constraints, IntPx, IntrinsicKind, LayoutModifier, Size};

/// Sizes the wrapped content so that `width / height == ratio`.
///
/// Candidates are tried in order: the max width, the max height, the min width
/// and the min height. The first one that is non-empty and fits the incoming
/// constraints becomes tight constraints for the content. When none fits the
/// constraints pass through unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectRatioModifier {
    pub ratio: f32,
}

impl AspectRatioModifier {
    pub fn new(ratio: f32) -> Self {
        debug_assert!(ratio > 0.0, "aspect ratio must be positive, was {ratio}");
        Self { ratio }
    }

    /// The size these constraints allow for the ratio, if any.
    pub fn find_size(&self, constraints: Constraints) -> Option<Size> {
        let from_width = |width: IntPx| Size::new(width, IntPx::round(width.to_f32() / self.ratio));
        let from_height =
            |height: IntPx| Size::new(IntPx::round(height.to_f32() * self.ratio), height);
        let candidates = [
            constraints
                .has_bounded_width()
                .then(|| from_width(constraints.max_width)),
            constraints
                .has_bounded_height()
                .then(|| from_height(constraints.max_height)),
            Some(from_width(constraints.min_width)),
            Some(from_height(constraints.min_height)),
        ];
        candidates.into_iter().flatten().find(|size| {
            size.width > IntPx::ZERO
                && size.height > IntPx::ZERO
                && size.width.is_finite()
                && size.height.is_finite()
                && constraints.satisfied_by(*size)
        })
    }
}

impl LayoutModifier for AspectRatioModifier {
    fn modify_constraints(&self, constraints: Constraints) -> Constraints {
        match self.find_size(constraints) {
            Some(size) => Constraints::tight(size.width, size.height),
            None => constraints,
        }
    }

    fn intrinsic(&self, kind: IntrinsicKind, inner: &dyn Fn(IntrinsicKind) -> IntPx) -> IntPx {
        let cross = kind.cross_size();
        if !cross.is_finite() {
            return inner(kind);
        }
        if kind.is_width() {
            IntPx::round(cross.to_f32() * self.ratio)
        } else {
            IntPx::round(cross.to_f32() / self.ratio)
        }
    }

    fn debug_name(&self) -> &str {
        "aspect_ratio"
    }
}
