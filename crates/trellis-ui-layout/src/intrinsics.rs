//! Intrinsic measurement APIs

use crate::units::IntPx;

/// Specifies how to size a component based on its intrinsic measurements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntrinsicSize {
    /// Use the minimum intrinsic size of the content.
    Min,
    /// Use the maximum intrinsic size of the content.
    Max,
}

/// A single intrinsic query together with the size on the other axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    MinWidth(IntPx),
    MaxWidth(IntPx),
    MinHeight(IntPx),
    MaxHeight(IntPx),
}

impl IntrinsicKind {
    /// The fixed extent on the other axis.
    pub fn cross_size(self) -> IntPx {
        match self {
            IntrinsicKind::MinWidth(size)
            | IntrinsicKind::MaxWidth(size)
            | IntrinsicKind::MinHeight(size)
            | IntrinsicKind::MaxHeight(size) => size,
        }
    }

    /// Same query with a different cross extent.
    pub fn with_cross_size(self, size: IntPx) -> Self {
        match self {
            IntrinsicKind::MinWidth(_) => IntrinsicKind::MinWidth(size),
            IntrinsicKind::MaxWidth(_) => IntrinsicKind::MaxWidth(size),
            IntrinsicKind::MinHeight(_) => IntrinsicKind::MinHeight(size),
            IntrinsicKind::MaxHeight(_) => IntrinsicKind::MaxHeight(size),
        }
    }

    pub fn is_width(self) -> bool {
        matches!(self, IntrinsicKind::MinWidth(_) | IntrinsicKind::MaxWidth(_))
    }

    pub fn size_kind(self) -> IntrinsicSize {
        match self {
            IntrinsicKind::MinWidth(_) | IntrinsicKind::MinHeight(_) => IntrinsicSize::Min,
            IntrinsicKind::MaxWidth(_) | IntrinsicKind::MaxHeight(_) => IntrinsicSize::Max,
        }
    }
}

/// Whether a layout wraps its content or expands to the incoming max on an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutSize {
    #[default]
    Wrap,
    Expand,
}
