//! Layout contracts for Trellis: units, constraints, alignment lines and policies

mod alignment;
mod alignment_line;
mod arrangement;
mod axis;
mod constraints;
mod core;
mod error;
mod intrinsics;
mod modifier;
mod units;

pub use alignment::*;
pub use alignment_line::*;
pub use arrangement::*;
pub use axis::*;
pub use constraints::*;
pub use self::core::*;
pub use error::*;
pub use intrinsics::*;
pub use modifier::*;
pub use units::*;

pub mod prelude {
    pub use crate::alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
    pub use crate::alignment_line::{AlignmentLine, AlignmentLineMap, FIRST_BASELINE, LAST_BASELINE};
    pub use crate::arrangement::LinearArrangement;
    pub use crate::constraints::Constraints;
    pub use crate::core::{
        IntrinsicScope, MeasurePolicy, MeasureResult, MeasureScope, Measurable, Placeable,
        PlacementScope,
    };
    pub use crate::error::LayoutError;
    pub use crate::modifier::LayoutModifier;
    pub use crate::units::{EdgeInsets, IntPx, Position, Size};
}
