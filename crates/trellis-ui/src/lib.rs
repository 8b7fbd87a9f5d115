//! Layout tree, pass orchestration and layout primitives built on the Trellis
//! layout contracts.

pub mod layout;
pub mod modifier;

pub use trellis_core::{MutableState, NodeId, StateRuntime};
pub use trellis_ui_layout::{
    Alignment, AlignmentLine, AlignmentLineMap, Axis, Constraints, EdgeInsets, FlexParentData,
    HorizontalAlignment, IntPx, IntrinsicKind, LayoutError, LayoutModifier, LayoutSize,
    LinearArrangement, MeasurePolicy, MeasureResult, MeasureScope, Measurable, Placeable,
    Placement, PlacementScope, Position, Size, VerticalAlignment, FIRST_BASELINE, LAST_BASELINE,
};

pub use layout::policies::{
    AlignMeasurePolicy, ConstrainedBoxMeasurePolicy, ContainerMeasurePolicy, CrossAxisAlignment,
    FlexMeasurePolicy, FlowCrossAxisAlignment, FlowMeasurePolicy, InflexibleWidth,
    LeafMeasurePolicy, PaddingMeasurePolicy, StackMeasurePolicy, StackParentData,
    TableColumnWidth, TableMeasurePolicy, WrapMeasurePolicy,
};
pub use layout::{LayoutNode, LayoutTree, PlacedNode};
pub use modifier::{
    AspectRatioModifier, FillDirection, FillModifier, FlexModifier, Modifier, PaddingModifier,
    StackModifier,
};

pub mod prelude {
    pub use crate::layout::policies::*;
    pub use crate::layout::{LayoutTree, PlacedNode};
    pub use crate::modifier::Modifier;
    pub use trellis_ui_layout::prelude::*;
}
