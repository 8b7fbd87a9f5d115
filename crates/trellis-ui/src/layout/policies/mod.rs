//! Measure policies for the built-in layouts.

mod align;
mod constrained_box;
mod container;
mod flex;
mod flow;
mod leaf;
mod padding;
mod stack;
mod table;

pub use align::{AlignMeasurePolicy, WrapMeasurePolicy};
pub use constrained_box::ConstrainedBoxMeasurePolicy;
pub use container::ContainerMeasurePolicy;
pub use flex::{CrossAxisAlignment, FlexMeasurePolicy};
pub use flow::{FlowCrossAxisAlignment, FlowMeasurePolicy};
pub use leaf::LeafMeasurePolicy;
pub use padding::PaddingMeasurePolicy;
pub use stack::{StackMeasurePolicy, StackParentData};
pub use table::{InflexibleWidth, TableColumnWidth, TableMeasurePolicy};

#[cfg(test)]
#[path = "tests/policies_tests.rs"]
mod tests;
