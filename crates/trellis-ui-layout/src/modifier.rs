//! Layout modifiers that wrap a node's measure policy.

use crate::alignment_line::AlignmentLine;
use crate::constraints::Constraints;
use crate::intrinsics::IntrinsicKind;
use crate::units::{IntPx, Position, Size};
use std::any::Any;
use std::rc::Rc;

/// A decorator around a node's measurement.
///
/// A node carries a chain of modifiers, outermost first. Incoming constraints
/// flow through the chain from the outermost modifier inwards before reaching the
/// policy; the measured size flows back outwards. Every hook defaults to passing
/// its input through unchanged.
pub trait LayoutModifier {
    /// Constraints offered to the wrapped content.
    fn modify_constraints(&self, constraints: Constraints) -> Constraints {
        constraints
    }

    /// Size reported for this layer given the wrapped content's size.
    /// The result is coerced into the constraints this layer received.
    fn modify_size(&self, _constraints: Constraints, content_size: Size) -> Size {
        content_size
    }

    /// Offset of the wrapped content inside this layer.
    fn modify_position(&self, _content_size: Size, _size: Size) -> Position {
        Position::ZERO
    }

    /// Adjusts the value of a line reported by the wrapped content, already
    /// shifted by [`modify_position`](Self::modify_position).
    fn modify_alignment_line(&self, _line: &AlignmentLine, value: Option<IntPx>) -> Option<IntPx> {
        value
    }

    /// Parent data visible to the node's parent. Receives the data of the layers
    /// inside this one.
    fn modify_parent_data(&self, parent_data: Option<Rc<dyn Any>>) -> Option<Rc<dyn Any>> {
        parent_data
    }

    /// Intrinsic size of this layer given an oracle for the wrapped content.
    fn intrinsic(&self, kind: IntrinsicKind, inner: &dyn Fn(IntrinsicKind) -> IntPx) -> IntPx {
        inner(kind)
    }

    fn debug_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
