//! Node identity, collections and observable state shared by the Trellis crates.

pub mod collections;
mod observer;
mod state;

pub use observer::StateObserver;
pub use state::{MutableState, ReadObserver, StateId, StateRuntime};

/// Identifier of a node in a layout tree.
pub type NodeId = usize;

/// The phase of a layout pass a read or invalidation belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Measure,
    Layout,
}

/// A [`ReadObserver`] that records nothing, for reads that must not create dependencies.
#[derive(Clone, Copy, Debug, Default)]
pub struct Untracked;

impl ReadObserver for Untracked {
    fn record_read(&mut self, _state: StateId) {}
}
