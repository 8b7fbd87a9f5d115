//! Hash collections shared by the layout tree and the state observer.
//!
//! Node and state maps hash with `rustc-hash`, ordered queues with `ahash`. The
//! `std-hash` feature switches both to the standard library's `RandomState`.

pub mod map {
    #[cfg(feature = "std-hash")]
    pub use std::collections::{HashMap, HashSet};

    #[cfg(not(feature = "std-hash"))]
    pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
}

#[cfg(feature = "std-hash")]
pub type QueueHasher = std::collections::hash_map::RandomState;

#[cfg(not(feature = "std-hash"))]
pub type QueueHasher = ahash::RandomState;

/// Set that iterates in first-insertion order, for coalesced work queues and
/// change batches.
pub type OrderedSet<T> = indexmap::IndexSet<T, QueueHasher>;
