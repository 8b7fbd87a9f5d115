//! Testing utilities and harness for Trellis

pub mod policies;
pub mod testing;

// Re-export testing utilities
pub use policies::*;
pub use testing::*;

pub mod prelude {
    pub use crate::policies::*;
    pub use crate::testing::*;
    pub use trellis_ui::prelude::*;
}
