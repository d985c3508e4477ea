//! Layout of a diagram forest.
//!
//! Layout runs in three steps over the whole forest:
//!
//! 1. [`sizing`] measures every box from its text.
//! 2. [`tree`] aggregates subtree extents bottom-up.
//! 3. [`tree`] assigns origins top-down, centering each box over its
//!    footprint and each child row under its parent.
//!
//! The result is a [`Layout`] indexed by the diagram's node ids.

pub mod sizing;
pub mod tree;

pub use sizing::{BoxMeasure, BoxSizer};
pub use tree::{BoxLayout, Engine, Layout};
