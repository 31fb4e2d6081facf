//! Algorithm to build the component tree of an n-dimensional image
//!
//! An implementation of D. Nister and H. Stewenius, "Linear Time Maximally
//! Stable Extremal Regions" (ECCV 2008). The image is flooded in threshold
//! order; connected components are completed level by level and emitted to a
//! handler, which links them into a tree.
//!
//! The builder follows a state-machine model:
//!
//! + Scan: examine the neighbours of the current pixel, descending into any
//!   neighbour with a lower level
//! + Raise: take the next boundary pixel, flushing the component stack when its level is higher
//! + Flush: emit the remaining components once every pixel is visited
//! + Done

mod boundary;
mod builder;
mod component;
mod neighborhood;
mod order;
mod pixel_list;
mod stack;
mod tree;

pub use boundary::*;
pub use builder::*;
pub use component::*;
pub use neighborhood::*;
pub use order::*;
pub use pixel_list::*;
pub use tree::*;
