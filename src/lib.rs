//! Linear time component trees of n-dimensional scalar images
//!
//! [`Builder`] floods an image in threshold order and reports every completed
//! connected component to a [`ComponentHandler`]. [`ComponentTree`] is a
//! handler that links the components into a tree of pixel lists.

pub mod component_tree;
pub mod error;
pub mod field;
pub mod image;
pub mod threshold;

pub use component_tree::*;
pub use error::{Error, Result};
pub use field::*;
pub use image::*;
pub use threshold::*;
