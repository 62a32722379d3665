//! Document Model - content-node tree, positions and formatting runs
//!
//! This crate provides the in-memory document of the editor: an arena of
//! content nodes addressed by stable identity, leaf traversal in document
//! order, the position/range addressing model, and paragraph text with the
//! formatting runs that partition it.
//!
//! "May not exist" results (next leaf, lookup by identity, a step past the
//! document boundary) are plain `Option`s; failures are [`DocModelError`].

mod error;
mod image;
mod node;
mod node_id;
mod paragraph;
mod position;
mod run;
mod selection;
mod series;
mod store;
mod traversal;
mod tree;

pub use error::*;
pub use image::*;
pub use node::*;
pub use node_id::*;
pub use paragraph::*;
pub use position::*;
pub use run::*;
pub use selection::*;
pub use series::*;
pub use store::*;
pub use traversal::*;
pub use tree::*;
