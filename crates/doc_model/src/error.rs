//! Error types for document model operations

use crate::{NodeId, NodeType};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocModelError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid node id: {0}")]
    InvalidNodeId(String),

    #[error("Node {0} is not a leaf")]
    NotALeaf(NodeId),

    #[error("Node {0} is not a paragraph")]
    NotAParagraph(NodeId),

    #[error("Node {0} cannot contain children")]
    NotAContainer(NodeId),

    #[error("A {parent:?} cannot contain a {child:?}")]
    InvalidChild { parent: NodeType, child: NodeType },

    #[error("Node {child} is not linked as a child of {parent}")]
    BrokenLink { parent: NodeId, child: NodeId },

    #[error("Invalid position: node {node_id}, offset {offset}")]
    InvalidPosition { node_id: NodeId, offset: usize },

    #[error("Invalid range {start}..{end} for text of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("Formatting runs cover {actual} characters but the paragraph has {expected}")]
    FormattingMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, DocModelError>;
