//! Content nodes - a tagged variant per node kind

use crate::{ChildSeries, Image, NodeId, Paragraph};
use serde::{Deserialize, Serialize};

/// Enumeration of all node types in the document tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Document,
    Paragraph,
    Table,
    TableRow,
    TableCell,
    Image,
}

impl NodeType {
    /// Leaves hold content and never contain children
    pub fn is_leaf(self) -> bool {
        matches!(self, NodeType::Paragraph | NodeType::Image)
    }

    /// Nesting rules: which child types a node of this type accepts
    pub fn can_contain(self, child: NodeType) -> bool {
        match self {
            NodeType::Document | NodeType::TableCell => matches!(
                child,
                NodeType::Paragraph | NodeType::Image | NodeType::Table
            ),
            NodeType::Table => child == NodeType::TableRow,
            NodeType::TableRow => child == NodeType::TableCell,
            NodeType::Paragraph | NodeType::Image => false,
        }
    }
}

/// Kind-specific payload of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Document(ChildSeries),
    Table(ChildSeries),
    TableRow(ChildSeries),
    TableCell(ChildSeries),
    Paragraph(Paragraph),
    Image(Image),
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Document(_) => NodeType::Document,
            NodeKind::Table(_) => NodeType::Table,
            NodeKind::TableRow(_) => NodeType::TableRow,
            NodeKind::TableCell(_) => NodeType::TableCell,
            NodeKind::Paragraph(_) => NodeType::Paragraph,
            NodeKind::Image(_) => NodeType::Image,
        }
    }
}

/// A node in the document tree.
///
/// The tree owns every node; a node refers to its parent by identity only.
/// The parent is fixed when the node is attached and is `None` only for the
/// root document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentNode {
    id: NodeId,
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl ContentNode {
    pub(crate) fn new(id: NodeId, parent: Option<NodeId>, kind: NodeKind) -> Self {
        Self { id, parent, kind }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn is_leaf(&self) -> bool {
        self.node_type().is_leaf()
    }

    /// The child sequence of a containing node
    pub fn children(&self) -> Option<&ChildSeries> {
        match &self.kind {
            NodeKind::Document(series)
            | NodeKind::Table(series)
            | NodeKind::TableRow(series)
            | NodeKind::TableCell(series) => Some(series),
            NodeKind::Paragraph(_) | NodeKind::Image(_) => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut ChildSeries> {
        match &mut self.kind {
            NodeKind::Document(series)
            | NodeKind::Table(series)
            | NodeKind::TableRow(series)
            | NodeKind::TableCell(series) => Some(series),
            NodeKind::Paragraph(_) | NodeKind::Image(_) => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match &self.kind {
            NodeKind::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    pub(crate) fn as_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        match &mut self.kind {
            NodeKind::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&Image> {
        match &self.kind {
            NodeKind::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Index-bounded access: child slots for containers, caret offsets for leaves
    pub fn has_index(&self, index: usize) -> bool {
        match &self.kind {
            NodeKind::Paragraph(paragraph) => paragraph.has_index(index),
            NodeKind::Image(image) => image.has_index(index),
            _ => self.children().is_some_and(|series| series.has_index(index)),
        }
    }

    /// Largest valid index; `None` only for an empty container
    pub fn max_index(&self) -> Option<usize> {
        match &self.kind {
            NodeKind::Paragraph(paragraph) => Some(paragraph.max_index()),
            NodeKind::Image(image) => Some(image.max_index()),
            _ => self.children().and_then(ChildSeries::max_index),
        }
    }

    /// Child at `index`; leaves have no children
    pub fn get_at_index(&self, index: usize) -> Option<NodeId> {
        self.children()?.get_at_index(index)
    }

    /// Position of a child within this node
    pub fn index_of(&self, child: NodeId) -> Option<usize> {
        self.children()?.index_of(child)
    }
}
