//! Ordered child sequence with identity lookup

use crate::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The ordered children of a containing node.
///
/// Order is document order. Alongside the list, a map from child identity to
/// its index answers `index_of` without scanning. Only the list is
/// serialized; the map is rebuilt when a series is read back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<NodeId>", into = "Vec<NodeId>")]
pub struct ChildSeries {
    children: Vec<NodeId>,
    positions: HashMap<NodeId, usize>,
}

impl ChildSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get_at_index(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied()
    }

    pub fn has_index(&self, index: usize) -> bool {
        index < self.children.len()
    }

    /// Index of the last child, `None` when there are no children
    pub fn max_index(&self) -> Option<usize> {
        self.children.len().checked_sub(1)
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.children.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.children.last().copied()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.children
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.children.iter().copied()
    }

    /// Append a child
    pub(crate) fn push(&mut self, id: NodeId) {
        self.positions.insert(id, self.children.len());
        self.children.push(id);
    }

    /// Insert a child at `index` (clamped to the end) and return where it landed
    pub(crate) fn insert(&mut self, index: usize, id: NodeId) -> usize {
        let index = index.min(self.children.len());
        self.children.insert(index, id);
        for (i, child) in self.children.iter().enumerate().skip(index) {
            self.positions.insert(*child, i);
        }
        index
    }
}

impl From<Vec<NodeId>> for ChildSeries {
    fn from(children: Vec<NodeId>) -> Self {
        let positions = children
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, index))
            .collect();
        Self {
            children,
            positions,
        }
    }
}

impl From<ChildSeries> for Vec<NodeId> {
    fn from(series: ChildSeries) -> Self {
        series.children
    }
}
