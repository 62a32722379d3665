//! Identity registry owning every node of a document

use crate::{ContentNode, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity to node lookup scoped to one document.
///
/// The store is the arena: it owns every node, and all cross references
/// between nodes (parent, children, positions) are identities resolved here.
/// Nodes are registered once when attached and never evicted. On the wire
/// the store is a plain node list, keyed again by each node's own id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ContentNode>", into = "Vec<ContentNode>")]
pub struct ContentStore {
    nodes: HashMap<NodeId, ContentNode>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: NodeId) -> Option<&ContentNode> {
        self.nodes.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut ContentNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub(crate) fn put(&mut self, node: ContentNode) {
        let id = node.id();
        let previous = self.nodes.insert(id, node);
        debug_assert!(previous.is_none(), "node {id} registered twice");
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentNode> {
        self.nodes.values()
    }
}

impl From<Vec<ContentNode>> for ContentStore {
    fn from(nodes: Vec<ContentNode>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|node| (node.id(), node)).collect(),
        }
    }
}

impl From<ContentStore> for Vec<ContentNode> {
    fn from(store: ContentStore) -> Self {
        store.nodes.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChildSeries, DocumentTree, NodeKind, NodeType, Paragraph};

    #[test]
    fn test_put_and_get() {
        let mut store = ContentStore::new();
        assert!(store.is_empty());

        let id = NodeId::new();
        store.put(ContentNode::new(id, None, NodeKind::Paragraph(Paragraph::with_text("x"))));

        assert!(store.contains(id));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).map(ContentNode::id), Some(id));
        assert_eq!(store.iter().count(), 1);
    }

    #[test]
    fn test_unknown_id_is_absent() {
        let store = ContentStore::new();
        let missing = NodeId::new();
        assert!(store.get(missing).is_none());
        assert!(!store.contains(missing));
    }

    #[test]
    fn test_root_is_registered() {
        let tree = DocumentTree::new();
        let store = tree.store();
        assert!(store.contains(tree.root_id()));
        assert_eq!(
            store.get(tree.root_id()).map(ContentNode::node_type),
            Some(NodeType::Document)
        );
    }

    #[test]
    fn test_deserialize_keys_nodes_by_their_own_id() {
        let root = NodeId::new();
        let nodes = vec![ContentNode::new(root, None, NodeKind::Document(ChildSeries::new()))];
        let json = serde_json::to_string(&nodes).unwrap();

        let store: ContentStore = serde_json::from_str(&json).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains(root));
    }
}
