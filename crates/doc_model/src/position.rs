//! Document positions - a leaf plus a caret offset within it

use crate::{DocumentTree, NodeId};
use serde::{Deserialize, Serialize};

/// A position in the document: a leaf node and an offset in `0..=max_index`.
///
/// Positions compare equal by (leaf identity, offset). Ordering between
/// positions in different leaves follows document order and needs the tree,
/// see [`DocumentPosition::before`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentPosition {
    /// The leaf containing this position
    pub node_id: NodeId,
    /// Caret offset within the leaf (in chars for paragraphs)
    pub offset: usize,
}

impl DocumentPosition {
    pub fn new(node_id: NodeId, offset: usize) -> Self {
        Self { node_id, offset }
    }

    /// Position at the start of a leaf
    pub fn start_of(node_id: NodeId) -> Self {
        Self { node_id, offset: 0 }
    }

    /// Position at the end of a leaf
    pub fn end_of(node_id: NodeId, tree: &DocumentTree) -> Option<Self> {
        let node = tree.get(node_id).filter(|node| node.is_leaf())?;
        node.max_index().map(|offset| Self::new(node_id, offset))
    }

    /// One step forward: the next offset in this leaf, else the start of the
    /// next leaf in document order. `None` at the end of the document.
    pub fn next(&self, tree: &DocumentTree) -> Option<Self> {
        let node = tree.get(self.node_id)?;
        if node.has_index(self.offset + 1) {
            return Some(Self::new(self.node_id, self.offset + 1));
        }
        tree.next_leaf(self.node_id).map(Self::start_of)
    }

    /// One step backward: the previous offset in this leaf, else the end of
    /// the previous leaf. `None` at the start of the document.
    pub fn previous(&self, tree: &DocumentTree) -> Option<Self> {
        let node = tree.get(self.node_id)?;
        if self.offset > 0 && node.has_index(self.offset - 1) {
            return Some(Self::new(self.node_id, self.offset - 1));
        }
        tree.prev_leaf(self.node_id)
            .and_then(|leaf| Self::end_of(leaf, tree))
    }

    /// Whether this position comes strictly before `other` in document order.
    ///
    /// Within one leaf offsets decide; across leaves this walks forward from
    /// this leaf looking for the other one.
    pub fn before(&self, other: &DocumentPosition, tree: &DocumentTree) -> bool {
        if self.node_id == other.node_id {
            return self.offset < other.offset;
        }
        tree.leaves_after(self.node_id)
            .any(|leaf| leaf == other.node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Image, Paragraph};

    fn two_paragraphs() -> (DocumentTree, NodeId, NodeId) {
        let mut tree = DocumentTree::new();
        let root = tree.root_id();
        let first = tree.insert_paragraph(Paragraph::with_text("AB"), root, None).unwrap();
        let second = tree.insert_paragraph(Paragraph::with_text("CD"), root, None).unwrap();
        (tree, first, second)
    }

    #[test]
    fn test_next_within_leaf() {
        let (tree, first, _) = two_paragraphs();
        let pos = DocumentPosition::new(first, 0);
        assert_eq!(pos.next(&tree), Some(DocumentPosition::new(first, 1)));
    }

    #[test]
    fn test_next_crosses_into_following_leaf() {
        let (tree, first, second) = two_paragraphs();
        let pos = DocumentPosition::new(first, 2);
        assert_eq!(pos.next(&tree), Some(DocumentPosition::new(second, 0)));
    }

    #[test]
    fn test_previous_crosses_to_end_of_preceding_leaf() {
        let (tree, first, second) = two_paragraphs();
        let pos = DocumentPosition::new(second, 0);
        assert_eq!(pos.previous(&tree), Some(DocumentPosition::new(first, 2)));
    }

    #[test]
    fn test_document_boundaries() {
        let (tree, first, second) = two_paragraphs();
        assert_eq!(DocumentPosition::new(first, 0).previous(&tree), None);
        assert_eq!(DocumentPosition::new(second, 2).next(&tree), None);
    }

    #[test]
    fn test_image_has_two_caret_slots() {
        let mut tree = DocumentTree::new();
        let root = tree.root_id();
        let image = tree.insert_image(Image::new("cat.png"), root, None).unwrap();
        let para = tree.insert_paragraph(Paragraph::with_text("x"), root, None).unwrap();

        let pos = DocumentPosition::start_of(image);
        let after = pos.next(&tree).unwrap();
        assert_eq!(after, DocumentPosition::new(image, 1));
        assert_eq!(after.next(&tree), Some(DocumentPosition::start_of(para)));
    }

    #[test]
    fn test_before_follows_document_order() {
        let (tree, first, second) = two_paragraphs();
        let a = DocumentPosition::new(first, 2);
        let b = DocumentPosition::new(second, 0);

        assert!(a.before(&b, &tree));
        assert!(!b.before(&a, &tree));
        assert!(DocumentPosition::new(first, 0).before(&a, &tree));
        assert!(!a.before(&a, &tree));
    }

    #[test]
    fn test_end_of_rejects_containers() {
        let (tree, first, _) = two_paragraphs();
        assert_eq!(DocumentPosition::end_of(tree.root_id(), &tree), None);
        assert_eq!(
            DocumentPosition::end_of(first, &tree),
            Some(DocumentPosition::new(first, 2))
        );
    }
}
