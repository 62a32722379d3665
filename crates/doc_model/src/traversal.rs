//! Leaf traversal in document order
//!
//! Traversal keeps no iterator state on the tree. Moving from a leaf to its
//! neighbour climbs parent links until an ancestor has a sibling in the
//! requested direction, then descends into that sibling along its first (or
//! last) children until a leaf is reached.
//!
//! Empty containers are legal. Descending into one yields no leaf, and the
//! walk carries on with the next sibling in the same direction.

use crate::{DocumentTree, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    Forward,
    Backward,
}

impl Walk {
    fn step(self, index: usize) -> Option<usize> {
        match self {
            Walk::Forward => index.checked_add(1),
            Walk::Backward => index.checked_sub(1),
        }
    }
}

impl DocumentTree {
    /// The leaf following `leaf` in document order
    pub fn next_leaf(&self, leaf: NodeId) -> Option<NodeId> {
        self.adjacent_leaf(leaf, Walk::Forward)
    }

    /// The leaf preceding `leaf` in document order
    pub fn prev_leaf(&self, leaf: NodeId) -> Option<NodeId> {
        self.adjacent_leaf(leaf, Walk::Backward)
    }

    /// The first leaf under `node` (the node itself if it is a leaf)
    pub fn first_leaf(&self, node: NodeId) -> Option<NodeId> {
        self.edge_leaf(node, Walk::Forward)
    }

    /// The last leaf under `node` (the node itself if it is a leaf)
    pub fn last_leaf(&self, node: NodeId) -> Option<NodeId> {
        self.edge_leaf(node, Walk::Backward)
    }

    /// All leaves of the document in document order
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            tree: self,
            next: self.first_leaf(self.root_id()),
        }
    }

    /// The leaves strictly after `leaf` in document order
    pub fn leaves_after(&self, leaf: NodeId) -> Leaves<'_> {
        Leaves {
            tree: self,
            next: self.next_leaf(leaf),
        }
    }

    fn adjacent_leaf(&self, from: NodeId, walk: Walk) -> Option<NodeId> {
        let mut current = from;
        loop {
            // The root has no parent: the walk is exhausted.
            let parent_id = self.get(current)?.parent()?;
            let series = self.get(parent_id)?.children()?;

            let mut sibling = series.index_of(current).and_then(|index| walk.step(index));
            while let Some(index) = sibling.filter(|&index| series.has_index(index)) {
                let candidate = series.get_at_index(index)?;
                if let Some(leaf) = self.edge_leaf(candidate, walk) {
                    return Some(leaf);
                }
                sibling = walk.step(index);
            }

            current = parent_id;
        }
    }

    fn edge_leaf(&self, node: NodeId, walk: Walk) -> Option<NodeId> {
        let content = self.get(node)?;
        if content.is_leaf() {
            return Some(node);
        }
        let series = content.children()?;
        match walk {
            Walk::Forward => series.iter().find_map(|child| self.edge_leaf(child, walk)),
            Walk::Backward => series.iter().rev().find_map(|child| self.edge_leaf(child, walk)),
        }
    }
}

/// Iterator over leaves in document order, driven by [`DocumentTree::next_leaf`]
pub struct Leaves<'a> {
    tree: &'a DocumentTree,
    next: Option<NodeId>,
}

impl Iterator for Leaves<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_leaf(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use crate::{DocumentTree, Image, NodeId, Paragraph};
    use proptest::prelude::*;

    /// p1, table[[p2, p3], [image]], p4
    fn table_document() -> (DocumentTree, Vec<NodeId>) {
        let mut tree = DocumentTree::new();
        let root = tree.root_id();
        let p1 = tree.insert_paragraph(Paragraph::with_text("one"), root, None).unwrap();

        let table = tree.insert_table(root, None).unwrap();
        let row1 = tree.insert_table_row(table, None).unwrap();
        let cell1 = tree.insert_table_cell(row1, None).unwrap();
        let p2 = tree.insert_paragraph(Paragraph::with_text("two"), cell1, None).unwrap();
        let cell2 = tree.insert_table_cell(row1, None).unwrap();
        let p3 = tree.insert_paragraph(Paragraph::with_text("three"), cell2, None).unwrap();
        let row2 = tree.insert_table_row(table, None).unwrap();
        let cell3 = tree.insert_table_cell(row2, None).unwrap();
        let image = tree.insert_image(Image::new("pic.png"), cell3, None).unwrap();

        let p4 = tree.insert_paragraph(Paragraph::with_text("four"), root, None).unwrap();
        (tree, vec![p1, p2, p3, image, p4])
    }

    #[test]
    fn test_next_leaf_descends_into_table() {
        let (tree, leaves) = table_document();
        assert_eq!(tree.next_leaf(leaves[0]), Some(leaves[1]));
        assert_eq!(tree.next_leaf(leaves[1]), Some(leaves[2]));
    }

    #[test]
    fn test_next_leaf_climbs_out_of_table() {
        let (tree, leaves) = table_document();
        assert_eq!(tree.next_leaf(leaves[2]), Some(leaves[3]));
        assert_eq!(tree.next_leaf(leaves[3]), Some(leaves[4]));
        assert_eq!(tree.next_leaf(leaves[4]), None);
    }

    #[test]
    fn test_prev_leaf_mirrors_next_leaf() {
        let (tree, leaves) = table_document();
        assert_eq!(tree.prev_leaf(leaves[4]), Some(leaves[3]));
        assert_eq!(tree.prev_leaf(leaves[1]), Some(leaves[0]));
        assert_eq!(tree.prev_leaf(leaves[0]), None);
    }

    #[test]
    fn test_leaves_in_document_order() {
        let (tree, leaves) = table_document();
        assert_eq!(tree.leaves().collect::<Vec<_>>(), leaves);
        assert_eq!(tree.leaves_after(leaves[2]).collect::<Vec<_>>(), leaves[3..].to_vec());
    }

    #[test]
    fn test_first_and_last_leaf() {
        let (tree, leaves) = table_document();
        let root = tree.root_id();
        assert_eq!(tree.first_leaf(root), Some(leaves[0]));
        assert_eq!(tree.last_leaf(root), Some(leaves[4]));
        assert_eq!(tree.first_leaf(leaves[2]), Some(leaves[2]));
    }

    #[test]
    fn test_empty_containers_are_skipped() {
        let mut tree = DocumentTree::new();
        let root = tree.root_id();
        let p1 = tree.insert_paragraph(Paragraph::with_text("a"), root, None).unwrap();
        let table = tree.insert_table(root, None).unwrap();
        let row = tree.insert_table_row(table, None).unwrap();
        tree.insert_table_cell(row, None).unwrap();
        tree.insert_table(root, None).unwrap();
        let p2 = tree.insert_paragraph(Paragraph::with_text("b"), root, None).unwrap();

        assert_eq!(tree.first_leaf(table), None);
        assert_eq!(tree.next_leaf(p1), Some(p2));
        assert_eq!(tree.prev_leaf(p2), Some(p1));
    }

    #[test]
    fn test_empty_document_has_no_leaves() {
        let tree = DocumentTree::new();
        assert_eq!(tree.leaves().count(), 0);
        assert_eq!(tree.first_leaf(tree.root_id()), None);
    }

    /// Build a tree from a shape script: each entry is the number of cells
    /// of a one-row table, zero meaning a paragraph.
    fn build(shape: &[usize]) -> DocumentTree {
        let mut tree = DocumentTree::new();
        let root = tree.root_id();
        for &cells in shape {
            if cells == 0 {
                tree.insert_paragraph(Paragraph::with_text("p"), root, None).unwrap();
                continue;
            }
            let table = tree.insert_table(root, None).unwrap();
            let row = tree.insert_table_row(table, None).unwrap();
            for i in 0..cells {
                let cell = tree.insert_table_cell(row, None).unwrap();
                if i % 2 == 0 {
                    tree.insert_paragraph(Paragraph::with_text("c"), cell, None).unwrap();
                } else {
                    tree.insert_image(Image::new("i.png"), cell, None).unwrap();
                }
            }
        }
        tree
    }

    proptest! {
        #[test]
        fn prop_next_prev_round_trip(shape in prop::collection::vec(0usize..4, 1..8)) {
            let tree = build(&shape);
            let leaves: Vec<NodeId> = tree.leaves().collect();
            for &leaf in &leaves {
                if let Some(next) = tree.next_leaf(leaf) {
                    prop_assert_eq!(tree.prev_leaf(next), Some(leaf));
                }
                if let Some(prev) = tree.prev_leaf(leaf) {
                    prop_assert_eq!(tree.next_leaf(prev), Some(leaf));
                }
            }
            prop_assert_eq!(tree.last_leaf(tree.root_id()), leaves.last().copied());
        }
    }
}
