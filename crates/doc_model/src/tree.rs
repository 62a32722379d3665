//! Document tree: node ownership, construction and identity lookup

use crate::{
    ChildSeries, ContentNode, ContentStore, DocModelError, DocumentPosition, Image, NodeId,
    NodeKind, NodeType, Paragraph, Result, ShiftState, TextRange,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The complete document: the root node, the registry owning every node,
/// and the current selection with its shift-extend state.
///
/// A deserialized tree is checked before it is accepted: the root must be a
/// document, every parent and child link must agree in both directions, and
/// the selection must address valid positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawDocumentTree")]
pub struct DocumentTree {
    root: NodeId,
    store: ContentStore,
    /// Current selection, absent until first established
    selection: Option<TextRange>,
    shift_state: ShiftState,
}

impl DocumentTree {
    /// Create a document with no content
    pub fn new() -> Self {
        let root = NodeId::new();
        let mut store = ContentStore::new();
        store.put(ContentNode::new(
            root,
            None,
            NodeKind::Document(Default::default()),
        ));
        Self {
            root,
            store,
            selection: None,
            shift_state: ShiftState::Collapsed,
        }
    }

    /// Create a document holding one empty paragraph, caret at its start
    pub fn with_empty_paragraph() -> Self {
        Self::with_paragraph(Paragraph::new())
    }

    /// Create a document holding `paragraph`, caret at its start
    pub fn with_paragraph(paragraph: Paragraph) -> Self {
        let root = NodeId::new();
        let para_id = NodeId::new();
        let mut children = ChildSeries::new();
        children.push(para_id);

        let mut store = ContentStore::new();
        store.put(ContentNode::new(root, None, NodeKind::Document(children)));
        store.put(ContentNode::new(para_id, Some(root), NodeKind::Paragraph(paragraph)));
        Self {
            root,
            store,
            selection: Some(TextRange::collapsed(DocumentPosition::start_of(para_id))),
            shift_state: ShiftState::Collapsed,
        }
    }

    /// Get the document root ID
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// The identity registry
    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Resolve an identity to its node
    pub fn get(&self, id: NodeId) -> Option<&ContentNode> {
        self.store.get(id)
    }

    /// Resolve an identity, failing if it is unknown
    pub fn node(&self, id: NodeId) -> Result<&ContentNode> {
        self.store.get(id).ok_or(DocModelError::NodeNotFound(id))
    }

    /// Get the node type for a given ID
    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.get(id).map(ContentNode::node_type)
    }

    /// Get a paragraph by ID
    pub fn paragraph(&self, id: NodeId) -> Result<&Paragraph> {
        self.node(id)?
            .as_paragraph()
            .ok_or(DocModelError::NotAParagraph(id))
    }

    /// Get a mutable paragraph by ID
    pub fn paragraph_mut(&mut self, id: NodeId) -> Result<&mut Paragraph> {
        self.store
            .get_mut(id)
            .ok_or(DocModelError::NodeNotFound(id))?
            .as_paragraph_mut()
            .ok_or(DocModelError::NotAParagraph(id))
    }

    /// Get an image by ID
    pub fn image(&self, id: NodeId) -> Option<&Image> {
        self.get(id)?.as_image()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Insert a paragraph under a document or table cell
    pub fn insert_paragraph(
        &mut self,
        paragraph: Paragraph,
        parent_id: NodeId,
        index: Option<usize>,
    ) -> Result<NodeId> {
        paragraph.validate()?;
        self.attach(parent_id, NodeKind::Paragraph(paragraph), index)
    }

    /// Insert an image under a document or table cell
    pub fn insert_image(&mut self, image: Image, parent_id: NodeId, index: Option<usize>) -> Result<NodeId> {
        self.attach(parent_id, NodeKind::Image(image), index)
    }

    /// Insert an empty table under a document or table cell
    pub fn insert_table(&mut self, parent_id: NodeId, index: Option<usize>) -> Result<NodeId> {
        self.attach(parent_id, NodeKind::Table(ChildSeries::new()), index)
    }

    /// Insert an empty row into a table
    pub fn insert_table_row(&mut self, table_id: NodeId, index: Option<usize>) -> Result<NodeId> {
        self.attach(table_id, NodeKind::TableRow(ChildSeries::new()), index)
    }

    /// Insert an empty cell into a table row
    pub fn insert_table_cell(&mut self, row_id: NodeId, index: Option<usize>) -> Result<NodeId> {
        self.attach(row_id, NodeKind::TableCell(ChildSeries::new()), index)
    }

    /// Register a new node and link it into its parent's child sequence
    fn attach(&mut self, parent_id: NodeId, kind: NodeKind, index: Option<usize>) -> Result<NodeId> {
        let parent = self.node(parent_id)?;
        let parent_type = parent.node_type();
        let child_type = kind.node_type();
        if parent_type.is_leaf() {
            return Err(DocModelError::NotAContainer(parent_id));
        }
        if !parent_type.can_contain(child_type) {
            return Err(DocModelError::InvalidChild {
                parent: parent_type,
                child: child_type,
            });
        }

        let id = NodeId::new();
        self.store.put(ContentNode::new(id, Some(parent_id), kind));

        let series = self
            .store
            .get_mut(parent_id)
            .and_then(ContentNode::children_mut)
            .ok_or(DocModelError::NotAContainer(parent_id))?;
        match index {
            Some(index) => {
                series.insert(index, id);
            }
            None => series.push(id),
        }

        tracing::trace!(node = %id, parent = %parent_id, kind = ?child_type, "node attached");
        Ok(id)
    }

    // ========================================================================
    // Shape queries
    // ========================================================================

    /// The children of a containing node; empty for leaves and unknown ids
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = &ContentNode> + '_ {
        self.get(id)
            .and_then(ContentNode::children)
            .into_iter()
            .flat_map(|series| series.iter())
            .filter_map(move |child| self.get(child))
    }

    /// Visit each child of a containing node in order
    pub fn for_each_child(&self, id: NodeId, mut f: impl FnMut(&ContentNode)) {
        for child in self.children_of(id) {
            f(child);
        }
    }

    /// The ancestors of a node, nearest first, ending at the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(id).and_then(ContentNode::parent), move |&current| {
            self.get(current).and_then(ContentNode::parent)
        })
    }

    /// The document that owns `id` (the root for every registered node)
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.store.contains(id) {
            return None;
        }
        self.ancestors(id).last().or(Some(id))
    }

    /// Child-index path from the root down to `id`
    pub fn index_path(&self, id: NodeId) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.get(current)?.parent() {
            path.push(self.get(parent)?.index_of(current)?);
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    /// Follow a child-index path from the root
    pub fn locate(&self, path: &[usize]) -> Option<NodeId> {
        path.iter()
            .try_fold(self.root, |node, &index| self.get(node)?.get_at_index(index))
    }

    /// Iterate over all paragraphs in document order
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> + '_ {
        self.leaves()
            .filter_map(move |leaf| self.get(leaf).and_then(ContentNode::as_paragraph))
    }

    /// Plain text of all paragraphs, one per line
    pub fn text_content(&self) -> String {
        self.paragraphs()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Check that a position addresses an existing leaf at a valid offset
    pub fn validate_position(&self, position: &DocumentPosition) -> Result<()> {
        let node = self.node(position.node_id)?;
        if !node.is_leaf() {
            return Err(DocModelError::NotALeaf(position.node_id));
        }
        if !node.has_index(position.offset) {
            return Err(DocModelError::InvalidPosition {
                node_id: position.node_id,
                offset: position.offset,
            });
        }
        Ok(())
    }

    /// The current selection
    pub fn selection(&self) -> Option<TextRange> {
        self.selection
    }

    /// Which endpoint a shift-extend gesture is moving
    pub fn shift_state(&self) -> ShiftState {
        self.shift_state
    }

    /// Replace the selection after validating both endpoints.
    ///
    /// The shift-extend state is left as is; callers that start a fresh
    /// selection reset it with [`DocumentTree::set_shift_state`].
    pub fn set_selection(&mut self, range: TextRange) -> Result<()> {
        self.validate_position(&range.start)?;
        self.validate_position(&range.end)?;
        self.selection = Some(range);
        Ok(())
    }

    pub fn set_shift_state(&mut self, state: ShiftState) {
        self.shift_state = state;
    }
}

/// Unchecked wire form of a document tree
#[derive(Deserialize)]
struct RawDocumentTree {
    root: NodeId,
    store: ContentStore,
    selection: Option<TextRange>,
    #[serde(default)]
    shift_state: ShiftState,
}

impl TryFrom<RawDocumentTree> for DocumentTree {
    type Error = DocModelError;

    fn try_from(raw: RawDocumentTree) -> Result<Self> {
        let tree = Self {
            root: raw.root,
            store: raw.store,
            selection: raw.selection,
            shift_state: raw.shift_state,
        };
        tree.check_links()?;
        if let Some(selection) = tree.selection {
            tree.validate_position(&selection.start)?;
            tree.validate_position(&selection.end)?;
        }
        Ok(tree)
    }
}

impl DocumentTree {
    /// Verify that the store forms one tree under the root document
    fn check_links(&self) -> Result<()> {
        let root = self.node(self.root)?;
        if root.node_type() != NodeType::Document || root.parent().is_some() {
            return Err(DocModelError::NotAContainer(self.root));
        }

        for node in self.store.iter() {
            if let Some(parent_id) = node.parent() {
                let parent = self.node(parent_id)?;
                if parent.index_of(node.id()).is_none() {
                    return Err(DocModelError::BrokenLink {
                        parent: parent_id,
                        child: node.id(),
                    });
                }
            }

            for child_id in node.children().into_iter().flat_map(|series| series.iter()) {
                let child = self.node(child_id)?;
                if child.parent() != Some(node.id()) {
                    return Err(DocModelError::BrokenLink {
                        parent: node.id(),
                        child: child_id,
                    });
                }
                if !node.node_type().can_contain(child.node_type()) {
                    return Err(DocModelError::InvalidChild {
                        parent: node.node_type(),
                        child: child.node_type(),
                    });
                }
            }
        }

        // Every node must be reached exactly once walking down from the root.
        let mut reached = HashSet::new();
        let mut pending = vec![self.root];
        while let Some(id) = pending.pop() {
            let node = self.node(id)?;
            if !reached.insert(id) {
                return Err(DocModelError::BrokenLink {
                    parent: node.parent().unwrap_or(self.root),
                    child: id,
                });
            }
            pending.extend(node.children().into_iter().flat_map(|series| series.iter()));
        }
        match self.store.iter().find(|node| !reached.contains(&node.id())) {
            Some(stray) => Err(DocModelError::BrokenLink {
                parent: stray.parent().unwrap_or(self.root),
                child: stray.id(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::with_empty_paragraph()
    }
}
