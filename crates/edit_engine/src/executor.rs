//! Editing engine: owns the document and applies edits to it

use crate::{EditAction, EditError, EditorSettings, Result};
use doc_model::{
    DocModelError, DocumentPosition, DocumentTree, NodeId, Paragraph, ShiftState, StyleChange,
    TextRange,
};

/// The editing engine that owns the document tree and applies edits.
///
/// The current selection and its shift-extend state live on the tree's root;
/// only the selection operations and the edit operations here change them.
pub struct EditingEngine {
    tree: DocumentTree,
    settings: EditorSettings,
}

impl EditingEngine {
    /// Create an editing engine with one empty paragraph and default settings
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    /// Create an editing engine with one empty paragraph styled per `settings`
    pub fn with_settings(settings: EditorSettings) -> Self {
        let paragraph = Paragraph::with_style("", settings.formatting.default_style.clone());
        Self {
            tree: DocumentTree::with_paragraph(paragraph),
            settings,
        }
    }

    /// Create an editing engine over an existing document tree
    pub fn with_tree(tree: DocumentTree) -> Self {
        Self::with_tree_and_settings(tree, EditorSettings::default())
    }

    pub fn with_tree_and_settings(tree: DocumentTree, settings: EditorSettings) -> Self {
        Self { tree, settings }
    }

    /// Get the current document tree
    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    pub(crate) fn tree_mut(&mut self) -> &mut DocumentTree {
        &mut self.tree
    }

    /// Take the document tree out of the engine
    pub fn into_tree(self) -> DocumentTree {
        self.tree
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Get the current selection
    pub fn selection(&self) -> Option<TextRange> {
        self.tree.selection()
    }

    /// Set the selection from outside the keyboard state machine (pointer
    /// selection). Any shift-extend gesture in progress ends.
    pub fn set_selection(&mut self, range: TextRange) -> Result<()> {
        self.tree.set_selection(range)?;
        self.tree.set_shift_state(ShiftState::Collapsed);
        Ok(())
    }

    /// Apply a typed edit action
    pub fn apply(&mut self, action: EditAction) -> Result<()> {
        tracing::debug!(action = action.display_name(), "applying edit action");
        match action {
            EditAction::ReplaceRange { range, text } => self.apply_change(range, &text),
            EditAction::Format { range, change } => self.apply_format(range, &change),
        }
    }

    /// Replace the text in `range` with `text` and collapse the selection
    /// to the end of the inserted text.
    ///
    /// The range must lie within a single paragraph. A reversed range is
    /// put back into document order first.
    pub fn apply_change(&mut self, range: TextRange, text: &str) -> Result<()> {
        let (leaf, start, end) = self.single_paragraph_span(range)?;

        let paragraph = self.tree.paragraph_mut(leaf)?;
        paragraph.replace_range(start, end, text)?;
        if self.settings.formatting.prune_empty_runs {
            paragraph.prune_empty_runs();
        }

        let caret = DocumentPosition::new(leaf, start + text.chars().count());
        self.tree.set_selection(TextRange::collapsed(caret))?;
        self.tree.set_shift_state(ShiftState::Collapsed);

        tracing::debug!(
            node = %leaf,
            start,
            end,
            inserted = text.chars().count(),
            "replaced range"
        );
        Ok(())
    }

    /// Apply a style change to the text in `range`; the selection is kept
    pub fn apply_format(&mut self, range: TextRange, change: &StyleChange) -> Result<()> {
        let (leaf, start, end) = self.single_paragraph_span(range)?;
        self.tree.paragraph_mut(leaf)?.apply_style(start, end, change)?;

        tracing::debug!(node = %leaf, start, end, "formatted range");
        Ok(())
    }

    /// Replace the current selection with `text`
    pub fn insert_text(&mut self, text: &str) -> Result<()> {
        let selection = self.tree.selection().ok_or(EditError::NoSelection)?;
        self.apply_change(selection, text)
    }

    /// Delete the selection, or the character before a collapsed caret.
    ///
    /// Returns whether anything was deleted. At the start of a paragraph
    /// this is a no-op: joining paragraphs is a structural edit.
    pub fn delete_backward(&mut self) -> Result<bool> {
        self.delete(false)
    }

    /// Delete the selection, or the character after a collapsed caret
    pub fn delete_forward(&mut self) -> Result<bool> {
        self.delete(true)
    }

    fn delete(&mut self, forward: bool) -> Result<bool> {
        let selection = self.tree.selection().ok_or(EditError::NoSelection)?;
        if !selection.is_collapsed() {
            self.apply_change(selection, "")?;
            return Ok(true);
        }

        let caret = selection.start;
        if self.tree.paragraph(caret.node_id).is_err() {
            return Ok(false);
        }
        let neighbour = if forward {
            caret.next(&self.tree)
        } else {
            caret.previous(&self.tree)
        };
        let range = match neighbour {
            Some(other) if other.node_id == caret.node_id => {
                if forward {
                    TextRange::new(caret, other)
                } else {
                    TextRange::new(other, caret)
                }
            }
            _ => {
                tracing::debug!(node = %caret.node_id, forward, "nothing to delete within paragraph");
                return Ok(false);
            }
        };

        self.apply_change(range, "")?;
        Ok(true)
    }

    /// Resolve a range to (paragraph, start offset, end offset), rejecting
    /// shapes this engine cannot edit
    fn single_paragraph_span(&self, range: TextRange) -> Result<(NodeId, usize, usize)> {
        self.tree.validate_position(&range.start)?;
        self.tree.validate_position(&range.end)?;
        if !range.is_single_leaf() {
            return Err(EditError::Unsupported(
                "edits spanning more than one paragraph".to_string(),
            ));
        }

        let leaf = range.start.node_id;
        match self.tree.paragraph(leaf) {
            Ok(_) => {}
            Err(DocModelError::NotAParagraph(_)) => {
                return Err(EditError::Unsupported(format!(
                    "text edits inside a {:?}",
                    self.tree.node_type(leaf)
                )));
            }
            Err(e) => return Err(e.into()),
        }

        let range = range.ordered(&self.tree);
        Ok((leaf, range.start.offset, range.end.offset))
    }
}

impl Default for EditingEngine {
    fn default() -> Self {
        Self::new()
    }
}
