//! Directional selection state machine
//!
//! Arrow keys move the caret; with shift held they extend the selection.
//! The root's [`ShiftState`] records which endpoint an extension is moving:
//! the first shifted move picks the endpoint on the side of travel, and if a
//! later move makes the endpoints cross they are swapped together with the
//! state, so the same logical edge keeps moving.

use crate::{EditingEngine, Result};
use doc_model::{DocumentPosition, NodeId, ShiftState, TextRange};

/// Direction of a caret movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Right and down travel towards the end of the document
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

impl EditingEngine {
    pub fn select_left(&mut self, shift: bool) -> Result<()> {
        self.select(Direction::Left, shift)
    }

    pub fn select_right(&mut self, shift: bool) -> Result<()> {
        self.select(Direction::Right, shift)
    }

    pub fn select_up(&mut self, shift: bool) -> Result<()> {
        self.select(Direction::Up, shift)
    }

    pub fn select_down(&mut self, shift: bool) -> Result<()> {
        self.select(Direction::Down, shift)
    }

    /// Move the caret, or extend the selection when `shift` is held.
    ///
    /// Without shift, a non-collapsed selection collapses to its edge on the
    /// side of travel and does not move further. Moving past the start or
    /// end of the document leaves everything unchanged.
    pub fn select(&mut self, direction: Direction, shift: bool) -> Result<()> {
        let Some(selection) = self.tree().selection() else {
            return self.place_caret_at_document_start();
        };

        let mut state = self.tree().shift_state();
        if selection.is_collapsed() {
            state = ShiftState::Collapsed;
        }

        let active = match state {
            ShiftState::ManipulateStart => selection.start,
            ShiftState::ManipulateEnd => selection.end,
            ShiftState::Collapsed if direction.is_forward() => selection.end,
            ShiftState::Collapsed => selection.start,
        };

        if !shift {
            state = ShiftState::Collapsed;
            if !selection.is_collapsed() {
                return self.commit_selection(TextRange::collapsed(active), state, direction);
            }
        } else if state == ShiftState::Collapsed {
            state = if direction.is_forward() {
                ShiftState::ManipulateEnd
            } else {
                ShiftState::ManipulateStart
            };
        }

        let Some(candidate) = self.candidate_position(active, direction) else {
            tracing::trace!(
                target: "edit_engine::selection",
                ?direction,
                "at document boundary, selection unchanged"
            );
            return Ok(());
        };

        if !shift {
            return self.commit_selection(TextRange::collapsed(candidate), state, direction);
        }

        let mut range = selection;
        match state {
            ShiftState::ManipulateStart => range.start = candidate,
            _ => range.end = candidate,
        }
        if range.end.before(&range.start, self.tree()) {
            range = TextRange::new(range.end, range.start);
            state = state.flipped();
        }
        self.commit_selection(range, state, direction)
    }

    /// The position one step from `from` in `direction`.
    ///
    /// Up and down move to the previous or next leaf, keeping the offset
    /// when the settings ask for it (clamped to the target leaf's length).
    fn candidate_position(&self, from: DocumentPosition, direction: Direction) -> Option<DocumentPosition> {
        let tree = self.tree();
        match direction {
            Direction::Right => from.next(tree),
            Direction::Left => from.previous(tree),
            Direction::Down => self.vertical_position(from, tree.next_leaf(from.node_id)?),
            Direction::Up => self.vertical_position(from, tree.prev_leaf(from.node_id)?),
        }
    }

    fn vertical_position(&self, from: DocumentPosition, leaf: NodeId) -> Option<DocumentPosition> {
        if !self.settings().navigation.preserve_column {
            return Some(DocumentPosition::start_of(leaf));
        }
        let max_index = self.tree().get(leaf)?.max_index()?;
        Some(DocumentPosition::new(leaf, from.offset.min(max_index)))
    }

    fn commit_selection(&mut self, range: TextRange, state: ShiftState, direction: Direction) -> Result<()> {
        let tree = self.tree_mut();
        tree.set_selection(range)?;
        tree.set_shift_state(state);
        tracing::trace!(
            target: "edit_engine::selection",
            ?direction,
            ?state,
            start = %range.start.node_id,
            start_offset = range.start.offset,
            end = %range.end.node_id,
            end_offset = range.end.offset,
            "selection moved"
        );
        Ok(())
    }

    fn place_caret_at_document_start(&mut self) -> Result<()> {
        let root = self.tree().root_id();
        match self.tree().first_leaf(root) {
            Some(leaf) => self.set_selection(TextRange::collapsed(DocumentPosition::start_of(leaf))),
            None => Ok(()),
        }
    }
}
