//! Text ranges and the shift-extend state of the current selection

use crate::{DocumentPosition, DocumentTree};
use serde::{Deserialize, Serialize};

/// A pair of positions delimiting a selection.
///
/// The range does not enforce `start <= end` on construction; code that
/// mutates the selection keeps it ordered, and [`TextRange::ordered`] swaps a
/// reversed range back into document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: DocumentPosition,
    pub end: DocumentPosition,
}

impl TextRange {
    pub fn new(start: DocumentPosition, end: DocumentPosition) -> Self {
        Self { start, end }
    }

    /// A caret: both endpoints at `position`
    pub fn collapsed(position: DocumentPosition) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Whether both endpoints lie in the same leaf
    pub fn is_single_leaf(&self) -> bool {
        self.start.node_id == self.end.node_id
    }

    /// Whether `start` does not come after `end` in document order
    pub fn is_ordered(&self, tree: &DocumentTree) -> bool {
        !self.end.before(&self.start, tree)
    }

    /// This range with its endpoints in document order
    pub fn ordered(&self, tree: &DocumentTree) -> Self {
        if self.is_ordered(tree) {
            *self
        } else {
            Self::new(self.end, self.start)
        }
    }
}

/// Which endpoint a shift-held directional move is currently extending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftState {
    /// No extension in progress
    #[default]
    Collapsed,
    /// Extending the start of the range
    ManipulateStart,
    /// Extending the end of the range
    ManipulateEnd,
}

impl ShiftState {
    /// The opposite extending state; `Collapsed` stays `Collapsed`
    pub fn flipped(self) -> Self {
        match self {
            ShiftState::Collapsed => ShiftState::Collapsed,
            ShiftState::ManipulateStart => ShiftState::ManipulateEnd,
            ShiftState::ManipulateEnd => ShiftState::ManipulateStart,
        }
    }
}
