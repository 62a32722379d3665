//! Typed edit requests produced by the input layer

use doc_model::{StyleChange, TextRange};
use serde::{Deserialize, Serialize};

/// An edit to apply to the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditAction {
    /// Replace the text in `range` with `text`
    ReplaceRange { range: TextRange, text: String },
    /// Apply a style change to the text in `range`
    Format { range: TextRange, change: StyleChange },
}

impl EditAction {
    pub fn replace(range: TextRange, text: impl Into<String>) -> Self {
        EditAction::ReplaceRange {
            range,
            text: text.into(),
        }
    }

    pub fn format(range: TextRange, change: StyleChange) -> Self {
        EditAction::Format { range, change }
    }

    /// Get a display name for this action
    pub fn display_name(&self) -> &str {
        match self {
            EditAction::ReplaceRange { text, .. } if text.is_empty() => "Delete",
            EditAction::ReplaceRange { .. } => "Replace Text",
            EditAction::Format { .. } => "Format Text",
        }
    }
}
