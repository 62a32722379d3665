//! Image leaf

use serde::{Deserialize, Serialize};

/// An image occupying a single slot in the text flow.
///
/// The caret can sit before (offset 0) or after (offset 1) an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Reference to the stored image resource (path, URL or key)
    pub source: String,
    /// Alternative text
    pub alt_text: Option<String>,
}

impl Image {
    /// Largest valid caret offset inside an image
    pub const MAX_INDEX: usize = 1;

    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            alt_text: None,
        }
    }

    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    pub fn has_index(&self, offset: usize) -> bool {
        offset <= Self::MAX_INDEX
    }

    pub fn max_index(&self) -> usize {
        Self::MAX_INDEX
    }
}
