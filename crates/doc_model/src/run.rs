//! Formatting runs - contiguous spans of paragraph text sharing one style

use serde::{Deserialize, Serialize};

/// Vertical placement of text relative to the baseline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselinePosition {
    #[default]
    Normal,
    Subscript,
    Superscript,
}

/// Character style carried by a formatting run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Font size as a CSS length (e.g. "1.0em", "12pt")
    pub size: String,
    /// Text color as a CSS color string
    pub color: String,
    /// Background highlight as a CSS color string
    pub highlight: String,
    pub baseline: BaselinePosition,
}

impl Default for RunStyle {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            size: "1.0em".to_string(),
            color: "black".to_string(),
            highlight: "transparent".to_string(),
            baseline: BaselinePosition::Normal,
        }
    }
}

/// A partial style update; `None` fields leave the run's value untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleChange {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub highlight: Option<String>,
    pub baseline: Option<BaselinePosition>,
}

impl StyleChange {
    /// Check if this change sets nothing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the set fields of this change to a style
    pub fn apply_to(&self, style: &mut RunStyle) {
        if let Some(v) = self.bold {
            style.bold = v;
        }
        if let Some(v) = self.italic {
            style.italic = v;
        }
        if let Some(v) = self.underline {
            style.underline = v;
        }
        if let Some(v) = &self.size {
            style.size = v.clone();
        }
        if let Some(v) = &self.color {
            style.color = v.clone();
        }
        if let Some(v) = &self.highlight {
            style.highlight = v.clone();
        }
        if let Some(v) = self.baseline {
            style.baseline = v;
        }
    }
}

/// A formatting run: a style plus the number of characters it covers.
///
/// Runs carry no start offset; a run's position is the sum of the lengths of
/// the runs before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRun {
    pub style: RunStyle,
    pub length: usize,
}

impl FormatRun {
    /// Create a run with the default style
    pub fn new(length: usize) -> Self {
        Self {
            style: RunStyle::default(),
            length,
        }
    }

    /// Create a run with a specific style
    pub fn with_style(style: RunStyle, length: usize) -> Self {
        Self { style, length }
    }

    /// Copy this run's style into a new run of a different length
    pub fn split_off(&self, length: usize) -> Self {
        Self {
            style: self.style.clone(),
            length,
        }
    }
}
