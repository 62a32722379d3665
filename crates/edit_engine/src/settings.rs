//! Editor settings
//!
//! Settings are plain serde structs with defaults for every field, so a
//! settings file only needs to name the values it overrides.

use crate::Result;
use doc_model::RunStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level editor settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorSettings {
    /// Formatting behaviour of edits
    pub formatting: FormattingSettings,
    /// Caret movement behaviour
    pub navigation: NavigationSettings,
}

/// Formatting behaviour of edits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormattingSettings {
    /// Style of the initial paragraph of a new document
    pub default_style: RunStyle,
    /// Remove zero-length formatting runs after each edit
    pub prune_empty_runs: bool,
}

impl Default for FormattingSettings {
    fn default() -> Self {
        Self {
            default_style: RunStyle::default(),
            prune_empty_runs: true,
        }
    }
}

/// Caret movement behaviour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavigationSettings {
    /// Keep the character offset (clamped) when moving up or down between
    /// leaves; when off, vertical moves land at the start of the target leaf
    pub preserve_column: bool,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            preserve_column: true,
        }
    }
}

impl EditorSettings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file, or return defaults if the file is
    /// missing or cannot be parsed
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_json(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse settings file {}, using defaults: {}",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read settings file {}, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Write settings to a JSON file, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
