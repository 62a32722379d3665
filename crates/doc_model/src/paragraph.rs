//! Paragraph leaf - text plus the formatting runs that partition it
//!
//! Offsets throughout this module count `char`s. The formatting runs are kept
//! contiguous and ordered, and their lengths always sum to the text length;
//! every mutating operation re-validates that before returning.

use crate::{DocModelError, FormatRun, Result, RunStyle, StyleChange};
use serde::{Deserialize, Serialize};

/// Paragraph content: a text buffer and a non-empty run sequence.
///
/// Deserializing goes through [`Paragraph::with_runs`], so a run list that
/// does not cover the text exactly is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawParagraph")]
pub struct Paragraph {
    text: String,
    runs: Vec<FormatRun>,
}

/// Unchecked wire form of a paragraph
#[derive(Deserialize)]
struct RawParagraph {
    text: String,
    runs: Vec<FormatRun>,
}

impl TryFrom<RawParagraph> for Paragraph {
    type Error = DocModelError;

    fn try_from(raw: RawParagraph) -> Result<Self> {
        Self::with_runs(raw.text, raw.runs)
    }
}

impl Paragraph {
    /// Create an empty paragraph with a single zero-length default run
    pub fn new() -> Self {
        Self::with_style("", RunStyle::default())
    }

    /// Create a paragraph whose text is covered by one default-styled run
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::with_style(text, RunStyle::default())
    }

    /// Create a paragraph whose text is covered by one run of `style`
    pub fn with_style(text: impl Into<String>, style: RunStyle) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Self {
            text,
            runs: vec![FormatRun::with_style(style, length)],
        }
    }

    /// Create a paragraph from text and an explicit run partition
    pub fn with_runs(text: impl Into<String>, runs: Vec<FormatRun>) -> Result<Self> {
        let text = text.into();
        if runs.is_empty() {
            return Err(DocModelError::FormattingMismatch {
                expected: text.chars().count(),
                actual: 0,
            });
        }
        let paragraph = Self { text, runs };
        paragraph.validate()?;
        Ok(paragraph)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn runs(&self) -> &[FormatRun] {
        &self.runs
    }

    /// Number of characters in the paragraph
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether `offset` is a valid caret offset (`0..=len`)
    pub fn has_index(&self, offset: usize) -> bool {
        offset <= self.len()
    }

    /// The largest valid caret offset
    pub fn max_index(&self) -> usize {
        self.len()
    }

    /// Replace the whole text, collapsing formatting to the first run's style
    pub fn set_text(&mut self, text: impl Into<String>) {
        let style = self.runs[0].style.clone();
        *self = Self::with_style(text, style);
    }

    /// Style of the character at `offset` (the last run's style at the end)
    pub fn style_at(&self, offset: usize) -> &RunStyle {
        let (index, _) = self.find_format_index(offset);
        &self.runs[index].style
    }

    /// Locate the run covering `offset`.
    ///
    /// Returns the run's index and the offset at which it starts. An offset on
    /// a run boundary belongs to the following run; the end of the text
    /// belongs to the last run.
    pub fn find_format_index(&self, offset: usize) -> (usize, usize) {
        let mut run_start = 0;
        for (index, run) in self.runs.iter().enumerate() {
            if run_start + run.length > offset {
                return (index, run_start);
            }
            run_start += run.length;
        }
        let last = self.runs.len() - 1;
        (last, run_start - self.runs[last].length)
    }

    /// Replace the characters in `start..end` with `replacement`, resizing
    /// and removing runs so the partition still covers the new text.
    ///
    /// Inserted text takes the style of the run containing `start`.
    pub fn replace_range(&mut self, start: usize, end: usize, replacement: &str) -> Result<()> {
        let len = self.len();
        if start > end || end > len {
            return Err(DocModelError::InvalidRange { start, end, len });
        }

        let inserted = replacement.chars().count();
        let (start_run, start_run_offset) = self.find_format_index(start);
        let (end_run, end_run_offset) = self.find_format_index(end);

        if start_run == end_run {
            let run = &mut self.runs[start_run];
            run.length = run.length - (end - start) + inserted;
        } else {
            self.runs[end_run].length -= end - end_run_offset;
            self.runs[start_run].length = (start - start_run_offset) + inserted;
            self.runs.drain(start_run + 1..end_run);
        }

        let byte_start = byte_offset(&self.text, start);
        let byte_end = byte_offset(&self.text, end);
        self.text.replace_range(byte_start..byte_end, replacement);

        self.validate()
    }

    /// Apply a style change to the characters in `start..end`.
    ///
    /// Runs are split at the range edges, patched, and equal neighbours are
    /// merged back together afterwards.
    pub fn apply_style(&mut self, start: usize, end: usize, change: &StyleChange) -> Result<()> {
        let len = self.len();
        if start > end || end > len {
            return Err(DocModelError::InvalidRange { start, end, len });
        }
        if start == end || change.is_empty() {
            return Ok(());
        }

        self.split_at(start);
        self.split_at(end);

        let mut run_start = 0;
        for run in &mut self.runs {
            let run_end = run_start + run.length;
            if run.length > 0 && run_start >= start && run_end <= end {
                change.apply_to(&mut run.style);
            }
            run_start = run_end;
        }

        self.merge_adjacent();
        self.validate()
    }

    /// Drop zero-length runs, keeping at least one run
    pub fn prune_empty_runs(&mut self) {
        if self.runs.iter().all(|run| run.length == 0) {
            self.runs.truncate(1);
        } else {
            self.runs.retain(|run| run.length > 0);
        }
    }

    /// Check that the run lengths sum to the text length
    pub fn validate(&self) -> Result<()> {
        let expected = self.len();
        let actual: usize = self.runs.iter().map(|run| run.length).sum();
        if self.runs.is_empty() || actual != expected {
            return Err(DocModelError::FormattingMismatch { expected, actual });
        }
        Ok(())
    }

    /// Ensure a run boundary exists at `offset`
    fn split_at(&mut self, offset: usize) {
        let (index, run_start) = self.find_format_index(offset);
        let head = offset - run_start;
        let run = &self.runs[index];
        if head == 0 || head >= run.length {
            return;
        }
        let tail = run.split_off(run.length - head);
        self.runs[index].length = head;
        self.runs.insert(index + 1, tail);
    }

    fn merge_adjacent(&mut self) {
        let mut merged: Vec<FormatRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.style == run.style => prev.length += run.length,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte index of the `char_offset`-th character (the text length past the end)
fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bold() -> RunStyle {
        RunStyle {
            bold: true,
            ..Default::default()
        }
    }

    fn lengths(paragraph: &Paragraph) -> Vec<usize> {
        paragraph.runs().iter().map(|run| run.length).collect()
    }

    fn two_run_paragraph() -> Paragraph {
        Paragraph::with_runs(
            "Hello",
            vec![FormatRun::new(3), FormatRun::with_style(bold(), 2)],
        )
        .unwrap()
    }

    #[test]
    fn test_new_paragraph_has_one_empty_run() {
        let para = Paragraph::new();
        assert_eq!(para.text(), "");
        assert_eq!(lengths(&para), vec![0]);
        assert!(para.validate().is_ok());
    }

    #[test]
    fn test_with_runs_rejects_mismatch() {
        let err = Paragraph::with_runs("Hello", vec![FormatRun::new(4)]).unwrap_err();
        assert_eq!(err, DocModelError::FormattingMismatch { expected: 5, actual: 4 });
        assert!(Paragraph::with_runs("", vec![]).is_err());
    }

    #[test]
    fn test_find_format_index() {
        let para = two_run_paragraph();
        assert_eq!(para.find_format_index(0), (0, 0));
        assert_eq!(para.find_format_index(2), (0, 0));
        assert_eq!(para.find_format_index(3), (1, 3));
        assert_eq!(para.find_format_index(5), (1, 3));
    }

    #[test]
    fn test_replace_within_single_run() {
        let mut para = Paragraph::with_text("Hello");
        para.replace_range(1, 3, "X").unwrap();

        assert_eq!(para.text(), "HXlo");
        assert_eq!(lengths(&para), vec![4]);
    }

    #[test]
    fn test_delete_across_runs() {
        let mut para = two_run_paragraph();
        para.replace_range(2, 4, "").unwrap();

        assert_eq!(para.text(), "Heo");
        assert_eq!(lengths(&para), vec![2, 1]);
        assert!(para.runs()[1].style.bold);
    }

    #[test]
    fn test_replace_removes_runs_in_between() {
        let mut para = Paragraph::with_runs(
            "aaabbbccc",
            vec![
                FormatRun::new(3),
                FormatRun::with_style(bold(), 3),
                FormatRun::new(3),
            ],
        )
        .unwrap();
        para.replace_range(1, 8, "XY").unwrap();

        assert_eq!(para.text(), "aXYc");
        assert_eq!(lengths(&para), vec![3, 1]);
        assert!(para.runs().iter().all(|run| !run.style.bold));
    }

    #[test]
    fn test_insert_at_run_boundary_joins_following_run() {
        let mut para = two_run_paragraph();
        para.replace_range(3, 3, "!!").unwrap();

        assert_eq!(para.text(), "Hel!!lo");
        assert_eq!(lengths(&para), vec![3, 4]);
    }

    #[test]
    fn test_insert_at_end() {
        let mut para = two_run_paragraph();
        para.replace_range(5, 5, " world").unwrap();

        assert_eq!(para.text(), "Hello world");
        assert_eq!(lengths(&para), vec![3, 8]);
    }

    #[test]
    fn test_delete_everything_leaves_empty_runs() {
        let mut para = two_run_paragraph();
        para.replace_range(0, 5, "").unwrap();
        assert_eq!(para.text(), "");
        assert!(para.validate().is_ok());

        para.prune_empty_runs();
        assert_eq!(lengths(&para), vec![0]);
    }

    #[test]
    fn test_replace_rejects_out_of_range() {
        let mut para = Paragraph::with_text("abc");
        assert_eq!(
            para.replace_range(2, 4, "x"),
            Err(DocModelError::InvalidRange { start: 2, end: 4, len: 3 })
        );
        assert!(para.replace_range(2, 1, "x").is_err());
        assert_eq!(para.text(), "abc");
    }

    #[test]
    fn test_replace_counts_chars_not_bytes() {
        let mut para = Paragraph::with_text("héllo");
        para.replace_range(1, 2, "ë").unwrap();
        assert_eq!(para.text(), "hëllo");
        assert_eq!(para.len(), 5);
        assert_eq!(lengths(&para), vec![5]);
    }

    #[test]
    fn test_apply_style_splits_and_merges() {
        let mut para = Paragraph::with_text("Hello");
        let change = StyleChange {
            bold: Some(true),
            ..Default::default()
        };
        para.apply_style(1, 3, &change).unwrap();
        assert_eq!(lengths(&para), vec![1, 2, 2]);
        assert!(para.style_at(1).bold);
        assert!(!para.style_at(3).bold);

        let unbold = StyleChange {
            bold: Some(false),
            ..Default::default()
        };
        para.apply_style(0, 5, &unbold).unwrap();
        assert_eq!(lengths(&para), vec![5]);
    }

    #[test]
    fn test_set_text_keeps_first_style() {
        let mut para = Paragraph::with_style("abc", bold());
        para.set_text("longer text");
        assert_eq!(lengths(&para), vec![11]);
        assert!(para.runs()[0].style.bold);
    }

    #[test]
    fn test_deserialize_rejects_broken_runs() {
        let empty = serde_json::from_str::<Paragraph>(r#"{"text":"abc","runs":[]}"#);
        assert!(empty.is_err());

        let too_long =
            serde_json::from_str::<Paragraph>(r#"{"text":"abc","runs":[{"style":{},"length":7}]}"#);
        assert!(too_long.unwrap_err().to_string().contains("7"));
    }

    #[test]
    fn test_deserialize_accepts_consistent_runs() {
        let json = serde_json::to_string(&two_run_paragraph()).unwrap();
        let mut para: Paragraph = serde_json::from_str(&json).unwrap();
        assert_eq!(para, two_run_paragraph());

        para.replace_range(0, 0, "x").unwrap();
        assert_eq!(lengths(&para), vec![4, 2]);
    }

    proptest! {
        #[test]
        fn prop_run_lengths_track_text(
            edits in prop::collection::vec((0usize..20, 0usize..20, "[a-zé]{0,4}"), 1..20)
        ) {
            let mut para = two_run_paragraph();
            for (a, b, text) in edits {
                let len = para.len();
                let (start, end) = (a.min(len), b.min(len));
                let (start, end) = (start.min(end), start.max(end));
                para.replace_range(start, end, &text).unwrap();
                let total: usize = para.runs().iter().map(|run| run.length).sum();
                prop_assert_eq!(total, para.len());
            }
        }
    }
}
