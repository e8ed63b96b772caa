//! Choosing the text a suggestion request operates on.

use std::ops::Range;

/// Read access to the editor's text and current selection.
pub trait SelectionResolver {
    /// Text covered by the current selection, if any.
    fn selected_text(&self) -> Option<String>;

    /// The whole document as plain text.
    fn full_text(&self) -> String;
}

/// The selection when it has non-blank text, otherwise the full document.
pub fn resolve_target<R: SelectionResolver + ?Sized>(resolver: &R) -> String {
    match resolver.selected_text() {
        Some(selection) if !selection.trim().is_empty() => selection,
        _ => resolver.full_text(),
    }
}

/// Plain-text snapshot of a document with a character-range selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSnapshot {
    text: String,
    selection: Range<usize>,
}

impl DocumentSnapshot {
    /// A document with a collapsed selection at the start.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: 0..0,
        }
    }

    /// Set the selection, in characters. Out-of-range bounds are clamped.
    pub fn with_selection(mut self, selection: Range<usize>) -> Self {
        self.select(selection);
        self
    }

    pub fn select(&mut self, selection: Range<usize>) {
        let len = self.text.chars().count();
        let start = selection.start.min(len);
        let end = selection.end.clamp(start, len);
        self.selection = start..end;
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }
}

impl SelectionResolver for DocumentSnapshot {
    fn selected_text(&self) -> Option<String> {
        if self.selection.is_empty() {
            return None;
        }
        Some(
            self.text
                .chars()
                .skip(self.selection.start)
                .take(self.selection.len())
                .collect(),
        )
    }

    fn full_text(&self) -> String {
        self.text.clone()
    }
}
