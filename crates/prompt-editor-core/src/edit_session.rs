//! Flat-text edit mode.
//!
//! Structural navigation never edits text directly. Free-form edits happen in an
//! [`EditSession`]: the document is serialized, the current range becomes a character
//! selection, and on commit the edited text is parsed back into a fresh [`Document`] with the
//! selection mapped back onto word positions.

use crate::convert::convert_document_to_string;
use crate::document::Document;
use crate::error::EditorError;
use crate::selection::SelectionRange;
use crate::text::Segmenter;
use ropey::Rope;

/// Which surface currently owns user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorMode {
    /// Structured navigation and selection.
    #[default]
    Select,
    /// Flat-text editing through an [`EditSession`].
    Edit,
}

/// An open flat-text edit of a document.
#[derive(Debug, Clone)]
pub struct EditSession {
    rope: Rope,
    selection: (usize, usize),
}

impl EditSession {
    /// Serialize `document` and select the characters covered by `range`.
    pub fn open(document: &Document, range: Option<&SelectionRange>) -> Result<Self, EditorError> {
        let serialized = convert_document_to_string(document, range)?;
        Ok(Self {
            rope: Rope::from_str(&serialized.result),
            selection: (serialized.selection_begin, serialized.selection_end),
        })
    }

    /// Session over raw text with an empty selection at offset 0.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: (0, 0),
        }
    }

    /// Current text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Length of the text in characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Selection as `(begin, end)` character offsets, `begin <= end`.
    pub fn selection(&self) -> (usize, usize) {
        self.selection
    }

    /// Currently selected text.
    pub fn selected_text(&self) -> String {
        let (begin, end) = self.selection;
        self.rope.slice(begin..end).to_string()
    }

    /// Select `[begin, end)`. The offsets may be given in either order.
    pub fn set_selection(&mut self, begin: usize, end: usize) -> Result<(), EditorError> {
        let len = self.len_chars();
        for offset in [begin, end] {
            if offset > len {
                return Err(EditorError::OffsetOutOfBounds { offset, len });
            }
        }
        self.selection = (begin.min(end), begin.max(end));
        Ok(())
    }

    /// Replace the selected text with `text` and place a collapsed selection after it.
    pub fn replace_selection(&mut self, text: &str) {
        let (begin, end) = self.selection;
        self.rope.remove(begin..end);
        self.rope.insert(begin, text);
        let caret = begin + text.chars().count();
        self.selection = (caret, caret);
    }

    /// Replace the whole text, clamping the selection to the new length.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        let len = self.len_chars();
        self.selection = (self.selection.0.min(len), self.selection.1.min(len));
    }

    /// Parse the edited text and map the selection back onto word positions.
    pub fn commit(self, segmenter: &Segmenter) -> Result<(Document, SelectionRange), EditorError> {
        let text = self.text();
        let (begin, end) = self.selection;
        let range = segmenter.selection_from_offsets(&text, begin, end)?;
        Ok((segmenter.parse(&text), range))
    }
}
