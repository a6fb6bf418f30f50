//! Round trip between a structured [`Document`] and flat text.
//!
//! Serialization joins tokens with single spaces, concatenates sentences with a single space,
//! trims trailing whitespace per paragraph and joins paragraphs with `'\n'`. All offsets are
//! character (Unicode scalar) offsets.

use crate::document::Document;
use crate::error::EditorError;
use crate::position::{BlockPosition, Precision, WordPosition};
use crate::selection::SelectionRange;
use crate::text::Segmenter;

/// Flat text plus the character offsets of a serialized selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedDocument {
    /// The flat text.
    pub result: String,
    /// Offset of the first selected character.
    pub selection_begin: usize,
    /// Offset just past the last selected character.
    pub selection_end: usize,
    /// The selected substring.
    pub selection: String,
}

/// Serialized text with the start offset and length of every token, indexed
/// `[paragraph][sentence][word]`.
struct Layout {
    text: String,
    spans: Vec<Vec<Vec<(usize, usize)>>>,
}

impl Layout {
    fn build(document: &Document) -> Self {
        let delimiters = document.variable_delimiters();
        let mut text = String::new();
        let mut spans = Vec::with_capacity(document.paragraph_count());
        let mut base = 0;

        for (index, paragraph) in document.paragraphs().iter().enumerate() {
            if index > 0 {
                text.push('\n');
                base += 1;
            }
            let mut line = String::new();
            let mut offset = 0;
            let mut paragraph_spans = Vec::with_capacity(paragraph.sentence_count());
            for sentence in paragraph.sentences() {
                let mut sentence_spans = Vec::with_capacity(sentence.token_count());
                for token in sentence.tokens() {
                    let serialized = token.serialized(delimiters);
                    let len = serialized.chars().count();
                    sentence_spans.push((base + offset, len));
                    line.push_str(&serialized);
                    line.push(' ');
                    offset += len + 1;
                }
                paragraph_spans.push(sentence_spans);
            }

            let trimmed = line.trim_end();
            let line_len = trimmed.chars().count();
            text.push_str(trimmed);

            // Tokens swallowed by the trim collapse onto the end of the line.
            let line_end = base + line_len;
            for (start, len) in paragraph_spans.iter_mut().flatten() {
                if *start + *len > line_end {
                    *start = (*start).min(line_end);
                    *len = line_end - *start;
                }
            }
            spans.push(paragraph_spans);
            base = line_end;
        }

        Self { text, spans }
    }

    fn span(&self, pos: WordPosition) -> Result<(usize, usize), EditorError> {
        let sentences = self.spans.get(pos.paragraph).ok_or_else(|| {
            EditorError::out_of_bounds(Precision::Paragraph, pos.paragraph, self.spans.len())
        })?;
        let words = sentences.get(pos.sentence).ok_or_else(|| {
            EditorError::out_of_bounds(Precision::Sentence, pos.sentence, sentences.len())
        })?;
        words
            .get(pos.word)
            .copied()
            .ok_or_else(|| EditorError::out_of_bounds(Precision::Word, pos.word, words.len()))
    }
}

/// Flat text of `document`.
pub fn serialize(document: &Document) -> String {
    Layout::build(document).text
}

/// Widen `pos` to the first (`start == true`) or last token it covers.
fn boundary_word(document: &Document, pos: &BlockPosition, start: bool) -> WordPosition {
    match pos {
        BlockPosition::Paragraph(p) if start => WordPosition::new(p.paragraph, 0, 0),
        BlockPosition::Paragraph(p) => document.last_word_in_paragraph(p.paragraph),
        BlockPosition::Sentence(s) if start => s.word(0),
        BlockPosition::Sentence(s) => s.word(document.word_count(*s).saturating_sub(1)),
        BlockPosition::Word(w) => *w,
        BlockPosition::Character(c) => c.word_position(),
    }
}

/// Serialize `document` and compute the character offsets of `range`.
///
/// Sentence- and paragraph-precision bounds widen to their first and last token. Without a
/// range the selection is empty at offset 0.
///
/// # Example
///
/// ```rust
/// use prompt_editor_core::{convert_document_to_string, Document, SelectionRange, WordPosition};
///
/// let doc = Document::parse("Hello world. Goodbye now.");
/// let range = SelectionRange::collapsed(WordPosition::new(0, 1, 0).into());
/// let out = convert_document_to_string(&doc, Some(&range)).unwrap();
/// assert_eq!(out.result, "Hello world. Goodbye now.");
/// assert_eq!((out.selection_begin, out.selection_end), (13, 20));
/// assert_eq!(out.selection, "Goodbye");
/// ```
pub fn convert_document_to_string(
    document: &Document,
    range: Option<&SelectionRange>,
) -> Result<SerializedDocument, EditorError> {
    let layout = Layout::build(document);
    let Some(range) = range else {
        return Ok(SerializedDocument {
            result: layout.text,
            selection_begin: 0,
            selection_end: 0,
            selection: String::new(),
        });
    };

    let (lower, upper) = range.sorted_bounds();
    let (begin, _) = layout.span(boundary_word(document, &lower, true))?;
    let (last_start, last_len) = layout.span(boundary_word(document, &upper, false))?;
    let end = (last_start + last_len).max(begin);

    let selection = layout.text.chars().skip(begin).take(end - begin).collect();
    Ok(SerializedDocument {
        result: layout.text,
        selection_begin: begin,
        selection_end: end,
        selection,
    })
}

/// Map a flat-text selection back onto word positions using the default segmentation rules.
///
/// See [`Segmenter::selection_from_offsets`].
pub fn word_position_from_raw_text_selection(
    text: &str,
    begin: usize,
    end: usize,
) -> Result<SelectionRange, EditorError> {
    Segmenter::global().selection_from_offsets(text, begin, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{ParagraphPosition, SentencePosition};

    #[test]
    fn test_serialize_normalizes_trailing_whitespace() {
        let doc = Document::parse("a  b   \nc. D\n\n");
        assert_eq!(serialize(&doc), "a  b\nc. D\n\n");
    }

    #[test]
    fn test_sentence_range_widens_to_words() {
        let doc = Document::parse("Hello world. Goodbye now.");
        let range = SelectionRange::collapsed(SentencePosition::new(0, 0).into());
        let out = convert_document_to_string(&doc, Some(&range)).unwrap();
        assert_eq!((out.selection_begin, out.selection_end), (0, 12));
        assert_eq!(out.selection, "Hello world.");
    }

    #[test]
    fn test_paragraph_range_widens_to_words() {
        let doc = Document::parse("One. Two.\nThree four.");
        let range = SelectionRange::collapsed(ParagraphPosition::new(1).into());
        let out = convert_document_to_string(&doc, Some(&range)).unwrap();
        assert_eq!(out.selection, "Three four.");
    }

    #[test]
    fn test_reversed_range_across_paragraphs() {
        let doc = Document::parse("Alpha beta.\nGamma delta.");
        let range = SelectionRange::new(
            WordPosition::new(1, 0, 0).into(),
            WordPosition::new(0, 0, 1).into(),
        );
        let out = convert_document_to_string(&doc, Some(&range)).unwrap();
        assert_eq!(out.selection, "beta.\nGamma");
    }

    #[test]
    fn test_variables_serialize_with_braces() {
        let doc = Document::parse("Answer {QUESTION} now.");
        let range = SelectionRange::collapsed(WordPosition::new(0, 0, 1).into());
        let out = convert_document_to_string(&doc, Some(&range)).unwrap();
        assert_eq!(out.selection, "{QUESTION}");
    }

    #[test]
    fn test_trailing_empty_token_clamped() {
        let doc = Document::parse("end ");
        let range = SelectionRange::collapsed(WordPosition::new(0, 0, 1).into());
        let out = convert_document_to_string(&doc, Some(&range)).unwrap();
        assert_eq!(out.result, "end");
        assert_eq!((out.selection_begin, out.selection_end), (3, 3));
    }

    #[test]
    fn test_invalid_range_is_an_error() {
        let doc = Document::parse("x");
        let range = SelectionRange::collapsed(WordPosition::new(0, 0, 4).into());
        assert!(convert_document_to_string(&doc, Some(&range)).is_err());
    }

    #[test]
    fn test_no_range() {
        let doc = Document::parse("x y");
        let out = convert_document_to_string(&doc, None).unwrap();
        assert_eq!(out.result, "x y");
        assert_eq!(out.selection, "");
    }
}
