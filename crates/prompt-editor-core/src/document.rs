//! Document model: paragraphs of sentences of tokens.
//!
//! The tree is rebuilt wholesale from flat text (see [`Segmenter`](crate::text::Segmenter)); the
//! mutators below are the only localized edits. Every mutator validates its indices before
//! touching the tree, so a failed call leaves the document unchanged.

use crate::convert;
use crate::error::EditorError;
use crate::position::{BlockPosition, Precision, SentencePosition, WordPosition};
use crate::selection::SelectionRange;
use crate::text::Segmenter;
use prompt_editor_lang::VariableDelimiters;
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// A word or an opaque template variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Plain word (may be empty, see [`Paragraph::empty`]).
    Word(String),
    /// Atomic placeholder; never split, serialized as `{id}`.
    Variable {
        /// Variable identifier.
        id: String,
        /// Display label.
        label: String,
    },
}

impl Token {
    /// Create a plain word.
    pub fn word(text: impl Into<String>) -> Self {
        Token::Word(text.into())
    }

    /// Create a variable whose label equals its id.
    pub fn variable(id: impl Into<String>) -> Self {
        let id = id.into();
        Token::Variable {
            label: id.clone(),
            id,
        }
    }

    /// Display text (the label for variables).
    pub fn text(&self) -> &str {
        match self {
            Token::Word(text) => text,
            Token::Variable { label, .. } => label,
        }
    }

    /// Returns `true` for an empty word.
    pub fn is_empty(&self) -> bool {
        matches!(self, Token::Word(text) if text.is_empty())
    }

    /// Returns `true` for a variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, Token::Variable { .. })
    }

    /// Number of grapheme clusters a caret can sit between (0 for variables).
    pub fn grapheme_count(&self) -> usize {
        match self {
            Token::Word(text) => text.graphemes(true).count(),
            Token::Variable { .. } => 0,
        }
    }

    /// Flat-text form of this token.
    pub fn serialized(&self, delimiters: VariableDelimiters) -> String {
        match self {
            Token::Word(text) => text.clone(),
            Token::Variable { id, .. } => format!("{}{}{}", delimiters.open, id, delimiters.close),
        }
    }
}

/// A non-empty sequence of tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    /// Create a sentence. An empty token list becomes a single empty word.
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut sentence = Self { tokens };
        sentence.ensure_token();
        sentence
    }

    /// All tokens.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token at `index`.
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Number of tokens (always at least 1).
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if this sentence is a single empty word.
    pub fn is_blank(&self) -> bool {
        matches!(self.tokens.as_slice(), [only] if only.is_empty())
    }

    fn ensure_token(&mut self) {
        if self.tokens.is_empty() {
            self.tokens.push(Token::word(""));
        }
    }
}

/// A non-empty sequence of sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    sentences: Vec<Sentence>,
}

impl Paragraph {
    /// Create a paragraph. An empty sentence list becomes [`Paragraph::empty`].
    pub fn new(sentences: Vec<Sentence>) -> Self {
        let mut paragraph = Self { sentences };
        paragraph.ensure_sentence();
        paragraph
    }

    /// The structurally empty paragraph: one sentence holding one empty word.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// All sentences.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Sentence at `index`.
    pub fn sentence(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    /// Number of sentences (always at least 1).
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Returns `true` if this paragraph is structurally empty.
    pub fn is_blank(&self) -> bool {
        matches!(self.sentences.as_slice(), [only] if only.is_blank())
    }

    fn ensure_sentence(&mut self) {
        if self.sentences.is_empty() {
            self.sentences.push(Sentence::new(Vec::new()));
        }
    }
}

/// Where a moved or copied sentence lands relative to its drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Before the target sentence.
    Before,
    /// After the target sentence.
    After,
}

/// A parsed prompt document.
///
/// # Example
///
/// ```rust
/// use prompt_editor_core::{Document, WordPosition};
///
/// let doc = Document::parse("Hello world. Goodbye now.");
/// assert_eq!(doc.paragraph_count(), 1);
/// assert_eq!(doc.sentence_count(0), 2);
/// assert_eq!(doc.token(WordPosition::new(0, 1, 1)).unwrap().text(), "now.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
    delimiters: VariableDelimiters,
}

impl Default for Document {
    fn default() -> Self {
        Self::from_paragraphs(Vec::new())
    }
}

impl Document {
    /// Parse flat text with the default segmentation rules. Never fails.
    pub fn parse(text: &str) -> Self {
        Segmenter::global().parse(text)
    }

    /// Build a document from paragraphs. An empty list becomes one empty paragraph.
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        let mut doc = Self {
            paragraphs,
            delimiters: VariableDelimiters::default(),
        };
        if doc.paragraphs.is_empty() {
            doc.paragraphs.push(Paragraph::empty());
        }
        doc
    }

    pub(crate) fn with_delimiters(mut self, delimiters: VariableDelimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Delimiters used when serializing variables.
    pub fn variable_delimiters(&self) -> VariableDelimiters {
        self.delimiters
    }

    /// All paragraphs.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Paragraph at `index`.
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    /// Sentence at `pos`.
    pub fn sentence(&self, pos: SentencePosition) -> Option<&Sentence> {
        self.paragraph(pos.paragraph)?.sentence(pos.sentence)
    }

    /// Token at `pos`.
    pub fn token(&self, pos: WordPosition) -> Option<&Token> {
        self.sentence(pos.sentence_position())?.token(pos.word)
    }

    /// Number of paragraphs (always at least 1).
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Number of sentences in `paragraph` (0 if it does not exist).
    pub fn sentence_count(&self, paragraph: usize) -> usize {
        self.paragraph(paragraph).map_or(0, Paragraph::sentence_count)
    }

    /// Number of tokens in the sentence at `pos` (0 if it does not exist).
    pub fn word_count(&self, pos: SentencePosition) -> usize {
        self.sentence(pos).map_or(0, Sentence::token_count)
    }

    /// Total number of sentences.
    pub fn total_sentences(&self) -> usize {
        self.paragraphs.iter().map(Paragraph::sentence_count).sum()
    }

    /// Total number of tokens.
    pub fn total_words(&self) -> usize {
        self.paragraphs
            .iter()
            .flat_map(|p| p.sentences.iter())
            .map(Sentence::token_count)
            .sum()
    }

    /// Returns `true` if `paragraph` exists and is structurally empty.
    pub fn is_empty_paragraph(&self, paragraph: usize) -> bool {
        self.paragraph(paragraph).is_some_and(Paragraph::is_blank)
    }

    /// Returns `true` if `pos` is the last token of its sentence.
    pub fn is_last_word_of_sentence(&self, pos: WordPosition) -> bool {
        pos.word + 1 == self.word_count(pos.sentence_position())
    }

    /// Position of the last token of the last sentence of `paragraph`.
    pub fn last_word_in_paragraph(&self, paragraph: usize) -> WordPosition {
        let sentence = self.sentence_count(paragraph).saturating_sub(1);
        let sentence = SentencePosition::new(paragraph, sentence);
        sentence.word(self.word_count(sentence).saturating_sub(1))
    }

    /// Position of the last token in the document.
    pub fn last_word_position(&self) -> WordPosition {
        self.last_word_in_paragraph(self.paragraph_count() - 1)
    }

    /// Check that every index of `pos` addresses an existing element.
    ///
    /// A character index may equal the token's grapheme count (caret after the last grapheme).
    pub fn validate_position(&self, pos: &BlockPosition) -> Result<(), EditorError> {
        let paragraph = pos.paragraph();
        let para = self.paragraph(paragraph).ok_or_else(|| {
            EditorError::out_of_bounds(Precision::Paragraph, paragraph, self.paragraph_count())
        })?;

        let Some(sentence) = pos.sentence() else {
            return Ok(());
        };
        let sent = para.sentence(sentence).ok_or_else(|| {
            EditorError::out_of_bounds(Precision::Sentence, sentence, para.sentence_count())
        })?;

        let Some(word) = pos.word() else {
            return Ok(());
        };
        let token = sent
            .token(word)
            .ok_or_else(|| EditorError::out_of_bounds(Precision::Word, word, sent.token_count()))?;

        if let Some(character) = pos.character() {
            let count = token.grapheme_count();
            if character > count {
                return Err(EditorError::out_of_bounds(
                    Precision::Character,
                    character,
                    count,
                ));
            }
        }
        Ok(())
    }

    /// Absolute sentence ordinal: sentences in earlier paragraphs plus `pos.sentence`.
    pub fn sentence_ordinal(&self, pos: SentencePosition) -> usize {
        let before: usize = self
            .paragraphs
            .iter()
            .take(pos.paragraph)
            .map(Paragraph::sentence_count)
            .sum();
        before + pos.sentence
    }

    /// Absolute word ordinal: tokens in all earlier sentences plus `pos.word`.
    pub fn word_ordinal(&self, pos: WordPosition) -> usize {
        let in_earlier_paragraphs: usize = self
            .paragraphs
            .iter()
            .take(pos.paragraph)
            .flat_map(|p| p.sentences.iter())
            .map(Sentence::token_count)
            .sum();
        let in_earlier_sentences: usize = self
            .paragraph(pos.paragraph)
            .map(|p| {
                p.sentences
                    .iter()
                    .take(pos.sentence)
                    .map(Sentence::token_count)
                    .sum()
            })
            .unwrap_or(0);
        in_earlier_paragraphs + in_earlier_sentences + pos.word
    }

    /// Replace the token at `pos` with a plain word.
    pub fn update_word(&mut self, pos: WordPosition, word: impl Into<String>) -> Result<(), EditorError> {
        self.validate_position(&pos.into())?;
        let sentence = self.sentence_mut(pos.sentence_position())?;
        sentence.tokens[pos.word] = Token::Word(word.into());
        Ok(())
    }

    /// Insert a plain word before `pos.word`; `pos.word == token_count` appends.
    ///
    /// Inserting into a blank sentence replaces its placeholder.
    pub fn insert_word(&mut self, pos: WordPosition, word: impl Into<String>) -> Result<(), EditorError> {
        let sentence_pos = pos.sentence_position();
        self.validate_position(&sentence_pos.into())?;
        let sentence = self.sentence_mut(sentence_pos)?;
        let len = sentence.token_count();
        if pos.word > len {
            return Err(EditorError::out_of_bounds(Precision::Word, pos.word, len));
        }
        let token = Token::Word(word.into());
        if sentence.is_blank() {
            sentence.tokens[0] = token;
        } else {
            sentence.tokens.insert(pos.word, token);
        }
        Ok(())
    }

    /// Remove the token at `pos`. A sentence left without tokens keeps one empty word.
    pub fn delete_word(&mut self, pos: WordPosition) -> Result<Token, EditorError> {
        self.validate_position(&pos.into())?;
        let sentence = self.sentence_mut(pos.sentence_position())?;
        let removed = sentence.tokens.remove(pos.word);
        sentence.ensure_token();
        Ok(removed)
    }

    /// Move the sentence addressed by `from.from` next to `to`.
    ///
    /// When the source precedes the insertion point inside the same paragraph, the insertion
    /// index is corrected by −1 to account for the removal. A paragraph emptied by the removal
    /// becomes an empty paragraph; inserting into an empty paragraph replaces its placeholder.
    /// Returns where the sentence landed.
    pub fn move_sentence(
        &mut self,
        from: &SelectionRange,
        to: SentencePosition,
        insertion: Insertion,
    ) -> Result<SentencePosition, EditorError> {
        let source = from.from.as_sentence();
        self.validate_position(&source.into())?;
        self.validate_position(&to.into())?;
        if source == to {
            return Ok(source);
        }

        let source_para = &mut self.paragraphs[source.paragraph];
        let sentence = source_para.sentences.remove(source.sentence);
        source_para.ensure_sentence();

        let mut index = to.sentence + usize::from(insertion == Insertion::After);
        if source.paragraph == to.paragraph && source.sentence < index {
            index -= 1;
        }
        Ok(self.insert_sentence(to.paragraph, index, sentence))
    }

    /// Copy the sentence addressed by `from.from` next to `to`, leaving the source in place.
    pub fn copy_sentence(
        &mut self,
        from: &SelectionRange,
        to: SentencePosition,
        insertion: Insertion,
    ) -> Result<SentencePosition, EditorError> {
        let source = from.from.as_sentence();
        self.validate_position(&source.into())?;
        self.validate_position(&to.into())?;

        let sentence = self.paragraphs[source.paragraph].sentences[source.sentence].clone();
        let index = to.sentence + usize::from(insertion == Insertion::After);
        Ok(self.insert_sentence(to.paragraph, index, sentence))
    }

    fn insert_sentence(&mut self, paragraph: usize, index: usize, sentence: Sentence) -> SentencePosition {
        let target = &mut self.paragraphs[paragraph];
        if target.is_blank() {
            target.sentences.clear();
        }
        let index = index.min(target.sentences.len());
        target.sentences.insert(index, sentence);
        SentencePosition::new(paragraph, index)
    }

    fn sentence_mut(&mut self, pos: SentencePosition) -> Result<&mut Sentence, EditorError> {
        let paragraph_count = self.paragraphs.len();
        let para = self.paragraphs.get_mut(pos.paragraph).ok_or_else(|| {
            EditorError::out_of_bounds(Precision::Paragraph, pos.paragraph, paragraph_count)
        })?;
        let sentence_count = para.sentences.len();
        para.sentences.get_mut(pos.sentence).ok_or_else(|| {
            EditorError::out_of_bounds(Precision::Sentence, pos.sentence, sentence_count)
        })
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&convert::serialize(self))
    }
}
