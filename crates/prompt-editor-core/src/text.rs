//! Segmentation of flat text into the paragraph / sentence / token hierarchy.
//!
//! The rules come from [`prompt_editor_lang::SegmentationConfig`] and are compiled into regex
//! matchers once per [`Segmenter`]. Parsing is total: any input yields a well-formed
//! [`Document`].

use crate::document::{Document, Paragraph, Sentence, Token};
use crate::error::EditorError;
use crate::position::{SentencePosition, WordPosition};
use crate::selection::SelectionRange;
use prompt_editor_lang::{PunctuationConfig, SegmentationConfig};
use regex::Regex;
use std::sync::LazyLock;

static DEFAULT_SEGMENTER: LazyLock<Segmenter> = LazyLock::new(|| {
    Segmenter::new(SegmentationConfig::default()).expect("default segmentation rules compile")
});

/// Character class that stops "jump word" navigation.
///
/// A word matches if it contains any character of the class. Variables never match.
#[derive(Debug, Clone)]
pub struct PunctuationClass {
    pattern: Option<Regex>,
}

impl PunctuationClass {
    /// Compile a punctuation class.
    pub fn new(config: &PunctuationConfig) -> Result<Self, EditorError> {
        if config.is_empty() {
            return Ok(Self { pattern: None });
        }
        let mut class = String::from("[");
        if config.include_whitespace {
            class.push_str(r"\s");
        }
        for ch in &config.characters {
            class.push_str(&regex::escape(&ch.to_string()));
        }
        class.push(']');
        let pattern = Regex::new(&class).map_err(|e| EditorError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Returns `true` if `token` belongs to the class.
    pub fn matches(&self, token: &Token) -> bool {
        match (token, &self.pattern) {
            (Token::Word(text), Some(pattern)) => pattern.is_match(text),
            _ => false,
        }
    }
}

impl Default for PunctuationClass {
    fn default() -> Self {
        DEFAULT_SEGMENTER.punctuation().clone()
    }
}

/// Flat-text character span of one token, in Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    /// Token address.
    pub position: WordPosition,
    /// Offset of the token's first character.
    pub start: usize,
    /// Token length in characters.
    pub len: usize,
}

impl TokenSpan {
    /// Offset just past the token's last character.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Closed-interval containment: the offset right after the token still belongs to it.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end()
    }
}

struct RawToken<'a> {
    text: &'a str,
    start: usize,
    len: usize,
}

/// Tracks the character offset of a byte position while scanning a line left to right.
struct CharCursor<'a> {
    line: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCursor<'a> {
    fn new(line: &'a str, base: usize) -> Self {
        Self {
            line,
            byte: 0,
            chars: base,
        }
    }

    fn char_offset(&mut self, byte: usize) -> usize {
        self.chars += self.line[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

/// Compiled segmentation rules.
///
/// # Example
///
/// ```rust
/// use prompt_editor_core::{Segmenter, Token};
///
/// let segmenter = Segmenter::global();
/// let doc = segmenter.parse("Answer {QUESTION} briefly. Then stop.");
/// assert_eq!(doc.sentence_count(0), 2);
/// assert_eq!(doc.paragraph(0).unwrap().sentence(0).unwrap().tokens()[1], Token::variable("QUESTION"));
/// ```
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmentationConfig,
    sentence_break: Option<Regex>,
    variable: Option<Regex>,
    punctuation: PunctuationClass,
}

impl Segmenter {
    /// Compile `config`.
    pub fn new(config: SegmentationConfig) -> Result<Self, EditorError> {
        let invalid = |e: regex::Error| EditorError::InvalidConfig(e.to_string());

        let sentence_break = if config.sentence_terminators.is_empty() {
            None
        } else {
            let terminators: String = config
                .sentence_terminators
                .iter()
                .map(|ch| regex::escape(&ch.to_string()))
                .collect();
            Some(Regex::new(&format!(r"[{terminators}](\s)\p{{Lu}}")).map_err(invalid)?)
        };

        let variable = match config.variables {
            Some(delimiters) => Some(
                Regex::new(&format!(
                    r"^{}([A-Za-z0-9_\-]+){}$",
                    regex::escape(&delimiters.open.to_string()),
                    regex::escape(&delimiters.close.to_string()),
                ))
                .map_err(invalid)?,
            ),
            None => None,
        };

        let punctuation = PunctuationClass::new(&config.punctuation)?;

        Ok(Self {
            config,
            sentence_break,
            variable,
            punctuation,
        })
    }

    /// Segmenter for the default rules.
    pub fn global() -> &'static Segmenter {
        &DEFAULT_SEGMENTER
    }

    /// The rules this segmenter was compiled from.
    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Compiled punctuation class.
    pub fn punctuation(&self) -> &PunctuationClass {
        &self.punctuation
    }

    /// Parse flat text into a document. Never fails.
    pub fn parse(&self, text: &str) -> Document {
        let paragraphs = self
            .segment(text)
            .into_iter()
            .map(|sentences| {
                Paragraph::new(
                    sentences
                        .into_iter()
                        .map(|tokens| {
                            Sentence::new(tokens.iter().map(|t| self.classify(t.text)).collect())
                        })
                        .collect(),
                )
            })
            .collect();
        let delimiters = self.config.variables.unwrap_or_default();
        Document::from_paragraphs(paragraphs).with_delimiters(delimiters)
    }

    /// Character spans of every token of `text`, in document order.
    pub fn token_spans(&self, text: &str) -> Vec<TokenSpan> {
        let mut spans = Vec::new();
        for (p, sentences) in self.segment(text).into_iter().enumerate() {
            for (s, tokens) in sentences.into_iter().enumerate() {
                let sentence = SentencePosition::new(p, s);
                spans.extend(tokens.into_iter().enumerate().map(|(w, t)| TokenSpan {
                    position: sentence.word(w),
                    start: t.start,
                    len: t.len,
                }));
            }
        }
        spans
    }

    /// Map a flat-text character selection `[begin, end)` onto word positions.
    ///
    /// `begin` maps to the token starting at it, else to the first token whose closed span
    /// contains it; offsets between spans snap forward. A non-empty selection maps `end` through `end - 1`, so a selection ending right
    /// after a token stays on that token.
    pub fn selection_from_offsets(
        &self,
        text: &str,
        begin: usize,
        end: usize,
    ) -> Result<SelectionRange, EditorError> {
        let len = text.chars().count();
        for offset in [begin, end] {
            if offset > len {
                return Err(EditorError::OffsetOutOfBounds { offset, len });
            }
        }
        let (begin, end) = (begin.min(end), begin.max(end));

        let spans = self.token_spans(text);
        let locate = |offset: usize| {
            spans
                .iter()
                .find(|span| span.contains(offset) || span.start > offset)
                .or(spans.last())
                .map(|span| span.position)
                .ok_or(EditorError::OffsetOutOfBounds { offset, len })
        };
        let starting_at = |offset: usize| {
            spans
                .iter()
                .find(|span| span.start == offset)
                .map(|span| span.position)
        };

        let from = match starting_at(begin) {
            Some(position) => position,
            None => locate(begin)?,
        };
        let to = if end > begin { locate(end - 1)? } else { from };
        Ok(SelectionRange::new(from.into(), to.into()))
    }

    fn classify(&self, text: &str) -> Token {
        if let Some(captures) = self.variable.as_ref().and_then(|re| re.captures(text)) {
            return Token::variable(&captures[1]);
        }
        Token::word(text)
    }

    fn segment<'a>(&self, text: &'a str) -> Vec<Vec<Vec<RawToken<'a>>>> {
        let mut paragraphs = Vec::new();
        let mut base = 0;
        for raw_line in text.split('\n') {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            let mut cursor = CharCursor::new(line, base);
            let sentences = self
                .sentence_bounds(line)
                .into_iter()
                .map(|(start, end)| Self::tokens(line, start, end, &mut cursor))
                .collect();
            paragraphs.push(sentences);
            base += raw_line.chars().count() + 1;
        }
        paragraphs
    }

    /// Byte ranges of the sentences of `line`.
    fn sentence_bounds(&self, line: &str) -> Vec<(usize, usize)> {
        let mut bounds = Vec::new();
        let mut start = 0;
        if let Some(sentence_break) = &self.sentence_break {
            for captures in sentence_break.captures_iter(line) {
                let Some(separator) = captures.get(1) else {
                    continue;
                };
                bounds.push((start, separator.start()));
                start = separator.end();
            }
        }
        bounds.push((start, line.len()));
        bounds
    }

    fn tokens<'a>(
        line: &'a str,
        start: usize,
        end: usize,
        cursor: &mut CharCursor<'a>,
    ) -> Vec<RawToken<'a>> {
        let mut tokens = Vec::new();
        let mut token_start = start;
        let mut push = |from: usize, to: usize, cursor: &mut CharCursor<'a>| {
            let text = &line[from..to];
            tokens.push(RawToken {
                text,
                start: cursor.char_offset(from),
                len: text.chars().count(),
            });
        };
        for (i, ch) in line[start..end].char_indices() {
            if ch.is_whitespace() {
                push(token_start, start + i, cursor);
                token_start = start + i + ch.len_utf8();
            }
        }
        push(token_start, end, cursor);
        tokens
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        DEFAULT_SEGMENTER.clone()
    }
}
