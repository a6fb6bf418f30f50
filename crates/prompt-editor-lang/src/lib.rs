#![warn(missing_docs)]
//! `prompt-editor-lang` - data-driven segmentation rules for `prompt-editor-core`.
//!
//! This crate intentionally stays lightweight and does **not** depend on any regex or parsing
//! machinery. It provides small structs that hosts can use to describe how flat prompt text is
//! split into paragraphs, sentences and tokens, and which characters count as punctuation for
//! word jumps. `prompt-editor-core` compiles these rules into matchers.

/// Delimiters that mark a whole token as an opaque template variable (e.g. `{QUESTION}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableDelimiters {
    /// Opening delimiter.
    pub open: char,
    /// Closing delimiter.
    pub close: char,
}

impl VariableDelimiters {
    /// Create a delimiter pair.
    pub fn new(open: char, close: char) -> Self {
        Self { open, close }
    }
}

impl Default for VariableDelimiters {
    fn default() -> Self {
        Self::new('{', '}')
    }
}

/// Punctuation class used by "jump word" navigation.
///
/// A token matches the class if it *contains* any of the listed characters (or any whitespace,
/// when `include_whitespace` is set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunctuationConfig {
    /// Characters that stop a punctuation jump.
    pub characters: Vec<char>,
    /// Treat any whitespace character as punctuation.
    pub include_whitespace: bool,
}

impl PunctuationConfig {
    /// Create a config from a list of characters.
    pub fn new(characters: impl IntoIterator<Item = char>, include_whitespace: bool) -> Self {
        Self {
            characters: characters.into_iter().collect(),
            include_whitespace,
        }
    }

    /// Only sentence periods stop a jump.
    pub fn periods_only() -> Self {
        Self::new(['.'], true)
    }

    /// Returns `true` if the class can never match anything.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && !self.include_whitespace
    }
}

impl Default for PunctuationConfig {
    fn default() -> Self {
        Self::new([';', ':', '.', ',', '"'], true)
    }
}

/// Rules for splitting flat text into the paragraph / sentence / token hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationConfig {
    /// Characters that may end a sentence when followed by an uppercase letter.
    pub sentence_terminators: Vec<char>,
    /// Punctuation class for word jumps.
    pub punctuation: PunctuationConfig,
    /// Variable delimiters; `None` disables variable recognition.
    pub variables: Option<VariableDelimiters>,
}

impl SegmentationConfig {
    /// Replace the sentence terminators.
    pub fn with_sentence_terminators(mut self, terminators: impl IntoIterator<Item = char>) -> Self {
        self.sentence_terminators = terminators.into_iter().collect();
        self
    }

    /// Replace the punctuation class.
    pub fn with_punctuation(mut self, punctuation: PunctuationConfig) -> Self {
        self.punctuation = punctuation;
        self
    }

    /// Replace (or disable) variable recognition.
    pub fn with_variables(mut self, variables: Option<VariableDelimiters>) -> Self {
        self.variables = variables;
        self
    }

    /// Returns `true` if `ch` is a configured sentence terminator.
    pub fn is_sentence_terminator(&self, ch: char) -> bool {
        self.sentence_terminators.contains(&ch)
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            sentence_terminators: vec!['.', '?', '!'],
            punctuation: PunctuationConfig::default(),
            variables: Some(VariableDelimiters::default()),
        }
    }
}
