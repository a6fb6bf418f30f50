//! Hierarchical positions and precision algebra.
//!
//! A document is addressed as paragraph → sentence → word → character. Each level has its own
//! position struct, and [`BlockPosition`] is the tagged union over all four. Operations that
//! work on several positions at once (equality, containment, movement, expansion) first
//! harmonize them to their coarsest common precision via [`harmonize`], then `match` on the
//! resulting [`Harmonized`] value.

use std::fmt;

/// Granularity of a position, ordered from coarse to fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precision {
    /// Whole paragraph.
    Paragraph,
    /// Sentence inside a paragraph.
    Sentence,
    /// Token inside a sentence.
    Word,
    /// Grapheme inside a token.
    Character,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Precision::Paragraph => "paragraph",
            Precision::Sentence => "sentence",
            Precision::Word => "word",
            Precision::Character => "character",
        };
        f.write_str(name)
    }
}

/// Paragraph address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ParagraphPosition {
    /// Paragraph index.
    pub paragraph: usize,
}

/// Sentence address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SentencePosition {
    /// Paragraph index.
    pub paragraph: usize,
    /// Sentence index inside the paragraph.
    pub sentence: usize,
}

/// Token address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WordPosition {
    /// Paragraph index.
    pub paragraph: usize,
    /// Sentence index inside the paragraph.
    pub sentence: usize,
    /// Token index inside the sentence.
    pub word: usize,
}

/// Grapheme address inside a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CharacterPosition {
    /// Paragraph index.
    pub paragraph: usize,
    /// Sentence index inside the paragraph.
    pub sentence: usize,
    /// Token index inside the sentence.
    pub word: usize,
    /// Grapheme index inside the token.
    pub character: usize,
}

impl ParagraphPosition {
    /// Create a paragraph position.
    pub fn new(paragraph: usize) -> Self {
        Self { paragraph }
    }
}

impl SentencePosition {
    /// Create a sentence position.
    pub fn new(paragraph: usize, sentence: usize) -> Self {
        Self {
            paragraph,
            sentence,
        }
    }

    /// The word at `word` inside this sentence.
    pub fn word(self, word: usize) -> WordPosition {
        WordPosition::new(self.paragraph, self.sentence, word)
    }
}

impl WordPosition {
    /// Create a word position.
    pub fn new(paragraph: usize, sentence: usize, word: usize) -> Self {
        Self {
            paragraph,
            sentence,
            word,
        }
    }

    /// The sentence containing this word.
    pub fn sentence_position(self) -> SentencePosition {
        SentencePosition::new(self.paragraph, self.sentence)
    }
}

impl CharacterPosition {
    /// Create a character position.
    pub fn new(paragraph: usize, sentence: usize, word: usize, character: usize) -> Self {
        Self {
            paragraph,
            sentence,
            word,
            character,
        }
    }

    /// The word containing this character.
    pub fn word_position(self) -> WordPosition {
        WordPosition::new(self.paragraph, self.sentence, self.word)
    }
}

/// A position at any precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockPosition {
    /// Paragraph precision.
    Paragraph(ParagraphPosition),
    /// Sentence precision.
    Sentence(SentencePosition),
    /// Word precision.
    Word(WordPosition),
    /// Character precision.
    Character(CharacterPosition),
}

impl Default for BlockPosition {
    fn default() -> Self {
        BlockPosition::Word(WordPosition::default())
    }
}

impl From<ParagraphPosition> for BlockPosition {
    fn from(value: ParagraphPosition) -> Self {
        BlockPosition::Paragraph(value)
    }
}

impl From<SentencePosition> for BlockPosition {
    fn from(value: SentencePosition) -> Self {
        BlockPosition::Sentence(value)
    }
}

impl From<WordPosition> for BlockPosition {
    fn from(value: WordPosition) -> Self {
        BlockPosition::Word(value)
    }
}

impl From<CharacterPosition> for BlockPosition {
    fn from(value: CharacterPosition) -> Self {
        BlockPosition::Character(value)
    }
}

impl BlockPosition {
    /// Precision of this position, taken from its variant.
    pub fn precision(&self) -> Precision {
        match self {
            BlockPosition::Paragraph(_) => Precision::Paragraph,
            BlockPosition::Sentence(_) => Precision::Sentence,
            BlockPosition::Word(_) => Precision::Word,
            BlockPosition::Character(_) => Precision::Character,
        }
    }

    /// Paragraph index.
    pub fn paragraph(&self) -> usize {
        match self {
            BlockPosition::Paragraph(p) => p.paragraph,
            BlockPosition::Sentence(p) => p.paragraph,
            BlockPosition::Word(p) => p.paragraph,
            BlockPosition::Character(p) => p.paragraph,
        }
    }

    /// Sentence index, if this position is at sentence precision or finer.
    pub fn sentence(&self) -> Option<usize> {
        match self {
            BlockPosition::Paragraph(_) => None,
            BlockPosition::Sentence(p) => Some(p.sentence),
            BlockPosition::Word(p) => Some(p.sentence),
            BlockPosition::Character(p) => Some(p.sentence),
        }
    }

    /// Word index, if this position is at word precision or finer.
    pub fn word(&self) -> Option<usize> {
        match self {
            BlockPosition::Paragraph(_) | BlockPosition::Sentence(_) => None,
            BlockPosition::Word(p) => Some(p.word),
            BlockPosition::Character(p) => Some(p.word),
        }
    }

    /// Character index, if this position is at character precision.
    pub fn character(&self) -> Option<usize> {
        match self {
            BlockPosition::Character(p) => Some(p.character),
            _ => None,
        }
    }

    /// Project onto paragraph precision.
    pub fn as_paragraph(&self) -> ParagraphPosition {
        ParagraphPosition::new(self.paragraph())
    }

    /// Project onto sentence precision. A missing sentence index becomes 0.
    pub fn as_sentence(&self) -> SentencePosition {
        SentencePosition::new(self.paragraph(), self.sentence().unwrap_or(0))
    }

    /// Project onto word precision. Missing indices become 0.
    pub fn as_word(&self) -> WordPosition {
        WordPosition::new(
            self.paragraph(),
            self.sentence().unwrap_or(0),
            self.word().unwrap_or(0),
        )
    }

    /// Project onto character precision. Missing indices become 0.
    pub fn as_character(&self) -> CharacterPosition {
        CharacterPosition::new(
            self.paragraph(),
            self.sentence().unwrap_or(0),
            self.word().unwrap_or(0),
            self.character().unwrap_or(0),
        )
    }

    /// Re-express this position at `precision`.
    ///
    /// Coarser precisions drop the finer indices; finer precisions fill them with 0. Projecting
    /// to the position's own precision returns an identical copy.
    pub fn with_precision(&self, precision: Precision) -> BlockPosition {
        match precision {
            Precision::Paragraph => self.as_paragraph().into(),
            Precision::Sentence => self.as_sentence().into(),
            Precision::Word => self.as_word().into(),
            Precision::Character => self.as_character().into(),
        }
    }

    /// Lexicographic ordering key `(paragraph, sentence, word, character)`, missing indices as 0.
    pub fn sort_key(&self) -> (usize, usize, usize, usize) {
        (
            self.paragraph(),
            self.sentence().unwrap_or(0),
            self.word().unwrap_or(0),
            self.character().unwrap_or(0),
        )
    }
}

/// A set of positions projected onto their shared precision.
///
/// Character precision never appears here: character positions harmonize to word level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Harmonized<const N: usize> {
    /// Every position projected to paragraph precision.
    Paragraph([ParagraphPosition; N]),
    /// Every position projected to sentence precision.
    Sentence([SentencePosition; N]),
    /// Every position projected to word precision.
    Word([WordPosition; N]),
}

impl<const N: usize> Harmonized<N> {
    /// The shared precision.
    pub fn precision(&self) -> Precision {
        match self {
            Harmonized::Paragraph(_) => Precision::Paragraph,
            Harmonized::Sentence(_) => Precision::Sentence,
            Harmonized::Word(_) => Precision::Word,
        }
    }
}

fn common_precision<'a>(positions: impl IntoIterator<Item = &'a BlockPosition>) -> Precision {
    positions
        .into_iter()
        .map(BlockPosition::precision)
        .min()
        .unwrap_or(Precision::Word)
        .min(Precision::Word)
}

/// Compute the minimum precision across `positions` (capped at word) and project every
/// position onto it.
pub fn match_precision(positions: &[BlockPosition]) -> (Precision, Vec<BlockPosition>) {
    let precision = common_precision(positions);
    let projected = positions
        .iter()
        .map(|p| p.with_precision(precision))
        .collect();
    (precision, projected)
}

/// Harmonize a fixed-size set of positions for precision dispatch.
pub fn harmonize<const N: usize>(positions: [BlockPosition; N]) -> Harmonized<N> {
    match common_precision(positions.iter()) {
        Precision::Paragraph => Harmonized::Paragraph(positions.map(|p| p.as_paragraph())),
        Precision::Sentence => Harmonized::Sentence(positions.map(|p| p.as_sentence())),
        Precision::Word | Precision::Character => {
            Harmonized::Word(positions.map(|p| p.as_word()))
        }
    }
}

/// Compare two positions at their harmonized precision.
pub fn is_equal_position(a: &BlockPosition, b: &BlockPosition) -> bool {
    match harmonize([*a, *b]) {
        Harmonized::Paragraph([a, b]) => a == b,
        Harmonized::Sentence([a, b]) => a == b,
        Harmonized::Word([a, b]) => a == b,
    }
}
