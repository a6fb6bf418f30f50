//! Navigation engine: structural movement of positions and ranges.
//!
//! Every function here is pure and total over valid positions. Movement is clamped at the
//! document edges; "no further position" is reported as `None`, never as an error. Only
//! precision branches that are intentionally unsupported (paragraph-level movement and
//! expansion) return [`EditorError::UnsupportedPrecision`].
//!
//! All loops are bounded by the size of the document.

use crate::document::{Document, Token};
use crate::error::EditorError;
use crate::position::{BlockPosition, Harmonized, Precision, SentencePosition, WordPosition, harmonize};
use crate::selection::SelectionRange;
use crate::text::PunctuationClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn of(steps: isize) -> Self {
        if steps < 0 {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }
}

/// Which end of a coarse element a finer position rounds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// First child.
    Start,
    /// Last child.
    End,
}

fn adjacent_paragraph(
    document: &Document,
    paragraph: usize,
    direction: Direction,
    skip_empty: bool,
) -> Option<usize> {
    let keep = |p: &usize| !(skip_empty && document.is_empty_paragraph(*p));
    match direction {
        Direction::Forward => (paragraph + 1..document.paragraph_count()).find(keep),
        Direction::Backward => (0..paragraph.min(document.paragraph_count()))
            .rev()
            .find(keep),
    }
}

fn last_sentence(document: &Document, paragraph: usize) -> SentencePosition {
    SentencePosition::new(paragraph, document.sentence_count(paragraph).saturating_sub(1))
}

fn last_word(document: &Document, sentence: SentencePosition) -> WordPosition {
    sentence.word(document.word_count(sentence).saturating_sub(1))
}

fn step_sentence(
    document: &Document,
    pos: SentencePosition,
    direction: Direction,
    skip_empty_paragraphs: bool,
) -> Option<SentencePosition> {
    match direction {
        Direction::Forward => {
            if pos.sentence + 1 < document.sentence_count(pos.paragraph) {
                return Some(SentencePosition::new(pos.paragraph, pos.sentence + 1));
            }
            adjacent_paragraph(document, pos.paragraph, direction, skip_empty_paragraphs)
                .map(|p| SentencePosition::new(p, 0))
        }
        Direction::Backward => {
            if pos.sentence > 0 {
                return Some(SentencePosition::new(pos.paragraph, pos.sentence - 1));
            }
            adjacent_paragraph(document, pos.paragraph, direction, skip_empty_paragraphs)
                .map(|p| last_sentence(document, p))
        }
    }
}

fn step_word(
    document: &Document,
    pos: WordPosition,
    direction: Direction,
    skip_empty_paragraphs: bool,
) -> Option<WordPosition> {
    match direction {
        Direction::Forward => {
            if pos.word + 1 < document.word_count(pos.sentence_position()) {
                return Some(WordPosition::new(pos.paragraph, pos.sentence, pos.word + 1));
            }
            step_sentence(document, pos.sentence_position(), direction, skip_empty_paragraphs)
                .map(|s| s.word(0))
        }
        Direction::Backward => {
            if pos.word > 0 {
                return Some(WordPosition::new(pos.paragraph, pos.sentence, pos.word - 1));
            }
            step_sentence(document, pos.sentence_position(), direction, skip_empty_paragraphs)
                .map(|s| last_word(document, s))
        }
    }
}

/// Move `pos` by `steps` sentences (negative = backwards), clamped at the document edges.
///
/// With `ignore_empty_paragraph`, structurally empty paragraphs are skipped when crossing a
/// paragraph boundary.
pub fn move_sentence_position(
    document: &Document,
    pos: SentencePosition,
    steps: isize,
    ignore_empty_paragraph: bool,
) -> SentencePosition {
    let direction = Direction::of(steps);
    let mut current = pos;
    for _ in 0..steps.unsigned_abs() {
        match step_sentence(document, current, direction, ignore_empty_paragraph) {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}

/// Move `pos` by `steps` words (negative = backwards), clamped at the document edges.
///
/// Crosses sentence and paragraph boundaries; skips structurally empty paragraphs when
/// `ignore_empty_paragraph` is set.
pub fn move_word_position(
    document: &Document,
    pos: WordPosition,
    steps: isize,
    ignore_empty_paragraph: bool,
) -> WordPosition {
    let direction = Direction::of(steps);
    let mut current = pos;
    for _ in 0..steps.unsigned_abs() {
        match step_word(document, current, direction, ignore_empty_paragraph) {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}

fn scan_word(
    document: &Document,
    pos: WordPosition,
    direction: Direction,
    ignore_empty: bool,
) -> Option<WordPosition> {
    let mut current = pos;
    for _ in 0..=document.total_words() {
        let next = step_word(document, current, direction, true)?;
        if !(ignore_empty && document.token(next).is_some_and(Token::is_empty)) {
            return Some(next);
        }
        current = next;
    }
    None
}

/// The word after `pos`, or `None` at the end of the document.
///
/// Structurally empty paragraphs are always skipped; `ignore_empty` also skips empty tokens.
pub fn next_word_position(document: &Document, pos: WordPosition, ignore_empty: bool) -> Option<WordPosition> {
    scan_word(document, pos, Direction::Forward, ignore_empty)
}

/// The word before `pos`, or `None` at the start of the document.
pub fn previous_word_position(
    document: &Document,
    pos: WordPosition,
    ignore_empty: bool,
) -> Option<WordPosition> {
    scan_word(document, pos, Direction::Backward, ignore_empty)
}

fn scan_punctuation(
    document: &Document,
    pos: WordPosition,
    direction: Direction,
    class: &PunctuationClass,
) -> Option<WordPosition> {
    let mut current = pos;
    for _ in 0..=document.total_words() {
        let Some(next) = scan_word(document, current, direction, true) else {
            break;
        };
        if current != pos && next.sentence_position() != current.sentence_position() {
            return Some(current);
        }
        let at_boundary = match direction {
            Direction::Forward => document.is_last_word_of_sentence(next),
            Direction::Backward => next.word == 0,
        };
        let matches = document.token(next).is_some_and(|t| class.matches(t));
        if matches || at_boundary {
            return Some(next);
        }
        current = next;
    }
    (current != pos).then_some(current)
}

/// Jump forward to the next word matching `class`.
///
/// The search also stops on the last word of a sentence and at the end of the document, so it
/// never runs through a sentence boundary. Returns `None` if no step is possible.
pub fn next_punctuation_position(
    document: &Document,
    pos: WordPosition,
    class: &PunctuationClass,
) -> Option<WordPosition> {
    scan_punctuation(document, pos, Direction::Forward, class)
}

/// Jump backward to the previous word matching `class`, stopping at the first word of a
/// sentence and at the start of the document.
pub fn previous_punctuation_position(
    document: &Document,
    pos: WordPosition,
    class: &PunctuationClass,
) -> Option<WordPosition> {
    scan_punctuation(document, pos, Direction::Backward, class)
}

/// Last sentence of the current paragraph, or of the next non-empty paragraph when `pos` is
/// already there.
pub fn next_paragraph_last_sentence(document: &Document, pos: SentencePosition) -> Option<SentencePosition> {
    let own_last = last_sentence(document, pos.paragraph);
    if pos.sentence < own_last.sentence {
        return Some(own_last);
    }
    adjacent_paragraph(document, pos.paragraph, Direction::Forward, true)
        .map(|p| last_sentence(document, p))
}

/// First sentence of the current paragraph, or of the previous non-empty paragraph when `pos`
/// is already there.
pub fn prev_paragraph_first_sentence(document: &Document, pos: SentencePosition) -> Option<SentencePosition> {
    if pos.sentence > 0 {
        return Some(SentencePosition::new(pos.paragraph, 0));
    }
    adjacent_paragraph(document, pos.paragraph, Direction::Backward, true)
        .map(|p| SentencePosition::new(p, 0))
}

/// Move both ends of `range` by `offset` steps at its harmonized precision.
///
/// Without `preserve_range` the result collapses onto the moved `to` end.
pub fn move_selection(
    document: &Document,
    range: &SelectionRange,
    offset: isize,
    preserve_range: bool,
    ignore_empty_paragraph: bool,
) -> Result<SelectionRange, EditorError> {
    let (from, to): (BlockPosition, BlockPosition) = match harmonize([range.from, range.head()]) {
        Harmonized::Paragraph(_) => {
            return Err(EditorError::unsupported("move_selection", Precision::Paragraph));
        }
        Harmonized::Sentence([from, to]) => (
            move_sentence_position(document, from, offset, ignore_empty_paragraph).into(),
            move_sentence_position(document, to, offset, ignore_empty_paragraph).into(),
        ),
        Harmonized::Word([from, to]) => (
            move_word_position(document, from, offset, ignore_empty_paragraph).into(),
            move_word_position(document, to, offset, ignore_empty_paragraph).into(),
        ),
    };
    Ok(if preserve_range {
        SelectionRange::new(from, to)
    } else {
        SelectionRange::collapsed(to)
    })
}

/// Sentence-stepping variant of [`move_selection`].
///
/// A word-precision range is first stripped down to the sentence of its anchor without moving;
/// a paragraph-precision range becomes the paragraph's first sentence.
pub fn move_selection_by_sentence(
    document: &Document,
    range: &SelectionRange,
    offset: isize,
    preserve_range: bool,
    ignore_empty_paragraph: bool,
) -> Result<SelectionRange, EditorError> {
    match harmonize([range.from, range.head()]) {
        Harmonized::Paragraph([from, _]) => Ok(SelectionRange::collapsed(
            SentencePosition::new(from.paragraph, 0).into(),
        )),
        Harmonized::Word([from, _]) => {
            Ok(SelectionRange::collapsed(from.sentence_position().into()))
        }
        Harmonized::Sentence(_) => {
            move_selection(document, range, offset, preserve_range, ignore_empty_paragraph)
        }
    }
}

/// Extend the `to` end of `range` by `offset` steps at its harmonized precision, keeping
/// `from` fixed.
pub fn expand_selection(
    document: &Document,
    range: &SelectionRange,
    offset: isize,
) -> Result<SelectionRange, EditorError> {
    match harmonize([range.from, range.head()]) {
        Harmonized::Paragraph(_) => Err(EditorError::unsupported(
            "expand_selection",
            Precision::Paragraph,
        )),
        Harmonized::Sentence([from, to]) => Ok(SelectionRange::new(
            from.into(),
            move_sentence_position(document, to, offset, true).into(),
        )),
        Harmonized::Word([from, to]) => Ok(SelectionRange::new(
            from.into(),
            move_word_position(document, to, offset, true).into(),
        )),
    }
}

/// Round `pos` to word precision; coarser positions round to their first or last word.
pub fn to_word_position(document: &Document, pos: &BlockPosition, rounding: Rounding) -> WordPosition {
    match (pos, rounding) {
        (BlockPosition::Paragraph(p), Rounding::Start) => WordPosition::new(p.paragraph, 0, 0),
        (BlockPosition::Paragraph(p), Rounding::End) => {
            last_word(document, last_sentence(document, p.paragraph))
        }
        (BlockPosition::Sentence(s), Rounding::Start) => s.word(0),
        (BlockPosition::Sentence(s), Rounding::End) => last_word(document, *s),
        (BlockPosition::Word(w), _) => *w,
        (BlockPosition::Character(c), _) => c.word_position(),
    }
}

/// Round `pos` to sentence precision; paragraphs round to their first or last sentence.
pub fn to_sentence_position(
    document: &Document,
    pos: &BlockPosition,
    rounding: Rounding,
) -> SentencePosition {
    match (pos, rounding) {
        (BlockPosition::Paragraph(p), Rounding::Start) => SentencePosition::new(p.paragraph, 0),
        (BlockPosition::Paragraph(p), Rounding::End) => last_sentence(document, p.paragraph),
        _ => pos.as_sentence(),
    }
}

/// Returns `true` if `range` covers exactly one whole sentence.
pub fn is_selecting_full_sentence(document: &Document, range: &SelectionRange) -> bool {
    let (lower, upper) = range.sorted_bounds();
    let first = to_word_position(document, &lower, Rounding::Start);
    let last = to_word_position(document, &upper, Rounding::End);
    first.sentence_position() == last.sentence_position()
        && first.word == 0
        && document.is_last_word_of_sentence(last)
}
