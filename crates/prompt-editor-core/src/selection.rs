//! Structured selection ranges and precision-aware containment.
//!
//! A range's ends may sit at different precisions. Containment harmonizes the target and both
//! bounds first, then compares paragraph indices or absolute sentence/word ordinals.

use crate::document::Document;
use crate::position::{BlockPosition, Harmonized, Precision, harmonize};

/// A structured selection: an anchor (`from`) and an optional moving end (`to`).
///
/// `to == None` is an anchor-only range that has not been extended yet. The two ends are not
/// ordered and may carry different precisions; use [`SelectionRange::sorted_bounds`] and
/// [`harmonize`] before comparing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    /// Anchor end.
    pub from: BlockPosition,
    /// Moving end.
    pub to: Option<BlockPosition>,
}

impl SelectionRange {
    /// Create a range with both ends set.
    pub fn new(from: BlockPosition, to: BlockPosition) -> Self {
        Self { from, to: Some(to) }
    }

    /// Anchor-only range.
    pub fn anchor_only(from: BlockPosition) -> Self {
        Self { from, to: None }
    }

    /// Range whose ends coincide.
    pub fn collapsed(position: BlockPosition) -> Self {
        Self::new(position, position)
    }

    /// The moving end, falling back to the anchor.
    pub fn head(&self) -> BlockPosition {
        self.to.unwrap_or(self.from)
    }

    /// The coarsest precision of the two ends.
    pub fn precision(&self) -> Precision {
        self.from.precision().min(self.head().precision())
    }

    /// Project both ends onto `precision`.
    pub fn with_precision(&self, precision: Precision) -> SelectionRange {
        Self {
            from: self.from.with_precision(precision),
            to: self.to.map(|to| to.with_precision(precision)),
        }
    }

    /// `(lower, upper)` under lexicographic (paragraph, sentence, word, character) order.
    ///
    /// On equal keys, `to` is returned for both bounds.
    pub fn sorted_bounds(&self) -> (BlockPosition, BlockPosition) {
        let to = self.head();
        if self.from.sort_key() < to.sort_key() {
            (self.from, to)
        } else if self.from.sort_key() > to.sort_key() {
            (to, self.from)
        } else {
            (to, to)
        }
    }

    /// Returns `true` if both ends are set and equal.
    pub fn is_collapsed(&self) -> bool {
        self.to == Some(self.from)
    }
}

/// Returns `true` if `target` lies inside `range` (inclusive), compared at the harmonized
/// precision of the target and both bounds.
///
/// Paragraph precision compares paragraph indices, sentence precision compares absolute
/// sentence ordinals, and word precision compares absolute word ordinals.
pub fn is_inside_selection_range(
    document: &Document,
    target: &BlockPosition,
    range: &SelectionRange,
) -> bool {
    let (lower, upper) = range.sorted_bounds();
    match harmonize([*target, lower, upper]) {
        Harmonized::Paragraph([t, lo, hi]) => lo.paragraph <= t.paragraph && t.paragraph <= hi.paragraph,
        Harmonized::Sentence([t, lo, hi]) => {
            let t = document.sentence_ordinal(t);
            document.sentence_ordinal(lo) <= t && t <= document.sentence_ordinal(hi)
        }
        Harmonized::Word([t, lo, hi]) => {
            let t = document.word_ordinal(t);
            document.word_ordinal(lo) <= t && t <= document.word_ordinal(hi)
        }
    }
}
