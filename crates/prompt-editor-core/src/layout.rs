//! Visual word layout registry.
//!
//! The rendering surface measures where each word lands on screen and registers it here. The
//! navigation layer only sees the [`WordLayout`] trait: it asks for a word's visual position and
//! for the nearest word on the line above or below, which is how vertical movement keeps its
//! pixel column at word precision.

use crate::position::WordPosition;
use std::collections::HashMap;

/// Where a word starts on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualPosition {
    /// Visual line index (0 = top).
    pub line: usize,
    /// Horizontal pixel offset of the word's left edge.
    pub pixel_left: f32,
}

/// A measured word.
#[derive(Debug, Clone, PartialEq)]
pub struct WordInfo {
    /// Visual line index.
    pub line: usize,
    /// Structured address of the word.
    pub position: WordPosition,
    /// Horizontal pixel offset of the word's left edge.
    pub pixel_left: f32,
    /// Rendered text.
    pub text: String,
}

impl WordInfo {
    /// Visual position of this word.
    pub fn visual_position(&self) -> VisualPosition {
        VisualPosition {
            line: self.line,
            pixel_left: self.pixel_left,
        }
    }
}

/// Visual queries used by vertical word navigation.
pub trait WordLayout {
    /// Where `position` was rendered, if it has been registered.
    fn word_visual_position(&self, position: WordPosition) -> Option<VisualPosition>;

    /// The word on the line above `visual` closest to its pixel column.
    fn word_above(&self, visual: VisualPosition) -> Option<&WordInfo>;

    /// The word on the line below `visual` closest to its pixel column.
    fn word_below(&self, visual: VisualPosition) -> Option<&WordInfo>;
}

/// Registry of rendered word positions, keyed both by visual line and by structured address.
///
/// Owned by the editor controller and cleared whenever the document is replaced.
#[derive(Debug, Clone, Default)]
pub struct WordPositionRegistry {
    lines: Vec<Vec<WordInfo>>,
    index: HashMap<WordPosition, VisualPosition>,
}

impl WordPositionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where a word was rendered.
    ///
    /// A word at the same line and pixel offset as an existing entry replaces it; a word that
    /// was registered before moves to its new place.
    pub fn register_word_info(&mut self, info: WordInfo) {
        if let Some(previous) = self.index.remove(&info.position) {
            if let Some(line) = self.lines.get_mut(previous.line) {
                line.retain(|w| w.position != info.position);
            }
        }

        if self.lines.len() <= info.line {
            self.lines.resize_with(info.line + 1, Vec::new);
        }
        let line = &mut self.lines[info.line];

        let position = info.position;
        let visual = info.visual_position();
        match line.iter().position(|w| w.pixel_left == info.pixel_left) {
            Some(slot) => {
                let replaced = std::mem::replace(&mut line[slot], info);
                self.index.remove(&replaced.position);
            }
            None => {
                let at = line.partition_point(|w| w.pixel_left < info.pixel_left);
                line.insert(at, info);
            }
        }
        self.index.insert(position, visual);
    }

    /// Words registered on visual line `line`, ordered left to right.
    pub fn line(&self, line: usize) -> &[WordInfo] {
        self.lines.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of registered words.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Forget every registered word.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.index.clear();
    }

    fn closest_on(&self, line: usize, pixel_left: f32) -> Option<&WordInfo> {
        self.lines.get(line)?.iter().min_by(|a, b| {
            (a.pixel_left - pixel_left)
                .abs()
                .total_cmp(&(b.pixel_left - pixel_left).abs())
        })
    }
}

impl WordLayout for WordPositionRegistry {
    fn word_visual_position(&self, position: WordPosition) -> Option<VisualPosition> {
        self.index.get(&position).copied()
    }

    fn word_above(&self, visual: VisualPosition) -> Option<&WordInfo> {
        let line = visual.line.checked_sub(1)?;
        self.closest_on(line, visual.pixel_left)
    }

    fn word_below(&self, visual: VisualPosition) -> Option<&WordInfo> {
        self.closest_on(visual.line + 1, visual.pixel_left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(line: usize, word: usize, pixel_left: f32) -> WordInfo {
        WordInfo {
            line,
            position: WordPosition::new(0, 0, word),
            pixel_left,
            text: format!("w{word}"),
        }
    }

    fn sample() -> WordPositionRegistry {
        let mut registry = WordPositionRegistry::new();
        registry.register_word_info(info(0, 0, 0.0));
        registry.register_word_info(info(0, 1, 40.0));
        registry.register_word_info(info(0, 2, 95.0));
        registry.register_word_info(info(1, 3, 0.0));
        registry.register_word_info(info(1, 4, 60.0));
        registry
    }

    #[test]
    fn test_lookup_and_neighbours() {
        let registry = sample();
        let visual = registry
            .word_visual_position(WordPosition::new(0, 0, 2))
            .unwrap();
        assert_eq!(visual.line, 0);

        let below = registry.word_below(visual).unwrap();
        assert_eq!(below.position, WordPosition::new(0, 0, 4));

        let above = registry
            .word_above(registry.word_visual_position(WordPosition::new(0, 0, 3)).unwrap())
            .unwrap();
        assert_eq!(above.position, WordPosition::new(0, 0, 0));

        assert!(registry.word_above(visual).is_none());
        assert!(registry.word_below(below.visual_position()).is_none());
    }

    #[test]
    fn test_ties_prefer_leftmost() {
        let registry = sample();
        let above = registry
            .word_above(VisualPosition {
                line: 1,
                pixel_left: 20.0,
            })
            .unwrap();
        assert_eq!(above.position, WordPosition::new(0, 0, 0));
    }

    #[test]
    fn test_register_replaces_same_slot_and_moves_words() {
        let mut registry = sample();
        registry.register_word_info(info(0, 7, 40.0));
        assert_eq!(registry.line(0).len(), 3);
        assert!(registry.word_visual_position(WordPosition::new(0, 0, 1)).is_none());

        registry.register_word_info(info(2, 7, 10.0));
        assert_eq!(registry.line(0).len(), 2);
        assert_eq!(
            registry.word_visual_position(WordPosition::new(0, 0, 7)).unwrap().line,
            2
        );
    }

    #[test]
    fn test_clear() {
        let mut registry = sample();
        assert_eq!(registry.len(), 5);
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.line(0).is_empty());
    }
}
