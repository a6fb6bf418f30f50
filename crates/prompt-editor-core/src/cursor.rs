//! Cursor / selection state machine.
//!
//! [`CursorState`] is a value type. Every reducer consumes the previous state and returns the
//! next one, so all updates derived from one user gesture are computed from a single snapshot.
//!
//! Directional handling follows three conceptual states:
//!
//! - **no selection**: any directional command enters a sentence range at the current
//!   position's sentence;
//! - **sentence range**: vertical commands step sentences, horizontal commands drop to a word
//!   anchor at the start or end of the sentence;
//! - **word range**: horizontal commands step words; vertical commands either collapse back to
//!   the sentence (when a whole sentence is selected) or move visually through [`WordLayout`].
//!
//! Escape leaves any range and parks the position on the last selection boundary.

use crate::document::Document;
use crate::error::EditorError;
use crate::keymap::{self, Key, Modifiers};
use crate::layout::WordLayout;
use crate::navigation::{
    Rounding, expand_selection, is_selecting_full_sentence, move_selection,
    move_selection_by_sentence, move_sentence_position, next_paragraph_last_sentence,
    next_punctuation_position, next_word_position, prev_paragraph_first_sentence,
    previous_punctuation_position, previous_word_position, to_sentence_position,
    to_word_position,
};
use crate::position::{BlockPosition, Precision, WordPosition};
use crate::selection::SelectionRange;
use crate::text::PunctuationClass;

/// How the user is currently interacting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    /// Pointer interaction.
    #[default]
    Mouse,
    /// Keyboard interaction.
    Keyboard,
}

/// Directional and selection commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationCommand {
    /// Previous sentence, or the word visually above.
    MoveUp,
    /// Next sentence, or the word visually below.
    MoveDown,
    /// Previous word (enters word mode from a sentence range).
    MoveLeft,
    /// Next word (enters word mode from a sentence range).
    MoveRight,
    /// Next sentence.
    NextSentence,
    /// Previous sentence.
    PreviousSentence,
    /// Previous punctuation stop.
    JumpPunctuationLeft,
    /// Next punctuation stop.
    JumpPunctuationRight,
    /// Move the whole range up, keeping its extent.
    ShiftRangeUp,
    /// Move the whole range down, keeping its extent.
    ShiftRangeDown,
    /// Grow the range upwards by a sentence.
    ExpandUp,
    /// Grow the range downwards by a sentence.
    ExpandDown,
    /// Grow the range left by a word.
    ExpandLeft,
    /// Grow the range right by a word.
    ExpandRight,
    /// First sentence of the previous paragraph.
    ParagraphUp,
    /// Last sentence of the next paragraph.
    ParagraphDown,
    /// Grow the range to the first sentence of the previous paragraph.
    ExpandParagraphUp,
    /// Grow the range to the last sentence of the next paragraph.
    ExpandParagraphDown,
    /// Grow the range to the previous punctuation stop.
    ExpandPunctuationLeft,
    /// Grow the range to the next punctuation stop.
    ExpandPunctuationRight,
    /// Leave the current range.
    Escape,
}

/// Raw input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key went down.
    KeyDown {
        /// The key.
        key: Key,
        /// Modifiers held at the time.
        modifiers: Modifiers,
    },
    /// A key went up.
    KeyUp {
        /// The key.
        key: Key,
    },
    /// Pointer pressed, optionally over a position.
    PointerDown {
        /// Position under the pointer.
        target: Option<BlockPosition>,
    },
    /// Pointer moved, optionally over a position.
    PointerMove {
        /// Position under the pointer.
        target: Option<BlockPosition>,
    },
    /// Pointer released anywhere.
    PointerUp,
    /// Click completed.
    Click,
}

/// Side effect requested by an input transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Hand over to the flat-text edit mode.
    RequestEditMode,
}

/// Result of [`CursorState::handle_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The next state.
    pub state: CursorState,
    /// Requested side effect, if any.
    pub effect: Option<Effect>,
}

/// Everything navigation reads besides the cursor itself.
#[derive(Clone, Copy)]
pub struct NavigationContext<'a> {
    /// The live document.
    pub document: &'a Document,
    /// Visual word positions for vertical word movement.
    pub layout: &'a dyn WordLayout,
    /// Punctuation stops for jump commands.
    pub punctuation: &'a PunctuationClass,
    /// Skip structurally empty paragraphs when crossing paragraph boundaries.
    pub ignore_empty_paragraphs: bool,
}

enum VisualStep {
    Moved(WordPosition),
    Blocked,
    Unregistered,
}

/// Cursor and selection state of one editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    position: BlockPosition,
    selection_range: Option<SelectionRange>,
    selection_level: Precision,
    is_selecting: bool,
    input_mode: InputMode,
    range_changed_since_pointer_down: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            position: BlockPosition::default(),
            selection_range: None,
            selection_level: Precision::Word,
            is_selecting: false,
            input_mode: InputMode::Mouse,
            range_changed_since_pointer_down: false,
        }
    }
}

impl CursorState {
    /// Current anchor position, used when no range is active.
    pub fn position(&self) -> BlockPosition {
        self.position
    }

    /// Active range.
    pub fn selection_range(&self) -> Option<&SelectionRange> {
        self.selection_range.as_ref()
    }

    /// Precision new selections adopt.
    pub fn selection_level(&self) -> Precision {
        self.selection_level
    }

    /// Whether a pointer drag is in progress.
    pub fn is_selecting(&self) -> bool {
        self.is_selecting
    }

    /// Current input mode.
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Whether the range changed since the last pointer-down.
    pub fn range_changed_since_pointer_down(&self) -> bool {
        self.range_changed_since_pointer_down
    }

    /// Move the anchor position.
    #[must_use]
    pub fn set_position(self, position: BlockPosition) -> Self {
        Self { position, ..self }
    }

    /// Start a new anchor-only range at `position` and begin drag-selecting.
    #[must_use]
    pub fn select_from(self, position: BlockPosition) -> Self {
        Self {
            position,
            is_selecting: true,
            selection_level: position.precision(),
            ..self
        }
        .with_range(Some(SelectionRange::anchor_only(position)))
    }

    /// Extend the active range to `position` (anchored at the current position when no range
    /// is active).
    #[must_use]
    pub fn select_to(self, position: BlockPosition) -> Self {
        let from = self.selection_range.map_or(self.position, |r| r.from);
        self.with_range(Some(SelectionRange::new(from, position)))
    }

    /// End drag-selection.
    #[must_use]
    pub fn stop_selecting(self) -> Self {
        Self {
            is_selecting: false,
            ..self
        }
    }

    /// Drop the active range.
    #[must_use]
    pub fn clear_selection(self) -> Self {
        self.with_range(None)
    }

    /// Overwrite the active range.
    #[must_use]
    pub fn set_selection_range(self, range: Option<SelectionRange>) -> Self {
        self.with_range(range)
    }

    /// Overwrite the selection level.
    #[must_use]
    pub fn set_selection_level(self, level: Precision) -> Self {
        Self {
            selection_level: level,
            ..self
        }
    }

    /// Overwrite the input mode.
    #[must_use]
    pub fn set_input_mode(self, input_mode: InputMode) -> Self {
        Self { input_mode, ..self }
    }

    fn with_range(self, range: Option<SelectionRange>) -> Self {
        Self {
            range_changed_since_pointer_down: self.range_changed_since_pointer_down
                || range != self.selection_range,
            selection_range: range,
            ..self
        }
    }

    /// Apply a navigation command.
    ///
    /// Commands with nowhere to go leave the state unchanged. Only unsupported precision
    /// branches (paragraph-level expansion) fail.
    pub fn navigate(
        self,
        ctx: &NavigationContext<'_>,
        command: NavigationCommand,
    ) -> Result<Self, EditorError> {
        if command == NavigationCommand::Escape {
            return Ok(self.escape(ctx.document));
        }

        let Some(range) = self.selection_range else {
            let sentence = self.position.as_sentence();
            log::trace!("{command:?}: entering sentence range at {sentence:?}");
            return Ok(self
                .with_range(Some(SelectionRange::collapsed(sentence.into())))
                .set_selection_level(Precision::Sentence));
        };

        let next = self.step(ctx, &range, command)?;
        log::trace!("{command:?}: {range:?} -> {next:?}");
        Ok(match next {
            Some((range, level)) => self.with_range(Some(range)).set_selection_level(level),
            None => self,
        })
    }

    fn escape(self, document: &Document) -> Self {
        let boundary = self.selection_range.map_or(self.position, |r| r.head());
        Self {
            position: to_word_position(document, &boundary, Rounding::Start).into(),
            is_selecting: false,
            selection_level: Precision::Word,
            ..self
        }
        .with_range(None)
    }

    fn step(
        &self,
        ctx: &NavigationContext<'_>,
        range: &SelectionRange,
        command: NavigationCommand,
    ) -> Result<Option<(SelectionRange, Precision)>, EditorError> {
        use NavigationCommand as Nav;

        let doc = ctx.document;
        let ignore = ctx.ignore_empty_paragraphs;
        let head = range.head();
        let word_level = range.precision() >= Precision::Word;

        let next = match command {
            Nav::MoveUp | Nav::MoveDown => {
                let up = command == Nav::MoveUp;
                let offset = if up { -1 } else { 1 };
                let by_sentence = |range: &SelectionRange| {
                    move_selection_by_sentence(doc, range, offset, false, ignore)
                        .map(|r| Some((r, Precision::Sentence)))
                };
                if !word_level || is_selecting_full_sentence(doc, range) {
                    return by_sentence(range);
                }
                match Self::visual_step(ctx.layout, head.as_word(), up) {
                    VisualStep::Moved(pos) => {
                        Some((SelectionRange::collapsed(pos.into()), Precision::Word))
                    }
                    VisualStep::Blocked => None,
                    VisualStep::Unregistered => return by_sentence(range),
                }
            }
            Nav::MoveLeft | Nav::MoveRight => {
                let left = command == Nav::MoveLeft;
                if word_level {
                    let word = head.as_word();
                    let next = if left {
                        previous_word_position(doc, word, true)
                    } else {
                        next_word_position(doc, word, true)
                    };
                    next.map(|p| (SelectionRange::collapsed(p.into()), Precision::Word))
                } else {
                    let rounding = if left { Rounding::Start } else { Rounding::End };
                    let word = to_word_position(doc, &head, rounding);
                    Some((SelectionRange::anchor_only(word.into()), Precision::Word))
                }
            }
            Nav::NextSentence | Nav::PreviousSentence => {
                let offset = if command == Nav::NextSentence { 1 } else { -1 };
                let sentence = to_sentence_position(doc, &head, Rounding::Start);
                let moved = move_sentence_position(doc, sentence, offset, ignore);
                Some((SelectionRange::collapsed(moved.into()), Precision::Sentence))
            }
            Nav::JumpPunctuationLeft | Nav::JumpPunctuationRight => {
                let left = command == Nav::JumpPunctuationLeft;
                Self::punctuation_stop(ctx, &head, left)
                    .map(|p| (SelectionRange::collapsed(p.into()), Precision::Word))
            }
            Nav::ShiftRangeUp | Nav::ShiftRangeDown => {
                let offset = if command == Nav::ShiftRangeUp { -1 } else { 1 };
                let moved = move_selection(doc, range, offset, true, ignore)?;
                Some((moved, self.selection_level))
            }
            Nav::ExpandUp | Nav::ExpandDown => {
                if word_level {
                    Some((range.with_precision(Precision::Sentence), Precision::Sentence))
                } else {
                    let offset = if command == Nav::ExpandUp { -1 } else { 1 };
                    Some((expand_selection(doc, range, offset)?, Precision::Sentence))
                }
            }
            Nav::ExpandLeft | Nav::ExpandRight => {
                if word_level {
                    let offset = if command == Nav::ExpandLeft { -1 } else { 1 };
                    Some((expand_selection(doc, range, offset)?, Precision::Word))
                } else {
                    Some((Self::word_span(doc, range), Precision::Word))
                }
            }
            Nav::ParagraphUp | Nav::ParagraphDown => {
                let sentence = to_sentence_position(doc, &head, Rounding::Start);
                let target = if command == Nav::ParagraphUp {
                    prev_paragraph_first_sentence(doc, sentence)
                } else {
                    next_paragraph_last_sentence(doc, sentence)
                };
                target.map(|s| (SelectionRange::collapsed(s.into()), Precision::Sentence))
            }
            Nav::ExpandParagraphUp | Nav::ExpandParagraphDown => {
                let anchor = to_sentence_position(doc, &range.from, Rounding::Start);
                let sentence = to_sentence_position(doc, &head, Rounding::Start);
                let target = if command == Nav::ExpandParagraphUp {
                    prev_paragraph_first_sentence(doc, sentence)
                } else {
                    next_paragraph_last_sentence(doc, sentence)
                };
                target.map(|s| {
                    (
                        SelectionRange::new(anchor.into(), s.into()),
                        Precision::Sentence,
                    )
                })
            }
            Nav::ExpandPunctuationLeft | Nav::ExpandPunctuationRight => {
                let left = command == Nav::ExpandPunctuationLeft;
                let words = if word_level {
                    *range
                } else {
                    Self::word_span(doc, range)
                };
                Self::punctuation_stop(ctx, &words.head(), left)
                    .map(|p| (SelectionRange::new(words.from, p.into()), Precision::Word))
            }
            Nav::Escape => None,
        };
        Ok(next)
    }

    fn visual_step(layout: &dyn WordLayout, word: WordPosition, up: bool) -> VisualStep {
        let Some(visual) = layout.word_visual_position(word) else {
            return VisualStep::Unregistered;
        };
        let neighbour = if up {
            layout.word_above(visual)
        } else {
            layout.word_below(visual)
        };
        match neighbour {
            Some(info) => VisualStep::Moved(info.position),
            None => VisualStep::Blocked,
        }
    }

    fn punctuation_stop(
        ctx: &NavigationContext<'_>,
        head: &BlockPosition,
        left: bool,
    ) -> Option<WordPosition> {
        let rounding = if left { Rounding::Start } else { Rounding::End };
        let word = to_word_position(ctx.document, head, rounding);
        if left {
            previous_punctuation_position(ctx.document, word, ctx.punctuation)
        } else {
            next_punctuation_position(ctx.document, word, ctx.punctuation)
        }
    }

    /// Convert a coarse range to words covering the same sentences, keeping its orientation.
    fn word_span(document: &Document, range: &SelectionRange) -> SelectionRange {
        let head = range.head();
        let forward = range.from.sort_key() <= head.sort_key();
        let (from_rounding, head_rounding) = if forward {
            (Rounding::Start, Rounding::End)
        } else {
            (Rounding::End, Rounding::Start)
        };
        SelectionRange::new(
            to_word_position(document, &range.from, from_rounding).into(),
            to_word_position(document, &head, head_rounding).into(),
        )
    }

    /// Apply a raw input event.
    ///
    /// - an unmodified key press switches to keyboard mode, pointer down / move to mouse mode;
    /// - Shift down sets the sentence level, Shift up restores the word level;
    /// - Enter, Backspace or a typed character request edit mode;
    /// - pointer up always ends drag-selection;
    /// - a click with no range change since pointer down clears the range.
    pub fn handle_input(
        self,
        ctx: &NavigationContext<'_>,
        event: InputEvent,
    ) -> Result<Transition, EditorError> {
        let mut effect = None;
        let state = match event {
            InputEvent::KeyDown { key, modifiers } => {
                let mut state = self;
                if key == Key::Shift {
                    state = state.set_selection_level(Precision::Sentence);
                }
                if modifiers.is_empty() && !key.is_modifier() {
                    state = state.set_input_mode(InputMode::Keyboard);
                }
                if keymap::requests_edit_mode(key, modifiers) {
                    effect = Some(Effect::RequestEditMode);
                    state
                } else if let Some(command) = keymap::navigation_command_for(key, modifiers) {
                    state.navigate(ctx, command)?
                } else {
                    state
                }
            }
            InputEvent::KeyUp { key: Key::Shift } => self.set_selection_level(Precision::Word),
            InputEvent::KeyUp { .. } => self,
            InputEvent::PointerDown { target } => {
                let state = Self {
                    range_changed_since_pointer_down: false,
                    ..self.set_input_mode(InputMode::Mouse)
                };
                match target {
                    // Pressing on a block re-anchors the range even when it lands on the
                    // current anchor, so the following click keeps it.
                    Some(position) => Self {
                        range_changed_since_pointer_down: true,
                        ..state.select_from(position)
                    },
                    None => state,
                }
            }
            InputEvent::PointerMove { target } => {
                let state = self.set_input_mode(InputMode::Mouse);
                match target {
                    Some(position) if state.is_selecting => state.select_to(position),
                    _ => state,
                }
            }
            InputEvent::PointerUp => self.stop_selecting(),
            InputEvent::Click => {
                if self.range_changed_since_pointer_down {
                    self
                } else {
                    self.clear_selection().set_selection_level(Precision::Word)
                }
            }
        };
        Ok(Transition { state, effect })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{WordInfo, WordPositionRegistry};
    use crate::position::SentencePosition;

    struct Fixture {
        document: Document,
        registry: WordPositionRegistry,
        punctuation: PunctuationClass,
    }

    impl Fixture {
        fn new(text: &str) -> Self {
            Self {
                document: Document::parse(text),
                registry: WordPositionRegistry::new(),
                punctuation: PunctuationClass::default(),
            }
        }

        fn ctx(&self) -> NavigationContext<'_> {
            NavigationContext {
                document: &self.document,
                layout: &self.registry,
                punctuation: &self.punctuation,
                ignore_empty_paragraphs: true,
            }
        }
    }

    fn w(p: usize, s: usize, i: usize) -> BlockPosition {
        WordPosition::new(p, s, i).into()
    }

    fn sent(p: usize, s: usize) -> BlockPosition {
        SentencePosition::new(p, s).into()
    }

    #[test]
    fn test_default_state() {
        let state = CursorState::default();
        assert_eq!(state.position(), w(0, 0, 0));
        assert!(state.selection_range().is_none());
        assert_eq!(state.selection_level(), Precision::Word);
        assert_eq!(state.input_mode(), InputMode::Mouse);
    }

    #[test]
    fn test_select_from_and_to() {
        let state = CursorState::default().select_from(sent(0, 1));
        assert!(state.is_selecting());
        assert_eq!(state.selection_level(), Precision::Sentence);
        assert_eq!(state.selection_range(), Some(&SelectionRange::anchor_only(sent(0, 1))));

        let state = state.select_to(sent(0, 3)).stop_selecting();
        assert!(!state.is_selecting());
        assert_eq!(
            state.selection_range(),
            Some(&SelectionRange::new(sent(0, 1), sent(0, 3)))
        );
    }

    #[test]
    fn test_arrow_from_no_selection_enters_sentence_range() {
        let fx = Fixture::new("A one. B two.");
        let state = CursorState::default()
            .set_position(w(0, 1, 1))
            .navigate(&fx.ctx(), NavigationCommand::MoveLeft)
            .unwrap();
        assert_eq!(state.selection_range(), Some(&SelectionRange::collapsed(sent(0, 1))));
        assert_eq!(state.selection_level(), Precision::Sentence);
    }

    #[test]
    fn test_horizontal_from_sentence_enters_word_mode() {
        let fx = Fixture::new("A one two. B two.");
        let state = CursorState::default()
            .set_selection_range(Some(SelectionRange::collapsed(sent(0, 0))));

        let right = state.navigate(&fx.ctx(), NavigationCommand::MoveRight).unwrap();
        assert_eq!(right.selection_range(), Some(&SelectionRange::anchor_only(w(0, 0, 2))));
        assert_eq!(right.selection_level(), Precision::Word);

        let left = state.navigate(&fx.ctx(), NavigationCommand::MoveLeft).unwrap();
        assert_eq!(left.selection_range(), Some(&SelectionRange::anchor_only(w(0, 0, 0))));

        let next = right.navigate(&fx.ctx(), NavigationCommand::MoveRight).unwrap();
        assert_eq!(next.selection_range(), Some(&SelectionRange::collapsed(w(0, 1, 0))));
    }

    #[test]
    fn test_vertical_from_full_sentence_word_range_collapses() {
        let fx = Fixture::new("A one. B two.");
        let state = CursorState::default()
            .set_selection_range(Some(SelectionRange::new(w(0, 1, 0), w(0, 1, 1))));
        let state = state.navigate(&fx.ctx(), NavigationCommand::MoveDown).unwrap();
        assert_eq!(state.selection_range(), Some(&SelectionRange::collapsed(sent(0, 1))));
        assert_eq!(state.selection_level(), Precision::Sentence);
    }

    #[test]
    fn test_vertical_word_movement_uses_layout() {
        let mut fx = Fixture::new("alpha beta gamma delta");
        for (word, line, left) in [(0, 0, 0.0), (1, 0, 50.0), (2, 1, 0.0), (3, 1, 48.0)] {
            fx.registry.register_word_info(WordInfo {
                line,
                position: WordPosition::new(0, 0, word),
                pixel_left: left,
                text: String::new(),
            });
        }
        let state = CursorState::default()
            .set_selection_range(Some(SelectionRange::collapsed(w(0, 0, 1))));
        let down = state.navigate(&fx.ctx(), NavigationCommand::MoveDown).unwrap();
        assert_eq!(down.selection_range(), Some(&SelectionRange::collapsed(w(0, 0, 3))));

        // Nothing above the first line: unchanged.
        let up = state.navigate(&fx.ctx(), NavigationCommand::MoveUp).unwrap();
        assert_eq!(up, state);
    }

    #[test]
    fn test_escape_parks_position_on_head() {
        let fx = Fixture::new("A one. B two.");
        let state = CursorState::default()
            .set_selection_range(Some(SelectionRange::new(sent(0, 0), sent(0, 1))))
            .set_selection_level(Precision::Sentence)
            .navigate(&fx.ctx(), NavigationCommand::Escape)
            .unwrap();
        assert!(state.selection_range().is_none());
        assert_eq!(state.position(), w(0, 1, 0));
        assert_eq!(state.selection_level(), Precision::Word);
    }

    #[test]
    fn test_expand_first_press_converts_precision() {
        let fx = Fixture::new("A one. B two. C three.");
        let state = CursorState::default()
            .set_selection_range(Some(SelectionRange::collapsed(w(0, 1, 1))));
        let state = state.navigate(&fx.ctx(), NavigationCommand::ExpandDown).unwrap();
        assert_eq!(state.selection_range(), Some(&SelectionRange::collapsed(sent(0, 1))));
        let state = state.navigate(&fx.ctx(), NavigationCommand::ExpandDown).unwrap();
        assert_eq!(
            state.selection_range(),
            Some(&SelectionRange::new(sent(0, 1), sent(0, 2)))
        );

        let words = state.navigate(&fx.ctx(), NavigationCommand::ExpandRight).unwrap();
        assert_eq!(
            words.selection_range(),
            Some(&SelectionRange::new(w(0, 1, 0), w(0, 2, 1)))
        );
    }

    #[test]
    fn test_paragraph_expansion_of_paragraph_range_is_unsupported() {
        let fx = Fixture::new("A.\nB.");
        let state = CursorState::default().set_selection_range(Some(SelectionRange::collapsed(
            crate::position::ParagraphPosition::new(0).into(),
        )));
        assert!(matches!(
            state.navigate(&fx.ctx(), NavigationCommand::ExpandDown),
            Err(EditorError::UnsupportedPrecision { .. })
        ));
    }

    #[test]
    fn test_shift_key_toggles_level() {
        let fx = Fixture::new("A.");
        let down = CursorState::default()
            .handle_input(
                &fx.ctx(),
                InputEvent::KeyDown {
                    key: Key::Shift,
                    modifiers: Modifiers::SHIFT,
                },
            )
            .unwrap();
        assert_eq!(down.state.selection_level(), Precision::Sentence);
        let up = down
            .state
            .handle_input(&fx.ctx(), InputEvent::KeyUp { key: Key::Shift })
            .unwrap();
        assert_eq!(up.state.selection_level(), Precision::Word);
    }

    #[test]
    fn test_typing_requests_edit_mode() {
        let fx = Fixture::new("A.");
        let t = CursorState::default()
            .handle_input(
                &fx.ctx(),
                InputEvent::KeyDown {
                    key: Key::Char('q'),
                    modifiers: Modifiers::NONE,
                },
            )
            .unwrap();
        assert_eq!(t.effect, Some(Effect::RequestEditMode));
        assert_eq!(t.state.input_mode(), InputMode::Keyboard);
    }

    #[test]
    fn test_click_without_drag_clears_selection() {
        let fx = Fixture::new("A one. B two.");
        let ctx = fx.ctx();
        let mut state = CursorState::default()
            .set_selection_range(Some(SelectionRange::collapsed(sent(0, 1))))
            .set_selection_level(Precision::Sentence);
        for event in [
            InputEvent::PointerDown { target: None },
            InputEvent::PointerUp,
            InputEvent::Click,
        ] {
            state = state.handle_input(&ctx, event).unwrap().state;
        }
        assert!(state.selection_range().is_none());
        assert_eq!(state.selection_level(), Precision::Word);
    }

    #[test]
    fn test_click_after_drag_keeps_selection() {
        let fx = Fixture::new("A one. B two.");
        let ctx = fx.ctx();
        let mut state = CursorState::default();
        for event in [
            InputEvent::PointerDown {
                target: Some(w(0, 0, 0)),
            },
            InputEvent::PointerMove {
                target: Some(w(0, 1, 1)),
            },
            InputEvent::PointerUp,
            InputEvent::Click,
        ] {
            state = state.handle_input(&ctx, event).unwrap().state;
        }
        assert!(!state.is_selecting());
        assert_eq!(
            state.selection_range(),
            Some(&SelectionRange::new(w(0, 0, 0), w(0, 1, 1)))
        );
    }

    #[test]
    fn test_click_on_word_keeps_new_anchor() {
        let fx = Fixture::new("A one. B two.");
        let ctx = fx.ctx();
        let mut state = CursorState::default();
        for _ in 0..2 {
            for event in [
                InputEvent::PointerDown {
                    target: Some(w(0, 0, 1)),
                },
                InputEvent::PointerUp,
                InputEvent::Click,
            ] {
                state = state.handle_input(&ctx, event).unwrap().state;
            }
            assert_eq!(
                state.selection_range(),
                Some(&SelectionRange::anchor_only(w(0, 0, 1)))
            );
            assert_eq!(state.position(), w(0, 0, 1));
        }
    }
}
