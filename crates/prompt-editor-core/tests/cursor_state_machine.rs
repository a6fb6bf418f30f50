//! Keyboard and pointer sessions driven through the command executor.

use pretty_assertions::assert_eq;
use prompt_editor_core::{
    BlockPosition, Command, CommandExecutor, CommandResult, ConfigCommand, InputEvent, InputMode,
    Key, Modifiers, Precision, SelectionRange, SentencePosition, WordInfo, WordPosition,
};

const TEXT: &str = "Alpha beta gamma. Delta epsilon.\n\nZeta, eta theta.";

fn key(executor: &mut CommandExecutor, key: Key, modifiers: Modifiers) -> CommandResult {
    executor
        .execute(Command::Input(InputEvent::KeyDown { key, modifiers }))
        .unwrap()
}

fn range(executor: &CommandExecutor) -> Option<SelectionRange> {
    executor.editor().selection_range().copied()
}

fn sentence(p: usize, s: usize) -> BlockPosition {
    SentencePosition::new(p, s).into()
}

fn word(p: usize, s: usize, w: usize) -> BlockPosition {
    WordPosition::new(p, s, w).into()
}

#[test]
fn test_keyboard_session() {
    let mut executor = CommandExecutor::new(TEXT);

    key(&mut executor, Key::ArrowDown, Modifiers::NONE);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(sentence(0, 0))));
    assert_eq!(executor.editor().cursor().input_mode(), InputMode::Keyboard);
    assert_eq!(executor.editor().cursor().selection_level(), Precision::Sentence);

    key(&mut executor, Key::ArrowDown, Modifiers::NONE);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(sentence(0, 1))));

    // The empty middle paragraph is skipped.
    key(&mut executor, Key::ArrowDown, Modifiers::NONE);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(sentence(2, 0))));

    key(&mut executor, Key::ArrowUp, Modifiers::NONE);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(sentence(0, 1))));

    // Into word mode at the end of the sentence, then step back a word.
    key(&mut executor, Key::ArrowRight, Modifiers::NONE);
    assert_eq!(range(&executor), Some(SelectionRange::anchor_only(word(0, 1, 1))));
    key(&mut executor, Key::ArrowLeft, Modifiers::NONE);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(word(0, 1, 0))));

    // Shift + Right grows the range a word at a time, across the empty paragraph.
    key(&mut executor, Key::Shift, Modifiers::SHIFT);
    assert_eq!(executor.editor().cursor().selection_level(), Precision::Sentence);
    key(&mut executor, Key::ArrowRight, Modifiers::SHIFT);
    assert_eq!(
        range(&executor),
        Some(SelectionRange::new(word(0, 1, 0), word(0, 1, 1)))
    );
    key(&mut executor, Key::ArrowRight, Modifiers::SHIFT);
    assert_eq!(
        range(&executor),
        Some(SelectionRange::new(word(0, 1, 0), word(2, 0, 0)))
    );
    executor
        .execute(Command::Input(InputEvent::KeyUp { key: Key::Shift }))
        .unwrap();
    assert_eq!(executor.editor().cursor().selection_level(), Precision::Word);

    key(&mut executor, Key::Escape, Modifiers::NONE);
    assert_eq!(range(&executor), None);
    assert_eq!(executor.editor().cursor().position(), word(2, 0, 0));
}

#[test]
fn test_tab_and_paragraph_jumps() {
    let mut executor = CommandExecutor::new(TEXT);
    key(&mut executor, Key::ArrowDown, Modifiers::NONE);

    key(&mut executor, Key::Tab, Modifiers::NONE);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(sentence(0, 1))));
    key(&mut executor, Key::Tab, Modifiers::SHIFT);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(sentence(0, 0))));

    // Settle on the paragraph's own last sentence before crossing the empty paragraph.
    key(&mut executor, Key::ArrowDown, Modifiers::ALT);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(sentence(0, 1))));
    key(&mut executor, Key::ArrowDown, Modifiers::ALT);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(sentence(2, 0))));
    key(&mut executor, Key::ArrowUp, Modifiers::ALT);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(sentence(0, 0))));

    // Nothing above the first paragraph: unchanged.
    key(&mut executor, Key::ArrowUp, Modifiers::ALT);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(sentence(0, 0))));

    key(&mut executor, Key::ArrowDown, Modifiers::ALT_SHIFT);
    assert_eq!(
        range(&executor),
        Some(SelectionRange::new(sentence(0, 0), sentence(0, 1)))
    );
    key(&mut executor, Key::ArrowDown, Modifiers::ALT_SHIFT);
    assert_eq!(
        range(&executor),
        Some(SelectionRange::new(sentence(0, 0), sentence(2, 0)))
    );
}

#[test]
fn test_empty_paragraphs_become_stops_when_configured() {
    let mut executor = CommandExecutor::new(TEXT);
    executor
        .execute(Command::Config(ConfigCommand::SetIgnoreEmptyParagraphs {
            ignore: false,
        }))
        .unwrap();
    key(&mut executor, Key::ArrowDown, Modifiers::NONE);
    key(&mut executor, Key::ArrowDown, Modifiers::NONE);
    key(&mut executor, Key::ArrowDown, Modifiers::NONE);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(sentence(1, 0))));
}

#[test]
fn test_punctuation_jumps() {
    let mut executor = CommandExecutor::new("Zeta, eta theta; iota kappa.");
    executor
        .execute(Command::Input(InputEvent::PointerDown {
            target: Some(word(0, 0, 0)),
        }))
        .unwrap();

    key(&mut executor, Key::ArrowRight, Modifiers::ALT);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(word(0, 0, 2))));
    key(&mut executor, Key::ArrowRight, Modifiers::ALT);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(word(0, 0, 4))));
    key(&mut executor, Key::ArrowLeft, Modifiers::ALT);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(word(0, 0, 2))));

    key(&mut executor, Key::ArrowRight, Modifiers::ALT_SHIFT);
    assert_eq!(
        range(&executor),
        Some(SelectionRange::new(word(0, 0, 2), word(0, 0, 4)))
    );
}

#[test]
fn test_shift_range_keeps_extent() {
    let mut executor = CommandExecutor::new("A one. B two. C three. D four.");
    executor
        .execute(Command::Cursor(
            prompt_editor_core::CursorCommand::SetSelectionRange {
                range: Some(SelectionRange::new(sentence(0, 0), sentence(0, 1))),
            },
        ))
        .unwrap();
    key(&mut executor, Key::ArrowDown, Modifiers::META_SHIFT);
    assert_eq!(
        range(&executor),
        Some(SelectionRange::new(sentence(0, 1), sentence(0, 2)))
    );
}

#[test]
fn test_vertical_word_movement_follows_layout() {
    let mut executor = CommandExecutor::new("one two three four five six");
    for (w, line, left) in [
        (0, 0, 0.0),
        (1, 0, 40.0),
        (2, 0, 80.0),
        (3, 1, 0.0),
        (4, 1, 45.0),
        (5, 1, 90.0),
    ] {
        executor.editor_mut().register_word_info(WordInfo {
            line,
            position: WordPosition::new(0, 0, w),
            pixel_left: left,
            text: String::new(),
        });
    }
    executor
        .execute(Command::Cursor(
            prompt_editor_core::CursorCommand::SetSelectionRange {
                range: Some(SelectionRange::collapsed(word(0, 0, 1))),
            },
        ))
        .unwrap();

    key(&mut executor, Key::ArrowDown, Modifiers::NONE);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(word(0, 0, 4))));
    key(&mut executor, Key::ArrowUp, Modifiers::NONE);
    assert_eq!(range(&executor), Some(SelectionRange::collapsed(word(0, 0, 1))));
}

#[test]
fn test_pointer_drag_and_click() {
    let mut executor = CommandExecutor::new(TEXT);
    for event in [
        InputEvent::PointerDown {
            target: Some(sentence(0, 0)),
        },
        InputEvent::PointerMove {
            target: Some(sentence(2, 0)),
        },
        InputEvent::PointerUp,
        InputEvent::Click,
    ] {
        executor.execute(Command::Input(event)).unwrap();
    }
    assert_eq!(
        range(&executor),
        Some(SelectionRange::new(sentence(0, 0), sentence(2, 0)))
    );
    assert!(!executor.editor().cursor().is_selecting());
    assert_eq!(executor.editor().cursor().input_mode(), InputMode::Mouse);

    // Moving after release does not extend.
    executor
        .execute(Command::Input(InputEvent::PointerMove {
            target: Some(sentence(0, 1)),
        }))
        .unwrap();
    assert_eq!(
        range(&executor),
        Some(SelectionRange::new(sentence(0, 0), sentence(2, 0)))
    );

    // A plain click on the same spot clears it.
    for event in [
        InputEvent::PointerDown { target: None },
        InputEvent::PointerUp,
        InputEvent::Click,
    ] {
        executor.execute(Command::Input(event)).unwrap();
    }
    assert_eq!(range(&executor), None);
    assert_eq!(executor.editor().cursor().selection_level(), Precision::Word);
}

#[test]
fn test_click_on_word_selects_it() {
    let mut executor = CommandExecutor::new(TEXT);
    for event in [
        InputEvent::PointerDown {
            target: Some(word(0, 0, 1)),
        },
        InputEvent::PointerUp,
        InputEvent::Click,
    ] {
        executor.execute(Command::Input(event)).unwrap();
    }
    assert_eq!(range(&executor), Some(SelectionRange::anchor_only(word(0, 0, 1))));
    assert_eq!(executor.editor().cursor().selection_level(), Precision::Word);
}

#[test]
fn test_typing_requests_edit_mode() {
    let mut executor = CommandExecutor::new(TEXT);
    assert_eq!(
        key(&mut executor, Key::Char('a'), Modifiers::NONE),
        CommandResult::EditModeRequested
    );
    assert_eq!(
        key(&mut executor, Key::Backspace, Modifiers::NONE),
        CommandResult::EditModeRequested
    );
    assert_eq!(
        key(&mut executor, Key::Char('a'), Modifiers::ALT),
        CommandResult::Success
    );
}
