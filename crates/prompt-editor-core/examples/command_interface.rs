//! Command interface example
//!
//! Demonstrates how to use `CommandExecutor` to drive structured navigation and editing.

use prompt_editor_core::{
    Command, CommandExecutor, CommandResult, DocumentCommand, EditModeCommand, InputEvent,
    Insertion, Key, Modifiers, NavigationCommand, SelectionRange, SentencePosition,
    convert_document_to_string,
};

fn describe(executor: &CommandExecutor) {
    let editor = executor.editor();
    match convert_document_to_string(editor.document(), editor.selection_range()) {
        Ok(out) => println!(
            "  selection [{}..{}): {:?}",
            out.selection_begin, out.selection_end, out.selection
        ),
        Err(err) => println!("  selection unavailable: {err}"),
    }
}

fn main() {
    println!("=== Command interface example ===\n");

    let mut executor = CommandExecutor::new(
        "You are a helpful assistant. Answer {QUESTION} briefly.\n\nCite sources, if any.",
    );
    println!("Document:\n{}\n", executor.editor().text());

    // 1. Sentence navigation
    println!("1. Sentence navigation:");
    for _ in 0..3 {
        executor
            .execute(Command::Navigate(NavigationCommand::MoveDown))
            .unwrap();
        describe(&executor);
    }

    // 2. Word navigation through raw key events
    println!("\n2. Word navigation:");
    for (key, modifiers) in [
        (Key::ArrowLeft, Modifiers::NONE),
        (Key::ArrowRight, Modifiers::NONE),
        (Key::ArrowRight, Modifiers::ALT),
        (Key::ArrowLeft, Modifiers::SHIFT),
    ] {
        executor
            .execute(Command::Input(InputEvent::KeyDown { key, modifiers }))
            .unwrap();
        describe(&executor);
    }

    // 3. Drag a sentence
    println!("\n3. Move the first sentence to the end:");
    let result = executor
        .execute(Command::Document(DocumentCommand::MoveSentence {
            from: SelectionRange::collapsed(SentencePosition::new(0, 0).into()),
            to: SentencePosition::new(2, 0),
            insertion: Insertion::After,
        }))
        .unwrap();
    if let CommandResult::Sentence(landed) = result {
        println!("  landed at {landed:?}");
    }
    println!("{}\n", executor.editor().text());

    // 4. Flat-text edit
    println!("4. Edit mode:");
    executor
        .execute_batch(vec![
            Command::EditMode(EditModeCommand::Enter),
            Command::EditMode(EditModeCommand::ReplaceSelection {
                text: "Cite two sources. You are a careful assistant.".to_string(),
            }),
            Command::EditMode(EditModeCommand::Commit { text: None }),
        ])
        .unwrap();
    println!("{}", executor.editor().text());
    describe(&executor);

    println!("\nExecuted {} commands.", executor.get_command_history().len());
}
