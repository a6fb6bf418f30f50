//! State management example
//!
//! Demonstrates how to use `EditorStateManager` to query state and persist document changes.

use prompt_editor_core::{
    Command, DocumentCommand, EditorStateManager, NavigationCommand, StateChangeType, WordPosition,
};
use std::sync::{Arc, Mutex};

fn print_state(manager: &EditorStateManager) {
    let state = manager.get_full_state();
    println!(
        "  v{} | {} paragraphs, {} sentences, {} words | modified: {}",
        state.document.version,
        state.document.paragraph_count,
        state.document.sentence_count,
        state.document.word_count,
        state.document.is_modified
    );
    println!(
        "  mode {:?}, level {:?}, range {:?}, text {:?}",
        state.mode.mode, state.selection.level, state.selection.range, state.selection.selected_text
    );
}

fn main() {
    println!("=== State management example ===\n");

    let mut manager = EditorStateManager::new("Translate the text. Keep the tone.\nReply in French.");
    print_state(&manager);

    // Hosts persist the text carried by document changes.
    let saved = Arc::new(Mutex::new(None::<Arc<str>>));
    let sink = saved.clone();
    manager.subscribe(move |change| {
        println!(
            "  change {:?} (version {} -> {})",
            change.change_type, change.old_version, change.new_version
        );
        if change.change_type == StateChangeType::DocumentModified {
            if let Ok(mut slot) = sink.lock() {
                *slot = change.text.clone();
            }
        }
    });

    println!("\nNavigate:");
    manager
        .execute(Command::Navigate(NavigationCommand::MoveDown))
        .unwrap();
    print_state(&manager);

    println!("\nEdit a word:");
    manager
        .execute(Command::Document(DocumentCommand::UpdateWord {
            position: WordPosition::new(1, 0, 2),
            word: "German.".to_string(),
        }))
        .unwrap();
    print_state(&manager);

    if let Ok(slot) = saved.lock() {
        println!("\nLast saved text: {:?}", slot.as_deref());
    }
    manager.mark_saved();
    print_state(&manager);
}
