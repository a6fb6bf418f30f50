//! Edit-mode round trips and the change notifications hosts rely on to persist text.

use pretty_assertions::assert_eq;
use prompt_editor_core::{
    Command, CommandError, CommandResult, CursorCommand, DocumentCommand, EditModeCommand,
    EditorMode, EditorStateManager, Insertion, NavigationCommand, SelectionRange,
    SentencePosition, StateChange, StateChangeType, WordPosition,
};
use std::sync::{Arc, Mutex};

fn record(manager: &mut EditorStateManager) -> Arc<Mutex<Vec<StateChange>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    manager.subscribe(move |change| sink.lock().unwrap().push(change.clone()));
    seen
}

fn edit(command: EditModeCommand) -> Command {
    Command::EditMode(command)
}

#[test]
fn test_edit_selected_sentence() {
    let mut manager = EditorStateManager::new("Write a poem. Keep it short.\nSign it.");
    manager
        .execute(Command::Cursor(CursorCommand::SetSelectionRange {
            range: Some(SelectionRange::collapsed(
                SentencePosition::new(0, 1).into(),
            )),
        }))
        .unwrap();
    let seen = record(&mut manager);

    manager.execute(edit(EditModeCommand::Enter)).unwrap();
    assert_eq!(manager.get_mode_state().edit_selection, Some((14, 28)));

    manager
        .execute(edit(EditModeCommand::ReplaceSelection {
            text: "Make it rhyme. Keep it short.".to_string(),
        }))
        .unwrap();
    let result = manager
        .execute(edit(EditModeCommand::Commit { text: None }))
        .unwrap();

    // The caret sits right after the inserted text, on "short.".
    assert_eq!(
        result,
        CommandResult::Range(SelectionRange::collapsed(
            WordPosition::new(0, 2, 2).into()
        ))
    );
    let editor = manager.editor();
    assert_eq!(editor.mode(), EditorMode::Select);
    assert_eq!(
        editor.text(),
        "Write a poem. Make it rhyme. Keep it short.\nSign it."
    );
    assert_eq!(editor.document().sentence_count(0), 3);

    let seen = seen.lock().unwrap();
    let types: Vec<_> = seen.iter().map(|c| c.change_type).collect();
    assert_eq!(types[0], StateChangeType::EditModeChanged);
    assert_eq!(types[1], StateChangeType::EditSessionChanged);
    let saved = seen
        .iter()
        .find(|c| c.change_type == StateChangeType::DocumentModified)
        .and_then(|c| c.text.clone())
        .unwrap();
    assert_eq!(&*saved, "Write a poem. Make it rhyme. Keep it short.\nSign it.");
}

#[test]
fn test_commit_with_host_text() {
    let mut manager = EditorStateManager::new("Old text.");
    manager.execute(edit(EditModeCommand::Enter)).unwrap();
    manager
        .execute(edit(EditModeCommand::Commit {
            text: Some("Brand new. Second one.".to_string()),
        }))
        .unwrap();
    let doc = manager.get_document_state();
    assert_eq!(doc.sentence_count, 2);
    assert!(doc.is_modified);
    assert_eq!(manager.editor().text(), "Brand new. Second one.");
}

#[test]
fn test_cancel_discards_session() {
    let mut manager = EditorStateManager::new("Keep me.");
    manager.execute(edit(EditModeCommand::Enter)).unwrap();
    manager
        .execute(edit(EditModeCommand::ReplaceSelection {
            text: "Lost ".to_string(),
        }))
        .unwrap();
    manager.execute(edit(EditModeCommand::Cancel)).unwrap();
    assert_eq!(manager.editor().text(), "Keep me.");
    assert!(!manager.get_document_state().is_modified);
}

#[test]
fn test_structural_commands_blocked_while_editing() {
    let mut manager = EditorStateManager::new("One. Two.");
    manager.execute(edit(EditModeCommand::Enter)).unwrap();
    let version = manager.version();

    assert_eq!(
        manager
            .execute(Command::Navigate(NavigationCommand::MoveDown))
            .unwrap(),
        CommandResult::Ignored
    );
    assert_eq!(
        manager.execute(Command::Document(DocumentCommand::MoveSentence {
            from: SelectionRange::collapsed(SentencePosition::new(0, 0).into()),
            to: SentencePosition::new(0, 1),
            insertion: Insertion::After,
        })),
        Err(CommandError::AlreadyInEditMode)
    );
    assert_eq!(manager.version(), version);
}

#[test]
fn test_sentence_drag_reports_text() {
    let mut manager = EditorStateManager::new("First. Second.\nThird.");
    let seen = record(&mut manager);
    manager
        .execute(Command::Document(DocumentCommand::CopySentence {
            from: SelectionRange::collapsed(SentencePosition::new(0, 0).into()),
            to: SentencePosition::new(1, 0),
            insertion: Insertion::Before,
        }))
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].change_type, StateChangeType::DocumentModified);
    assert_eq!(seen[0].text.as_deref(), Some("First. Second.\nFirst. Third."));
}
