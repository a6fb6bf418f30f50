//! Editor State Interface
//!
//! Provides a complete state query interface for the editor, used for frontend rendering and state synchronization.
//!
//! # Overview
//!
//! The state interface layer exposes the editor's internal state to the frontend in a structured, immutable manner.
//! It supports:
//!
//! - **State Queries**: Retrieve document, selection and mode snapshots
//! - **Version Tracking**: Track state changes through version numbers
//! - **Change Notifications**: Subscribe to state change events; document changes carry the
//!   reserialized text so hosts can persist it
//!
//! # Example
//!
//! ```rust
//! use prompt_editor_core::{Command, EditorStateManager, NavigationCommand, StateChangeType};
//!
//! let mut manager = EditorStateManager::new("Hello world. Goodbye now.");
//!
//! // Query document state
//! let doc_state = manager.get_document_state();
//! assert_eq!(doc_state.sentence_count, 2);
//!
//! // Subscribe to state changes
//! manager.subscribe(|change| {
//!     println!("State changed: {:?}", change.change_type);
//! });
//!
//! manager.execute(Command::Navigate(NavigationCommand::MoveDown)).unwrap();
//! assert_eq!(manager.version(), 2);
//! ```

use crate::commands::{Command, CommandError, CommandExecutor, CommandResult, EditorCore, EditorOptions};
use crate::convert::convert_document_to_string;
use crate::cursor::{CursorState, InputMode};
use crate::edit_session::{EditSession, EditorMode};
use crate::position::{BlockPosition, Precision};
use crate::selection::SelectionRange;
use std::sync::Arc;

/// Document state
#[derive(Debug, Clone)]
pub struct DocumentState {
    /// Paragraph count
    pub paragraph_count: usize,
    /// Total sentence count
    pub sentence_count: usize,
    /// Total token count
    pub word_count: usize,
    /// Character count of the serialized text
    pub char_count: usize,
    /// Whether document has been modified since the last save
    pub is_modified: bool,
    /// State version number
    pub version: u64,
}

/// Cursor and selection state
#[derive(Debug, Clone)]
pub struct SelectionState {
    /// Anchor position
    pub position: BlockPosition,
    /// Active range
    pub range: Option<SelectionRange>,
    /// Precision new selections adopt
    pub level: Precision,
    /// Whether a pointer drag is in progress
    pub is_selecting: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Serialized text covered by the range
    pub selected_text: Option<String>,
}

/// Mode state
#[derive(Debug, Clone)]
pub struct ModeState {
    /// Current mode
    pub mode: EditorMode,
    /// Edit session selection in character offsets, when editing
    pub edit_selection: Option<(usize, usize)>,
    /// Runtime options
    pub options: EditorOptions,
}

/// State change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeType {
    /// Document content modified
    DocumentModified,
    /// Anchor position moved while the range stayed put
    CursorMoved,
    /// Selection range changed
    SelectionChanged,
    /// Selection level changed
    SelectionLevelChanged,
    /// Input mode changed
    InputModeChanged,
    /// Entered or left edit mode
    EditModeChanged,
    /// Edit session text or selection changed
    EditSessionChanged,
    /// Input asked the host to open edit mode
    EditModeRequested,
    /// Runtime options changed
    OptionsChanged,
}

/// State change record
#[derive(Debug, Clone)]
pub struct StateChange {
    /// Change type
    pub change_type: StateChangeType,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
    /// Reserialized document text, for document changes
    pub text: Option<Arc<str>>,
}

impl StateChange {
    /// Create a new state change record without text.
    pub fn new(change_type: StateChangeType, old_version: u64, new_version: u64) -> Self {
        Self {
            change_type,
            old_version,
            new_version,
            text: None,
        }
    }

    /// Attach the reserialized document text to this change record.
    pub fn with_text(mut self, text: Arc<str>) -> Self {
        self.text = Some(text);
        self
    }
}

/// Complete editor state snapshot
#[derive(Debug, Clone)]
pub struct EditorState {
    /// Document state
    pub document: DocumentState,
    /// Selection state
    pub selection: SelectionState,
    /// Mode state
    pub mode: ModeState,
}

/// State change callback function type
pub type StateChangeCallback = Box<dyn FnMut(&StateChange) + Send>;

/// What `execute` compares to decide which changes to report.
struct Observed {
    revision: u64,
    cursor: CursorState,
    session: Option<EditSession>,
    options: EditorOptions,
}

impl Observed {
    fn capture(editor: &EditorCore) -> Self {
        Self {
            revision: editor.revision(),
            cursor: *editor.cursor(),
            session: editor.session().cloned(),
            options: editor.options(),
        }
    }

    fn changes(&self, after: &Observed, result: &CommandResult) -> Vec<StateChangeType> {
        let mut changes = Vec::new();
        if self.revision != after.revision {
            changes.push(StateChangeType::DocumentModified);
        }
        match (&self.session, &after.session) {
            (None, None) => {}
            (Some(before), Some(now)) => {
                if before.selection() != now.selection() || before.text() != now.text() {
                    changes.push(StateChangeType::EditSessionChanged);
                }
            }
            _ => changes.push(StateChangeType::EditModeChanged),
        }

        let (old, new) = (&self.cursor, &after.cursor);
        if old.selection_range() != new.selection_range() {
            changes.push(StateChangeType::SelectionChanged);
        } else if old.position() != new.position() {
            changes.push(StateChangeType::CursorMoved);
        }
        if old.selection_level() != new.selection_level() {
            changes.push(StateChangeType::SelectionLevelChanged);
        }
        if old.input_mode() != new.input_mode() {
            changes.push(StateChangeType::InputModeChanged);
        }
        if self.options != after.options {
            changes.push(StateChangeType::OptionsChanged);
        }
        if *result == CommandResult::EditModeRequested {
            changes.push(StateChangeType::EditModeRequested);
        }
        changes
    }
}

/// Editor state manager
///
/// `EditorStateManager` wraps the command executor ([`CommandExecutor`]) and its internal [`EditorCore`]
/// and provides the following features:
///
/// - **State Queries**: Retrieve document, selection and mode snapshots
/// - **Version Tracking**: Increment the version number for every observed change, supporting incremental updates
/// - **Change Notifications**: Notify subscribers of state changes via callback mechanism
/// - **Modification Tracking**: Track whether the document has been modified (for save prompts)
///
/// # Architecture Notes
///
/// The state manager adopts a "unidirectional data flow" pattern:
///
/// 1. Frontend executes commands via [`execute()`](EditorStateManager::execute)
/// 2. Manager compares the observable state before and after, increments the version number
///    for each facet that changed and triggers all subscribed callbacks
/// 3. Frontend retrieves the latest state via the `get_*_state()` methods
///
/// A command that succeeds without changing anything leaves the version untouched.
///
/// # Example
///
/// ```rust
/// use prompt_editor_core::{Command, DocumentCommand, EditorStateManager, WordPosition};
///
/// let mut manager = EditorStateManager::new("Hello world.");
///
/// manager.subscribe(|change| {
///     if let Some(text) = &change.text {
///         println!("save: {text}");
///     }
/// });
///
/// manager
///     .execute(Command::Document(DocumentCommand::DeleteWord {
///         position: WordPosition::new(0, 0, 0),
///     }))
///     .unwrap();
///
/// let doc_state = manager.get_document_state();
/// assert!(doc_state.is_modified);
/// assert_eq!(doc_state.version, 1);
/// ```
pub struct EditorStateManager {
    /// Command executor (wraps EditorCore)
    executor: CommandExecutor,
    /// State version number
    state_version: u64,
    /// Whether document has been modified
    is_modified: bool,
    /// State change callback list
    callbacks: Vec<StateChangeCallback>,
}

impl EditorStateManager {
    /// Create a new state manager
    pub fn new(text: &str) -> Self {
        Self::from_executor(CommandExecutor::new(text))
    }

    /// Create a state manager around an existing executor
    pub fn from_executor(executor: CommandExecutor) -> Self {
        Self {
            executor,
            state_version: 0,
            is_modified: false,
            callbacks: Vec::new(),
        }
    }

    /// Create an empty state manager
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Get Editor Core
    pub fn editor(&self) -> &EditorCore {
        self.executor.editor()
    }

    /// Get the wrapped command executor
    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }

    /// Execute a command and report every state facet it changed.
    ///
    /// Failed commands change nothing and notify nobody.
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        let before = Observed::capture(self.executor.editor());
        let result = self.executor.execute(command)?;
        let after = Observed::capture(self.executor.editor());

        for change_type in before.changes(&after, &result) {
            self.mark_modified(change_type);
        }
        Ok(result)
    }

    /// Get current version number
    pub fn version(&self) -> u64 {
        self.state_version
    }

    /// Get complete editor state snapshot
    pub fn get_full_state(&self) -> EditorState {
        EditorState {
            document: self.get_document_state(),
            selection: self.get_selection_state(),
            mode: self.get_mode_state(),
        }
    }

    /// Get document state
    pub fn get_document_state(&self) -> DocumentState {
        let document = self.executor.editor().document();
        DocumentState {
            paragraph_count: document.paragraph_count(),
            sentence_count: document.total_sentences(),
            word_count: document.total_words(),
            char_count: document.to_string().chars().count(),
            is_modified: self.is_modified,
            version: self.state_version,
        }
    }

    /// Get selection state
    pub fn get_selection_state(&self) -> SelectionState {
        let editor = self.executor.editor();
        let cursor = editor.cursor();
        let selected_text = cursor.selection_range().and_then(|range| {
            convert_document_to_string(editor.document(), Some(range))
                .ok()
                .map(|serialized| serialized.selection)
        });
        SelectionState {
            position: cursor.position(),
            range: cursor.selection_range().copied(),
            level: cursor.selection_level(),
            is_selecting: cursor.is_selecting(),
            input_mode: cursor.input_mode(),
            selected_text,
        }
    }

    /// Get mode state
    pub fn get_mode_state(&self) -> ModeState {
        let editor = self.executor.editor();
        ModeState {
            mode: editor.mode(),
            edit_selection: editor.session().map(EditSession::selection),
            options: editor.options(),
        }
    }

    /// Subscribe to state change notifications
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Check if state has changed since a version
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.state_version > version
    }

    /// Increment version number and notify subscribers
    pub fn mark_modified(&mut self, change_type: StateChangeType) {
        let old_version = self.state_version;
        self.state_version += 1;

        let mut change = StateChange::new(change_type, old_version, self.state_version);
        // Only document content changes mark the document dirty and carry its text.
        if change_type == StateChangeType::DocumentModified {
            self.is_modified = true;
            change = change.with_text(Arc::from(self.executor.editor().text()));
        }
        self.notify_callbacks(&change);
    }

    /// Mark document as unmodified (e.g., after saving)
    pub fn mark_saved(&mut self) {
        self.is_modified = false;
    }

    /// Notify all callbacks
    fn notify_callbacks(&mut self, change: &StateChange) {
        for callback in &mut self.callbacks {
            callback(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{DocumentCommand, EditModeCommand};
    use crate::cursor::NavigationCommand;
    use crate::position::{SentencePosition, WordPosition};
    use std::sync::Mutex;

    fn recorder(manager: &mut EditorStateManager) -> Arc<Mutex<Vec<StateChange>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        manager.subscribe(move |change| sink.lock().unwrap().push(change.clone()));
        seen
    }

    #[test]
    fn test_document_state() {
        let manager = EditorStateManager::new("One. Two.\nThree four.");
        let doc_state = manager.get_document_state();

        assert_eq!(doc_state.paragraph_count, 2);
        assert_eq!(doc_state.sentence_count, 3);
        assert_eq!(doc_state.word_count, 4);
        assert_eq!(doc_state.char_count, 21);
        assert!(!doc_state.is_modified);
        assert_eq!(doc_state.version, 0);
    }

    #[test]
    fn test_selection_state() {
        let mut manager = EditorStateManager::new("Hello world. Goodbye now.");
        manager
            .execute(Command::Navigate(NavigationCommand::MoveDown))
            .unwrap();
        let state = manager.get_selection_state();
        assert_eq!(
            state.range,
            Some(SelectionRange::collapsed(SentencePosition::new(0, 0).into()))
        );
        assert_eq!(state.level, Precision::Sentence);
        assert_eq!(state.selected_text.as_deref(), Some("Hello world."));
    }

    #[test]
    fn test_navigation_notifies_selection_and_level() {
        let mut manager = EditorStateManager::new("Hello world. Goodbye now.");
        let seen = recorder(&mut manager);
        manager
            .execute(Command::Navigate(NavigationCommand::MoveDown))
            .unwrap();

        let types: Vec<_> = seen.lock().unwrap().iter().map(|c| c.change_type).collect();
        assert_eq!(
            types,
            vec![
                StateChangeType::SelectionChanged,
                StateChangeType::SelectionLevelChanged
            ]
        );
        assert_eq!(manager.version(), 2);
        assert!(!manager.get_document_state().is_modified);
    }

    #[test]
    fn test_noop_does_not_bump_version() {
        let mut manager = EditorStateManager::new("Only.");
        manager
            .execute(Command::Navigate(NavigationCommand::MoveDown))
            .unwrap();
        let version = manager.version();

        // Single sentence: moving down again stays put.
        manager
            .execute(Command::Navigate(NavigationCommand::MoveDown))
            .unwrap();
        assert_eq!(manager.version(), version);
        assert!(!manager.has_changed_since(version));
    }

    #[test]
    fn test_document_change_carries_text() {
        let mut manager = EditorStateManager::new("Hello world.");
        let seen = recorder(&mut manager);
        manager
            .execute(Command::Document(DocumentCommand::UpdateWord {
                position: WordPosition::new(0, 0, 0),
                word: "Goodbye".to_string(),
            }))
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].change_type, StateChangeType::DocumentModified);
        assert_eq!(seen[0].text.as_deref(), Some("Goodbye world."));
        assert!(manager.get_document_state().is_modified);

        drop(seen);
        manager.mark_saved();
        assert!(!manager.get_document_state().is_modified);
    }

    #[test]
    fn test_failed_command_changes_nothing() {
        let mut manager = EditorStateManager::new("Hello world.");
        let seen = recorder(&mut manager);
        assert!(
            manager
                .execute(Command::Document(DocumentCommand::DeleteWord {
                    position: WordPosition::new(3, 0, 0),
                }))
                .is_err()
        );
        assert_eq!(manager.version(), 0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_mode_state() {
        let mut manager = EditorStateManager::new("Hello world.");
        manager
            .execute(Command::EditMode(EditModeCommand::Enter))
            .unwrap();
        let mode = manager.get_mode_state();
        assert_eq!(mode.mode, EditorMode::Edit);
        assert_eq!(mode.edit_selection, Some((0, 0)));

        manager
            .execute(Command::EditMode(EditModeCommand::Cancel))
            .unwrap();
        let full = manager.get_full_state();
        assert_eq!(full.mode.mode, EditorMode::Select);
        assert_eq!(full.document.version, 2);
    }
}
