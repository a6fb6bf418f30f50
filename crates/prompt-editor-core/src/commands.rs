//! Command Interface Layer
//!
//! Provides a unified command interface for convenient frontend integration.
//!
//! # Overview
//!
//! [`CommandExecutor`] is the primary entry point: it owns one [`EditorCore`] (document, cursor
//! state, word layout registry, edit session, options) and routes every user intent through
//! [`CommandExecutor::execute`]. Supported operations:
//!
//! - **Cursor**: set the position, the selection range or the selection level directly
//! - **Navigation**: structural movement and range growth ([`NavigationCommand`])
//! - **Input**: raw key / pointer events routed through the cursor state machine
//! - **Document**: replace the text, edit single words, move or copy sentences
//! - **Edit mode**: open, edit, commit or cancel a flat-text [`EditSession`]
//! - **Config**: runtime options
//!
//! # Example
//!
//! ```rust
//! use prompt_editor_core::{Command, CommandExecutor, NavigationCommand, WordPosition};
//!
//! let mut executor = CommandExecutor::new("Hello world. Goodbye now.");
//!
//! // The first arrow press selects the current sentence.
//! executor.execute(Command::Navigate(NavigationCommand::MoveDown)).unwrap();
//!
//! // Batch execute commands
//! executor
//!     .execute_batch(vec![
//!         Command::Navigate(NavigationCommand::MoveDown),
//!         Command::Navigate(NavigationCommand::MoveRight),
//!     ])
//!     .unwrap();
//!
//! let range = executor.editor().selection_range().unwrap();
//! assert_eq!(range.from, WordPosition::new(0, 1, 1).into());
//! ```

use crate::cursor::{CursorState, Effect, InputEvent, InputMode, NavigationCommand, NavigationContext};
use crate::document::{Document, Insertion, Token};
use crate::edit_session::{EditSession, EditorMode};
use crate::error::EditorError;
use crate::layout::{WordInfo, WordPositionRegistry};
use crate::position::{BlockPosition, Precision, SentencePosition, WordPosition};
use crate::selection::SelectionRange;
use crate::text::Segmenter;

/// Direct cursor manipulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorCommand {
    /// Move the anchor position.
    SetPosition {
        /// New position.
        position: BlockPosition,
    },
    /// Start a range at `position`.
    SelectFrom {
        /// Anchor.
        position: BlockPosition,
    },
    /// Extend the range to `position`.
    SelectTo {
        /// Moving end.
        position: BlockPosition,
    },
    /// End drag-selection.
    StopSelecting,
    /// Drop the range.
    ClearSelection,
    /// Overwrite the range.
    SetSelectionRange {
        /// New range.
        range: Option<SelectionRange>,
    },
    /// Overwrite the selection level.
    SetSelectionLevel {
        /// New level.
        level: Precision,
    },
    /// Overwrite the input mode.
    SetInputMode {
        /// New mode.
        mode: InputMode,
    },
}

/// Document mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentCommand {
    /// Reparse the whole document from flat text.
    ReplaceText {
        /// New text.
        text: String,
    },
    /// Overwrite one token.
    UpdateWord {
        /// Token address.
        position: WordPosition,
        /// New text.
        word: String,
    },
    /// Insert a token.
    InsertWord {
        /// Insertion address.
        position: WordPosition,
        /// Token text.
        word: String,
    },
    /// Remove a token.
    DeleteWord {
        /// Token address.
        position: WordPosition,
    },
    /// Move the sentence addressed by `from.from` next to `to`.
    MoveSentence {
        /// Dragged range.
        from: SelectionRange,
        /// Drop target.
        to: SentencePosition,
        /// Side of the drop target.
        insertion: Insertion,
    },
    /// Copy the sentence addressed by `from.from` next to `to`.
    CopySentence {
        /// Dragged range.
        from: SelectionRange,
        /// Drop target.
        to: SentencePosition,
        /// Side of the drop target.
        insertion: Insertion,
    },
}

/// Flat-text edit mode commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditModeCommand {
    /// Open an edit session over the current range.
    Enter,
    /// Select `[begin, end)` in the session text.
    SetSelection {
        /// Start offset (characters).
        begin: usize,
        /// End offset (characters).
        end: usize,
    },
    /// Replace the session selection.
    ReplaceSelection {
        /// Replacement text.
        text: String,
    },
    /// Parse the session text back into the document.
    Commit {
        /// Text supplied by the host, replacing the session text before parsing.
        text: Option<String>,
    },
    /// Discard the session.
    Cancel,
}

/// Runtime option changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Whether navigation skips empty paragraphs.
    SetIgnoreEmptyParagraphs {
        /// New value.
        ignore: bool,
    },
}

/// Unified command enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Cursor command
    Cursor(CursorCommand),
    /// Navigation command
    Navigate(NavigationCommand),
    /// Raw input event
    Input(InputEvent),
    /// Document mutation
    Document(DocumentCommand),
    /// Edit mode command
    EditMode(EditModeCommand),
    /// Runtime option change
    Config(ConfigCommand),
}

/// Command execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Success, no return value
    Success,
    /// Not applicable in the current mode; nothing changed
    Ignored,
    /// The input asked the host to open edit mode
    EditModeRequested,
    /// Success, returns a sentence position
    Sentence(SentencePosition),
    /// Success, returns a range
    Range(SelectionRange),
    /// Success, returns a removed token
    Token(Token),
}

/// Command error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Underlying document or navigation failure
    #[error(transparent)]
    Editor(#[from] EditorError),
    /// Edit-mode command without an open session
    #[error("not in edit mode")]
    NotInEditMode,
    /// Structural command while an edit session is open
    #[error("already in edit mode")]
    AlreadyInEditMode,
}

/// Runtime options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    /// Skip structurally empty paragraphs when navigation crosses paragraph boundaries.
    pub ignore_empty_paragraphs: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            ignore_empty_paragraphs: true,
        }
    }
}

/// Editor Core
///
/// Owns everything one editor surface needs. Every document replacement resets the cursor
/// and clears the word layout registry.
///
/// # Example
///
/// ```rust
/// use prompt_editor_core::EditorCore;
///
/// let core = EditorCore::new("One. Two.\nThree.");
/// assert_eq!(core.document().paragraph_count(), 2);
/// assert_eq!(core.text(), "One. Two.\nThree.");
/// ```
#[derive(Debug, Clone)]
pub struct EditorCore {
    document: Document,
    cursor: CursorState,
    registry: WordPositionRegistry,
    session: Option<EditSession>,
    options: EditorOptions,
    segmenter: Segmenter,
    revision: u64,
}

impl EditorCore {
    /// Create a new Editor Core with the default segmentation rules
    pub fn new(text: &str) -> Self {
        Self::with_segmenter(text, Segmenter::default())
    }

    /// Create an Editor Core with custom segmentation rules
    pub fn with_segmenter(text: &str, segmenter: Segmenter) -> Self {
        Self {
            document: segmenter.parse(text),
            cursor: CursorState::default(),
            registry: WordPositionRegistry::new(),
            session: None,
            options: EditorOptions::default(),
            segmenter,
            revision: 0,
        }
    }

    /// Create an empty Editor Core
    pub fn empty() -> Self {
        Self::new("")
    }

    /// The live document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Flat text of the document.
    pub fn text(&self) -> String {
        self.document.to_string()
    }

    /// Cursor state.
    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    /// Active range.
    pub fn selection_range(&self) -> Option<&SelectionRange> {
        self.cursor.selection_range()
    }

    /// Current mode.
    pub fn mode(&self) -> EditorMode {
        if self.session.is_some() {
            EditorMode::Edit
        } else {
            EditorMode::Select
        }
    }

    /// Open edit session.
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Runtime options.
    pub fn options(&self) -> EditorOptions {
        self.options
    }

    /// Word layout registry.
    pub fn registry(&self) -> &WordPositionRegistry {
        &self.registry
    }

    /// Record where the rendering surface placed a word.
    pub fn register_word_info(&mut self, info: WordInfo) {
        self.registry.register_word_info(info);
    }

    /// Segmentation rules.
    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// Number of document changes so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Everything the cursor state machine reads.
    pub fn navigation_context(&self) -> NavigationContext<'_> {
        NavigationContext {
            document: &self.document,
            layout: &self.registry,
            punctuation: self.segmenter.punctuation(),
            ignore_empty_paragraphs: self.options.ignore_empty_paragraphs,
        }
    }

    fn replace_document(&mut self, document: Document, range: Option<SelectionRange>) {
        log::debug!(
            "replacing document ({} paragraphs)",
            document.paragraph_count()
        );
        self.document = document;
        self.registry.clear();
        self.cursor = match range {
            Some(range) => CursorState::default()
                .set_position(range.from)
                .set_selection_range(Some(range))
                .set_selection_level(range.precision()),
            None => CursorState::default(),
        };
        self.revision += 1;
    }

    /// Bookkeeping after an in-place mutation: stale layout is dropped and a cursor that no
    /// longer addresses the document is reset.
    fn document_mutated(&mut self) {
        self.registry.clear();
        self.revision += 1;

        let position_valid = self.document.validate_position(&self.cursor.position()).is_ok();
        let range_valid = self.cursor.selection_range().is_none_or(|range| {
            self.document.validate_position(&range.from).is_ok()
                && self.document.validate_position(&range.head()).is_ok()
        });
        if !(position_valid && range_valid) {
            log::debug!("cursor no longer valid after mutation, resetting");
            self.cursor = CursorState::default();
        }
    }

    fn session_mut(&mut self) -> Result<&mut EditSession, CommandError> {
        self.session.as_mut().ok_or(CommandError::NotInEditMode)
    }
}

/// Command Executor
///
/// Routes [`Command`]s to the [`EditorCore`] and keeps the command history.
///
/// # Example
///
/// ```rust
/// use prompt_editor_core::{Command, CommandExecutor, DocumentCommand, WordPosition};
///
/// let mut executor = CommandExecutor::new("Hello world.");
/// executor
///     .execute(Command::Document(DocumentCommand::UpdateWord {
///         position: WordPosition::new(0, 0, 1),
///         word: "there.".to_string(),
///     }))
///     .unwrap();
/// assert_eq!(executor.editor().text(), "Hello there.");
/// ```
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    /// Editor Core
    editor: EditorCore,
    /// Command history
    command_history: Vec<Command>,
}

impl CommandExecutor {
    /// Create a new command executor
    pub fn new(text: &str) -> Self {
        Self::from_editor(EditorCore::new(text))
    }

    /// Create a command executor around an existing Editor Core
    pub fn from_editor(editor: EditorCore) -> Self {
        Self {
            editor,
            command_history: Vec::new(),
        }
    }

    /// Create an empty command executor
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Execute command
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        log::debug!("executing {command:?}");

        // Save command to history
        self.command_history.push(command.clone());

        let result = match command {
            Command::Cursor(cmd) => Ok(self.execute_cursor(cmd)),
            Command::Navigate(cmd) => self.execute_navigate(cmd),
            Command::Input(event) => self.execute_input(event),
            Command::Document(cmd) => self.execute_document(cmd),
            Command::EditMode(cmd) => self.execute_edit_mode(cmd),
            Command::Config(cmd) => Ok(self.execute_config(cmd)),
        };
        if let Err(err) = &result {
            log::warn!("command failed: {err}");
        }
        result
    }

    /// Batch execute commands, stopping at the first failure
    pub fn execute_batch(
        &mut self,
        commands: Vec<Command>,
    ) -> Result<Vec<CommandResult>, CommandError> {
        let mut results = Vec::new();

        for command in commands {
            let result = self.execute(command)?;
            results.push(result);
        }

        Ok(results)
    }

    /// Get command history
    pub fn get_command_history(&self) -> &[Command] {
        &self.command_history
    }

    /// Get Editor Core
    pub fn editor(&self) -> &EditorCore {
        &self.editor
    }

    /// Get mutable Editor Core
    pub fn editor_mut(&mut self) -> &mut EditorCore {
        &mut self.editor
    }

    fn execute_cursor(&mut self, command: CursorCommand) -> CommandResult {
        let cursor = self.editor.cursor;
        self.editor.cursor = match command {
            CursorCommand::SetPosition { position } => cursor.set_position(position),
            CursorCommand::SelectFrom { position } => cursor.select_from(position),
            CursorCommand::SelectTo { position } => cursor.select_to(position),
            CursorCommand::StopSelecting => cursor.stop_selecting(),
            CursorCommand::ClearSelection => cursor.clear_selection(),
            CursorCommand::SetSelectionRange { range } => cursor.set_selection_range(range),
            CursorCommand::SetSelectionLevel { level } => cursor.set_selection_level(level),
            CursorCommand::SetInputMode { mode } => cursor.set_input_mode(mode),
        };
        CommandResult::Success
    }

    fn execute_navigate(
        &mut self,
        command: NavigationCommand,
    ) -> Result<CommandResult, CommandError> {
        if self.editor.session.is_some() {
            return Ok(CommandResult::Ignored);
        }
        let next = self
            .editor
            .cursor
            .navigate(&self.editor.navigation_context(), command)?;
        self.editor.cursor = next;
        Ok(CommandResult::Success)
    }

    fn execute_input(&mut self, event: InputEvent) -> Result<CommandResult, CommandError> {
        if self.editor.session.is_some() {
            return Ok(CommandResult::Ignored);
        }
        let transition = self
            .editor
            .cursor
            .handle_input(&self.editor.navigation_context(), event)?;
        self.editor.cursor = transition.state;
        Ok(match transition.effect {
            Some(Effect::RequestEditMode) => CommandResult::EditModeRequested,
            None => CommandResult::Success,
        })
    }

    fn execute_document(&mut self, command: DocumentCommand) -> Result<CommandResult, CommandError> {
        if self.editor.session.is_some() {
            return Err(CommandError::AlreadyInEditMode);
        }

        let editor = &mut self.editor;
        let result = match command {
            DocumentCommand::ReplaceText { text } => {
                let document = editor.segmenter.parse(&text);
                editor.replace_document(document, None);
                return Ok(CommandResult::Success);
            }
            DocumentCommand::UpdateWord { position, word } => {
                editor.document.update_word(position, word)?;
                CommandResult::Success
            }
            DocumentCommand::InsertWord { position, word } => {
                editor.document.insert_word(position, word)?;
                CommandResult::Success
            }
            DocumentCommand::DeleteWord { position } => {
                CommandResult::Token(editor.document.delete_word(position)?)
            }
            DocumentCommand::MoveSentence {
                from,
                to,
                insertion,
            } => {
                let landed = editor.document.move_sentence(&from, to, insertion)?;
                editor.cursor = editor
                    .cursor
                    .set_selection_range(Some(SelectionRange::collapsed(landed.into())))
                    .set_selection_level(Precision::Sentence);
                CommandResult::Sentence(landed)
            }
            DocumentCommand::CopySentence {
                from,
                to,
                insertion,
            } => {
                let landed = editor.document.copy_sentence(&from, to, insertion)?;
                editor.cursor = editor
                    .cursor
                    .set_selection_range(Some(SelectionRange::collapsed(landed.into())))
                    .set_selection_level(Precision::Sentence);
                CommandResult::Sentence(landed)
            }
        };
        editor.document_mutated();
        Ok(result)
    }

    fn execute_edit_mode(
        &mut self,
        command: EditModeCommand,
    ) -> Result<CommandResult, CommandError> {
        let editor = &mut self.editor;
        match command {
            EditModeCommand::Enter => {
                if editor.session.is_some() {
                    return Err(CommandError::AlreadyInEditMode);
                }
                let session = EditSession::open(&editor.document, editor.cursor.selection_range())?;
                log::debug!("entering edit mode, selection {:?}", session.selection());
                editor.session = Some(session);
                Ok(CommandResult::Success)
            }
            EditModeCommand::SetSelection { begin, end } => {
                editor.session_mut()?.set_selection(begin, end)?;
                Ok(CommandResult::Success)
            }
            EditModeCommand::ReplaceSelection { text } => {
                editor.session_mut()?.replace_selection(&text);
                Ok(CommandResult::Success)
            }
            EditModeCommand::Commit { text } => {
                let mut session = editor.session_mut()?.clone();
                if let Some(text) = text {
                    session.set_text(&text);
                }
                let (document, range) = session.commit(&editor.segmenter)?;
                editor.session = None;
                editor.replace_document(document, Some(range));
                Ok(CommandResult::Range(range))
            }
            EditModeCommand::Cancel => {
                editor.session.take().ok_or(CommandError::NotInEditMode)?;
                log::debug!("edit mode cancelled");
                Ok(CommandResult::Success)
            }
        }
    }

    fn execute_config(&mut self, command: ConfigCommand) -> CommandResult {
        match command {
            ConfigCommand::SetIgnoreEmptyParagraphs { ignore } => {
                self.editor.options.ignore_empty_paragraphs = ignore;
            }
        }
        CommandResult::Success
    }
}
