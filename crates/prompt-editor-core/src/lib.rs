#![warn(missing_docs)]
//! Prompt Editor Core - Headless Structured Editor Kernel for Prompt Documents
//!
//! # Overview
//!
//! `prompt-editor-core` is a headless editing kernel for prompt documents. Text is parsed into a
//! paragraph → sentence → token tree and every cursor, selection and navigation operation
//! addresses that tree instead of character offsets. It does not render anything; the host
//! draws the document, reports where words landed on screen, and forwards user input.
//!
//! # Core Features
//!
//! - **Structured Document Model**: paragraphs of sentences of words and atomic template variables
//! - **Precision Algebra**: positions at paragraph / sentence / word / character precision,
//!   harmonized to a common precision before comparison
//! - **Navigation Engine**: sentence, word, punctuation and paragraph stepping, range moves and
//!   expansion, optionally skipping empty paragraphs
//! - **Selection State Machine**: keyboard and pointer input reduced into immutable cursor states
//! - **Flat-Text Round Trip**: serialization with selection offsets and the reverse mapping
//! - **State Tracking**: Version number mechanism and Change Notifications system
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Command Interface & State Management       │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Cursor State Machine + Keymap + Edit Mode  │  ← Interaction
//! ├─────────────────────────────────────────────┤
//! │  Navigation Engine + Word Layout Registry   │  ← Movement
//! ├─────────────────────────────────────────────┤
//! │  Positions, Selection Ranges, Conversion    │  ← Addressing
//! ├─────────────────────────────────────────────┤
//! │  Document Model + Segmenter                 │  ← Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Using Command Interface
//!
//! ```rust
//! use prompt_editor_core::{
//!     Command, CommandExecutor, NavigationCommand, SelectionRange, WordPosition,
//! };
//!
//! let mut executor = CommandExecutor::new("Summarize the text. Answer {QUESTION} briefly.");
//!
//! executor
//!     .execute_batch(vec![
//!         Command::Navigate(NavigationCommand::MoveDown),
//!         Command::Navigate(NavigationCommand::MoveDown),
//!         Command::Navigate(NavigationCommand::MoveLeft),
//!         Command::Navigate(NavigationCommand::MoveRight),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(
//!     executor.editor().selection_range(),
//!     Some(&SelectionRange::collapsed(WordPosition::new(0, 1, 1).into()))
//! );
//! ```
//!
//! ## Using State Management
//!
//! ```rust
//! use prompt_editor_core::{EditorStateManager, StateChangeType};
//!
//! let mut manager = EditorStateManager::new("Initial text.");
//!
//! // Subscribe to state changes
//! manager.subscribe(|change| {
//!     println!("State changed: {:?}", change.change_type);
//! });
//!
//! // Query state
//! let doc_state = manager.get_document_state();
//! println!("Sentences: {}, Words: {}", doc_state.sentence_count, doc_state.word_count);
//! ```
//!
//! # Module Description
//!
//! - [`document`] - Document tree and its mutators
//! - [`text`] - Segmentation of flat text into documents
//! - [`position`] - Block positions and precision harmonization
//! - [`selection`] - Selection ranges and containment
//! - [`navigation`] - Structural navigation
//! - [`convert`] - Document ↔ flat text with selection offsets
//! - [`layout`] - Visual word position registry
//! - [`cursor`] - Cursor / selection state machine
//! - [`keymap`] - Default key bindings
//! - [`edit_session`] - Flat-text edit mode
//! - [`commands`] - Unified command interface
//! - [`state`] - State management and query interface
//!
//! # Unicode Support
//!
//! - All flat-text offsets are Unicode scalar (char) offsets
//! - Character positions inside words count grapheme clusters

pub mod commands;
pub mod convert;
pub mod cursor;
pub mod document;
pub mod edit_session;
pub mod error;
pub mod keymap;
pub mod layout;
pub mod navigation;
pub mod position;
pub mod selection;
pub mod state;
pub mod text;

pub use commands::{
    Command, CommandError, CommandExecutor, CommandResult, ConfigCommand, CursorCommand,
    DocumentCommand, EditModeCommand, EditorCore, EditorOptions,
};
pub use convert::{
    SerializedDocument, convert_document_to_string, serialize, word_position_from_raw_text_selection,
};
pub use cursor::{
    CursorState, Effect, InputEvent, InputMode, NavigationCommand, NavigationContext, Transition,
};
pub use document::{Document, Insertion, Paragraph, Sentence, Token};
pub use edit_session::{EditSession, EditorMode};
pub use error::EditorError;
pub use keymap::{Key, Modifiers};
pub use layout::{VisualPosition, WordInfo, WordLayout, WordPositionRegistry};
pub use navigation::Rounding;
pub use position::{
    BlockPosition, CharacterPosition, Harmonized, ParagraphPosition, Precision, SentencePosition,
    WordPosition, harmonize, is_equal_position, match_precision,
};
pub use selection::{SelectionRange, is_inside_selection_range};
pub use state::{
    DocumentState, EditorState, EditorStateManager, ModeState, SelectionState, StateChange,
    StateChangeCallback, StateChangeType,
};
pub use text::{PunctuationClass, Segmenter, TokenSpan};

pub use prompt_editor_lang::{PunctuationConfig, SegmentationConfig, VariableDelimiters};
