//! Error taxonomy shared by the document model, the position algebra and the navigation layer.
//!
//! "No further position" (document start/end) is **not** an error: navigation returns
//! `Option::None` for that. The variants below indicate caller misuse or an intentionally
//! unsupported operation.

use crate::position::Precision;
use thiserror::Error;

/// Errors produced by `prompt-editor-core`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("{level} index {index} out of bounds (len {len})")]
    /// An index addressing a paragraph / sentence / word / character does not exist.
    IndexOutOfBounds {
        /// The hierarchy level the index addresses.
        level: Precision,
        /// The offending index.
        index: usize,
        /// Number of elements at that level.
        len: usize,
    },

    #[error("offset {offset} out of bounds for text of {len} characters")]
    /// A flat-text character offset lies beyond the end of the text.
    OffsetOutOfBounds {
        /// The offending character offset.
        offset: usize,
        /// Length of the text in characters.
        len: usize,
    },

    #[error("{operation} is not supported at {precision} precision")]
    /// A precision-dispatched operation was invoked for a branch it does not implement.
    UnsupportedPrecision {
        /// Name of the operation.
        operation: &'static str,
        /// The harmonized precision that was requested.
        precision: Precision,
    },

    #[error("invalid segmentation config: {0}")]
    /// Segmentation rules could not be compiled.
    InvalidConfig(String),
}

impl EditorError {
    pub(crate) fn out_of_bounds(level: Precision, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { level, index, len }
    }

    pub(crate) fn unsupported(operation: &'static str, precision: Precision) -> Self {
        Self::UnsupportedPrecision {
            operation,
            precision,
        }
    }
}
