//! Error types for the automaton engine.

use thiserror::Error;

/// Result type alias for automaton operations.
pub type AutomatonResult<T> = Result<T, AutomatonError>;

/// Errors that can occur during automaton operations.
#[derive(Debug, Error)]
pub enum AutomatonError {
    /// A coordinate falls outside the stored grid (or is negative).
    #[error("coordinate ({x}, {y}) out of range for {width}x{height} grid")]
    OutOfRange {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    /// A shape or margin is invalid (negative margin, ragged rows, size overflow).
    #[error("invalid dimensions: {message}")]
    InvalidDimensions { message: String },

    /// A raw value does not name a state of the rule set.
    #[error("invalid cell state: {value}")]
    InvalidState { value: u8 },

    /// A persisted grid could not be decoded.
    #[error("corrupt grid file: {message}")]
    CorruptFile { message: String },

    /// I/O error (file operations).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl AutomatonError {
    pub(crate) fn invalid_dimensions(message: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            message: message.into(),
        }
    }

    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptFile {
            message: message.into(),
        }
    }
}
