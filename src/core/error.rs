//! # Board Errors
//!
//! Everything the board model can fail with. Rejected moves are not in here:
//! `Board::move_task` reports those with a plain `false`.

use std::fmt;

#[derive(Debug)]
pub enum BoardError {
    /// The board file exists but is not valid board markdown.
    /// `line` is 1-based; `None` means the problem is the document as a whole.
    FileFormat { line: Option<usize>, reason: String },
    /// A column or task index that does not exist in the current state.
    /// `task` is `None` when only a column was addressed.
    CoordinateOutOfRange { column: usize, task: Option<usize> },
    /// Reading or writing the board file failed.
    Io(std::io::Error),
}

impl BoardError {
    pub(crate) fn format_at(line: usize, reason: impl Into<String>) -> Self {
        BoardError::FileFormat {
            line: Some(line),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::FileFormat {
                line: Some(line),
                reason,
            } => write!(f, "board format error on line {line}: {reason}"),
            BoardError::FileFormat { line: None, reason } => {
                write!(f, "board format error: {reason}")
            }
            BoardError::CoordinateOutOfRange { column, task: None } => {
                write!(f, "column {column} is out of range")
            }
            BoardError::CoordinateOutOfRange {
                column,
                task: Some(task),
            } => write!(f, "task {task} in column {column} is out of range"),
            BoardError::Io(e) => write!(f, "board I/O error: {e}"),
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BoardError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        BoardError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
