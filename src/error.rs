//! Error types for the record engine.
//!
//! Most engine operations degrade instead of failing; these variants are what
//! the strict entry points report and what the tolerant ones log.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum KifuError {
    #[error("malformed coordinate '{coord}'")]
    MalformedCoordinate { coord: String },

    #[error("property value opened at byte {offset} is never closed")]
    UnterminatedValue { offset: usize },

    #[error("{depth} game tree(s) left open at end of input")]
    UnclosedTree { depth: usize },

    #[error("unexpected ')' at byte {offset}")]
    UnexpectedClose { offset: usize },

    #[error("record contains no game tree")]
    EmptyInput,

    #[error("malformed board size '{value}'")]
    MalformedBoardSize { value: String },

    #[error("board size {size} is outside {min}..={max}")]
    BoardSizeOutOfRange { size: usize, min: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, KifuError>;
