//! Error types for the engine

use std::fmt;

use thiserror::Error;

use crate::{MAX_DEPTH, WIDTH};

/// Why a column was rejected by `Grid::drop`
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InvalidMoveReason {
    OutOfRange,
    ColumnFull,
}

impl fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMoveReason::OutOfRange => write!(
                f,
                "out of range. Columns must be between 1 and {}",
                WIDTH
            ),
            InvalidMoveReason::ColumnFull => write!(f, "full"),
        }
    }
}

#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("Invalid move, column {column} {reason}")]
    InvalidMove {
        column: usize,
        reason: InvalidMoveReason,
    },

    #[error("cannot search a position where the game is already over")]
    SearchOnTerminalState,

    #[error("search depth {depth} is out of range (1-{max})", max = MAX_DEPTH)]
    InvalidDepth { depth: usize },

    #[error("could not parse '{character}' as a valid move")]
    InvalidMoveString { character: char },
}

pub type Result<T> = std::result::Result<T, Error>;
