use tracing::debug;

use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::grid::{Grid, Piece};
use crate::opening_book::book_move;

/// A player that picks columns for one piece
pub trait Agent {
    /// The piece this agent plays
    fn piece(&self) -> Piece;

    /// Chooses a 1-indexed column to play on `grid` without modifying it
    fn choose_move(&mut self, grid: &Grid) -> Result<usize>;

    /// Chooses a column and drops the agent's piece into it
    fn choose_and_apply(&mut self, grid: &mut Grid) -> Result<usize> {
        let column = self.choose_move(grid)?;
        grid.drop(column, self.piece())?;
        Ok(column)
    }
}

/// A move decided at the root without searching
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RootDecision {
    /// Completes a line for the agent
    Win { column: usize },
    /// Stops a line the opponent would complete next turn
    Block { column: usize },
    Opening { column: usize },
}

impl RootDecision {
    pub fn column(self) -> usize {
        match self {
            RootDecision::Win { column }
            | RootDecision::Block { column }
            | RootDecision::Opening { column } => column,
        }
    }
}

/// Checks for an immediate win, a forced block and the opening book, in
/// that order
pub fn root_decision(grid: &Grid, evaluator: &Evaluator) -> Option<RootDecision> {
    let decision = if let Some(column) = evaluator.winning_move(grid) {
        RootDecision::Win { column }
    } else if let Some(column) = evaluator.immediate_threat(grid).column() {
        RootDecision::Block { column }
    } else {
        RootDecision::Opening {
            column: book_move(grid, evaluator.agent())?,
        }
    };
    debug!(piece = ?evaluator.agent(), ?decision, "root decision without search");
    Some(decision)
}
