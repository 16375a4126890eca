//! Fixed replies for an agent's first two moves

use crate::grid::{Cell, Grid, Piece};
use crate::HEIGHT;

/// The centre column
pub const CENTER_COLUMN: usize = 4;

/// The last overall move that can still be an agent's second move
const SECOND_MOVE_MAX_PLY: usize = 3;

/// Returns the book column for `piece`, or `None` once the book is exhausted
///
/// The first move always takes the centre. The second move stacks on the
/// centre if the opponent holds its floor cell, otherwise it answers a
/// column 3 reply with column 5 and anything else with column 3.
pub fn book_move(grid: &Grid, piece: Piece) -> Option<usize> {
    let column = match grid.count(piece) {
        0 => CENTER_COLUMN,
        1 if grid.move_count() <= SECOND_MOVE_MAX_PLY => {
            let floor_center = grid.cell(HEIGHT - 1, CENTER_COLUMN - 1);
            if floor_center == Cell::Occupied(piece.opponent()) {
                CENTER_COLUMN
            } else {
                match grid.last_move() {
                    Some(last) if last.piece != piece && last.column == 3 => 5,
                    _ => 3,
                }
            }
        }
        _ => return None,
    };
    // hand-built boards can have the book column already full
    Some(column).filter(|&column| grid.is_legal_move(column))
}
