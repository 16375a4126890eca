use std::fmt;

use crate::error::{Error, InvalidMoveReason, Result};
use crate::{CONNECT, HEIGHT, WIDTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Piece {
    One,
    Two,
}

impl Piece {
    pub fn opponent(self) -> Self {
        match self {
            Piece::One => Piece::Two,
            Piece::Two => Piece::One,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Piece::One => 'X',
            Piece::Two => 'O',
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    Occupied(Piece),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn holds(&self, piece: Piece) -> bool {
        *self == Cell::Occupied(piece)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    Playing,
    Won(Piece),
    Draw,
}

/// The most recent drop on a `Grid`
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LastMove {
    /// 1-indexed column
    pub column: usize,
    pub piece: Piece,
}

/// Row and column steps of the four line orientations: horizontal, vertical,
/// the descending diagonal and the ascending diagonal
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A 6x7 Connect 4 board with gravity
///
/// Columns are 1-indexed wherever a move is made or reported (`drop`,
/// `is_legal_move`, `last_move`); cell coordinates are 0-indexed `(row, col)`
/// with row 0 at the top of the board and row `HEIGHT - 1` on the floor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    cells: [[Cell; WIDTH]; HEIGHT], // rows are stored top-to-bottom
    move_count: usize,
    last_move: Option<LastMove>,
    winner: Option<Piece>,
    full: bool,
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
            move_count: 0,
            last_move: None,
            winner: None,
            full: false,
        }
    }

    /// Builds a board from a string of 1-indexed columns, alternating pieces
    /// starting with `first`
    pub fn from_moves<S: AsRef<str>>(moves: S, first: Piece) -> Result<Self> {
        let mut grid = Self::new();
        let mut piece = first;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10) {
                Some(column) => {
                    grid.drop(column as usize, piece)?;
                    piece = piece.opponent();
                }
                None => {
                    return Err(Error::InvalidMoveString {
                        character: column_char,
                    })
                }
            }
        }
        Ok(grid)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_legal_move(&self, column: usize) -> bool {
        (1..=WIDTH).contains(&column) && self.cells[0][column - 1].is_empty()
    }

    /// All legal columns in ascending order
    pub fn legal_moves(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=WIDTH).filter(move |&column| self.is_legal_move(column))
    }

    /// Drops `piece` into the 1-indexed `column`
    ///
    /// An illegal column is rejected without touching the board.
    pub fn drop(&mut self, column: usize, piece: Piece) -> Result<Status> {
        if !(1..=WIDTH).contains(&column) {
            return Err(Error::InvalidMove {
                column,
                reason: InvalidMoveReason::OutOfRange,
            });
        }
        let row = self
            .lowest_empty_row(column - 1)
            .ok_or(Error::InvalidMove {
                column,
                reason: InvalidMoveReason::ColumnFull,
            })?;

        self.cells[row][column - 1] = Cell::Occupied(piece);
        self.move_count += 1;
        self.last_move = Some(LastMove { column, piece });

        self.detect_win(piece);
        self.detect_full();

        Ok(self.status())
    }

    /// Checks the whole board for a line of `piece`, recording it as the
    /// winner if one is found
    pub fn detect_win(&mut self, piece: Piece) -> bool {
        let won = self.has_four(piece);
        if won && self.winner.is_none() {
            self.winner = Some(piece);
        }
        won
    }

    pub fn detect_full(&mut self) -> bool {
        self.full = self.cells[0].iter().all(|cell| !cell.is_empty());
        self.full
    }

    /// Exhaustively scans every orientation for `CONNECT` aligned tiles of `piece`
    pub fn has_four(&self, piece: Piece) -> bool {
        for row in 0..HEIGHT as isize {
            for col in 0..WIDTH as isize {
                for &(d_row, d_col) in DIRECTIONS.iter() {
                    let aligned = (0..CONNECT as isize).all(|k| {
                        self.cell_at(row + k * d_row, col + k * d_col)
                            .map_or(false, |cell| cell.holds(piece))
                    });
                    if aligned {
                        return true;
                    }
                }
            }
        }
        false
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Bounds-checked cell lookup for signed coordinates
    pub fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 || row >= HEIGHT as isize || col >= WIDTH as isize {
            return None;
        }
        Some(self.cells[row as usize][col as usize])
    }

    /// The row the next piece dropped into `col` would land on
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        (0..HEIGHT).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// The row of the topmost piece in `col`
    pub fn top_piece_row(&self, col: usize) -> Option<usize> {
        (0..HEIGHT).find(|&row| !self.cells[row][col].is_empty())
    }

    /// True if a piece dropped into `col` would land exactly on `row`
    pub fn is_playable_cell(&self, row: usize, col: usize) -> bool {
        self.lowest_empty_row(col) == Some(row)
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.holds(piece))
            .count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell; WIDTH]> {
        self.cells.iter()
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn winner(&self) -> Option<Piece> {
        self.winner
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.full
    }

    pub fn status(&self) -> Status {
        match self.winner {
            Some(piece) => Status::Won(piece),
            None if self.full => Status::Draw,
            None => Status::Playing,
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => '_',
                    Cell::Occupied(piece) => piece.symbol(),
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        write!(f, "{}", cols)
    }
}
