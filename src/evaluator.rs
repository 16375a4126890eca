//! Positional heuristic and tactical threat detection
//!
//! Every score is taken from the perspective of a fixed agent piece. Window
//! scans report a `Threat` as part of their result instead of recording it
//! anywhere, so scans can run in any order.

use crate::grid::{Cell, Grid, Piece, DIRECTIONS};
use crate::CONNECT;

/// Utility of a won position; a lost position scores the negation
pub const MAX_UTILITY: f64 = 100_000.0;

// window scoring
const PIECE_WEIGHT: f64 = 3.0;
const EMPTY_WEIGHT: f64 = 0.1;
const OPPONENT_PENALTY: f64 = 3.0;

// neighbourhood scoring
const NEIGHBORHOOD_BASE: f64 = 10.0;
const ADJACENT_PIECE: f64 = 5.0;
const ADJACENT_EMPTY: f64 = 0.5;
const ADJACENT_OPPONENT: f64 = 5.0;
const OUTER_EMPTY: f64 = 0.2;
const OUTER_OPPONENT: f64 = 3.0;
const OUTER_PIECE_BASE: f64 = 3.0;
const NEIGHBORHOOD_RADIUS: isize = 2;

/// The outcome of looking for a line the opponent can complete next turn
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Threat {
    Clear,
    /// The 1-indexed column that has to be played to stop the line
    Block { column: usize },
}

impl Threat {
    pub fn column(self) -> Option<usize> {
        match self {
            Threat::Clear => None,
            Threat::Block { column } => Some(column),
        }
    }

    /// Keeps the first threat found
    fn or(self, other: Threat) -> Threat {
        match self {
            Threat::Clear => other,
            found => found,
        }
    }
}

/// Score and threat of every window through one cell in one orientation
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineScan {
    pub score: f64,
    pub threat: Threat,
}

/// Scores all windows of `CONNECT` cells containing `(row, col)` along
/// `direction` for `piece`
///
/// Windows clipped by the board edge are skipped. A window holding
/// `CONNECT - 1` pieces and one empty cell is a threat if that empty cell can
/// be played on the next move.
pub fn scan_line(
    grid: &Grid,
    row: usize,
    col: usize,
    piece: Piece,
    direction: (isize, isize),
) -> LineScan {
    let (d_row, d_col) = direction;
    let mut scan = LineScan {
        score: 0.0,
        threat: Threat::Clear,
    };

    for offset in 0..CONNECT as isize {
        let start_row = row as isize - offset * d_row;
        let start_col = col as isize - offset * d_col;

        let mut window = [(0, 0, Cell::Empty); CONNECT];
        let mut in_bounds = true;
        for (k, slot) in window.iter_mut().enumerate() {
            let (r, c) = (start_row + k as isize * d_row, start_col + k as isize * d_col);
            match grid.cell_at(r, c) {
                Some(cell) => *slot = (r as usize, c as usize, cell),
                None => {
                    in_bounds = false;
                    break;
                }
            }
        }
        if !in_bounds {
            continue;
        }

        let mut pieces = 0;
        let mut empties = 0;
        let mut gap = None;
        for &(r, c, cell) in window.iter() {
            match cell {
                Cell::Occupied(p) if p == piece => {
                    pieces += 1;
                    scan.score += PIECE_WEIGHT * pieces as f64;
                }
                Cell::Empty => {
                    empties += 1;
                    gap = Some((r, c));
                    scan.score += EMPTY_WEIGHT;
                }
                Cell::Occupied(_) => scan.score -= OPPONENT_PENALTY,
            }
        }

        if pieces == CONNECT - 1 && empties == 1 {
            if let Some((r, c)) = gap {
                if grid.is_playable_cell(r, c) {
                    scan.threat = scan.threat.or(Threat::Block { column: c + 1 });
                }
            }
        }
    }
    scan
}

/// Runs the window scan in all four orientations from one cell and returns
/// the first threat found
pub fn scan_threats(grid: &Grid, row: usize, col: usize, piece: Piece) -> Threat {
    DIRECTIONS.iter().fold(Threat::Clear, |threat, &direction| {
        threat.or(scan_line(grid, row, col, piece, direction).threat)
    })
}

/// Scores the 5x5 neighbourhood centred on `(row, col)` for `piece`
pub fn neighborhood_score(grid: &Grid, row: usize, col: usize, piece: Piece) -> f64 {
    let (row, col) = (row as isize, col as isize);
    let mut score = NEIGHBORHOOD_BASE;

    for d_row in -NEIGHBORHOOD_RADIUS..=NEIGHBORHOOD_RADIUS {
        for d_col in -NEIGHBORHOOD_RADIUS..=NEIGHBORHOOD_RADIUS {
            if d_row == 0 && d_col == 0 {
                continue;
            }
            let cell = match grid.cell_at(row + d_row, col + d_col) {
                Some(cell) => cell,
                None => continue,
            };
            let adjacent = d_row.abs() <= 1 && d_col.abs() <= 1;

            score += match cell {
                Cell::Occupied(p) if p == piece => {
                    if adjacent {
                        ADJACENT_PIECE
                    } else {
                        OUTER_PIECE_BASE.powi(connections(grid, row, col, d_row, d_col, piece))
                    }
                }
                Cell::Empty if adjacent => ADJACENT_EMPTY,
                Cell::Empty => OUTER_EMPTY,
                Cell::Occupied(_) if adjacent => -ADJACENT_OPPONENT,
                Cell::Occupied(_) => -OUTER_OPPONENT,
            };
        }
    }
    score
}

/// 2 if the cell between the centre and an outer cell on the same line also
/// holds `piece`, otherwise 1
fn connections(
    grid: &Grid,
    row: isize,
    col: isize,
    d_row: isize,
    d_col: isize,
    piece: Piece,
) -> i32 {
    let on_line = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
    if !on_line {
        return 1;
    }
    let connector = grid.cell_at(row + d_row - d_row.signum(), col + d_col - d_col.signum());
    match connector {
        Some(cell) if cell.holds(piece) => 2,
        _ => 1,
    }
}

/// Terminal if either side has a line or no move is left
pub fn is_terminal(grid: &Grid) -> bool {
    grid.has_four(Piece::One) || grid.has_four(Piece::Two) || grid.is_full()
}

#[derive(Copy, Clone, Debug)]
pub struct Evaluator {
    agent: Piece,
}

impl Evaluator {
    pub fn new(agent: Piece) -> Self {
        Self { agent }
    }

    pub fn agent(&self) -> Piece {
        self.agent
    }

    pub fn opponent(&self) -> Piece {
        self.agent.opponent()
    }

    /// Utility of `grid` for the agent, where `last_move` is the 1-indexed
    /// column of the move that produced it
    pub fn utility(&self, grid: &Grid, last_move: Option<usize>) -> f64 {
        if grid.has_four(self.agent) {
            return MAX_UTILITY;
        }
        if grid.has_four(self.opponent()) {
            return -MAX_UTILITY;
        }

        // a move that hands the opponent a win is vetoed outright
        if let Some(column) = last_move {
            if let Threat::Block { .. } = self.pre_win_threat(grid, column) {
                return -MAX_UTILITY;
            }
        }

        self.positional_score(grid)
    }

    /// Sum of the vertical, horizontal, diagonal and neighbourhood scores of
    /// every agent piece
    pub fn positional_score(&self, grid: &Grid) -> f64 {
        let mut utility = 0.0;
        for (row, cells) in grid.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if !cell.holds(self.agent) {
                    continue;
                }
                let lines: f64 = DIRECTIONS
                    .iter()
                    .map(|&direction| scan_line(grid, row, col, self.agent, direction).score)
                    .sum();
                utility += lines + neighborhood_score(grid, row, col, self.agent);
            }
        }
        utility
    }

    /// Looks for an opponent line completed by the cell just above the move
    /// played in the 1-indexed `column`
    pub fn pre_win_threat(&self, grid: &Grid, column: usize) -> Threat {
        let col = column - 1;
        match grid.lowest_empty_row(col) {
            Some(row) => scan_threats(grid, row, col, self.opponent()),
            None => Threat::Clear,
        }
    }

    /// Looks for a line the opponent can complete next turn through the
    /// piece they just played
    pub fn immediate_threat(&self, grid: &Grid) -> Threat {
        let last = match grid.last_move() {
            Some(last) if last.piece == self.opponent() => last,
            _ => return Threat::Clear,
        };
        let col = last.column - 1;
        match grid.top_piece_row(col) {
            Some(row) => scan_threats(grid, row, col, self.opponent()),
            None => Threat::Clear,
        }
    }

    /// The first column that completes a line for the agent right now
    pub fn winning_move(&self, grid: &Grid) -> Option<usize> {
        grid.legal_moves().find(|&column| {
            let mut next = grid.clone();
            next.drop(column, self.agent).is_ok() && next.has_four(self.agent)
        })
    }
}
