//! A game tree agent for playing the board game 'Connect 4'
//!
//! Two agents are provided: a depth-limited minimax search with alpha-beta
//! pruning, and a one-ply greedy agent with a controlled amount of noise.
//! Both share the same positional heuristic, a small opening book and the
//! tactical checks for immediate wins and forced blocks.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{Agent, Grid, MinimaxAgent, Piece};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut grid = Grid::from_moves("3", Piece::One)?;
//! let mut agent = MinimaxAgent::new(Piece::Two);
//! let column = agent.choose_and_apply(&mut grid)?;
//!
//! assert_eq!(column, 4);
//! assert_eq!(grid.move_count(), 2);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;

pub mod error;

pub mod grid;

pub mod evaluator;

pub mod node;

pub mod opening_book;

pub mod agent;

pub mod search;

pub mod greedy;


pub use agent::Agent;
pub use error::{Error, Result};
pub use greedy::GreedyAgent;
pub use grid::{Cell, Grid, Piece, Status};
pub use search::{MinimaxAgent, SearchConfig};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win
pub const CONNECT: usize = 4;

/// The deepest search a `SearchConfig` accepts
pub const MAX_DEPTH: usize = 5;

// a line of CONNECT tiles must fit in every orientation
const_assert!(CONNECT <= WIDTH && CONNECT <= HEIGHT);
// columns are written as single digits in move strings
const_assert!(WIDTH <= 9);
