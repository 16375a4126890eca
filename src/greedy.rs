//! A one-ply agent with deliberate noise in its choice

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::agent::{root_decision, Agent};
use crate::error::{Error, Result};
use crate::evaluator::{Evaluator, MAX_UTILITY};
use crate::grid::{Grid, Piece};
use crate::node::SearchTree;

/// A child scoring at least this fraction of the best utility so far may
/// replace it at random
pub const NOISE_TOLERANCE: f64 = 0.65;

/// Chance that a child within tolerance replaces the best so far
pub const NOISE_PROBABILITY: f64 = 0.5;

/// An agent that evaluates each legal move one ply deep and picks a good,
/// but not always the best, one
///
/// Randomness comes from the injected `rng`, so a seeded or mock generator
/// makes its choices reproducible.
#[derive(Clone, Debug)]
pub struct GreedyAgent<R: Rng = ChaCha8Rng> {
    piece: Piece,
    evaluator: Evaluator,
    rng: R,
}

impl GreedyAgent<ChaCha8Rng> {
    pub fn seeded(piece: Piece, seed: u64) -> Self {
        Self::with_rng(piece, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> GreedyAgent<R> {
    pub fn with_rng(piece: Piece, rng: R) -> Self {
        Self {
            piece,
            evaluator: Evaluator::new(piece),
            rng,
        }
    }

    /// Evaluates every child of `grid` and picks one
    ///
    /// One uniform draw is made per child. A child is adopted if it is
    /// strictly better than the best so far, or if it reaches
    /// `NOISE_TOLERANCE` of the best so far and its draw is below
    /// `NOISE_PROBABILITY`. If every child is vetoed the first one is played.
    pub fn greedy_choice(&mut self, grid: &Grid) -> Result<usize> {
        if grid.is_over() {
            return Err(Error::SearchOnTerminalState);
        }

        let mut tree = SearchTree::new(grid.clone());
        let root = tree.root();
        let children = tree.expand(root, self.piece, 0);

        let mut best: Option<(usize, f64)> = None;
        for &child in children.iter() {
            let node = tree.get(child);
            let utility = node.utility(&self.evaluator);
            let max_utility = best.map_or(-MAX_UTILITY, |(_, best_utility)| best_utility);

            let draw: f64 = self.rng.gen();
            let near_best = utility >= NOISE_TOLERANCE * max_utility && draw < NOISE_PROBABILITY;
            if near_best || utility > max_utility {
                if let Some(column) = node.last_move() {
                    best = Some((column, utility));
                }
            }
        }

        let column = match best {
            Some((column, _)) => Some(column),
            None => children
                .first()
                .and_then(|&child| tree.get(child).last_move()),
        };
        column.ok_or(Error::SearchOnTerminalState)
    }
}

impl<R: Rng> Agent for GreedyAgent<R> {
    fn piece(&self) -> Piece {
        self.piece
    }

    fn choose_move(&mut self, grid: &Grid) -> Result<usize> {
        if grid.is_over() {
            return Err(Error::SearchOnTerminalState);
        }
        if let Some(decision) = root_decision(grid, &self.evaluator) {
            return Ok(decision.column());
        }

        let column = self.greedy_choice(grid)?;
        debug!(piece = ?self.piece, column, "greedy choice");
        Ok(column)
    }
}
