//! Depth-limited minimax search with alpha-beta pruning

use tracing::{debug, trace};

use crate::agent::{root_decision, Agent};
use crate::error::{Error, Result};
use crate::evaluator::{Evaluator, MAX_UTILITY};
use crate::grid::{Grid, Piece};
use crate::node::{NodeId, SearchTree};
use crate::{MAX_DEPTH, WIDTH};

/// The search depth used unless configured otherwise
pub const DEFAULT_DEPTH: usize = 5;

/// Upper bound on the nodes a search of `depth` plies can create, root included
///
/// At most `7^depth` of them sit on the frontier, so a search at `MAX_DEPTH`
/// evaluates no more than 16807 leaves before pruning.
pub const fn max_nodes(depth: usize) -> usize {
    let mut total = 0;
    let mut level = 1;
    let mut ply = 0;
    while ply <= depth {
        total += level;
        level *= WIDTH;
        ply += 1;
    }
    total
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SearchConfig {
    depth: usize,
    pruning: bool,
}

impl SearchConfig {
    /// Creates a config with alpha-beta pruning enabled
    pub fn new(depth: usize) -> Result<Self> {
        if !(1..=MAX_DEPTH).contains(&depth) {
            return Err(Error::InvalidDepth { depth });
        }
        Ok(Self {
            depth,
            pruning: true,
        })
    }

    /// Turns pruning on or off; the chosen column is the same either way
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn pruning(&self) -> bool {
        self.pruning
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            pruning: true,
        }
    }
}

/// The result of a full tree search from the root
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// 1-indexed column to play
    pub column: usize,
    /// Backed-up minimax value of `column`
    pub value: f64,
    /// Columns of the principal variation, starting with `column`
    pub line: Vec<usize>,
    /// Nodes created by the search, root included
    pub nodes: usize,
}

/// The value of a subtree, with the child that achieves it and the leaf at
/// the end of its principal variation
struct Outcome {
    value: f64,
    choice: NodeId,
    leaf: NodeId,
}

/// An agent choosing moves with minimax search
#[derive(Clone, Debug)]
pub struct MinimaxAgent {
    piece: Piece,
    config: SearchConfig,
    evaluator: Evaluator,

    /// The number of nodes created by the last search (for diagnostics only)
    pub node_count: usize,
}

impl MinimaxAgent {
    /// Creates an agent playing `piece` with the default config
    pub fn new(piece: Piece) -> Self {
        Self::with_config(piece, SearchConfig::default())
    }

    pub fn with_config(piece: Piece, config: SearchConfig) -> Self {
        Self {
            piece,
            config,
            evaluator: Evaluator::new(piece),
            node_count: 0,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Searches `grid` to the configured depth, skipping the opening book and
    /// the root tactics
    pub fn search(&mut self, grid: &Grid) -> Result<SearchResult> {
        if grid.is_over() {
            return Err(Error::SearchOnTerminalState);
        }

        let mut tree = SearchTree::new(grid.clone());
        let root = tree.root();

        let outcome = self.minimax(
            &mut tree,
            root,
            self.config.depth,
            -MAX_UTILITY,
            MAX_UTILITY,
            true,
        );

        self.node_count = tree.node_count();
        debug_assert!(self.node_count <= max_nodes(self.config.depth));

        // the root is never a leaf here, so the choice is always a child
        let column = tree
            .get(outcome.choice)
            .last_move()
            .ok_or(Error::SearchOnTerminalState)?;

        Ok(SearchResult {
            column,
            value: outcome.value,
            line: tree.line(outcome.leaf),
            nodes: self.node_count,
        })
    }

    /// Performs game tree search below `id`
    ///
    /// Children are visited in column order and only a strictly better value
    /// replaces the current best, so ties go to the lower column. With
    /// pruning enabled the remaining children are skipped once `alpha >= beta`.
    fn minimax(
        &mut self,
        tree: &mut SearchTree,
        id: NodeId,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> Outcome {
        if depth == 0 || tree.get(id).is_leaf() {
            return self.evaluate(tree, id);
        }

        // the agent moves on maximizing plies
        let piece = if maximizing {
            self.piece
        } else {
            self.piece.opponent()
        };
        let children = tree.expand(id, piece, depth - 1);

        let mut best: Option<Outcome> = None;
        for child in children {
            let result = self.minimax(tree, child, depth - 1, alpha, beta, !maximizing);

            let improves = match &best {
                None => true,
                Some(current) if maximizing => result.value > current.value,
                Some(current) => result.value < current.value,
            };
            if improves {
                best = Some(Outcome {
                    value: result.value,
                    choice: child,
                    leaf: result.leaf,
                });
            }

            if self.config.pruning {
                let best_value = best.as_ref().map_or(result.value, |b| b.value);
                if maximizing {
                    alpha = alpha.max(best_value);
                } else {
                    beta = beta.min(best_value);
                }
                if alpha >= beta {
                    trace!(depth, alpha, beta, "pruned remaining children");
                    break;
                }
            }
        }

        // no legal moves: the node stands for itself
        match best {
            Some(outcome) => outcome,
            None => self.evaluate(tree, id),
        }
    }

    fn evaluate(&self, tree: &SearchTree, id: NodeId) -> Outcome {
        Outcome {
            value: tree.get(id).utility(&self.evaluator),
            choice: id,
            leaf: id,
        }
    }
}

impl Agent for MinimaxAgent {
    fn piece(&self) -> Piece {
        self.piece
    }

    fn choose_move(&mut self, grid: &Grid) -> Result<usize> {
        if grid.is_over() {
            return Err(Error::SearchOnTerminalState);
        }
        if let Some(decision) = root_decision(grid, &self.evaluator) {
            self.node_count = 0;
            return Ok(decision.column());
        }

        let result = self.search(grid)?;
        debug!(
            piece = ?self.piece,
            column = result.column,
            value = result.value,
            line = ?result.line,
            nodes = result.nodes,
            "minimax search complete"
        );
        Ok(result.column)
    }
}
