//! Game tree nodes, stored in a per-search arena
//!
//! A tree is built from scratch for every move and dropped once a column has
//! been chosen. Nodes are referenced by `NodeId` indices into the arena so
//! that children can point back to their parent.

use std::cell::OnceCell;

use crate::evaluator::{is_terminal, Evaluator};
use crate::grid::{Grid, Piece};

/// Index into the node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct SearchNode {
    grid: Grid,
    /// 1-indexed column that produced this node, `None` for the root
    last_move: Option<usize>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    leaf: bool,
    expanded: bool,
    utility: OnceCell<f64>,
}

impl SearchNode {
    fn root(grid: Grid) -> Self {
        let leaf = is_terminal(&grid);
        Self {
            grid,
            last_move: None,
            parent: None,
            children: Vec::new(),
            leaf,
            expanded: false,
            utility: OnceCell::new(),
        }
    }

    fn child(grid: Grid, column: usize, parent: NodeId, depth_exhausted: bool) -> Self {
        let leaf = depth_exhausted || is_terminal(&grid);
        Self {
            grid,
            last_move: Some(column),
            parent: Some(parent),
            children: Vec::new(),
            leaf,
            expanded: false,
            utility: OnceCell::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// Evaluates the node on first use and caches the result
    pub fn utility(&self, evaluator: &Evaluator) -> f64 {
        *self
            .utility
            .get_or_init(|| evaluator.utility(&self.grid, self.last_move))
    }
}

#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new(grid: Grid) -> Self {
        Self {
            nodes: vec![SearchNode::root(grid)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// The number of nodes created so far, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Creates one child per legal column, in column order, with `piece`
    /// dropped into it
    ///
    /// Children created with `child_depth == 0` are leaves. Leaves are never
    /// expanded, and a node is only expanded once.
    pub fn expand(&mut self, id: NodeId, piece: Piece, child_depth: usize) -> Vec<NodeId> {
        let node = self.get(id);
        if node.leaf || node.expanded {
            return node.children.clone();
        }

        let mut children = Vec::new();
        for column in node.grid.legal_moves() {
            let mut grid = node.grid.clone();
            if grid.drop(column, piece).is_ok() {
                children.push(SearchNode::child(grid, column, id, child_depth == 0));
            }
        }

        let mut ids = Vec::with_capacity(children.len());
        for child in children {
            ids.push(NodeId(self.nodes.len()));
            self.nodes.push(child);
        }

        let node = &mut self.nodes[id.0];
        node.children = ids.clone();
        node.expanded = true;
        ids
    }

    /// The columns played from the root down to `id`
    pub fn line(&self, id: NodeId) -> Vec<usize> {
        let mut line = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            line.extend(node.last_move());
            current = node.parent();
        }
        line.reverse();
        line
    }
}
