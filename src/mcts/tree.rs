//! Arena-based MCTS tree with a transposition index.
//!
//! Nodes are stored in a flat `Vec<MCTSNode>` and referenced by `NodeId`.
//! Each node is also registered under the [`StateKey`] of its position, so
//! a position reached along two different lines shares one node.

use rustc_hash::FxHashMap;

use super::node::{MCTSNode, NodeId};
use crate::codec::StateKey;

/// Search tree for one `select_action` call.
#[derive(Clone, Debug, Default)]
pub struct MCTSTree {
    /// All nodes in the tree.
    nodes: Vec<MCTSNode>,

    /// Position key to node.
    index: FxHashMap<StateKey, NodeId>,
}

impl MCTSTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// The root is always the first node inserted.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Node registered under `key`, if any.
    #[must_use]
    pub fn lookup(&self, key: &StateKey) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Add a node for a new position.
    pub fn insert(&mut self, key: StateKey, node: MCTSNode) -> NodeId {
        debug_assert!(!self.index.contains_key(&key), "position inserted twice");
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        self.index.insert(key, id);
        id
    }

    #[must_use]
    pub fn root_node(&self) -> &MCTSNode {
        self.get(self.root())
    }

    pub fn root_node_mut(&mut self) -> &mut MCTSNode {
        let root = self.root();
        self.get_mut(root)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let opened_count = self.nodes.iter().filter(|n| n.is_opened()).count();
        let total_edges: usize = self.nodes.iter().map(|n| n.edges.len()).sum();
        let visited_edges = self
            .nodes
            .iter()
            .flat_map(|n| n.edges.iter())
            .filter(|e| e.visits > 0)
            .count();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            opened_count,
            total_edges,
            visited_edges,
        }
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    pub node_count: usize,

    /// Deepest node, in plies below the root.
    pub max_depth: u16,

    /// Nodes whose edges have been built.
    pub opened_count: usize,

    pub total_edges: usize,

    /// Edges with at least one visit.
    pub visited_edges: usize,
}

impl TreeStats {
    /// Average edges per opened node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.opened_count == 0 {
            0.0
        } else {
            self.total_edges as f64 / self.opened_count as f64
        }
    }

    /// Share of edges tried at least once.
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        if self.total_edges == 0 {
            0.0
        } else {
            self.visited_edges as f64 / self.total_edges as f64
        }
    }
}
