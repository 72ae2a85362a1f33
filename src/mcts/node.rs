//! MCTS node and edge structures.
//!
//! Nodes live in an arena and are referenced by `NodeId`. Edges are
//! created lazily: a node holds the evaluator's raw prior until it is first
//! selected from, at which point the prior is masked to the legal actions
//! and turned into one edge per action.

use serde::{Deserialize, Serialize};

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Statistics for one action out of a node.
///
/// `total_value` and [`Edge::mean_value`] are from the perspective of the
/// player to move at the parent node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Action index in the mover's canonical index space.
    pub index: u32,

    /// Child node, cached after the first descent (NONE until then, and
    /// for actions that end the game).
    pub child: NodeId,

    /// Visit count N.
    pub visits: u32,

    /// Total backed-up value W.
    pub total_value: f32,

    /// Prior probability P, renormalized over the legal actions.
    pub prior: f32,
}

impl Edge {
    pub fn new(index: u32, prior: f32) -> Self {
        Self {
            index,
            child: NodeId::NONE,
            visits: 0,
            total_value: 0.0,
            prior,
        }
    }

    /// Mean value Q = W / N (0 when unvisited).
    #[must_use]
    pub fn mean_value(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_value / self.visits as f32
        }
    }

    /// Record one backed-up value.
    pub fn record(&mut self, value: f32) {
        self.visits += 1;
        self.total_value += value;
    }
}

/// A position in the MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode {
    /// Depth at which the position was first reached (root = 0).
    pub depth: u16,

    /// Total visits N_s through this node.
    pub visits: u32,

    /// Evaluator value at expansion, for the player to move.
    pub value: f32,

    /// Raw evaluator prior over the full action space; consumed when the
    /// edges are built.
    pub raw_prior: Option<Vec<f32>>,

    /// Outgoing edges, sorted by action index. Empty until opened.
    pub edges: Vec<Edge>,
}

impl MCTSNode {
    pub fn new(raw_prior: Vec<f32>, value: f32, depth: u16) -> Self {
        Self {
            depth,
            visits: 0,
            value,
            raw_prior: Some(raw_prior),
            edges: Vec::new(),
        }
    }

    /// Whether the edges have been built.
    #[must_use]
    pub fn is_opened(&self) -> bool {
        self.raw_prior.is_none()
    }

    /// Position of the most visited edge; ties go to the lowest action index.
    #[must_use]
    pub fn most_visited(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, edge) in self.edges.iter().enumerate() {
            if best.map_or(true, |b| edge.visits > self.edges[b].visits) {
                best = Some(i);
            }
        }
        best
    }

    /// Visit-weighted mean of the edge values, or the evaluator value
    /// before any edge has been visited.
    #[must_use]
    pub fn mean_value(&self) -> f32 {
        let visits: u32 = self.edges.iter().map(|e| e.visits).sum();
        if visits == 0 {
            return self.value;
        }
        self.edges.iter().map(|e| e.total_value).sum::<f32>() / visits as f32
    }
}
