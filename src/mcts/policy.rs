//! PUCT selection and the policies derived from visit counts.
//!
//! - `SelectionPolicy`: which edge to follow while descending (PUCT)
//! - `legal_priors`: mask and renormalize an evaluator prior
//! - `mix_root_noise`: Dirichlet exploration at the root
//! - `visit_policy`: the training policy from root visit counts

use super::config::MCTSConfig;
use super::node::{Edge, MCTSNode};

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which edge to follow from an opened node.
pub trait SelectionPolicy: Send + Sync {
    /// Position of the edge to follow. Only called on nodes with edges.
    fn select(&self, node: &MCTSNode, config: &MCTSConfig) -> usize;
}

/// PUCT selection policy (Predictor + UCB for Trees).
///
/// Formula: `Q(a) + c_puct * P(a) * sqrt(max(N_s, 1)) / (1 + N(a))`.
/// The `max` lets the first selection from a fresh node follow the prior.
/// Ties go to the earliest edge, i.e. the lowest action index.
#[derive(Clone, Debug, Default)]
pub struct PUCT;

impl SelectionPolicy for PUCT {
    fn select(&self, node: &MCTSNode, config: &MCTSConfig) -> usize {
        let sqrt_parent = (node.visits.max(1) as f32).sqrt();
        let mut best = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (i, edge) in node.edges.iter().enumerate() {
            let u = config.c_puct * edge.prior * sqrt_parent / (1.0 + edge.visits as f32);
            let score = edge.mean_value() + u;
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        best
    }
}

// =============================================================================
// Priors
// =============================================================================

/// Prior restricted to `legal` indices and renormalized.
///
/// Returns the priors in the order of `legal` and whether the evaluator
/// put too little mass (`<= epsilon`) on legal actions, in which case the
/// result is uniform.
pub fn legal_priors(raw: &[f32], legal: &[u32], epsilon: f32) -> (Vec<f32>, bool) {
    let masked: Vec<f32> = legal
        .iter()
        .map(|&i| raw.get(i as usize).copied().unwrap_or(0.0).max(0.0))
        .collect();
    let mass: f32 = masked.iter().sum();
    if mass > epsilon && mass.is_finite() {
        (masked.into_iter().map(|p| p / mass).collect(), false)
    } else {
        let uniform = 1.0 / legal.len().max(1) as f32;
        (vec![uniform; legal.len()], true)
    }
}

/// `P <- (1 - epsilon) * P + epsilon * noise`, edge by edge.
pub fn mix_root_noise(edges: &mut [Edge], noise: &[f32], epsilon: f32) {
    debug_assert_eq!(edges.len(), noise.len());
    for (edge, &n) in edges.iter_mut().zip(noise) {
        edge.prior = (1.0 - epsilon) * edge.prior + epsilon * n;
    }
}

// =============================================================================
// Output Policy
// =============================================================================

/// Policy over the whole index space from the edges' visit counts.
///
/// `temperature == 0` puts all mass on the most visited edge (lowest index
/// on ties). Otherwise `policy[a] ∝ N(a)^(1/temperature)`.
pub fn visit_policy(edges: &[Edge], action_count: usize, temperature: f32) -> Vec<f32> {
    let mut policy = vec![0.0; action_count];
    let max_visits = edges.iter().map(|e| e.visits).max().unwrap_or(0);
    if edges.is_empty() {
        return policy;
    }

    if max_visits == 0 {
        let uniform = 1.0 / edges.len() as f32;
        for edge in edges {
            policy[edge.index as usize] = uniform;
        }
        return policy;
    }

    if temperature <= 0.0 {
        let best = edges
            .iter()
            .find(|e| e.visits == max_visits)
            .map_or(0, |e| e.index as usize);
        policy[best] = 1.0;
        return policy;
    }

    // Scale by the max first so large counts and small temperatures stay finite.
    let exponent = 1.0 / f64::from(temperature);
    let weights: Vec<f64> = edges
        .iter()
        .map(|e| (f64::from(e.visits) / f64::from(max_visits)).powf(exponent))
        .collect();
    let total: f64 = weights.iter().sum();
    for (edge, w) in edges.iter().zip(weights) {
        policy[edge.index as usize] = (w / total) as f32;
    }
    policy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_with(edges: Vec<Edge>, visits: u32) -> MCTSNode {
        let mut node = MCTSNode::new(vec![], 0.0, 0);
        node.raw_prior = None;
        node.edges = edges;
        node.visits = visits;
        node
    }

    #[test]
    fn test_puct_follows_prior_on_fresh_node() {
        let node = node_with(vec![Edge::new(0, 0.2), Edge::new(1, 0.7), Edge::new(2, 0.1)], 0);
        assert_eq!(PUCT.select(&node, &MCTSConfig::default()), 1);
    }

    #[test]
    fn test_puct_balances_value_and_exploration() {
        let mut edges = vec![Edge::new(0, 0.5), Edge::new(1, 0.5)];
        for _ in 0..10 {
            edges[0].record(-1.0);
        }
        let node = node_with(edges, 10);
        // Q = -1 on the visited edge, so the unvisited one wins.
        assert_eq!(PUCT.select(&node, &MCTSConfig::default()), 1);

        // With no exploration bonus, Q alone decides.
        let mut edges = vec![Edge::new(0, 0.1), Edge::new(1, 0.9)];
        edges[0].record(0.5);
        edges[1].record(-0.5);
        let node = node_with(edges, 2);
        assert_eq!(PUCT.select(&node, &MCTSConfig::default().with_c_puct(0.0)), 0);
    }

    #[test]
    fn test_puct_ties_go_to_first_edge() {
        let node = node_with(vec![Edge::new(3, 0.5), Edge::new(8, 0.5)], 4);
        assert_eq!(PUCT.select(&node, &MCTSConfig::default()), 0);
    }

    #[test]
    fn test_legal_priors_renormalize() {
        let raw = [0.1, 0.4, 0.2, 0.3];
        let (priors, fallback) = legal_priors(&raw, &[1, 3], 1e-8);
        assert!(!fallback);
        assert!((priors[0] - 0.4 / 0.7).abs() < 1e-6);
        assert!((priors[1] - 0.3 / 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_legal_priors_fallback() {
        let raw = [1.0, 0.0, 0.0];
        let (priors, fallback) = legal_priors(&raw, &[1, 2], 1e-8);
        assert!(fallback);
        assert_eq!(priors, vec![0.5, 0.5]);
    }

    #[test]
    fn test_mix_root_noise() {
        let mut edges = vec![Edge::new(0, 1.0), Edge::new(1, 0.0)];
        mix_root_noise(&mut edges, &[0.0, 1.0], 0.25);
        assert_eq!(edges[0].prior, 0.75);
        assert_eq!(edges[1].prior, 0.25);
    }

    #[test]
    fn test_visit_policy_temperatures() {
        let mut edges = vec![Edge::new(1, 0.5), Edge::new(4, 0.5)];
        edges[0].visits = 1;
        edges[1].visits = 3;

        let greedy = visit_policy(&edges, 6, 0.0);
        assert_eq!(greedy, vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0]);

        let proportional = visit_policy(&edges, 6, 1.0);
        assert!((proportional[1] - 0.25).abs() < 1e-6);
        assert!((proportional[4] - 0.75).abs() < 1e-6);

        let sharp = visit_policy(&edges, 6, 0.5);
        assert!((sharp[1] - 0.1).abs() < 1e-6);
        assert!((sharp[4] - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_visit_policy_unvisited_is_uniform() {
        let edges = vec![Edge::new(0, 0.5), Edge::new(2, 0.5)];
        assert_eq!(visit_policy(&edges, 3, 1.0), vec![0.5, 0.0, 0.5]);
        assert_eq!(visit_policy(&[], 2, 1.0), vec![0.0, 0.0]);
    }
}
