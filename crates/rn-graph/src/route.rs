//! Route search results.

use rn_core::{LinkId, NodeId};

use crate::network::Network;
use crate::{GraphError, GraphResult};

/// An ordered, non-empty node path and its accumulated cost.
///
/// Equality compares the node sequence only, so two searches that find the
/// same path under different cost tables compare equal.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    nodes: Vec<NodeId>,
    cost:  f64,
}

impl Route {
    /// # Panics
    ///
    /// If `nodes` is empty.
    pub fn new(nodes: Vec<NodeId>, cost: f64) -> Self {
        assert!(!nodes.is_empty(), "a route needs at least one node");
        Self { nodes, cost }
    }

    /// Zero-cost route standing still at `node`.
    pub fn at(node: NodeId) -> Self {
        Self { nodes: vec![node], cost: 0.0 }
    }

    /// Append `node`, adding `cost` to the total.
    pub fn push(&mut self, node: NodeId, cost: f64) {
        self.nodes.push(node);
        self.cost += cost;
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, idx: usize) -> Option<NodeId> {
        self.nodes.get(idx).copied()
    }

    pub fn origin(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn destination(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// `true` for a single-node route.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() < 2
    }

    /// Re-derive the link sequence from the *current* network state.
    ///
    /// Each hop resolves through [`Network::link_between`], so one-way
    /// links are honoured.  Fails if a node has since been removed or the
    /// network no longer connects some consecutive pair.
    pub fn links(&self, network: &Network) -> GraphResult<Vec<LinkId>> {
        if let Some(&dead) = self.nodes.iter().find(|&&n| network.node(n).is_none()) {
            return Err(GraphError::NodeNotFound(dead));
        }
        self.nodes
            .windows(2)
            .map(|hop| {
                network
                    .link_between(hop[0], hop[1])
                    .ok_or(GraphError::LinkNotFound(hop[0], hop[1]))
            })
            .collect()
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for Route {}
