//! Graph-subsystem error type.
//!
//! Plain lookups (`Network::node`, `Network::link_between`, …) return
//! `Option`; these variants are for operations that need every piece of a
//! larger structure to still be present.

use thiserror::Error;

use rn_core::NodeId;

/// Errors produced by `rn-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("{0} not found in network")]
    NodeNotFound(NodeId),

    #[error("no traversable link from {0} to {1}")]
    LinkNotFound(NodeId, NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;
