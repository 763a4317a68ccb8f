//! Routing error type.
//!
//! An unreachable destination is not an error: searches return an empty
//! route list for it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("node {0:?} not found in network")]
    UnknownNode(String),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
