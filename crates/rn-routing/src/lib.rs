//! `rn-routing` — route search over an [`rn_graph::Network`].
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`cost`]    | `LinkCost` strategy trait, `StoredCost`, `TravelTimeCost`      |
//! | [`logic`]   | `RoutingLogic` trait, nearest-feature helpers                  |
//! | [`dijkstra`]| `Dijkstra` — single shortest route, cost-bounded reachability  |
//! | [`penalty`] | `Penalty` — diverse alternatives by iterative link penalising  |
//! | [`error`]   | `RoutingError`, `RoutingResult<T>`                             |
//!
//! # Determinism
//!
//! Both searches settle nodes in increasing cost order and break cost ties
//! by insertion order into the frontier (first discovered, first settled).
//! Given the same network built in the same order, results are reproducible.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                 |
//! |---------|--------------------------------------------------------|
//! | `serde` | Propagates serde derives to `rn-core` / `rn-graph`.    |

pub mod cost;
pub mod dijkstra;
pub mod error;
pub mod logic;
pub mod penalty;

mod search;

#[cfg(test)]
mod tests;

pub use cost::{LinkCost, StoredCost, TravelTimeCost};
pub use dijkstra::Dijkstra;
pub use error::{RoutingError, RoutingResult};
pub use logic::{RoutingLogic, nearest_link_within, nearest_node_within};
pub use penalty::Penalty;
