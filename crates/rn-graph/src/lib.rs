//! `rn-graph` — road network graph, spatial indexing, and routes.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`node`]    | `Node`, `NodeRecord`                                         |
//! | [`link`]    | `Link`, `LinkRecord`, `Direction`                            |
//! | [`route`]   | `Route` — ordered node path plus accumulated cost            |
//! | [`index`]   | `SpatialIndex<T>` — R-tree of bounding boxes (via `rstar`)   |
//! | [`network`] | `Network` — the arena that owns nodes, links, and indexes    |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                               |
//!
//! # Ownership model
//!
//! The [`Network`] owns every node and link in slot vectors.  Nodes list
//! their incident links as [`LinkId`](rn_core::LinkId)s and links name their
//! endpoints as [`NodeId`](rn_core::NodeId)s, so there are no reference
//! cycles and removal is plain index bookkeeping.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on record and route types. |

pub mod error;
pub mod index;
pub mod link;
pub mod network;
pub mod node;
pub mod route;


pub use error::{GraphError, GraphResult};
pub use index::SpatialIndex;
pub use link::{Direction, Link, LinkRecord};
pub use network::Network;
pub use node::{Node, NodeRecord};
pub use route::Route;
