//! `rn-core` — foundational types for the `roadnet` routing engine.
//!
//! This crate is a dependency of every other `rn-*` crate.  It has no `rn-*`
//! dependencies and a single external one (`geo`, for exact rectangle
//! intersection), plus optional `serde`.
//!
//! # What lives here
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`geometry`]   | `LonLat`, `Rect`, Hubeny distance, nearest-point projection |
//! | [`ids`]        | `NodeId`, `LinkId` arena handles                           |
//! | [`config`]     | `NetworkConfig`, `RoutingConfig`, `PenaltyConfig`, `MatchingConfig` |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod geometry;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{MatchTarget, MatchingConfig, NetworkConfig, PenaltyConfig, RoutingConfig};
pub use geometry::{APPROX_DEG_PER_M, LonLat, Rect};
pub use ids::{LinkId, NodeId};
