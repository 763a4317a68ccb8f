//! Engine configuration.
//!
//! Every tunable the routing and matching layers need is an explicit field
//! here, handed to constructors.  Nothing is read from the environment or
//! from process-wide statics; applications typically deserialize these from
//! a TOML/JSON file (enable the `serde` feature) and pass them down.

/// Default number of alternative routes for multi-route logics.
pub const DEFAULT_ROUTE_NUM: usize = 5;

/// Default radius (metres) when snapping a coordinate to the nearest node.
pub const DEFAULT_SEARCH_DISTANCE_M: f64 = 3_000.0;

/// Default multiplicative penalty step for the penalty method.
pub const DEFAULT_INCREASE_RATIO: f64 = 0.1;

/// Default map-matching search radius (metres).
pub const DEFAULT_SEARCH_RANGE_M: f64 = 3_000.0;

/// Default buffer (metres) around an ingestion query rectangle.
pub const DEFAULT_BUFFER_M: f64 = 3_000.0;

// ── NetworkConfig ─────────────────────────────────────────────────────────────

/// Which spatial indexes a `Network` maintains.
///
/// Disabling an index saves memory and build time; range queries then fall
/// back to an exact linear scan.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    pub node_index: bool,
    pub link_index: bool,
}

impl NetworkConfig {
    /// No indexes at all; every range query is a linear scan.
    pub const UNINDEXED: NetworkConfig = NetworkConfig { node_index: false, link_index: false };
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { node_index: true, link_index: true }
    }
}

// ── RoutingConfig ─────────────────────────────────────────────────────────────

/// Shared settings for every routing logic.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingConfig {
    /// Route count used when a caller does not pass one.
    pub route_num: usize,
    /// Radius (metres) for snapping departure/arrival coordinates to nodes.
    pub search_distance_m: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            route_num:         DEFAULT_ROUTE_NUM,
            search_distance_m: DEFAULT_SEARCH_DISTANCE_M,
        }
    }
}

/// Settings specific to the penalty method.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenaltyConfig {
    /// After each found route, the directional cost of every link it used is
    /// multiplied by `1 + increase_ratio`.
    pub increase_ratio: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self { increase_ratio: DEFAULT_INCREASE_RATIO }
    }
}

// ── MatchingConfig ────────────────────────────────────────────────────────────

/// What a map-matching query snaps onto.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchTarget {
    /// Nearest point on any link polyline.
    #[default]
    Link,
    /// Nearest node position.
    Node,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchingConfig {
    /// Candidates farther than this (metres) are never matched.
    pub search_range_m: f64,
    pub target: MatchTarget,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            search_range_m: DEFAULT_SEARCH_RANGE_M,
            target:         MatchTarget::Link,
        }
    }
}
