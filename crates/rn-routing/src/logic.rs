//! The routing-logic interface and the nearest-feature lookups it builds on.
//!
//! Implementors supply [`RoutingLogic::routes`]; every other entry point
//! (by key, by coordinates, single route, geometry) is provided on top of
//! it.

use rn_core::geometry::{distance, line_distance};
use rn_core::{LinkId, LonLat, NodeId, Rect, RoutingConfig};
use rn_graph::{Direction, Network, Route};

use crate::{RoutingError, RoutingResult};

// ── RoutingLogic ──────────────────────────────────────────────────────────────

/// Pluggable route search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; a search only reads the network,
/// so one instance can serve many threads once the network is built.
pub trait RoutingLogic: Send + Sync {
    /// Short human-readable algorithm name.
    fn name(&self) -> &str;

    fn config(&self) -> &RoutingConfig;

    /// Up to `n` routes from `origin` to `destination`.
    ///
    /// An unreachable destination yields an empty list, not an error.
    fn routes(
        &self,
        network: &Network,
        origin: NodeId,
        destination: NodeId,
        n: usize,
    ) -> Vec<Route>;

    /// [`routes`](Self::routes) with the configured route count.
    fn default_routes(&self, network: &Network, origin: NodeId, destination: NodeId) -> Vec<Route> {
        self.routes(network, origin, destination, self.config().route_num)
    }

    /// The best route, if any.
    fn route(&self, network: &Network, origin: NodeId, destination: NodeId) -> Option<Route> {
        self.routes(network, origin, destination, 1).into_iter().next()
    }

    /// [`routes`](Self::routes) addressed by node key.
    fn routes_by_key(
        &self,
        network: &Network,
        origin: &str,
        destination: &str,
        n: usize,
    ) -> RoutingResult<Vec<Route>> {
        let resolve = |key: &str| {
            network
                .node_id(key)
                .ok_or_else(|| RoutingError::UnknownNode(key.to_owned()))
        };
        Ok(self.routes(network, resolve(origin)?, resolve(destination)?, n))
    }

    /// Routes between the nodes nearest to two positions.
    ///
    /// Empty when either position has no node within the configured search
    /// distance.
    fn routes_between(&self, network: &Network, from: LonLat, to: LonLat, n: usize) -> Vec<Route> {
        match (self.nearest_node(network, from), self.nearest_node(network, to)) {
            (Some(o), Some(d)) => self.routes(network, o, d, n),
            _ => Vec::new(),
        }
    }

    /// Nearest node within the configured search distance.
    fn nearest_node(&self, network: &Network, pos: LonLat) -> Option<NodeId> {
        nearest_node_within(network, pos, self.config().search_distance_m)
    }

    /// Nearest link anywhere in the network.
    fn nearest_link(&self, network: &Network, pos: LonLat) -> Option<LinkId> {
        nearest_link_within(network, pos, f64::MAX)
    }

    /// Polyline of a route, hop by hop.
    ///
    /// Each hop contributes its link's line, reversed when the hop runs
    /// head → tail; a vertex shared by consecutive hops appears once.
    /// `None` if some hop has no connecting link.
    fn route_geometry(&self, network: &Network, route: &Route) -> Option<Vec<LonLat>> {
        let mut out: Vec<LonLat> = Vec::new();
        for hop in route.nodes().windows(2) {
            let link = network.link(network.link_between(hop[0], hop[1])?)?;
            let mut line = network.link_line(link).into_owned();
            if link.direction_between(hop[0], hop[1]) == Some(Direction::Reverse) {
                line.reverse();
            }
            let skip = usize::from(out.last().is_some() && out.last() == line.first());
            out.extend(line.into_iter().skip(skip));
        }
        Some(out)
    }
}

// ── Nearest features ──────────────────────────────────────────────────────────

/// Nearest node strictly closer than `max_m` metres.
///
/// Candidates come from a box query; the first of equally near nodes wins.
pub fn nearest_node_within(network: &Network, pos: LonLat, max_m: f64) -> Option<NodeId> {
    let mut best = None;
    let mut best_d = max_m;
    for id in network.query_nodes(Rect::around(pos, max_m)) {
        let Some(p) = network.node_pos(id) else { continue };
        let d = distance(pos, p);
        if d < best_d {
            best = Some(id);
            best_d = d;
        }
    }
    best
}

/// Nearest link strictly closer than `max_m` metres.
///
/// Scans every link, not just indexed ones: links without geometry are
/// measured along their straight tail–head segment.
pub fn nearest_link_within(network: &Network, pos: LonLat, max_m: f64) -> Option<LinkId> {
    let mut best = None;
    let mut best_d = max_m;
    for (id, link) in network.links() {
        let Some(d) = line_distance(&network.link_line(link), pos) else { continue };
        if d < best_d {
            best = Some(id);
            best_d = d;
        }
    }
    best
}
