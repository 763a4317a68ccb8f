//! Single shortest route and cost-bounded reachability.

use tracing::trace;

use rn_core::{LonLat, NodeId, RoutingConfig};
use rn_graph::{Network, Route};

use crate::cost::{LinkCost, StoredCost};
use crate::logic::RoutingLogic;
use crate::search::{self, Stop};

/// Standard Dijkstra search.
///
/// Returns at most one route whatever count is requested.  Cost ties are
/// settled in discovery order (see the crate docs).
///
/// ```
/// use rn_graph::{LinkRecord, Network, NodeRecord};
/// use rn_routing::{Dijkstra, RoutingLogic};
///
/// let mut net = Network::new();
/// net.add_link(LinkRecord::new("ab", NodeRecord::new("a", 0.0, 0.0), NodeRecord::new("b", 0.01, 0.0)).cost(3.0));
/// let (a, b) = (net.node_id("a").unwrap(), net.node_id("b").unwrap());
/// let route = Dijkstra::new().route(&net, a, b).unwrap();
/// assert_eq!(route.cost(), 3.0);
/// ```
#[derive(Clone, Debug)]
pub struct Dijkstra<C = StoredCost> {
    config: RoutingConfig,
    cost:   C,
}

impl Dijkstra {
    pub fn new() -> Self {
        Self::with_cost(StoredCost)
    }
}

impl Default for Dijkstra {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: LinkCost> Dijkstra<C> {
    pub fn with_cost(cost: C) -> Self {
        Self { config: RoutingConfig { route_num: 1, ..RoutingConfig::default() }, cost }
    }

    pub fn with_config(mut self, config: RoutingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn link_cost(&self) -> &C {
        &self.cost
    }

    /// One route per locally-maximal node reachable from `origin` within
    /// `ceiling`.
    ///
    /// A ceiling `<= 0` means unbounded.  Routes are produced from the most
    /// recently discovered node backwards; a node already lying on an
    /// earlier route never starts its own, so the result covers every
    /// reachable node with as few routes as the search tree allows.
    pub fn reachable_routes(&self, network: &Network, origin: NodeId, ceiling: f64) -> Vec<Route> {
        let ceiling = (ceiling > 0.0).then_some(ceiling);
        let knots = search::run(network, origin, Stop::Ceiling(ceiling), &self.cost, None);
        let routes = knots.disjoint_routes(ceiling);
        trace!(origin = %origin, settled = knots.knots.len(), routes = routes.len(), "reachability");
        routes
    }

    /// [`reachable_routes`](Self::reachable_routes) from the node nearest
    /// `pos`; empty if no node lies within the search distance.
    pub fn reachable_routes_from(&self, network: &Network, pos: LonLat, ceiling: f64) -> Vec<Route> {
        match self.nearest_node(network, pos) {
            Some(origin) => self.reachable_routes(network, origin, ceiling),
            None => Vec::new(),
        }
    }
}

impl<C: LinkCost> RoutingLogic for Dijkstra<C> {
    fn name(&self) -> &str {
        "Dijkstra"
    }

    fn config(&self) -> &RoutingConfig {
        &self.config
    }

    fn routes(&self, network: &Network, origin: NodeId, destination: NodeId, n: usize) -> Vec<Route> {
        if n == 0 {
            return Vec::new();
        }
        let knots = search::run(network, origin, Stop::At(destination), &self.cost, None);
        match knots.reached {
            Some(idx) => vec![knots.route_to(idx)],
            None => {
                trace!(origin = %origin, destination = %destination, "destination unreachable");
                Vec::new()
            }
        }
    }
}
