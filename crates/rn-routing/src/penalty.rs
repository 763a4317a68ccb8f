//! Alternative routes by iterative link penalising.
//!
//! Each iteration runs a full shortest-path search against a cost table
//! local to the call.  After a successful iteration every link on the
//! found route has the cost of the direction actually travelled multiplied
//! by `1 + increase_ratio`, so later iterations drift away from it.  A table
//! entry starts from the base [`LinkCost`] the first time its link is
//! penalised.
//!
//! This is a diversity heuristic, not k-shortest paths: too small a ratio
//! can yield the same node sequence twice.

use tracing::debug;

use rn_core::{NodeId, PenaltyConfig, RoutingConfig};
use rn_graph::{Direction, Network, Route};

use crate::cost::{LinkCost, StoredCost};
use crate::logic::RoutingLogic;
use crate::search::{self, CostTable, Stop};

#[derive(Clone, Debug)]
pub struct Penalty<C = StoredCost> {
    config:  RoutingConfig,
    penalty: PenaltyConfig,
    cost:    C,
}

impl Penalty {
    pub fn new() -> Self {
        Self::with_cost(StoredCost)
    }
}

impl Default for Penalty {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: LinkCost> Penalty<C> {
    pub fn with_cost(cost: C) -> Self {
        Self { config: RoutingConfig::default(), penalty: PenaltyConfig::default(), cost }
    }

    pub fn with_config(mut self, config: RoutingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_penalty(mut self, penalty: PenaltyConfig) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn increase_ratio(&self) -> f64 {
        self.penalty.increase_ratio
    }

    pub fn link_cost(&self) -> &C {
        &self.cost
    }
}

impl<C: LinkCost> RoutingLogic for Penalty<C> {
    fn name(&self) -> &str {
        "Penalty"
    }

    fn config(&self) -> &RoutingConfig {
        &self.config
    }

    fn routes(&self, network: &Network, origin: NodeId, destination: NodeId, n: usize) -> Vec<Route> {
        if n == 0 {
            return Vec::new();
        }
        // No links to penalise: every iteration would repeat the same route.
        if origin == destination {
            return network.node(origin).map(|_| Route::at(origin)).into_iter().collect();
        }
        let factor = 1.0 + self.penalty.increase_ratio;
        let mut table = CostTable::default();
        let mut routes = Vec::with_capacity(n);

        for iteration in 0..n {
            let knots = search::run(network, origin, Stop::At(destination), &self.cost, Some(&table));
            let Some(idx) = knots.reached else {
                debug!(iteration, origin = %origin, destination = %destination, "no route, skipping");
                continue;
            };

            for (link_id, dir) in knots.hops_to(idx) {
                let Some(link) = network.link(link_id) else { continue };
                let entry = table.entry(link_id).or_insert_with(|| {
                    [
                        self.cost.cost_of(link, Direction::Forward),
                        self.cost.cost_of(link, Direction::Reverse),
                    ]
                });
                entry[dir.slot()] *= factor;
            }
            routes.push(knots.route_to(idx));
        }
        routes
    }
}
