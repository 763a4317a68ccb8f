//! Label-setting search shared by `Dijkstra` and `Penalty`.
//!
//! Each discovered node gets a *knot*: best known cost, the knot it was
//! reached from, the link and direction of that last hop, and a `fixed`
//! flag.  Knots live in a `Vec` in discovery order; a hash map finds a
//! node's knot.
//!
//! The frontier is a min-heap keyed by `(cost, seq)` where `seq` is a
//! monotonically increasing push counter, so equal costs pop in FIFO
//! order.  Improving a knot pushes a fresh entry instead of decreasing a
//! key; the old entry pops after the knot is fixed and is skipped.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use rustc_hash::{FxHashMap, FxHashSet};

use rn_core::{LinkId, NodeId};
use rn_graph::{Direction, Network, Route};

use crate::cost::LinkCost;

/// Per-link `[forward, reverse]` costs overriding the base strategy.
pub(crate) type CostTable = FxHashMap<LinkId, [f64; 2]>;

/// When to stop expanding.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Stop {
    /// Stop as soon as this node is settled.
    At(NodeId),
    /// Stop once a settled cost exceeds the ceiling; `None` runs to
    /// exhaustion.
    Ceiling(Option<f64>),
}

#[derive(Clone, Debug)]
pub(crate) struct Knot {
    pub node:  NodeId,
    pub from:  Option<usize>,
    /// Link and direction of the hop into this knot.
    pub via:   Option<(LinkId, Direction)>,
    pub cost:  f64,
    pub fixed: bool,
}

/// Settled state of one search run.
pub(crate) struct Knots {
    pub knots:   Vec<Knot>,
    /// Knot index of the target when `Stop::At` reached it.
    pub reached: Option<usize>,
}

impl Knots {
    /// Node path from the origin to knot `idx`, with its cost.
    pub fn route_to(&self, idx: usize) -> Route {
        let mut nodes = Vec::new();
        let mut cur = Some(idx);
        while let Some(i) = cur {
            nodes.push(self.knots[i].node);
            cur = self.knots[i].from;
        }
        nodes.reverse();
        Route::new(nodes, self.knots[idx].cost)
    }

    /// Hops `(link, direction)` from the origin to knot `idx`.
    pub fn hops_to(&self, idx: usize) -> Vec<(LinkId, Direction)> {
        let mut hops = Vec::new();
        let mut cur = idx;
        while let (Some(via), Some(from)) = (self.knots[cur].via, self.knots[cur].from) {
            hops.push(via);
            cur = from;
        }
        hops.reverse();
        hops
    }

    /// One route per locally-maximal settled knot.
    ///
    /// Knots are visited newest first; each not yet covered by an earlier
    /// route yields its route, and every knot on that route is marked
    /// covered.  Only fixed knots within `ceiling` take part.
    pub fn disjoint_routes(&self, ceiling: Option<f64>) -> Vec<Route> {
        let eligible = |k: &Knot| k.fixed && ceiling.is_none_or(|c| k.cost <= c);
        let mut covered: FxHashSet<usize> = FxHashSet::default();
        let mut routes = Vec::new();
        for idx in (0..self.knots.len()).rev() {
            if covered.contains(&idx) || !eligible(&self.knots[idx]) {
                continue;
            }
            let mut cur = Some(idx);
            while let Some(i) = cur {
                covered.insert(i);
                cur = self.knots[i].from;
            }
            routes.push(self.route_to(idx));
        }
        routes
    }
}

/// Run the search from `origin`.
///
/// Only out-links are expanded and each is entered via
/// [`Link::traverse_from`](rn_graph::Link::traverse_from), so one-way links
/// are never walked backwards.  `table` entries replace the base cost for
/// the links they name.
pub(crate) fn run<C: LinkCost + ?Sized>(
    network: &Network,
    origin: NodeId,
    stop: Stop,
    cost: &C,
    table: Option<&CostTable>,
) -> Knots {
    let mut knots = Vec::new();
    let mut index: FxHashMap<NodeId, usize> = FxHashMap::default();
    let mut reached = None;

    if network.node(origin).is_none() {
        return Knots { knots, reached };
    }

    knots.push(Knot { node: origin, from: None, via: None, cost: 0.0, fixed: false });
    index.insert(origin, 0);

    // Min-heap on (cost, push order); Reverse turns the max-heap around.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, u64, usize)>> = BinaryHeap::new();
    let mut seq: u64 = 0;
    heap.push(Reverse((OrderedFloat(0.0), seq, 0)));

    while let Some(Reverse((OrderedFloat(settled), _, k))) = heap.pop() {
        // Skip stale heap entries.
        if knots[k].fixed {
            continue;
        }
        knots[k].fixed = true;
        let node = knots[k].node;

        match stop {
            Stop::At(target) if node == target => {
                reached = Some(k);
                break;
            }
            Stop::Ceiling(Some(ceiling)) if settled > ceiling => break,
            _ => {}
        }

        let Some(n) = network.node(node) else { continue };
        for &link_id in n.out_links() {
            let Some(link) = network.link(link_id) else { continue };
            let Some((next, dir)) = link.traverse_from(node) else { continue };

            let step = table
                .and_then(|t| t.get(&link_id))
                .map(|c| c[dir.slot()])
                .unwrap_or_else(|| cost.cost_of(link, dir));
            let candidate = settled + step;

            match index.get(&next) {
                Some(&j) => {
                    let knot = &mut knots[j];
                    if !knot.fixed && candidate < knot.cost {
                        knot.cost = candidate;
                        knot.from = Some(k);
                        knot.via = Some((link_id, dir));
                        seq += 1;
                        heap.push(Reverse((OrderedFloat(candidate), seq, j)));
                    }
                }
                None => {
                    let j = knots.len();
                    knots.push(Knot {
                        node:  next,
                        from:  Some(k),
                        via:   Some((link_id, dir)),
                        cost:  candidate,
                        fixed: false,
                    });
                    index.insert(next, j);
                    seq += 1;
                    heap.push(Reverse((OrderedFloat(candidate), seq, j)));
                }
            }
        }
    }

    Knots { knots, reached }
}
