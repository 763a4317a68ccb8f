//! Nearest-feature matching.
//!
//! # Link mode
//!
//! 1. Range query for links whose geometry passes within the search range.
//! 2. Project the point onto each candidate polyline, leg by leg; keep the
//!    strictly closest (first found wins a tie).
//! 3. If no candidate with geometry exists, measure links without geometry
//!    along their straight tail–head segment instead.
//!
//! # Node mode
//!
//! Range query for nodes, then the strictly closest one.

use tracing::trace;

use rn_core::geometry::{distance, nearest_point_on_line};
use rn_core::{LinkId, LonLat, MatchTarget, MatchingConfig};
use rn_graph::Network;

use crate::result::MatchingResult;

/// Snaps points onto a network.
///
/// `Send + Sync` so sequences can be matched across threads.
pub trait Matcher: Send + Sync {
    fn config(&self) -> &MatchingConfig;

    /// Match one point within `range_m` metres.
    fn match_point_within(&self, network: &Network, point: LonLat, range_m: f64) -> MatchingResult;

    /// Match one point within the configured range.
    fn match_point(&self, network: &Network, point: LonLat) -> MatchingResult {
        self.match_point_within(network, point, self.config().search_range_m)
    }

    /// Match each point independently, preserving order.
    fn match_points(&self, network: &Network, points: &[LonLat]) -> Vec<MatchingResult> {
        self.match_points_within(network, points, self.config().search_range_m)
    }

    fn match_points_within(
        &self,
        network: &Network,
        points: &[LonLat],
        range_m: f64,
    ) -> Vec<MatchingResult> {
        #[cfg(not(feature = "parallel"))]
        {
            points
                .iter()
                .map(|&p| self.match_point_within(network, p, range_m))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            points
                .par_iter()
                .map(|&p| self.match_point_within(network, p, range_m))
                .collect()
        }
    }
}

// ── NearestMatcher ────────────────────────────────────────────────────────────

/// Plain nearest-link / nearest-node matcher.
///
/// ```
/// use rn_core::LonLat;
/// use rn_graph::{LinkRecord, Network, NodeRecord};
/// use rn_matching::{Matcher, NearestMatcher};
///
/// let mut net = Network::new();
/// net.add_link(
///     LinkRecord::new("L", NodeRecord::new("a", 0.0, 0.0), NodeRecord::new("b", 0.01, 0.0))
///         .geometry(vec![LonLat::new(0.0, 0.0), LonLat::new(0.01, 0.0)]),
/// );
/// let m = NearestMatcher::default().match_point(&net, LonLat::new(0.005, 0.001));
/// assert!(m.is_valid());
/// assert_eq!(m.nearest_point().unwrap().lat, 0.0);
/// assert!((m.distance() - 110.6).abs() < 1.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct NearestMatcher {
    config: MatchingConfig,
}

impl NearestMatcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    /// Closest point on any link within `range_m`.
    pub fn match_to_link(&self, network: &Network, point: LonLat, range_m: f64) -> MatchingResult {
        let mut best: Option<(LinkId, LonLat)> = None;
        let mut best_d = f64::MAX;

        for id in network.query_links_within(point, range_m) {
            let Some(line) = network.link(id).and_then(|l| l.geometry()) else { continue };
            let Some(q) = nearest_point_on_line(line, point) else { continue };
            let d = distance(q, point);
            if d < best_d {
                best = Some((id, q));
                best_d = d;
            }
        }

        if best.is_none() {
            for (id, link) in network.links().filter(|(_, l)| !l.has_geometry()) {
                let Some(q) = nearest_point_on_line(&network.link_line(link), point) else { continue };
                let d = distance(q, point);
                if d <= range_m && d < best_d {
                    best = Some((id, q));
                    best_d = d;
                }
            }
        }

        match best {
            Some((link, q)) => MatchingResult::on_link(point, q, link, best_d),
            None => {
                trace!(lon = point.lon, lat = point.lat, range_m, "no link in range");
                MatchingResult::unmatched(point)
            }
        }
    }

    /// Closest node within `range_m`.
    pub fn match_to_node(&self, network: &Network, point: LonLat, range_m: f64) -> MatchingResult {
        let mut best = None;
        let mut best_d = f64::MAX;
        for id in network.query_nodes_within(point, range_m) {
            let Some(p) = network.node_pos(id) else { continue };
            let d = distance(p, point);
            if d < best_d {
                best = Some((id, p));
                best_d = d;
            }
        }
        match best {
            Some((node, p)) => MatchingResult::on_node(point, p, node, best_d),
            None => MatchingResult::unmatched(point),
        }
    }
}

impl Matcher for NearestMatcher {
    fn config(&self) -> &MatchingConfig {
        &self.config
    }

    fn match_point_within(&self, network: &Network, point: LonLat, range_m: f64) -> MatchingResult {
        match self.config.target {
            MatchTarget::Link => self.match_to_link(network, point, range_m),
            MatchTarget::Node => self.match_to_node(network, point, range_m),
        }
    }
}
