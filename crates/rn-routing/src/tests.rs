//! Unit tests for rn-routing.

#[cfg(test)]
mod helpers {
    use rn_core::NodeId;
    use rn_graph::{LinkRecord, Network, NodeRecord};

    pub fn node(key: &str, lon: f64, lat: f64) -> NodeRecord {
        NodeRecord::new(key, lon, lat)
    }

    pub fn id(net: &Network, key: &str) -> NodeId {
        net.node_id(key).unwrap()
    }

    pub fn keys(net: &Network, nodes: &[NodeId]) -> Vec<String> {
        nodes.iter().map(|&n| net.node(n).unwrap().key().to_owned()).collect()
    }

    /// A(0,0) B(1,0) C(2,0) D(1,1); A–B, B–C, A–D, D–C all bidirectional,
    /// cost 1, added in that order.
    pub fn diamond() -> Network {
        let mut net = Network::new();
        let (a, b, c, d) = (node("A", 0.0, 0.0), node("B", 1.0, 0.0), node("C", 2.0, 0.0), node("D", 1.0, 1.0));
        net.add_link(LinkRecord::new("AB", a.clone(), b.clone()).cost(1.0));
        net.add_link(LinkRecord::new("BC", b, c.clone()).cost(1.0));
        net.add_link(LinkRecord::new("AD", a, d.clone()).cost(1.0));
        net.add_link(LinkRecord::new("DC", d, c).cost(1.0));
        net
    }

    /// S to T over three edge-disjoint two-hop paths via X, Y, Z.
    pub fn three_ways() -> Network {
        let mut net = Network::new();
        let s = node("S", 0.0, 0.0);
        let t = node("T", 0.02, 0.0);
        for (i, via) in ["X", "Y", "Z"].into_iter().enumerate() {
            let v = node(via, 0.01, 0.01 * i as f64 - 0.01);
            net.add_link(LinkRecord::new(format!("S{via}"), s.clone(), v.clone()).cost(1.0));
            net.add_link(LinkRecord::new(format!("{via}T"), v, t.clone()).cost(1.0));
        }
        net
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dijkstra {
    use rn_graph::{LinkRecord, Network};

    use super::helpers::{diamond, id, keys, node};
    use crate::{Dijkstra, RoutingError, RoutingLogic};

    #[test]
    fn diamond_prefers_first_discovered() {
        let net = diamond();
        let routes = Dijkstra::new().routes(&net, id(&net, "A"), id(&net, "C"), 1);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].cost(), 2.0);
        assert_eq!(keys(&net, routes[0].nodes()), ["A", "B", "C"]);
    }

    #[test]
    fn at_most_one_route() {
        let net = diamond();
        let routes = Dijkstra::new().routes(&net, id(&net, "A"), id(&net, "C"), 5);
        assert_eq!(routes.len(), 1);
        assert!(Dijkstra::new().routes(&net, id(&net, "A"), id(&net, "C"), 0).is_empty());
    }

    #[test]
    fn same_origin_and_destination() {
        let net = diamond();
        let a = id(&net, "A");
        let r = Dijkstra::new().route(&net, a, a).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.cost(), 0.0);
    }

    #[test]
    fn bidirectional_costs_by_direction() {
        let mut net = Network::new();
        net.add_link(
            LinkRecord::new("L", node("t", 0.0, 0.0), node("h", 0.01, 0.0))
                .cost(5.0)
                .reverse_cost(7.0),
        );
        let (t, h) = (id(&net, "t"), id(&net, "h"));
        let d = Dijkstra::new();
        assert_eq!(d.route(&net, t, h).unwrap().cost(), 5.0);
        assert_eq!(d.route(&net, h, t).unwrap().cost(), 7.0);
    }

    #[test]
    fn one_way_not_walked_backwards() {
        let mut net = Network::new();
        net.add_link(LinkRecord::new("L", node("t", 0.0, 0.0), node("h", 0.01, 0.0)).one_way(true));
        let (t, h) = (id(&net, "t"), id(&net, "h"));
        assert!(Dijkstra::new().route(&net, t, h).is_some());
        assert!(Dijkstra::new().routes(&net, h, t, 1).is_empty());
    }

    #[test]
    fn unreachable_is_empty() {
        let mut net = diamond();
        net.add_link(LinkRecord::new("far", node("P", 5.0, 5.0), node("Q", 5.1, 5.0)));
        assert!(Dijkstra::new().routes(&net, id(&net, "A"), id(&net, "Q"), 1).is_empty());
    }

    #[test]
    fn routes_by_key() {
        let net = diamond();
        let routes = Dijkstra::new().routes_by_key(&net, "A", "C", 1).unwrap();
        assert_eq!(routes.len(), 1);
        let err = Dijkstra::new().routes_by_key(&net, "A", "nope", 1).unwrap_err();
        assert!(matches!(err, RoutingError::UnknownNode(k) if k == "nope"));
    }

    #[test]
    fn route_links_follow_the_path() {
        let net = diamond();
        let r = Dijkstra::new().route(&net, id(&net, "C"), id(&net, "A")).unwrap();
        let links = r.links(&net).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(r.cost(), 2.0);
    }
}

// ── Reachability ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod reachability {
    use rn_core::LonLat;
    use rn_graph::{LinkRecord, Network, Route};

    use super::helpers::{id, keys, node};
    use crate::Dijkstra;

    /// A–B (1), B–C (1), B–D (5).
    fn fork() -> Network {
        let mut net = Network::new();
        let (a, b, c, d) = (node("A", 0.0, 0.0), node("B", 0.01, 0.0), node("C", 0.02, 0.0), node("D", 0.01, 0.01));
        net.add_link(LinkRecord::new("AB", a, b.clone()).cost(1.0));
        net.add_link(LinkRecord::new("BC", b.clone(), c).cost(1.0));
        net.add_link(LinkRecord::new("BD", b, d).cost(5.0));
        net
    }

    #[test]
    fn unbounded_covers_every_branch() {
        let net = fork();
        let routes = Dijkstra::new().reachable_routes(&net, id(&net, "A"), -1.0);
        let paths: Vec<_> = routes.iter().map(|r| keys(&net, r.nodes())).collect();
        assert_eq!(paths, [vec!["A", "B", "D"], vec!["A", "B", "C"]]);
    }

    #[test]
    fn ceiling_drops_expensive_nodes() {
        let net = fork();
        let routes = Dijkstra::new().reachable_routes(&net, id(&net, "A"), 3.0);
        assert_eq!(routes.len(), 1);
        assert_eq!(keys(&net, routes[0].nodes()), ["A", "B", "C"]);
    }

    #[test]
    fn tiny_ceiling_leaves_origin_only() {
        let net = fork();
        let a = id(&net, "A");
        let routes = Dijkstra::new().reachable_routes(&net, a, 0.5);
        assert_eq!(routes, vec![Route::at(a)]);
    }

    #[test]
    fn from_position_snaps_to_nearest_node() {
        let net = fork();
        let routes = Dijkstra::new().reachable_routes_from(&net, LonLat::new(0.0001, 0.0), 0.0);
        assert_eq!(routes.len(), 2);
        assert!(routes.iter().all(|r| r.origin() == id(&net, "A")));

        let nowhere = Dijkstra::new().reachable_routes_from(&net, LonLat::new(50.0, 50.0), 0.0);
        assert!(nowhere.is_empty());
    }
}

// ── Penalty ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod penalty {
    use rn_core::PenaltyConfig;
    use rn_graph::{LinkRecord, Network};

    use super::helpers::{diamond, id, keys, node, three_ways};
    use crate::{Penalty, RoutingLogic};

    #[test]
    fn diamond_yields_both_sides() {
        let net = diamond();
        let routes = Penalty::new().routes(&net, id(&net, "A"), id(&net, "C"), 2);
        assert_eq!(routes.len(), 2);
        assert_eq!(keys(&net, routes[0].nodes()), ["A", "B", "C"]);
        assert_eq!(keys(&net, routes[1].nodes()), ["A", "D", "C"]);
        assert_eq!(routes[1].cost(), 2.0);
    }

    #[test]
    fn three_disjoint_paths_three_routes() {
        let net = three_ways();
        let routes = Penalty::new().routes(&net, id(&net, "S"), id(&net, "T"), 3);
        let mut paths: Vec<_> = routes.iter().map(|r| keys(&net, r.nodes())).collect();
        assert_eq!(paths.len(), 3);
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 3, "routes must differ: {paths:?}");
    }

    #[test]
    fn penalised_cost_shows_up_on_reuse() {
        // Single path: every iteration reuses it at a growing cost.
        let mut net = Network::new();
        net.add_link(LinkRecord::new("L", node("a", 0.0, 0.0), node("b", 0.01, 0.0)).cost(10.0));
        let p = Penalty::new().with_penalty(PenaltyConfig { increase_ratio: 0.5 });
        let routes = p.routes(&net, id(&net, "a"), id(&net, "b"), 3);
        let costs: Vec<f64> = routes.iter().map(|r| r.cost()).collect();
        assert_eq!(costs, [10.0, 15.0, 22.5]);
    }

    #[test]
    fn penalty_is_per_direction() {
        let mut net = Network::new();
        net.add_link(LinkRecord::new("L", node("a", 0.0, 0.0), node("b", 0.01, 0.0)).cost(4.0));
        let p = Penalty::new().with_penalty(PenaltyConfig { increase_ratio: 1.0 });
        let (a, b) = (id(&net, "a"), id(&net, "b"));
        let forward = p.routes(&net, a, b, 2);
        assert_eq!(forward[1].cost(), 8.0);
        // A fresh call starts from a fresh table.
        assert_eq!(p.routes(&net, b, a, 1)[0].cost(), 4.0);
    }

    #[test]
    fn same_node_is_one_trivial_route() {
        let net = diamond();
        let a = id(&net, "A");
        let routes = Penalty::new().routes(&net, a, a, 3);
        assert_eq!(routes.len(), 1);
        assert!(routes[0].is_trivial());
    }

    #[test]
    fn unreachable_iterations_are_skipped() {
        let mut net = diamond();
        net.add_link(LinkRecord::new("far", node("P", 5.0, 5.0), node("Q", 5.1, 5.0)));
        assert!(Penalty::new().routes(&net, id(&net, "A"), id(&net, "Q"), 3).is_empty());
    }

    #[test]
    fn default_count_from_config() {
        let net = three_ways();
        let routes = Penalty::new().default_routes(&net, id(&net, "S"), id(&net, "T"));
        assert_eq!(routes.len(), 5);
    }
}

// ── Cost strategies ───────────────────────────────────────────────────────────

#[cfg(test)]
mod cost {
    use rn_graph::{Direction, Link, LinkRecord, Network};

    use super::helpers::{id, node};
    use crate::{Dijkstra, LinkCost, RoutingLogic, TravelTimeCost};

    #[test]
    fn travel_time_uses_speed() {
        let mut net = Network::new();
        let l = net.add_link(
            LinkRecord::new("L", node("a", 0.0, 0.0), node("b", 0.01, 0.0))
                .cost(1_000.0)
                .speed_kmh(36.0),
        );
        let link = net.link(l).unwrap();
        assert!((TravelTimeCost.cost_of(link, Direction::Forward) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn travel_time_without_speed_keeps_cost() {
        let mut net = Network::new();
        let l = net.add_link(LinkRecord::new("L", node("a", 0.0, 0.0), node("b", 0.01, 0.0)).cost(42.0));
        assert_eq!(TravelTimeCost.cost_of(net.link(l).unwrap(), Direction::Reverse), 42.0);
    }

    #[test]
    fn closure_strategy_counts_hops() {
        let mut net = Network::new();
        // Cheap two-hop path vs. expensive direct link.
        net.add_link(LinkRecord::new("direct", node("a", 0.0, 0.0), node("c", 0.02, 0.0)).cost(100.0));
        net.add_link(LinkRecord::new("ab", node("a", 0.0, 0.0), node("b", 0.01, 0.01)).cost(1.0));
        net.add_link(LinkRecord::new("bc", node("b", 0.01, 0.01), node("c", 0.02, 0.0)).cost(1.0));
        let (a, c) = (id(&net, "a"), id(&net, "c"));

        assert_eq!(Dijkstra::new().route(&net, a, c).unwrap().num_nodes(), 3);
        let hops = Dijkstra::with_cost(|_: &Link, _: Direction| 1.0);
        let r = hops.route(&net, a, c).unwrap();
        assert_eq!(r.num_nodes(), 2);
        assert_eq!(r.cost(), 1.0);
    }
}

// ── Nearest features and geometry ─────────────────────────────────────────────

#[cfg(test)]
mod logic {
    use rn_core::{LonLat, RoutingConfig};
    use rn_graph::{LinkRecord, Network, Route};

    use super::helpers::{id, node};
    use crate::{Dijkstra, RoutingLogic, nearest_node_within};

    fn street() -> Network {
        let mut net = Network::new();
        net.add_link(
            LinkRecord::new("ab", node("a", 0.0, 0.0), node("b", 0.02, 0.0))
                .geometry(vec![LonLat::new(0.0, 0.0), LonLat::new(0.01, 0.005), LonLat::new(0.02, 0.0)]),
        );
        net.add_link(LinkRecord::new("bc", node("b", 0.02, 0.0), node("c", 0.03, 0.0)));
        net
    }

    #[test]
    fn nearest_node_respects_search_distance() {
        let net = street();
        let d = Dijkstra::new();
        assert_eq!(d.nearest_node(&net, LonLat::new(0.021, 0.0)), Some(id(&net, "b")));
        let short = Dijkstra::new().with_config(RoutingConfig { search_distance_m: 50.0, ..RoutingConfig::default() });
        assert_eq!(short.nearest_node(&net, LonLat::new(0.021, 0.0)), None);
    }

    #[test]
    fn nearest_node_tie_is_strict() {
        let net = street();
        // Nothing is strictly closer than zero metres.
        assert_eq!(nearest_node_within(&net, LonLat::new(0.0, 0.0), 0.0), None);
    }

    #[test]
    fn nearest_link_uses_geometry_and_segments() {
        let net = street();
        let d = Dijkstra::new();
        // Near the bend of ab's geometry, far from its chord.
        assert_eq!(d.nearest_link(&net, LonLat::new(0.01, 0.006)), net.link_id("ab"));
        // bc has no geometry: measured along its segment.
        assert_eq!(d.nearest_link(&net, LonLat::new(0.025, -0.0005)), net.link_id("bc"));
    }

    #[test]
    fn routes_between_positions() {
        let net = street();
        let routes = Dijkstra::new().routes_between(&net, LonLat::new(0.0, 0.0001), LonLat::new(0.03, 0.0001), 1);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].num_nodes(), 3);
        assert!(Dijkstra::new().routes_between(&net, LonLat::new(9.0, 9.0), LonLat::new(0.03, 0.0), 1).is_empty());
    }

    #[test]
    fn geometry_reversed_against_orientation() {
        let net = street();
        let (a, b, c) = (id(&net, "a"), id(&net, "b"), id(&net, "c"));
        let d = Dijkstra::new();

        let back = d.route_geometry(&net, &Route::new(vec![b, a], 0.0)).unwrap();
        assert_eq!(back, [LonLat::new(0.02, 0.0), LonLat::new(0.01, 0.005), LonLat::new(0.0, 0.0)]);

        let forward = d.route_geometry(&net, &Route::new(vec![a, b, c], 0.0)).unwrap();
        assert_eq!(forward.len(), 4);
        assert_eq!(forward[3], LonLat::new(0.03, 0.0));

        assert!(d.route_geometry(&net, &Route::new(vec![a, c], 0.0)).is_none());
        assert_eq!(d.route_geometry(&net, &Route::at(a)), Some(vec![]));
    }
}

// ── Optimality against brute force ────────────────────────────────────────────

#[cfg(test)]
mod optimality {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use rn_core::NodeId;
    use rn_graph::{LinkRecord, Network, NodeRecord};

    use crate::{Dijkstra, LinkCost, RoutingLogic, StoredCost};

    fn random_network(rng: &mut SmallRng, nodes: usize, links: usize) -> Network {
        let mut net = Network::new();
        let recs: Vec<NodeRecord> = (0..nodes)
            .map(|i| NodeRecord::new(format!("n{i}"), rng.gen_range(0.0..0.1), rng.gen_range(0.0..0.1)))
            .collect();
        for r in &recs {
            net.add_node(r.clone());
        }
        for l in 0..links {
            let t = rng.gen_range(0..nodes);
            let h = rng.gen_range(0..nodes);
            if t == h {
                continue;
            }
            net.add_link(
                LinkRecord::new(format!("l{l}"), recs[t].clone(), recs[h].clone())
                    .cost(rng.gen_range(0.0..10.0))
                    .reverse_cost(rng.gen_range(0.0..10.0))
                    .one_way(rng.gen_bool(0.3)),
            );
        }
        net
    }

    /// Cheapest simple path by exhaustive DFS.
    fn brute_force(net: &Network, from: NodeId, to: NodeId) -> Option<f64> {
        fn dfs(net: &Network, at: NodeId, to: NodeId, cost: f64, seen: &mut Vec<NodeId>, best: &mut Option<f64>) {
            if at == to {
                *best = Some(best.map_or(cost, |b: f64| b.min(cost)));
                return;
            }
            for &l in net.node(at).unwrap().out_links() {
                let link = net.link(l).unwrap();
                let Some((next, dir)) = link.traverse_from(at) else { continue };
                if seen.contains(&next) {
                    continue;
                }
                seen.push(next);
                dfs(net, next, to, cost + StoredCost.cost_of(link, dir), seen, best);
                seen.pop();
            }
        }
        let mut best = None;
        dfs(net, from, to, 0.0, &mut vec![from], &mut best);
        best
    }

    #[test]
    fn matches_exhaustive_search() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let dijkstra = Dijkstra::new();
        for _ in 0..40 {
            let n = rng.gen_range(2..=8);
            let links = rng.gen_range(1..=16);
            let net = random_network(&mut rng, n, links);
            let ids: Vec<NodeId> = net.nodes().map(|(id, _)| id).collect();
            for &o in &ids {
                for &d in &ids {
                    let expected = brute_force(&net, o, d);
                    let got = dijkstra.route(&net, o, d).map(|r| r.cost());
                    match (expected, got) {
                        (None, None) => {}
                        (Some(e), Some(g)) => assert!((e - g).abs() < 1e-9, "{o}->{d}: {g} vs {e}"),
                        other => panic!("{o}->{d}: reachability differs {other:?}"),
                    }
                }
            }
        }
    }
}
