//! Unit tests for rn-matching.

#[cfg(test)]
mod helpers {
    use rn_core::LonLat;
    use rn_graph::{LinkRecord, Network, NodeRecord};

    /// `bent`: a(0,0) → (0.01,0.01) → b(0.02,0) with geometry;
    /// `plain`: b → c(0.03,0) without geometry.
    pub fn network() -> Network {
        let mut net = Network::new();
        net.add_link(
            LinkRecord::new("bent", NodeRecord::new("a", 0.0, 0.0), NodeRecord::new("b", 0.02, 0.0))
                .geometry(vec![LonLat::new(0.0, 0.0), LonLat::new(0.01, 0.01), LonLat::new(0.02, 0.0)]),
        );
        net.add_link(LinkRecord::new(
            "plain",
            NodeRecord::new("b", 0.02, 0.0),
            NodeRecord::new("c", 0.03, 0.0),
        ));
        net
    }
}

// ── Link matching ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod link_mode {
    use rn_core::LonLat;

    use crate::{Matcher, NearestMatcher};

    #[test]
    fn snaps_onto_geometry_not_chord() {
        let net = super::helpers::network();
        // Directly above the bend: the chord a–b is ~1.1 km away, the bend ~11 m.
        let m = NearestMatcher::default().match_point(&net, LonLat::new(0.01, 0.0101));
        assert!(m.is_valid());
        assert_eq!(m.link(), net.link_id("bent"));
        assert!(m.distance() < 20.0, "got {}", m.distance());
        assert!(m.node().is_none());
    }

    #[test]
    fn falls_back_to_segment_without_geometry() {
        let net = super::helpers::network();
        // `bent` is ~570 m away, outside the range; `plain` ~110 m.
        let m = NearestMatcher::default().match_point_within(&net, LonLat::new(0.025, -0.001), 200.0);
        assert!(m.is_valid());
        assert_eq!(m.link(), net.link_id("plain"));
        let q = m.nearest_point().unwrap();
        assert!((q.lon - 0.025).abs() < 1e-12);
        assert_eq!(q.lat, 0.0);
    }

    #[test]
    fn zero_radius_away_from_network_is_invalid() {
        let net = super::helpers::network();
        let m = NearestMatcher::default().match_point_within(&net, LonLat::new(0.005, -0.002), 0.0);
        assert!(!m.is_valid());
        assert_eq!(m.distance(), f64::MAX);
        assert!(m.link().is_none());
    }

    #[test]
    fn out_of_range_is_invalid() {
        let net = super::helpers::network();
        let m = NearestMatcher::default().match_point_within(&net, LonLat::new(1.0, 1.0), 100.0);
        assert!(!m.is_valid());
    }

    #[test]
    fn empty_network() {
        let net = rn_graph::Network::new();
        let m = NearestMatcher::default().match_point(&net, LonLat::new(0.0, 0.0));
        assert!(!m.is_valid());
    }

    #[test]
    fn sequence_preserves_order() {
        let net = super::helpers::network();
        let points = [LonLat::new(0.01, 0.0101), LonLat::new(5.0, 5.0), LonLat::new(0.025, -0.001)];
        let results = NearestMatcher::default().match_points_within(&net, &points, 200.0);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].link(), net.link_id("bent"));
        assert!(!results[1].is_valid());
        assert_eq!(results[2].link(), net.link_id("plain"));
        for (r, p) in results.iter().zip(points) {
            assert_eq!(r.input(), p);
        }
    }
}

// ── Node matching ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod node_mode {
    use rn_core::{LonLat, MatchTarget, MatchingConfig};

    use crate::{Matcher, NearestMatcher};

    fn node_matcher() -> NearestMatcher {
        NearestMatcher::new(MatchingConfig { target: MatchTarget::Node, ..MatchingConfig::default() })
    }

    #[test]
    fn picks_closest_node() {
        let net = super::helpers::network();
        let m = node_matcher().match_point(&net, LonLat::new(0.027, 0.0));
        assert!(m.is_valid());
        assert_eq!(m.node(), net.node_id("c"));
        assert_eq!(m.nearest_point(), Some(LonLat::new(0.03, 0.0)));
        assert!(m.link().is_none());
    }

    #[test]
    fn exact_hit_with_zero_radius() {
        let net = super::helpers::network();
        let m = node_matcher().match_point_within(&net, LonLat::new(0.02, 0.0), 0.0);
        assert_eq!(m.node(), net.node_id("b"));
        assert_eq!(m.distance(), 0.0);
    }

    #[test]
    fn zero_radius_miss() {
        let net = super::helpers::network();
        let m = node_matcher().match_point_within(&net, LonLat::new(0.021, 0.0), 0.0);
        assert!(!m.is_valid());
    }
}

// ── Result formatting ─────────────────────────────────────────────────────────

#[cfg(test)]
mod formatting {
    use rn_core::{LonLat, NodeId};

    use crate::MatchingResult;
    use crate::result::format_coord;

    #[test]
    fn coordinates_trim_trailing_zeros() {
        assert_eq!(format_coord(139.5), "139.5");
        assert_eq!(format_coord(35.0), "35");
        assert_eq!(format_coord(0.1234567), "0.123457");
        assert_eq!(format_coord(-0.0000001), "0");
    }

    #[test]
    fn valid_link_result_line() {
        let net = super::helpers::network();
        let bent = net.link_id("bent").unwrap();
        let r = MatchingResult::on_link(LonLat::new(0.01, 0.02), LonLat::new(0.01, 0.01), bent, 1.5)
            .with_attributes(vec!["u1".into(), "08:00".into()]);
        assert_eq!(r.to_result_string(&net, "\t"), "0.01\t0.02\t0.01\t0.01\t1.5\tbent\tu1\t08:00");
    }

    #[test]
    fn invalid_result_line_has_empty_fields() {
        let net = super::helpers::network();
        let r = MatchingResult::unmatched(LonLat::new(1.0, 2.0));
        assert_eq!(r.to_result_string(&net, ","), "1,2,,,,");
    }

    #[test]
    fn node_result_has_no_link_key() {
        let net = super::helpers::network();
        let r = MatchingResult::on_node(LonLat::new(0.0, 0.0), LonLat::new(0.0, 0.0), NodeId(0), 0.0);
        assert_eq!(r.fields(&net)[5], "");
    }
}

// ── CSV output ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_output {
    use rn_core::LonLat;
    use tempfile::TempDir;

    use crate::{CsvMatchWriter, Matcher, NearestMatcher};

    #[test]
    fn header_and_rows() {
        let dir: TempDir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("matched.csv");
        let net = super::helpers::network();
        let results = NearestMatcher::default()
            .match_points(&net, &[LonLat::new(0.01, 0.0101), LonLat::new(5.0, 5.0)])
            .into_iter()
            .map(|r| r.with_attributes(vec!["p".into()]))
            .collect::<Vec<_>>();

        let mut w = CsvMatchWriter::create(&path, &["tag"]).unwrap();
        w.write_all(&net, &results).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["lon", "lat", "matched_lon", "matched_lat", "distance", "link_id", "tag"]);
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][5], "bent");
        assert_eq!(&rows[0][6], "p");
        assert_eq!(&rows[1][2], "");
    }

    #[test]
    fn in_memory_writer() {
        let net = super::helpers::network();
        let r = NearestMatcher::default().match_point_within(&net, LonLat::new(0.025, -0.001), 200.0);
        let mut w = CsvMatchWriter::from_writer(Vec::new(), &[]).unwrap();
        w.write(&net, &r).unwrap();
        let bytes = w.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().next(), Some("lon,lat,matched_lon,matched_lat,distance,link_id"));
        assert!(text.trim_end().ends_with(",plain"));
    }
}
