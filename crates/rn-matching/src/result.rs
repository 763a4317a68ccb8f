//! Outcome of matching one point.

use rn_core::{LinkId, LonLat, NodeId};
use rn_graph::Network;

/// Input point, the point it snapped to, and what it snapped onto.
///
/// Check [`is_valid`](Self::is_valid) before using the snapped point or the
/// distance: an invalid result carries `f64::MAX` as its distance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchingResult {
    input:      LonLat,
    nearest:    Option<LonLat>,
    link:       Option<LinkId>,
    node:       Option<NodeId>,
    distance:   f64,
    attributes: Vec<String>,
}

impl MatchingResult {
    /// No candidate was found.
    pub fn unmatched(input: LonLat) -> Self {
        Self {
            input,
            nearest: None,
            link: None,
            node: None,
            distance: f64::MAX,
            attributes: Vec::new(),
        }
    }

    pub fn on_link(input: LonLat, nearest: LonLat, link: LinkId, distance: f64) -> Self {
        Self { nearest: Some(nearest), link: Some(link), distance, ..Self::unmatched(input) }
    }

    pub fn on_node(input: LonLat, nearest: LonLat, node: NodeId, distance: f64) -> Self {
        Self { nearest: Some(nearest), node: Some(node), distance, ..Self::unmatched(input) }
    }

    /// Attach pass-through attributes, appended to the result line.
    pub fn with_attributes(mut self, attributes: Vec<String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// `true` iff a nearest point was found.
    pub fn is_valid(&self) -> bool {
        self.nearest.is_some()
    }

    pub fn input(&self) -> LonLat {
        self.input
    }

    pub fn nearest_point(&self) -> Option<LonLat> {
        self.nearest
    }

    /// Matched link in link mode.
    pub fn link(&self) -> Option<LinkId> {
        self.link
    }

    /// Matched node in node mode.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Metres from the input to the snapped point; `f64::MAX` if invalid.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Output fields: input lon, lat, matched lon, lat, distance, link key,
    /// then the attributes.  Matched fields are empty when invalid.
    pub fn fields(&self, network: &Network) -> Vec<String> {
        let mut out = Vec::with_capacity(6 + self.attributes.len());
        out.push(format_coord(self.input.lon));
        out.push(format_coord(self.input.lat));
        match self.nearest {
            Some(p) => {
                out.push(format_coord(p.lon));
                out.push(format_coord(p.lat));
                out.push(self.distance.to_string());
            }
            None => out.extend([String::new(), String::new(), String::new()]),
        }
        out.push(
            self.link
                .and_then(|l| network.link(l))
                .map(|l| l.key().to_owned())
                .unwrap_or_default(),
        );
        out.extend(self.attributes.iter().cloned());
        out
    }

    /// [`fields`](Self::fields) joined by `delim`.
    pub fn to_result_string(&self, network: &Network, delim: &str) -> String {
        self.fields(network).join(delim)
    }
}

/// Up to six decimals, trailing zeros dropped.
pub(crate) fn format_coord(v: f64) -> String {
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" => "0".to_owned(),
        s => s.to_owned(),
    }
}
