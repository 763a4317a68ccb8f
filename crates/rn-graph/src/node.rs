//! Network nodes.

use rn_core::{LinkId, LonLat};

/// A positioned vertex owned by a [`Network`](crate::Network).
///
/// A bidirectional link appears in both `in_links` and `out_links` of each
/// of its endpoints; a one-way link only in the tail's `out_links` and the
/// head's `in_links`.
#[derive(Clone, Debug)]
pub struct Node {
    key:       String,
    pos:       LonLat,
    in_links:  Vec<LinkId>,
    out_links: Vec<LinkId>,
}

impl Node {
    pub(crate) fn new(key: String, pos: LonLat) -> Self {
        Self { key, pos, in_links: Vec::new(), out_links: Vec::new() }
    }

    /// External identifier, unique within the owning network.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Position; may be [`LonLat::INVALID`] for nodes loaded without one.
    pub fn pos(&self) -> LonLat {
        self.pos
    }

    /// Links that can be traversed *into* this node.
    pub fn in_links(&self) -> &[LinkId] {
        &self.in_links
    }

    /// Links that can be traversed *out of* this node.
    pub fn out_links(&self) -> &[LinkId] {
        &self.out_links
    }

    /// Every incident link once, in-links first.
    pub fn all_links(&self) -> Vec<LinkId> {
        let mut all = Vec::with_capacity(self.in_links.len() + self.out_links.len());
        for &l in self.in_links.iter().chain(&self.out_links) {
            if !all.contains(&l) {
                all.push(l);
            }
        }
        all
    }

    /// `true` when no link touches this node.
    pub fn is_isolated(&self) -> bool {
        self.in_links.is_empty() && self.out_links.is_empty()
    }

    pub(crate) fn attach_in(&mut self, link: LinkId) {
        self.in_links.push(link);
    }

    pub(crate) fn attach_out(&mut self, link: LinkId) {
        self.out_links.push(link);
    }

    /// Drop the first occurrence of `link` from the in-list.
    pub(crate) fn detach_in(&mut self, link: LinkId) -> bool {
        detach(&mut self.in_links, link)
    }

    /// Drop the first occurrence of `link` from the out-list.
    pub(crate) fn detach_out(&mut self, link: LinkId) -> bool {
        detach(&mut self.out_links, link)
    }
}

fn detach(list: &mut Vec<LinkId>, link: LinkId) -> bool {
    match list.iter().position(|&l| l == link) {
        Some(i) => {
            list.remove(i);
            true
        }
        None => false,
    }
}

// ── NodeRecord ────────────────────────────────────────────────────────────────

/// Ingestion-side description of a node: what loaders hand to
/// [`Network::add_node`](crate::Network::add_node) or embed in a
/// [`LinkRecord`](crate::LinkRecord).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRecord {
    pub key: String,
    pub pos: LonLat,
}

impl NodeRecord {
    pub fn new(key: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self { key: key.into(), pos: LonLat::new(lon, lat) }
    }

    /// A node whose position is not known.
    pub fn unplaced(key: impl Into<String>) -> Self {
        Self { key: key.into(), pos: LonLat::INVALID }
    }
}
