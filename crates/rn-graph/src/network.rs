//! The network arena: nodes, links, and their spatial indexes.
//!
//! # Storage
//!
//! Nodes and links live in slot vectors indexed by [`NodeId`] / [`LinkId`].
//! Removing an entity empties its slot; slots are not reused until
//! [`Network::clear`], so handles held elsewhere never alias a different
//! entity.  String keys map to slots through two hash maps.
//!
//! # Spatial indexes
//!
//! Two optional R-trees (see [`NetworkConfig`]):
//!
//! - **nodes** — one zero-area box per node with a valid position;
//! - **links** — the envelope of each link's polyline.  Links without
//!   geometry are not indexed and are invisible to link range queries.
//!
//! Entries are inserted as entities are added and removed with them.  With
//! an index disabled, range queries fall back to a linear scan with an exact
//! rectangle-intersection test.
//!
//! # Mutation
//!
//! A `Network` is built once and then queried.  Mutation takes `&mut self`,
//! so the borrow checker enforces the single-writer rule; shared `&Network`
//! queries from several threads are safe once building is done.

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, warn};

use rn_core::geometry::{distance, line_distance};
use rn_core::{LinkId, LonLat, NetworkConfig, NodeId, Rect};

use crate::index::SpatialIndex;
use crate::link::{Link, LinkRecord};
use crate::node::{Node, NodeRecord};

/// Road network: the owner of every node, link, and index entry.
pub struct Network {
    nodes:      Vec<Option<Node>>,
    links:      Vec<Option<Link>>,
    node_keys:  HashMap<String, NodeId>,
    link_keys:  HashMap<String, LinkId>,
    node_index: Option<SpatialIndex<NodeId>>,
    link_index: Option<SpatialIndex<LinkId>>,
}

impl Network {
    /// Empty network with both spatial indexes enabled.
    pub fn new() -> Self {
        Self::with_config(NetworkConfig::default())
    }

    pub fn with_config(config: NetworkConfig) -> Self {
        Self {
            nodes:      Vec::new(),
            links:      Vec::new(),
            node_keys:  HashMap::new(),
            link_keys:  HashMap::new(),
            node_index: config.node_index.then(SpatialIndex::new),
            link_index: config.link_index.then(SpatialIndex::new),
        }
    }

    pub fn config(&self) -> NetworkConfig {
        NetworkConfig {
            node_index: self.node_index.is_some(),
            link_index: self.link_index.is_some(),
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_keys.len()
    }

    pub fn link_count(&self) -> usize {
        self.link_keys.len()
    }

    /// `true` when there is nothing to route over: no nodes *or* no links.
    pub fn is_empty(&self) -> bool {
        self.node_keys.is_empty() || self.link_keys.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.index()).and_then(Option::as_ref)
    }

    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.node_keys.get(key).copied()
    }

    pub fn link_id(&self, key: &str) -> Option<LinkId> {
        self.link_keys.get(key).copied()
    }

    pub fn has_node(&self, key: &str) -> bool {
        self.node_keys.contains_key(key)
    }

    /// Position of a live node.
    pub fn node_pos(&self, id: NodeId) -> Option<LonLat> {
        self.node(id).map(Node::pos)
    }

    /// Live nodes in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            // Slots never exceed u32::MAX (see `next_slot`).
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeId(i as u32), n)))
    }

    /// Live links in slot order.
    pub fn links(&self) -> impl Iterator<Item = (LinkId, &Link)> + '_ {
        self.links
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.as_ref().map(|l| (LinkId(i as u32), l)))
    }

    /// Every link incident to `node`, once each, in-links first.
    pub fn all_links(&self, node: NodeId) -> Vec<LinkId> {
        self.node(node).map(Node::all_links).unwrap_or_default()
    }

    /// First link out of `tail` that ends at `head`.
    ///
    /// Scans `tail`'s out-links; a bidirectional link stored as
    /// `head → tail` also qualifies.  `None` if the pair is not connected in
    /// that direction.
    pub fn link_between(&self, tail: NodeId, head: NodeId) -> Option<LinkId> {
        let node = self.node(tail)?;
        node.out_links().iter().copied().find(|&l| {
            self.link(l)
                .is_some_and(|link| link.direction_between(tail, head).is_some())
        })
    }

    /// The polyline to measure a link against: its geometry when present,
    /// otherwise the straight tail–head segment (invalid endpoints dropped).
    pub fn link_line<'a>(&'a self, link: &'a Link) -> Cow<'a, [LonLat]> {
        match link.geometry() {
            Some(g) => Cow::Borrowed(g),
            None => Cow::Owned(
                [link.tail(), link.head()]
                    .into_iter()
                    .filter_map(|n| self.node_pos(n))
                    .filter(|p| p.is_valid())
                    .collect(),
            ),
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Register a node.  Idempotent: an existing key returns its handle and
    /// the record is ignored.
    ///
    /// # Panics
    ///
    /// If the network already holds `u32::MAX` node slots.
    pub fn add_node(&mut self, record: NodeRecord) -> NodeId {
        if let Some(&id) = self.node_keys.get(&record.key) {
            return id;
        }
        let id: NodeId = next_slot(self.nodes.len());
        if let Some(index) = self.node_index.as_mut() {
            if record.pos.is_valid() {
                index.insert(Rect::from_point(record.pos), id);
            }
        }
        self.node_keys.insert(record.key.clone(), id);
        self.nodes.push(Some(Node::new(record.key, record.pos)));
        id
    }

    /// Register a link, creating its endpoints if their keys are new.
    ///
    /// Idempotent: an existing link key returns its handle and nothing is
    /// touched.  The link becomes an out-link of its tail and an in-link of
    /// its head; a bidirectional link is also registered the other way
    /// round.  Only links with geometry enter the link index.
    ///
    /// # Panics
    ///
    /// If the network already holds `u32::MAX` link slots.
    pub fn add_link(&mut self, record: LinkRecord) -> LinkId {
        if let Some(&id) = self.link_keys.get(&record.key) {
            return id;
        }
        let tail = self.add_node(record.tail.clone());
        let head = self.add_node(record.head.clone());

        let default_cost = match (self.node_pos(tail), self.node_pos(head)) {
            (Some(t), Some(h)) if t.is_valid() && h.is_valid() => distance(t, h),
            _ => {
                if record.cost.is_none() {
                    warn!(link = %record.key, "no cost given and an endpoint has no position");
                }
                f64::NAN
            }
        };

        let id: LinkId = next_slot(self.links.len());
        let link = Link::from_record(record, tail, head, default_cost);

        if let Some(n) = self.node_mut(tail) {
            n.attach_out(id);
            if !link.is_one_way() {
                n.attach_in(id);
            }
        }
        if let Some(n) = self.node_mut(head) {
            n.attach_in(id);
            if !link.is_one_way() {
                n.attach_out(id);
            }
        }

        if let (Some(index), Some(rect)) = (self.link_index.as_mut(), link_envelope(&link)) {
            index.insert(rect, id);
        }

        self.link_keys.insert(link.key().to_owned(), id);
        self.links.push(Some(link));
        id
    }

    /// Remove a link.
    ///
    /// Detaches it from both endpoints (both directions when bidirectional),
    /// removes any endpoint left isolated, then drops the link and its index
    /// entry.  Returns `false` if the link was not live.
    pub fn remove_link(&mut self, id: LinkId) -> bool {
        let Some(link) = self.links.get_mut(id.index()).and_then(Option::take) else {
            return false;
        };
        self.link_keys.remove(link.key());

        let head = link.head();
        if let Some(n) = self.node_mut(head) {
            n.detach_in(id);
            if !link.is_one_way() {
                n.detach_out(id);
            }
        }
        if self.node(head).is_some_and(Node::is_isolated) {
            self.retire_node(head);
        }

        let tail = link.tail();
        if let Some(n) = self.node_mut(tail) {
            n.detach_out(id);
            if !link.is_one_way() {
                n.detach_in(id);
            }
        }
        if self.node(tail).is_some_and(Node::is_isolated) {
            self.retire_node(tail);
        }

        if let (Some(index), Some(rect)) = (self.link_index.as_mut(), link_envelope(&link)) {
            index.remove(rect, id);
        }
        debug!(link = %link.key(), "removed link");
        true
    }

    /// Remove a node together with every incident link.
    ///
    /// Incident links are also detached from the node at their other end, so
    /// no neighbour keeps a handle to a dead link.  Neighbours left isolated
    /// are kept.  Returns `false` if the node was not live.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        let incident = node.all_links();

        for &link_id in &incident {
            let Some(link) = self.links.get_mut(link_id.index()).and_then(Option::take) else {
                continue;
            };
            self.link_keys.remove(link.key());
            if let (Some(index), Some(rect)) = (self.link_index.as_mut(), link_envelope(&link)) {
                index.remove(rect, link_id);
            }
            let other = if link.tail() == id { link.head() } else { link.tail() };
            if other != id {
                if let Some(n) = self.node_mut(other) {
                    n.detach_in(link_id);
                    n.detach_out(link_id);
                }
            }
        }

        self.retire_node(id);
        debug!(node = %id, links = incident.len(), "removed node");
        true
    }

    /// Drop every entity and start over with empty indexes.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
        self.node_keys.clear();
        self.link_keys.clear();
        if let Some(index) = self.node_index.as_mut() {
            *index = SpatialIndex::new();
        }
        if let Some(index) = self.link_index.as_mut() {
            *index = SpatialIndex::new();
        }
    }

    /// Rebuild the enabled indexes by bulk load from live entities.
    ///
    /// Incremental inserts keep the indexes correct; this only improves
    /// their balance after heavy ingestion.
    pub fn reindex(&mut self) {
        if self.node_index.is_some() {
            let items = self
                .nodes()
                .filter(|(_, n)| n.pos().is_valid())
                .map(|(id, n)| (Rect::from_point(n.pos()), id))
                .collect();
            self.node_index = Some(SpatialIndex::bulk_load(items));
        }
        if self.link_index.is_some() {
            let items = self
                .links()
                .filter_map(|(id, l)| link_envelope(l).map(|r| (r, id)))
                .collect();
            self.link_index = Some(SpatialIndex::bulk_load(items));
        }
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nodes whose position lies in `rect`.
    ///
    /// With the node index this returns index candidates; without it, an
    /// exact scan over all positioned nodes.
    pub fn query_nodes(&self, rect: Rect) -> Vec<NodeId> {
        match &self.node_index {
            Some(index) => index.query(rect),
            None => self
                .nodes()
                .filter(|(_, n)| rect.intersects_point(n.pos()))
                .map(|(id, _)| id)
                .collect(),
        }
    }

    /// Links whose geometry touches `rect`.  Links without geometry never
    /// match.
    pub fn query_links(&self, rect: Rect) -> Vec<LinkId> {
        match &self.link_index {
            Some(index) => index.query(rect),
            None => self
                .links()
                .filter(|(_, l)| l.geometry().is_some_and(|g| rect.intersects_line(g)))
                .map(|(id, _)| id)
                .collect(),
        }
    }

    /// Nodes within `radius_m` metres of `center`.
    ///
    /// Coarse box query followed by an exact distance filter, so nothing
    /// farther than `radius_m` is ever returned.
    pub fn query_nodes_within(&self, center: LonLat, radius_m: f64) -> Vec<NodeId> {
        self.query_nodes(Rect::around(center, radius_m))
            .into_iter()
            .filter(|&id| {
                self.node_pos(id)
                    .is_some_and(|p| distance(center, p) <= radius_m)
            })
            .collect()
    }

    /// Links whose geometry passes within `radius_m` metres of `center`.
    pub fn query_links_within(&self, center: LonLat, radius_m: f64) -> Vec<LinkId> {
        self.query_links(Rect::around(center, radius_m))
            .into_iter()
            .filter(|&id| {
                self.link(id)
                    .and_then(Link::geometry)
                    .and_then(|g| line_distance(g, center))
                    .is_some_and(|d| d <= radius_m)
            })
            .collect()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    fn retire_node(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.index()).and_then(Option::take) else {
            return;
        };
        self.node_keys.remove(node.key());
        if let Some(index) = self.node_index.as_mut() {
            if node.pos().is_valid() {
                index.remove(Rect::from_point(node.pos()), id);
            }
        }
    }
}

/// Handle for the slot at `len`.  `u32::MAX` is the `INVALID` sentinel and
/// is never handed out.
pub(crate) fn next_slot<I: TryFrom<usize>>(len: usize) -> I {
    match I::try_from(len) {
        Ok(id) if len < u32::MAX as usize => id,
        _ => panic!("network arena full: slot {len} exceeds the u32 handle range"),
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

/// Index envelope of a link, `None` when it has no usable geometry.
fn link_envelope(link: &Link) -> Option<Rect> {
    link.geometry().and_then(Rect::of_line)
}
