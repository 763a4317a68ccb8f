//! Network links and the records loaders build them from.

use rn_core::{LonLat, NodeId};

use crate::node::NodeRecord;

/// Travel direction along a link relative to its stored orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Tail → head; priced with `cost`.
    Forward,
    /// Head → tail on a bidirectional link; priced with `reverse_cost`.
    Reverse,
}

impl Direction {
    /// Slot in a `[forward, reverse]` pair.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Reverse => 1,
        }
    }
}

// ── Link ──────────────────────────────────────────────────────────────────────

/// A weighted edge between two nodes of the same [`Network`](crate::Network).
///
/// Endpoints are handles into the owning network, never owned values.
#[derive(Clone, Debug)]
pub struct Link {
    key:          String,
    tail:         NodeId,
    head:         NodeId,
    cost:         f64,
    reverse_cost: f64,
    one_way:      bool,
    geometry:     Option<Vec<LonLat>>,
    speed_kmh:    Option<f64>,
    road_class:   Option<i32>,
}

impl Link {
    pub(crate) fn from_record(
        record: LinkRecord,
        tail: NodeId,
        head: NodeId,
        default_cost: f64,
    ) -> Self {
        let cost = record.cost.unwrap_or(default_cost);
        Self {
            key:          record.key,
            tail,
            head,
            cost,
            reverse_cost: record.reverse_cost.unwrap_or(cost),
            one_way:      record.one_way,
            geometry:     record.geometry,
            speed_kmh:    record.speed_kmh,
            road_class:   record.road_class,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn tail(&self) -> NodeId {
        self.tail
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    /// Tail → head cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Head → tail cost.  Meaningless on one-way links, which are never
    /// traversed in reverse.
    pub fn reverse_cost(&self) -> f64 {
        self.reverse_cost
    }

    /// Stored cost for travel in `dir`.
    #[inline]
    pub fn cost_in(&self, dir: Direction) -> f64 {
        match dir {
            Direction::Forward => self.cost,
            Direction::Reverse => self.reverse_cost,
        }
    }

    pub fn is_one_way(&self) -> bool {
        self.one_way
    }

    /// Free-flow speed attribute, when the source data has one.
    pub fn speed_kmh(&self) -> Option<f64> {
        self.speed_kmh
    }

    /// Source-specific road classification code.
    pub fn road_class(&self) -> Option<i32> {
        self.road_class
    }

    /// `true` if the link carries a non-empty polyline.
    pub fn has_geometry(&self) -> bool {
        self.geometry.as_ref().is_some_and(|g| !g.is_empty())
    }

    /// Polyline, oriented tail → head.
    pub fn geometry(&self) -> Option<&[LonLat]> {
        self.geometry.as_deref().filter(|g| !g.is_empty())
    }

    /// Where travel from `from` along this link ends up, and in which
    /// direction.  `None` if the link cannot be entered from `from`.
    #[inline]
    pub fn traverse_from(&self, from: NodeId) -> Option<(NodeId, Direction)> {
        if from == self.tail {
            Some((self.head, Direction::Forward))
        } else if from == self.head && !self.one_way {
            Some((self.tail, Direction::Reverse))
        } else {
            None
        }
    }

    /// Direction of a hop `from` → `to` along this link, honouring one-way.
    pub fn direction_between(&self, from: NodeId, to: NodeId) -> Option<Direction> {
        self.traverse_from(from)
            .filter(|&(end, _)| end == to)
            .map(|(_, dir)| dir)
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}::({}-({:.6})-{})::{}",
            self.key, self.tail, self.cost, self.head, self.one_way
        )
    }
}

// ── LinkRecord ────────────────────────────────────────────────────────────────

/// Ingestion-side description of a link.
///
/// Endpoints are [`NodeRecord`]s: when a key is already present in the
/// target network the existing node is reused and the record's position is
/// ignored.
///
/// # Example
///
/// ```
/// use rn_graph::{LinkRecord, Network, NodeRecord};
///
/// let mut net = Network::new();
/// let rec = LinkRecord::new("L1", NodeRecord::new("a", 0.0, 0.0), NodeRecord::new("b", 0.001, 0.0))
///     .cost(5.0)
///     .reverse_cost(7.0);
/// let l = net.add_link(rec);
/// assert_eq!(net.link(l).unwrap().reverse_cost(), 7.0);
/// assert_eq!(net.node_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkRecord {
    pub key:          String,
    pub tail:         NodeRecord,
    pub head:         NodeRecord,
    /// `None` → straight-line distance between the endpoints.
    pub cost:         Option<f64>,
    /// `None` → same as `cost`.
    pub reverse_cost: Option<f64>,
    pub one_way:      bool,
    /// Polyline, first point at the tail.
    pub geometry:     Option<Vec<LonLat>>,
    pub speed_kmh:    Option<f64>,
    pub road_class:   Option<i32>,
}

impl LinkRecord {
    /// Bidirectional link with distance cost and no geometry.
    pub fn new(key: impl Into<String>, tail: NodeRecord, head: NodeRecord) -> Self {
        Self {
            key: key.into(),
            tail,
            head,
            cost: None,
            reverse_cost: None,
            one_way: false,
            geometry: None,
            speed_kmh: None,
            road_class: None,
        }
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn reverse_cost(mut self, reverse_cost: f64) -> Self {
        self.reverse_cost = Some(reverse_cost);
        self
    }

    pub fn one_way(mut self, one_way: bool) -> Self {
        self.one_way = one_way;
        self
    }

    pub fn geometry(mut self, geometry: Vec<LonLat>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn speed_kmh(mut self, speed_kmh: f64) -> Self {
        self.speed_kmh = Some(speed_kmh);
        self
    }

    pub fn road_class(mut self, road_class: i32) -> Self {
        self.road_class = Some(road_class);
        self
    }
}
