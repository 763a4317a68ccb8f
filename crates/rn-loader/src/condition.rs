//! Ingestion filters.
//!
//! A [`QueryCondition`] names an area of interest (a rectangle grown by a
//! buffer in metres), optionally a set of road classes, and whether link
//! geometry should be kept.  A loader keeps a link when *any* condition
//! accepts it.

use rn_core::config::DEFAULT_BUFFER_M;
use rn_core::geometry::bounding_rect;
use rn_core::{LonLat, Rect};

#[derive(Clone, Debug, PartialEq)]
pub struct QueryCondition {
    rect:          Option<Rect>,
    buffer_m:      f64,
    need_geometry: bool,
    road_classes:  Option<Vec<i32>>,
}

impl QueryCondition {
    /// Links touching `rect` grown by [`DEFAULT_BUFFER_M`].
    pub fn new(rect: Rect) -> Self {
        Self { rect: Some(rect), ..Self::everywhere() }
    }

    /// No area restriction.
    pub fn everywhere() -> Self {
        Self { rect: None, buffer_m: DEFAULT_BUFFER_M, need_geometry: false, road_classes: None }
    }

    /// Area covering every valid point in `points`; `None` if there is none.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a LonLat>,
    {
        bounding_rect(points).map(Self::new)
    }

    pub fn with_buffer(mut self, buffer_m: f64) -> Self {
        self.buffer_m = buffer_m;
        self
    }

    pub fn with_geometry(mut self, need_geometry: bool) -> Self {
        self.need_geometry = need_geometry;
        self
    }

    /// Only keep links whose road class is listed.
    pub fn with_road_classes(mut self, classes: Vec<i32>) -> Self {
        self.road_classes = Some(classes);
        self
    }

    /// The rectangle as given (corners normalised).
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    /// The rectangle grown by the buffer.
    pub fn bounds(&self) -> Option<Rect> {
        self.rect.map(|r| r.buffered(self.buffer_m))
    }

    pub fn buffer_m(&self) -> f64 {
        self.buffer_m
    }

    pub fn need_geometry(&self) -> bool {
        self.need_geometry
    }

    pub fn road_classes(&self) -> Option<&[i32]> {
        self.road_classes.as_deref()
    }

    /// `true` if the tail or head lies inside [`bounds`](Self::bounds) and
    /// the road class, when this condition lists classes, is one of them.
    /// A link without a class never passes a class filter.
    pub fn accepts(&self, tail: LonLat, head: LonLat, road_class: Option<i32>) -> bool {
        let in_area = match self.bounds() {
            Some(b) => b.contains(tail) || b.contains(head),
            None => true,
        };
        let class_ok = match (&self.road_classes, road_class) {
            (None, _) => true,
            (Some(classes), Some(c)) => classes.contains(&c),
            (Some(_), None) => false,
        };
        in_area && class_ok
    }
}

impl Default for QueryCondition {
    fn default() -> Self {
        Self::everywhere()
    }
}
