//! Bounding-box spatial index.
//!
//! A thin wrapper over an `rstar` R-tree whose entries are rectangles tagged
//! with a handle.  Queries return *candidates* whose box intersects the
//! query box; callers apply the exact distance or containment filter.

use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};

use rn_core::Rect;

type Entry<T> = GeomWithData<Rectangle<[f64; 2]>, T>;

fn entry<T>(rect: Rect, item: T) -> Entry<T> {
    GeomWithData::new(Rectangle::from_corners(rect.min_corner(), rect.max_corner()), item)
}

/// R-tree over `(bounding box, handle)` pairs.
pub struct SpatialIndex<T> {
    tree: RTree<Entry<T>>,
}

impl<T: Copy + PartialEq> SpatialIndex<T> {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Build in one pass.  O(N log N), and yields a better-balanced tree
    /// than N successive inserts.
    pub fn bulk_load(items: Vec<(Rect, T)>) -> Self {
        let entries = items.into_iter().map(|(r, t)| entry(r, t)).collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn insert(&mut self, rect: Rect, item: T) {
        self.tree.insert(entry(rect, item));
    }

    /// Remove the entry previously inserted with exactly this box and
    /// handle.  Returns `false` if there was none.
    pub fn remove(&mut self, rect: Rect, item: T) -> bool {
        self.tree.remove(&entry(rect, item)).is_some()
    }

    /// Handles whose box intersects `rect` (boundary contact counts).
    pub fn query(&self, rect: Rect) -> Vec<T> {
        let envelope = AABB::from_corners(rect.min_corner(), rect.max_corner());
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|e| e.data)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl<T: Copy + PartialEq> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
