//! Geographic coordinate type and the pure geometry operations the graph,
//! routing, and matching layers call.
//!
//! Coordinates are WGS-84 longitude/latitude in `f64`.  Metric distances use
//! the Hubeny approximation on the WGS-84 ellipsoid, which is accurate to a
//! few centimetres per kilometre at road-network scale.  Projections onto
//! segments are planar in lon/lat space, matching how the spatial index
//! stores envelopes.

use geo::{Intersects, LineString, Point, Polygon, coord};

/// Approximate degrees per metre (0.012° per km).
///
/// Generous for latitude everywhere (one degree of latitude is ~111 km) and
/// for longitude up to ~41.5° latitude.  Further poleward a degree of
/// longitude is shorter than 1/0.012 km, so a box grown by this factor alone
/// is too narrow east–west.  [`Rect::around`] compensates; [`Rect::buffered`]
/// (ingestion areas) applies the factor as is.
pub const APPROX_DEG_PER_M: f64 = 0.012 / 1_000.0;

/// Floor for `cos(lat)` when widening a box in longitude, so boxes near the
/// poles stay finite.
const MIN_LON_SCALE: f64 = 0.01;

const WGS84_EQUATOR_RADIUS: f64 = 6_378_137.0;
const WGS84_POLAR_RADIUS: f64 = 6_356_752.314245;
const WGS84_ECCENTRICITY_2: f64 = (WGS84_EQUATOR_RADIUS * WGS84_EQUATOR_RADIUS
    - WGS84_POLAR_RADIUS * WGS84_POLAR_RADIUS)
    / (WGS84_EQUATOR_RADIUS * WGS84_EQUATOR_RADIUS);

// ── LonLat ────────────────────────────────────────────────────────────────────

/// A WGS-84 position.  `x` is longitude, `y` is latitude.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    /// Sentinel for "position unknown".  Nodes created without coordinates
    /// carry this and are never inserted into the node index.
    pub const INVALID: LonLat = LonLat { lon: f64::NAN, lat: f64::NAN };

    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// `false` if either component is NaN.
    #[inline]
    pub fn is_valid(self) -> bool {
        !self.lon.is_nan() && !self.lat.is_nan()
    }

    /// Hubeny distance to `other` in metres.
    #[inline]
    pub fn distance_m(self, other: LonLat) -> f64 {
        distance(self, other)
    }

    #[inline]
    pub(crate) fn as_array(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl std::fmt::Display for LonLat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

// ── Distance & projection ─────────────────────────────────────────────────────

/// Distance in metres between `p` and `q` (Hubeny formula, WGS-84).
pub fn distance(p: LonLat, q: LonLat) -> f64 {
    let a  = WGS84_EQUATOR_RADIUS;
    let e2 = WGS84_ECCENTRICITY_2;

    let dy = (p.lat - q.lat).to_radians();
    let dx = (p.lon - q.lon).to_radians();
    let cy = ((p.lat + q.lat) * 0.5).to_radians();

    let sc = cy.sin();
    let w  = (1.0 - e2 * sc * sc).sqrt();
    let m  = a * (1.0 - e2) / (w * w * w); // meridian radius of curvature
    let n  = a / w;                         // prime vertical radius of curvature

    let ym = dy * m;
    let xn = dx * n * cy.cos();
    (ym * ym + xn * xn).sqrt()
}

/// Foot of the perpendicular from `p` onto segment `a`–`b`, clamped to the
/// segment.  A zero-length segment degenerates to `a`.
pub fn nearest_point_on_segment(a: LonLat, b: LonLat, p: LonLat) -> LonLat {
    let dx = b.lon - a.lon;
    let dy = b.lat - a.lat;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return a;
    }
    let t = (-(dx * (a.lon - p.lon) + dy * (a.lat - p.lat)) / len2).clamp(0.0, 1.0);
    LonLat::new(a.lon + t * dx, a.lat + t * dy)
}

/// Nearest point on a polyline to `p`.
///
/// Walks every consecutive vertex pair and keeps the first strictly-closer
/// projection.  A single-vertex line yields that vertex; an empty line
/// yields `None`.
pub fn nearest_point_on_line(line: &[LonLat], p: LonLat) -> Option<LonLat> {
    match line {
        [] => None,
        [only] => Some(*only),
        _ => {
            let mut best: Option<(LonLat, f64)> = None;
            for pair in line.windows(2) {
                let q = nearest_point_on_segment(pair[0], pair[1], p);
                let d = distance(p, q);
                if best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((q, d));
                }
            }
            best.map(|(q, _)| q)
        }
    }
}

/// Distance in metres from `p` to the nearest point of `line`.
pub fn line_distance(line: &[LonLat], p: LonLat) -> Option<f64> {
    nearest_point_on_line(line, p).map(|q| distance(q, p))
}

/// Minimum bounding rectangle of a point set, ignoring invalid positions.
pub fn bounding_rect<'a, I>(points: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a LonLat>,
{
    points
        .into_iter()
        .filter(|p| p.is_valid())
        .fold(None, |acc: Option<Rect>, p| {
            Some(match acc {
                None => Rect::from_point(*p),
                Some(r) => r.expand_to(*p),
            })
        })
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in lon/lat degrees.
///
/// Constructors normalise corner order, so callers may pass corners in any
/// orientation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Zero-area rectangle at `p`.
    pub fn from_point(p: LonLat) -> Self {
        Self { min_x: p.lon, min_y: p.lat, max_x: p.lon, max_y: p.lat }
    }

    /// Coarse box around `center` covering at least `radius_m` metres.
    ///
    /// The longitude half-width is divided by `cos(lat)`, so the box does
    /// not shrink below the radius at high latitudes.  Not geodesically
    /// exact; always post-filter.
    pub fn around(center: LonLat, radius_m: f64) -> Self {
        let d_lat = radius_m * APPROX_DEG_PER_M;
        let d_lon = d_lat / center.lat.to_radians().cos().clamp(MIN_LON_SCALE, 1.0);
        Self {
            min_x: center.lon - d_lon,
            min_y: center.lat - d_lat,
            max_x: center.lon + d_lon,
            max_y: center.lat + d_lat,
        }
    }

    /// Grow every side by `buffer_m` metres (converted with
    /// [`APPROX_DEG_PER_M`]).
    pub fn buffered(self, buffer_m: f64) -> Self {
        let d = buffer_m * APPROX_DEG_PER_M;
        Self {
            min_x: self.min_x - d,
            min_y: self.min_y - d,
            max_x: self.max_x + d,
            max_y: self.max_y + d,
        }
    }

    fn expand_to(self, p: LonLat) -> Self {
        Self {
            min_x: self.min_x.min(p.lon),
            min_y: self.min_y.min(p.lat),
            max_x: self.max_x.max(p.lon),
            max_y: self.max_y.max(p.lat),
        }
    }

    /// Closed-interval containment, cheaper than [`intersects_point`](Self::intersects_point).
    #[inline]
    pub fn contains(&self, p: LonLat) -> bool {
        p.lon >= self.min_x && p.lon <= self.max_x && p.lat >= self.min_y && p.lat <= self.max_y
    }

    #[inline]
    pub fn min_corner(&self) -> [f64; 2] {
        [self.min_x, self.min_y]
    }

    #[inline]
    pub fn max_corner(&self) -> [f64; 2] {
        [self.max_x, self.max_y]
    }

    /// Envelope of a polyline.  `None` for an empty or all-invalid line.
    pub fn of_line(line: &[LonLat]) -> Option<Self> {
        bounding_rect(line)
    }

    /// Exact polygon test: does the rectangle (as a closed polygon) touch `p`?
    pub fn intersects_point(&self, p: LonLat) -> bool {
        if !p.is_valid() {
            return false;
        }
        self.to_polygon().intersects(&Point::from(p.as_array()))
    }

    /// Exact polygon test: does the rectangle touch any part of `line`?
    pub fn intersects_line(&self, line: &[LonLat]) -> bool {
        match line {
            [] => false,
            [only] => self.intersects_point(*only),
            _ => {
                let ls: LineString<f64> = line.iter().map(|p| (p.lon, p.lat)).collect();
                self.to_polygon().intersects(&ls)
            }
        }
    }

    fn to_polygon(self) -> Polygon<f64> {
        geo::Rect::new(
            coord! { x: self.min_x, y: self.min_y },
            coord! { x: self.max_x, y: self.max_y },
        )
        .to_polygon()
    }
}
