//! CSV link loader.
//!
//! # CSV format
//!
//! One link per row:
//!
//! ```csv
//! link_id,source,target,cost,reverse_cost,oneway,speed_kmh,road_class,x1,y1,x2,y2,geometry
//! L1,n1,n2,120.5,,0,40,5,139.70,35.60,139.701,35.60,139.70 35.60;139.701 35.60
//! L2,n2,n3,,,1,,,139.701,35.60,139.702,35.601,
//! ```
//!
//! | Column         | Meaning                                                    |
//! |----------------|------------------------------------------------------------|
//! | `link_id`      | link key                                                   |
//! | `source`       | tail node key; `x1`,`y1` its position if the node is new   |
//! | `target`       | head node key; `x2`,`y2` its position if the node is new   |
//! | `cost`         | forward cost; empty → endpoint distance                    |
//! | `reverse_cost` | backward cost; empty → `cost`                              |
//! | `oneway`       | `1`/`true`/`yes` for one-way; `0`/`false`/`no`/empty not   |
//! | `speed_kmh`    | optional free-flow speed                                   |
//! | `road_class`   | optional integer class                                     |
//! | `geometry`     | optional `"lon lat;lon lat;…"`, first point at the tail    |
//!
//! Without a header row, columns are read in the order above.
//!
//! # Batch semantics
//!
//! Every row is parsed and filtered before the network is touched, so a
//! malformed row (including one with the wrong number of fields) leaves the
//! network exactly as it was.  With
//! [`LoaderConfig::skip_invalid`] bad rows are logged and skipped instead.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use tracing::{info, warn};

use rn_core::LonLat;
use rn_graph::{LinkRecord, Network, NodeRecord};

use crate::{LoaderError, LoaderResult, QueryCondition};

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoaderConfig {
    /// First row holds column names.
    pub has_header:   bool,
    /// Field separator; `b'\t'` for TSV.
    pub delimiter:    u8,
    /// Log and skip malformed rows rather than failing the batch.
    pub skip_invalid: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { has_header: true, delimiter: b',', skip_invalid: false }
    }
}

/// Row counts from one load.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Data rows read.
    pub rows:     usize,
    /// Links new to the network.
    pub added:    usize,
    /// Rows rejected by every query condition.
    pub filtered: usize,
    /// Malformed rows skipped (only with `skip_invalid`).
    pub skipped:  usize,
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LinkRow {
    link_id:      String,
    source:       String,
    target:       String,
    cost:         Option<f64>,
    reverse_cost: Option<f64>,
    oneway:       Option<String>,
    speed_kmh:    Option<f64>,
    road_class:   Option<i32>,
    x1:           f64,
    y1:           f64,
    x2:           f64,
    y2:           f64,
    geometry:     Option<String>,
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct CsvLinkLoader {
    config: LoaderConfig,
}

impl CsvLinkLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load `path` into a fresh, fully indexed network.
    pub fn load(&self, path: &Path, conditions: &[QueryCondition]) -> LoaderResult<Network> {
        let mut network = Network::new();
        self.load_into(&mut network, path, conditions)?;
        Ok(network)
    }

    /// Add the links in `path` to an existing network.
    pub fn load_into(
        &self,
        network: &mut Network,
        path: &Path,
        conditions: &[QueryCondition],
    ) -> LoaderResult<LoadSummary> {
        let file = std::fs::File::open(path)?;
        self.load_reader(network, file, conditions)
    }

    /// Like [`load_into`](Self::load_into) but accepts any `Read` source.
    pub fn load_reader<R: Read>(
        &self,
        network: &mut Network,
        reader: R,
        conditions: &[QueryCondition],
    ) -> LoaderResult<LoadSummary> {
        let mut summary = LoadSummary::default();

        // ── Parse and filter every row ────────────────────────────────────
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(self.config.has_header)
            .delimiter(self.config.delimiter)
            .flexible(true)
            .from_reader(reader);
        let headers = if self.config.has_header { Some(csv_reader.headers()?.clone()) } else { None };

        let mut records = Vec::new();
        let mut raw = StringRecord::new();
        while csv_reader.read_record(&mut raw)? {
            summary.rows += 1;
            let line = raw.position().map_or(0, |p| p.line());
            let record = match parse_row(&raw, headers.as_ref()) {
                Ok(r) => r,
                Err(message) if self.config.skip_invalid => {
                    warn!(line, %message, "skipping malformed link row");
                    summary.skipped += 1;
                    continue;
                }
                Err(message) => return Err(LoaderError::Parse { line, message }),
            };
            match select(record, conditions) {
                Some(r) => records.push(r),
                None => summary.filtered += 1,
            }
        }

        // ── Apply ─────────────────────────────────────────────────────────
        let before = network.link_count();
        for record in records {
            network.add_link(record);
        }
        summary.added = network.link_count() - before;

        info!(
            rows = summary.rows,
            added = summary.added,
            filtered = summary.filtered,
            skipped = summary.skipped,
            "loaded links"
        );
        Ok(summary)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Columns of a headerless file.
const LINK_COLUMNS: usize = 13;

fn parse_row(raw: &StringRecord, headers: Option<&StringRecord>) -> Result<LinkRecord, String> {
    let expected = headers.map_or(LINK_COLUMNS, StringRecord::len);
    if raw.len() != expected {
        return Err(format!("expected {expected} fields, found {}", raw.len()));
    }
    let row: LinkRow = raw.deserialize(headers).map_err(|e| e.to_string())?;

    let mut record = LinkRecord::new(
        row.link_id,
        NodeRecord::new(row.source, row.x1, row.y1),
        NodeRecord::new(row.target, row.x2, row.y2),
    )
    .one_way(parse_flag(row.oneway.as_deref().unwrap_or(""))?);

    record.cost = row.cost;
    record.reverse_cost = row.reverse_cost;
    record.speed_kmh = row.speed_kmh;
    record.road_class = row.road_class;
    if let Some(g) = row.geometry.as_deref().filter(|g| !g.trim().is_empty()) {
        record.geometry = Some(parse_geometry(g)?);
    }
    Ok(record)
}

/// Apply the query conditions: `None` when rejected, otherwise the record
/// with geometry dropped unless an accepting condition asks for it.
fn select(mut record: LinkRecord, conditions: &[QueryCondition]) -> Option<LinkRecord> {
    if conditions.is_empty() {
        return Some(record);
    }
    let (tail, head) = (record.tail.pos, record.head.pos);
    let mut accepting = conditions
        .iter()
        .filter(|c| c.accepts(tail, head, record.road_class))
        .peekable();
    accepting.peek()?;
    if !accepting.any(QueryCondition::need_geometry) {
        record.geometry = None;
    }
    Some(record)
}

fn parse_flag(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "f" | "false" | "n" | "no" => Ok(false),
        "1" | "t" | "true" | "y" | "yes" => Ok(true),
        other => Err(format!("invalid oneway flag {other:?}")),
    }
}

/// `"lon lat;lon lat;…"` → polyline.
fn parse_geometry(s: &str) -> Result<Vec<LonLat>, String> {
    s.split(';')
        .filter(|pt| !pt.trim().is_empty())
        .map(|pt| {
            let mut xy = pt.split_whitespace().map(str::parse::<f64>);
            match (xy.next(), xy.next(), xy.next()) {
                (Some(Ok(lon)), Some(Ok(lat)), None) => Ok(LonLat::new(lon, lat)),
                _ => Err(format!("invalid geometry point {pt:?}: expected \"lon lat\"")),
            }
        })
        .collect()
}
