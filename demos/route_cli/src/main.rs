//! route_cli — load a CSV road network, route between two nodes, and
//! optionally snap coordinates onto the network.
//!
//! ```text
//! route_cli --links links.csv --from n1 --to n9
//! route_cli --links links.csv --from n1 --to n9 --logic penalty -n 3 --ratio 0.2
//! route_cli --links links.csv --match 139.70,35.60 --match 139.71,35.61 --target node
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rn_core::{LonLat, MatchTarget, MatchingConfig, PenaltyConfig, Rect};
use rn_graph::{Network, Route};
use rn_loader::{CsvLinkLoader, LoaderConfig, QueryCondition};
use rn_matching::{Matcher, NearestMatcher};
use rn_routing::{Dijkstra, Penalty, RoutingLogic};

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Logic {
    Dijkstra,
    Penalty,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Target {
    Link,
    Node,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Link CSV file.
    #[arg(long)]
    links: PathBuf,

    /// Field separator of the link file.
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Only load links near `min_lon,min_lat,max_lon,max_lat`.
    #[arg(long, value_delimiter = ',', num_args = 4)]
    area: Option<Vec<f64>>,

    /// Buffer around `--area` in metres.
    #[arg(long, default_value_t = rn_core::config::DEFAULT_BUFFER_M)]
    buffer: f64,

    /// Origin node key.
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Destination node key.
    #[arg(long, requires = "from")]
    to: Option<String>,

    #[arg(long, value_enum, default_value_t = Logic::Dijkstra)]
    logic: Logic,

    /// Number of routes to return.
    #[arg(short, default_value_t = 1)]
    n: usize,

    /// Penalty step for `--logic penalty`.
    #[arg(long, default_value_t = rn_core::config::DEFAULT_INCREASE_RATIO)]
    ratio: f64,

    /// Coordinate `lon,lat` to match; repeatable.
    #[arg(long = "match", value_name = "LON,LAT")]
    points: Vec<String>,

    #[arg(long, value_enum, default_value_t = Target::Link)]
    target: Target,

    /// Matching search range in metres.
    #[arg(long, default_value_t = rn_core::config::DEFAULT_SEARCH_RANGE_M)]
    range: f64,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let conditions = match &args.area {
        Some(a) => vec![QueryCondition::new(Rect::new(a[0], a[1], a[2], a[3])).with_buffer(args.buffer)],
        None => Vec::new(),
    };
    let delimiter = u8::try_from(args.delimiter).context("delimiter must be a single ASCII character")?;
    let loader = CsvLinkLoader::new(LoaderConfig { delimiter, ..LoaderConfig::default() });

    let t = Instant::now();
    let network = loader
        .load(&args.links, &conditions)
        .with_context(|| format!("loading {}", args.links.display()))?;
    info!(
        nodes = network.node_count(),
        links = network.link_count(),
        elapsed_ms = t.elapsed().as_millis() as u64,
        "network ready"
    );

    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        match args.logic {
            Logic::Dijkstra => print_routes(&Dijkstra::new(), &network, from, to, args.n)?,
            Logic::Penalty => {
                let logic = Penalty::new().with_penalty(PenaltyConfig { increase_ratio: args.ratio });
                print_routes(&logic, &network, from, to, args.n)?
            }
        }
    }

    if !args.points.is_empty() {
        let points = args.points.iter().map(|s| parse_point(s)).collect::<Result<Vec<_>>>()?;
        let target = match args.target {
            Target::Link => MatchTarget::Link,
            Target::Node => MatchTarget::Node,
        };
        let matcher = NearestMatcher::new(MatchingConfig { search_range_m: args.range, target });
        for result in matcher.match_points(&network, &points) {
            println!("{}", result.to_result_string(&network, ","));
        }
    }

    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_routes<L: RoutingLogic>(logic: &L, network: &Network, from: &str, to: &str, n: usize) -> Result<()> {
    let t = Instant::now();
    let routes = logic.routes_by_key(network, from, to, n)?;
    info!(logic = logic.name(), found = routes.len(), elapsed_us = t.elapsed().as_micros() as u64, "routed");
    if routes.is_empty() {
        println!("no route from {from} to {to}");
    }
    for (i, route) in routes.iter().enumerate() {
        println!("route {i}: cost {:.1} via {}", route.cost(), node_keys(network, route));
        if let Some(line) = logic.route_geometry(network, route) {
            let coords: Vec<String> = line.iter().map(|p| format!("{} {}", p.lon, p.lat)).collect();
            println!("  LINESTRING({})", coords.join(", "));
        }
    }
    Ok(())
}

fn node_keys(network: &Network, route: &Route) -> String {
    route
        .nodes()
        .iter()
        .map(|&id| network.node(id).map_or("?", |n| n.key()))
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn parse_point(s: &str) -> Result<LonLat> {
    let Some((lon, lat)) = s.split_once(',') else {
        bail!("expected LON,LAT, got {s:?}");
    };
    let lon = lon.trim().parse().with_context(|| format!("bad longitude in {s:?}"))?;
    let lat = lat.trim().parse().with_context(|| format!("bad latitude in {s:?}"))?;
    Ok(LonLat::new(lon, lat))
}
