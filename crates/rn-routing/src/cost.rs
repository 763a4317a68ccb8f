//! Link cost strategies.
//!
//! Searches never read link costs directly; they ask an injected
//! [`LinkCost`] what traversing a link in a given direction costs.  Swapping
//! the strategy changes what "shortest" means without touching the search.
//!
//! | Strategy          | Cost of a hop                                        |
//! |-------------------|------------------------------------------------------|
//! | [`StoredCost`]    | the link's `cost` / `reverse_cost`                   |
//! | [`TravelTimeCost`]| stored cost (metres) ÷ link speed (m/s) → seconds    |
//! | closure           | whatever `Fn(&Link, Direction) -> f64` returns       |
//!
//! Costs must be non-negative for the searches to be optimal.

use rn_graph::{Direction, Link};

/// Directional traversal cost of a link.
///
/// `Send + Sync` so one routing instance can serve concurrent queries.
pub trait LinkCost: Send + Sync {
    fn cost_of(&self, link: &Link, dir: Direction) -> f64;
}

impl<F> LinkCost for F
where
    F: Fn(&Link, Direction) -> f64 + Send + Sync,
{
    #[inline]
    fn cost_of(&self, link: &Link, dir: Direction) -> f64 {
        self(link, dir)
    }
}

/// The link's own cost: `cost` forward, `reverse_cost` backward.
#[derive(Copy, Clone, Debug, Default)]
pub struct StoredCost;

impl LinkCost for StoredCost {
    #[inline]
    fn cost_of(&self, link: &Link, dir: Direction) -> f64 {
        link.cost_in(dir)
    }
}

/// Converts distance costs into travel seconds using each link's speed.
///
/// Links without a positive speed keep their stored cost.
#[derive(Copy, Clone, Debug, Default)]
pub struct TravelTimeCost;

impl LinkCost for TravelTimeCost {
    fn cost_of(&self, link: &Link, dir: Direction) -> f64 {
        let stored = link.cost_in(dir);
        match link.speed_kmh() {
            Some(kmh) if kmh > 0.0 => stored / (kmh * 1000.0 / 3600.0),
            _ => stored,
        }
    }
}
