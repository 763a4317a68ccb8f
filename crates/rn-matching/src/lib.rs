//! `rn-matching` — snap coordinates onto a road network.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`matcher`] | `Matcher` trait, `NearestMatcher`                          |
//! | [`result`]  | `MatchingResult` — input, snapped point, feature, distance |
//! | [`output`]  | `CsvMatchWriter` — one CSV row per result                  |
//! | [`error`]   | `OutputError`, `OutputResult<T>`                           |
//!
//! Every point is matched on its own: there is no trajectory smoothing, so
//! a sequence match is exactly the per-point matches in order.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | `Matcher::match_points` fans out over rayon.             |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `MatchingResult`.   |

pub mod error;
pub mod matcher;
pub mod output;
pub mod result;

#[cfg(test)]
mod tests;

pub use error::{OutputError, OutputResult};
pub use matcher::{Matcher, NearestMatcher};
pub use output::CsvMatchWriter;
pub use result::MatchingResult;
