//! `rn-loader` — populate a [`rn_graph::Network`] from delimited files.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`condition`] | `QueryCondition` — area / road-class filter for ingestion |
//! | [`csv`]       | `CsvLinkLoader`, `LoaderConfig`, `LoadSummary`            |
//! | [`error`]     | `LoaderError`, `LoaderResult<T>`                          |
//!
//! Loaders only call `Network::add_link`; they never reach into the graph.

pub mod condition;
pub mod csv;
pub mod error;


pub use condition::QueryCondition;
pub use self::csv::{CsvLinkLoader, LoadSummary, LoaderConfig};
pub use error::{LoaderError, LoaderResult};
