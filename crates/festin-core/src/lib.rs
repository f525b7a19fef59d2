//! festin-core — core library for festin.
//!
//! This crate holds everything that is pure: the typed festival record, the
//! field normalizer that produces it from raw CSV rows, and the aggregations
//! the dashboard views are built from.
//!
//! # Architecture
//!
//! ```text
//! fetch ──► decode ──► normalize ──► Dataset ──► aggregate ──► render
//!  (festin-data)       (this crate)  snapshot    (this crate)  (festin-tui)
//! ```
//!
//! The [`Dataset`] snapshot is built once at startup and passed by shared
//! reference into every aggregation; nothing in this crate mutates it.

pub mod aggregate;
pub mod config;
pub mod normalize;
pub mod types;

pub use types::{Coordinate, Dataset, Festival, RawRecord};
