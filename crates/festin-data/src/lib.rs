//! festin-data — dataset acquisition for festin.
//!
//! One blocking fetch of the semicolon-delimited festivals export, decoded
//! row by row into [`festin_core::RawRecord`] values and normalised into the
//! immutable [`festin_core::Dataset`] snapshot the TUI reads from.

pub mod dataset;
pub mod fetch;

pub use dataset::{decode_records, load_dataset};
pub use fetch::Source;

use thiserror::Error;

/// Errors from dataset acquisition. A fetch or decode failure is fatal to
/// the session; per-field parse failures never surface here (the normalizer
/// maps them to absent values instead).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("dataset fetch failed: HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },
    #[error("could not read dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV decoding failed: {0}")]
    Csv(#[from] csv::Error),
}
