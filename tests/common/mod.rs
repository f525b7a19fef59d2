//! Shared test utilities for festin integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod fixtures;

pub use fixtures::*;
