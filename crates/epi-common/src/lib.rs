//! Shared utilities for the epidemiology crates.
//!
//! This crate provides common utilities used across the workspace,
//! including Polars `AnyValue` helpers and decimal rounding/formatting.

pub mod numeric;
pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use numeric::{format_decimal, round_to};
pub use polars::any_to_label;
