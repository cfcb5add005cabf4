//! Provides file input/output for tabular datasets and chart series.

pub mod csv;
pub mod traits;
