//! Tabular data ingestion and reduction.
//!
//! Raw comma-delimited text is parsed by [`tabular::parse`] into a [`record::Dataset`]
//! whose cells are explicit [`value::FieldValue`]s. [`extremum::find_minimum`] and the
//! helpers in [`summary`] reduce a dataset to the statistics shown next to the charts.

pub mod extremum;
pub mod record;
pub mod schema;
pub mod summary;
pub mod tabular;
pub mod value;
