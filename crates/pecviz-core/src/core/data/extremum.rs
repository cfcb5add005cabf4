use super::record::{Dataset, Record};
use super::value::FieldValue;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ExtremumError {
    /// The field holds text, or is absent from the record.
    #[error("Field '{field}' on record {index} is {found}, expected a number")]
    UnsupportedFieldType {
        field: String,
        index: usize,
        found: &'static str,
    },
}

impl ExtremumError {
    /// Error for a non-numeric `value`; `None` reports the field as missing.
    pub fn unsupported(field: &str, index: usize, value: Option<&FieldValue>) -> Self {
        ExtremumError::UnsupportedFieldType {
            field: field.to_string(),
            index,
            found: value.map_or("missing", FieldValue::kind),
        }
    }
}

/// The record minimizing a field, together with the dataset it was drawn from.
///
/// Holding the dataset snapshot keeps the result valid after the owning store slot
/// has been replaced by a newer load.
#[derive(Debug, Clone, PartialEq)]
pub struct Extremum {
    dataset: Arc<Dataset>,
    index: usize,
    key: String,
}

impl Extremum {
    pub fn record(&self) -> &Record {
        &self.dataset.records()[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The minimal value of the scanned field.
    pub fn value(&self) -> f64 {
        // The scan only accepts records whose key is numeric.
        self.record().number(&self.key).unwrap_or(f64::NAN)
    }
}

/// Finds the record with the smallest numeric value at `key`.
///
/// The scan is a single pass that replaces the current best only on a strictly
/// smaller value, so the earliest of several tied minima wins.
///
/// # Return
///
/// `Ok(None)` when the dataset is absent or has no records.
///
/// # Errors
///
/// Fails fast on the first record whose `key` is text or missing.
pub fn find_minimum(
    dataset: Option<&Arc<Dataset>>,
    key: &str,
) -> Result<Option<Extremum>, ExtremumError> {
    let Some(dataset) = dataset else {
        return Ok(None);
    };

    let mut best: Option<(usize, f64)> = None;
    for (index, record) in dataset.iter().enumerate() {
        let value = numeric_field(record, key, index)?;
        match best {
            Some((_, best_value)) if value >= best_value => {}
            _ => best = Some((index, value)),
        }
    }

    Ok(best.map(|(index, value)| {
        debug!(key, index, value, "Located minimum record");
        Extremum {
            dataset: Arc::clone(dataset),
            index,
            key: key.to_string(),
        }
    }))
}

fn numeric_field(record: &Record, key: &str, index: usize) -> Result<f64, ExtremumError> {
    let value = record.get(key);
    value
        .and_then(FieldValue::as_number)
        .ok_or_else(|| ExtremumError::unsupported(key, index, value))
}
