use super::value::FieldValue;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

/// Field names of a dataset, shared by every record parsed from the same source.
pub type Header = Arc<[String]>;

/// One row of a dataset.
///
/// A record always carries exactly one value per header field. Lookup by name goes
/// through the shared header, so two records of the same dataset can never disagree
/// on their field set.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    header: Header,
    values: Vec<FieldValue>,
}

impl Record {
    /// Builds a record from a header and its values.
    ///
    /// Missing trailing values are filled with empty text and surplus values are
    /// dropped, so the result always matches the header width.
    pub fn new(header: Header, mut values: Vec<FieldValue>) -> Self {
        values.resize(header.len(), FieldValue::Text(String::new()));
        Self { header, values }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.header
            .iter()
            .position(|name| name == field)
            .map(|idx| &self.values[idx])
    }

    /// Convenience lookup for numeric fields; `None` for missing or text fields.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Iterates `(field name, value)` pairs in header order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.header
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// An ordered sequence of records sharing one header.
///
/// Record order is the input line order and is never re-sorted: it defines the
/// drawing order of curves and the bar order of restart charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    header: Header,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(header: Header, records: Vec<Record>) -> Self {
        Self { header, records }
    }

    /// Builds a dataset from field names and raw cell rows, coercing every cell.
    pub fn from_rows<H, R, C>(header: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let header: Header = header.into_iter().map(Into::<String>::into).collect();
        let records = rows
            .into_iter()
            .map(|row| {
                let values = row
                    .into_iter()
                    .map(|cell| FieldValue::coerce(cell.as_ref().trim()))
                    .collect();
                Record::new(header.clone(), values)
            })
            .collect();
        Self { header, records }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.header.iter().any(|name| name == field)
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Numeric column values in record order; non-numeric cells are skipped.
    pub fn column(&self, field: &str) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.number(field)).collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
