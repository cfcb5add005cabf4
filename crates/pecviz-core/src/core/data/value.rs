use serde::Serialize;
use std::fmt;

/// A single cell of a tabular dataset.
///
/// Raw text is coerced once at parse time: anything that reads fully as a finite
/// decimal number becomes [`FieldValue::Number`], everything else (including the
/// empty string) is kept verbatim as [`FieldValue::Text`]. Downstream consumers
/// match on the variant instead of guessing the type from the text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A finite numeric value.
    Number(f64),
    /// Trimmed text that did not parse as a finite number.
    Text(String),
}

impl FieldValue {
    /// Coerces an already-trimmed cell into a typed value.
    ///
    /// # Arguments
    ///
    /// * `raw` - The trimmed cell text.
    ///
    /// # Return
    ///
    /// `Number` when `raw` parses as a finite `f64`, `Text` otherwise.
    pub fn coerce(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => FieldValue::Number(n),
            _ => FieldValue::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Number(_) => None,
            FieldValue::Text(s) => Some(s.as_str()),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, FieldValue::Number(_))
    }

    /// Name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}
