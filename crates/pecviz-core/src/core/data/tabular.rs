use super::record::{Dataset, Header, Record};
use super::value::FieldValue;
use thiserror::Error;
use tracing::{debug, trace};

/// Column separator for all tabular inputs.
pub const DELIMITER: char = ',';

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TabularError {
    #[error("Input contains no non-blank lines")]
    EmptyInput,
}

/// Parses comma-delimited text into a [`Dataset`].
///
/// The first non-blank line is the header. Every later line becomes one record, in
/// input order. Rows shorter than the header are padded with empty text; extra
/// columns are ignored. Cells are trimmed and then coerced with
/// [`FieldValue::coerce`]. Quoting is not interpreted: the delimiter always splits.
///
/// Both `\n` and `\r\n` line endings are accepted. Trailing blank lines are ignored,
/// while blank lines between data rows still yield an all-empty record.
///
/// # Errors
///
/// Returns [`TabularError::EmptyInput`] when the text holds nothing but whitespace.
pub fn parse(text: &str) -> Result<Dataset, TabularError> {
    let mut lines = text
        .trim()
        .split('\n')
        .map(|line| line.trim_end());

    let header_line = lines
        .find(|line| !line.is_empty())
        .ok_or(TabularError::EmptyInput)?;

    let header: Header = header_line
        .split(DELIMITER)
        .map(|name| name.trim().to_string())
        .collect();
    trace!(fields = ?header, "Parsed tabular header");

    let records: Vec<Record> = lines
        .map(|line| parse_row(&header, line))
        .collect();

    debug!(
        fields = header.len(),
        records = records.len(),
        "Parsed tabular text"
    );
    Ok(Dataset::new(header, records))
}

fn parse_row(header: &Header, line: &str) -> Record {
    let mut cells = line.split(DELIMITER);
    let values = header
        .iter()
        .map(|_| FieldValue::coerce(cells.next().unwrap_or("").trim()))
        .collect();
    Record::new(header.clone(), values)
}
