use crate::core::data::record::Dataset;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing tabular dataset files.
///
/// Implementors handle one on-disk format; the path-based helpers are provided on
/// top of the reader/writer methods.
pub trait TabularFile {
    /// The error type for I/O and format failures.
    type Error: Error + From<io::Error>;

    /// Reads a dataset from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content is not a valid table.
    fn read_from(reader: &mut impl BufRead) -> Result<Dataset, Self::Error>;

    /// Writes a dataset, header first, records in order.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(dataset: &Dataset, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a dataset from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Dataset, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a dataset to a file path, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(dataset, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
