use super::traits::TabularFile;
use crate::core::chart::ChartSpec;
use crate::core::data::record::Dataset;
use crate::core::data::tabular::{self, TabularError};
use std::io::{self, BufRead, Read, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] TabularError),
}

/// Comma-delimited text files.
///
/// Reading goes through [`tabular::parse`] so files and in-memory text produce
/// identical datasets. Writing uses the `csv` crate, which quotes cells that
/// contain the delimiter.
pub struct CsvFile;

impl TabularFile for CsvFile {
    type Error = CsvFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<Dataset, Self::Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(tabular::parse(&text)?)
    }

    fn write_to(dataset: &Dataset, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(dataset.header().iter())?;
        for record in dataset {
            csv_writer.write_record(record.values().iter().map(|v| v.to_string()))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Writes the plotted columns of a chart: the x column followed by each series.
///
/// Non-numeric y cells are written as empty fields. An unloaded chart produces a
/// header-only file.
pub fn write_chart_series(chart: &ChartSpec, writer: &mut impl Write) -> Result<(), CsvFileError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut header = vec![chart.x_key];
    header.extend(chart.series.iter().map(|s| s.key));
    csv_writer.write_record(&header)?;

    if let Some(data) = chart.data.as_ref() {
        for record in data.iter() {
            let Some(x) = record.get(chart.x_key) else {
                continue;
            };
            let mut row = vec![x.to_string()];
            row.extend(chart.series.iter().map(|s| {
                record
                    .number(s.key)
                    .map(|y| y.to_string())
                    .unwrap_or_default()
            }));
            csv_writer.write_record(&row)?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chart::{noise_chart, pec_chart};
    use std::sync::Arc;
    use tempfile::tempdir;

    const PEC: &str = "bond_length_angstrom,vqe_energy_ha,exact_energy_ha,delta_ha\n\
                       0.5,-1.055,-1.056,0.001\n\
                       0.735,-1.137,-1.137,0\n";

    #[test]
    fn read_from_matches_in_memory_parse() {
        let mut reader = io::Cursor::new(PEC.as_bytes());
        let from_reader = CsvFile::read_from(&mut reader).unwrap();
        assert_eq!(from_reader, tabular::parse(PEC).unwrap());
    }

    #[test]
    fn read_from_path_matches_in_memory_parse() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pec_h2_sto3g.csv");
        std::fs::write(&path, PEC).unwrap();
        let from_file = CsvFile::read_from_path(&path).unwrap();
        assert_eq!(from_file, tabular::parse(PEC).unwrap());
    }

    #[test]
    fn read_from_path_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = CsvFile::read_from_path(dir.path().join("missing.csv"));
        assert!(matches!(result, Err(CsvFileError::Io(_))));
    }

    #[test]
    fn read_from_rejects_blank_file() {
        let mut reader = io::Cursor::new("\n\n".as_bytes());
        assert!(matches!(
            CsvFile::read_from(&mut reader),
            Err(CsvFileError::Parse(TabularError::EmptyInput))
        ));
    }

    #[test]
    fn write_then_read_preserves_dataset() {
        let original = tabular::parse(PEC).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("copy.csv");
        CsvFile::write_to_path(&original, &path).unwrap();
        let reread = CsvFile::read_from_path(&path).unwrap();
        assert_eq!(reread, original);
    }

    #[test]
    fn write_chart_series_emits_plotted_columns_only() {
        let chart = pec_chart("H2", "pec_h2_sto3g.csv", Some(Arc::new(tabular::parse(PEC).unwrap())));
        let mut out = Vec::new();
        write_chart_series(&chart, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "bond_length_angstrom,vqe_energy_ha,exact_energy_ha");
        assert_eq!(lines[1], "0.5,-1.055,-1.056");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn write_chart_series_without_data_writes_header_only() {
        let chart = noise_chart("Noise", "h2_noisy_runs.csv", None);
        let mut out = Vec::new();
        write_chart_series(&chart, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "restart,delta_ha\n");
    }
}
