//! CSV export of a submission worksheet.
//!
//! Spreadsheet tools export formula cells as their computed text, so a CSV
//! export is a faithful cell source. Blank worksheet rows are exported as
//! rows of empty cells and are kept, so row indices match the worksheet.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::source::CellSource;

#[derive(Debug, Clone, Default)]
pub struct CsvSheet {
    pub path: Option<PathBuf>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

impl CsvSheet {
    /// Sheet over in-memory rows. Cells are trimmed like exported ones.
    pub fn from_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| normalize_cell(cell.as_ref())).collect())
            .collect();
        Self { path: None, rows }
    }

    /// Parse CSV text from any reader. `path` is only used in errors.
    pub fn from_reader<R: Read>(reader: R, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| IngestError::Csv {
                path: path.clone(),
                source,
            })?;
            rows.push(record.iter().map(normalize_cell).collect());
        }
        Ok(Self {
            path: Some(path),
            rows,
        })
    }
}

/// Read a worksheet exported as CSV.
pub fn read_csv_sheet(path: &Path) -> Result<CsvSheet> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let sheet = CsvSheet::from_reader(file, path)?;
    debug!(path = %path.display(), rows = sheet.rows.len(), "read sheet");
    Ok(sheet)
}

impl CellSource for CsvSheet {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)?
            .get(column)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cells_are_none() {
        let sheet = CsvSheet::from_rows([vec!["PA1", " ", "x"], vec![]]);
        assert_eq!(sheet.cell(0, 0), Some("PA1"));
        assert_eq!(sheet.cell(0, 1), None);
        assert_eq!(sheet.cell(0, 9), None);
        assert_eq!(sheet.cell(5, 0), None);
        assert_eq!(sheet.row_len(1), 0);
        assert_eq!(sheet.row_cells(0), [Some("PA1"), None, Some("x")]);
    }

    #[test]
    fn reader_keeps_blank_rows_and_ragged_lengths() {
        let text = "\u{feff}Title\n,\nPharmGKB Subject ID,Project Site\nPA1,31,extra\n";
        let sheet = CsvSheet::from_reader(text.as_bytes(), "inline.csv").unwrap();
        assert_eq!(sheet.row_count(), 4);
        assert_eq!(sheet.cell(0, 0), Some("Title"));
        assert_eq!(sheet.row_cells(1), vec![None::<&str>, None]);
        assert_eq!(sheet.row_len(3), 3);
    }
}
