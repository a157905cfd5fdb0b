#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read csv {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("data rows must start after the header row (header {header_row}, first data row {first_data_row})")]
    InvalidLayout {
        header_row: usize,
        first_data_row: usize,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
