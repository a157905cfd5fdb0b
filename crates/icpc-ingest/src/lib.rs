#![deny(unsafe_code)]

pub mod error;
pub mod layout;
pub mod sheet;
pub mod source;

pub use error::{IngestError, Result};
pub use layout::SheetLayout;
pub use sheet::{CsvSheet, read_csv_sheet};
pub use source::CellSource;
