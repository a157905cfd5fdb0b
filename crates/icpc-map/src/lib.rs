#![deny(unsafe_code)]

pub mod error;
pub mod header;
pub mod row;
pub mod rows;
pub mod sink;

pub use error::{ColumnProblem, HeaderError, Result};
pub use header::{ColumnMap, SUBJECT_ID_SENTINEL, resolve_header, resolve_header_row};
pub use row::{MappedRow, RowMapper, RowResult};
pub use rows::SubjectRows;
pub use sink::{MemorySink, RecordSink};
