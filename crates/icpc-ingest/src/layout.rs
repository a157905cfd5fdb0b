use crate::error::{IngestError, Result};

/// Where the header and the data rows sit in a submission sheet.
///
/// Submission templates carry a title row above the header and a row of
/// instructions below it, so the defaults are header row 1 and data from
/// row 3 (zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub header_row: usize,
    pub first_data_row: usize,
}

impl SheetLayout {
    pub const DEFAULT_HEADER_ROW: usize = 1;
    pub const DEFAULT_FIRST_DATA_ROW: usize = 3;

    pub fn new(header_row: usize, first_data_row: usize) -> Result<Self> {
        if first_data_row <= header_row {
            return Err(IngestError::InvalidLayout {
                header_row,
                first_data_row,
            });
        }
        Ok(Self {
            header_row,
            first_data_row,
        })
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            header_row: Self::DEFAULT_HEADER_ROW,
            first_data_row: Self::DEFAULT_FIRST_DATA_ROW,
        }
    }
}
