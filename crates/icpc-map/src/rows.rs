use icpc_ingest::CellSource;

use crate::row::{RowMapper, RowResult};

/// Iterator over the subject rows of a sheet.
///
/// Iteration starts at the first data row and stops at the first row whose
/// subject id cell is empty, or at the end of the sheet. Yields the
/// zero-based sheet row with its mapping outcome.
pub struct SubjectRows<'a, S: CellSource + ?Sized> {
    source: &'a S,
    mapper: &'a RowMapper<'a>,
    next_row: usize,
}

impl<'a, S: CellSource + ?Sized> SubjectRows<'a, S> {
    pub fn new(source: &'a S, mapper: &'a RowMapper<'a>, first_data_row: usize) -> Self {
        Self {
            source,
            mapper,
            next_row: first_data_row,
        }
    }

    fn has_subject(&self, row: usize) -> bool {
        let Some(column) = self.mapper.columns().subject_column() else {
            return false;
        };
        row < self.source.row_count()
            && self
                .source
                .cell(row, column)
                .is_some_and(|value| !value.trim().is_empty())
    }
}

impl<S: CellSource + ?Sized> Iterator for SubjectRows<'_, S> {
    type Item = (usize, RowResult);

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.next_row;
        if !self.has_subject(row) {
            return None;
        }
        self.next_row += 1;
        Some((row, self.mapper.map_source_row(self.source, row)))
    }
}
