//! Cell access over a rectangular-ish grid of text cells.

/// Read-only access to the cells of one worksheet.
///
/// Rows and columns are zero-based. Implementations resolve computed cells
/// to their displayed text and return `None` for empty or missing cells
/// rather than failing.
pub trait CellSource {
    /// Number of rows, including header and preamble rows.
    fn row_count(&self) -> usize;

    /// Number of cells present in `row` (0 past the end of the sheet).
    fn row_len(&self, row: usize) -> usize;

    /// Text of one cell, or `None` when it is empty or out of range.
    fn cell(&self, row: usize, column: usize) -> Option<&str>;

    /// Every cell of a row, in column order.
    fn row_cells(&self, row: usize) -> Vec<Option<&str>> {
        (0..self.row_len(row))
            .map(|column| self.cell(row, column))
            .collect()
    }
}
