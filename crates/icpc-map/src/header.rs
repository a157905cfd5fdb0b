//! Header resolution.
//!
//! The header row of a submission sheet holds field labels. Every non-blank
//! header cell must resolve to exactly one field, and every problem is
//! collected before failing so the submitter can fix the sheet in one pass.

use std::collections::BTreeMap;

use icpc_ingest::CellSource;
use icpc_registry::{FieldRegistry, keys};
use tracing::{debug, debug_span, warn};

use crate::error::{ColumnProblem, HeaderError, Result};

/// Text the first header cell must carry.
pub const SUBJECT_ID_SENTINEL: &str = "PharmGKB Subject ID";

/// Column index to field key associations for one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: BTreeMap<usize, String>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a column with a field key. Returns the column already
    /// mapped to `key`, if any, and leaves the map unchanged in that case.
    pub fn insert(&mut self, column: usize, key: impl Into<String>) -> Option<usize> {
        let key = key.into();
        if let Some(first) = self.column_of(&key) {
            return Some(first);
        }
        self.columns.insert(column, key);
        None
    }

    pub fn get(&self, column: usize) -> Option<&str> {
        self.columns.get(&column).map(String::as_str)
    }

    pub fn column_of(&self, key: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|(_, mapped)| mapped.as_str() == key)
            .map(|(column, _)| *column)
    }

    /// Column holding the subject id.
    pub fn subject_column(&self) -> Option<usize> {
        self.column_of(keys::SUBJECT_ID)
    }

    /// `(column, key)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.columns
            .iter()
            .map(|(column, key)| (*column, key.as_str()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Resolve header cells (in column order) against the registry labels.
pub fn resolve_header(registry: &FieldRegistry, cells: &[Option<&str>]) -> Result<ColumnMap> {
    let first = cells.first().copied().flatten().map(str::trim);
    if first != Some(SUBJECT_ID_SENTINEL) {
        return Err(HeaderError::SentinelMismatch {
            expected: SUBJECT_ID_SENTINEL,
            found: first.map(str::to_string),
        });
    }

    let mut map = ColumnMap::new();
    let mut problems = Vec::new();
    for (column, cell) in cells.iter().copied().enumerate() {
        let Some(text) = cell.map(str::trim).filter(|text| !text.is_empty()) else {
            continue;
        };
        match registry.lookup_by_label(text) {
            Some(field) => {
                if let Some(first_column) = map.insert(column, field.key.as_str()) {
                    problems.push(ColumnProblem::Duplicate {
                        column,
                        key: field.key.clone(),
                        first_column,
                    });
                }
            }
            None => problems.push(ColumnProblem::Unmapped {
                column,
                text: text.to_string(),
            }),
        }
    }

    if !problems.is_empty() {
        for problem in &problems {
            warn!(%problem, "header column rejected");
        }
        return Err(HeaderError::Columns(problems));
    }
    debug!(columns = cells.len(), mapped = map.len(), "header resolved");
    Ok(map)
}

/// Resolve the header stored at `row` of a sheet.
pub fn resolve_header_row<S: CellSource + ?Sized>(
    registry: &FieldRegistry,
    source: &S,
    row: usize,
) -> Result<ColumnMap> {
    let _span = debug_span!("header", row = row + 1).entered();
    if row >= source.row_count() {
        return Err(HeaderError::MissingHeaderRow { row });
    }
    resolve_header(registry, &source.row_cells(row))
}
