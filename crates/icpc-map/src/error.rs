#![deny(unsafe_code)]

use std::fmt;

use icpc_model::column_letters;

/// A header cell that cannot take part in the column map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnProblem {
    /// Header text matches no field label.
    Unmapped { column: usize, text: String },
    /// Header resolves to a field another column already maps to.
    Duplicate {
        column: usize,
        key: String,
        first_column: usize,
    },
}

impl ColumnProblem {
    pub fn column(&self) -> usize {
        match self {
            ColumnProblem::Unmapped { column, .. } | ColumnProblem::Duplicate { column, .. } => {
                *column
            }
        }
    }
}

impl fmt::Display for ColumnProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnProblem::Unmapped { column, text } => {
                write!(f, "column {} {text:?} matches no field", column_letters(*column))
            }
            ColumnProblem::Duplicate {
                column,
                key,
                first_column,
            } => write!(
                f,
                "column {} maps to {key}, already mapped by column {}",
                column_letters(*column),
                column_letters(*first_column)
            ),
        }
    }
}

/// Fatal problems with a sheet's header. Raised before any row is mapped.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("sheet has no header row at row {}", .row + 1)]
    MissingHeaderRow { row: usize },

    #[error("header row must start with {expected:?}, found {found:?}")]
    SentinelMismatch {
        expected: &'static str,
        found: Option<String>,
    },

    #[error("{} header column(s) cannot be mapped: {}", .0.len(), join_problems(.0))]
    Columns(Vec<ColumnProblem>),
}

impl HeaderError {
    /// Column problems, empty for the other variants.
    pub fn problems(&self) -> &[ColumnProblem] {
        match self {
            HeaderError::Columns(problems) => problems,
            _ => &[],
        }
    }
}

fn join_problems(problems: &[ColumnProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, HeaderError>;
