//! Sheet-to-sink loading: header resolution, row mapping, post-processing.

use anyhow::{Context, Result};
use icpc_derive::PostProcessor;
use icpc_ingest::{CellSource, SheetLayout};
use icpc_map::{
    ColumnProblem, HeaderError, MappedRow, RecordSink, RowMapper, SubjectRows, resolve_header_row,
};
use icpc_model::{Diagnostic, DiagnosticSummary};
use icpc_registry::FieldRegistry;
use tracing::{info, trace};

use crate::logging::redact_value;

/// Counts and findings of one loaded sheet.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Mapped header columns.
    pub columns: usize,
    /// Subject rows read.
    pub rows: usize,
    /// Rows that produced a record.
    pub records: usize,
    /// Rows rejected because no subject id could be formed.
    pub rejected: usize,
    /// Distinct subjects held by the sink.
    pub stored: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadOutcome {
    pub fn summary(&self) -> DiagnosticSummary {
        let mut summary = DiagnosticSummary::default();
        summary.extend(&self.diagnostics);
        summary
    }

    /// Whether any row-level finding has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Map every subject row of `source`, post-process it and hand it to `sink`.
///
/// A header that cannot be resolved fails the whole sheet before any record
/// reaches the sink. Row-level findings are collected into the outcome.
pub fn load_source<S, K>(
    registry: &FieldRegistry,
    source: &S,
    layout: SheetLayout,
    processor: &PostProcessor,
    sink: &mut K,
) -> Result<LoadOutcome>
where
    S: CellSource + ?Sized,
    K: RecordSink,
    K::Error: std::error::Error + Send + Sync + 'static,
{
    let columns = resolve_header_row(registry, source, layout.header_row)
        .with_context(|| format!("resolve header row {}", layout.header_row + 1))?;
    info!(columns = columns.len(), "header mapped");

    let mapper = RowMapper::new(registry, &columns);
    let mut outcome = LoadOutcome {
        columns: columns.len(),
        ..LoadOutcome::default()
    };
    for (row, result) in SubjectRows::new(source, &mapper, layout.first_data_row) {
        outcome.rows += 1;
        trace!(row = row + 1, cells = %redact_value(&row_text(source, row)), "raw row");
        match result {
            Ok(MappedRow {
                mut record,
                mut diagnostics,
            }) => {
                diagnostics.extend(processor.process(&mut record));
                let subject = record.subject_id.clone();
                sink.accept(record)
                    .with_context(|| format!("store subject {subject}"))?;
                outcome.records += 1;
                outcome.diagnostics.extend(diagnostics);
            }
            Err(diagnostics) => {
                outcome.rejected += 1;
                outcome.diagnostics.extend(diagnostics);
            }
        }
    }
    outcome.stored = sink.finish().context("finish record output")?;
    info!(
        rows = outcome.rows,
        records = outcome.records,
        rejected = outcome.rejected,
        stored = outcome.stored,
        findings = outcome.diagnostics.len(),
        "sheet loaded"
    );
    Ok(outcome)
}

/// Header of one sheet, resolved without mapping any row.
#[derive(Debug, Default)]
pub struct HeaderCheck {
    /// Header columns that map to a field.
    pub columns: usize,
    pub problems: Vec<ColumnProblem>,
}

impl HeaderCheck {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Resolve the header row of `source` and collect every column problem.
///
/// A missing header row or sentinel mismatch is still an error; unmapped
/// and duplicate columns are reported in the returned check.
pub fn check_header<S>(
    registry: &FieldRegistry,
    source: &S,
    layout: SheetLayout,
) -> Result<HeaderCheck>
where
    S: CellSource + ?Sized,
{
    match resolve_header_row(registry, source, layout.header_row) {
        Ok(columns) => Ok(HeaderCheck {
            columns: columns.len(),
            problems: Vec::new(),
        }),
        Err(HeaderError::Columns(problems)) => {
            let filled = source
                .row_cells(layout.header_row)
                .iter()
                .filter(|cell| matches!(cell, Some(text) if !text.trim().is_empty()))
                .count();
            Ok(HeaderCheck {
                columns: filled.saturating_sub(problems.len()),
                problems,
            })
        }
        Err(error) => {
            Err(error).with_context(|| format!("resolve header row {}", layout.header_row + 1))
        }
    }
}

fn row_text<S: CellSource + ?Sized>(source: &S, row: usize) -> String {
    source
        .row_cells(row)
        .iter()
        .map(|cell| cell.unwrap_or(""))
        .collect::<Vec<_>>()
        .join("|")
}
