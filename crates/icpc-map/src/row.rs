//! Row-to-record mapping.
//!
//! Every mapped column is resolved independently: blank cells store the
//! blank token, other cells are validated, normalized and stored. Failed
//! validation is reported and the normalized value is still kept, so one bad
//! cell never loses the rest of the row.

use icpc_ingest::CellSource;
use icpc_model::{
    CellAddress, Coded, Diagnostic, DiagnosticKind, Gender, Race, SubjectId, SubjectRecord,
    YesNo, is_blank, is_blank_cell,
};
use icpc_registry::field::split_sample_sources;
use icpc_registry::{FieldDefinition, FieldRegistry, keys};
use tracing::{debug_span, warn};

use crate::header::ColumnMap;

/// A record built from one sheet row, with the row's data-quality findings.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRow {
    pub record: SubjectRecord,
    pub diagnostics: Vec<Diagnostic>,
}

impl MappedRow {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Outcome of mapping one row. `Err` means no subject id could be formed.
pub type RowResult = std::result::Result<MappedRow, Vec<Diagnostic>>;

pub struct RowMapper<'a> {
    registry: &'a FieldRegistry,
    columns: &'a ColumnMap,
}

impl<'a> RowMapper<'a> {
    pub fn new(registry: &'a FieldRegistry, columns: &'a ColumnMap) -> Self {
        Self { registry, columns }
    }

    pub fn columns(&self) -> &ColumnMap {
        self.columns
    }

    /// Map row `row` of a sheet.
    pub fn map_source_row<S: CellSource + ?Sized>(&self, source: &S, row: usize) -> RowResult {
        self.map_row(row, &source.row_cells(row))
    }

    /// Map the cells of sheet row `row` (zero-based, used for cell addresses).
    pub fn map_row(&self, row: usize, cells: &[Option<&str>]) -> RowResult {
        let raw = |column: usize| cells.get(column).copied().flatten();

        let subject_id = self.subject_id(row, raw)?;
        let _span = debug_span!("row", row = row + 1, subject = %subject_id).entered();

        let mut record = SubjectRecord::new(subject_id.clone(), self.registry.keys());
        let mut diagnostics = Vec::new();

        for (column, key) in self.columns.iter() {
            let Some(field) = self.registry.lookup_by_key(key) else {
                continue;
            };
            let cell = CellAddress::new(row, column);
            let value = raw(column);
            if is_blank_cell(value) {
                record.clear(key);
                if field.required {
                    warn!(subject = %subject_id, field = key, %cell, "required field is blank");
                    diagnostics.push(
                        Diagnostic::error(DiagnosticKind::MissingRequired, "required field is blank")
                            .with_subject(subject_id.as_str())
                            .with_field(key)
                            .with_cell(cell),
                    );
                }
                if key == keys::AGE {
                    warn!(subject = %subject_id, "no age specified");
                }
                continue;
            }
            let Some(value) = value else { continue };

            if !field.validate(value) {
                warn!(subject = %subject_id, field = key, %cell, value, "invalid value");
                diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticKind::InvalidValue,
                        format!("value does not match the {} contract", field.validator.tag()),
                    )
                    .with_subject(subject_id.as_str())
                    .with_field(key)
                    .with_cell(cell)
                    .with_value(value),
                );
            }
            let normalized = field.normalize(value);
            if field.is_identity() {
                set_identity(&mut record, field, value, &normalized, cell, &mut diagnostics);
            }
            record.set(key, normalized);
        }

        pair_caucasian_race(&mut record);
        Ok(MappedRow {
            record,
            diagnostics,
        })
    }

    fn subject_id<'c>(
        &self,
        row: usize,
        raw: impl Fn(usize) -> Option<&'c str>,
    ) -> std::result::Result<SubjectId, Vec<Diagnostic>> {
        let Some(column) = self.columns.subject_column() else {
            return Err(vec![Diagnostic::error(
                DiagnosticKind::MissingRequired,
                "no subject id column is mapped",
            )
            .with_field(keys::SUBJECT_ID)]);
        };
        let cell = CellAddress::new(row, column);
        let value = raw(column).filter(|value| !is_blank(value)).ok_or_else(|| {
            vec![
                Diagnostic::error(DiagnosticKind::MissingRequired, "subject id is blank")
                    .with_field(keys::SUBJECT_ID)
                    .with_cell(cell),
            ]
        })?;
        let normalized = self
            .registry
            .lookup_by_key(keys::SUBJECT_ID)
            .map_or_else(|| value.trim().to_string(), |field| field.normalize(value));
        SubjectId::new(normalized).map_err(|error| {
            warn!(%cell, value, "row has no usable subject id");
            vec![
                Diagnostic::error(DiagnosticKind::InvalidIdentity, error.to_string())
                    .with_field(keys::SUBJECT_ID)
                    .with_cell(cell)
                    .with_value(value),
            ]
        })
    }
}

/// Copy an identity field into its typed slot on the record.
fn set_identity(
    record: &mut SubjectRecord,
    field: &FieldDefinition,
    raw: &str,
    normalized: &str,
    cell: CellAddress,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let subject = record.subject_id.to_string();
    let key = field.key.as_str();
    let present = (!is_blank(normalized)).then(|| normalized.to_string());
    match key {
        keys::GENOTYPING => record.genotyping = YesNo::lookup(normalized),
        keys::PHENOTYPING => record.phenotyping = YesNo::lookup(normalized),
        keys::GENDER => record.gender = Gender::lookup(normalized),
        keys::RACE_SELF => record.race_self = present,
        keys::RACE_OMB => record.race_omb = present,
        keys::ETHNICITY_REPORTED => record.ethnicity_reported = present,
        keys::ETHNICITY_OMB => record.ethnicity_omb = present,
        keys::COUNTRY => record.country = present,
        keys::SAMPLE_SOURCE => {
            let (sources, unknown) = split_sample_sources(raw);
            for token in unknown {
                warn!(subject = %subject, field = key, %cell, token, "unknown sample source");
                diagnostics.push(
                    Diagnostic::warning(DiagnosticKind::UnknownToken, "unknown sample source")
                        .with_subject(subject.as_str())
                        .with_field(key)
                        .with_cell(cell)
                        .with_value(token),
                );
            }
            record.sample_sources = sources;
        }
        keys::PROJECT => match normalized.trim().parse::<u32>() {
            Ok(project) => record.project = Some(project),
            Err(_) => {
                warn!(subject = %subject, %cell, value = raw, "project is not a number");
                diagnostics.push(
                    Diagnostic::warning(DiagnosticKind::InvalidIdentity, "project is not a number")
                        .with_subject(subject.as_str())
                        .with_field(key)
                        .with_cell(cell)
                        .with_value(raw),
                );
            }
        },
        keys::AGE => match normalized.trim().parse::<f64>() {
            Ok(age) => record.age = Some(age),
            Err(_) => {
                warn!(subject = %subject, %cell, value = raw, "age is not a number");
                diagnostics.push(
                    Diagnostic::warning(DiagnosticKind::InvalidIdentity, "age is not a number")
                        .with_subject(subject.as_str())
                        .with_field(key)
                        .with_cell(cell)
                        .with_value(raw),
                );
            }
        },
        _ => {}
    }
}

/// Self-reported "caucasian" and OMB "white" describe the same subjects;
/// when either is given, both fields carry their own spelling of it.
fn pair_caucasian_race(record: &mut SubjectRecord) {
    let is_white = |value: Option<&str>| {
        value.is_some_and(|v| {
            let v = v.trim();
            v.eq_ignore_ascii_case("caucasian") || v.eq_ignore_ascii_case(Race::White.code())
        })
    };
    if !(is_white(record.get(keys::RACE_SELF)) || is_white(record.get(keys::RACE_OMB))) {
        return;
    }
    if record.set(keys::RACE_SELF, "caucasian") {
        record.race_self = Some("caucasian".to_string());
    }
    if record.set(keys::RACE_OMB, Race::White.code()) {
        record.race_omb = Some(Race::White.code().to_string());
    }
}
