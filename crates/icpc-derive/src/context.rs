use icpc_model::{Diagnostic, DiagnosticKind, SubjectRecord};
use tracing::warn;

use crate::options::DeriveOptions;

/// Options and collected findings for one record's post-processing pass.
pub struct RuleContext<'a> {
    pub options: &'a DeriveOptions,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    pub fn new(options: &'a DeriveOptions) -> Self {
        Self {
            options,
            diagnostics: Vec::new(),
        }
    }

    /// A rule could not run on the value it found.
    pub fn skipped(
        &mut self,
        record: &SubjectRecord,
        field: &str,
        value: &str,
        message: impl Into<String>,
    ) {
        let message = message.into();
        warn!(subject = %record.subject_id, field, value, "{message}");
        self.diagnostics.push(
            Diagnostic::warning(DiagnosticKind::DerivationSkipped, message)
                .with_subject(record.subject_id.as_str())
                .with_field(field)
                .with_value(value),
        );
    }

    /// A heuristic rewrote `value`.
    pub fn corrected(
        &mut self,
        record: &SubjectRecord,
        field: &str,
        value: &str,
        message: impl Into<String>,
    ) {
        let message = message.into();
        warn!(subject = %record.subject_id, field, value, "{message}");
        self.diagnostics.push(
            Diagnostic::warning(DiagnosticKind::Correction, message)
                .with_subject(record.subject_id.as_str())
                .with_field(field)
                .with_value(value),
        );
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
