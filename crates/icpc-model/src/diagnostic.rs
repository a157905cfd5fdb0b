use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::CellAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Raw value failed the field's syntactic contract.
    InvalidValue,
    /// Blank value in a field that must be provided.
    MissingRequired,
    /// Token of a multi-valued coded field that is not in its domain.
    UnknownToken,
    /// Identity field could not be converted to its typed form.
    InvalidIdentity,
    /// A heuristic rewrote a value.
    Correction,
    /// A derivation could not run on the available input.
    DerivationSkipped,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::InvalidValue => "invalid_value",
            DiagnosticKind::MissingRequired => "missing_required",
            DiagnosticKind::UnknownToken => "unknown_token",
            DiagnosticKind::InvalidIdentity => "invalid_identity",
            DiagnosticKind::Correction => "correction",
            DiagnosticKind::DerivationSkipped => "derivation_skipped",
        }
    }
}

/// A row-local data-quality finding. Never fatal to processing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// Subject id of the row (if known).
    pub subject: Option<String>,
    /// Field key (if applicable).
    pub field: Option<String>,
    /// Source cell (row mapping only).
    pub cell: Option<CellAddress>,
    /// Offending or rewritten value.
    pub value: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            subject: None,
            field: None,
            cell: None,
            value: None,
            message: message.into(),
        }
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, message)
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_cell(mut self, cell: CellAddress) -> Self {
        self.cell = Some(cell);
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity.as_str())?;
        if let Some(subject) = &self.subject {
            write!(f, " [{subject}]")?;
        }
        if let Some(field) = &self.field {
            write!(f, " {field}")?;
        }
        if let Some(cell) = &self.cell {
            write!(f, " at {cell}")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(value) = &self.value {
            write!(f, " ({value:?})")?;
        }
        Ok(())
    }
}

/// Aggregate counts over a batch of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticSummary {
    pub errors: usize,
    pub warnings: usize,
    /// Diagnostics per field key; findings without a field are counted under "-".
    pub by_field: BTreeMap<String, usize>,
    pub by_kind: BTreeMap<DiagnosticKind, usize>,
}

impl DiagnosticSummary {
    pub fn record(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        let field = diagnostic.field.as_deref().unwrap_or("-");
        *self.by_field.entry(field.to_string()).or_default() += 1;
        *self.by_kind.entry(diagnostic.kind).or_default() += 1;
    }

    pub fn extend<'a>(&mut self, diagnostics: impl IntoIterator<Item = &'a Diagnostic>) {
        for diagnostic in diagnostics {
            self.record(diagnostic);
        }
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}
