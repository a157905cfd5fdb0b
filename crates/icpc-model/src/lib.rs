#![deny(unsafe_code)]

pub mod address;
pub mod blank;
pub mod coded;
pub mod diagnostic;
pub mod error;
pub mod ids;
pub mod record;

pub use address::{CellAddress, column_letters};
pub use blank::{BLANK, BLANK_SYNONYMS, is_blank, is_blank_cell};
pub use coded::{
    AlcoholStatus, Coded, DiabetesStatus, Gender, Race, SampleSource, YesNo, parse_coded,
};
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSummary, Severity};
pub use error::{ModelError, Result};
pub use ids::SubjectId;
pub use record::SubjectRecord;
