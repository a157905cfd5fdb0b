//! The standard derivation rules.

mod bmi;
mod corrections;
mod creatinine;
mod inference;
mod race;
mod time_to_event;

pub use bmi::Bmi;
pub use corrections::{CELL_COUNT_FLOORS, CellCountMagnitude, PciZeroToBlank};
pub use creatinine::{CREATININE_THRESHOLD, CreatinineCategory, CreatinineUnits, UMOL_PER_MG_DL};
pub use inference::{LvefAvailability, MiImputation, SmokingInference};
pub use race::RaceCanonical;
pub use time_to_event::{EVENT_TIMES, TimeToEvent};

/// Code written for a derived "yes".
pub const YES: &str = "1";
/// Code written for a derived "no".
pub const NO: &str = "0";

/// Decimal text of a computed value, rounded to six places.
pub(crate) fn format_number(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    format!("{rounded}")
}

#[cfg(test)]
pub(crate) fn test_record() -> icpc_model::SubjectRecord {
    use std::sync::LazyLock;

    use icpc_registry::FieldRegistry;

    static REGISTRY: LazyLock<FieldRegistry> =
        LazyLock::new(|| FieldRegistry::builtin().expect("builtin field table"));
    icpc_model::SubjectRecord::new(
        icpc_model::SubjectId::new("PA1").expect("subject id"),
        REGISTRY.keys(),
    )
}
