use icpc_model::{BLANK, SubjectRecord};
use icpc_registry::keys;

use super::format_number;
use crate::context::RuleContext;
use crate::rule::DerivationRule;

/// Smallest plausible cells/µL per cell-count field.
pub const CELL_COUNT_FLOORS: [(&str, f64); 3] = [
    (keys::WHITE_CELL_COUNT, 1_000.0),
    (keys::RED_CELL_COUNT, 1_000_000.0),
    (keys::PLATELET_COUNT, 10_000.0),
];

/// Rescales cell counts that were reported in thousands or millions.
///
/// A positive count under its floor is multiplied by 1,000 if that reaches
/// the floor, and by 1,000,000 otherwise. These multipliers are heuristics
/// and every rescale is reported as a correction.
pub struct CellCountMagnitude;

impl CellCountMagnitude {
    /// Rescaled count, or `None` when the count is already plausible.
    pub fn rescale(count: f64, floor: f64) -> Option<f64> {
        if count <= 0.0 || count >= floor {
            return None;
        }
        let thousands = count * 1_000.0;
        if thousands >= floor {
            Some(thousands)
        } else {
            Some(count * 1_000_000.0)
        }
    }
}

impl DerivationRule for CellCountMagnitude {
    fn name(&self) -> &'static str {
        "cell_counts"
    }

    fn description(&self) -> &'static str {
        "Rescale implausibly small white cell, red cell and platelet counts"
    }

    fn apply(&self, record: &mut SubjectRecord, ctx: &mut RuleContext<'_>) {
        for (key, floor) in CELL_COUNT_FLOORS {
            let Some(raw) = record.get(key).map(str::to_string) else {
                continue;
            };
            let Ok(count) = raw.trim().parse::<f64>() else {
                ctx.skipped(record, key, &raw, "cell count is not a number");
                continue;
            };
            if let Some(rescaled) = Self::rescale(count, floor) {
                let corrected = format_number(rescaled);
                ctx.corrected(
                    record,
                    key,
                    &raw,
                    format!("cell count below {floor} rescaled to {corrected}"),
                );
                record.set(key, corrected);
            }
        }
    }
}

/// PCI information "0" was entered for "no data".
pub struct PciZeroToBlank;

impl DerivationRule for PciZeroToBlank {
    fn name(&self) -> &'static str {
        "pci_zero"
    }

    fn description(&self) -> &'static str {
        "Treat PCI information code 0 as missing"
    }

    fn apply(&self, record: &mut SubjectRecord, _ctx: &mut RuleContext<'_>) {
        if record.get(keys::PCI_INFORMATION).is_some_and(|value| value.trim() == "0") {
            record.set(keys::PCI_INFORMATION, BLANK);
        }
    }
}

#[cfg(test)]
mod tests {
    use icpc_model::DiagnosticKind;

    use super::*;
    use crate::options::DeriveOptions;
    use crate::rules::test_record;

    #[test]
    fn rescale_bands() {
        assert_eq!(CellCountMagnitude::rescale(7.2, 1_000.0), Some(7_200.0));
        assert_eq!(CellCountMagnitude::rescale(4.5, 1_000_000.0), Some(4_500_000.0));
        assert_eq!(CellCountMagnitude::rescale(250.0, 10_000.0), Some(250_000.0));
        assert_eq!(CellCountMagnitude::rescale(0.2, 1_000.0), Some(200_000.0));
        assert_eq!(CellCountMagnitude::rescale(6_500.0, 1_000.0), None);
        assert_eq!(CellCountMagnitude::rescale(0.0, 1_000.0), None);
        assert_eq!(CellCountMagnitude::rescale(-3.0, 1_000.0), None);
    }

    #[test]
    fn corrections_are_reported() {
        let options = DeriveOptions::default();
        let mut ctx = RuleContext::new(&options);
        let mut record = test_record();
        record.set(keys::WHITE_CELL_COUNT, "7.2");
        record.set(keys::RED_CELL_COUNT, "4500000");
        record.set(keys::PLATELET_COUNT, "many");
        CellCountMagnitude.apply(&mut record, &mut ctx);

        assert_eq!(record.raw(keys::WHITE_CELL_COUNT), Some("7200"));
        assert_eq!(record.raw(keys::RED_CELL_COUNT), Some("4500000"));
        assert_eq!(record.raw(keys::PLATELET_COUNT), Some("many"));

        let kinds: Vec<_> = ctx.diagnostics().iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            [DiagnosticKind::Correction, DiagnosticKind::DerivationSkipped]
        );
        assert_eq!(ctx.diagnostics()[0].value.as_deref(), Some("7.2"));
    }

    #[test]
    fn pci_zero_is_blank() {
        let options = DeriveOptions::default();
        let mut ctx = RuleContext::new(&options);
        let mut record = test_record();
        record.set(keys::PCI_INFORMATION, "0");
        PciZeroToBlank.apply(&mut record, &mut ctx);
        assert_eq!(record.raw(keys::PCI_INFORMATION), Some(BLANK));

        record.set(keys::PCI_INFORMATION, "2");
        PciZeroToBlank.apply(&mut record, &mut ctx);
        assert_eq!(record.raw(keys::PCI_INFORMATION), Some("2"));
    }
}
