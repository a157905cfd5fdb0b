use icpc_model::SubjectRecord;
use icpc_registry::keys;

use super::{NO, YES};
use crate::context::RuleContext;
use crate::rule::DerivationRule;

/// A current smoker has ever smoked.
pub struct SmokingInference;

impl DerivationRule for SmokingInference {
    fn name(&self) -> &'static str {
        "smoking"
    }

    fn description(&self) -> &'static str {
        "Mark current smokers as having ever smoked"
    }

    fn apply(&self, record: &mut SubjectRecord, _ctx: &mut RuleContext<'_>) {
        if record.is_yes(keys::CURRENT_SMOKER) {
            record.set(keys::EVER_SMOKED, YES);
        }
    }
}

/// LVEF availability follows the ejection fraction value and defaults to "no".
pub struct LvefAvailability;

impl DerivationRule for LvefAvailability {
    fn name(&self) -> &'static str {
        "lvef"
    }

    fn description(&self) -> &'static str {
        "Mark LVEF as available when an ejection fraction is reported"
    }

    fn apply(&self, record: &mut SubjectRecord, _ctx: &mut RuleContext<'_>) {
        if record.number(keys::LVEF).is_some_and(|lvef| lvef != 0.0) {
            record.set(keys::LVEF_AVAILABLE, YES);
        }
        if record.is_blank(keys::LVEF_AVAILABLE) {
            record.set(keys::LVEF_AVAILABLE, NO);
        }
    }
}

/// MI during follow-up from STEMI and NSTEMI, when it was not reported.
pub struct MiImputation;

impl DerivationRule for MiImputation {
    fn name(&self) -> &'static str {
        "mi"
    }

    fn description(&self) -> &'static str {
        "Derive MI during follow-up from STEMI and NSTEMI"
    }

    fn apply(&self, record: &mut SubjectRecord, _ctx: &mut RuleContext<'_>) {
        if !record.is_blank(keys::MI_DURING_FOLLOWUP) {
            return;
        }
        if record.is_yes(keys::STEMI) || record.is_yes(keys::NSTEMI) {
            record.set(keys::MI_DURING_FOLLOWUP, YES);
        } else if record.is_no(keys::STEMI) && record.is_no(keys::NSTEMI) {
            record.set(keys::MI_DURING_FOLLOWUP, NO);
        }
    }
}

#[cfg(test)]
mod tests {
    use icpc_model::BLANK;

    use super::*;
    use crate::options::DeriveOptions;
    use crate::rules::test_record;

    fn apply(rule: &dyn DerivationRule, fields: &[(&str, &str)]) -> SubjectRecord {
        let options = DeriveOptions::default();
        let mut ctx = RuleContext::new(&options);
        let mut record = test_record();
        for (key, value) in fields {
            record.set(key, *value);
        }
        rule.apply(&mut record, &mut ctx);
        record
    }

    #[test]
    fn current_smoker_has_smoked() {
        let record = apply(&SmokingInference, &[(keys::CURRENT_SMOKER, "1"), (keys::EVER_SMOKED, "0")]);
        assert_eq!(record.raw(keys::EVER_SMOKED), Some("1"));

        let record = apply(&SmokingInference, &[(keys::CURRENT_SMOKER, "0"), (keys::EVER_SMOKED, "1")]);
        assert_eq!(record.raw(keys::EVER_SMOKED), Some("1"));

        let record = apply(&SmokingInference, &[(keys::CURRENT_SMOKER, "0")]);
        assert_eq!(record.raw(keys::EVER_SMOKED), Some(BLANK));
    }

    #[test]
    fn lvef_availability() {
        let record = apply(&LvefAvailability, &[(keys::LVEF, "55")]);
        assert_eq!(record.raw(keys::LVEF_AVAILABLE), Some("1"));

        let record = apply(&LvefAvailability, &[(keys::LVEF, "0")]);
        assert_eq!(record.raw(keys::LVEF_AVAILABLE), Some("0"));

        let record = apply(&LvefAvailability, &[(keys::LVEF_AVAILABLE, "1")]);
        assert_eq!(record.raw(keys::LVEF_AVAILABLE), Some("1"));

        let record = apply(&LvefAvailability, &[]);
        assert_eq!(record.raw(keys::LVEF_AVAILABLE), Some("0"));
    }

    #[test]
    fn mi_from_stemi_and_nstemi() {
        let cases = [
            ("yes", "no", "1"),
            ("0", "1", "1"),
            ("no", "no", "0"),
            (BLANK, "no", BLANK),
            ("99", "0", BLANK),
        ];
        for (stemi, nstemi, expected) in cases {
            let record = apply(&MiImputation, &[(keys::STEMI, stemi), (keys::NSTEMI, nstemi)]);
            assert_eq!(record.raw(keys::MI_DURING_FOLLOWUP), Some(expected), "{stemi}/{nstemi}");
        }
    }

    #[test]
    fn reported_mi_is_kept() {
        let record = apply(
            &MiImputation,
            &[(keys::MI_DURING_FOLLOWUP, "0"), (keys::STEMI, "1")],
        );
        assert_eq!(record.raw(keys::MI_DURING_FOLLOWUP), Some("0"));
    }
}
