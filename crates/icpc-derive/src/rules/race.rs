use icpc_model::{BLANK, Coded, Race, SubjectRecord};
use icpc_registry::keys;
use tracing::debug;

use crate::context::RuleContext;
use crate::rule::DerivationRule;

/// Fields searched for a race, in priority order.
const RACE_SOURCES: [&str; 4] = [
    keys::RACE_OMB,
    keys::RACE_SELF,
    keys::ETHNICITY_OMB,
    keys::ETHNICITY_REPORTED,
];

/// Recomputes the OMB race from every race and ethnicity field.
pub struct RaceCanonical;

impl DerivationRule for RaceCanonical {
    fn name(&self) -> &'static str {
        "race"
    }

    fn description(&self) -> &'static str {
        "Standardize the OMB race from the race and ethnicity fields"
    }

    fn apply(&self, record: &mut SubjectRecord, _ctx: &mut RuleContext<'_>) {
        let found = Race::first_match(RACE_SOURCES.iter().map(|key| record.get(key)));
        match found {
            Some(race) => {
                record.set(keys::RACE_OMB, race.code());
                record.race_omb = Some(race.code().to_string());
            }
            None => {
                debug!(subject = %record.subject_id, "no race could be determined");
                record.set(keys::RACE_OMB, BLANK);
                record.race_omb = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DeriveOptions;
    use crate::rules::test_record;

    fn canonical(fields: &[(&str, &str)]) -> SubjectRecord {
        let options = DeriveOptions::default();
        let mut ctx = RuleContext::new(&options);
        let mut record = test_record();
        for (key, value) in fields {
            record.set(key, *value);
        }
        RaceCanonical.apply(&mut record, &mut ctx);
        assert!(ctx.diagnostics().is_empty());
        record
    }

    #[test]
    fn finds_race_in_any_field() {
        let record = canonical(&[(keys::RACE_SELF, "Korean")]);
        assert_eq!(record.raw(keys::RACE_OMB), Some("asian"));
        assert_eq!(record.race_omb.as_deref(), Some("asian"));

        let record = canonical(&[(keys::ETHNICITY_REPORTED, "African")]);
        assert_eq!(record.raw(keys::RACE_OMB), Some("black"));
    }

    #[test]
    fn standardized_field_wins() {
        let record = canonical(&[(keys::RACE_OMB, "white"), (keys::RACE_SELF, "Korean")]);
        assert_eq!(record.raw(keys::RACE_OMB), Some("white"));
    }

    #[test]
    fn no_match_is_blank() {
        let record = canonical(&[(keys::RACE_SELF, "Martian")]);
        assert_eq!(record.raw(keys::RACE_OMB), Some(BLANK));
        assert_eq!(record.race_omb, None);
    }
}
