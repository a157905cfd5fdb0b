use icpc_model::SubjectRecord;
use icpc_registry::keys;
use tracing::debug;

use crate::context::RuleContext;
use crate::rule::DerivationRule;

/// Event field and the time-to-event field censored when the event did not occur.
pub const EVENT_TIMES: [(&str, &str); 19] = [
    ("CV_events", "Time_MACE"),
    ("Major_Bleeding", "Days_MajorBleeding"),
    ("Minor_Bleeding", "Days_MinorBleeding"),
    (keys::STEMI, "Time_STEMI"),
    (keys::NSTEMI, "Time_NSTEMI"),
    ("Angina", "Time_Angina"),
    ("REVASC", "Time_REVASC"),
    ("Stroke", "Time_stroke"),
    ("Congestive_Heart_Failure", "Time_heartFailure"),
    ("Mechanical_Valve_Replacement", "Time_MechValve"),
    ("Tissue_Valve_Replacement", "Time_tissValve"),
    ("Stent_thromb", "Time_stent"),
    ("All_cause_mortality", "Time_mortality"),
    ("Cardiovascular_death", "Time_death"),
    ("Left_ventricular_hypertrophy", "Time_venHypertrophy"),
    ("Peripheral_vascular_disease", "Time_PeriVascular"),
    ("Atrial_fibrillation", "Time_AF"),
    ("acs_during_followup", "ttf_acs"),
    (keys::MI_DURING_FOLLOWUP, "ttf_mi"),
];

/// Censors the time to an event that did not occur at the full follow-up.
pub struct TimeToEvent;

impl DerivationRule for TimeToEvent {
    fn name(&self) -> &'static str {
        "time_to_event"
    }

    fn description(&self) -> &'static str {
        "Set the time to an event that did not occur to the follow-up duration"
    }

    fn apply(&self, record: &mut SubjectRecord, _ctx: &mut RuleContext<'_>) {
        let Some(followup) = record.get(keys::FOLLOWUP_DURATION).map(str::to_string) else {
            return;
        };
        for (event, time) in EVENT_TIMES {
            if !record.is_no(event) || !record.is_blank(time) {
                continue;
            }
            record.set(time, followup.as_str());
            debug!(subject = %record.subject_id, event, time, followup = %followup, "censored time to event");
        }
    }
}
