use icpc_model::SubjectRecord;
use icpc_registry::keys;
use tracing::debug;

use crate::context::RuleContext;
use crate::rule::DerivationRule;

/// µmol/L of creatinine per mg/dL.
pub const UMOL_PER_MG_DL: f64 = 88.4;

/// mg/dL at or above which the creatinine category is "1".
pub const CREATININE_THRESHOLD: f64 = 2.5;

/// Converts creatinine to mg/dL for projects that reported µmol/L.
pub struct CreatinineUnits;

impl DerivationRule for CreatinineUnits {
    fn name(&self) -> &'static str {
        "creatinine_units"
    }

    fn description(&self) -> &'static str {
        "Convert creatinine from µmol/L to mg/dL for projects known to report µmol/L"
    }

    fn apply(&self, record: &mut SubjectRecord, ctx: &mut RuleContext<'_>) {
        let Some(project) = record.project else {
            return;
        };
        if !ctx.options.bad_creatinine_projects.contains(&project) {
            return;
        }
        let Some(raw) = record.get(keys::CREATININE).map(str::to_string) else {
            return;
        };
        match raw.trim().parse::<f64>() {
            Ok(level) => {
                let converted = format!("{:.2}", level / UMOL_PER_MG_DL);
                debug!(subject = %record.subject_id, project, from = %raw, to = %converted, "converted creatinine");
                record.set(keys::CREATININE, converted);
            }
            Err(_) => ctx.skipped(record, keys::CREATININE, &raw, "creatinine is not a number"),
        }
    }
}

/// Derives the binary creatinine category when it was not reported.
pub struct CreatinineCategory;

impl DerivationRule for CreatinineCategory {
    fn name(&self) -> &'static str {
        "creatinine_category"
    }

    fn description(&self) -> &'static str {
        "Creatinine category from the 2.5 mg/dL threshold"
    }

    fn apply(&self, record: &mut SubjectRecord, ctx: &mut RuleContext<'_>) {
        if record.get(keys::CREATININE_CATEGORY).is_some() {
            return;
        }
        let Some(raw) = record.get(keys::CREATININE).map(str::to_string) else {
            record.clear(keys::CREATININE_CATEGORY);
            return;
        };
        match raw.trim().parse::<f64>() {
            Ok(level) => {
                let category = if level < CREATININE_THRESHOLD { "0" } else { "1" };
                record.set(keys::CREATININE_CATEGORY, category);
            }
            Err(_) => {
                record.clear(keys::CREATININE_CATEGORY);
                ctx.skipped(
                    record,
                    keys::CREATININE_CATEGORY,
                    &raw,
                    "creatinine is not a number",
                );
            }
        }
    }
}
