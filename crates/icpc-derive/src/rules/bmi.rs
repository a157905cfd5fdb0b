use icpc_model::SubjectRecord;
use icpc_registry::keys;
use tracing::debug;

use crate::context::RuleContext;
use crate::rule::DerivationRule;

/// BMI from weight (kg) and height (cm), unless a non-zero BMI was reported.
pub struct Bmi;

impl DerivationRule for Bmi {
    fn name(&self) -> &'static str {
        "bmi"
    }

    fn description(&self) -> &'static str {
        "Compute BMI from weight and height when it was not reported"
    }

    fn apply(&self, record: &mut SubjectRecord, ctx: &mut RuleContext<'_>) {
        if let Some(reported) = record.get(keys::BMI) {
            let is_zero = reported.trim().parse::<f64>().is_ok_and(|bmi| bmi == 0.0);
            if !is_zero {
                return;
            }
        }

        let (Some(weight), Some(height)) = (
            record.get(keys::WEIGHT).map(str::to_string),
            record.get(keys::HEIGHT).map(str::to_string),
        ) else {
            record.clear(keys::BMI);
            return;
        };

        let weight_kg = weight.trim().parse::<f64>();
        let height_cm = height.trim().parse::<f64>();
        match (weight_kg, height_cm) {
            (Ok(w), Ok(h)) if w == 0.0 || h == 0.0 => {
                record.clear(keys::BMI);
            }
            (Ok(w), Ok(h)) => {
                let metres = h / 100.0;
                let bmi = format!("{:.1}", w / (metres * metres));
                debug!(subject = %record.subject_id, weight = w, height = h, bmi = %bmi, "computed BMI");
                record.set(keys::BMI, bmi);
            }
            (Err(_), _) => {
                record.clear(keys::BMI);
                ctx.skipped(record, keys::WEIGHT, &weight, "weight is not a number");
            }
            (_, Err(_)) => {
                record.clear(keys::BMI);
                ctx.skipped(record, keys::HEIGHT, &height, "height is not a number");
            }
        }
    }
}
