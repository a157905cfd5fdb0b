//! Ordered post-processing of subject records.
//!
//! # Standard rule order
//!
//! 1. **creatinine_units** - convert µmol/L creatinine for known projects
//! 2. **creatinine_category** - derive the 2.5 mg/dL category
//! 3. **bmi** - compute BMI from weight and height
//! 4. **race** - recompute the OMB race from every race and ethnicity field
//! 5. **smoking** - current smokers have ever smoked
//! 6. **lvef** - LVEF availability from the ejection fraction value
//! 7. **mi** - MI during follow-up from STEMI and NSTEMI
//! 8. **time_to_event** - censor event times at full follow-up
//! 9. **cell_counts** - rescale implausibly small cell counts
//! 10. **pci_zero** - PCI information "0" means no data
//!
//! The creatinine category reads the converted creatinine, and time to event
//! reads the imputed MI, so those pairs must keep their relative order.

use icpc_model::{Diagnostic, SubjectRecord};
use tracing::{debug, trace};

use crate::context::RuleContext;
use crate::options::DeriveOptions;
use crate::rule::DerivationRule;
use crate::rules;

pub struct PostProcessor {
    rules: Vec<Box<dyn DerivationRule>>,
    options: DeriveOptions,
}

impl PostProcessor {
    /// A processor with no rules.
    pub fn new(options: DeriveOptions) -> Self {
        Self {
            rules: Vec::new(),
            options,
        }
    }

    /// The standard ICPC rule set, in dependency order.
    pub fn standard(options: DeriveOptions) -> Self {
        Self::new(options)
            .add_rule(Box::new(rules::CreatinineUnits))
            .add_rule(Box::new(rules::CreatinineCategory))
            .add_rule(Box::new(rules::Bmi))
            .add_rule(Box::new(rules::RaceCanonical))
            .add_rule(Box::new(rules::SmokingInference))
            .add_rule(Box::new(rules::LvefAvailability))
            .add_rule(Box::new(rules::MiImputation))
            .add_rule(Box::new(rules::TimeToEvent))
            .add_rule(Box::new(rules::CellCountMagnitude))
            .add_rule(Box::new(rules::PciZeroToBlank))
    }

    /// Add a rule to the end of the pipeline.
    #[must_use]
    pub fn add_rule(mut self, rule: Box<dyn DerivationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Remove a rule by name.
    #[must_use]
    pub fn remove_rule(mut self, name: &str) -> Self {
        self.rules.retain(|rule| rule.name() != name);
        self
    }

    pub fn options(&self) -> &DeriveOptions {
        &self.options
    }

    /// Rule names in execution order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Rules as `(name, description)`, in execution order.
    pub fn rule_descriptions(&self) -> Vec<(&'static str, &'static str)> {
        self.rules
            .iter()
            .map(|rule| (rule.name(), rule.description()))
            .collect()
    }

    /// Run every rule on the record, in order.
    pub fn process(&self, record: &mut SubjectRecord) -> Vec<Diagnostic> {
        let mut ctx = RuleContext::new(&self.options);
        for rule in &self.rules {
            trace!(subject = %record.subject_id, rule = rule.name(), "applying rule");
            rule.apply(record, &mut ctx);
        }
        let diagnostics = ctx.into_diagnostics();
        debug!(
            subject = %record.subject_id,
            rules = self.rules.len(),
            findings = diagnostics.len(),
            "record post-processed"
        );
        diagnostics
    }
}

impl Default for PostProcessor {
    fn default() -> Self {
        Self::standard(DeriveOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_rule_order() {
        let processor = PostProcessor::default();
        assert_eq!(
            processor.rule_names(),
            [
                "creatinine_units",
                "creatinine_category",
                "bmi",
                "race",
                "smoking",
                "lvef",
                "mi",
                "time_to_event",
                "cell_counts",
                "pci_zero",
            ]
        );
    }

    #[test]
    fn rules_can_be_removed() {
        let processor = PostProcessor::default().remove_rule("bmi");
        assert_eq!(processor.rule_names().len(), 9);
        assert!(!processor.rule_names().contains(&"bmi"));
    }
}
