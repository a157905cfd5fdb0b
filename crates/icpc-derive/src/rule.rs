//! Derivation rule trait.
//!
//! A rule reads already-normalized fields of a record and writes derived or
//! corrected values back. Rules never fail: a rule that cannot run leaves
//! the record as it was and reports through the [`RuleContext`].

use icpc_model::SubjectRecord;

use crate::context::RuleContext;

pub trait DerivationRule: Send + Sync {
    /// Short, stable name used for listing and removing rules.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        "Derivation rule"
    }

    fn apply(&self, record: &mut SubjectRecord, ctx: &mut RuleContext<'_>);
}
