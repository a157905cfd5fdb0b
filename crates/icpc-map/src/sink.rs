//! Hand-off of finished records to persistence.

use std::collections::BTreeMap;
use std::convert::Infallible;

use icpc_model::{SubjectId, SubjectRecord};

/// Receives finished records.
///
/// Records are keyed by subject id: accepting a record for a subject already
/// seen in the run replaces the earlier one.
pub trait RecordSink {
    type Error;

    fn accept(&mut self, record: SubjectRecord) -> Result<(), Self::Error>;

    /// Flush buffered records. Returns how many distinct subjects were stored.
    fn finish(&mut self) -> Result<usize, Self::Error>;
}

/// Sink that keeps records in memory, ordered by subject id.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: BTreeMap<SubjectId, SubjectRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &SubjectId) -> Option<&SubjectRecord> {
        self.records.get(id)
    }

    pub fn records(&self) -> impl Iterator<Item = &SubjectRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<SubjectRecord> {
        self.records.into_values().collect()
    }
}

impl RecordSink for MemorySink {
    type Error = Infallible;

    fn accept(&mut self, record: SubjectRecord) -> Result<(), Self::Error> {
        self.records.insert(record.subject_id.clone(), record);
        Ok(())
    }

    fn finish(&mut self) -> Result<usize, Self::Error> {
        Ok(self.records.len())
    }
}
