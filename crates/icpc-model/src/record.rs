//! Canonical subject record.
//!
//! A record holds one normalized string per known field key plus typed
//! copies of the identity fields used for grouping and storage keys. The
//! key set is fixed when the record is created: [`SubjectRecord::set`]
//! refuses keys the record was not seeded with, so a record can never carry
//! a field the registry does not define.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{BLANK, Gender, SampleSource, SubjectId, YesNo, is_blank};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectRecord {
    pub subject_id: SubjectId,
    pub project: Option<u32>,
    pub genotyping: Option<YesNo>,
    pub phenotyping: Option<YesNo>,
    pub sample_sources: BTreeSet<SampleSource>,
    pub gender: Option<Gender>,
    pub race_self: Option<String>,
    pub race_omb: Option<String>,
    pub ethnicity_reported: Option<String>,
    pub ethnicity_omb: Option<String>,
    pub country: Option<String>,
    pub age: Option<f64>,
    pub properties: BTreeMap<String, String>,
}

impl SubjectRecord {
    /// Create a record whose properties hold [`BLANK`] for every given key.
    pub fn new<'a>(subject_id: SubjectId, keys: impl IntoIterator<Item = &'a str>) -> Self {
        let properties = keys
            .into_iter()
            .map(|key| (key.to_string(), BLANK.to_string()))
            .collect();
        Self {
            subject_id,
            project: None,
            genotyping: None,
            phenotyping: None,
            sample_sources: BTreeSet::new(),
            gender: None,
            race_self: None,
            race_omb: None,
            ethnicity_reported: None,
            ethnicity_omb: None,
            country: None,
            age: None,
            properties,
        }
    }

    /// Stored value, including the blank token.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Stored value, or `None` when it is missing or blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw(key).filter(|value| !is_blank(value))
    }

    /// Overwrite a known key. Returns false (and changes nothing) for unknown keys.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.properties.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, key: &str) -> bool {
        self.set(key, BLANK)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn is_blank(&self, key: &str) -> bool {
        self.get(key).is_none()
    }

    pub fn is_yes(&self, key: &str) -> bool {
        self.get(key).is_some_and(YesNo::is_yes)
    }

    pub fn is_no(&self, key: &str) -> bool {
        self.get(key).is_some_and(YesNo::is_no)
    }

    /// Stored value parsed as a decimal number.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key)?.trim().parse::<f64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SubjectRecord {
        SubjectRecord::new(
            SubjectId::new("PA1").unwrap(),
            ["Age", "STEMI", "Weight"],
        )
    }

    #[test]
    fn seeds_every_key_with_blank() {
        let record = record();
        assert_eq!(record.properties.len(), 3);
        assert!(record.properties.values().all(|v| v == BLANK));
        assert!(record.is_blank("Age"));
    }

    #[test]
    fn refuses_unknown_keys() {
        let mut record = record();
        assert!(record.set("Age", "45"));
        assert!(!record.set("Shoe_size", "11"));
        assert!(!record.has_key("Shoe_size"));
        assert_eq!(record.number("Age"), Some(45.0));
    }

    #[test]
    fn answers_use_codes_or_labels() {
        let mut record = record();
        record.set("STEMI", "yes");
        assert!(record.is_yes("STEMI"));
        record.set("STEMI", "0");
        assert!(record.is_no("STEMI"));
        record.set("STEMI", "99");
        assert!(!record.is_yes("STEMI"));
        assert!(!record.is_no("STEMI"));
        assert!(record.is_blank("STEMI"));
    }
}
