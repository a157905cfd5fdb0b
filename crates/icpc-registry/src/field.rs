//! Field definitions and their value contracts.

use std::collections::BTreeSet;

use icpc_model::{BLANK, Coded, Gender, Race, SampleSource, YesNo, is_blank};

use crate::keys;
use crate::validator::{Validator, numeric_prefix};

/// Canonicalization applied to a non-blank value after validation.
///
/// Most fields follow their validator class. A few identity fields and the
/// height field carry their own transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// Trimmed value, unchanged.
    Plain,
    /// Sorted, upper-cased allele symbols joined by `/`.
    Alleles,
    /// Leading number, unit suffix dropped.
    Numeric,
    /// Leading number in centimetres; values under 10 are read as metres.
    Height,
    /// Trailing separators removed.
    SubjectId,
    /// YesNo label.
    Availability,
    /// Gender code.
    Gender,
    /// "caucasian" spelled as the OMB category.
    RaceOmb,
    /// "white" spelled as the self-reported term.
    RaceSelf,
    /// Every `;` token as its sample-source code; unknown tokens dropped.
    /// A value with no known token is blank.
    SampleSources,
}

impl Normalizer {
    pub fn for_field(key: &str, validator: &Validator) -> Self {
        match key {
            keys::SUBJECT_ID => Normalizer::SubjectId,
            keys::GENOTYPING | keys::PHENOTYPING => Normalizer::Availability,
            keys::GENDER => Normalizer::Gender,
            keys::RACE_OMB => Normalizer::RaceOmb,
            keys::RACE_SELF => Normalizer::RaceSelf,
            keys::SAMPLE_SOURCE => Normalizer::SampleSources,
            keys::HEIGHT => Normalizer::Height,
            _ => match validator {
                Validator::Alleles => Normalizer::Alleles,
                Validator::Numeric => Normalizer::Numeric,
                _ => Normalizer::Plain,
            },
        }
    }

    /// Canonical form of a trimmed, non-blank value.
    fn apply(self, value: &str) -> String {
        match self {
            Normalizer::Plain => value.to_string(),
            Normalizer::Alleles => normalize_alleles(value),
            Normalizer::Numeric => match numeric_prefix(value) {
                Some(number) if !is_blank(number) => number.to_string(),
                _ => value.to_string(),
            },
            Normalizer::Height => match numeric_prefix(value) {
                Some(number) if !is_blank(number) => normalize_height(number),
                _ => value.to_string(),
            },
            Normalizer::SubjectId => value.trim_matches(',').to_string(),
            Normalizer::Availability => YesNo::lookup(value)
                .map(|answer| answer.label().to_string())
                .unwrap_or_else(|| value.to_string()),
            Normalizer::Gender => Gender::lookup(value)
                .map(|gender| gender.code().to_string())
                .unwrap_or_else(|| value.to_string()),
            Normalizer::RaceOmb if value.eq_ignore_ascii_case("caucasian") => {
                Race::White.code().to_string()
            }
            Normalizer::RaceSelf if value.eq_ignore_ascii_case("white") => "caucasian".to_string(),
            Normalizer::RaceOmb | Normalizer::RaceSelf => value.to_string(),
            Normalizer::SampleSources => {
                let (sources, _) = split_sample_sources(value);
                if sources.is_empty() {
                    return BLANK.to_string();
                }
                sources
                    .iter()
                    .map(|source| source.code())
                    .collect::<Vec<_>>()
                    .join(";")
            }
        }
    }
}

fn normalize_alleles(value: &str) -> String {
    let mut symbols: Vec<char> = value
        .chars()
        .filter(|c| *c != '/')
        .flat_map(char::to_uppercase)
        .collect();
    if symbols.is_empty() {
        return BLANK.to_string();
    }
    symbols.sort_unstable();
    symbols
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

fn normalize_height(number: &str) -> String {
    match number.parse::<f64>() {
        Ok(height) if height < 10.0 => format!("{:.0}", height * 100.0),
        Ok(height) => format!("{height:.0}"),
        Err(_) => BLANK.to_string(),
    }
}

/// Resolve a `;`-separated sample-source value.
///
/// Returns the recognised sources in code order and the tokens that matched
/// no source. Empty tokens are ignored.
pub fn split_sample_sources(value: &str) -> (BTreeSet<SampleSource>, Vec<&str>) {
    let mut sources = BTreeSet::new();
    let mut unknown = Vec::new();
    for token in value.split(';').map(str::trim).filter(|t| !t.is_empty()) {
        match SampleSource::lookup(token) {
            Some(source) => {
                sources.insert(source);
            }
            None => unknown.push(token),
        }
    }
    (sources, unknown)
}

/// Immutable metadata and value contract for one attribute.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub key: String,
    /// Long-form description, matched against sheet headers.
    pub label: String,
    pub required: bool,
    pub reportable: bool,
    pub validator: Validator,
    pub normalizer: Normalizer,
}

impl FieldDefinition {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        validator: Validator,
    ) -> Self {
        let key = key.into();
        let normalizer = Normalizer::for_field(&key, &validator);
        Self {
            key,
            label: label.into(),
            required: false,
            reportable: false,
            validator,
            normalizer,
        }
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn reportable(mut self, reportable: bool) -> Self {
        self.reportable = reportable;
        self
    }

    /// Whether a raw value satisfies this field's contract.
    ///
    /// Blank values pass unless the field is required-binary.
    pub fn validate(&self, value: &str) -> bool {
        if is_blank(value) {
            return !self.validator.is_required_binary();
        }
        self.validator.matches(value)
    }

    /// Canonical form of a raw value; blank input yields [`BLANK`].
    pub fn normalize(&self, value: &str) -> String {
        if is_blank(value) {
            return BLANK.to_string();
        }
        self.normalizer.apply(value.trim())
    }

    pub fn is_identity(&self) -> bool {
        keys::is_identity(&self.key)
    }
}
