//! Syntactic contracts for raw field values.
//!
//! Validators are a closed set of strategies selected by a tag in the field
//! table. Every contract must match the whole (trimmed) value.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::EnumDomain;
use crate::error::{RegistryError, Result};

static REQUIRED_BINARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:0|1|(?i:yes|no))$").expect("Invalid required-binary regex")
});

static BINARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[01]|99)$").expect("Invalid binary regex"));

static TERNARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[012]|99)$").expect("Invalid ternary regex"));

static QUATERNARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0123]|99)$").expect("Invalid quaternary regex"));

static ALLELES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[AaTtGgCc/]+$").expect("Invalid allele regex"));

/// Optional sign, digits and decimal point, then an optional unit token.
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d*\.?\d*)\s*(?:mg/day|mg/L|mg|uM|ul|uL)?$").expect("Invalid numeric regex")
});

/// Leading numeric group of a value; always matches (possibly empty).
static NUMERIC_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d*\.?\d*").expect("Invalid numeric prefix regex"));

static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,2}:\d{2}:\d{2}|\d*\.?\d*)$").expect("Invalid time regex")
});

#[derive(Debug, Clone)]
pub enum Validator {
    /// Any value is accepted.
    None,
    /// `0`, `1`, `yes` or `no`; blank is itself invalid.
    RequiredBinary,
    /// `0`, `1` or `99`.
    Binary,
    /// `0`, `1`, `2` or `99`.
    Ternary,
    /// `0` to `3` or `99`.
    Quaternary,
    /// One or more of A, T, G, C, optionally separated by `/`.
    Alleles,
    /// A number with an optional unit suffix.
    Numeric,
    /// `HH:MM:SS` or a bare decimal.
    Time,
    /// Field-specific expression, anchored at both ends.
    Pattern(Regex),
    /// Member(s) of a coded domain.
    Enum(EnumDomain),
}

impl Validator {
    /// Resolve a field table tag. `pattern` is only read for the `pattern` tag.
    pub fn from_tag(key: &str, tag: &str, pattern: Option<&str>) -> Result<Self> {
        let tag = tag.trim();
        let validator = match tag {
            "" | "none" => Validator::None,
            "required-binary" => Validator::RequiredBinary,
            "binary" => Validator::Binary,
            "ternary" => Validator::Ternary,
            "quaternary" => Validator::Quaternary,
            "alleles" => Validator::Alleles,
            "numeric" => Validator::Numeric,
            "time" => Validator::Time,
            "pattern" => {
                let pattern = pattern
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| RegistryError::MissingPattern {
                        key: key.to_string(),
                    })?;
                Validator::pattern(key, pattern)?
            }
            other => {
                let domain = other
                    .strip_prefix("enum:")
                    .and_then(EnumDomain::by_name)
                    .ok_or_else(|| RegistryError::UnknownValidator {
                        key: key.to_string(),
                        tag: other.to_string(),
                    })?;
                Validator::Enum(domain)
            }
        };
        Ok(validator)
    }

    pub fn pattern(key: &str, pattern: &str) -> Result<Self> {
        Regex::new(&format!("^(?:{pattern})$"))
            .map(Validator::Pattern)
            .map_err(|source| RegistryError::InvalidPattern {
                key: key.to_string(),
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Tag as written in the field table.
    pub fn tag(&self) -> String {
        match self {
            Validator::None => "none".to_string(),
            Validator::RequiredBinary => "required-binary".to_string(),
            Validator::Binary => "binary".to_string(),
            Validator::Ternary => "ternary".to_string(),
            Validator::Quaternary => "quaternary".to_string(),
            Validator::Alleles => "alleles".to_string(),
            Validator::Numeric => "numeric".to_string(),
            Validator::Time => "time".to_string(),
            Validator::Pattern(_) => "pattern".to_string(),
            Validator::Enum(domain) => format!("enum:{}", domain.name()),
        }
    }

    pub fn is_required_binary(&self) -> bool {
        matches!(self, Validator::RequiredBinary)
    }

    /// Whether a non-blank value satisfies the contract.
    pub fn matches(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            Validator::None => true,
            Validator::RequiredBinary => REQUIRED_BINARY.is_match(value),
            Validator::Binary => BINARY.is_match(value),
            Validator::Ternary => TERNARY.is_match(value),
            Validator::Quaternary => QUATERNARY.is_match(value),
            Validator::Alleles => ALLELES.is_match(value),
            Validator::Numeric => NUMERIC.is_match(value),
            Validator::Time => TIME.is_match(value),
            Validator::Pattern(regex) => regex.is_match(value),
            Validator::Enum(domain) => domain.accepts(value),
        }
    }
}

/// Leading signed decimal of a value, with any unit suffix discarded.
pub fn numeric_prefix(value: &str) -> Option<&str> {
    NUMERIC_PREFIX
        .find(value.trim())
        .map(|m| m.as_str())
        .filter(|number| !number.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_families() {
        assert!(Validator::RequiredBinary.matches("Yes"));
        assert!(Validator::RequiredBinary.matches("NO"));
        assert!(!Validator::RequiredBinary.matches("99"));
        assert!(Validator::Binary.matches("99"));
        assert!(!Validator::Binary.matches("2"));
        assert!(Validator::Ternary.matches("2"));
        assert!(!Validator::Ternary.matches("3"));
        assert!(Validator::Quaternary.matches("3"));
        assert!(!Validator::Quaternary.matches("4"));
    }

    #[test]
    fn numeric_with_units() {
        for value in ["75 mg/day", "75mg", "-1.5", ".5", "12 uL", "3 mg/L"] {
            assert!(Validator::Numeric.matches(value), "{value}");
        }
        for value in ["75 kg", "abc", "1.2.3"] {
            assert!(!Validator::Numeric.matches(value), "{value}");
        }
    }

    #[test]
    fn numeric_prefix_drops_unit() {
        assert_eq!(numeric_prefix("75 mg/day"), Some("75"));
        assert_eq!(numeric_prefix("-2.5uM"), Some("-2.5"));
        assert_eq!(numeric_prefix("abc"), None);
    }

    #[test]
    fn time_durations() {
        for value in ["12:34:56", "2:34:56", "1.2", "48"] {
            assert!(Validator::Time.matches(value), "{value}");
        }
        assert!(!Validator::Time.matches("34blah"));
        assert!(!Validator::Time.matches("123:45:67"));
    }

    #[test]
    fn alleles() {
        assert!(Validator::Alleles.matches("A/G"));
        assert!(Validator::Alleles.matches("ct"));
        assert!(!Validator::Alleles.matches("A/N"));
    }

    #[test]
    fn pattern_is_anchored() {
        let project = Validator::pattern("Project", r"\d+").unwrap();
        assert!(project.matches("31"));
        assert!(!project.matches("project31"));
        assert!(!project.matches("31a"));
    }

    #[test]
    fn tags_resolve() {
        assert!(matches!(
            Validator::from_tag("Gender", "enum:gender", None).unwrap(),
            Validator::Enum(_)
        ));
        assert_eq!(
            Validator::from_tag("Age", "numeric", Some("ignored")).unwrap().tag(),
            "numeric"
        );
        assert!(matches!(
            Validator::from_tag("X", "enum:shoe", None),
            Err(RegistryError::UnknownValidator { .. })
        ));
        assert!(matches!(
            Validator::from_tag("X", "pattern", None),
            Err(RegistryError::MissingPattern { .. })
        ));
        assert!(matches!(
            Validator::from_tag("X", "pattern", Some("(")),
            Err(RegistryError::InvalidPattern { .. })
        ));
    }
}
