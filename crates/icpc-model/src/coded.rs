//! Closed value domains used by coded fields.
//!
//! Each domain is a small enumeration with a short code (what the submission
//! templates ask for) and a display label (what submitters often type
//! instead). Lookup accepts either, case-insensitively.
//!
//! The field registry builds its enumerated validators from
//! [`Coded::pairs`] and [`Coded::ALIASES`], so adding a member here is enough
//! to make it an accepted token.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// A member of a closed, coded value domain.
pub trait Coded: Copy + Eq + 'static {
    /// Domain name used in diagnostics ("gender", "sample source").
    const DOMAIN: &'static str;
    /// Every member, in code order.
    const ALL: &'static [Self];
    /// Free-text spellings that resolve to a member, lower-cased.
    const ALIASES: &'static [(&'static str, Self)] = &[];

    fn code(self) -> &'static str;
    fn label(self) -> &'static str;

    /// Exact lookup by code or label, ignoring case and surrounding whitespace.
    fn lookup(text: &str) -> Option<Self> {
        let needle = text.trim();
        if needle.is_empty() {
            return None;
        }
        Self::ALL.iter().copied().find(|member| {
            member.code().eq_ignore_ascii_case(needle) || member.label().eq_ignore_ascii_case(needle)
        })
    }

    /// Lookup that falls back to the alias table.
    fn lookup_fuzzy(text: &str) -> Option<Self> {
        Self::lookup(text).or_else(|| {
            let needle = text.trim().to_lowercase();
            Self::ALIASES
                .iter()
                .find(|(alias, _)| *alias == needle)
                .map(|(_, member)| *member)
        })
    }

    /// `(code, label)` pairs for every member.
    fn pairs() -> Vec<(&'static str, &'static str)> {
        Self::ALL
            .iter()
            .map(|member| (member.code(), member.label()))
            .collect()
    }
}

/// Parse a coded value, reporting the domain on failure.
pub fn parse_coded<T: Coded>(text: &str) -> Result<T, ModelError> {
    T::lookup(text).ok_or_else(|| ModelError::UnknownCode {
        domain: T::DOMAIN,
        value: text.to_string(),
    })
}

/// Answer to an availability or occurrence question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
    Unknown,
}

impl YesNo {
    pub fn is_yes(text: &str) -> bool {
        Self::lookup(text) == Some(Self::Yes)
    }

    pub fn is_no(text: &str) -> bool {
        Self::lookup(text) == Some(Self::No)
    }
}

impl Coded for YesNo {
    const DOMAIN: &'static str = "yes/no";
    const ALL: &'static [Self] = &[Self::No, Self::Yes, Self::Unknown];

    fn code(self) -> &'static str {
        match self {
            Self::Yes => "1",
            Self::No => "0",
            Self::Unknown => "99",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Unknown => "not known",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Unknown,
    Male,
    Female,
}

impl Coded for Gender {
    const DOMAIN: &'static str = "gender";
    const ALL: &'static [Self] = &[Self::Unknown, Self::Male, Self::Female];

    fn code(self) -> &'static str {
        match self {
            Self::Unknown => "0",
            Self::Male => "1",
            Self::Female => "2",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// OMB race categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Race {
    White,
    Black,
    Asian,
    Other,
    Hispanic,
    AmericanIndian,
}

impl Race {
    /// First candidate that resolves to a race, tried in order.
    pub fn first_match<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<Self> {
        candidates
            .into_iter()
            .flatten()
            .find_map(Self::lookup_fuzzy)
    }
}

impl Coded for Race {
    const DOMAIN: &'static str = "race";
    const ALL: &'static [Self] = &[
        Self::White,
        Self::Black,
        Self::Asian,
        Self::Other,
        Self::Hispanic,
        Self::AmericanIndian,
    ];
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("caucasian", Self::White),
        ("caucasien", Self::White),
        ("asia", Self::Asian),
        ("african", Self::Black),
        ("han chinese", Self::Asian),
        ("korean", Self::Asian),
        ("others", Self::Other),
    ];

    fn code(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
            Self::Asian => "asian",
            Self::Other => "other",
            Self::Hispanic => "hispanic",
            Self::AmericanIndian => "americanIndian",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
            Self::Asian => "Asian",
            Self::Other => "Other",
            Self::Hispanic => "Hispanic",
            Self::AmericanIndian => "American Indian or Alaskan Native",
        }
    }
}

/// Tissue a sample was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SampleSource {
    Unknown,
    Serum,
    Plasma,
    Tissue,
    Others,
}

impl Coded for SampleSource {
    const DOMAIN: &'static str = "sample source";
    const ALL: &'static [Self] = &[
        Self::Unknown,
        Self::Serum,
        Self::Plasma,
        Self::Tissue,
        Self::Others,
    ];

    fn code(self) -> &'static str {
        match self {
            Self::Unknown => "0",
            Self::Serum => "1",
            Self::Plasma => "2",
            Self::Tissue => "3",
            Self::Others => "4",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Serum => "Serum",
            Self::Plasma => "Plasma",
            Self::Tissue => "Tissue",
            Self::Others => "Others",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlcoholStatus {
    None,
    Infrequent,
    Moderate,
    Frequent,
    Unknown,
}

impl Coded for AlcoholStatus {
    const DOMAIN: &'static str = "alcohol status";
    const ALL: &'static [Self] = &[
        Self::None,
        Self::Infrequent,
        Self::Moderate,
        Self::Frequent,
        Self::Unknown,
    ];

    fn code(self) -> &'static str {
        match self {
            Self::None => "0",
            Self::Infrequent => "1",
            Self::Moderate => "2",
            Self::Frequent => "3",
            Self::Unknown => "99",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Infrequent => "infrequent",
            Self::Moderate => "moderate",
            Self::Frequent => "frequent",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiabetesStatus {
    None,
    Type1,
    Type2,
    Unknown,
}

impl Coded for DiabetesStatus {
    const DOMAIN: &'static str = "diabetes status";
    const ALL: &'static [Self] = &[Self::None, Self::Type1, Self::Type2, Self::Unknown];

    fn code(self) -> &'static str {
        match self {
            Self::None => "0",
            Self::Type1 => "1",
            Self::Type2 => "2",
            Self::Unknown => "99",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Type1 => "type 1",
            Self::Type2 => "type 2",
            Self::Unknown => "unknown",
        }
    }
}

macro_rules! impl_display_from_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl FromStr for $ty {
                type Err = ModelError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_coded(s)
                }
            }
        )+
    };
}

impl_display_from_str!(YesNo, Gender, Race, SampleSource, AlcoholStatus, DiabetesStatus);
