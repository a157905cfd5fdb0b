use std::collections::BTreeSet;

use icpc_model::{AlcoholStatus, Coded, DiabetesStatus, Gender, Race, SampleSource};

/// Accepted tokens of a coded field, built from an explicit list of
/// `(code, label)` pairs plus optional aliases.
///
/// Every code and label is accepted as written and lower-cased. Aliases are
/// accepted lower-cased and with an upper-case first letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDomain {
    name: String,
    tokens: BTreeSet<String>,
    multi: bool,
}

impl EnumDomain {
    pub fn new<'a>(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
        aliases: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut tokens = BTreeSet::new();
        for (code, label) in pairs {
            for token in [code, label] {
                tokens.insert(token.to_string());
                tokens.insert(token.to_lowercase());
            }
        }
        for alias in aliases {
            let lowered = alias.to_lowercase();
            tokens.insert(capitalize(&lowered));
            tokens.insert(lowered);
        }
        Self {
            name: name.into(),
            tokens,
            multi: false,
        }
    }

    /// Domain of a [`Coded`] type, aliases included.
    pub fn of<T: Coded>(name: impl Into<String>) -> Self {
        Self::new(
            name,
            T::pairs(),
            T::ALIASES.iter().map(|(alias, _)| *alias),
        )
    }

    /// Accept several `;`-separated tokens in one value.
    #[must_use]
    pub fn multi_valued(mut self) -> Self {
        self.multi = true;
        self
    }

    /// Domain for a validator tag suffix (`enum:<name>`).
    pub fn by_name(name: &str) -> Option<Self> {
        let domain = match name {
            "gender" => Self::of::<Gender>(name),
            "race" => Self::of::<Race>(name).multi_valued(),
            "sample-source" => Self::of::<SampleSource>(name).multi_valued(),
            "alcohol" => Self::of::<AlcoholStatus>(name),
            "diabetes" => Self::of::<DiabetesStatus>(name),
            _ => return None,
        };
        Some(domain)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_multi_valued(&self) -> bool {
        self.multi
    }

    pub fn accepts_token(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn accepts(&self, value: &str) -> bool {
        let value = value.trim();
        if self.multi {
            value
                .split(';')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .all(|token| self.accepts_token(token))
        } else {
            self.accepts_token(value)
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_codes_labels_and_lower_case_labels() {
        let domain = EnumDomain::new(
            "tiny",
            [("1", "Serum"), ("2", "Plasma")],
            std::iter::empty(),
        );
        assert!(domain.accepts("1"));
        assert!(domain.accepts("Serum"));
        assert!(domain.accepts("serum"));
        assert!(!domain.accepts("SERUM"));
        assert!(!domain.accepts("3"));
    }

    #[test]
    fn multi_valued_checks_every_token() {
        let domain = EnumDomain::by_name("sample-source").unwrap();
        assert!(domain.is_multi_valued());
        assert!(domain.accepts("1;2;4"));
        assert!(domain.accepts("Serum; Plasma"));
        assert!(!domain.accepts("1;2;9"));
        assert!(!domain.accepts("1;29"));
    }

    #[test]
    fn race_accepts_aliases_in_both_cases() {
        let domain = EnumDomain::by_name("race").unwrap();
        for value in ["Caucasian", "caucasian", "Asian", "white", "black", "Han chinese"] {
            assert!(domain.accepts(value), "{value}");
        }
        assert!(!domain.accepts("martian"));
    }

    #[test]
    fn unknown_domain_name() {
        assert!(EnumDomain::by_name("shoe-size").is_none());
    }
}
