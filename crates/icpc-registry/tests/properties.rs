//! Property tests for validation and normalization.

use std::sync::LazyLock;

use icpc_model::{BLANK, BLANK_SYNONYMS};
use icpc_registry::{FieldRegistry, Validator};
use proptest::prelude::*;

static REGISTRY: LazyLock<FieldRegistry> =
    LazyLock::new(|| FieldRegistry::builtin().expect("builtin field table"));

fn registry() -> &'static FieldRegistry {
    &REGISTRY
}

fn blank_spelling() -> impl Strategy<Value = String> {
    (
        prop::sample::select(BLANK_SYNONYMS.to_vec()),
        any::<bool>(),
        " {0,2}",
    )
        .prop_map(|(token, upper, pad)| {
            let token = if upper {
                token.to_uppercase()
            } else {
                token.to_string()
            };
            format!("{pad}{token}{pad}")
        })
}

proptest! {
    #[test]
    fn blank_spellings_normalize_to_blank(value in blank_spelling()) {
        for field in registry().all_fields() {
            prop_assert_eq!(field.normalize(&value), BLANK);
        }
    }

    #[test]
    fn blank_spellings_validate_unless_required_binary(value in blank_spelling()) {
        for field in registry().all_fields() {
            let expected = !matches!(field.validator, Validator::RequiredBinary);
            prop_assert_eq!(field.validate(&value), expected, "{}", field.key);
        }
    }

    #[test]
    fn numeric_normalization_is_idempotent(
        value in r"-?[0-9]{0,4}(\.[0-9]{1,3})?( ?(mg/day|mg/L|mg|uM|uL))?",
        key in prop::sample::select(vec!["Age", "Weight", "Dose_Aspirin", "Creatinine"]),
    ) {
        let field = registry().lookup_by_key(key).unwrap();
        let once = field.normalize(&value);
        prop_assert_eq!(field.normalize(&once), once);
    }

    #[test]
    fn allele_normalization_is_idempotent(value in "[AaTtGgCc/]{1,6}") {
        let field = registry().lookup_by_key("rs4244285").unwrap();
        let once = field.normalize(&value);
        prop_assert!(field.validate(&once));
        prop_assert_eq!(field.normalize(&once), once);
    }

    #[test]
    fn binary_normalization_is_idempotent(
        value in prop::sample::select(vec!["0", "1", "yes", "No", "YES", "99"]),
        key in prop::sample::select(vec!["Genotyping", "Phenotyping", "STEMI", "Ever_Smoked"]),
    ) {
        let field = registry().lookup_by_key(key).unwrap();
        let once = field.normalize(value);
        prop_assert_eq!(field.normalize(&once), once);
    }
}
