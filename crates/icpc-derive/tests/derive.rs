use std::sync::LazyLock;

use icpc_derive::rules::{CELL_COUNT_FLOORS, CellCountMagnitude, TimeToEvent};
use icpc_derive::{DeriveOptions, PostProcessor};
use icpc_model::{BLANK, DiagnosticKind, SubjectId, SubjectRecord};
use icpc_registry::{FieldRegistry, keys};
use proptest::prelude::*;

static REGISTRY: LazyLock<FieldRegistry> =
    LazyLock::new(|| FieldRegistry::builtin().expect("builtin field table"));

fn subject(fields: &[(&str, &str)]) -> SubjectRecord {
    let mut record = SubjectRecord::new(SubjectId::new("PA00123").unwrap(), REGISTRY.keys());
    for (key, value) in fields {
        assert!(record.set(key, *value), "unknown key {key}");
    }
    record
}

fn processed(mut record: SubjectRecord) -> SubjectRecord {
    PostProcessor::default().process(&mut record);
    record
}

#[test]
fn bmi_from_weight_and_height() {
    let record = processed(subject(&[(keys::WEIGHT, "70"), (keys::HEIGHT, "180")]));
    assert_eq!(record.raw(keys::BMI), Some("21.6"));
}

#[test]
fn reported_bmi_is_kept() {
    let record = processed(subject(&[
        (keys::WEIGHT, "70"),
        (keys::HEIGHT, "180"),
        (keys::BMI, "2.0"),
    ]));
    assert_eq!(record.raw(keys::BMI), Some("2.0"));
}

#[test]
fn creatinine_units_by_project() {
    let mut bad = subject(&[(keys::CREATININE, "88.4")]);
    bad.project = Some(7);
    let bad = processed(bad);
    assert_eq!(bad.raw(keys::CREATININE), Some("1.00"));
    assert_eq!(bad.raw(keys::CREATININE_CATEGORY), Some("0"));

    let mut good = subject(&[(keys::CREATININE, "88.4")]);
    good.project = Some(1);
    let good = processed(good);
    assert_eq!(good.raw(keys::CREATININE), Some("88.4"));
    assert_eq!(good.raw(keys::CREATININE_CATEGORY), Some("1"));
}

#[test]
fn creatinine_projects_are_configurable() {
    let options = DeriveOptions::default().with_bad_creatinine_projects([12]);
    let processor = PostProcessor::standard(options);

    let mut record = subject(&[(keys::CREATININE, "176.8")]);
    record.project = Some(12);
    processor.process(&mut record);
    assert_eq!(record.raw(keys::CREATININE), Some("2.00"));
}

#[test]
fn time_to_event_censoring() {
    let record = processed(subject(&[
        ("CV_events", "no"),
        (keys::FOLLOWUP_DURATION, "365"),
    ]));
    assert_eq!(record.raw("Time_MACE"), Some("365"));

    let record = processed(subject(&[
        ("CV_events", "yes"),
        (keys::FOLLOWUP_DURATION, "365"),
    ]));
    assert_eq!(record.raw("Time_MACE"), Some(BLANK));
}

#[test]
fn mi_imputation() {
    let cases = [("yes", "no", "1"), ("no", "no", "0"), (BLANK, "no", BLANK)];
    for (stemi, nstemi, expected) in cases {
        let record = processed(subject(&[(keys::STEMI, stemi), (keys::NSTEMI, nstemi)]));
        assert_eq!(
            record.raw(keys::MI_DURING_FOLLOWUP),
            Some(expected),
            "STEMI={stemi} NSTEMI={nstemi}"
        );
    }
}

#[test]
fn imputed_mi_is_censored() {
    let record = processed(subject(&[
        (keys::STEMI, "0"),
        (keys::NSTEMI, "0"),
        (keys::FOLLOWUP_DURATION, "730"),
    ]));
    assert_eq!(record.raw(keys::MI_DURING_FOLLOWUP), Some("0"));
    assert_eq!(record.raw("ttf_mi"), Some("730"));
    assert_eq!(record.raw("Time_STEMI"), Some("730"));
}

#[test]
fn custom_pipeline_runs_only_its_rules() {
    let processor = PostProcessor::new(DeriveOptions::default()).add_rule(Box::new(TimeToEvent));
    assert_eq!(processor.rule_names(), ["time_to_event"]);

    let mut record = subject(&[
        (keys::STEMI, "0"),
        (keys::NSTEMI, "0"),
        (keys::FOLLOWUP_DURATION, "730"),
    ]);
    processor.process(&mut record);
    assert_eq!(record.raw(keys::MI_DURING_FOLLOWUP), Some(BLANK));
    assert_eq!(record.raw("ttf_mi"), Some(BLANK));
}

#[test]
fn derivation_problems_are_warnings() {
    let mut record = subject(&[
        (keys::WEIGHT, "heavy"),
        (keys::HEIGHT, "180"),
        (keys::CREATININE, "n/d"),
        (keys::WHITE_CELL_COUNT, "6.1"),
    ]);
    let diagnostics = PostProcessor::default().process(&mut record);

    assert!(diagnostics.iter().all(|d| !d.is_error()));
    let kinds: Vec<_> = diagnostics.iter().map(|d| (d.kind, d.field.as_deref())).collect();
    assert_eq!(
        kinds,
        [
            (DiagnosticKind::DerivationSkipped, Some(keys::CREATININE_CATEGORY)),
            (DiagnosticKind::DerivationSkipped, Some(keys::WEIGHT)),
            (DiagnosticKind::Correction, Some(keys::WHITE_CELL_COUNT)),
        ]
    );
    assert_eq!(record.raw(keys::BMI), Some(BLANK));
    assert_eq!(record.raw(keys::WHITE_CELL_COUNT), Some("6100"));
    assert!(diagnostics.iter().all(|d| d.subject.as_deref() == Some("PA00123")));
}

#[test]
fn reportable_fields_survive_processing() {
    let record = processed(subject(&[]));
    for field in REGISTRY.reportable_fields() {
        assert!(record.has_key(&field.key), "{}", field.key);
    }
    assert_eq!(record.properties.len(), REGISTRY.len());
}

proptest! {
    #[test]
    fn rescaled_counts_reach_their_floor(count in 0.001f64..1_000_000.0, idx in 0usize..3) {
        let (_, floor) = CELL_COUNT_FLOORS[idx];
        match CellCountMagnitude::rescale(count, floor) {
            Some(rescaled) => {
                prop_assert!(count < floor);
                prop_assert!(rescaled >= floor);
            }
            None => prop_assert!(count >= floor),
        }
    }

    #[test]
    fn smoking_is_monotonic(current in prop::sample::select(vec!["0", "1", "99", BLANK]),
                            ever in prop::sample::select(vec!["0", "1", "99", BLANK])) {
        let record = processed(subject(&[(keys::CURRENT_SMOKER, current), (keys::EVER_SMOKED, ever)]));
        if current == "1" {
            prop_assert_eq!(record.raw(keys::EVER_SMOKED), Some("1"));
        } else {
            prop_assert_eq!(record.raw(keys::EVER_SMOKED), Some(ever));
        }
    }
}
