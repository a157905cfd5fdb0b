//! Header resolution and row mapping against the builtin field table.

use icpc_ingest::CsvSheet;
use icpc_map::{
    ColumnProblem, HeaderError, RowMapper, SUBJECT_ID_SENTINEL, SubjectRows, resolve_header,
    resolve_header_row,
};
use icpc_model::{BLANK, Gender, SampleSource};
use icpc_registry::{FieldRegistry, keys};
use serde_json::json;

fn registry() -> FieldRegistry {
    FieldRegistry::builtin().expect("builtin field table")
}

fn labels<'a>(registry: &'a FieldRegistry, keys: &[&str]) -> Vec<&'a str> {
    keys.iter()
        .map(|key| registry.lookup_by_key(key).expect("known key").label.as_str())
        .collect()
}

#[test]
fn header_names_every_bad_column() {
    let registry = registry();
    let mut header: Vec<Option<&str>> = labels(&registry, &keys::IDENTITY)
        .into_iter()
        .map(Some)
        .collect();
    header.insert(5, Some("Favourite colour"));

    let err = resolve_header(&registry, &header).unwrap_err();
    assert_eq!(
        err.problems(),
        [ColumnProblem::Unmapped {
            column: 5,
            text: "Favourite colour".to_string()
        }]
    );
    assert_eq!(
        err.to_string(),
        "1 header column(s) cannot be mapped: column F \"Favourite colour\" matches no field"
    );
}

#[test]
fn header_collects_all_problems() {
    let registry = registry();
    let header = [
        Some(SUBJECT_ID_SENTINEL),
        Some("Project Site"),
        Some("Shoe size"),
        None,
        Some(" Project Site "),
        Some("Hat size"),
    ];
    let err = resolve_header(&registry, &header).unwrap_err();
    let columns: Vec<_> = err.problems().iter().map(ColumnProblem::column).collect();
    assert_eq!(columns, [2, 4, 5]);
    assert!(matches!(
        &err.problems()[1],
        ColumnProblem::Duplicate { key, first_column: 1, .. } if key == keys::PROJECT
    ));
}

#[test]
fn header_requires_sentinel() {
    let registry = registry();
    let err = resolve_header(&registry, &[Some("Project Site")]).unwrap_err();
    assert!(matches!(
        err,
        HeaderError::SentinelMismatch { found: Some(ref text), .. } if text == "Project Site"
    ));

    let sheet = CsvSheet::from_rows([vec!["only a title"]]);
    let err = resolve_header_row(&registry, &sheet, 1).unwrap_err();
    assert!(matches!(err, HeaderError::MissingHeaderRow { row: 1 }));
}

#[test]
fn maps_example_subject_row() {
    let registry = registry();
    let header: Vec<_> = labels(&registry, &keys::IDENTITY)
        .into_iter()
        .map(Some)
        .collect();
    let columns = resolve_header(&registry, &header).expect("valid header");
    let mapper = RowMapper::new(&registry, &columns);

    let row = [
        "PA00123", "1", "0", "2;1", "31", "1", "caucasian", "", "", "", "USA", "45",
    ];
    let cells: Vec<_> = row
        .iter()
        .map(|cell| Some(*cell).filter(|c| !c.is_empty()))
        .collect();
    let mapped = mapper.map_row(3, &cells).expect("mapped row");
    let record = &mapped.record;

    assert_eq!(record.subject_id.as_str(), "PA00123");
    assert_eq!(record.project, Some(31));
    assert_eq!(record.gender, Some(Gender::Male));
    assert_eq!(record.race_self.as_deref(), Some("caucasian"));
    assert_eq!(
        record.sample_sources.iter().copied().collect::<Vec<_>>(),
        [SampleSource::Serum, SampleSource::Plasma]
    );
    assert_eq!(record.age, Some(45.0));
    assert_eq!(record.properties.len(), registry.len());
    assert_eq!(record.raw("Left_Ventricle"), Some(BLANK));

    let non_blank: std::collections::BTreeMap<_, _> = record
        .properties
        .iter()
        .filter(|(_, value)| value.as_str() != BLANK)
        .collect();
    insta::assert_json_snapshot!(json!({
        "subject_id": record.subject_id,
        "project": record.project,
        "gender": record.gender,
        "race_self": record.race_self,
        "race_omb": record.race_omb,
        "sample_sources": record.sample_sources,
        "diagnostics": mapped.diagnostics.len(),
        "non_blank": non_blank,
    }), @r#"
    {
      "diagnostics": 0,
      "gender": "male",
      "non_blank": {
        "Age": "45",
        "Country": "USA",
        "Gender": "1",
        "Genotyping": "yes",
        "Phenotyping": "no",
        "Project": "31",
        "Race_OMB": "white",
        "Race_self": "caucasian",
        "Sample_Source": "1;2",
        "Subject_ID": "PA00123"
      },
      "project": 31,
      "race_omb": "white",
      "race_self": "caucasian",
      "sample_sources": [
        "Serum",
        "Plasma"
      ],
      "subject_id": "PA00123"
    }
    "#);
}

#[test]
fn iterates_rows_of_a_sheet() {
    let registry = registry();
    let mut rows: Vec<Vec<String>> = vec![vec!["ICPC".to_string()]];
    rows.push(
        labels(&registry, &[keys::SUBJECT_ID, keys::PROJECT, keys::GENDER])
            .into_iter()
            .map(str::to_string)
            .collect(),
    );
    rows.push(vec!["instructions".to_string()]);
    for row in [["PA1", "31", "male"], ["PA2,", "x", "blah"], ["", "", ""]] {
        rows.push(row.iter().map(|cell| (*cell).to_string()).collect());
    }
    rows.push(vec!["PA9".to_string()]);
    let sheet = CsvSheet::from_rows(rows);

    let columns = resolve_header_row(&registry, &sheet, 1).expect("header");
    let mapper = RowMapper::new(&registry, &columns);
    let mapped: Vec<_> = SubjectRows::new(&sheet, &mapper, 3)
        .map(|(row, result)| (row, result.expect("subject row")))
        .collect();

    assert_eq!(mapped.len(), 2);
    assert_eq!(mapped[0].1.record.gender, Some(Gender::Male));
    assert!(mapped[0].1.diagnostics.is_empty());

    let second = &mapped[1].1;
    assert_eq!(mapped[1].0, 4);
    assert_eq!(second.record.subject_id.as_str(), "PA2");
    assert_eq!(second.record.project, None);
    let fields: Vec<_> = second
        .diagnostics
        .iter()
        .map(|d| (d.field.as_deref().unwrap_or("-"), d.kind.as_str()))
        .collect();
    assert_eq!(
        fields,
        [
            ("Project", "invalid_value"),
            ("Project", "invalid_identity"),
            ("Gender", "invalid_value"),
        ]
    );
}
