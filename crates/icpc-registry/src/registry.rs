//! The field registry: every known attribute, indexed by key and by label.
//!
//! The registry is built once from a field table and is immutable after
//! construction. Both indices are hash maps, so lookups do not scan the
//! table. Ambiguity (two fields with the same key or the same label) is a
//! construction error.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::field::FieldDefinition;
use crate::validator::Validator;

const BUILTIN_TABLE: &str = include_str!("../data/fields.csv");
const BUILTIN_NAME: &str = "fields.csv";

#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldDefinition>,
    by_key: HashMap<String, usize>,
    by_label: HashMap<String, usize>,
}

impl FieldRegistry {
    /// Registry of the embedded ICPC field table.
    pub fn builtin() -> Result<Self> {
        Self::from_csv_str(BUILTIN_NAME, BUILTIN_TABLE)
    }

    /// Parse a field table. `table` names the source in error messages.
    pub fn from_csv_str(table: &str, text: &str) -> Result<Self> {
        let rows = read_table_rows(table, text)?;
        let mut fields = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            // Line 1 is the header.
            let line = idx as u64 + 2;
            fields.push(parse_field(table, line, row)?);
        }
        let registry = Self::from_definitions(fields)?;
        debug!(
            table,
            fields = registry.len(),
            reportable = registry.reportable_fields().count(),
            "field registry built"
        );
        Ok(registry)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| RegistryError::io(path, e))?;
        Self::from_csv_str(&path.display().to_string(), &text)
    }

    pub fn from_definitions(fields: Vec<FieldDefinition>) -> Result<Self> {
        let mut by_key = HashMap::with_capacity(fields.len());
        let mut by_label: HashMap<String, usize> = HashMap::with_capacity(fields.len());
        for (idx, field) in fields.iter().enumerate() {
            if by_key.insert(field.key.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateKey {
                    key: field.key.clone(),
                });
            }
            let label = field.label.trim().to_string();
            if let Some(first) = by_label.get(&label) {
                return Err(RegistryError::DuplicateLabel {
                    label,
                    first: fields[*first].key.clone(),
                    second: field.key.clone(),
                });
            }
            by_label.insert(label, idx);
        }
        Ok(Self {
            fields,
            by_key,
            by_label,
        })
    }

    pub fn lookup_by_key(&self, key: &str) -> Option<&FieldDefinition> {
        self.by_key.get(key).map(|idx| &self.fields[*idx])
    }

    /// Field whose label equals `label` once surrounding whitespace is trimmed.
    pub fn lookup_by_label(&self, label: &str) -> Option<&FieldDefinition> {
        self.by_label.get(label.trim()).map(|idx| &self.fields[*idx])
    }

    /// Every field, in table order.
    pub fn all_fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.key.as_str())
    }

    /// Fields surfaced by downstream reporting, in table order.
    pub fn reportable_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|field| field.reportable)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn read_table_rows(table: &str, text: &str) -> Result<Vec<BTreeMap<String, String>>> {
    let csv_error = |source| RegistryError::Csv {
        table: table.to_string(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers().map_err(csv_error)?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers
                .get(idx)
                .unwrap_or("")
                .trim_matches('\u{feff}')
                .trim()
                .to_string();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

fn get_field<'a>(row: &'a BTreeMap<String, String>, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or("")
}

fn get_optional<'a>(row: &'a BTreeMap<String, String>, column: &str) -> Option<&'a str> {
    row.get(column).map(String::as_str).filter(|v| !v.is_empty())
}

fn parse_field(table: &str, line: u64, row: &BTreeMap<String, String>) -> Result<FieldDefinition> {
    let key = get_field(row, "key");
    if key.is_empty() {
        return Err(RegistryError::EmptyKey {
            table: table.to_string(),
            line,
        });
    }
    let label = get_field(row, "label");
    if label.is_empty() {
        return Err(RegistryError::EmptyLabel {
            table: table.to_string(),
            line,
            key: key.to_string(),
        });
    }
    let required = parse_flag(key, "required", get_field(row, "required"))?;
    let reportable = parse_flag(key, "reportable", get_field(row, "reportable"))?;
    let validator = Validator::from_tag(key, get_field(row, "validator"), get_optional(row, "pattern"))?;

    Ok(FieldDefinition::new(key, label, validator)
        .required(required)
        .reportable(reportable))
}

fn parse_flag(key: &str, column: &'static str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "0" => Ok(false),
        "true" | "yes" | "1" => Ok(true),
        _ => Err(RegistryError::InvalidFlag {
            key: key.to_string(),
            column,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
key,label,required,reportable,validator,pattern
Subject_ID,PharmGKB Subject ID,true,false,pattern,\"(PA\\d+),?\"
Age,Age at Time of Consent,false,true,numeric,
STEMI,STEMI,,,binary,
";

    #[test]
    fn parses_small_table() {
        let registry = FieldRegistry::from_csv_str("small", SMALL).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.keys().collect::<Vec<_>>(), ["Subject_ID", "Age", "STEMI"]);
        let subject = registry.lookup_by_key("Subject_ID").unwrap();
        assert!(subject.required);
        assert!(subject.validate("PA12,"));
        assert_eq!(
            registry.lookup_by_label("  Age at Time of Consent ").unwrap().key,
            "Age"
        );
        assert!(!registry.lookup_by_key("STEMI").unwrap().required);
    }

    #[test]
    fn rejects_bad_flag() {
        let text = "key,label,required,reportable,validator,pattern\nAge,Age,maybe,false,numeric,\n";
        let err = FieldRegistry::from_csv_str("flags", text).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidFlag { column: "required", .. }));
    }

    #[test]
    fn rejects_empty_key_with_line() {
        let text = "key,label,required,reportable,validator,pattern\nAge,Age,,,numeric,\n,Nothing,,,,\n";
        let err = FieldRegistry::from_csv_str("keys", text).unwrap_err();
        assert!(matches!(err, RegistryError::EmptyKey { line: 3, .. }));
    }

    #[test]
    fn rejects_duplicate_key() {
        let text = "key,label,required,reportable,validator,pattern\nAge,Age,,,,\nAge,Age again,,,,\n";
        let err = FieldRegistry::from_csv_str("dupes", text).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateKey { key } if key == "Age"));
    }
}
