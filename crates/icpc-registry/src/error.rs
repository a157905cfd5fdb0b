#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read field table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse field table {table}: {source}")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },

    #[error("{table} line {line}: empty field key")]
    EmptyKey { table: String, line: u64 },

    #[error("{table} line {line}: field {key} has an empty label")]
    EmptyLabel {
        table: String,
        line: u64,
        key: String,
    },

    #[error("field {key}: invalid {column} flag {value:?} (expected true or false)")]
    InvalidFlag {
        key: String,
        column: &'static str,
        value: String,
    },

    #[error("field {key}: unknown validator {tag:?}")]
    UnknownValidator { key: String, tag: String },

    #[error("field {key}: pattern validator requires a pattern")]
    MissingPattern { key: String },

    #[error("field {key}: invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        key: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("duplicate field key {key:?}")]
    DuplicateKey { key: String },

    #[error("label {label:?} is shared by fields {first} and {second}")]
    DuplicateLabel {
        label: String,
        first: String,
        second: String,
    },
}

impl RegistryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
