use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid subject id: {0:?}")]
    InvalidSubjectId(String),
    #[error("unknown {domain} value: {value:?}")]
    UnknownCode { domain: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
