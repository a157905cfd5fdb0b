#![deny(unsafe_code)]

pub mod domain;
pub mod error;
pub mod field;
pub mod keys;
pub mod registry;
pub mod validator;

pub use crate::domain::EnumDomain;
pub use crate::error::{RegistryError, Result};
pub use crate::field::FieldDefinition;
pub use crate::registry::FieldRegistry;
pub use crate::validator::Validator;
