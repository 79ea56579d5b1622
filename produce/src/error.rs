//! Error types for produce records and the registry

use std::fmt;

use crate::record::Code;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// A field of a produce record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The produce name
    Name,
    /// The produce code
    Code,
    /// The produce price
    Price,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::Code => f.write_str("code"),
            Field::Price => f.write_str("price"),
        }
    }
}

/// A field value was rejected by validation.
///
/// Values which fail validation never reach the registry, so this
/// error never leaves the registry in a different state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {value:?}")]
pub struct InvalidField {
    field: Field,
    value: String,
}

impl InvalidField {
    pub(crate) fn new(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// The field which failed validation
    pub fn field(&self) -> Field {
        self.field
    }

    /// The rejected input, as it was provided
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Error types for registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A record with this code is already present
    #[error("entry already exists: {0}")]
    Duplicate(Code),

    /// No record with this code is present
    #[error("entry does not exist: {0}")]
    NotFound(Code),
}

impl RegistryError {
    /// The code this error refers to
    pub fn code(&self) -> &Code {
        match self {
            RegistryError::Duplicate(code) | RegistryError::NotFound(code) => code,
        }
    }
}
