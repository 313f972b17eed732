//! Shared types used across the codebase

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ApiError;

/// One violated field and the reason it was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of every validator in the crate.
///
/// Validation never panics and never returns `Err`: callers inspect the
/// variant and decide the HTTP status themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<T> {
    Success { data: T },
    Failure {
        error: String,
        field_errors: Vec<FieldError>,
    },
}

// Serialized as `{ "success": true, "data": .. }` or
// `{ "success": false, "error": .., "fieldErrors": [..] }`
impl<T: Serialize> Serialize for ValidationResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ValidationResult::Success { data } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
                map.end()
            }
            ValidationResult::Failure { error, field_errors } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.serialize_entry("fieldErrors", field_errors)?;
                map.end()
            }
        }
    }
}

impl<T> ValidationResult<T> {
    pub fn success(data: T) -> Self {
        ValidationResult::Success { data }
    }

    /// Single-field failure
    pub fn failure(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::from_field_errors(vec![FieldError::new(field, message)])
    }

    /// Build a failure whose top-level message joins every field message with ", "
    pub fn from_field_errors(field_errors: Vec<FieldError>) -> Self {
        let error = join_messages(&field_errors);
        ValidationResult::Failure { error, field_errors }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ValidationResult::Success { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ValidationResult::Success { .. } => None,
            ValidationResult::Failure { error, .. } => Some(error),
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ValidationResult::Success { .. } => &[],
            ValidationResult::Failure { field_errors, .. } => field_errors,
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            ValidationResult::Success { data } => Some(data),
            ValidationResult::Failure { .. } => None,
        }
    }

    /// Convert into a `Result`, turning failures into a 400 with `message`
    /// as the client-facing error and the field errors as details.
    pub fn into_result(self, message: &str) -> Result<T, ApiError> {
        match self {
            ValidationResult::Success { data } => Ok(data),
            ValidationResult::Failure { field_errors, .. } => {
                Err(ApiError::validation_error(message, field_errors))
            }
        }
    }
}

pub fn join_messages(field_errors: &[FieldError]) -> String {
    field_errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
