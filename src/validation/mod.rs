//! Validation of untrusted request input.
//!
//! Every schema pairs a raw, loosely-typed input struct (deserialized straight
//! from the request JSON and checked with `validator`) with the strongly-typed
//! value handed to callers once all rules pass and defaults are filled in.

pub mod file;
pub mod schemas;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::types::{FieldError, ValidationResult};

pub use file::{validate_file, UploadedFile, MAX_FILE_SIZE_BYTES};
pub use schemas::{CsvRow, LoginCredentials, MetricsQuery, Period, SheetsImportPayload};

pub const REQUIRED_MESSAGE: &str = "Required";

pub trait Schema: Sized {
    type Input: DeserializeOwned + Validate;

    /// `(wire name, struct field name)` pairs in declaration order.
    /// Field errors are reported in this order.
    const FIELDS: &'static [(&'static str, &'static str)];

    /// Rules `validator` cannot express. Runs only after the input deserialized.
    fn refine(_input: &Self::Input) -> Vec<FieldError> {
        Vec::new()
    }

    /// Build the output value, applying declared defaults
    fn from_input(input: Self::Input) -> Self;
}

/// Validate `input` against schema `S`.
///
/// Fails closed: any violation yields `Failure`, never a partially
/// defaulted `Success`.
pub fn validate<S: Schema>(input: &Value) -> ValidationResult<S> {
    if !input.is_object() {
        return ValidationResult::failure("body", "Expected an object");
    }

    let raw = match S::Input::deserialize(input) {
        Ok(raw) => raw,
        Err(e) => return ValidationResult::failure("body", e.to_string()),
    };

    let mut field_errors = match raw.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => collect_field_errors(&errors, S::FIELDS),
    };
    field_errors.extend(S::refine(&raw));

    if !field_errors.is_empty() {
        field_errors.sort_by_key(|e| field_position(S::FIELDS, &e.field));
        return ValidationResult::from_field_errors(field_errors);
    }

    ValidationResult::success(S::from_input(raw))
}

fn field_position(fields: &[(&str, &str)], field: &str) -> usize {
    fields
        .iter()
        .position(|(wire, _)| *wire == field)
        .unwrap_or(fields.len())
}

/// One entry per violated field (its first message), in declaration order
fn collect_field_errors(
    errors: &ValidationErrors,
    fields: &[(&'static str, &'static str)],
) -> Vec<FieldError> {
    let by_field = errors.field_errors();

    fields
        .iter()
        .filter_map(|(wire, rust)| {
            let errs = by_field.get(*wire).or_else(|| by_field.get(*rust))?;
            let first = errs.first()?;
            let message = match &first.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {}", wire),
            };
            Some(FieldError::new(*wire, message))
        })
        .collect()
}
