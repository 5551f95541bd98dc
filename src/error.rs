//! Error types for request validation.
//!
//! Field-level problems are never errors in the `std::error::Error` sense: they are
//! collected as [`FieldError`] values and returned as data. The enums in this module
//! cover everything else, i.e. faults a caller cannot fix by correcting input.

use serde::Serialize;
use serde_json::Value;

/// Main error type for gate operations.
///
/// Every variant is a programming or configuration fault. At the request boundary
/// they are logged and surfaced as a generic 500 without internal detail.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// A request path referenced a schema name that was never registered
    #[error("Schema not found: {name}")]
    SchemaNotFound { name: String },

    /// A schema document broke the data-model invariants
    #[error("Invalid schema: {0}")]
    InvalidSchema(#[from] SchemaError),

    /// Unexpected failure inside the validation engine
    #[error("Internal validation error: {message}")]
    Internal { message: String },

    /// A component was handed data that should already have been validated
    #[error("Contract violation: {details}")]
    ContractViolation { details: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GateError {
    /// Create a schema-not-found error
    pub fn schema_not_found(name: impl Into<String>) -> Self {
        Self::SchemaNotFound { name: name.into() }
    }

    /// Create an internal engine error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a contract violation error
    pub fn contract_violation(details: impl Into<String>) -> Self {
        Self::ContractViolation {
            details: details.into(),
        }
    }
}

/// Errors raised while loading or checking a schema document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Schema document is not valid JSON or does not match the schema model
    #[error("Schema '{schema}' could not be parsed: {details}")]
    Malformed { schema: String, details: String },

    /// Two fields in one object share a name
    #[error("Schema '{schema}' declares field '{field}' more than once")]
    DuplicateField { schema: String, field: String },

    /// Enum constraint with no values
    #[error("Field '{field}' in schema '{schema}' has an empty enum")]
    EmptyEnum { schema: String, field: String },

    /// Array field declared without an item schema
    #[error("Array field '{field}' in schema '{schema}' has no item definition")]
    MissingItems { schema: String, field: String },

    /// Object field declared without any member fields
    #[error("Object field '{field}' in schema '{schema}' declares no fields")]
    MissingFields { schema: String, field: String },

    /// A constraint that makes no sense for the field's type
    #[error("Field '{field}' in schema '{schema}': {details}")]
    InapplicableConstraint {
        schema: String,
        field: String,
        details: String,
    },

    /// Lower bound greater than upper bound
    #[error("Field '{field}' in schema '{schema}' has inverted bounds ({details})")]
    InvertedBounds {
        schema: String,
        field: String,
        details: String,
    },

    /// Default value that would not pass the field's own constraints
    #[error("Field '{field}' in schema '{schema}' has an invalid default: {details}")]
    InvalidDefault {
        schema: String,
        field: String,
        details: String,
    },

    /// Two schemas registered under one name
    #[error("Schema '{schema}' is already registered")]
    DuplicateSchema { schema: String },
}

/// A single validation failure tied to one input path.
///
/// `value` is always the raw input at that path, never a coerced one, so the
/// error payload shows the caller exactly what they sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Dotted/bracket path into the input; empty for the root object
    pub path: String,
    /// Human-readable description of the failed constraint
    pub message: String,
    /// Original value at `path` (`null` when the field was absent)
    pub value: Value,
}

impl FieldError {
    /// Create a field error
    pub fn new(path: impl Into<String>, message: impl Into<String>, value: Value) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            value,
        }
    }

    /// Create a missing required field error
    pub fn required(path: impl Into<String>) -> Self {
        Self::new(path, "field is required", Value::Null)
    }

    /// Create an invalid type error
    pub fn invalid_type(path: impl Into<String>, value: &Value) -> Self {
        Self::new(path, "invalid type", value.clone())
    }
}

// Result type aliases for convenience
pub type GateResult<T> = Result<T, GateError>;
pub type SchemaResult<T> = Result<T, SchemaError>;
