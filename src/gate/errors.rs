//! Error payloads returned by the request gate.
//!
//! Two shapes exist: a 400 listing every field error, and an opaque 500 for
//! faults inside the gate itself.

use crate::error::FieldError;
use serde::Serialize;
use serde_json::Value;

pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const INTERNAL_VALIDATION_ERROR: &str = "Internal validation error";

/// JSON body of a rejected request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    /// Always `"error"`
    pub status: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorEntry>>,
}

/// One field error as reported to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEntry {
    pub field: String,
    pub message: String,
    /// The raw value the caller sent
    pub value: Value,
}

impl From<FieldError> for ErrorEntry {
    fn from(error: FieldError) -> Self {
        Self {
            field: error.path,
            message: error.message,
            value: error.value,
        }
    }
}

/// A short-circuit response: HTTP status plus JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateRejection {
    pub status: u16,
    pub payload: ErrorPayload,
}

impl GateRejection {
    /// The payload as a JSON value.
    pub fn body(&self) -> Value {
        serde_json::to_value(&self.payload).unwrap_or_else(|_| {
            serde_json::json!({"status": "error", "message": INTERNAL_VALIDATION_ERROR})
        })
    }

    /// Field errors carried by a 400 rejection.
    pub fn field_errors(&self) -> &[ErrorEntry] {
        self.payload.errors.as_deref().unwrap_or(&[])
    }
}

/// Create the 400 response for a list of field errors.
pub fn create_validation_rejection(errors: Vec<FieldError>) -> GateRejection {
    GateRejection {
        status: STATUS_BAD_REQUEST,
        payload: ErrorPayload {
            status: "error",
            message: VALIDATION_FAILED,
            errors: Some(errors.into_iter().map(ErrorEntry::from).collect()),
        },
    }
}

/// Create the generic 500 response. Never carries internal detail.
pub fn create_internal_rejection() -> GateRejection {
    GateRejection {
        status: STATUS_INTERNAL_ERROR,
        payload: ErrorPayload {
            status: "error",
            message: INTERNAL_VALIDATION_ERROR,
            errors: None,
        },
    }
}
