//! Core request gate.
//!
//! The gate applies one named schema to one input source and either lets the
//! request proceed with the normalized value or rejects it with an error payload.
//! Every fault below it is caught here and turned into an opaque 500.

use super::errors::{GateRejection, create_internal_rejection, create_validation_rejection};
use crate::error::GateResult;
use crate::schema::{InputSource, SchemaRegistry, ValidationOutcome, ValidationReport};
use log::{debug, error, warn};
use serde_json::Value;

/// Result of gating one input source.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// Input is valid; continue with the normalized value
    Proceed(Value),
    /// Stop and send this response
    Reject(GateRejection),
}

/// Request-boundary wrapper around the validation engine.
///
/// Borrows a registry, so one gate can be shared by every concurrent request.
#[derive(Debug, Clone, Copy)]
pub struct RequestGate<'r> {
    registry: &'r SchemaRegistry,
}

impl RequestGate<'static> {
    /// Gate backed by the process-wide registry.
    pub fn global() -> Self {
        Self::new(SchemaRegistry::global())
    }
}

impl<'r> RequestGate<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Gate `input` from `source` against the named schema.
    pub fn apply(&self, schema: &str, source: InputSource, input: &Value) -> GateOutcome {
        self.apply_traced(schema, source, input, "-")
    }

    /// Same as [`apply`](Self::apply), tagging log lines with `request_id`.
    pub fn apply_traced(
        &self,
        schema: &str,
        source: InputSource,
        input: &Value,
        request_id: &str,
    ) -> GateOutcome {
        match self.try_apply(schema, source, input) {
            Ok(report) => self.finish(schema, source, report, request_id),
            Err(e) => {
                error!(
                    "Validation of {} against '{}' failed internally: {} (request: '{}')",
                    source, schema, e, request_id
                );
                GateOutcome::Reject(create_internal_rejection())
            }
        }
    }

    /// Gate the value in `data`, replacing it with the normalized value on success.
    pub fn apply_in_place(
        &self,
        schema: &str,
        source: InputSource,
        data: &mut Value,
        request_id: &str,
    ) -> Option<GateRejection> {
        match self.apply_traced(schema, source, data, request_id) {
            GateOutcome::Proceed(normalized) => {
                *data = normalized;
                None
            }
            GateOutcome::Reject(rejection) => Some(rejection),
        }
    }

    fn try_apply(
        &self,
        schema: &str,
        source: InputSource,
        input: &Value,
    ) -> GateResult<ValidationReport> {
        self.registry
            .get_schema(schema)?
            .validate_detailed(input, source)
    }

    fn finish(
        &self,
        schema: &str,
        source: InputSource,
        report: ValidationReport,
        request_id: &str,
    ) -> GateOutcome {
        if self.registry.config().report_stripped_fields && !report.stripped.is_empty() {
            warn!(
                "Dropped unknown {} fields for '{}': {} (request: '{}')",
                source,
                schema,
                report.stripped.join(", "),
                request_id
            );
        }

        match report.outcome {
            ValidationOutcome::Valid(value) => {
                debug!(
                    "{} accepted by '{}' (request: '{}')",
                    source, schema, request_id
                );
                GateOutcome::Proceed(value)
            }
            ValidationOutcome::Invalid(errors) => {
                warn!(
                    "{} rejected by '{}' with {} field error(s) (request: '{}')",
                    source,
                    schema,
                    errors.len(),
                    request_id
                );
                GateOutcome::Reject(create_validation_rejection(errors))
            }
        }
    }
}
