//! Framework-agnostic request gate.
//!
//! Sits between an HTTP framework and the handlers. For each declared stage it
//! validates one input source against a named schema, replaces the source with
//! the normalized value, and short-circuits with a JSON error payload when the
//! input is rejected.
//!
//! # Key Types
//!
//! - [`RequestGate`] - Applies one schema to one input source
//! - [`GatePipeline`] - Ordered stages declared per route
//! - [`GateRejection`] - Status code plus [`ErrorPayload`] for the caller
//!
//! # Examples
//!
//! ```rust
//! use todo_gate::gate::{GatePipeline, PipelineOutcome, RequestData, RequestGate};
//! use todo_gate::schema::{SchemaRegistry, names};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new()?;
//! let gate = RequestGate::new(&registry);
//! let pipeline = GatePipeline::new().query(names::TODO_LIST_QUERY);
//!
//! let mut request = RequestData::new().with_query_pairs([("page", "2")]);
//! assert_eq!(pipeline.run(&gate, &mut request), PipelineOutcome::Continue);
//! assert_eq!(request.query["page"], json!(2));
//! assert_eq!(request.query["limit"], json!(10));
//! # Ok(())
//! # }
//! ```

mod core;
mod errors;
mod pipeline;

pub use core::{GateOutcome, RequestGate};
pub use errors::{
    ErrorEntry, ErrorPayload, GateRejection, INTERNAL_VALIDATION_ERROR, STATUS_BAD_REQUEST,
    STATUS_INTERNAL_ERROR, VALIDATION_FAILED, create_internal_rejection,
    create_validation_rejection,
};
pub use pipeline::{GatePipeline, GateStage, PipelineOutcome, RequestData};
