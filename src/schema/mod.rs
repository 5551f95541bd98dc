//! Schema definitions and the validation engine.
//!
//! This module provides the schema registry and the engine that applies a schema
//! to raw request input, producing normalized values or structured field errors.
//!
//! # Key Types
//!
//! - [`Schema`] - Declarative description of an accepted input shape
//! - [`SchemaRegistry`] - Process-wide, read-only map of named schemas
//! - [`ValidationOutcome`] - `Valid(normalized)` or `Invalid(errors)`
//!
//! # Examples
//!
//! ```rust
//! use todo_gate::schema::{InputSource, SchemaRegistry, names};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new()?;
//! let outcome = registry.validate(names::TODO_LIST_QUERY, &json!({"page": "2"}), InputSource::Query)?;
//! assert_eq!(outcome.value().unwrap()["page"], json!(2));
//! # Ok(())
//! # }
//! ```

pub mod embedded;
pub mod registry;
pub mod types;
pub mod validation;


pub use embedded::names;
pub use registry::SchemaRegistry;
pub use types::{Constraints, FieldDefinition, FieldType, Pattern, Schema, StringFormat};
pub use validation::{InputSource, ValidationOutcome, ValidationReport};
