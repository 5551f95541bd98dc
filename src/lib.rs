//! Schema-driven request validation for a todo CRUD API.
//!
//! Validates the body, query string and path parameters of each request against
//! declarative schemas before any handler runs, and turns validated list queries
//! into a canonical filter/sort/pagination descriptor for storage.
//!
//! # Core Components
//!
//! - [`SchemaRegistry`] - Named, immutable schemas shared by every request
//! - [`RequestGate`] - Applies one schema to one input source at the boundary
//! - [`RouteTable`] - Binds method and path to the stages a request must pass
//! - [`ListQueryDescriptor`] - Normalized list query handed to storage
//!
//! # Quick Start
//!
//! ```rust
//! use todo_gate::{RequestGate, RouteTable, SchemaRegistry};
//! use todo_gate::gate::{PipelineOutcome, RequestData};
//! use todo_gate::routes::Method;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new()?;
//! let gate = RequestGate::new(&registry);
//! let routes = RouteTable::todo_api();
//!
//! let route = routes.resolve(Method::Post, "/api/todo").expect("route exists");
//! let mut request = RequestData::new().with_body(json!({
//!     "title": "Buy milk",
//!     "description": "2%",
//!     "priority": "extreme"
//! }));
//!
//! match route.run(&gate, &mut request) {
//!     PipelineOutcome::Respond(rejection) => {
//!         assert_eq!(rejection.status, 400);
//!         assert_eq!(rejection.field_errors()[0].field, "priority");
//!     }
//!     PipelineOutcome::Continue => unreachable!(),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod query;
pub mod routes;
pub mod schema;

// Re-export commonly used types for convenience
pub use config::GateConfig;
pub use error::{FieldError, GateError, GateResult, SchemaError, SchemaResult};
pub use gate::{GateOutcome, GatePipeline, GateRejection, PipelineOutcome, RequestData, RequestGate};
pub use models::ValidatedRecord;
pub use query::{ListQueryDescriptor, normalize};
pub use routes::{Method, RouteTable};
pub use schema::{InputSource, Schema, SchemaRegistry, ValidationOutcome};
