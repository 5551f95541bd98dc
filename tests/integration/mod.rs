//! Integration tests for the request gate.
//!
//! ## Test Organization
//!
//! - `todo_routes` - Create, read, update and delete through the route table
//! - `list_query` - Query coercion, defaults and descriptor normalization
//! - `bulk_update` - Array and nested-object validation
//! - `auth_routes` - Account endpoints and string formats
//! - `concurrency` - Many tasks sharing one registry
//! - `property_tests` - Idempotence, stripping and defaulting over generated input
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test integration::
//! cargo test integration::property_tests
//! ```

pub mod bulk_update;
pub mod concurrency;
pub mod todo_routes;
