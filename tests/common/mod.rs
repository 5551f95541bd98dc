//! Common test utilities.
//!
//! Logging setup, a shared registry, and assertion macros over
//! [`ValidationOutcome`] and [`GateRejection`] values.

use serde_json::Value;
use std::sync::OnceLock;
use todo_gate::gate::{PipelineOutcome, RequestData, RequestGate};
use todo_gate::routes::{Method, RouteTable};
use todo_gate::{GateRejection, SchemaRegistry, ValidationOutcome};

pub mod builders;

/// A todo id in storage format.
pub const TODO_ID: &str = "60f7b3b3b3b3b3b3b3b3b3b3";

/// Route log output through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Registry shared by every test in this binary.
pub fn registry() -> &'static SchemaRegistry {
    static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| SchemaRegistry::new().expect("Failed to create registry"))
}

/// Resolve `method path` against the default route table and run its stages.
///
/// Returns the request data (normalized when the pipeline passed) and the
/// pipeline outcome. Panics when no route matches.
pub fn send(method: Method, path: &str, data: RequestData) -> (RequestData, PipelineOutcome) {
    init_logging();
    let routes = RouteTable::todo_api();
    let route = routes
        .resolve(method, path)
        .unwrap_or_else(|| panic!("no route for {} {}", method, path));
    let gate = RequestGate::new(registry());
    let mut data = data;
    let outcome = route.run(&gate, &mut data);
    (data, outcome)
}

/// Error paths of an `Invalid` outcome, in reported order.
pub fn error_paths(outcome: &ValidationOutcome) -> Vec<&str> {
    outcome.errors().iter().map(|e| e.path.as_str()).collect()
}

/// Unwrap a pipeline rejection.
pub fn rejection(outcome: PipelineOutcome) -> GateRejection {
    match outcome {
        PipelineOutcome::Respond(rejection) => rejection,
        PipelineOutcome::Continue => panic!("Expected the request to be rejected, but it passed"),
    }
}

/// Fields named in a rejection, in reported order.
pub fn rejected_fields(rejection: &GateRejection) -> Vec<String> {
    rejection
        .field_errors()
        .iter()
        .map(|e| e.field.clone())
        .collect()
}

/// Assert an outcome is `Valid` and yield the normalized value.
#[macro_export]
macro_rules! assert_valid {
    ($outcome:expr) => {
        match $outcome {
            todo_gate::ValidationOutcome::Valid(value) => value,
            todo_gate::ValidationOutcome::Invalid(errors) => {
                panic!("Expected validation to succeed, but got errors: {:?}", errors)
            }
        }
    };
}

/// Assert an outcome is `Invalid` with exactly the given error paths.
#[macro_export]
macro_rules! assert_invalid_fields {
    ($outcome:expr, [$($path:expr),* $(,)?]) => {
        match &$outcome {
            todo_gate::ValidationOutcome::Invalid(errors) => {
                let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
                let expected: Vec<&str> = vec![$($path),*];
                assert_eq!(paths, expected, "unexpected error paths: {:?}", errors);
            }
            todo_gate::ValidationOutcome::Valid(value) => {
                panic!("Expected validation errors, but validation passed with {}", value)
            }
        }
    };
}

/// Assert a pipeline passed.
#[macro_export]
macro_rules! assert_continues {
    ($outcome:expr) => {
        match $outcome {
            todo_gate::PipelineOutcome::Continue => {}
            todo_gate::PipelineOutcome::Respond(rejection) => panic!(
                "Expected the request to pass, got {}: {}",
                rejection.status,
                rejection.body()
            ),
        }
    };
}

/// Look up a value by dotted path, for readable assertions.
pub fn at<'v>(value: &'v Value, path: &str) -> &'v Value {
    path.split('.').fold(value, |v, key| &v[key])
}
