//! Concurrent validation against one shared registry.

use crate::common::builders::{BulkUpdateBuilder, TodoBuilder};
use crate::common::init_logging;
use serde_json::json;
use std::sync::Arc;
use todo_gate::gate::{GateOutcome, PipelineOutcome, RequestData, RequestGate};
use todo_gate::routes::{Method, RouteTable};
use todo_gate::schema::{InputSource, names};
use todo_gate::SchemaRegistry;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_shared_types_are_thread_safe() {
    assert_send_sync::<SchemaRegistry>();
    assert_send_sync::<todo_gate::Schema>();
    assert_send_sync::<RequestGate<'static>>();
    assert_send_sync::<RouteTable>();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_requests_do_not_interfere() {
    init_logging();
    let registry = Arc::new(SchemaRegistry::new().expect("Failed to create registry"));
    let routes = Arc::new(RouteTable::todo_api());

    let mut handles = Vec::new();
    for i in 0..64usize {
        let registry = Arc::clone(&registry);
        let routes = Arc::clone(&routes);
        handles.push(tokio::spawn(async move {
            let gate = RequestGate::new(&registry);
            let route = routes.resolve(Method::Post, "/api/todo").unwrap();
            let body = if i % 2 == 0 {
                TodoBuilder::new().with_title(format!("Task {i}")).build()
            } else {
                TodoBuilder::new().with_priority(format!("level-{i}")).build()
            };
            let mut data = RequestData::new().with_body(body);
            let outcome = route.run(&gate, &mut data);
            (i, outcome, data.body)
        }));
    }

    for handle in handles {
        let (i, outcome, body) = handle.await.expect("task panicked");
        if i % 2 == 0 {
            assert_eq!(outcome, PipelineOutcome::Continue);
            assert_eq!(body["title"], json!(format!("Task {i}")));
        } else {
            let PipelineOutcome::Respond(rejection) = outcome else {
                panic!("request {i} should have been rejected");
            };
            assert_eq!(rejection.field_errors().len(), 1);
            assert_eq!(rejection.field_errors()[0].value, json!(format!("level-{i}")));
        }
    }
}

#[tokio::test]
async fn test_global_gate_across_tasks() {
    let tasks: Vec<_> = (1..=16usize)
        .map(|n| {
            tokio::spawn(async move {
                let body = BulkUpdateBuilder::new().with_generated_ids(n).build();
                RequestGate::global().apply(names::TODO_BULK_UPDATE, InputSource::Body, &body)
            })
        })
        .collect();

    for (n, task) in (1..=16usize).zip(tasks) {
        match task.await.expect("task panicked") {
            GateOutcome::Proceed(value) => {
                assert_eq!(value["todoIds"].as_array().map(Vec::len), Some(n));
            }
            GateOutcome::Reject(rejection) => panic!("unexpected rejection: {}", rejection.body()),
        }
    }
}
