//! Todo CRUD routes end to end.

use crate::common::builders::TodoBuilder;
use crate::common::{TODO_ID, rejected_fields, rejection, send};
use crate::{assert_continues, assert_invalid_fields, assert_valid};
use serde_json::json;
use todo_gate::gate::RequestData;
use todo_gate::models::{CreateTodo, Priority, TodoId, UpdateTodo};
use todo_gate::routes::Method;
use todo_gate::schema::{InputSource, names};
use todo_gate::{SchemaRegistry, ValidatedRecord};

#[test]
fn test_create_fills_defaults_and_strips_unknown_fields() {
    let body = TodoBuilder::new().with("owner", "mallory").with("_id", TODO_ID).build();
    let (data, outcome) = send(Method::Post, "/api/todo", RequestData::new().with_body(body));

    assert_continues!(outcome);
    assert_eq!(
        data.body,
        json!({
            "title": "Buy milk",
            "description": "Semi-skimmed, 2 litres",
            "priority": "medium",
            "completed": false
        })
    );

    let todo = CreateTodo::from_validated(data.body).expect("normalized body is a CreateTodo");
    assert_eq!(todo.priority, Priority::Medium);
    assert_eq!(todo.due_date, None);
}

#[test]
fn test_create_enum_violation_reports_only_priority() {
    let body = json!({"title": "Buy milk", "description": "2%", "priority": "extreme"});
    let (data, outcome) = send(Method::Post, "/api/todo", RequestData::new().with_body(body.clone()));

    let rejection = rejection(outcome);
    assert_eq!(rejection.status, 400);
    assert_eq!(
        rejection.body(),
        json!({
            "status": "error",
            "message": "Validation failed",
            "errors": [{
                "field": "priority",
                "message": "must be one of: low, medium, high",
                "value": "extreme"
            }]
        })
    );
    assert_eq!(data.body, body);
}

#[test]
fn test_create_collects_every_field_error() {
    let body = TodoBuilder::new()
        .with_title("")
        .without("description")
        .with_due_date("next tuesday")
        .with_completed("yes")
        .build();
    let (_, outcome) = send(Method::Post, "/api/todo", RequestData::new().with_body(body));

    let rejection = rejection(outcome);
    assert_eq!(
        rejected_fields(&rejection),
        vec!["title", "description", "dueDate", "completed"]
    );
    let messages: Vec<&str> = rejection
        .field_errors()
        .iter()
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "must be at least 1 characters long",
            "field is required",
            "must be a valid date-time",
            "invalid type"
        ]
    );
}

#[test]
fn test_create_title_rules() {
    let registry = SchemaRegistry::new().expect("Failed to create registry");
    let validate = |title: serde_json::Value| {
        registry
            .validate(
                names::TODO_CREATE,
                &TodoBuilder::new().with_title(title).build(),
                InputSource::Body,
            )
            .unwrap()
    };

    let value = assert_valid!(validate(json!("  Padded title  ")));
    assert_eq!(value["title"], json!("Padded title"));

    assert_valid!(validate(json!("a".repeat(100))));
    assert_invalid_fields!(validate(json!("a".repeat(101))), ["title"]);
    assert_invalid_fields!(validate(json!("<script>")), ["title"]);
    assert_invalid_fields!(validate(json!("   ")), ["title"]);
    assert_invalid_fields!(validate(json!(42)), ["title"]);
}

#[test]
fn test_create_null_counts_as_absent() {
    let body = TodoBuilder::new().with_priority(serde_json::Value::Null).build();
    let (data, outcome) = send(Method::Post, "/api/todo", RequestData::new().with_body(body));
    assert_continues!(outcome);
    assert_eq!(data.body["priority"], json!("medium"));
}

#[test]
fn test_get_by_id() {
    let path = format!("/api/todo/{TODO_ID}");
    let (data, outcome) = send(Method::Get, &path, RequestData::new());
    assert_continues!(outcome);

    let id = TodoId::from_validated(data.params).unwrap();
    assert_eq!(id.id, TODO_ID);
}

#[test]
fn test_get_by_malformed_id() {
    for id in ["123", "zzzzzzzzzzzzzzzzzzzzzzzz", "60f7b3b3b3b3b3b3b3b3b3b3b3"] {
        let (_, outcome) = send(Method::Get, &format!("/api/todo/{id}"), RequestData::new());
        let rejection = rejection(outcome);
        assert_eq!(rejected_fields(&rejection), vec!["id"]);
        assert_eq!(rejection.field_errors()[0].value, json!(id));
    }
}

#[test]
fn test_stats_route_has_no_stages() {
    let data = RequestData::new().with_query(json!({"anything": "goes"}));
    let (data, outcome) = send(Method::Get, "/api/todo/stats", data);
    assert_continues!(outcome);
    assert_eq!(data.query, json!({"anything": "goes"}));
}

#[test]
fn test_update_validates_body_and_path() {
    let path = format!("/api/todo/{TODO_ID}");
    let data = RequestData::new().with_body(json!({"priority": "low", "color": "red"}));
    let (data, outcome) = send(Method::Put, &path, data);
    assert_continues!(outcome);

    let update = UpdateTodo::from_validated(data.body).unwrap();
    assert_eq!(update.priority, Some(Priority::Low));
    assert_eq!(update.title, None);
    assert_eq!(update.completed, None);
}

#[test]
fn test_update_requires_one_known_field() {
    let path = format!("/api/todo/{TODO_ID}");
    for body in [json!({}), json!({"color": "red"}), json!({"title": null})] {
        let (_, outcome) = send(Method::Put, &path, RequestData::new().with_body(body.clone()));
        let rejection = rejection(outcome);
        assert_eq!(rejected_fields(&rejection), vec![""]);
        assert_eq!(
            rejection.field_errors()[0].message,
            "at least 1 field(s) required"
        );
        assert_eq!(rejection.field_errors()[0].value, body);
    }
}

#[test]
fn test_update_does_not_inject_defaults() {
    let path = format!("/api/todo/{TODO_ID}");
    let data = RequestData::new().with_body(json!({"title": "Renamed"}));
    let (data, outcome) = send(Method::Put, &path, data);
    assert_continues!(outcome);
    assert_eq!(data.body, json!({"title": "Renamed"}));
}

#[test]
fn test_update_rejects_body_before_checking_path() {
    let data = RequestData::new().with_body(json!({"priority": "urgent"}));
    let (data, outcome) = send(Method::Put, "/api/todo/not-an-id", data);
    let rejection = rejection(outcome);
    assert_eq!(rejected_fields(&rejection), vec!["priority"]);
    assert_eq!(data.params, json!({"id": "not-an-id"}));
}

#[test]
fn test_delete_validates_id() {
    let (_, outcome) = send(Method::Delete, &format!("/api/todo/{TODO_ID}"), RequestData::new());
    assert_continues!(outcome);

    let (_, outcome) = send(Method::Delete, "/api/todo/1", RequestData::new());
    assert_eq!(rejection(outcome).status, 400);
}
