//! Bulk update: array items and the nested patch object.

use crate::common::builders::BulkUpdateBuilder;
use crate::common::{TODO_ID, registry, rejected_fields, rejection, send};
use crate::{assert_continues, assert_invalid_fields, assert_valid};
use serde_json::json;
use todo_gate::ValidatedRecord;
use todo_gate::gate::RequestData;
use todo_gate::models::{BulkUpdate, Priority};
use todo_gate::routes::Method;
use todo_gate::schema::{InputSource, names};

fn bulk(body: serde_json::Value) -> todo_gate::ValidationOutcome {
    registry()
        .validate(names::TODO_BULK_UPDATE, &body, InputSource::Body)
        .unwrap()
}

#[test]
fn test_single_id_passes() {
    let value = assert_valid!(bulk(BulkUpdateBuilder::new().build()));
    assert_eq!(
        value,
        json!({"todoIds": [TODO_ID], "updateData": {"completed": true}})
    );
}

#[test]
fn test_empty_id_list_fails() {
    let outcome = bulk(BulkUpdateBuilder::new().with_ids(Vec::<String>::new()).build());
    assert_invalid_fields!(outcome, ["todoIds"]);
    assert_eq!(outcome.errors()[0].message, "must contain at least 1 item(s)");
}

#[test]
fn test_bad_element_is_reported_by_index() {
    let outcome = bulk(BulkUpdateBuilder::new().with_ids(["bad-id"]).build());
    assert_invalid_fields!(outcome, ["todoIds[0]"]);
    assert_eq!(outcome.errors()[0].value, json!("bad-id"));

    let outcome = bulk(
        BulkUpdateBuilder::new()
            .with_ids([json!(TODO_ID), json!(7), json!("short"), json!(null)])
            .build(),
    );
    assert_invalid_fields!(outcome, ["todoIds[1]", "todoIds[2]", "todoIds[3]"]);
}

#[test]
fn test_id_count_limit() {
    assert_valid!(bulk(BulkUpdateBuilder::new().with_generated_ids(100).build()));

    let outcome = bulk(BulkUpdateBuilder::new().with_generated_ids(101).build());
    assert_invalid_fields!(outcome, ["todoIds"]);
    assert_eq!(outcome.errors()[0].message, "must contain at most 100 item(s)");
}

#[test]
fn test_patch_is_validated_as_nested_object() {
    let outcome = bulk(BulkUpdateBuilder::new().with_patch(json!({})).build());
    assert_invalid_fields!(outcome, ["updateData"]);
    assert_eq!(outcome.errors()[0].message, "at least 1 field(s) required");

    let outcome = bulk(
        BulkUpdateBuilder::new()
            .with_patch(json!({"priority": "urgent", "completed": "true"}))
            .build(),
    );
    assert_invalid_fields!(outcome, ["updateData.completed", "updateData.priority"]);

    let outcome = bulk(json!({"todoIds": [TODO_ID], "updateData": "complete all"}));
    assert_invalid_fields!(outcome, ["updateData"]);
}

#[test]
fn test_patch_only_allows_status_fields() {
    let value = assert_valid!(bulk(
        BulkUpdateBuilder::new()
            .with_patch(json!({"priority": "high", "title": "Renamed"}))
            .build()
    ));
    assert_eq!(value["updateData"], json!({"priority": "high"}));

    let outcome = bulk(
        BulkUpdateBuilder::new()
            .with_patch(json!({"title": "Renamed"}))
            .build(),
    );
    assert_invalid_fields!(outcome, ["updateData"]);
}

#[test]
fn test_missing_parts_are_required() {
    assert_invalid_fields!(bulk(json!({})), ["todoIds", "updateData"]);
}

#[test]
fn test_route_produces_typed_record() {
    let body = BulkUpdateBuilder::new()
        .with_ids([TODO_ID, "60F7B3B3B3B3B3B3B3B3B3B4", TODO_ID])
        .with_patch(json!({"priority": "low"}))
        .build();
    let (data, outcome) = send(
        Method::Patch,
        "/api/todo/bulk/update",
        RequestData::new().with_body(body),
    );
    assert_continues!(outcome);

    let update = BulkUpdate::from_validated(data.body).unwrap();
    assert_eq!(update.ids.len(), 2);
    assert_eq!(update.patch.priority, Some(Priority::Low));
}

#[test]
fn test_route_rejects_with_element_path() {
    let body = BulkUpdateBuilder::new().with_ids([TODO_ID, "nope"]).build();
    let (_, outcome) = send(
        Method::Patch,
        "/api/todo/bulk/update",
        RequestData::new().with_body(body),
    );
    assert_eq!(rejected_fields(&rejection(outcome)), vec!["todoIds[1]"]);
}
