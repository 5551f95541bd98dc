//! Test data builders for request payloads.
//!
//! Each builder starts from a payload that passes its schema and offers fluent
//! setters so a test changes exactly the field under test.

use super::TODO_ID;
use serde_json::{Map, Value, json};

/// Builder for `todo.create` bodies.
#[derive(Debug, Clone)]
pub struct TodoBuilder {
    data: Map<String, Value>,
}

impl TodoBuilder {
    /// Minimal valid body: title and description only.
    pub fn new() -> Self {
        let mut data = Map::new();
        data.insert("title".to_string(), json!("Buy milk"));
        data.insert("description".to_string(), json!("Semi-skimmed, 2 litres"));
        Self { data }
    }

    /// Body with every declared field set.
    pub fn new_full() -> Self {
        Self::new()
            .with_priority("high")
            .with_due_date("2025-06-01T09:30:00Z")
            .with_completed(false)
    }

    pub fn with_title(self, title: impl Into<Value>) -> Self {
        self.with("title", title)
    }

    pub fn with_description(self, description: impl Into<Value>) -> Self {
        self.with("description", description)
    }

    pub fn with_priority(self, priority: impl Into<Value>) -> Self {
        self.with("priority", priority)
    }

    pub fn with_due_date(self, due_date: impl Into<Value>) -> Self {
        self.with("dueDate", due_date)
    }

    pub fn with_completed(self, completed: impl Into<Value>) -> Self {
        self.with("completed", completed)
    }

    /// Set any field, declared or not.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.data.remove(key);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.data)
    }
}

impl Default for TodoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for list query strings, kept as decoded `key=value` pairs.
#[derive(Debug, Clone, Default)]
pub struct ListQueryBuilder {
    pairs: Vec<(String, String)>,
}

impl ListQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, page: &str) -> Self {
        self.param("page", page)
    }

    pub fn limit(self, limit: &str) -> Self {
        self.param("limit", limit)
    }

    pub fn completed(self, completed: &str) -> Self {
        self.param("completed", completed)
    }

    pub fn priority(self, priority: &str) -> Self {
        self.param("priority", priority)
    }

    pub fn sort(self, by: &str, order: &str) -> Self {
        self.param("sortBy", by).param("sortOrder", order)
    }

    pub fn search(self, search: &str) -> Self {
        self.param("search", search)
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

/// Builder for `todo.bulk-update` bodies.
#[derive(Debug, Clone)]
pub struct BulkUpdateBuilder {
    ids: Vec<Value>,
    patch: Map<String, Value>,
}

impl BulkUpdateBuilder {
    /// One valid id, marking it completed.
    pub fn new() -> Self {
        let mut patch = Map::new();
        patch.insert("completed".to_string(), json!(true));
        Self {
            ids: vec![json!(TODO_ID)],
            patch,
        }
    }

    pub fn with_ids<I, V>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// `count` distinct valid ids.
    pub fn with_generated_ids(self, count: usize) -> Self {
        self.with_ids((1..=count).map(|i| format!("{:024x}", i)))
    }

    pub fn with_patch(mut self, patch: Value) -> Self {
        self.patch = patch.as_object().cloned().unwrap_or_default();
        self
    }

    pub fn build(self) -> Value {
        json!({"todoIds": self.ids, "updateData": self.patch})
    }
}

impl Default for BulkUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `auth.register` bodies.
#[derive(Debug, Clone)]
pub struct RegisterBuilder {
    data: Map<String, Value>,
}

impl RegisterBuilder {
    pub fn new() -> Self {
        let mut data = Map::new();
        data.insert("email".to_string(), json!("ada@example.com"));
        data.insert("password".to_string(), json!("Sup3r$ecret"));
        data.insert("firstName".to_string(), json!("Ada"));
        data.insert("lastName".to_string(), json!("Lovelace"));
        Self { data }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.data)
    }
}

impl Default for RegisterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
