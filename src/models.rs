//! Strongly-typed request records.
//!
//! A `Valid` outcome is still a JSON tree. Handlers should not read it directly;
//! each record here is deserialized from the normalized value of exactly one
//! schema, so weak typing stops at the request gate.

use crate::error::{GateError, GateResult};
use crate::query::{SortDirection, SortField};
use crate::schema::names;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeSet;

/// A record built from the normalized output of one named schema.
pub trait ValidatedRecord: DeserializeOwned {
    /// Schema whose `Valid` output this record is built from.
    const SCHEMA: &'static str;

    /// Build the record from a normalized value.
    ///
    /// Failure means the value did not come from [`Self::SCHEMA`], which is a
    /// programming error rather than bad user input.
    fn from_validated(value: Value) -> GateResult<Self> {
        serde_json::from_value(value).map_err(|e| {
            GateError::contract_violation(format!("value is not a valid {}: {e}", Self::SCHEMA))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTodo {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
}

impl ValidatedRecord for CreateTodo {
    const SCHEMA: &'static str = names::TODO_CREATE;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

impl ValidatedRecord for UpdateTodo {
    const SCHEMA: &'static str = names::TODO_UPDATE;
}

/// Path parameters naming one todo.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TodoId {
    pub id: String,
}

impl ValidatedRecord for TodoId {
    const SCHEMA: &'static str = names::TODO_ID;
}

/// Mutable subset of a todo that bulk updates may touch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TodoPatch {
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BulkUpdate {
    /// Distinct target ids; duplicates in the request collapse here
    #[serde(rename = "todoIds")]
    pub ids: BTreeSet<String>,
    #[serde(rename = "updateData")]
    pub patch: TodoPatch,
}

impl ValidatedRecord for BulkUpdate {
    const SCHEMA: &'static str = names::TODO_BULK_UPDATE;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub sort_by: SortField,
    pub sort_order: SortDirection,
    pub search: Option<String>,
    pub due_after: Option<DateTime<Utc>>,
    pub due_before: Option<DateTime<Utc>>,
}

impl ValidatedRecord for ListQuery {
    const SCHEMA: &'static str = names::TODO_LIST_QUERY;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl ValidatedRecord for RegisterUser {
    const SCHEMA: &'static str = names::AUTH_REGISTER;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Login {
    pub email: String,
    pub password: String,
}

impl ValidatedRecord for Login {
    const SCHEMA: &'static str = names::AUTH_LOGIN;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForgotPassword {
    pub email: String,
}

impl ValidatedRecord for ForgotPassword {
    const SCHEMA: &'static str = names::AUTH_FORGOT_PASSWORD;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResetPassword {
    pub token: String,
    pub password: String,
}

impl ValidatedRecord for ResetPassword {
    const SCHEMA: &'static str = names::AUTH_RESET_PASSWORD;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
}

impl ValidatedRecord for ChangePassword {
    const SCHEMA: &'static str = names::AUTH_CHANGE_PASSWORD;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RefreshToken {
    pub refresh_token: String,
}

impl ValidatedRecord for RefreshToken {
    const SCHEMA: &'static str = names::AUTH_REFRESH_TOKEN;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ValidatedRecord for UpdateProfile {
    const SCHEMA: &'static str = names::AUTH_UPDATE_PROFILE;
}
