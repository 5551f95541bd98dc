//! List-query normalization.
//!
//! Turns a validated `todo.list-query` object into the canonical
//! {filter, sort, pagination} descriptor handed to storage. The input has already
//! passed the schema, so a shape mismatch here is a caller bug and is reported as
//! [`GateError::ContractViolation`], never as a field error.

use crate::error::{GateError, GateResult};
use crate::models::{ListQuery, ValidatedRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Fields a list may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    DueDate,
    Priority,
    Title,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::DueDate => "dueDate",
            Self::Priority => "priority",
            Self::Title => "title",
        }
    }
}

/// Sort direction, `asc`/`desc` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// One condition on one stored field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterCondition {
    /// Field equals the value
    Equals(Value),
    /// Field lies within the inclusive bounds; at least one bound is set
    Range {
        #[serde(skip_serializing_if = "Option::is_none")]
        gte: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        lte: Option<Value>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Page selection. Both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Pagination block returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

impl PageSummary {
    pub fn new(pagination: Pagination, total: u64) -> Self {
        Self {
            page: pagination.page,
            limit: pagination.limit,
            total,
            pages: total.div_ceil(u64::from(pagination.limit)),
        }
    }
}

/// Canonical list request consumed by storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQueryDescriptor {
    /// Equality/range conditions keyed by stored field name; absent filters are omitted
    pub filter: BTreeMap<String, FilterCondition>,
    /// Free-text search, routed to the text index rather than `filter`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_search: Option<String>,
    pub sort: SortSpec,
    pub pagination: Pagination,
}

impl ListQueryDescriptor {
    /// Normalize a validated list-query object.
    pub fn from_validated(value: &Value) -> GateResult<Self> {
        let query = ListQuery::from_validated(value.clone())?;
        Self::try_from(query)
    }
}

impl TryFrom<ListQuery> for ListQueryDescriptor {
    type Error = GateError;

    fn try_from(query: ListQuery) -> GateResult<Self> {
        if query.page == 0 || query.limit == 0 {
            return Err(GateError::contract_violation(format!(
                "page {} / limit {} must both be at least 1",
                query.page, query.limit
            )));
        }

        let mut filter = BTreeMap::new();
        if let Some(completed) = query.completed {
            filter.insert(
                "completed".to_string(),
                FilterCondition::Equals(Value::Bool(completed)),
            );
        }
        if let Some(priority) = query.priority {
            filter.insert(
                "priority".to_string(),
                FilterCondition::Equals(Value::String(priority.as_str().to_string())),
            );
        }
        if query.due_after.is_some() || query.due_before.is_some() {
            filter.insert(
                "dueDate".to_string(),
                FilterCondition::Range {
                    gte: query.due_after.map(timestamp),
                    lte: query.due_before.map(timestamp),
                },
            );
        }

        Ok(Self {
            filter,
            text_search: query.search,
            sort: SortSpec {
                field: query.sort_by,
                direction: query.sort_order,
            },
            pagination: Pagination {
                page: query.page,
                limit: query.limit,
            },
        })
    }
}

/// Normalize a validated list-query object.
pub fn normalize(value: &Value) -> GateResult<ListQueryDescriptor> {
    ListQueryDescriptor::from_validated(value)
}

fn timestamp(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339())
}
