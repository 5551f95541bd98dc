//! Core schema type definitions for request validation.
//!
//! A [`Schema`] is pure data: an ordered list of [`FieldDefinition`]s plus the
//! whole-object flags. Schemas are deserialized from JSON documents once, checked
//! for internal consistency, and never mutated afterwards.

use crate::error::{SchemaError, SchemaResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// A named request schema.
///
/// Describes the accepted shape of one input source (body, query or path
/// parameters) for one operation, e.g. `todo.create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Registry name, `<resource>.<operation>`
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Declared fields, in the order errors are reported
    pub fields: Vec<FieldDefinition>,
    /// Keep undeclared fields in the normalized output instead of dropping them
    #[serde(default)]
    pub additional_fields_allowed: bool,
    /// Minimum number of declared fields that must be present
    #[serde(default)]
    pub minimum_fields_required: Option<usize>,
}

/// Definition of a single field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Field name (empty for array item definitions)
    #[serde(default)]
    pub name: String,
    /// Semantic type of the field
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field must be present
    #[serde(default)]
    pub required: bool,
    /// Value injected when the field is absent
    #[serde(default)]
    pub default: Option<Value>,
    /// Closed set of constraints
    #[serde(flatten)]
    pub constraints: Constraints,
    /// Item definition for array fields
    #[serde(default)]
    pub items: Option<Box<FieldDefinition>>,
    /// Member fields for object fields
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// Object fields only: keep undeclared members
    #[serde(default)]
    pub additional_fields_allowed: bool,
    /// Object fields only: minimum number of declared members present
    #[serde(default)]
    pub minimum_fields_required: Option<usize>,
}

/// Semantic field types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    /// UTF-8 string
    #[default]
    String,
    /// Whole number
    Integer,
    /// Any finite number
    Number,
    /// `true` / `false`
    Boolean,
    /// RFC 3339 timestamp carried as a string
    DateTime,
    /// Homogeneous list described by `items`
    Array,
    /// Nested object described by `fields`
    Object,
}

impl FieldType {
    /// Name used in schema documents and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::DateTime => "date-time",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    fn is_string_like(&self) -> bool {
        matches!(self, Self::String | Self::DateTime)
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Number)
    }

    /// Whether `value` already has this type without any conversion.
    pub(crate) fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String | Self::DateTime => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraints a field may declare.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    /// Trim surrounding whitespace before checking and in the normalized output
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub trim: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
    /// Allowed values, compared after coercion
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<StringFormat>,
}

/// Named string formats checked together with the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringFormat {
    /// Mailbox address `local@domain.tld`
    Email,
    /// At least one lowercase, uppercase, digit and one of `@$!%*?&`
    Password,
}

impl StringFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// A regular expression compiled when the schema document is loaded.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl TryFrom<String> for Pattern {
    type Error = regex::Error;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        Self::new(&source)
    }
}

impl Serialize for Pattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::try_from(source).map_err(serde::de::Error::custom)
    }
}

impl Schema {
    /// Parse a schema document and check its invariants.
    pub fn from_json(document: &str) -> SchemaResult<Self> {
        let schema: Schema =
            serde_json::from_str(document).map_err(|e| SchemaError::Malformed {
                schema: peek_name(document),
                details: e.to_string(),
            })?;
        schema.check()?;
        Ok(schema)
    }

    /// Look up a declared top-level field.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the declared top-level fields, in definition order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Check that every field has a consistent, closed set of constraints.
    pub fn check(&self) -> SchemaResult<()> {
        check_members(&self.name, "", &self.fields)
    }
}

fn peek_name(document: &str) -> String {
    serde_json::from_str::<Value>(document)
        .ok()
        .and_then(|v| v.get("name").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| "<unnamed>".to_string())
}

fn check_members(schema: &str, prefix: &str, fields: &[FieldDefinition]) -> SchemaResult<()> {
    let mut seen = HashSet::new();
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{prefix}.{}", field.name)
        };
        if field.name.is_empty() {
            return Err(SchemaError::Malformed {
                schema: schema.to_string(),
                details: format!("unnamed field under '{prefix}'"),
            });
        }
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                schema: schema.to_string(),
                field: path,
            });
        }
        field.check(schema, &path)?;
    }
    Ok(())
}

impl FieldDefinition {
    fn check(&self, schema: &str, path: &str) -> SchemaResult<()> {
        let c = &self.constraints;
        let inapplicable = |details: &str| SchemaError::InapplicableConstraint {
            schema: schema.to_string(),
            field: path.to_string(),
            details: details.to_string(),
        };
        let inverted = |details: String| SchemaError::InvertedBounds {
            schema: schema.to_string(),
            field: path.to_string(),
            details,
        };

        if let Some(values) = &c.enum_values {
            if values.is_empty() {
                return Err(SchemaError::EmptyEnum {
                    schema: schema.to_string(),
                    field: path.to_string(),
                });
            }
            if let Some(bad) = values.iter().find(|v| !self.field_type.accepts(v)) {
                return Err(inapplicable(&format!(
                    "enum value {bad} is not a {}",
                    self.field_type
                )));
            }
        }

        let has_string_constraints = c.trim
            || c.min_length.is_some()
            || c.max_length.is_some()
            || c.pattern.is_some()
            || c.format.is_some();
        if has_string_constraints && !self.field_type.is_string_like() {
            return Err(inapplicable(&format!(
                "string constraints on a {} field",
                self.field_type
            )));
        }
        if (c.minimum.is_some() || c.maximum.is_some()) && !self.field_type.is_numeric() {
            return Err(inapplicable(&format!(
                "numeric bounds on a {} field",
                self.field_type
            )));
        }
        if (c.min_items.is_some() || c.max_items.is_some()) && self.field_type != FieldType::Array
        {
            return Err(inapplicable("item bounds on a non-array field"));
        }

        if let (Some(min), Some(max)) = (c.min_length, c.max_length) {
            if min > max {
                return Err(inverted(format!("minLength {min} > maxLength {max}")));
            }
        }
        if let (Some(min), Some(max)) = (c.minimum, c.maximum) {
            if min > max {
                return Err(inverted(format!("minimum {min} > maximum {max}")));
            }
        }
        if let (Some(min), Some(max)) = (c.min_items, c.max_items) {
            if min > max {
                return Err(inverted(format!("minItems {min} > maxItems {max}")));
            }
        }

        match self.field_type {
            FieldType::Array => {
                let items = self.items.as_deref().ok_or_else(|| SchemaError::MissingItems {
                    schema: schema.to_string(),
                    field: path.to_string(),
                })?;
                items.check(schema, &format!("{path}[]"))?;
            }
            FieldType::Object => {
                if self.fields.is_empty() && !self.additional_fields_allowed {
                    return Err(SchemaError::MissingFields {
                        schema: schema.to_string(),
                        field: path.to_string(),
                    });
                }
                check_members(schema, path, &self.fields)?;
            }
            _ => {
                if self.items.is_some() || !self.fields.is_empty() {
                    return Err(inapplicable("items/fields on a scalar field"));
                }
            }
        }

        if let Some(default) = &self.default {
            if !self.field_type.accepts(default) {
                return Err(SchemaError::InvalidDefault {
                    schema: schema.to_string(),
                    field: path.to_string(),
                    details: format!("{default} is not a {}", self.field_type),
                });
            }
            if let Some(values) = &c.enum_values {
                if !values.contains(default) {
                    return Err(SchemaError::InvalidDefault {
                        schema: schema.to_string(),
                        field: path.to_string(),
                        details: format!("{default} is not one of the enum values"),
                    });
                }
            }
        }

        Ok(())
    }
}
