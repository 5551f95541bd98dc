//! Validation engine.
//!
//! Applies one [`Schema`] to one raw JSON input and produces either a normalized
//! value (defaults injected, text coerced to semantic types, unknown fields
//! dropped) or the ordered list of [`FieldError`]s found. Field problems are
//! returned as data; only engine faults travel through the `Err` channel.
//!
//! Per field, constraints run in a fixed order and the first failure is the only
//! error reported for that field:
//!
//! 1. type (with coercion for textual sources) and format
//! 2. enum membership
//! 3. string length
//! 4. numeric bounds
//! 5. pattern
//!
//! Every declared field is checked regardless of earlier failures, so one call
//! reports all offending fields.

use super::types::{FieldDefinition, FieldType, Schema, StringFormat};
use crate::error::{FieldError, GateError, GateResult};

use chrono::{DateTime, FixedOffset};
use log::{debug, trace};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$",
    )
    .expect("EMAIL_REGEX is a valid regex pattern")
});

const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Where an input value came from.
///
/// Query strings and path parameters are always text and get coerced to the
/// declared type; JSON bodies already carry native types and are only checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Body,
    Query,
    Path,
}

impl InputSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Query => "query",
            Self::Path => "path",
        }
    }

    /// Whether values from this source arrive as strings.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Query | Self::Path)
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of applying a schema to an input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// Normalized object containing only recognized fields
    Valid(Value),
    /// At least one field error, in accumulation order
    Invalid(Vec<FieldError>),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The normalized value, if valid.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }

    /// The field errors; empty when valid.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(errors) => errors,
        }
    }
}

/// Outcome plus the paths of input fields dropped during normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub outcome: ValidationOutcome,
    pub stripped: Vec<String>,
}

impl Schema {
    /// Validate `input` taken from `source`.
    pub fn validate(&self, input: &Value, source: InputSource) -> GateResult<ValidationOutcome> {
        Ok(self.validate_detailed(input, source)?.outcome)
    }

    /// Validate `input` and also report which unknown fields were dropped.
    pub fn validate_detailed(
        &self,
        input: &Value,
        source: InputSource,
    ) -> GateResult<ValidationReport> {
        let mut pass = Pass::new(source);

        let normalized = match input.as_object() {
            Some(obj) => pass.object(
                &self.fields,
                self.additional_fields_allowed,
                self.minimum_fields_required,
                "",
                obj,
            )?,
            None => {
                pass.errors.push(FieldError::invalid_type("", input));
                None
            }
        };

        debug!(
            "Validated {} input against '{}': {} error(s), {} field(s) stripped",
            source,
            self.name,
            pass.errors.len(),
            pass.stripped.len()
        );

        let outcome = match normalized {
            Some(obj) if pass.errors.is_empty() => ValidationOutcome::Valid(Value::Object(obj)),
            _ if !pass.errors.is_empty() => ValidationOutcome::Invalid(pass.errors),
            _ => {
                return Err(GateError::internal(format!(
                    "schema '{}' produced neither a value nor errors",
                    self.name
                )));
            }
        };

        Ok(ValidationReport {
            outcome,
            stripped: pass.stripped,
        })
    }
}

/// Per-call accumulator. Lives on the caller's stack only.
struct Pass {
    source: InputSource,
    errors: Vec<FieldError>,
    stripped: Vec<String>,
}

impl Pass {
    fn new(source: InputSource) -> Self {
        Self {
            source,
            errors: Vec::new(),
            stripped: Vec::new(),
        }
    }

    fn object(
        &mut self,
        fields: &[FieldDefinition],
        allow_additional: bool,
        min_fields: Option<usize>,
        path: &str,
        input: &Map<String, Value>,
    ) -> GateResult<Option<Map<String, Value>>> {
        let errors_before = self.errors.len();
        let mut output = Map::new();
        let mut present = 0;

        for field in fields {
            let field_path = join_path(path, &field.name);
            match input.get(&field.name).filter(|v| !v.is_null()) {
                Some(raw) => {
                    present += 1;
                    if let Some(value) = self.field(field, &field_path, raw)? {
                        output.insert(field.name.clone(), value);
                    }
                }
                None if field.required => self.errors.push(FieldError::required(field_path)),
                None => {
                    if let Some(default) = &field.default {
                        output.insert(field.name.clone(), default.clone());
                    }
                }
            }
        }

        for (key, value) in input {
            if fields.iter().any(|f| &f.name == key) {
                continue;
            }
            if allow_additional {
                output.insert(key.clone(), value.clone());
            } else {
                let stripped = join_path(path, key);
                trace!("Dropping unknown field '{}'", stripped);
                self.stripped.push(stripped);
            }
        }

        if let Some(min) = min_fields {
            if present < min {
                self.errors.push(FieldError::new(
                    path,
                    format!("at least {min} field(s) required"),
                    Value::Object(input.clone()),
                ));
            }
        }

        Ok((self.errors.len() == errors_before).then_some(output))
    }

    fn field(
        &mut self,
        def: &FieldDefinition,
        path: &str,
        raw: &Value,
    ) -> GateResult<Option<Value>> {
        match def.field_type {
            FieldType::Array => self.array(def, path, raw),
            FieldType::Object => match raw.as_object() {
                Some(obj) => Ok(self
                    .object(
                        &def.fields,
                        def.additional_fields_allowed,
                        def.minimum_fields_required,
                        path,
                        obj,
                    )?
                    .map(Value::Object)),
                None => {
                    self.errors.push(FieldError::invalid_type(path, raw));
                    Ok(None)
                }
            },
            _ => match check_scalar(def, raw, self.source) {
                Ok(value) => Ok(Some(value)),
                Err(message) => {
                    self.errors.push(FieldError::new(path, message, raw.clone()));
                    Ok(None)
                }
            },
        }
    }

    fn array(
        &mut self,
        def: &FieldDefinition,
        path: &str,
        raw: &Value,
    ) -> GateResult<Option<Value>> {
        let item_def = def.items.as_deref().ok_or_else(|| {
            GateError::internal(format!("array field '{path}' has no item definition"))
        })?;

        let Some(items) = raw.as_array() else {
            self.errors.push(FieldError::invalid_type(path, raw));
            return Ok(None);
        };

        let c = &def.constraints;
        if let Some(min) = c.min_items {
            if items.len() < min {
                self.errors.push(FieldError::new(
                    path,
                    format!("must contain at least {min} item(s)"),
                    raw.clone(),
                ));
                return Ok(None);
            }
        }
        if let Some(max) = c.max_items {
            if items.len() > max {
                self.errors.push(FieldError::new(
                    path,
                    format!("must contain at most {max} item(s)"),
                    raw.clone(),
                ));
                return Ok(None);
            }
        }

        let errors_before = self.errors.len();
        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let item_path = format!("{path}[{index}]");
            if item.is_null() {
                self.errors.push(FieldError::invalid_type(item_path, item));
                continue;
            }
            if let Some(value) = self.field(item_def, &item_path, item)? {
                output.push(value);
            }
        }

        Ok((self.errors.len() == errors_before).then(|| Value::Array(output)))
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Check one scalar value, returning its normalized form or the first failure.
fn check_scalar(def: &FieldDefinition, raw: &Value, source: InputSource) -> Result<Value, String> {
    let c = &def.constraints;

    let mut value = coerce(def.field_type, raw, source).ok_or_else(|| "invalid type".to_string())?;
    if c.trim {
        if let Value::String(s) = &value {
            value = Value::String(s.trim().to_string());
        }
    }

    check_format(def, &value)?;

    if let Some(allowed) = &c.enum_values {
        if !allowed.contains(&value) {
            let allowed: Vec<String> = allowed.iter().map(display_value).collect();
            return Err(format!("must be one of: {}", allowed.join(", ")));
        }
    }

    if let Some(s) = value.as_str() {
        let length = s.chars().count();
        if let Some(min) = c.min_length {
            if length < min {
                return Err(format!("must be at least {min} characters long"));
            }
        }
        if let Some(max) = c.max_length {
            if length > max {
                return Err(format!("must be at most {max} characters long"));
            }
        }
    }

    if let Some(n) = value.as_f64() {
        if let Some(min) = c.minimum {
            if n < min {
                return Err(format!("must be >= {min}"));
            }
        }
        if let Some(max) = c.maximum {
            if n > max {
                return Err(format!("must be <= {max}"));
            }
        }
    }

    if let (Some(pattern), Some(s)) = (&c.pattern, value.as_str()) {
        if !pattern.is_match(s) {
            return Err(format!("must match pattern \"{}\"", pattern.as_str()));
        }
    }

    Ok(value)
}

/// Convert `raw` to the declared type.
///
/// Native values of the right type pass through for every source, which keeps
/// re-validation of normalized output stable. Strings from textual sources are
/// parsed; body values are never converted.
fn coerce(field_type: FieldType, raw: &Value, source: InputSource) -> Option<Value> {
    if field_type.accepts(raw) {
        return Some(raw.clone());
    }

    if field_type == FieldType::Integer {
        if let Some(f) = raw.as_f64().filter(|f| raw.is_f64() && f.fract() == 0.0) {
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
            if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                return Some(Value::from(f as i64));
            }
        }
    }

    if !source.is_textual() {
        return None;
    }
    let text = raw.as_str()?;
    match field_type {
        FieldType::Integer if is_integer_text(text) => text.parse::<i64>().ok().map(Value::from),
        FieldType::Number if is_decimal_text(text) => text.parse::<i64>().ok().map(Value::from).or_else(|| {
            text.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
        }),
        FieldType::Boolean => match text {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

/// An optional `-` followed by ASCII digits.
fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Integer text with an optional fractional part, like `-2.25`.
fn is_decimal_text(text: &str) -> bool {
    match text.split_once('.') {
        Some((whole, fraction)) => {
            is_integer_text(whole)
                && !fraction.is_empty()
                && fraction.bytes().all(|b| b.is_ascii_digit())
        }
        None => is_integer_text(text),
    }
}

fn check_format(def: &FieldDefinition, value: &Value) -> Result<(), String> {
    let Some(text) = value.as_str() else {
        return Ok(());
    };

    if def.field_type == FieldType::DateTime && !is_valid_datetime(text) {
        return Err("must be a valid date-time".to_string());
    }

    match def.constraints.format {
        Some(StringFormat::Email) if !EMAIL_REGEX.is_match(text) => {
            Err("must be a valid email".to_string())
        }
        Some(StringFormat::Password) if !is_strong_password(text) => Err(format!(
            "must contain a lowercase letter, an uppercase letter, a digit and one of {PASSWORD_SPECIALS}"
        )),
        _ => Ok(()),
    }
}

/// RFC 3339 timestamps, parsed with chrono for full date validation.
fn is_valid_datetime(value: &str) -> bool {
    !value.is_empty() && DateTime::<FixedOffset>::parse_from_rfc3339(value).is_ok()
}

fn is_strong_password(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c))
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
