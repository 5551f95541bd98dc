//! Schema registry for loading, checking, and accessing request schemas.
//!
//! The registry is built once at startup from the embedded schema documents and
//! then shared read-only by every request. A process-wide instance is available
//! through [`SchemaRegistry::global`].

use super::embedded::{self, names};
use super::types::{FieldType, Schema};
use super::validation::{InputSource, ValidationOutcome};
use crate::config::GateConfig;
use crate::error::{GateError, GateResult, SchemaError};

use log::{debug, info};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

static GLOBAL_REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();

/// Registry of named request schemas.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
    config: GateConfig,
}

impl SchemaRegistry {
    /// Create a registry with the embedded schemas and default configuration.
    pub fn new() -> GateResult<Self> {
        Self::with_config(GateConfig::default())
    }

    /// Create a registry with the embedded schemas, applying `config`.
    pub fn with_config(config: GateConfig) -> GateResult<Self> {
        let mut registry = Self::empty(config);
        for document in embedded::all_schemas() {
            let mut schema = Schema::from_json(document)?;
            if schema.name == names::TODO_LIST_QUERY {
                registry.apply_page_size(&mut schema)?;
            }
            registry.register(schema)?;
        }

        info!(
            "Schema registry initialized with {} schemas (max page size {})",
            registry.schemas.len(),
            registry.config.max_page_size
        );
        Ok(registry)
    }

    /// Create a registry with no schemas.
    pub fn empty(config: GateConfig) -> Self {
        Self {
            schemas: HashMap::new(),
            config,
        }
    }

    /// Add a schema. Only possible before the registry is shared.
    pub fn register(&mut self, schema: Schema) -> GateResult<()> {
        schema.check()?;
        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::DuplicateSchema {
                schema: schema.name,
            }
            .into());
        }
        debug!("Registered schema '{}'", schema.name);
        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Get a schema by name.
    pub fn get_schema(&self, name: &str) -> GateResult<&Schema> {
        self.schemas
            .get(name)
            .ok_or_else(|| GateError::schema_not_found(name))
    }

    /// Check whether a schema name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered schema names, sorted.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Validate `input` against the named schema.
    pub fn validate(
        &self,
        name: &str,
        input: &Value,
        source: InputSource,
    ) -> GateResult<ValidationOutcome> {
        self.get_schema(name)?.validate(input, source)
    }

    /// Install `registry` as the process-wide instance.
    ///
    /// Fails if a global registry already exists, including one created lazily
    /// by an earlier call to [`SchemaRegistry::global`].
    pub fn install_global(registry: SchemaRegistry) -> GateResult<&'static SchemaRegistry> {
        GLOBAL_REGISTRY
            .set(registry)
            .map_err(|_| GateError::internal("schema registry is already initialized"))?;
        Ok(Self::global())
    }

    /// The process-wide registry, built with defaults on first use.
    pub fn global() -> &'static SchemaRegistry {
        GLOBAL_REGISTRY
            .get_or_init(|| SchemaRegistry::new().expect("embedded schemas are valid"))
    }

    /// Rewrite the list-query `limit` field from the configured page sizes.
    fn apply_page_size(&self, schema: &mut Schema) -> GateResult<()> {
        let (default_size, max_size) =
            self.config
                .page_size_bounds()
                .map_err(|details| SchemaError::InvalidDefault {
                    schema: schema.name.clone(),
                    field: "limit".to_string(),
                    details,
                })?;

        let limit = schema
            .fields
            .iter_mut()
            .find(|f| f.name == "limit" && f.field_type == FieldType::Integer)
            .ok_or_else(|| GateError::internal("list-query schema has no integer 'limit'"))?;
        limit.constraints.maximum = Some(f64::from(max_size));
        limit.default = Some(Value::from(default_size));
        Ok(())
    }
}
