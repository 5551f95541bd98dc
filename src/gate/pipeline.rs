//! Per-route validation pipelines.
//!
//! A route declares which schema gates which input source. The pipeline runs
//! those stages over a request, replacing each source with its normalized value,
//! and stops at the first rejection.

use super::core::RequestGate;
use super::errors::GateRejection;
use crate::schema::InputSource;
use log::debug;
use serde_json::map::Entry;
use serde_json::{Map, Value};
use uuid::Uuid;

/// The three input sources of one incoming request.
///
/// Handlers read `body`, `query` and `params` only after the route's pipeline
/// has returned [`PipelineOutcome::Continue`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestData {
    pub request_id: String,
    pub body: Value,
    pub query: Value,
    pub params: Value,
}

impl RequestData {
    /// Empty request with a fresh request id.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            body: Value::Object(Map::new()),
            query: Value::Object(Map::new()),
            params: Value::Object(Map::new()),
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    pub fn with_query(mut self, query: Value) -> Self {
        self.query = query;
        self
    }

    /// Set the query from decoded `key=value` pairs.
    ///
    /// Every value stays a string. A key given more than once becomes an array
    /// of its values, which a scalar field then rejects as an invalid type.
    pub fn with_query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut query = Map::new();
        for (key, value) in pairs {
            let value = Value::String(value.into());
            match query.entry(key.into()) {
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
                Entry::Occupied(mut entry) => match entry.get_mut() {
                    Value::Array(values) => values.push(value),
                    existing => {
                        let first = existing.take();
                        *existing = Value::Array(vec![first, value]);
                    }
                },
            }
        }
        self.query = Value::Object(query);
        self
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    fn source_mut(&mut self, source: InputSource) -> &mut Value {
        match source {
            InputSource::Body => &mut self.body,
            InputSource::Query => &mut self.query,
            InputSource::Path => &mut self.params,
        }
    }
}

impl Default for RequestData {
    fn default() -> Self {
        Self::new()
    }
}

/// One schema applied to one input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateStage {
    pub source: InputSource,
    pub schema: &'static str,
}

/// What the caller does after running a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// All stages passed; the request data now holds normalized values
    Continue,
    /// Send this response and skip the handler
    Respond(GateRejection),
}

impl PipelineOutcome {
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Ordered validation stages for one route.
///
/// Stages run body first, then query, then path, whatever order they were
/// declared in. Declaring a source twice keeps the later schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatePipeline {
    stages: Vec<GateStage>,
}

impl GatePipeline {
    /// A pipeline with no stages; every request continues untouched.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(self, schema: &'static str) -> Self {
        self.stage(InputSource::Body, schema)
    }

    pub fn query(self, schema: &'static str) -> Self {
        self.stage(InputSource::Query, schema)
    }

    pub fn path(self, schema: &'static str) -> Self {
        self.stage(InputSource::Path, schema)
    }

    pub fn stage(mut self, source: InputSource, schema: &'static str) -> Self {
        self.stages.retain(|s| s.source != source);
        self.stages.push(GateStage { source, schema });
        self.stages.sort_by_key(|s| stage_rank(s.source));
        self
    }

    pub fn stages(&self) -> &[GateStage] {
        &self.stages
    }

    /// Run every stage over `data`.
    ///
    /// Sources of stages that passed are replaced with their normalized values;
    /// the failing source and those after it are left as received.
    pub fn run(&self, gate: &RequestGate<'_>, data: &mut RequestData) -> PipelineOutcome {
        for stage in &self.stages {
            let request_id = data.request_id.clone();
            let input = data.source_mut(stage.source);
            if let Some(rejection) =
                gate.apply_in_place(stage.schema, stage.source, input, &request_id)
            {
                return PipelineOutcome::Respond(rejection);
            }
        }
        debug!(
            "Request '{}' passed {} validation stage(s)",
            data.request_id,
            self.stages.len()
        );
        PipelineOutcome::Continue
    }
}

fn stage_rank(source: InputSource) -> u8 {
    match source {
        InputSource::Body => 0,
        InputSource::Query => 1,
        InputSource::Path => 2,
    }
}
