//! Route table binding HTTP method and path to validation stages.
//!
//! The table does not dispatch to handlers. It resolves a request line to the
//! [`GatePipeline`] that must pass before the handler may run, and extracts the
//! `{param}` path segments the path stage validates.

use crate::gate::{GatePipeline, PipelineOutcome, RequestData, RequestGate};
use crate::schema::names;
use log::debug;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix every API path is mounted under.
pub const API_PREFIX: &str = "/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported HTTP method '{0}'")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// One method and path pattern with its validation stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    method: Method,
    pattern: String,
    segments: Vec<Segment>,
    pipeline: GatePipeline,
}

impl Route {
    pub fn method(&self) -> Method {
        self.method
    }

    /// Path pattern relative to the table prefix, e.g. `/todo/{id}`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn pipeline(&self) -> &GatePipeline {
        &self.pipeline
    }

    fn literal_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    fn capture(&self, parts: &[&str]) -> Option<Map<String, Value>> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = Map::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), Value::String((*part).to_string()));
                }
            }
        }
        Some(params)
    }
}

/// A resolved route plus the path parameters captured from the request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'t> {
    route: &'t Route,
    params: Map<String, Value>,
}

impl<'t> RouteMatch<'t> {
    pub fn route(&self) -> &'t Route {
        self.route
    }

    /// Captured path parameters, values as received.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Store the captured parameters in `data` and run the route's stages.
    pub fn run(&self, gate: &RequestGate<'_>, data: &mut RequestData) -> PipelineOutcome {
        data.params = Value::Object(self.params.clone());
        self.route.pipeline.run(gate, data)
    }
}

/// Routes of one API, all mounted under a common prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    prefix: String,
    routes: Vec<Route>,
}

impl RouteTable {
    /// An empty table mounted at `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().trim_end_matches('/').to_string(),
            routes: Vec::new(),
        }
    }

    /// Every todo and auth route with its stages.
    pub fn todo_api() -> Self {
        Self::new(API_PREFIX)
            .route(
                Method::Get,
                "/todo",
                GatePipeline::new().query(names::TODO_LIST_QUERY),
            )
            .route(Method::Get, "/todo/stats", GatePipeline::new())
            .route(
                Method::Get,
                "/todo/{id}",
                GatePipeline::new().path(names::TODO_ID),
            )
            .route(
                Method::Post,
                "/todo",
                GatePipeline::new().body(names::TODO_CREATE),
            )
            .route(
                Method::Put,
                "/todo/{id}",
                GatePipeline::new()
                    .body(names::TODO_UPDATE)
                    .path(names::TODO_ID),
            )
            .route(
                Method::Delete,
                "/todo/{id}",
                GatePipeline::new().path(names::TODO_ID),
            )
            .route(
                Method::Patch,
                "/todo/bulk/update",
                GatePipeline::new().body(names::TODO_BULK_UPDATE),
            )
            .route(
                Method::Post,
                "/auth/register",
                GatePipeline::new().body(names::AUTH_REGISTER),
            )
            .route(
                Method::Post,
                "/auth/login",
                GatePipeline::new().body(names::AUTH_LOGIN),
            )
            .route(
                Method::Post,
                "/auth/refresh",
                GatePipeline::new().body(names::AUTH_REFRESH_TOKEN),
            )
            .route(
                Method::Post,
                "/auth/forgot-password",
                GatePipeline::new().body(names::AUTH_FORGOT_PASSWORD),
            )
            .route(
                Method::Post,
                "/auth/reset-password",
                GatePipeline::new().body(names::AUTH_RESET_PASSWORD),
            )
            .route(
                Method::Post,
                "/auth/change-password",
                GatePipeline::new().body(names::AUTH_CHANGE_PASSWORD),
            )
            .route(Method::Post, "/auth/logout", GatePipeline::new())
            .route(Method::Get, "/auth/profile", GatePipeline::new())
            .route(
                Method::Put,
                "/auth/profile",
                GatePipeline::new().body(names::AUTH_UPDATE_PROFILE),
            )
    }

    /// Add a route. `pattern` is relative to the prefix; `{name}` segments capture.
    pub fn route(mut self, method: Method, pattern: &str, pipeline: GatePipeline) -> Self {
        let segments = split_path(pattern)
            .into_iter()
            .map(|part| match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(part.to_string()),
            })
            .collect();
        self.routes.push(Route {
            method,
            pattern: pattern.to_string(),
            segments,
            pipeline,
        });
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find the route for a request line.
    ///
    /// Any query string is ignored. When several patterns match, the one with
    /// the most literal segments wins, so `/todo/stats` beats `/todo/{id}`.
    pub fn resolve(&self, method: Method, path: &str) -> Option<RouteMatch<'_>> {
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        let relative = path.strip_prefix(self.prefix.as_str())?;
        if !(relative.is_empty() || relative.starts_with('/')) {
            return None;
        }
        let parts = split_path(relative);

        let mut best: Option<RouteMatch<'_>> = None;
        for route in self.routes.iter().filter(|r| r.method == method) {
            let Some(params) = route.capture(&parts) else {
                continue;
            };
            let better = best
                .as_ref()
                .is_none_or(|b| route.literal_count() > b.route.literal_count());
            if better {
                best = Some(RouteMatch { route, params });
            }
        }

        match &best {
            Some(found) => debug!("{} {} matched {}", method, path, found.route.pattern),
            None => debug!("{} {} matched no route", method, path),
        }
        best
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}
