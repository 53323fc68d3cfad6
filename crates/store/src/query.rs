//! Parameterized store queries.

use serde::Serialize;
use serde_json::{Map, Value};

/// A filtered, parameterized query against the document store.
///
/// Filter and projection expressions are static strings defined next to the
/// operations that issue them; runtime input travels exclusively through
/// `params`, never by string interpolation. Draft documents are excluded by
/// the backend on every query, callers never repeat that clause.
#[derive(Clone, Debug, Serialize)]
pub struct Query {
    /// Filter expression with `$name` parameter references.
    pub filter: &'static str,
    /// Optional projection applied to each matched document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<&'static str>,
    /// Parameter bindings for the filter.
    pub params: Map<String, Value>,
    /// Optional ordering expression, e.g. `created_at desc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<&'static str>,
    /// Optional result window `[start, end)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<(u64, u64)>,
}

impl Query {
    /// Start a query with the given filter expression.
    pub fn new(filter: &'static str) -> Self {
        Self {
            filter,
            projection: None,
            params: Map::new(),
            order: None,
            window: None,
        }
    }

    /// Attach a projection.
    pub fn projection(mut self, projection: &'static str) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Bind a parameter.
    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    /// Attach an ordering expression.
    pub fn order(mut self, order: &'static str) -> Self {
        self.order = Some(order);
        self
    }

    /// Restrict results to the half-open window `[start, end)`.
    pub fn window(mut self, start: u64, end: u64) -> Self {
        self.window = Some((start, end));
        self
    }
}
