//! GraphQL request types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Variables attached to a GraphQL operation.
pub type Variables = Map<String, Value>;

/// The `{query, variables}` envelope sent to the endpoint.
///
/// Built fresh for every call. `variables` is omitted from the wire body
/// entirely when none were supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEnvelope {
    /// The GraphQL query string.
    pub query: String,

    /// Optional variables for the query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Variables>,
}

impl QueryEnvelope {
    /// Create an envelope with no variables.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let envelope = QueryEnvelope::new("{ users { id name } }");
    /// ```
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
        }
    }

    /// Set a single variable value.
    ///
    /// Values that fail to serialize are skipped.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let envelope = QueryEnvelope::new("query($id: ID!) { user(id: $id) { name } }")
    ///     .variable("id", "123")
    ///     .variable("limit", 10);
    /// ```
    pub fn variable(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.variables
                    .get_or_insert_with(Map::new)
                    .insert(name.into(), value);
            }
            Err(e) => {
                tracing::warn!(target: crate::targets::GRAPHQL, "Skipping unserializable variable: {}", e);
            }
        }
        self
    }

    /// Replace all variables.
    pub fn variables(mut self, variables: Option<Variables>) -> Self {
        self.variables = variables;
        self
    }

    /// Whether the query is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Serialize the envelope to its JSON wire form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
