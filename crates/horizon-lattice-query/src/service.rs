//! Query execution for display.

use horizon_lattice_net::{GraphQLTransport, QueryEnvelope, QueryError, RawResponse, Variables};
use horizon_lattice_table::{TabularResult, to_table};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::config::QueryConfig;
use crate::error::Result;
use crate::targets;

/// Prefix for failures that happened on the wire or while decoding.
const EXECUTION_FAILURE_PREFIX: &str = "Error executing query";

/// The result of running a query for display.
///
/// Serializes as `{"success": true, "data": {...}, "rawData": "..."}` or
/// `{"success": false, "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The server returned data.
    Success {
        /// The data flattened into a table.
        data: TabularResult,
        /// The full decoded response, pretty-printed.
        raw_data: String,
    },
    /// The query could not be run, or the server reported errors.
    Failure {
        /// A message suitable for showing to the user.
        message: String,
    },
}

impl QueryOutcome {
    /// Create a failure outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Create a failure outcome from a transport error.
    pub fn from_error(err: &QueryError) -> Self {
        let message = match err {
            QueryError::Validation | QueryError::Upstream(_) => err.to_string(),
            QueryError::Transport { .. } | QueryError::Decode(_) | QueryError::Config(_) => {
                format!("{EXECUTION_FAILURE_PREFIX}: {err}")
            }
        };
        Self::failure(message)
    }

    /// Whether the query produced data.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The table, on success.
    pub fn table(&self) -> Option<&TabularResult> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// The raw response text, on success.
    pub fn raw_data(&self) -> Option<&str> {
        match self {
            Self::Success { raw_data, .. } => Some(raw_data),
            Self::Failure { .. } => None,
        }
    }

    /// The failure message, on failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message } => Some(message),
        }
    }
}

impl Serialize for QueryOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Success { data, raw_data } => {
                let mut state = serializer.serialize_struct("QueryOutcome", 3)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
                state.serialize_field("rawData", raw_data)?;
                state.end()
            }
            Self::Failure { message } => {
                let mut state = serializer.serialize_struct("QueryOutcome", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("message", message)?;
                state.end()
            }
        }
    }
}

/// Runs arbitrary queries against one endpoint and returns display-ready
/// tables.
///
/// Cheap to clone; clones share the transport's connection pool. Each call
/// is independent, so a failing query never affects the next one.
///
/// # Example
///
/// ```ignore
/// use horizon_lattice_query::{QueryConfig, QueryService};
///
/// let service = QueryService::from_config(&QueryConfig::default())?;
/// let outcome = service.run("{ users { id name } }").await;
///
/// if let Some(table) = outcome.table() {
///     for row in table.rows() {
///         println!("{row:?}");
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QueryService {
    transport: GraphQLTransport,
}

impl QueryService {
    /// Create a service over an existing transport.
    pub fn new(transport: GraphQLTransport) -> Self {
        Self { transport }
    }

    /// Create a service from configuration.
    pub fn from_config(config: &QueryConfig) -> Result<Self> {
        Ok(Self::new(config.build_transport()?))
    }

    /// The underlying transport.
    pub fn transport(&self) -> &GraphQLTransport {
        &self.transport
    }

    /// Run a query and flatten its data into a table.
    ///
    /// Never fails: every error is reported as [`QueryOutcome::Failure`].
    /// GraphQL errors take precedence over any partial data.
    pub async fn run(&self, query: &str) -> QueryOutcome {
        self.run_with_variables(query, None).await
    }

    /// Run a query with variables and flatten its data into a table.
    pub async fn run_with_variables(
        &self,
        query: &str,
        variables: Option<Variables>,
    ) -> QueryOutcome {
        let envelope = QueryEnvelope::new(query).variables(variables);

        let RawResponse { envelope, json } = match self.transport.execute_envelope(&envelope).await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(target: targets::QUERY, "Query failed: {}", err);
                return QueryOutcome::from_error(&err);
            }
        };

        if let Some(message) = envelope.error_message() {
            tracing::warn!(target: targets::QUERY, "Query returned errors: {}", message);
            return QueryOutcome::failure(message);
        }

        let data = match envelope.into_data() {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(target: targets::QUERY, "Query returned no data");
                return QueryOutcome::from_error(&err);
            }
        };

        let table = to_table(&data);
        tracing::debug!(
            target: targets::QUERY,
            "Query produced {} rows across {} columns",
            table.len(),
            table.columns().len()
        );

        let raw_data = serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string());
        QueryOutcome::Success {
            data: table,
            raw_data,
        }
    }
}
