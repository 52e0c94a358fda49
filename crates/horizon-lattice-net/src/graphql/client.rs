//! GraphQL transport implementation.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::request::{QueryEnvelope, Variables};
use super::response::ResponseEnvelope;
use crate::error::{QueryError, Result, TransportCause};
use crate::http::{HttpClient, HttpClientBuilder};
use crate::targets;

/// The endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000";

/// Builder for creating a GraphQL transport.
pub struct GraphQLTransportBuilder {
    endpoint: String,
    http_client: Option<HttpClient>,
    http_client_builder: HttpClientBuilder,
    default_headers: http::HeaderMap,
    pending_error: Option<QueryError>,
}

impl GraphQLTransportBuilder {
    /// Create a new builder with the specified GraphQL endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client: None,
            http_client_builder: HttpClientBuilder::new(),
            default_headers: http::HeaderMap::new(),
            pending_error: None,
        }
    }

    /// Use an existing HTTP client, sharing its connection pool.
    ///
    /// Timeout, proxy and user agent settings on this builder are ignored when a
    /// client is supplied.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http_client_builder = self.http_client_builder.timeout(timeout);
        self
    }

    /// Disable the request timeout.
    pub fn no_timeout(mut self) -> Self {
        self.http_client_builder = self.http_client_builder.no_timeout();
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_client_builder = self.http_client_builder.connect_timeout(timeout);
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http_client_builder = self.http_client_builder.user_agent(user_agent);
        self
    }

    /// Route requests through a proxy.
    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.http_client_builder = self.http_client_builder.proxy(proxy_url);
        self
    }

    /// Add a header sent with every request.
    ///
    /// An invalid name or value is reported by [`build`](Self::build).
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (
            http::HeaderName::from_bytes(name.as_bytes()),
            http::HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.default_headers.insert(name, value);
            }
            _ => {
                self.pending_error
                    .get_or_insert(QueryError::Config(format!("invalid header '{name}'")));
            }
        }
        self
    }

    /// Build the transport.
    pub fn build(self) -> Result<GraphQLTransport> {
        if let Some(err) = self.pending_error {
            return Err(err);
        }

        let url = url::Url::parse(&self.endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(QueryError::Config(format!(
                "unsupported endpoint scheme '{}'",
                url.scheme()
            )));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => self.http_client_builder.build()?,
        };

        Ok(GraphQLTransport {
            inner: Arc::new(GraphQLTransportInner {
                http_client,
                endpoint: self.endpoint,
                default_headers: self.default_headers,
            }),
        })
    }
}

struct GraphQLTransportInner {
    http_client: HttpClient,
    endpoint: String,
    default_headers: http::HeaderMap,
}

/// A decoded response, kept both as the typed envelope and the raw JSON.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// The `{data, errors}` envelope.
    pub envelope: ResponseEnvelope,
    /// The full decoded response body.
    pub json: Value,
}

/// A GraphQL transport bound to a single endpoint.
///
/// Every call performs exactly one POST round trip and nothing is retried.
/// The transport is cheaply cloneable and holds no mutable state, so clones
/// may be used from any number of tasks concurrently.
///
/// # Example
///
/// ```ignore
/// use horizon_lattice_net::graphql::GraphQLTransport;
///
/// let transport = GraphQLTransport::new("http://localhost:4000")?;
///
/// let response = transport.execute("{ users { id name } }", None).await?;
/// let users: Users = transport.execute_as("{ users { id name } }", None).await?;
/// ```
#[derive(Clone)]
pub struct GraphQLTransport {
    inner: Arc<GraphQLTransportInner>,
}

impl GraphQLTransport {
    /// Create a transport for the endpoint with default settings.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        GraphQLTransportBuilder::new(endpoint).build()
    }

    /// Create a new builder for configuring a transport.
    pub fn builder(endpoint: impl Into<String>) -> GraphQLTransportBuilder {
        GraphQLTransportBuilder::new(endpoint)
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// The HTTP client requests are sent with.
    pub fn http_client(&self) -> &HttpClient {
        &self.inner.http_client
    }

    /// Execute a query and decode the `{data, errors}` envelope.
    ///
    /// GraphQL-level errors are returned inside the envelope, not as `Err`.
    pub async fn execute(
        &self,
        query: &str,
        variables: Option<Variables>,
    ) -> Result<ResponseEnvelope> {
        let envelope = QueryEnvelope::new(query).variables(variables);
        Ok(self.execute_envelope(&envelope).await?.envelope)
    }

    /// Execute a query and bind its data to `T`.
    ///
    /// Fails with [`QueryError::Upstream`] when the response carries no
    /// data. Partial data reported alongside errors is still bound.
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<Variables>,
    ) -> Result<T> {
        let response = self.execute(query, variables).await?;
        if let Some(message) = response.error_message() {
            tracing::warn!(target: targets::GRAPHQL, "GraphQL errors reported: {}", message);
        }
        response.bind()
    }

    /// Execute a mutation and bind its data to `T`.
    ///
    /// Mutations share the query wire contract.
    pub async fn mutate<T: DeserializeOwned>(
        &self,
        mutation: &str,
        variables: Option<Variables>,
    ) -> Result<T> {
        self.execute_as(mutation, variables).await
    }

    /// Execute a query and return the decoded body without binding it.
    pub async fn fetch_raw(&self, query: &str) -> Result<Value> {
        self.post(&QueryEnvelope::new(query)).await
    }

    /// Execute a prepared envelope, keeping the raw JSON alongside the
    /// typed envelope.
    pub async fn execute_envelope(&self, envelope: &QueryEnvelope) -> Result<RawResponse> {
        let json = self.post(envelope).await?;
        let envelope = ResponseEnvelope::from_value(json.clone())?;
        Ok(RawResponse { envelope, json })
    }

    /// The single network round trip.
    async fn post(&self, envelope: &QueryEnvelope) -> Result<Value> {
        if envelope.is_blank() {
            return Err(QueryError::Validation);
        }

        let endpoint = self.endpoint();
        let body = envelope.to_json().map_err(QueryError::decode)?;

        tracing::debug!(
            target: targets::GRAPHQL,
            "POST {} ({} bytes, variables: {})",
            endpoint,
            body.len(),
            envelope.variables.is_some()
        );

        let response = self
            .inner
            .http_client
            .post_json(endpoint, &self.inner.default_headers, body)
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.is_success() {
            let status = response.status();
            let body = response.text().await.ok();
            let err = QueryError::transport(endpoint, TransportCause::Status { status, body });
            tracing::warn!(target: targets::GRAPHQL, "{}", err);
            return Err(err);
        }

        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        let value = serde_json::from_str::<Value>(&text).map_err(|e| {
            tracing::warn!(target: targets::GRAPHQL, "Response from {} is not JSON: {}", endpoint, e);
            QueryError::decode(e)
        })?;

        tracing::debug!(target: targets::GRAPHQL, "Response from {} decoded ({} bytes)", endpoint, text.len());
        Ok(value)
    }

    fn transport_error(&self, err: reqwest::Error) -> QueryError {
        let err = QueryError::transport(self.endpoint(), err);
        tracing::warn!(target: targets::GRAPHQL, "{}", err);
        err
    }
}

impl std::fmt::Debug for GraphQLTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQLTransport")
            .field("endpoint", &self.inner.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let transport = GraphQLTransport::new(DEFAULT_ENDPOINT).unwrap();
        assert_eq!(transport.endpoint(), "http://localhost:4000");
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            GraphQLTransport::new("not a url"),
            Err(QueryError::Config(_))
        ));
        assert!(matches!(
            GraphQLTransport::new("ftp://example.com/graphql"),
            Err(QueryError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_header_reported_at_build() {
        let result = GraphQLTransport::builder(DEFAULT_ENDPOINT)
            .header("bad header", "x")
            .build();
        assert!(matches!(result, Err(QueryError::Config(_))));
    }

    #[test]
    fn test_shared_http_client() {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        let transport = GraphQLTransport::builder("https://api.example.com/graphql")
            .http_client(client)
            .header("X-Trace", "1")
            .build()
            .unwrap();
        assert_eq!(transport.endpoint(), "https://api.example.com/graphql");
        assert_eq!(transport.inner.default_headers.len(), 1);
        assert_eq!(
            transport.inner.http_client.config().timeout,
            Some(Duration::from_secs(3))
        );
    }

    #[test]
    fn test_no_timeout_reaches_http_client() {
        let transport = GraphQLTransport::builder(DEFAULT_ENDPOINT)
            .timeout(Duration::from_secs(5))
            .no_timeout()
            .proxy("http://proxy.internal:3128")
            .build()
            .unwrap();
        let config = transport.http_client().config();
        assert_eq!(config.timeout, None);
        assert_eq!(config.proxy.as_deref(), Some("http://proxy.internal:3128"));
    }

    #[tokio::test]
    async fn test_blank_query_rejected_before_network() {
        // Port 9 (discard) would fail to connect; validation must win first.
        let transport = GraphQLTransport::new("http://127.0.0.1:9").unwrap();
        for query in ["", "   ", "\n\t"] {
            let err = transport.fetch_raw(query).await.unwrap_err();
            assert!(err.is_validation());
        }
    }
}
