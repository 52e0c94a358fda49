//! Error types for the GraphQL transport.

/// Message used when a response carries neither data nor errors.
pub const NO_DATA_MESSAGE: &str = "No data returned";

/// Message used when a query is rejected before any network activity.
pub const EMPTY_QUERY_MESSAGE: &str = "Query cannot be empty";

/// Errors that can occur while executing a GraphQL operation.
///
/// Each call is isolated: none of these variants poison the transport, and a
/// failed call can simply be re-issued.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The query string was empty or whitespace only.
    #[error("{}", EMPTY_QUERY_MESSAGE)]
    Validation,

    /// The request never produced a successful HTTP exchange.
    #[error("Request to GraphQL endpoint {endpoint} failed: {source}")]
    Transport {
        /// The endpoint the request was sent to.
        endpoint: String,
        /// What went wrong on the wire.
        #[source]
        source: TransportCause,
    },

    /// The response body was not valid JSON, or did not fit the expected shape.
    #[error("Invalid GraphQL response: {0}")]
    Decode(String),

    /// The server reported GraphQL-level errors, or returned no data.
    #[error("{0}")]
    Upstream(String),

    /// The transport could not be constructed.
    #[error("Invalid transport configuration: {0}")]
    Config(String),
}

/// The underlying cause of a [`QueryError::Transport`].
#[derive(Debug, thiserror::Error)]
pub enum TransportCause {
    /// Connection, timeout or protocol failure reported by the HTTP stack.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}{}", body_suffix(.body))]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, if it could be read.
        body: Option<String>,
    },
}

fn body_suffix(body: &Option<String>) -> String {
    match body.as_deref() {
        Some(body) if !body.is_empty() => format!(": {body}"),
        _ => String::new(),
    }
}

impl QueryError {
    /// Create a transport error for the given endpoint.
    pub fn transport(endpoint: impl Into<String>, source: impl Into<TransportCause>) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl std::fmt::Display) -> Self {
        Self::Decode(message.to_string())
    }

    /// Whether the error was raised before any network activity.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation)
    }

    /// Whether the error came from the GraphQL server rather than the wire.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }

    /// The HTTP status code, when the failure was a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport {
                source: TransportCause::Status { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

impl From<url::ParseError> for QueryError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("invalid endpoint URL: {err}"))
    }
}

/// A specialized Result type for GraphQL operations.
pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        assert_eq!(QueryError::Validation.to_string(), EMPTY_QUERY_MESSAGE);
        assert_eq!(EMPTY_QUERY_MESSAGE, "Query cannot be empty");
        assert!(QueryError::Validation.is_validation());
    }

    #[test]
    fn test_status_display() {
        let err = QueryError::transport(
            "http://localhost:4000",
            TransportCause::Status {
                status: 502,
                body: Some("bad gateway".into()),
            },
        );
        assert_eq!(
            err.to_string(),
            "Request to GraphQL endpoint http://localhost:4000 failed: HTTP 502: bad gateway"
        );
        assert_eq!(err.status(), Some(502));

        let bare = TransportCause::Status {
            status: 404,
            body: None,
        };
        assert_eq!(bare.to_string(), "HTTP 404");
    }

    #[test]
    fn test_upstream_message_is_verbatim() {
        let err = QueryError::Upstream("Field X not found; Unauthorized".into());
        assert_eq!(err.to_string(), "Field X not found; Unauthorized");
        assert!(err.is_upstream());
        assert_eq!(err.status(), None);
    }
}
