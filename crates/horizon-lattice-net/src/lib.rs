//! GraphQL networking for Horizon Lattice.
//!
//! This crate provides the transport side of the query explorer:
//!
//! - **GraphQL transport**: one JSON POST per query against a configured
//!   endpoint, decoding the `{data, errors}` envelope
//! - **Error aggregation**: GraphQL error lists joined into one display message
//! - **HTTP client**: a pooled `reqwest` client shared across concurrent calls
//!
//! # Example
//!
//! ```ignore
//! use horizon_lattice_net::GraphQLTransport;
//!
//! let transport = GraphQLTransport::builder("http://localhost:4000")
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! let response = transport.execute("{ users { id name } }", None).await?;
//! match response.error_message() {
//!     Some(message) => eprintln!("GraphQL error: {message}"),
//!     None => println!("{:?}", response.data),
//! }
//! ```

mod error;
pub mod graphql;
pub mod http;

pub use error::{EMPTY_QUERY_MESSAGE, NO_DATA_MESSAGE, QueryError, Result, TransportCause};

// Re-export commonly used types at the crate root
pub use graphql::{
    ErrorEntry, GraphQLTransport, GraphQLTransportBuilder, QueryEnvelope, RawResponse,
    ResponseEnvelope, Variables, aggregate_errors,
};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// GraphQL transport target.
    pub const GRAPHQL: &str = "horizon_lattice_net::graphql";
    /// HTTP client target.
    pub const HTTP: &str = "horizon_lattice_net::http";
}
