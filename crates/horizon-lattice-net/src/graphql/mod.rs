//! GraphQL transport for queries and mutations over HTTP POST.
//!
//! This module provides:
//! - The `{query, variables}` request envelope
//! - The `{data, errors}` response envelope with error aggregation
//! - A transport performing one POST per call against a fixed endpoint
//!
//! # Example
//!
//! ```ignore
//! use horizon_lattice_net::graphql::{GraphQLTransport, QueryEnvelope};
//!
//! let transport = GraphQLTransport::new("http://localhost:4000")?;
//!
//! // Untyped envelope
//! let response = transport.execute("{ users { id name } }", None).await?;
//! if let Some(message) = response.error_message() {
//!     eprintln!("{message}");
//! }
//!
//! // Typed data
//! #[derive(Deserialize)]
//! struct Users { users: Vec<User> }
//! let users: Users = transport.execute_as("{ users { id name } }", None).await?;
//!
//! // With variables
//! let envelope = QueryEnvelope::new("query($id: ID!) { user(id: $id) { name } }")
//!     .variable("id", "123");
//! let user: UserData = transport
//!     .execute_as(&envelope.query, envelope.variables)
//!     .await?;
//! ```

mod client;
mod request;
mod response;

pub use client::{DEFAULT_ENDPOINT, GraphQLTransport, GraphQLTransportBuilder, RawResponse};
pub use request::{QueryEnvelope, Variables};
pub use response::{ErrorEntry, Location, PathSegment, ResponseEnvelope, aggregate_errors};
