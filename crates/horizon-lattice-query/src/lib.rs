//! GraphQL query explorer backend for Horizon Lattice.
//!
//! Submit any query string against a configured endpoint and get back a
//! table, whatever shape of JSON the server returns:
//!
//! ```ignore
//! use horizon_lattice_query::{QueryConfig, QueryService};
//!
//! let config = QueryConfig::load("explorer.toml")?.with_env_overrides();
//! let service = QueryService::from_config(&config)?;
//!
//! let outcome = service.run("{ users { id name email } }").await;
//! let body = serde_json::to_string(&outcome)?;
//! // {"success":true,"data":{"rows":[...],"columns":[...]},"rawData":"..."}
//! ```
//!
//! # Logging
//!
//! All crates log through `tracing`. Install a subscriber in the host
//! application and filter with the targets in [`targets`].

mod config;
mod error;
mod service;

pub use config::{ENDPOINT_ENV, QueryConfig};
pub use error::{ConfigError, Result};
pub use service::{QueryOutcome, QueryService};

pub use horizon_lattice_net::{QueryError, Variables};
pub use horizon_lattice_table::{RowRecord, TabularResult};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Query service target.
    pub const QUERY: &str = "horizon_lattice_query";
    /// GraphQL transport target.
    pub const GRAPHQL: &str = horizon_lattice_net::targets::GRAPHQL;
    /// HTTP client target.
    pub const HTTP: &str = horizon_lattice_net::targets::HTTP;
    /// Normalizer target.
    pub const TABLE: &str = horizon_lattice_table::targets::TABLE;
}
