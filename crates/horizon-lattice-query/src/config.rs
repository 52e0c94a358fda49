//! Configuration for the query service.
//!
//! Configuration is read from TOML:
//!
//! ```toml
//! endpoint = "https://api.example.com/graphql"
//! timeout_secs = 15
//! connect_timeout_secs = 5
//! user_agent = "Explorer/1.0"
//! proxy = "http://proxy.internal:3128"
//!
//! [headers]
//! X-Client = "explorer"
//! ```
//!
//! Every key is optional. The endpoint can be overridden at runtime with the
//! `LATTICE_GRAPHQL_ENDPOINT` environment variable.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use horizon_lattice_net::GraphQLTransport;
use horizon_lattice_net::graphql::DEFAULT_ENDPOINT;
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Environment variable overriding [`QueryConfig::endpoint`].
pub const ENDPOINT_ENV: &str = "LATTICE_GRAPHQL_ENDPOINT";

/// Settings for connecting to a GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// The GraphQL endpoint URL.
    pub endpoint: String,
    /// Total request timeout in seconds. `0` disables the timeout.
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// User agent override.
    pub user_agent: Option<String>,
    /// Proxy URL all requests are routed through.
    pub proxy: Option<String>,
    /// Headers sent with every request.
    pub headers: BTreeMap<String, String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: None,
            proxy: None,
            headers: BTreeMap::new(),
        }
    }
}

impl QueryConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: crate::targets::QUERY, "Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|e| !e.trim().is_empty()) {
            tracing::debug!(target: crate::targets::QUERY, "Endpoint overridden by {}", ENDPOINT_ENV);
            self.endpoint = endpoint;
        }
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::invalid("endpoint", "must not be empty"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::invalid("connect_timeout_secs", "must be at least 1"));
        }
        Ok(())
    }

    /// Build a transport from these settings.
    pub fn build_transport(&self) -> Result<GraphQLTransport> {
        self.validate()?;

        let mut builder = GraphQLTransport::builder(self.endpoint.trim())
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs));
        builder = match self.timeout_secs {
            0 => builder.no_timeout(),
            secs => builder.timeout(Duration::from_secs(secs)),
        };
        if let Some(ref ua) = self.user_agent {
            builder = builder.user_agent(ua.as_str());
        }
        if let Some(ref proxy) = self.proxy {
            builder = builder.proxy(proxy.as_str());
        }
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }

        Ok(builder.build()?)
    }
}
