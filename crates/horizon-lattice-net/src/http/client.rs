//! HTTP client implementation.

use std::sync::Arc;
use std::time::Duration;

use super::response::HttpResponse;
use crate::error::{QueryError, Result};
use crate::targets;

/// Configuration for the HTTP client.
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// Request timeout.
    pub timeout: Option<Duration>,
    /// Connect timeout.
    pub connect_timeout: Option<Duration>,
    /// Default user agent.
    pub user_agent: Option<String>,
    /// Proxy URL.
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
            user_agent: Some(format!(
                "HorizonLattice/{} (Rust)",
                env!("CARGO_PKG_VERSION")
            )),
            proxy: None,
        }
    }
}

/// Builder for creating an HTTP client with custom configuration.
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClientBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Disable request timeout.
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Route all requests through a proxy.
    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy_url.into());
        self
    }

    /// Build the HTTP client.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        if let Some(ref ua) = self.config.user_agent {
            builder = builder.user_agent(ua);
        }

        if let Some(ref proxy_url) = self.config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| QueryError::Config(format!("invalid proxy: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| QueryError::Config(e.to_string()))?;

        Ok(HttpClient {
            inner: Arc::new(HttpClientInner {
                client,
                config: self.config,
            }),
        })
    }
}

struct HttpClientInner {
    client: reqwest::Client,
    config: HttpClientConfig,
}

/// A pooled HTTP client.
///
/// The client is cheaply cloneable and thread-safe. Clones share the same
/// underlying connection pool and configuration, so one client can serve any
/// number of concurrent requests.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration.
    pub fn new() -> Result<Self> {
        HttpClientBuilder::new().build()
    }

    /// Create a builder for configuring a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Get the client's configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.inner.config
    }

    /// Send a POST request with a pre-serialized JSON body.
    ///
    /// Sets `Content-Type` and `Accept` to `application/json`. Exactly one
    /// request is issued; failures are not retried.
    pub async fn post_json(
        &self,
        url: &str,
        headers: &http::HeaderMap,
        body: String,
    ) -> reqwest::Result<HttpResponse> {
        let mut req = self
            .inner
            .client
            .post(url)
            .header(http::header::CONTENT_TYPE, "application/json")
            .header(http::header::ACCEPT, "application/json");

        for (name, value) in headers {
            req = req.header(name, value);
        }

        let response = req.body(body).send().await?;
        tracing::trace!(target: targets::HTTP, "POST {} -> {}", url, response.status());
        Ok(HttpResponse::from_reqwest(response))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().timeout, Some(Duration::from_secs(30)));
        assert_eq!(client.config().connect_timeout, Some(Duration::from_secs(10)));
        assert_eq!(client.config().proxy, None);
        assert!(client
            .config()
            .user_agent
            .as_deref()
            .is_some_and(|ua| ua.starts_with("HorizonLattice/")));
    }

    #[test]
    fn test_builder_overrides() {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .user_agent("Explorer/1.0")
            .proxy("http://proxy.internal:3128")
            .build()
            .unwrap();

        assert_eq!(client.config().timeout, Some(Duration::from_secs(5)));
        assert_eq!(client.config().user_agent.as_deref(), Some("Explorer/1.0"));
        assert_eq!(client.config().proxy.as_deref(), Some("http://proxy.internal:3128"));
    }

    #[test]
    fn test_no_timeout_clears_default() {
        let client = HttpClient::builder().no_timeout().build().unwrap();
        assert_eq!(client.config().timeout, None);
        assert_eq!(client.config().connect_timeout, Some(Duration::from_secs(10)));
    }
}
