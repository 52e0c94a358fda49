//! Pooled HTTP client used by the GraphQL transport.
//!
//! # Example
//!
//! ```ignore
//! use horizon_lattice_net::http::HttpClient;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(10))
//!     .user_agent("MyApp/1.0")
//!     .build()?;
//!
//! let response = client
//!     .post_json("http://localhost:4000", &HeaderMap::new(), body)
//!     .await?;
//! println!("Status: {}", response.status());
//! ```

mod client;
mod response;

pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig};
pub use response::HttpResponse;
