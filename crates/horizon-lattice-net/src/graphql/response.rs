//! GraphQL response types and error aggregation.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::{NO_DATA_MESSAGE, QueryError, Result};

/// A GraphQL error returned by the server.
///
/// Only `message` is relied upon. The remaining fields are read when they
/// have the expected shape and left empty otherwise, so a server that sends
/// `"locations": null` or partial locations still has its message reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// The error message. Missing or `null` messages decode as empty.
    #[serde(default, deserialize_with = "message_text")]
    pub message: String,

    /// Locations in the document where the error occurred.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub locations: Vec<Location>,

    /// Path to the field that caused the error.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub path: Option<Vec<PathSegment>>,

    /// Additional error metadata.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub extensions: Option<Map<String, Value>>,
}

impl ErrorEntry {
    /// Create an entry carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn message_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

/// Decode a field, falling back to its default when the shape is unexpected.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A location in a GraphQL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
}

/// A segment in an error path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A field name.
    Field(String),
    /// An array index.
    Index(usize),
}

/// Join error messages into one display string.
///
/// Messages are joined with `"; "` in their original order; empty messages
/// keep their position as empty segments. An empty slice yields
/// [`NO_DATA_MESSAGE`].
pub fn aggregate_errors(errors: &[ErrorEntry]) -> String {
    if errors.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// The `{data, errors}` envelope returned by the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// The data returned by the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Errors that occurred during execution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorEntry>>,
}

impl ResponseEnvelope {
    /// Bind a decoded JSON payload to the envelope shape.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(QueryError::decode(
                "expected a JSON object with `data` and/or `errors`",
            ));
        }
        serde_json::from_value(value).map_err(QueryError::decode)
    }

    /// The reported errors, empty when none were sent.
    pub fn errors(&self) -> &[ErrorEntry] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// Check if the response contains errors.
    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    /// Check if the response carries non-null data.
    pub fn has_data(&self) -> bool {
        self.data.as_ref().is_some_and(|data| !data.is_null())
    }

    /// All error messages joined with `"; "`, if any errors were reported.
    pub fn error_message(&self) -> Option<String> {
        self.has_errors().then(|| aggregate_errors(self.errors()))
    }

    /// Take the non-null data, or fail with the aggregated upstream message.
    pub fn into_data(self) -> Result<Value> {
        match self.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(QueryError::Upstream(aggregate_errors(
                self.errors.as_deref().unwrap_or_default(),
            ))),
        }
    }

    /// Bind the data to a caller-specified shape.
    ///
    /// Partial data is bound even when errors were reported alongside it.
    pub fn bind<T: DeserializeOwned>(self) -> Result<T> {
        let data = self.into_data()?;
        serde_json::from_value(data).map_err(|e| {
            QueryError::decode(format!("failed to bind GraphQL data: {e}"))
        })
    }
}
