//! Error types for cypher-builder

use thiserror::Error;

/// Errors raised while constructing specs, scripts or configuration.
///
/// Query verbs themselves never fail; every failure here happens before a
/// builder sees its input.
#[derive(Error, Debug)]
pub enum Error {
    /// Path spec JSON was not an object, an array of objects, or a string
    #[error("Invalid path spec: expected object, array of objects or string, got {0}")]
    InvalidPathSpec(String),

    /// Property map for an entity (or a SET map) was not a JSON object
    #[error("Invalid properties for '{key}': expected an object")]
    InvalidProperties { key: String },

    /// Entity key had nothing before the '#'
    #[error("Empty label in entity key '{key}'")]
    EmptyLabel { key: String },

    /// Script failed to deserialize
    #[error("Script error: {0}")]
    Script(#[from] serde_json::Error),

    /// TOML configuration failed to parse
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// IO error while reading configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cypher-builder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Short name for a JSON value's kind, used in error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
