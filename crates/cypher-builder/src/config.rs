//! Builder configuration
//!
//! Loaded from TOML; every field has a default so partial files work.

use crate::alias::DEFAULT_ALIAS_PREFIX;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rendering settings for a [`QueryBuilder`](crate::QueryBuilder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Prefix for generated aliases
    pub alias_prefix: String,
    /// Text placed between rendered clauses
    pub clause_separator: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            alias_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
            clause_separator: "\n".to_string(),
        }
    }
}

impl BuilderConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
