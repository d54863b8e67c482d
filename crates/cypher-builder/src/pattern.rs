//! Path specs and the patterns parsed from them.
//!
//! A path spec is either a list of entity entries (`"Label#alias"` keyed
//! property maps) or a raw text fragment. Raw fragments skip parsing entirely
//! and stay a separate variant all the way to rendering.

use crate::alias::AliasAllocator;
use crate::error::{json_kind, Error, Result};
use crate::value::{PropertyMap, PropertyValue};
use serde_json::Value;
use std::fmt;

/// Reserved property naming a relationship's start alias
pub const FROM_KEY: &str = "from";
/// Reserved property naming a relationship's end alias
pub const TO_KEY: &str = "to";

/// One `{"Label#alias": {...}}` entry of a path spec.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpec {
    /// `Label` or `Label#alias`
    pub key: String,
    pub properties: PropertyMap,
}

impl EntitySpec {
    pub fn new(key: impl Into<String>, properties: impl Into<PropertyMap>) -> Self {
        Self {
            key: key.into(),
            properties: properties.into(),
        }
    }

    /// Split the key on the first `#` into label and optional alias
    pub fn label_and_alias(&self) -> (&str, Option<&str>) {
        match self.key.split_once('#') {
            Some((label, alias)) => (label, Some(alias)),
            None => (&self.key, None),
        }
    }
}

/// Caller-supplied description of what a verb operates on.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum PathSpec {
    Entities(Vec<EntitySpec>),
    Raw(String),
}

impl PathSpec {
    /// Single entity spec
    pub fn entity(key: impl Into<String>, properties: impl Into<PropertyMap>) -> Self {
        PathSpec::Entities(vec![EntitySpec::new(key, properties)])
    }

    /// Raw text, passed through verbatim
    pub fn raw(text: impl Into<String>) -> Self {
        PathSpec::Raw(text.into())
    }

    /// Build a spec from JSON: an object, an array of objects, or a string.
    ///
    /// Each key of an object becomes one entity, in order. Keys with an
    /// empty label are rejected here so that bad input surfaces before any
    /// query is built.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(PathSpec::Raw(text)),
            Value::Object(_) => Ok(PathSpec::Entities(entities_from_object(value)?)),
            Value::Array(items) => {
                let mut entities = Vec::new();
                for item in items {
                    if !item.is_object() {
                        return Err(Error::InvalidPathSpec(format!(
                            "array containing {}",
                            json_kind(&item)
                        )));
                    }
                    entities.extend(entities_from_object(item)?);
                }
                Ok(PathSpec::Entities(entities))
            }
            other => Err(Error::InvalidPathSpec(json_kind(&other).to_string())),
        }
    }
}

fn entities_from_object(value: Value) -> Result<Vec<EntitySpec>> {
    let entries = match value {
        Value::Object(entries) => entries,
        other => return Err(Error::InvalidPathSpec(json_kind(&other).to_string())),
    };

    entries
        .into_iter()
        .map(|(key, props)| {
            let label = key.split('#').next().unwrap_or_default();
            if label.is_empty() {
                return Err(Error::EmptyLabel { key });
            }
            if !props.is_object() {
                return Err(Error::InvalidProperties { key });
            }
            let properties = PropertyMap::from_json(props)?;
            Ok(EntitySpec { key, properties })
        })
        .collect()
}

impl TryFrom<Value> for PathSpec {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json(value)
    }
}

impl From<EntitySpec> for PathSpec {
    fn from(entity: EntitySpec) -> Self {
        PathSpec::Entities(vec![entity])
    }
}

impl From<Vec<EntitySpec>> for PathSpec {
    fn from(entities: Vec<EntitySpec>) -> Self {
        PathSpec::Entities(entities)
    }
}

impl From<&str> for PathSpec {
    fn from(text: &str) -> Self {
        PathSpec::Raw(text.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(text: String) -> Self {
        PathSpec::Raw(text)
    }
}

/// A parsed pattern with its alias resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Node {
        label: String,
        alias: String,
        properties: PropertyMap,
    },
    Relationship {
        rel_type: String,
        alias: String,
        from: String,
        to: String,
        properties: PropertyMap,
    },
    Raw(String),
}

impl Pattern {
    /// Alias bound by this pattern; raw fragments bind none
    pub fn alias(&self) -> Option<&str> {
        match self {
            Pattern::Node { alias, .. } | Pattern::Relationship { alias, .. } => Some(alias),
            Pattern::Raw(_) => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Pattern::Node { .. })
    }
}

/// Pattern text: `(p:Person {name: 'Alice'})`, `(p)-[k:KNOWS]->(q)` or the
/// raw fragment itself.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Node {
                label,
                alias,
                properties,
            } => write!(f, "({}:{}{})", alias, label, body_suffix(properties)),
            Pattern::Relationship {
                rel_type,
                alias,
                from,
                to,
                properties,
            } => write!(
                f,
                "({})-[{}:{}{}]->({})",
                from,
                alias,
                rel_type,
                body_suffix(properties),
                to
            ),
            Pattern::Raw(text) => f.write_str(text),
        }
    }
}

fn body_suffix(properties: &PropertyMap) -> String {
    properties
        .render_body()
        .map(|body| format!(" {}", body))
        .unwrap_or_default()
}

/// Normalizes path specs into patterns, allocating missing aliases.
pub struct PatternParser<'a> {
    aliases: &'a AliasAllocator,
}

impl<'a> PatternParser<'a> {
    pub fn new(aliases: &'a AliasAllocator) -> Self {
        Self { aliases }
    }

    /// Parse a spec into patterns, preserving spec order
    pub fn parse(&self, spec: &PathSpec) -> Vec<Pattern> {
        match spec {
            PathSpec::Raw(text) => vec![Pattern::Raw(text.clone())],
            PathSpec::Entities(entities) => {
                entities.iter().map(|e| self.parse_entity(e)).collect()
            }
        }
    }

    fn parse_entity(&self, entity: &EntitySpec) -> Pattern {
        let (label, explicit) = entity.label_and_alias();
        let alias = self.aliases.resolve(label, explicit);
        let mut properties = entity.properties.clone();

        if properties.contains_key(FROM_KEY) && properties.contains_key(TO_KEY) {
            let from = properties.remove(FROM_KEY).unwrap_or_default();
            let to = properties.remove(TO_KEY).unwrap_or_default();
            Pattern::Relationship {
                rel_type: label.to_string(),
                alias,
                from: endpoint_alias(from),
                to: endpoint_alias(to),
                properties,
            }
        } else {
            Pattern::Node {
                label: label.to_string(),
                alias,
                properties,
            }
        }
    }
}

/// Endpoint aliases are taken from text values as-is; anything else uses
/// its literal form.
fn endpoint_alias(value: PropertyValue) -> String {
    value
        .as_text()
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}
