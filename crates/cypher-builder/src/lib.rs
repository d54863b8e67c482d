//! Cypher text from nested map/list graph descriptions.
//!
//! Callers describe nodes, relationships and property bags as data and get
//! query text back. Nothing here talks to a database or checks the produced
//! Cypher; values are quoted but never escaped.
//!
//! ## Pipeline
//!
//! ```text
//! PathSpec ──► PatternParser ──► Pattern ──► clause::* ──► QueryBuilder::cypher()
//!                   │
//!                   └─ AliasAllocator (explicit "Label#alias" or generated p<N>)
//! ```
//!
//! ## Usage
//!
//! ```
//! use cypher_builder::{AliasAllocator, PathSpec, QueryBuilder};
//! use serde_json::json;
//!
//! let people = PathSpec::from_json(json!([
//!     {"Person#p": {"name": "Alice"}},
//!     {"Person#q": {"name": "Bob"}},
//!     {"KNOWS#k": {"from": "p", "to": "q", "since": 2020}}
//! ]))?;
//!
//! let query = QueryBuilder::with_allocator(AliasAllocator::new()).create(people);
//!
//! assert_eq!(
//!     query.cypher(),
//!     "CREATE (p:Person {name: 'Alice'})\n\
//!      CREATE (q:Person {name: 'Bob'})\n\
//!      CREATE (p)-[k:KNOWS {since: 2020}]->(q)"
//! );
//! # Ok::<(), cypher_builder::Error>(())
//! ```

pub mod alias;
pub mod builder;
pub mod clause;
pub mod config;
pub mod error;
pub mod pattern;
pub mod script;
pub mod value;

// Re-exports
pub use alias::AliasAllocator;
pub use builder::QueryBuilder;
pub use clause::{Clause, ClauseKind, ConstraintKind};
pub use config::BuilderConfig;
pub use error::{Error, Result};
pub use pattern::{EntitySpec, PathSpec, Pattern, PatternParser};
pub use script::{Operation, Script};
pub use value::{PropertyKey, PropertyMap, PropertyValue};
