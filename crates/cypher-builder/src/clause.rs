//! Clause rendering.
//!
//! Each function renders one verb into finished clause text. Input is never
//! validated: depths, labels and WHERE text are inserted as given.

use crate::pattern::Pattern;
use crate::value::PropertyMap;
use std::fmt;

/// Verb a clause was rendered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Match,
    Create,
    Delete,
    Where,
    Set,
    Return,
    Traverse,
    Index,
    Constraint,
}

impl ClauseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseKind::Match => "match",
            ClauseKind::Create => "create",
            ClauseKind::Delete => "delete",
            ClauseKind::Where => "where",
            ClauseKind::Set => "set",
            ClauseKind::Return => "return",
            ClauseKind::Traverse => "traverse",
            ClauseKind::Index => "index",
            ClauseKind::Constraint => "constraint",
        }
    }
}

/// One rendered clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    kind: ClauseKind,
    text: String,
}

impl Clause {
    fn new(kind: ClauseKind, text: String) -> Self {
        Self { kind, text }
    }

    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Kind of constraint asserted on a property.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(from = "String")]
pub enum ConstraintKind {
    #[default]
    Unique,
    Exists,
    /// Any other assertion text, rendered as given
    Custom(String),
}

impl ConstraintKind {
    pub fn as_str(&self) -> &str {
        match self {
            ConstraintKind::Unique => "UNIQUE",
            ConstraintKind::Exists => "EXISTS",
            ConstraintKind::Custom(text) => text,
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ConstraintKind {
    fn from(text: &str) -> Self {
        match text {
            "UNIQUE" => ConstraintKind::Unique,
            "EXISTS" => ConstraintKind::Exists,
            other => ConstraintKind::Custom(other.to_string()),
        }
    }
}

impl From<String> for ConstraintKind {
    fn from(text: String) -> Self {
        match text.as_str() {
            "UNIQUE" | "EXISTS" => ConstraintKind::from(text.as_str()),
            _ => ConstraintKind::Custom(text),
        }
    }
}

/// `MATCH`/`CREATE` clause per pattern
pub fn pattern_clauses(kind: ClauseKind, patterns: &[Pattern]) -> Vec<Clause> {
    let verb = match kind {
        ClauseKind::Create => "CREATE",
        _ => "MATCH",
    };
    patterns
        .iter()
        .map(|pattern| Clause::new(kind, format!("{} {}", verb, pattern)))
        .collect()
}

/// Implicit matches followed by one `DELETE` / `DETACH DELETE` clause.
///
/// Nodes and raw fragments get a `MATCH` so deleting by partial properties
/// works. Relationships are only listed for deletion and must already be
/// bound by an earlier clause. The DELETE clause is always emitted; with no
/// bound alias it carries only the verb.
pub fn delete_clauses(patterns: &[Pattern], detach: bool) -> Vec<Clause> {
    let mut clauses: Vec<Clause> = patterns
        .iter()
        .filter(|p| !matches!(p, Pattern::Relationship { .. }))
        .map(|pattern| Clause::new(ClauseKind::Match, format!("MATCH {}", pattern)))
        .collect();

    let aliases: Vec<&str> = patterns.iter().filter_map(Pattern::alias).collect();
    let verb = if detach { "DETACH DELETE" } else { "DELETE" };
    let text = if aliases.is_empty() {
        verb.to_string()
    } else {
        format!("{} {}", verb, aliases.join(","))
    };
    clauses.push(Clause::new(ClauseKind::Delete, text));
    clauses
}

/// `WHERE <text>` verbatim
pub fn where_clause(condition: &str) -> Clause {
    Clause::new(ClauseKind::Where, format!("WHERE {}", condition))
}

/// `SET path = value, ...`; `None` for an empty map
pub fn set_clause(assignments: &PropertyMap) -> Option<Clause> {
    if assignments.is_empty() {
        return None;
    }
    let rendered: Vec<String> = assignments
        .iter()
        .map(|(path, value)| format!("{} = {}", path, value))
        .collect();
    Some(Clause::new(
        ClauseKind::Set,
        format!("SET {}", rendered.join(", ")),
    ))
}

/// `RETURN a,b` with a bare comma
pub fn return_clause<I, S>(fields: I) -> Clause
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let fields: Vec<String> = fields.into_iter().map(|f| f.as_ref().to_string()).collect();
    Clause::new(ClauseKind::Return, format!("RETURN {}", fields.join(",")))
}

/// Variable-length outgoing traversal ending in `x`
pub fn traverse_clause(alias: &str, rel_type: &str, depth: i64) -> Clause {
    Clause::new(
        ClauseKind::Traverse,
        format!("MATCH ({})-[:{}*1..{}]->(x)", alias, rel_type, depth),
    )
}

/// Index declaration; a unique index is declared as a uniqueness constraint
pub fn index_clause(label: &str, property: &str, unique: bool) -> Clause {
    if unique {
        return constraint_clause(label, property, &ConstraintKind::Unique);
    }
    Clause::new(
        ClauseKind::Index,
        format!("CREATE INDEX FOR (n:{}) ON (n.{})", label, property),
    )
}

pub fn constraint_clause(label: &str, property: &str, kind: &ConstraintKind) -> Clause {
    Clause::new(
        ClauseKind::Constraint,
        format!(
            "CREATE CONSTRAINT ON (n:{}) ASSERT n.{} IS {}",
            label, property, kind
        ),
    )
}
