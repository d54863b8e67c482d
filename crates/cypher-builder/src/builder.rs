//! Fluent query builder.
//!
//! Verbs consume and return the builder, appending rendered clauses in call
//! order. Rendering only reads the accumulated clauses, so it can be called
//! any number of times and chaining can continue afterwards.

use crate::alias::AliasAllocator;
use crate::clause::{self, Clause, ClauseKind, ConstraintKind};
use crate::config::BuilderConfig;
use crate::pattern::{PathSpec, PatternParser};
use crate::script::{Operation, Script};
use crate::value::PropertyMap;
use std::fmt;
use tracing::debug;

/// Accumulates clauses and renders them into one query.
///
/// ```
/// use cypher_builder::{AliasAllocator, EntitySpec, PropertyMap, QueryBuilder};
///
/// let query = QueryBuilder::with_allocator(AliasAllocator::new())
///     .match_(EntitySpec::new("Person#p", PropertyMap::from([("name", "Alice")])))
///     .set(PropertyMap::from([("p.age", 30)]))
///     .return_(["p"]);
///
/// assert_eq!(
///     query.cypher(),
///     "MATCH (p:Person {name: 'Alice'})\nSET p.age = 30\nRETURN p"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    clauses: Vec<Clause>,
    aliases: AliasAllocator,
    separator: String,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder {
    /// Builder on the process-wide alias counter with default settings
    pub fn new() -> Self {
        Self::with_allocator(AliasAllocator::global())
    }

    pub fn with_allocator(aliases: AliasAllocator) -> Self {
        Self {
            clauses: Vec::new(),
            aliases,
            separator: BuilderConfig::default().clause_separator,
        }
    }

    /// Builder on the process-wide counter using the configured prefix and separator
    pub fn from_config(config: &BuilderConfig) -> Self {
        Self::with_config_and_allocator(config, AliasAllocator::global())
    }

    pub fn with_config_and_allocator(config: &BuilderConfig, aliases: AliasAllocator) -> Self {
        Self {
            clauses: Vec::new(),
            aliases: aliases.with_prefix(&config.alias_prefix),
            separator: config.clause_separator.clone(),
        }
    }

    pub fn aliases(&self) -> &AliasAllocator {
        &self.aliases
    }

    /// `MATCH` clause per pattern in the spec
    pub fn match_(self, spec: impl Into<PathSpec>) -> Self {
        self.pattern_verb(ClauseKind::Match, spec.into())
    }

    /// `CREATE` clause per pattern in the spec
    pub fn create(self, spec: impl Into<PathSpec>) -> Self {
        self.pattern_verb(ClauseKind::Create, spec.into())
    }

    fn pattern_verb(self, kind: ClauseKind, spec: PathSpec) -> Self {
        let patterns = PatternParser::new(&self.aliases).parse(&spec);
        let clauses = clause::pattern_clauses(kind, &patterns);
        self.push(kind, clauses)
    }

    /// Match the spec's nodes, then delete every bound alias
    pub fn delete(self, spec: impl Into<PathSpec>, detach: bool) -> Self {
        let patterns = PatternParser::new(&self.aliases).parse(&spec.into());
        let clauses = clause::delete_clauses(&patterns, detach);
        self.push(ClauseKind::Delete, clauses)
    }

    /// `WHERE` with the condition text untouched
    pub fn where_(self, condition: impl AsRef<str>) -> Self {
        let clause = clause::where_clause(condition.as_ref());
        self.push(ClauseKind::Where, vec![clause])
    }

    /// `SET` for pre-qualified property paths; an empty map adds nothing
    pub fn set(self, assignments: impl Into<PropertyMap>) -> Self {
        let clauses = clause::set_clause(&assignments.into())
            .into_iter()
            .collect();
        self.push(ClauseKind::Set, clauses)
    }

    pub fn return_<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let clause = clause::return_clause(fields);
        self.push(ClauseKind::Return, vec![clause])
    }

    /// Follow `rel_type` from `alias` for 1 to `depth` hops, binding `x`
    pub fn traverse(self, alias: impl AsRef<str>, rel_type: impl AsRef<str>, depth: i64) -> Self {
        let clause = clause::traverse_clause(alias.as_ref(), rel_type.as_ref(), depth);
        self.push(ClauseKind::Traverse, vec![clause])
    }

    /// Index on a property. With `unique`, a uniqueness constraint is emitted
    /// instead of an index.
    pub fn create_index(
        self,
        label: impl AsRef<str>,
        property: impl AsRef<str>,
        unique: bool,
    ) -> Self {
        let clause = clause::index_clause(label.as_ref(), property.as_ref(), unique);
        self.push(ClauseKind::Index, vec![clause])
    }

    pub fn create_constraint(
        self,
        label: impl AsRef<str>,
        property: impl AsRef<str>,
        kind: impl Into<ConstraintKind>,
    ) -> Self {
        let clause = clause::constraint_clause(label.as_ref(), property.as_ref(), &kind.into());
        self.push(ClauseKind::Constraint, vec![clause])
    }

    /// Apply one scripted operation
    pub fn apply(self, operation: Operation) -> Self {
        match operation {
            Operation::Match(spec) => self.match_(spec),
            Operation::Create(spec) => self.create(spec),
            Operation::Delete { spec, detach } => self.delete(spec, detach),
            Operation::Where(condition) => self.where_(condition),
            Operation::Set(assignments) => self.set(assignments),
            Operation::Return(fields) => self.return_(fields),
            Operation::Traverse {
                alias,
                rel_type,
                depth,
            } => self.traverse(alias, rel_type, depth),
            Operation::CreateIndex {
                label,
                property,
                unique,
            } => self.create_index(label, property, unique),
            Operation::CreateConstraint {
                label,
                property,
                kind,
            } => self.create_constraint(label, property, kind),
        }
    }

    /// Apply every operation of a script in order
    pub fn apply_script(self, script: Script) -> Self {
        script.into_iter().fold(self, QueryBuilder::apply)
    }

    fn push(mut self, verb: ClauseKind, clauses: Vec<Clause>) -> Self {
        debug!(verb = verb.as_str(), appended = clauses.len(), "Rendered clauses");
        self.clauses.extend(clauses);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Complete query text, clauses joined in call order
    pub fn cypher(&self) -> String {
        let parts: Vec<&str> = self.clauses.iter().map(Clause::as_str).collect();
        parts.join(&self.separator)
    }

    /// Same as [`cypher`](Self::cypher)
    pub fn render(&self) -> String {
        self.cypher()
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cypher())
    }
}
