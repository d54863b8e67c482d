//! Serialized verb calls.
//!
//! A script is a JSON array of externally tagged operations, replayed onto a
//! [`QueryBuilder`](crate::QueryBuilder) in order:
//!
//! ```json
//! [
//!   {"match": {"Person#p": {"name": "Alice"}}},
//!   {"set": {"p.age": 31}},
//!   {"return": ["p"]}
//! ]
//! ```

use crate::clause::ConstraintKind;
use crate::error::Result;
use crate::pattern::PathSpec;
use crate::value::PropertyMap;
use serde::Deserialize;

/// One builder verb with its arguments
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Match(PathSpec),
    Create(PathSpec),
    Delete {
        spec: PathSpec,
        #[serde(default)]
        detach: bool,
    },
    Where(String),
    Set(PropertyMap),
    Return(Vec<String>),
    Traverse {
        alias: String,
        rel_type: String,
        depth: i64,
    },
    CreateIndex {
        label: String,
        property: String,
        #[serde(default)]
        unique: bool,
    },
    CreateConstraint {
        label: String,
        property: String,
        #[serde(rename = "type", default)]
        kind: ConstraintKind,
    },
}

/// Ordered list of operations
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Script {
    operations: Vec<Operation>,
}

impl Script {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl From<Vec<Operation>> for Script {
    fn from(operations: Vec<Operation>) -> Self {
        Self { operations }
    }
}

impl IntoIterator for Script {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pattern::EntitySpec;

    #[test]
    fn test_parse_every_operation() {
        let script = Script::from_json_str(
            r#"[
                {"match": {"Person#p": {"name": "Alice"}}},
                {"create": "(x:Tmp)"},
                {"delete": {"spec": {"Person#q": {}}, "detach": true}},
                {"where": "_.age > 30"},
                {"set": {"p.age": 31}},
                {"return": ["p", "q"]},
                {"traverse": {"alias": "p", "rel_type": "KNOWS", "depth": 2}},
                {"create_index": {"label": "Person", "property": "name"}},
                {"create_constraint": {"label": "Person", "property": "email", "type": "EXISTS"}}
            ]"#,
        )
        .unwrap();

        assert_eq!(script.len(), 9);
        let ops = script.operations();
        assert_eq!(
            ops[0],
            Operation::Match(PathSpec::from(EntitySpec::new(
                "Person#p",
                PropertyMap::from([("name", "Alice")])
            )))
        );
        assert_eq!(ops[1], Operation::Create(PathSpec::raw("(x:Tmp)")));
        assert!(matches!(ops[2], Operation::Delete { detach: true, .. }));
        assert_eq!(ops[3], Operation::Where("_.age > 30".to_string()));
        assert!(matches!(ops[7], Operation::CreateIndex { unique: false, .. }));
        assert!(matches!(
            ops[8],
            Operation::CreateConstraint {
                kind: ConstraintKind::Exists,
                ..
            }
        ));
    }

    #[test]
    fn test_defaults() {
        let script = Script::from_json_str(
            r#"[
                {"delete": {"spec": {"Person#p": {}}}},
                {"create_constraint": {"label": "Person", "property": "email"}}
            ]"#,
        )
        .unwrap();

        assert!(matches!(
            script.operations()[0],
            Operation::Delete { detach: false, .. }
        ));
        assert!(matches!(
            script.operations()[1],
            Operation::CreateConstraint {
                kind: ConstraintKind::Unique,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_spec_is_a_script_error() {
        let result = Script::from_json_str(r#"[{"match": 42}]"#);
        assert!(matches!(result, Err(Error::Script(_))));

        let result = Script::from_json_str(r##"[{"match": {"#p": {}}}]"##);
        assert!(matches!(result, Err(Error::Script(_))));
    }

    #[test]
    fn test_unknown_operation() {
        let result = Script::from_json_str(r#"[{"merge": {}}]"#);
        assert!(matches!(result, Err(Error::Script(_))));
    }

    #[test]
    fn test_empty_script() {
        let script = Script::from_json_str("[]").unwrap();
        assert!(script.is_empty());
    }
}
