//! End-to-end query building through the public API.

use cypher_builder::{
    AliasAllocator, BuilderConfig, ConstraintKind, PathSpec, PropertyMap, QueryBuilder, Script,
};
use insta::assert_snapshot;
use serde_json::{json, Value};
use serial_test::serial;
use test_case::test_case;

fn spec(value: Value) -> PathSpec {
    PathSpec::from_json(value).unwrap()
}

fn props(value: Value) -> PropertyMap {
    PropertyMap::from_json(value).unwrap()
}

/// Builder on the process-wide counter, reset so generated aliases start at p0
fn global_builder() -> QueryBuilder {
    AliasAllocator::global().reset();
    QueryBuilder::new()
}

// =========================================================================
// Matching
// =========================================================================

#[test]
fn test_simple_match_node() {
    let query = QueryBuilder::new()
        .match_(spec(json!({"Person#p": {"name": "Alice"}})))
        .return_(["p"]);

    assert_snapshot!(query.cypher(), @r"
    MATCH (p:Person {name: 'Alice'})
    RETURN p
    ");
}

#[test]
#[serial]
fn test_auto_alias_node() {
    let query = global_builder()
        .match_(spec(json!({"Person": {"name": "Bob"}})))
        .return_(["p0"]);

    let cypher = query.cypher();
    assert!(cypher.contains("(p0:Person"));
    assert!(cypher.contains("Bob"));
}

#[test]
#[serial]
fn test_auto_aliases_continue_across_queries() {
    let first = global_builder().create(spec(json!([{"Person": {}}, {"Person": {}}])));
    let second = QueryBuilder::new().create(spec(json!({"City": {}})));

    assert_eq!(first.cypher(), "CREATE (p0:Person)\nCREATE (p1:Person)");
    assert_eq!(second.cypher(), "CREATE (p2:City)");
}

#[test]
fn test_multiple_paths() {
    let query = QueryBuilder::new()
        .match_(spec(json!([
            {"Person#p": {"name": "Alice"}},
            {"Person#q": {"name": "Bob"}},
            {"KNOWS#k": {"from": "p", "to": "q"}}
        ])))
        .return_(["p,q"]);

    assert_snapshot!(query.cypher(), @r"
    MATCH (p:Person {name: 'Alice'})
    MATCH (q:Person {name: 'Bob'})
    MATCH (p)-[k:KNOWS]->(q)
    RETURN p,q
    ");
}

#[test]
fn test_where_string_filter() {
    let query = QueryBuilder::new()
        .match_(spec(json!({"Person#p": {}})))
        .where_("_.age > 30 AND NOT _.name='Bob'")
        .return_(["p"]);

    assert!(query
        .cypher()
        .contains("WHERE _.age > 30 AND NOT _.name='Bob'"));
}

// =========================================================================
// Creation
// =========================================================================

#[test]
fn test_create_node_and_relationship() {
    let query = QueryBuilder::new().create(spec(json!([
        {"Person#p": {"name": "Alice"}},
        {"Person#q": {"name": "Bob"}},
        {"KNOWS#k": {"from": "p", "to": "q", "since": 2020}}
    ])));

    let cypher = query.cypher();
    assert!(cypher.contains("CREATE (p:Person"));
    assert!(cypher.contains("CREATE (q:Person"));
    assert!(cypher.contains("CREATE (p)-[k:KNOWS"));
    assert!(cypher.contains("since: 2020"));
}

#[test]
fn test_edge_case_empty_props() {
    let cypher = QueryBuilder::new()
        .create(spec(json!([{"Person#p": {}}])))
        .cypher();

    assert!(cypher.contains("(p:Person)"));
    assert!(!cypher.contains("(p:Person {})"));
}

#[test]
fn test_edge_case_reserved_keywords() {
    let cypher = QueryBuilder::new()
        .create(spec(json!([{"Match#m": {"type": "Special"}}])))
        .cypher();

    assert!(cypher.contains("(m:Match"));
    assert!(cypher.contains("type: 'Special'"));
}

#[test_case(json!("José"), "name: 'José'" ; "non ascii")]
#[test_case(json!(""), "name: ''" ; "empty string")]
#[test_case(json!(null), "name: null" ; "null")]
#[test_case(json!([1, 2, 3]), "name: [1, 2, 3]" ; "list")]
#[test_case(json!({"a": 1}), "name: {'a': 1}" ; "map")]
#[test_case(json!(1.5), "name: 1.5" ; "float")]
#[test_case(json!(true), "name: true" ; "bool")]
fn test_property_values_in_create(value: Value, expected: &str) {
    let cypher = QueryBuilder::new()
        .create(spec(json!({"Person#p": {"name": value}})))
        .cypher();

    assert_eq!(cypher, format!("CREATE (p:Person {{{}}})", expected));
}

// =========================================================================
// Deletion and updates
// =========================================================================

#[test]
fn test_delete_node_with_detach() {
    let cypher = QueryBuilder::new()
        .delete(spec(json!({"Person#p": {"name": "Alice"}})), true)
        .cypher();

    assert_snapshot!(cypher, @r"
    MATCH (p:Person {name: 'Alice'})
    DETACH DELETE p
    ");
}

#[test]
fn test_delete_several_without_detach() {
    let cypher = QueryBuilder::new()
        .delete(spec(json!([{"Person#p": {}}, {"Person#q": {}}])), false)
        .cypher();

    assert!(cypher.ends_with("DELETE p,q"));
    assert!(!cypher.contains("DETACH"));
}

#[test]
fn test_delete_raw_fragment_keeps_delete_verb() {
    let cypher = QueryBuilder::with_allocator(AliasAllocator::new())
        .delete("(n:Temp)", true)
        .cypher();

    assert_snapshot!(cypher, @r"
    MATCH (n:Temp)
    DETACH DELETE
    ");
}

#[test]
fn test_empty_explicit_alias_is_generated() {
    let cypher = QueryBuilder::with_allocator(AliasAllocator::new())
        .match_(spec(json!({"Person#": {}})))
        .cypher();

    assert_eq!(cypher, "MATCH (p0:Person)");
}

#[test]
fn test_bulk_update_set() {
    let cypher = QueryBuilder::new()
        .match_(spec(json!({"Person#p": {"city": "Berlin"}})))
        .set(props(json!({"p.age": 30})))
        .cypher();

    assert_snapshot!(cypher, @r"
    MATCH (p:Person {city: 'Berlin'})
    SET p.age = 30
    ");
}

#[test]
fn test_empty_set_emits_no_clause() {
    let cypher = QueryBuilder::new()
        .match_(spec(json!({"Person#p": {}})))
        .set(PropertyMap::new())
        .cypher();

    assert!(!cypher.contains("SET"));
}

// =========================================================================
// Traversal, indexes and constraints
// =========================================================================

#[test_case(3, "[:KNOWS*1..3]" ; "depth three")]
#[test_case(0, "*1..0" ; "depth zero")]
#[test_case(-5, "*1..-5" ; "negative depth")]
fn test_traverse_depth(depth: i64, expected: &str) {
    let cypher = QueryBuilder::new()
        .traverse("p", "KNOWS", depth)
        .return_(["x.name"])
        .cypher();

    assert!(cypher.contains(expected));
    assert!(cypher.contains("RETURN x.name"));
}

#[test]
fn test_index_and_constraint() {
    let index = QueryBuilder::new().create_index("Person", "email", true);
    assert!(index.cypher().contains("CREATE CONSTRAINT"));

    let constraint = QueryBuilder::new().create_constraint("Person", "email", "UNIQUE");
    assert!(constraint.cypher().contains("IS UNIQUE"));

    let exists = QueryBuilder::new().create_constraint("Person", "email", ConstraintKind::Exists);
    assert!(exists.cypher().contains("IS EXISTS"));
}

#[test]
fn test_plain_index() {
    let cypher = QueryBuilder::new()
        .create_index("Person", "name", false)
        .cypher();

    assert!(cypher.starts_with("CREATE INDEX"));
    assert!(cypher.contains("ON (n.name)"));
    assert!(!cypher.contains("CONSTRAINT"));
}

// =========================================================================
// Scripts and configuration
// =========================================================================

#[test]
fn test_script_matches_chained_calls() {
    let script = Script::from_json_str(
        r#"[
            {"match": [{"Person#p": {"name": "Alice"}}, {"Person#q": {}}]},
            {"where": "q.age > 30"},
            {"set": {"p.friend": true}},
            {"traverse": {"alias": "p", "rel_type": "KNOWS", "depth": 2}},
            {"return": ["p", "x"]}
        ]"#,
    )
    .unwrap();

    let scripted = QueryBuilder::new().apply_script(script);
    let chained = QueryBuilder::new()
        .match_(spec(json!([{"Person#p": {"name": "Alice"}}, {"Person#q": {}}])))
        .where_("q.age > 30")
        .set(props(json!({"p.friend": true})))
        .traverse("p", "KNOWS", 2)
        .return_(["p", "x"]);

    assert_eq!(scripted.cypher(), chained.cypher());
}

#[test]
fn test_configured_builder() {
    let config = BuilderConfig::from_toml_str(
        r#"
        alias_prefix = "v"
        clause_separator = " "
        "#,
    )
    .unwrap();

    let query = QueryBuilder::with_config_and_allocator(&config, AliasAllocator::new())
        .match_(spec(json!({"Person": {}})))
        .return_(["v0"]);

    assert_eq!(query.cypher(), "MATCH (v0:Person) RETURN v0");
}
