//! End-to-end scenarios across the whole surface.

use test_suite::v;
use veris::prelude::*;
use veris::{IssueCode, Shape};

#[test]
fn coerced_string_with_minimum_length() {
    let schema = coercing::string().min(3);

    assert_eq!(schema.parse(123i64).unwrap(), "123");

    let error = schema.parse(12i64).unwrap_err();
    assert_eq!(error.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn strict_object_with_optional_and_default_fields() {
    let schema = object(
        Shape::new()
            .field("a", string().optional())
            .field("b", string().default_value("B")),
    )
    .strict();

    let error = schema.parse(v(serde_json::json!({"a": "x", "c": 1}))).unwrap_err();
    let issue = &error.issues()[0];
    assert_eq!(issue.code, IssueCode::UnrecognizedKeys);
    assert!(issue.path.is_root());
    assert_eq!(issue.props.keys, vec!["c".to_string()]);

    let output = schema.parse(v(serde_json::json!({"a": "x"}))).unwrap();
    assert_eq!(output.get_str("a"), Some(&Value::String("x".to_string())));
    assert_eq!(output.get_str("b"), Some(&Value::String("B".to_string())));
}

#[test]
fn tuple_with_optional_middle_and_rest() {
    let schema = tuple((string(), int().optional(), string().optional())).rest(boolean());

    let output = schema
        .parse(v(serde_json::json!(["s", 1, "t", true, false])))
        .unwrap();
    assert_eq!(output.len(), 5);

    let error = schema.parse(v(serde_json::json!(["s", "x"]))).unwrap_err();
    let issue = &error.issues()[0];
    assert_eq!(issue.code, IssueCode::InvalidType);
    assert_eq!(issue.path.to_string(), "[1]");
}

#[test]
fn discriminated_union_dispatch() {
    let schema = discriminated_union(
        "kind",
        (
            object(Shape::new().field("kind", literal("a")).field("x", int())),
            object(Shape::new().field("kind", literal("b")).field("y", string())),
        ),
    );

    assert!(schema.parse(v(serde_json::json!({"kind": "b", "y": "hi"}))).is_ok());

    let error = schema.parse(v(serde_json::json!({"kind": "c"}))).unwrap_err();
    assert_eq!(
        error.issues()[0].code,
        IssueCode::InvalidUnionDiscriminator
    );
}

#[test]
fn set_with_size_and_element_bounds() {
    let schema = set(int().gte(0)).min(2);

    let output = schema.parse(v(serde_json::json!([1, 1, 2]))).unwrap();
    assert_eq!(output.len(), 2);

    let error = schema.parse(v(serde_json::json!([1]))).unwrap_err();
    assert_eq!(error.issues()[0].code, IssueCode::TooSmall);

    let error = schema.parse(v(serde_json::json!([-1, 2]))).unwrap_err();
    let issue = &error.issues()[0];
    assert_eq!(issue.code, IssueCode::TooSmall);
    assert_eq!(issue.path.to_string(), "{-1}");
}

#[test]
fn transform_then_pipe_into_bounded_int() {
    let schema = string()
        .transform(|value, _ctx| match value {
            Value::String(s) => Value::I64(s.chars().count() as i64),
            other => other,
        })
        .pipe(int().gte(3));

    assert_eq!(schema.parse("hello").unwrap(), 5);

    let error = schema.parse("hi").unwrap_err();
    assert_eq!(error.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn nested_paths_compose_across_composites() {
    let schema = object(
        Shape::new().field(
            "users",
            array(object(
                Shape::new()
                    .field("name", string())
                    .field("tags", set(string()).optional()),
            )),
        ),
    );

    let error = schema
        .parse(v(serde_json::json!({
            "users": [
                {"name": "ada"},
                {"name": 42, "tags": ["x", 3]}
            ]
        })))
        .unwrap_err();

    let paths: Vec<String> = error
        .issues()
        .iter()
        .map(|issue| issue.path.to_string())
        .collect();
    assert!(paths.contains(&"users[1].name".to_string()));
    assert!(paths.contains(&"users[1].tags{3}".to_string()));
}

#[test]
fn record_and_keyof_round_trip() {
    let settings = object(
        Shape::new()
            .field("theme", string())
            .field("fontSize", int()),
    );
    let keys = settings.keyof();
    assert!(keys.parse("theme").is_ok());
    assert!(keys.parse("margin").is_err());

    let counters = record(string().min(1), int().gte(0));
    assert!(counters.parse(v(serde_json::json!({"a": 1, "b": 0}))).is_ok());
    assert!(counters.parse(v(serde_json::json!({"a": -1}))).is_err());
}

#[test]
fn intersection_merges_object_outputs() {
    let named = object(Shape::new().field("name", string()));
    let aged = object(Shape::new().field("age", int()));
    let schema = intersection(named.passthrough(), aged.passthrough());

    let output = schema
        .parse(v(serde_json::json!({"name": "ada", "age": 36})))
        .unwrap();
    let Value::Map(map) = output else {
        panic!("expected a map");
    };
    assert_eq!(map.len(), 2);
}

#[test]
fn must_parse_panics_with_the_aggregate_error() {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        string().must_parse(1i64)
    }));
    assert!(result.is_err());
}
