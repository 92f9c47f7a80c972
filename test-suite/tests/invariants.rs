//! Observable guarantees of the parse pipeline.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use test_suite::v;
use veris::prelude::*;
use veris::{IssueCode, Shape};

#[test]
fn modifiers_never_mutate_originals() {
    let base = string();
    let _with_check = base.min(10);
    let _with_flag = base.optional();
    let _with_default = base.default_value("x");

    // The original still accepts what it accepted before.
    assert_eq!(base.parse("ok").unwrap(), "ok");
}

#[test]
fn child_issue_paths_are_prefixed_by_position() {
    let schema = object(Shape::new().field("items", array(int())));
    let error = schema
        .parse(v(serde_json::json!({"items": [1, "x", 2, "y"]})))
        .unwrap_err();

    for issue in error.issues() {
        assert!(issue.path.to_string().starts_with("items["));
    }
    assert_eq!(error.len(), 2);
}

#[test]
fn default_wins_over_prefault_and_skips_its_side_effects() {
    static PREFAULT_CALLS: AtomicUsize = AtomicUsize::new(0);

    let schema = int()
        .prefault_fn(|| {
            PREFAULT_CALLS.fetch_add(1, Ordering::SeqCst);
            Value::I64(1)
        })
        .default_value(7i64);

    assert_eq!(schema.parse(Value::Null).unwrap(), 7);
    assert_eq!(PREFAULT_CALLS.load(Ordering::SeqCst), 0);
}

#[test]
fn prefault_fires_only_for_null_input() {
    let calls = Arc::new(AtomicUsize::new(0));
    let observed = calls.clone();
    let schema = int()
        .gte(0)
        .prefault_fn(move || {
            observed.fetch_add(1, Ordering::SeqCst);
            Value::I64(0)
        });

    // Null input consults the prefault, which then validates in full.
    assert_eq!(schema.parse(Value::Null).unwrap(), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Non-null invalid input fails without consulting it.
    assert!(schema.parse("nope").is_err());
    assert!(schema.parse(-1i64).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn prefault_value_undergoes_full_validation() {
    let schema = string().min(5).prefault_value("oops");
    let error = schema.parse(Value::Null).unwrap_err();
    assert_eq!(error.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn default_bypasses_the_schemas_own_checks() {
    let schema = string().min(5).default_value("hi");
    assert_eq!(schema.parse(Value::Null).unwrap(), "hi");
}

#[test]
fn coercion_is_opt_in() {
    assert!(string().parse(123i64).is_err());
    assert_eq!(coercing::string().parse(123i64).unwrap(), "123");

    assert!(int().parse("12").is_err());
    assert_eq!(coercing::int().parse("12").unwrap(), 12);
}

#[test]
fn union_failure_lists_one_group_per_member() {
    let schema = union((string(), int(), boolean()));
    let error = schema.parse(1.5f64).unwrap_err();
    assert_eq!(error.issues()[0].code, IssueCode::InvalidUnion);
    assert_eq!(error.issues()[0].props.union_errors.len(), 3);
}

#[test]
fn check_order_is_observable() {
    let trim_then_min = string().trim().min(3);
    assert!(trim_then_min.parse("  hi ").is_err());

    let min_then_trim = string().min(3).trim();
    assert_eq!(min_then_trim.parse("  hi ").unwrap(), "hi");
}

#[test]
fn optional_and_nilable_differ_on_absence() {
    let schema = object(
        Shape::new()
            .field("opt", string().optional())
            .field("nil", string().nilable()),
    )
    .strict();

    // Optional may be absent; nilable requires an explicit null.
    assert!(schema.parse(v(serde_json::json!({"nil": null}))).is_ok());

    let error = schema.parse(v(serde_json::json!({}))).unwrap_err();
    assert_eq!(error.len(), 1);
    assert_eq!(error.issues()[0].path.to_string(), "nil");

    // And an explicit null is not accepted where only absence is allowed.
    let exact = object(Shape::new().field("opt", string().exact_optional()));
    assert!(exact.parse(v(serde_json::json!({}))).is_ok());
    assert!(exact.parse(v(serde_json::json!({"opt": null}))).is_err());
}

#[test]
fn non_optional_overrides_optionality() {
    let schema = string().optional().non_optional();
    assert!(schema.parse(Value::Null).is_err());
    assert_eq!(schema.parse("x").unwrap(), Some("x".to_string()));
}

#[test]
fn leaves_round_trip_without_checks() {
    assert_eq!(string().parse("abc").unwrap(), "abc");
    assert_eq!(int().parse(-42i64).unwrap(), -42);
    assert_eq!(float64().parse(1.25f64).unwrap(), 1.25);
    assert!(boolean().parse(true).unwrap());
}

#[test]
fn abort_early_stops_at_the_first_issue() {
    let schema = int().gte(10).multiple_of(2);

    let all = schema.parse(7i64).unwrap_err();
    assert_eq!(all.len(), 2);

    let first_only = schema.abort_early().parse(7i64).unwrap_err();
    assert_eq!(first_only.len(), 1);
    assert_eq!(first_only.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn error_overrides_apply_to_the_nearest_schema() {
    let schema = object(Shape::new().field("name", string().error("name must be text")))
        .error("outer override");

    let error = schema
        .parse(v(serde_json::json!({"name": 1})))
        .unwrap_err();
    assert_eq!(error.issues()[0].message, "name must be text");

    let error = schema.parse(v(serde_json::json!([]))).unwrap_err();
    assert_eq!(error.issues()[0].message, "outer override");
}

#[test]
fn strict_parse_accepts_typed_input() {
    assert_eq!(string().strict_parse("abc".to_string()).unwrap(), "abc");
    assert_eq!(int().strict_parse(5).unwrap(), 5);
    let error = string().min(5).strict_parse("abc".to_string()).unwrap_err();
    assert_eq!(error.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn parse_any_returns_dynamic_output() {
    let schema = object(Shape::new().field("n", coercing::int()));
    let output = schema.parse_any(v(serde_json::json!({"n": "3"}))).unwrap();
    let Value::Map(map) = output else {
        panic!("expected a map");
    };
    assert_eq!(map.get_str("n"), Some(&Value::I64(3)));
}

#[test]
fn descriptions_are_retrievable() {
    let schema = string().describe("a person's given name");
    assert_eq!(
        schema.description().as_deref(),
        Some("a person's given name")
    );
}
