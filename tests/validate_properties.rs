//! Integration tests for the observable validation properties.
//!
//! Each test pins one behaviour of [`validate`]: completeness, fail-fast,
//! optional properties, path composition, unions, extra properties,
//! null targets, and value-dependent schemas.

use rstest::rstest;
use shapecheck::schema::{
    ErrorKind, Schema, ValidationError, ValidationOptions, Value, any_of, array_of, dynamic,
    optional, validate,
};

fn paths(errors: &[ValidationError]) -> Vec<&str> {
    errors.iter().map(|e| e.path.as_str()).collect()
}

fn kinds(errors: &[ValidationError]) -> Vec<ErrorKind> {
    errors.iter().map(|e| e.kind).collect()
}

// ── Completeness ────────────────────────────────────────────────────

#[test]
fn every_independent_violation_is_reported() {
    let schema = Schema::object([("title", "string"), ("array", "array")]);
    let target = Value::object([("title", Value::from(1337)), ("array", Value::from("x"))]);
    let errors = validate(&target, &schema, &ValidationOptions::default());
    assert_eq!(
        kinds(&errors),
        vec![ErrorKind::TypeMismatch, ErrorKind::TypeMismatch]
    );
    assert_eq!(paths(&errors), vec!["title", "array"]);
}

// ── Fail-fast ───────────────────────────────────────────────────────

#[rstest]
#[case::fail_fast(false, 1)]
#[case::exhaustive(true, 2)]
fn fail_fast_limits_a_constraint_list(#[case] all_errors: bool, #[case] expected: usize) {
    let schema = Schema::object([(
        "a",
        Schema::all([Schema::predicate(|_| false), Schema::predicate(|_| false)]),
    )]);
    let target = Value::object([("a", 1)]);
    let options = ValidationOptions::default().with_all_errors(all_errors);
    let errors = validate(&target, &schema, &options);
    assert_eq!(errors.len(), expected);
    assert!(errors.iter().all(|e| e.path == "a"));
}

// ── Optional ────────────────────────────────────────────────────────

#[test]
fn optional_property_may_be_absent() {
    let schema = Schema::object([("a", Schema::all([Schema::from("number"), optional()]))]);
    let empty = Value::object(Vec::<(&str, Value)>::new());
    let errors = validate(&empty, &schema, &ValidationOptions::default());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn optional_property_is_still_checked_when_present() {
    let schema = Schema::object([("a", Schema::all([Schema::from("number"), optional()]))]);
    let target = Value::object([("a", "x")]);
    let errors = validate(&target, &schema, &ValidationOptions::default());
    assert_eq!(kinds(&errors), vec![ErrorKind::TypeMismatch]);
    assert_eq!(paths(&errors), vec!["a"]);
}

// ── Paths ───────────────────────────────────────────────────────────

#[test]
fn array_element_errors_carry_index() {
    let schema = Schema::object([("a", array_of("number"))]);
    let target = Value::object([(
        "a",
        Value::array([Value::from(1), Value::from("x"), Value::from(3)]),
    )]);
    let errors = validate(&target, &schema, &ValidationOptions::default());
    assert_eq!(paths(&errors), vec!["a[1]"]);
}

#[test]
fn nested_paths_compose_with_dots() {
    let schema = Schema::object([(
        "a",
        Schema::object([("b", Schema::object([("c", "number")]))]),
    )]);
    let target = Value::object([(
        "a",
        Value::object([("b", Value::object([("c", "x")]))]),
    )]);
    let errors = validate(&target, &schema, &ValidationOptions::default());
    assert_eq!(paths(&errors), vec!["a.b.c"]);
}

#[test]
fn root_array_paths_start_with_index() {
    let schema = array_of(Schema::object([("id", "number")]));
    let target = Value::array([Value::object([("id", 1)]), Value::object([("id", "2")])]);
    let errors = validate(&target, &schema, &ValidationOptions::default());
    assert_eq!(paths(&errors), vec!["[1].id"]);
}

// ── Unions ──────────────────────────────────────────────────────────

fn zero_or_boolean() -> Schema {
    any_of([
        Schema::from("boolean"),
        Schema::predicate(|v| v.as_i64() == Some(0)),
    ])
}

#[test]
fn union_accepts_value_matching_a_later_branch() {
    let errors = validate(&Value::from(0), &zero_or_boolean(), &ValidationOptions::default());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn union_failure_lists_every_branch() {
    let errors = validate(&Value::from("x"), &zero_or_boolean(), &ValidationOptions::default());
    let [error] = errors.as_slice() else {
        panic!("expected one error, got {errors:?}");
    };
    assert_eq!(error.kind, ErrorKind::AnyFailed);
    assert_eq!(error.path, "");
    let branches: Vec<usize> = error.branches().iter().map(|r| r.branch).collect();
    assert_eq!(branches, vec![0, 1]);
    let branch_paths: Vec<&str> = error
        .branches()
        .iter()
        .flat_map(|r| r.errors.iter().map(|e| e.path.as_str()))
        .collect();
    assert_eq!(branch_paths, vec!["<any#0>", "<any#1>"]);
}

#[test]
fn union_of_string_forms_parses_numbers() {
    let parseable = any_of([
        Schema::from("number"),
        Schema::all([
            Schema::from("string"),
            Schema::predicate(|v| v.as_str().is_some_and(|s| s.parse::<i64>().is_ok())),
        ]),
    ]);
    let options = ValidationOptions::default();
    assert!(validate(&Value::from("7"), &parseable, &options).is_empty());
    assert!(validate(&Value::from(7), &parseable, &options).is_empty());
    assert_eq!(validate(&Value::from("seven"), &parseable, &options).len(), 1);
}

// ── Extra properties ────────────────────────────────────────────────

#[rstest]
#[case::strict(false, vec!["b"])]
#[case::permissive(true, vec![])]
fn extra_properties_depend_on_options(#[case] allow: bool, #[case] expected: Vec<&str>) {
    let schema = Schema::object([("a", "number")]);
    let target = Value::object([("a", 1), ("b", 2)]);
    let options = ValidationOptions::default().with_extra_properties(allow);
    let errors = validate(&target, &schema, &options);
    assert_eq!(paths(&errors), expected);
    assert!(errors.iter().all(|e| e.kind == ErrorKind::ExtraProperty));
}

// ── Null and scalar targets ─────────────────────────────────────────

#[rstest]
#[case::object_tag(Schema::from("object"), ErrorKind::TypeMismatch)]
#[case::array_tag(Schema::from("array"), ErrorKind::TypeMismatch)]
#[case::nested(Schema::object([("a", "number")]), ErrorKind::ObjectExpected)]
#[case::elements(array_of("number"), ErrorKind::NotArray)]
fn null_target_yields_one_record(#[case] schema: Schema, #[case] kind: ErrorKind) {
    let errors = validate(&Value::Null, &schema, &ValidationOptions::default());
    assert_eq!(kinds(&errors), vec![kind]);
}

#[rstest]
#[case::matching(Value::from("miles"), 0)]
#[case::mismatching(Value::from(7), 1)]
fn scalar_targets_are_validated(#[case] target: Value, #[case] expected: usize) {
    let errors = validate(&target, &Schema::from("string"), &ValidationOptions::default());
    assert_eq!(errors.len(), expected);
}

#[test]
fn null_schema_yields_one_parsing_error() {
    let target = Value::object([("a", 1)]);
    let errors = validate(&target, &Schema::Null, &ValidationOptions::default());
    assert_eq!(kinds(&errors), vec![ErrorKind::ParsingError]);
}

// ── Dynamic ─────────────────────────────────────────────────────────

fn by_type() -> Schema {
    dynamic(|v: &Value| {
        if v.get("type").and_then(Value::as_i64) == Some(0) {
            Schema::object([("zero", "string")])
        } else {
            Schema::object([("one", "number")])
        }
    })
}

#[test]
fn dynamic_schema_follows_the_value() {
    let target = Value::object([("type", Value::from(0)), ("zero", Value::from("z"))]);
    let errors = validate(&target, &by_type(), &ValidationOptions::default());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn dynamic_schema_reports_against_resolved_shape() {
    let target = Value::object([("type", Value::from(1)), ("one", Value::from("n"))]);
    let errors = validate(&target, &by_type(), &ValidationOptions::default());
    assert_eq!(kinds(&errors), vec![ErrorKind::TypeMismatch]);
    assert_eq!(paths(&errors), vec!["one"]);
}

// ── Whole-object predicates ─────────────────────────────────────────

#[test]
fn whole_object_predicate_combines_with_shape() {
    let schema = Schema::all([
        Schema::object([("min", "number"), ("max", "number")]),
        Schema::predicate(|v| {
            let min = v.get("min").and_then(Value::as_i64);
            let max = v.get("max").and_then(Value::as_i64);
            min.zip(max).is_some_and(|(lo, hi)| lo <= hi)
        }),
    ]);
    let options = ValidationOptions::default();
    let ordered = Value::object([("min", 1), ("max", 2)]);
    let reversed = Value::object([("min", 3), ("max", 2)]);
    assert!(validate(&ordered, &schema, &options).is_empty());
    assert_eq!(
        kinds(&validate(&reversed, &schema, &options)),
        vec![ErrorKind::CustomFail]
    );
}

// ── Idempotence ─────────────────────────────────────────────────────

#[test]
fn repeated_validation_is_structurally_equal() {
    let schema = Schema::object([
        ("a", array_of(any_of(["number", "string"]))),
        ("b", Schema::object([("c", "boolean")])),
    ]);
    let target = Value::object([
        ("a", Value::array([Value::from(1), Value::Null])),
        ("b", Value::object([("c", 1)])),
    ]);
    let options = ValidationOptions::default();
    let first = validate(&target, &schema, &options);
    let second = validate(&target, &schema, &options);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn not_a_number_reports_render_identically() {
    let schema = Schema::object([("ratio", "string")]);
    let target = Value::object([("ratio", f64::NAN)]);
    let options = ValidationOptions::default();
    let first: Vec<String> = validate(&target, &schema, &options)
        .iter()
        .map(ValidationError::render)
        .collect();
    let second: Vec<String> = validate(&target, &schema, &options)
        .iter()
        .map(ValidationError::render)
        .collect();
    assert_eq!(
        first,
        vec!["type-mismatch | ratio | Provided type is not allowed by schema | expected string | got NaN"]
    );
    assert_eq!(first, second);
}

#[test]
fn schema_is_shareable_across_threads() {
    let even = Schema::predicate(|v| v.as_i64().is_some_and(|n| n % 2 == 0));
    let schema = std::sync::Arc::new(Schema::object([("n", even)]));
    let handles: Vec<_> = (0..4_i64)
        .map(|i| {
            let shared = std::sync::Arc::clone(&schema);
            std::thread::spawn(move || {
                let target = Value::object([("n", i)]);
                validate(&target, &shared, &ValidationOptions::default()).len()
            })
        })
        .collect();
    let counts: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().unwrap_or(usize::MAX))
        .collect();
    assert_eq!(counts, vec![0, 1, 0, 1]);
}
