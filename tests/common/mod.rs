//! Shared test helpers for integration tests.

use shapecheck::schema::{Schema, Value, array_of, load_value, optional};

/// Loads a fixture file from the `tests/fixtures/` directory.
///
/// # Panics
///
/// Panics if the file cannot be read.
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{name}"))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

/// Loads and parses a YAML value fixture.
///
/// # Panics
///
/// Panics if the file cannot be read or parsed.
pub fn load_value_fixture(name: &str) -> Value {
    load_value(&load_fixture(name)).unwrap_or_else(|e| panic!("failed to parse fixture {name}: {e}"))
}

/// Splits a phrase on single spaces and counts the words.
fn word_count(phrase: &str) -> i64 {
    i64::try_from(phrase.split(' ').count()).unwrap_or(i64::MAX)
}

/// Builds the catalogue schema shared by the fixture and snapshot tests.
///
/// It exercises every schema shape: tags, combinations, predicates,
/// nested objects, array elements (including nested arrays), a panicking
/// predicate, and an optional property.
pub fn catalogue_schema() -> Schema {
    Schema::object([
        ("title", Schema::from("string")),
        (
            "array",
            Schema::all([
                array_of("number"),
                Schema::predicate(|v| v.as_array().is_some_and(|items| items.len() > 1)),
            ]),
        ),
        (
            "arrayOfObjs",
            array_of(Schema::object([("id", "number"), ("name", "string")])),
        ),
        ("notArray", array_of("string")),
        ("arrayOof", array_of(array_of("number"))),
        (
            "positiveArray",
            array_of(Schema::predicate(|v| v.as_f64().is_some_and(|n| n > 0.0))),
        ),
        (
            "nested",
            Schema::object([
                (
                    "parseableNumber",
                    Schema::predicate(|v| v.as_str().is_some_and(|s| s.parse::<i64>().is_ok())),
                ),
                (
                    "anotherNest",
                    Schema::all([
                        Schema::object([("phrase", "string"), ("wordCount", "number")]),
                        Schema::predicate(|v| {
                            let phrase = v.get("phrase").and_then(Value::as_str);
                            let count = v.get("wordCount").and_then(Value::as_i64);
                            phrase.map(word_count) == count
                        }),
                    ]),
                ),
                ("missing", Schema::all(Vec::<Schema>::new())),
            ]),
        ),
        (
            "invalidValidator",
            Schema::predicate(|_| panic!("cannot read properties of null")),
        ),
        ("optional", Schema::all([Schema::from("number"), optional()])),
    ])
}
