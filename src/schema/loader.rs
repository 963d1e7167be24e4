//! YAML loading for validation inputs.
//!
//! Provides [`load_value`], [`load_schema`], and [`load_options`], which
//! deserialize a single YAML document via `serde-saphyr`. Declarative
//! schemas cover type tags, the `optional` marker, combinations
//! (sequences), and nested shapes (mappings); predicates, unions, and
//! dynamic schemas are built in code and can be combined with loaded ones.

use serde::de::DeserializeOwned;

use super::error::SchemaError;
use super::options::ValidationOptions;
use super::types::Schema;
use super::value::Value;

/// Loads a target value from a YAML document.
///
/// # Errors
///
/// Returns [`SchemaError::Deserialize`] if the YAML is malformed.
///
/// # Examples
///
///     use shapecheck::schema::{Value, load_value};
///
///     let value = load_value("title: report\ncount: 3\n").unwrap();
///     assert_eq!(value.get("count"), Some(&Value::Integer(3)));
pub fn load_value(input: &str) -> Result<Value, SchemaError> {
    from_yaml(input)
}

/// Loads a declarative schema from a YAML document.
///
/// Unknown tag names load as [`Schema::UnknownTag`] nodes that reject
/// every value with `type-mismatch`. Scalar literals load as
/// [`Schema::Unsupported`] nodes and surface later as `parsing-error`
/// records, so one bad node never hides the rest of the schema.
///
/// # Errors
///
/// Returns [`SchemaError::Deserialize`] if the YAML is malformed.
pub fn load_schema(input: &str) -> Result<Schema, SchemaError> {
    from_yaml(input)
}

/// Loads validation options from a YAML document.
///
/// Omitted fields keep their defaults; unknown fields are rejected.
///
/// # Errors
///
/// Returns [`SchemaError::Deserialize`] if the YAML is malformed or names
/// an unknown option.
pub fn load_options(input: &str) -> Result<ValidationOptions, SchemaError> {
    from_yaml(input)
}

fn from_yaml<T: DeserializeOwned>(input: &str) -> Result<T, SchemaError> {
    serde_saphyr::from_str(input).map_err(|error| SchemaError::Deserialize {
        message: first_line(&error.to_string()),
    })
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or(message).to_owned()
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
