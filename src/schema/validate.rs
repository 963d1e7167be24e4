//! Validation entry points.
//!
//! [`validate`] normalizes the root schema, runs the checker from the root
//! path, appends root-level parsing errors after value errors, and strips
//! the separator that root property access leaves at the front of paths.

use super::check::Checker;
use super::diagnostic::{Diagnostic, DiagnosticCode, DiagnosticSink, TracingSink};
use super::normalize::normalize;
use super::options::ValidationOptions;
use super::report::ValidationError;
use super::types::Schema;
use super::value::Value;

/// Validates `target` against `schema`, logging diagnostics via `tracing`.
///
/// Returns every violation found; an empty list means the value satisfies
/// the schema. Validation never fails: malformed schema nodes and faulting
/// predicates are reported as errors in the returned list.
///
/// # Examples
///
///     use shapecheck::schema::{Schema, Value, ValidationOptions, validate};
///
///     let schema = Schema::object([("title", "string"), ("array", "array")]);
///     let target = Value::object([("title", Value::from(1337)), ("array", Value::from("x"))]);
///     let errors = validate(&target, &schema, &ValidationOptions::default());
///     assert_eq!(errors.len(), 2);
#[must_use]
pub fn validate(target: &Value, schema: &Schema, options: &ValidationOptions) -> Vec<ValidationError> {
    validate_with(target, schema, options, &mut TracingSink)
}

/// Validates `target` against `schema`, delivering diagnostics to `sink`.
#[must_use]
pub fn validate_with(
    target: &Value,
    schema: &Schema,
    options: &ValidationOptions,
    sink: &mut dyn DiagnosticSink,
) -> Vec<ValidationError> {
    let mut parse_errors = Vec::new();
    let root = normalize(schema, "", &mut parse_errors);
    if root.is_optional() {
        sink.report(Diagnostic::new(DiagnosticCode::OptionalAtRoot, ""));
    }

    let mut errors = Checker::new(*options, sink).check("", target, &root.constraints);
    errors.append(&mut parse_errors);
    for error in &mut errors {
        error.strip_root_separator();
    }
    errors
}

/// Returns `true` if `target` satisfies `schema`.
#[must_use]
pub fn is_valid(target: &Value, schema: &Schema, options: &ValidationOptions) -> bool {
    validate_with(target, schema, options, &mut TracingSink).is_empty()
}
