//! Recursive value checking against normalized constraints.
//!
//! The checker walks a [`Value`] against a constraint list in declared
//! order, descending into nested, array, union, and dynamic branches by
//! normalizing their schemas on demand. Every failure becomes a
//! path-tagged [`ValidationError`]; nothing raised by user callbacks
//! escapes a check.

use indexmap::IndexMap;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::constraint::{Check, Constraint, Normalized};
use super::diagnostic::{Diagnostic, DiagnosticCode, DiagnosticSink};
use super::normalize::normalize;
use super::options::ValidationOptions;
use super::report::{BranchReport, ErrorKind, Expected, Got, ValidationError};
use super::types::{Resolver, Schema};
use super::value::Value;

/// Fallback fault description for panics without a string payload.
const OPAQUE_PANIC: &str = "callback panicked";

/// Walks values against constraints, reporting diagnostics as it goes.
pub(crate) struct Checker<'a> {
    options: ValidationOptions,
    diagnostics: &'a mut dyn DiagnosticSink,
}

impl<'a> Checker<'a> {
    pub(crate) const fn new(
        options: ValidationOptions,
        diagnostics: &'a mut dyn DiagnosticSink,
    ) -> Self {
        Self {
            options,
            diagnostics,
        }
    }

    /// Checks `value` against `constraints` and returns every violation.
    ///
    /// With `all_errors` off, the list stops at the first constraint that
    /// left an error behind; errors already collected are kept.
    pub(crate) fn check(
        &mut self,
        path: &str,
        value: &Value,
        constraints: &[Constraint<'_>],
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for constraint in constraints {
            match *constraint {
                Constraint::Check { test, failure } => {
                    check_direct(path, value, test, failure, &mut errors);
                }
                Constraint::Nested(properties) => {
                    self.check_nested(path, value, properties, &mut errors);
                }
                Constraint::ArrayOf(element) => {
                    self.check_elements(path, value, element, &mut errors);
                }
                Constraint::AnyOf(branches) => {
                    self.check_union(path, value, branches, &mut errors);
                }
                Constraint::Dynamic(resolver) => {
                    self.check_dynamic(path, value, resolver, &mut errors);
                }
            }

            if !self.options.all_errors && !errors.is_empty() {
                break;
            }
        }
        errors
    }

    fn check_nested(
        &mut self,
        path: &str,
        value: &Value,
        properties: &IndexMap<String, Schema>,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(entries) = value.as_object() else {
            errors.push(
                ValidationError::new(path, ErrorKind::ObjectExpected)
                    .expected(Expected::Object)
                    .got(Got::Value(value.clone())),
            );
            return;
        };

        for (key, schema) in properties {
            let child = format!("{path}.{key}");
            let normalized = normalize(schema, &child, errors);
            match entries.get(key) {
                Some(property) => {
                    let found = self.check(&child, property, &normalized.constraints);
                    errors.extend(found);
                }
                None if normalized.is_optional() => {}
                None => errors.push(ValidationError::new(child, ErrorKind::NoProperty)),
            }
        }

        if !self.options.allow_extra_properties {
            for (key, extra) in entries.iter().filter(|(k, _)| !properties.contains_key(*k)) {
                errors.push(
                    ValidationError::new(format!("{path}.{key}"), ErrorKind::ExtraProperty)
                        .got(Got::Value(extra.clone())),
                );
            }
        }
    }

    fn check_elements(
        &mut self,
        path: &str,
        value: &Value,
        element: &Schema,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(items) = value.as_array() else {
            errors.push(
                ValidationError::new(path, ErrorKind::NotArray)
                    .expected(Expected::Array)
                    .got(Got::Description(value.kind().as_str().to_owned())),
            );
            return;
        };

        let normalized = normalize(element, path, errors);
        self.warn_stray_optional(path, &normalized);
        for (index, item) in items.iter().enumerate() {
            let found = self.check(&format!("{path}[{index}]"), item, &normalized.constraints);
            errors.extend(found);
        }
    }

    fn check_union(
        &mut self,
        path: &str,
        value: &Value,
        branches: &[Schema],
        errors: &mut Vec<ValidationError>,
    ) {
        if branches.is_empty() {
            self.diagnostics
                .report(Diagnostic::new(DiagnosticCode::EmptyUnion, path));
        }

        let mut reports = Vec::with_capacity(branches.len());
        for (branch, schema) in branches.iter().enumerate() {
            let branch_path = format!("{path}.<any#{branch}>");
            let mut parse_errors = Vec::new();
            let normalized = normalize(schema, &branch_path, &mut parse_errors);
            self.warn_stray_optional(&branch_path, &normalized);

            let mut branch_errors = self.check(&branch_path, value, &normalized.constraints);
            branch_errors.append(&mut parse_errors);
            if branch_errors.is_empty() {
                return;
            }
            reports.push(BranchReport {
                branch,
                errors: branch_errors,
            });
        }

        errors.push(ValidationError::new(path, ErrorKind::AnyFailed).got(Got::Branches(reports)));
    }

    fn check_dynamic(
        &mut self,
        path: &str,
        value: &Value,
        resolver: &Resolver,
        errors: &mut Vec<ValidationError>,
    ) {
        let schema = match guarded(|| Ok(resolver.resolve(value))) {
            Ok(schema) => schema,
            Err(fault) => {
                errors.push(
                    ValidationError::new(path, ErrorKind::ExceptionOnCustom)
                        .got(Got::Description(fault)),
                );
                return;
            }
        };

        let normalized = normalize(&schema, path, errors);
        self.warn_stray_optional(path, &normalized);
        let found = self.check(path, value, &normalized.constraints);
        errors.extend(found);
    }

    fn warn_stray_optional(&mut self, path: &str, normalized: &Normalized<'_>) {
        if normalized.is_optional() {
            self.diagnostics.report(Diagnostic::new(
                DiagnosticCode::OptionalOutsideObject,
                path,
            ));
        }
    }
}

fn check_direct(
    path: &str,
    value: &Value,
    test: Check<'_>,
    failure: ErrorKind,
    errors: &mut Vec<ValidationError>,
) {
    let outcome = match test {
        Check::Tag(tag) => Ok(tag.matches(value)),
        Check::UnknownTag(_) => Ok(false),
        Check::Predicate(predicate) => guarded(|| predicate.call(value)),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => errors.push(
            ValidationError::new(path, failure)
                .expected(test.expected())
                .got(Got::Value(value.clone())),
        ),
        Err(fault) => errors.push(
            ValidationError::new(path, ErrorKind::ExceptionOnCustom).got(Got::Description(fault)),
        ),
    }
}

/// Runs a user callback, converting a panic into a fault description.
fn guarded<T>(callback: impl FnOnce() -> Result<T, String>) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(callback))
        .unwrap_or_else(|payload| Err(panic_message(&*payload)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| OPAQUE_PANIC.to_owned())
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
