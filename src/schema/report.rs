//! Validation error records.
//!
//! Every violation is a [`ValidationError`] carrying the property path, a
//! stable [`ErrorKind`], the canonical message for that kind, and optional
//! expected/got payloads.

use std::fmt;

use super::types::TypeTag;
use super::value::Value;

/// Stable classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required property is missing.
    NoProperty,
    /// The value has the wrong runtime kind.
    TypeMismatch,
    /// A predicate returned `false`.
    CustomFail,
    /// The object carries a property the schema does not declare.
    ExtraProperty,
    /// A predicate or resolver faulted.
    ExceptionOnCustom,
    /// An array-element schema was applied to a non-array.
    NotArray,
    /// The value under test is null where an object or element was needed.
    TargetIsNull,
    /// A dynamic schema was not backed by a callable.
    FunctionExpected,
    /// A nested schema was applied to a non-object.
    ObjectExpected,
    /// No branch of a union matched.
    AnyFailed,
    /// A schema node could not be interpreted.
    ParsingError,
}

impl ErrorKind {
    /// Returns the stable, machine-readable code string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoProperty => "no-property",
            Self::TypeMismatch => "type-mismatch",
            Self::CustomFail => "custom-fail",
            Self::ExtraProperty => "extra-property",
            Self::ExceptionOnCustom => "exception-on-custom",
            Self::NotArray => "not-array",
            Self::TargetIsNull => "target-is-null",
            Self::FunctionExpected => "function-expected",
            Self::ObjectExpected => "object-expected",
            Self::AnyFailed => "any-failed",
            Self::ParsingError => "parsing-error",
        }
    }

    /// Returns the canonical human-readable message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoProperty => "Required property not present",
            Self::TypeMismatch => "Provided type is not allowed by schema",
            Self::CustomFail => "Custom validation function failed",
            Self::ExtraProperty => "Provided object contains properties not present in schema",
            Self::ExceptionOnCustom => "Exception thrown during constraint validation",
            Self::NotArray => "Tried using ARRAY_OF constraint on non-array value",
            Self::TargetIsNull => "Passed object or array item is null",
            Self::FunctionExpected => "Expected function as dynamic constraint",
            Self::ObjectExpected => "Expected object",
            Self::AnyFailed => "None of ANY_OF constraints are met",
            Self::ParsingError => "Schema parsing error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the schema asked for at the failing position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// A runtime kind.
    Tag(TypeTag),
    /// A declared tag name that matches no runtime kind.
    UnknownTag(String),
    /// A predicate to hold.
    Predicate,
    /// An object value.
    Object,
    /// An array value.
    Array,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => f.write_str(tag.as_str()),
            Self::UnknownTag(name) => f.write_str(name),
            Self::Predicate => f.write_str("[function]"),
            Self::Object => f.write_str("object"),
            Self::Array => f.write_str("array"),
        }
    }
}

/// What was found at the failing position.
#[derive(Debug, Clone, PartialEq)]
pub enum Got {
    /// The offending value.
    Value(Value),
    /// A description such as a fault message or a runtime kind name.
    Description(String),
    /// Per-branch failures of a union, in declared order.
    Branches(Vec<BranchReport>),
}

/// Errors collected by one failed union branch.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchReport {
    /// 0-based branch position within the union.
    pub branch: usize,
    /// Everything the branch reported, including its parsing errors.
    pub errors: Vec<ValidationError>,
}

/// A single, path-tagged validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Dot/bracket path to the failing value; empty at the root.
    pub path: String,
    /// Stable failure classification.
    pub kind: ErrorKind,
    /// Canonical message for `kind`.
    pub message: String,
    /// Schema-derived expectation, when one applies.
    pub expected: Option<Expected>,
    /// Offending value or description, when one applies.
    pub got: Option<Got>,
}

impl ValidationError {
    /// Creates an error with the canonical message for `kind`.
    #[must_use]
    pub fn new(path: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
            message: kind.message().to_owned(),
            expected: None,
            got: None,
        }
    }

    /// Attaches the expected payload.
    #[must_use]
    pub fn expected(mut self, expected: Expected) -> Self {
        self.expected = Some(expected);
        self
    }

    /// Attaches the got payload.
    #[must_use]
    pub fn got(mut self, got: Got) -> Self {
        self.got = Some(got);
        self
    }

    /// Returns the union branch reports carried by an `any-failed` error.
    #[must_use]
    pub fn branches(&self) -> &[BranchReport] {
        match &self.got {
            Some(Got::Branches(reports)) => reports,
            _ => &[],
        }
    }

    /// Removes a leading `.` left by property access at the root, here and
    /// in every nested branch report.
    pub(crate) fn strip_root_separator(&mut self) {
        if let Some(stripped) = self.path.strip_prefix('.') {
            self.path = stripped.to_owned();
        }
        if let Some(Got::Branches(reports)) = &mut self.got {
            for error in reports.iter_mut().flat_map(|r| r.errors.iter_mut()) {
                error.strip_root_separator();
            }
        }
    }

    /// Renders the error into a deterministic single-line format suitable
    /// for snapshot tests.
    #[must_use]
    pub fn render(&self) -> String {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            self.path.as_str()
        };
        let mut line = format!("{} | {} | {}", self.kind.as_str(), path, self.message);
        if let Some(expected) = &self.expected {
            line.push_str(&format!(" | expected {expected}"));
        }
        match &self.got {
            Some(Got::Value(value)) => line.push_str(&format!(" | got {value}")),
            Some(Got::Description(description)) => {
                line.push_str(&format!(" | got {description}"));
            }
            Some(Got::Branches(reports)) => {
                line.push_str(&format!(" | {} branches failed", reports.len()));
            }
            None => {}
        }
        line
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
