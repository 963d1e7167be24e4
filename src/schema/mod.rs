//! Schema declaration, normalization, and value validation.
//!
//! A [`Schema`] is a closed tree of primitive type tags, predicates,
//! nested object shapes, array-element constraints, unions, value-dependent
//! schemas, and optional markers. [`validate`] normalizes the schema into
//! atomic constraints, walks the target [`Value`] against them, and returns
//! every [`ValidationError`] it finds instead of failing.

mod check;
mod constraint;
mod diagnostic;
mod error;
mod loader;
mod normalize;
mod options;
mod report;
mod types;
mod validate;
mod value;

pub use constraint::{Check, Constraint, Flag, Normalized};
pub use diagnostic::{Diagnostic, DiagnosticCode, DiagnosticSink, TracingSink};
pub use error::SchemaError;
pub use loader::{load_options, load_schema, load_value};
pub use normalize::normalize;
pub use options::ValidationOptions;
pub use report::{BranchReport, ErrorKind, Expected, Got, ValidationError};
pub use types::{Predicate, Resolver, Schema, TypeTag, any_of, array_of, dynamic, optional};
pub use validate::{is_valid, validate, validate_with};
pub use value::Value;
