//! Schema normalization.
//!
//! Turns one [`Schema`] node into an ordered constraint list and a flag
//! set. Normalization is pure: it only reads the schema, and any node it
//! cannot interpret contributes no constraints and exactly one
//! `parsing-error` record.

use super::constraint::{Constraint, Flag, Normalized};
use super::report::{ErrorKind, Got, ValidationError};
use super::types::Schema;

/// One translated schema entry, before partitioning.
enum Entry<'s> {
    Constraint(Constraint<'s>),
    Flag(Flag),
}

/// Normalizes `schema` into constraints and flags.
///
/// `at` is the value path the schema is being applied to; it is recorded
/// on any parsing error pushed into `sink`.
///
/// Combinator nodes (`ArrayOf`, `AnyOf`, `Dynamic`) are already single
/// constraints and pass through without their payload being inspected.
/// `All` members are normalized recursively and flattened.
#[must_use]
pub fn normalize<'s>(schema: &'s Schema, at: &str, sink: &mut Vec<ValidationError>) -> Normalized<'s> {
    let mut entries = Vec::new();
    translate(schema, at, sink, &mut entries);

    let mut normalized = Normalized::default();
    for entry in entries {
        match entry {
            Entry::Constraint(constraint) => normalized.constraints.push(constraint),
            Entry::Flag(flag) => normalized.flags.push(flag),
        }
    }
    normalized
}

fn translate<'s>(
    schema: &'s Schema,
    at: &str,
    sink: &mut Vec<ValidationError>,
    entries: &mut Vec<Entry<'s>>,
) {
    match schema {
        Schema::Null => sink.push(parsing_error(at, "missing schema node")),
        Schema::Type(tag) => entries.push(Entry::Constraint(Constraint::tag(*tag))),
        Schema::UnknownTag(name) => {
            entries.push(Entry::Constraint(Constraint::unknown_tag(name)));
        }
        Schema::Predicate(predicate) => {
            entries.push(Entry::Constraint(Constraint::predicate(predicate)));
        }
        Schema::Optional => entries.push(Entry::Flag(Flag::Optional)),
        Schema::Nested(properties) => entries.push(Entry::Constraint(Constraint::Nested(properties))),
        Schema::ArrayOf(element) => entries.push(Entry::Constraint(Constraint::ArrayOf(element))),
        Schema::AnyOf(branches) => entries.push(Entry::Constraint(Constraint::AnyOf(branches))),
        Schema::Dynamic(resolver) => entries.push(Entry::Constraint(Constraint::Dynamic(resolver))),
        Schema::All(members) => {
            for member in members {
                translate(member, at, sink, entries);
            }
        }
        Schema::Unsupported(description) => sink.push(parsing_error(at, description)),
    }
}

fn parsing_error(at: &str, description: &str) -> ValidationError {
    ValidationError::new(at, ErrorKind::ParsingError)
        .got(Got::Description(description.to_owned()))
}
