//! The normalized constraint model.
//!
//! Normalizing a [`Schema`] yields an ordered list of [`Constraint`]s plus
//! a set of [`Flag`]s. Constraints borrow their payloads from the schema
//! they were derived from, so nested shapes are resolved lazily during
//! checking rather than expanded up front.

use indexmap::IndexMap;

use super::report::{ErrorKind, Expected};
use super::types::{Predicate, Resolver, Schema, TypeTag};

/// Markers that modify how a schema is applied rather than checking the
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// The enclosing property need not be present.
    Optional,
}

/// An atomic test applied directly to a value.
#[derive(Debug, Clone, Copy)]
pub enum Check<'s> {
    /// Runtime-kind equality (or array-ness for [`TypeTag::Array`]).
    Tag(TypeTag),
    /// Kind equality against a tag name no runtime kind carries; never
    /// passes.
    UnknownTag(&'s str),
    /// A user predicate.
    Predicate(&'s Predicate),
}

impl Check<'_> {
    /// Returns the expectation recorded when this test fails.
    #[must_use]
    pub fn expected(self) -> Expected {
        match self {
            Self::Tag(tag) => Expected::Tag(tag),
            Self::UnknownTag(name) => Expected::UnknownTag(name.to_owned()),
            Self::Predicate(_) => Expected::Predicate,
        }
    }
}

/// One atomic, normalized constraint.
#[derive(Debug, Clone, Copy)]
pub enum Constraint<'s> {
    /// A direct test with the failure it reports.
    Check {
        /// The test to run.
        test: Check<'s>,
        /// Kind recorded when the test returns `false`.
        failure: ErrorKind,
    },
    /// Property-by-property object shape.
    Nested(&'s IndexMap<String, Schema>),
    /// Schema for every element of an array.
    ArrayOf(&'s Schema),
    /// Union of branches; the first fully passing branch wins.
    AnyOf(&'s [Schema]),
    /// Schema computed from the value under test.
    Dynamic(&'s Resolver),
}

impl Constraint<'_> {
    /// Builds a type-tag check.
    #[must_use]
    pub const fn tag(tag: TypeTag) -> Self {
        Self::Check {
            test: Check::Tag(tag),
            failure: ErrorKind::TypeMismatch,
        }
    }
}

impl<'s> Constraint<'s> {
    /// Builds a kind check for an unrecognized tag name.
    #[must_use]
    pub const fn unknown_tag(name: &'s str) -> Self {
        Self::Check {
            test: Check::UnknownTag(name),
            failure: ErrorKind::TypeMismatch,
        }
    }

    /// Builds a predicate check.
    #[must_use]
    pub const fn predicate(predicate: &'s Predicate) -> Self {
        Self::Check {
            test: Check::Predicate(predicate),
            failure: ErrorKind::CustomFail,
        }
    }
}

/// The result of normalizing one schema node.
#[derive(Debug, Clone, Default)]
pub struct Normalized<'s> {
    /// Constraints in declaration order.
    pub constraints: Vec<Constraint<'s>>,
    /// Markers found alongside the constraints.
    pub flags: Vec<Flag>,
}

impl Normalized<'_> {
    /// Returns `true` if the node carried the optional marker.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.flags.contains(&Flag::Optional)
    }
}
