//! Declarative schema nodes and the combinators that build them.
//!
//! A [`Schema`] is caller-owned and never mutated by validation, so one
//! declaration can be shared across many [`validate`](super::validate)
//! calls. Callable nodes hold their closures behind `Arc`, which keeps
//! cloning cheap and lets schemas cross thread boundaries.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::error::SchemaError;
use super::value::Value;

/// Marker string that declares a property optional in declarative schemas.
const OPTIONAL_MARKER: &str = "optional";

// ── TypeTag ─────────────────────────────────────────────────────────

/// Runtime kinds a type-tag schema can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// The null value.
    Null,
    /// `true` or `false`.
    Boolean,
    /// Any integer or floating-point number.
    Number,
    /// A string scalar.
    String,
    /// A sequence of values.
    Array,
    /// A string-keyed mapping.
    Object,
}

impl TypeTag {
    /// Returns the canonical tag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Returns `true` if `value` has this runtime kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Array => matches!(value, Value::Array(_)),
            tag => value.kind() == tag,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(Self::Null),
            "boolean" => Ok(Self::Boolean),
            "number" => Ok(Self::Number),
            "string" => Ok(Self::String),
            "array" => Ok(Self::Array),
            "object" => Ok(Self::Object),
            other => Err(SchemaError::UnknownTypeTag {
                tag: other.to_owned(),
            }),
        }
    }
}

// ── Callables ───────────────────────────────────────────────────────

type PredicateFn = dyn Fn(&Value) -> Result<bool, String> + Send + Sync;
type ResolverFn = dyn Fn(&Value) -> Schema + Send + Sync;

/// A user-supplied check over a whole value.
///
/// A predicate may fail by returning an error or by panicking; both are
/// reported as `exception-on-custom` rather than escaping validation.
#[derive(Clone)]
pub struct Predicate(Arc<PredicateFn>);

impl Predicate {
    /// Wraps an infallible boolean predicate.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(move |value: &Value| Ok(f(value))))
    }

    /// Wraps a predicate that can report a fault.
    pub fn fallible<F, E>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self(Arc::new(move |value: &Value| {
            f(value).map_err(|e| e.to_string())
        }))
    }

    /// Invokes the predicate without any panic guard.
    pub(crate) fn call(&self, value: &Value) -> Result<bool, String> {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Computes the applicable schema from the value under test.
#[derive(Clone)]
pub struct Resolver(Arc<ResolverFn>);

impl Resolver {
    /// Wraps a value-to-schema callback.
    pub fn new<F, S>(f: F) -> Self
    where
        F: Fn(&Value) -> S + Send + Sync + 'static,
        S: Into<Schema>,
    {
        Self(Arc::new(move |value: &Value| f(value).into()))
    }

    pub(crate) fn resolve(&self, value: &Value) -> Schema {
        (self.0)(value)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Resolver(..)")
    }
}

// ── Schema ──────────────────────────────────────────────────────────

/// A declarative description of the constraints a value must satisfy.
///
/// # Examples
///
///     use shapecheck::schema::{Schema, Value, ValidationOptions, array_of, validate};
///
///     let schema = Schema::object([
///         ("title", Schema::from("string")),
///         ("scores", array_of("number")),
///     ]);
///     let target = Value::object([
///         ("title", Value::from("report")),
///         ("scores", Value::array([1, 2, 3])),
///     ]);
///     assert!(validate(&target, &schema, &ValidationOptions::default()).is_empty());
#[derive(Debug, Clone)]
pub enum Schema {
    /// A missing schema node; always a parsing error.
    Null,
    /// The value must have the given runtime kind.
    Type(TypeTag),
    /// A tag name that no runtime kind carries, so no value matches it.
    UnknownTag(String),
    /// The value must satisfy a predicate.
    Predicate(Predicate),
    /// The enclosing property need not be present.
    Optional,
    /// The value must be an object matching every listed property.
    Nested(IndexMap<String, Self>),
    /// The value must be an array whose elements all match.
    ArrayOf(Box<Self>),
    /// The value must match at least one branch; the first match wins.
    AnyOf(Vec<Self>),
    /// The schema is computed from the value under test.
    Dynamic(Resolver),
    /// The value must satisfy every member, in order.
    All(Vec<Self>),
    /// A node that cannot be interpreted, with a description of it.
    Unsupported(String),
}

impl Schema {
    /// Requires a runtime kind.
    #[must_use]
    pub const fn tag(tag: TypeTag) -> Self {
        Self::Type(tag)
    }

    /// Requires an infallible predicate to hold.
    ///
    /// A panicking predicate is still reported as `exception-on-custom`,
    /// but the process panic hook prints it first. Predicates that can
    /// fault should use [`Schema::try_predicate`] and return the fault.
    ///
    /// # Examples
    ///
    ///     use shapecheck::schema::{ErrorKind, Schema, Value, ValidationOptions, validate};
    ///
    ///     let even = Schema::try_predicate(|v: &Value| {
    ///         v.as_i64().map(|n| n % 2 == 0).ok_or("not an integer")
    ///     });
    ///     let errors = validate(&Value::from("two"), &even, &ValidationOptions::default());
    ///     assert_eq!(errors.first().map(|e| e.kind), Some(ErrorKind::ExceptionOnCustom));
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Predicate::new(f))
    }

    /// Requires a fallible predicate to hold; an `Err` is reported as
    /// `exception-on-custom`.
    pub fn try_predicate<F, E>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self::Predicate(Predicate::fallible(f))
    }

    /// Builds a nested object schema, keeping property order.
    pub fn object<K, V, I>(properties: I) -> Self
    where
        K: Into<String>,
        V: Into<Self>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Nested(
            properties
                .into_iter()
                .map(|(key, schema)| (key.into(), schema.into()))
                .collect(),
        )
    }

    /// Combines schemas with logical AND.
    pub fn all<S, I>(members: I) -> Self
    where
        S: Into<Self>,
        I: IntoIterator<Item = S>,
    {
        Self::All(members.into_iter().map(Into::into).collect())
    }
}

/// Returns the optional-property marker.
#[must_use]
pub const fn optional() -> Schema {
    Schema::Optional
}

/// Requires every element of an array to match `element`.
pub fn array_of(element: impl Into<Schema>) -> Schema {
    Schema::ArrayOf(Box::new(element.into()))
}

/// Requires a value to match at least one of `branches`.
pub fn any_of<S, I>(branches: I) -> Schema
where
    S: Into<Schema>,
    I: IntoIterator<Item = S>,
{
    Schema::AnyOf(branches.into_iter().map(Into::into).collect())
}

/// Computes the schema from the value under test.
pub fn dynamic<F, S>(f: F) -> Schema
where
    F: Fn(&Value) -> S + Send + Sync + 'static,
    S: Into<Schema>,
{
    Schema::Dynamic(Resolver::new(f))
}

impl From<TypeTag> for Schema {
    fn from(tag: TypeTag) -> Self {
        Self::Type(tag)
    }
}

impl From<&str> for Schema {
    fn from(s: &str) -> Self {
        if s == OPTIONAL_MARKER {
            return Self::Optional;
        }
        s.parse::<TypeTag>()
            .map_or_else(|_| Self::UnknownTag(s.to_owned()), Self::Type)
    }
}

impl From<Vec<Self>> for Schema {
    fn from(members: Vec<Self>) -> Self {
        Self::All(members)
    }
}

impl From<IndexMap<String, Self>> for Schema {
    fn from(properties: IndexMap<String, Self>) -> Self {
        Self::Nested(properties)
    }
}

// ── Deserialization ─────────────────────────────────────────────────

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(SchemaVisitor)
    }
}

/// Visitor for the declarative schema form: strings are tags, sequences
/// are combinations, and mappings are nested object shapes.
struct SchemaVisitor;

impl<'de> Visitor<'de> for SchemaVisitor {
    type Value = Schema;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a type tag, a sequence of schemas, or a mapping of properties")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Schema::Unsupported(format!("boolean literal {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Schema::Unsupported(format!("integer literal {v}")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Schema::Unsupported(format!("integer literal {v}")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Schema::Unsupported(format!("float literal {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Schema::from(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Schema::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Schema::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut members = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(member) = seq.next_element()? {
            members.push(member);
        }
        Ok(Schema::All(members))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut properties = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, schema)) = map.next_entry()? {
            properties.insert(key, schema);
        }
        Ok(Schema::Nested(properties))
    }
}
