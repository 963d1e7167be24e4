//! Caller-tunable validation behaviour.

use serde::Deserialize;

/// Options controlling how much is reported and how strict objects are.
///
/// Fields missing from a deserialized document take their defaults, so a
/// configuration file only needs to name what it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationOptions {
    /// Report every violation instead of stopping a constraint list at its
    /// first failure. Defaults to `true`.
    #[serde(alias = "allErrors")]
    pub all_errors: bool,

    /// Accept object properties the schema does not declare. Defaults to
    /// `true`; when `false` each undeclared property is an
    /// `extra-property` error.
    #[serde(alias = "allowExtraProperties")]
    pub allow_extra_properties: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            all_errors: true,
            allow_extra_properties: true,
        }
    }
}

impl ValidationOptions {
    /// Sets whether every violation is reported.
    #[must_use]
    pub const fn with_all_errors(mut self, all_errors: bool) -> Self {
        self.all_errors = all_errors;
        self
    }

    /// Sets whether undeclared object properties are accepted.
    #[must_use]
    pub const fn with_extra_properties(mut self, allow: bool) -> Self {
        self.allow_extra_properties = allow;
        self
    }
}
