//! Structured diagnostics for schema misuse.
//!
//! Diagnostics are non-fatal: they describe schema declarations that are
//! legal but meaningless (an optional marker with no property to apply to,
//! a union with no branches). They never change the validation result and
//! are delivered through an injectable [`DiagnosticSink`].

/// Stable diagnostic classification codes for schema misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCode {
    /// An optional marker at the schema root.
    OptionalAtRoot,
    /// An optional marker in an array element, union branch, or dynamic
    /// result, where no property exists to make optional.
    OptionalOutsideObject,
    /// A union with zero branches, which can never pass.
    EmptyUnion,
}

impl DiagnosticCode {
    /// Returns the stable, machine-readable code string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OptionalAtRoot => "schema.optional_at_root",
            Self::OptionalOutsideObject => "schema.optional_outside_object",
            Self::EmptyUnion => "schema.empty_union",
        }
    }

    /// Returns the deterministic human-readable message for this code.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::OptionalAtRoot => "optional marker has no effect at the schema root",
            Self::OptionalOutsideObject => {
                "optional marker has no effect outside an object property"
            }
            Self::EmptyUnion => "union has no branches and can never pass",
        }
    }
}

/// Structured diagnostic payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Stable diagnostic code for programmatic handling.
    pub code: DiagnosticCode,
    /// Value path at which the schema node was applied.
    pub path: String,
    /// Deterministic human-readable fallback message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic with the canonical message for `code`.
    #[must_use]
    pub fn new(code: DiagnosticCode, path: &str) -> Self {
        Self {
            code,
            path: path.strip_prefix('.').unwrap_or(path).to_owned(),
            message: code.message().to_owned(),
        }
    }

    /// Renders the diagnostic into a deterministic single-line format
    /// suitable for snapshot tests.
    #[must_use]
    pub fn render(&self) -> String {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            self.path.as_str()
        };
        format!("{} | {} | {}", self.code.as_str(), path, self.message)
    }
}

/// Receives diagnostics raised while validating.
pub trait DiagnosticSink {
    /// Accepts one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Sink that forwards diagnostics to `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            code = diagnostic.code.as_str(),
            path = %diagnostic.path,
            "{}",
            diagnostic.message
        );
    }
}
