//! Error types for loading values, schemas, and options from YAML.
//!
//! Validation itself never fails: violations are reported as
//! [`ValidationError`](super::ValidationError) records. These errors cover
//! only the fallible loading surface.

/// Errors that can occur when loading validation inputs.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// YAML deserialization failed (malformed YAML or shape mismatch).
    #[error("YAML deserialization failed: {message}")]
    Deserialize {
        /// Human-readable parser error.
        message: String,
    },

    /// A string did not name any known runtime kind.
    #[error("unknown type tag '{tag}'")]
    UnknownTypeTag {
        /// The tag string that was rejected.
        tag: String,
    },
}
