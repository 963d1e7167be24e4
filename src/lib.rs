//! `shapecheck` validates arbitrary runtime values against declarative
//! schemas and reports every violation as structured data.
//!
//! This crate provides schema normalization, recursive value checking with
//! property-path tracking, and YAML loading for values, schemas, and
//! validation options.

/// Schema types, normalization, and value validation.
pub mod schema;
