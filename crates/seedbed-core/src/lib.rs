//! Core contracts and helpers for Seedbed.
//!
//! This crate defines the canonical document-schema types, structured field
//! paths, and validation helpers shared across the manifest, generation, and
//! store crates.

pub mod error;
pub mod path;
pub mod schema;
pub mod validation;

pub use error::{Error, Result};
pub use path::FieldPath;
pub use schema::{DocumentTypeSpec, FieldKind, FieldSpec, ReferenceTarget, SchemaDirectory};
pub use validation::{MAX_FIELD_DEPTH, validate_directory};

/// Current schema contract version for schema-directory artifacts.
pub const SCHEMA_VERSION: &str = "0.1";
