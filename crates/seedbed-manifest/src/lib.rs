//! Selection-manifest model and event-driven builder for Seedbed.
//!
//! A [`Manifest`] records which document types, counts, and fields are
//! enabled for generation. It is mutated only through [`ManifestEvent`]s:
//! [`apply`] is a pure `(Manifest, Event) -> Manifest` function, so any
//! manifest state is reproducible by folding the event sequence that
//! produced it.

pub mod builder;
pub mod errors;
pub mod model;
pub mod schema;
pub mod validate;

pub use builder::{FieldOption, ManifestEvent, apply, fold, parse_count};
pub use errors::{
    IssueSeverity, ManifestError, ManifestJsonError, ValidationIssue, ValidationReport,
};
pub use model::{Manifest, SelectionEntry, TypeManifestEntry};
pub use schema::manifest_json_schema;
pub use validate::{validate_manifest, validate_manifest_json};
