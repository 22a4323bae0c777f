//! Two-phase synthetic document generation for Seedbed.
//!
//! This crate consumes a finalized manifest plus the schema directory and
//! produces an ordered batch of ready-to-persist documents, resolving
//! references between freshly generated documents before anything reaches
//! storage. Generation cannot fail: malformed selections degrade to unset
//! fields recorded in the run report.

pub mod engine;
pub mod model;
pub mod values;

pub use engine::DocumentGenerator;
pub use model::{
    GenerateOptions, GeneratedDocument, GenerationIssue, GenerationOutcome, GenerationReport,
    TypeReport,
};
pub use values::GeneratedValue;
