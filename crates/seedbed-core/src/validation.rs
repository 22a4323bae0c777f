use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::schema::{FieldKind, FieldSpec, SchemaDirectory};

/// Maximum nesting depth for array member specs.
///
/// Schema sources can express self-referential array-of-array shapes; the
/// walk stops here instead of recursing without bound.
pub const MAX_FIELD_DEPTH: usize = 8;

/// Validate internal consistency of a schema directory.
///
/// This checks:
/// - duplicate document-type names
/// - duplicate field keys within one nesting level
/// - field keys that would not round-trip as path segments
/// - reference targets that name unknown document types
/// - array member nesting beyond [`MAX_FIELD_DEPTH`]
pub fn validate_directory(directory: &SchemaDirectory) -> Result<()> {
    let mut known_types = BTreeSet::new();
    for doc_type in &directory.types {
        if !known_types.insert(doc_type.name.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "duplicate document type: {}",
                doc_type.name
            )));
        }
    }

    for doc_type in &directory.types {
        validate_fields(&doc_type.name, &doc_type.fields, 1, &known_types)?;
    }

    Ok(())
}

fn validate_fields(
    doc_type: &str,
    fields: &[FieldSpec],
    depth: usize,
    known_types: &BTreeSet<&str>,
) -> Result<()> {
    if depth > MAX_FIELD_DEPTH {
        return Err(Error::InvalidSchema(format!(
            "field nesting in '{doc_type}' exceeds {MAX_FIELD_DEPTH} levels"
        )));
    }

    let mut keys = BTreeSet::new();
    for spec in fields {
        let key = spec.path_key();
        if key.is_empty() || key.contains(crate::path::SEPARATOR) {
            return Err(Error::InvalidSchema(format!(
                "field key '{key}' in '{doc_type}' is not a valid path segment"
            )));
        }
        if !keys.insert(key) {
            return Err(Error::InvalidSchema(format!(
                "duplicate field key '{key}' in '{doc_type}'"
            )));
        }

        if spec.kind == FieldKind::Reference {
            for target in &spec.to {
                if !known_types.contains(target.doc_type.as_str()) {
                    return Err(Error::InvalidSchema(format!(
                        "reference '{doc_type}.{key}' targets unknown type '{}'",
                        target.doc_type
                    )));
                }
            }
        }

        if !spec.of.is_empty() {
            validate_fields(doc_type, &spec.of, depth + 1, known_types)?;
        }
    }

    Ok(())
}
