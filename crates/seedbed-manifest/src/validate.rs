use jsonschema::JSONSchema;
use serde_json::Value;

use seedbed_core::{FieldKind, SchemaDirectory};

use crate::errors::{IssueSeverity, ManifestJsonError, ValidationIssue, ValidationReport};
use crate::model::{Manifest, SelectionEntry, TypeManifestEntry};

/// Validate a `manifest.json` document against the manifest JSON Schema.
pub fn validate_manifest_json(
    manifest_json: &Value,
    manifest_schema: &Value,
) -> Result<ValidationReport, ManifestJsonError> {
    let compiled = JSONSchema::compile(manifest_schema)
        .map_err(|err| ManifestJsonError::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(manifest_json) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "schema_violation",
                path,
                error.to_string(),
                None,
            ));
        }
    }

    Ok(report)
}

/// Validate a parsed manifest against a schema directory.
///
/// Errors mark selections generation cannot interpret at all; warnings mark
/// selections that generation will silently degrade (empty reference pools,
/// ignored bounds, orphaned member entries).
pub fn validate_manifest(manifest: &Manifest, directory: &SchemaDirectory) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (type_name, entry) in manifest.types() {
        let base_path = format!("/{type_name}");

        let Some(doc_type) = directory.doc_type(type_name) else {
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "unknown_type",
                base_path,
                format!("document type '{type_name}' not found in the schema directory"),
                None,
            ));
            continue;
        };

        if entry.effective_count() == 0 {
            report.push_warning(ValidationIssue::new(
                IssueSeverity::Warning,
                "count_zero",
                format!("{base_path}/count"),
                format!("type '{type_name}' contributes no documents"),
                Some("set a positive count to generate documents".to_string()),
            ));
        }

        for (path, selection) in &entry.fields {
            let issue_path = format!("{base_path}/fields/{path}");

            let Some(spec) = doc_type.field(path) else {
                report.push_error(ValidationIssue::new(
                    IssueSeverity::Error,
                    "unknown_field",
                    issue_path,
                    format!("field '{path}' not found on type '{type_name}'"),
                    None,
                ));
                continue;
            };

            if spec.kind != selection.kind {
                report.push_warning(ValidationIssue::new(
                    IssueSeverity::Warning,
                    "kind_mismatch",
                    issue_path.clone(),
                    format!(
                        "selection says '{}' but the schema says '{}'",
                        selection.kind.as_str(),
                        spec.kind.as_str()
                    ),
                    Some("re-toggle the field to pick up the schema kind".to_string()),
                ));
            }

            if let Some(parent) = path.parent() {
                let parent_is_array = entry
                    .fields
                    .get(&parent)
                    .map(|parent_entry| parent_entry.kind == FieldKind::Array)
                    .unwrap_or(false);
                if !parent_is_array {
                    report.push_warning(ValidationIssue::new(
                        IssueSeverity::Warning,
                        "orphaned_selection",
                        issue_path.clone(),
                        format!("member '{path}' has no enabled array parent"),
                        Some("enable the parent array field".to_string()),
                    ));
                }
            }

            validate_selection_options(type_name, path, selection, manifest, directory, &issue_path, &mut report);
        }
    }

    report
}

fn validate_selection_options(
    type_name: &str,
    path: &seedbed_core::FieldPath,
    selection: &SelectionEntry,
    manifest: &Manifest,
    directory: &SchemaDirectory,
    issue_path: &str,
    report: &mut ValidationReport,
) {
    match selection.kind {
        FieldKind::Number => {
            if let (Some(min), Some(max)) = (selection.min, selection.max) {
                if min > max {
                    report.push_error(ValidationIssue::new(
                        IssueSeverity::Error,
                        "invalid_bounds",
                        issue_path.to_string(),
                        format!("min {min} is greater than max {max}"),
                        None,
                    ));
                }
            }
        }
        _ => {
            if selection.min.is_some() || selection.max.is_some() {
                report.push_warning(ValidationIssue::new(
                    IssueSeverity::Warning,
                    "bounds_ignored",
                    issue_path.to_string(),
                    format!("min/max have no effect on a {} field", selection.kind.as_str()),
                    None,
                ));
            }
        }
    }

    if selection.kind == FieldKind::Reference {
        if selection.to.is_empty() {
            report.push_warning(ValidationIssue::new(
                IssueSeverity::Warning,
                "reference_targets_empty",
                issue_path.to_string(),
                format!("reference '{path}' on '{type_name}' has no enabled targets"),
                Some("enable at least one target type".to_string()),
            ));
        }
        for target in &selection.to {
            if !directory.contains_type(target) {
                report.push_error(ValidationIssue::new(
                    IssueSeverity::Error,
                    "unknown_reference_target",
                    issue_path.to_string(),
                    format!("target type '{target}' not found in the schema directory"),
                    None,
                ));
            } else if manifest
                .get(target)
                .map(TypeManifestEntry::effective_count)
                .unwrap_or(0)
                == 0
            {
                report.push_warning(ValidationIssue::new(
                    IssueSeverity::Warning,
                    "reference_target_not_generated",
                    issue_path.to_string(),
                    format!("target type '{target}' generates no documents in this manifest"),
                    Some("the reference will be left unset".to_string()),
                ));
            }
        }
    } else if !selection.to.is_empty() {
        report.push_warning(ValidationIssue::new(
            IssueSeverity::Warning,
            "targets_ignored",
            issue_path.to_string(),
            format!("targets have no effect on a {} field", selection.kind.as_str()),
            None,
        ));
    }
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
