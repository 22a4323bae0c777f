use serde::{Deserialize, Serialize};

use seedbed_core::{FieldKind, FieldPath};

use crate::errors::ManifestError;
use crate::model::{Manifest, SelectionEntry};

/// Discrete toggle/edit event against a manifest.
///
/// Events carry structured [`FieldPath`]s rather than delimiter-joined
/// strings, so field names containing separators cannot be misparsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ManifestEvent {
    /// Set or clear the document count for a type from raw input.
    SetCount { type_name: String, raw: String },
    /// Enable a field if absent, disable it (and its nested member
    /// selections) if present.
    ToggleField {
        type_name: String,
        path: FieldPath,
        kind: FieldKind,
    },
    /// Update an option on an already-enabled field.
    SetFieldOption {
        type_name: String,
        path: FieldPath,
        option: FieldOption,
    },
}

/// Option payload for [`ManifestEvent::SetFieldOption`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "option", rename_all = "snake_case")]
pub enum FieldOption {
    /// Lower bound for a number field, from raw input.
    Min { raw: String },
    /// Upper bound for a number field, from raw input.
    Max { raw: String },
    /// Enable or disable one reference-target type.
    Target { type_name: String, enabled: bool },
}

/// Apply one event, returning the next manifest.
///
/// Pure with respect to its inputs: the given manifest is never mutated.
/// Pruning runs after every event, so no returned manifest contains a type
/// entry with an empty field map and an absent count.
pub fn apply(manifest: &Manifest, event: &ManifestEvent) -> Result<Manifest, ManifestError> {
    let mut next = manifest.clone();
    match event {
        ManifestEvent::SetCount { type_name, raw } => set_count(&mut next, type_name, raw),
        ManifestEvent::ToggleField {
            type_name,
            path,
            kind,
        } => toggle_field(&mut next, type_name, path, *kind),
        ManifestEvent::SetFieldOption {
            type_name,
            path,
            option,
        } => set_field_option(&mut next, type_name, path, option)?,
    }
    next.prune();
    Ok(next)
}

/// Fold an event sequence over an initial manifest.
pub fn fold<'a, I>(initial: &Manifest, events: I) -> Result<Manifest, ManifestError>
where
    I: IntoIterator<Item = &'a ManifestEvent>,
{
    let mut manifest = initial.clone();
    for event in events {
        manifest = apply(&manifest, event)?;
    }
    Ok(manifest)
}

/// Parse raw count input.
///
/// Empty input clears the count (`None`); negative integers clamp to 0;
/// anything else that is not an integer is a [`ManifestError::Parse`].
pub fn parse_count(raw: &str) -> Result<Option<u64>, ManifestError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ManifestError::Parse(format!("count '{trimmed}' is not an integer")))?;
    Ok(Some(value.max(0) as u64))
}

fn set_count(manifest: &mut Manifest, type_name: &str, raw: &str) {
    match parse_count(raw) {
        Ok(Some(count)) => {
            manifest.entry_mut(type_name).count = Some(count);
        }
        // Cleared or unparseable input discards the edit: only the count
        // key is removed, configured fields stay.
        Ok(None) | Err(_) => {
            if let Some(entry) = manifest.get_mut(type_name) {
                entry.count = None;
            }
        }
    }
}

fn toggle_field(manifest: &mut Manifest, type_name: &str, path: &FieldPath, kind: FieldKind) {
    let enabled = manifest
        .get(type_name)
        .map(|entry| entry.fields.contains_key(path))
        .unwrap_or(false);

    if enabled {
        // Disabling a field drops its nested member selections with it.
        if let Some(entry) = manifest.get_mut(type_name) {
            entry.fields.retain(|existing, _| !existing.starts_with(path));
        }
    } else {
        manifest
            .entry_mut(type_name)
            .fields
            .insert(path.clone(), SelectionEntry::new(kind));
    }
}

fn set_field_option(
    manifest: &mut Manifest,
    type_name: &str,
    path: &FieldPath,
    option: &FieldOption,
) -> Result<(), ManifestError> {
    let entry = manifest
        .get_mut(type_name)
        .and_then(|entry| entry.fields.get_mut(path))
        .ok_or_else(|| {
            ManifestError::Precondition(format!(
                "field '{path}' on '{type_name}' is not enabled"
            ))
        })?;

    match option {
        FieldOption::Min { raw } => entry.min = parse_bound(raw),
        FieldOption::Max { raw } => entry.max = parse_bound(raw),
        FieldOption::Target { type_name, enabled } => {
            if *enabled {
                entry.to.insert(type_name.clone());
            } else {
                entry.to.remove(type_name);
            }
        }
    }
    Ok(())
}

fn parse_bound(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
