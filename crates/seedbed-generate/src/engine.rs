use std::collections::{BTreeMap, HashSet};

use fake::Fake;
use fake::faker::company::en::{Buzzword, BuzzwordMiddle, BuzzwordTail};
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use seedbed_core::{FieldKind, FieldPath, MAX_FIELD_DEPTH, SchemaDirectory};
use seedbed_manifest::{Manifest, SelectionEntry, TypeManifestEntry};

use crate::model::{
    GenerateOptions, GeneratedDocument, GenerationIssue, GenerationOutcome, GenerationReport,
    TypeReport,
};
use crate::values::GeneratedValue;

const DEFAULT_NUMBER_MIN: i64 = 0;
const DEFAULT_NUMBER_MAX: i64 = 10000;
/// Upper bound on how many values one configured array-member kind
/// contributes per document.
const MAX_MEMBER_RUN: u64 = 3;

/// Entry point for turning a manifest into a document batch.
///
/// Generation is infallible: selections the generator cannot honor leave the
/// field unset and record a coded warning in the report.
#[derive(Debug, Clone)]
pub struct DocumentGenerator {
    options: GenerateOptions,
}

impl DocumentGenerator {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn generate(
        &self,
        manifest: &Manifest,
        directory: &SchemaDirectory,
    ) -> GenerationOutcome {
        let mut report = GenerationReport::new(self.options.seed);
        let mut documents: Vec<GeneratedDocument> = Vec::new();
        let mut pools: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut rngs: BTreeMap<String, ChaCha8Rng> = BTreeMap::new();

        info!(
            seed = self.options.seed,
            types = manifest.len(),
            total = manifest.total_count(),
            "generation started"
        );

        // Stub phase: identities first, so references within the batch can
        // always resolve during the fill phase.
        for (type_name, entry) in manifest.types() {
            let count = entry.effective_count();
            report.types.push(TypeReport {
                doc_type: type_name.to_string(),
                requested: count,
                generated: count,
            });
            if count == 0 {
                continue;
            }

            // Per-type RNG keyed by name: adding one type to the manifest
            // does not reshuffle another type's values.
            let mut rng = ChaCha8Rng::seed_from_u64(hash_seed(self.options.seed, type_name));
            let ids: Vec<String> = (0..count).map(|_| random_uuid(&mut rng)).collect();
            for id in &ids {
                documents.push(GeneratedDocument::stub(id.clone(), type_name));
            }
            pools.insert(type_name.to_string(), ids);
            rngs.insert(type_name.to_string(), rng);

            info!(doc_type = %type_name, count, "generating documents");
        }

        // Fill phase, in the same type-then-index order the stubs were made.
        let mut reporter = Reporter::default();
        for document in &mut documents {
            let Some(entry) = manifest.get(&document.doc_type) else {
                continue;
            };
            let Some(rng) = rngs.get_mut(&document.doc_type) else {
                continue;
            };
            fill_document(
                document,
                entry,
                directory,
                &pools,
                rng,
                &mut report,
                &mut reporter,
            );
        }

        info!(
            documents = documents.len(),
            warnings = report.warnings.len(),
            "generation completed"
        );

        GenerationOutcome { documents, report }
    }
}

fn fill_document(
    document: &mut GeneratedDocument,
    entry: &TypeManifestEntry,
    directory: &SchemaDirectory,
    pools: &BTreeMap<String, Vec<String>>,
    rng: &mut ChaCha8Rng,
    report: &mut GenerationReport,
    reporter: &mut Reporter,
) {
    let doc_type_spec = directory.doc_type(&document.doc_type);
    if doc_type_spec.is_none() {
        reporter.warn_once(
            report,
            "unknown_type",
            &document.doc_type,
            None,
            format!(
                "type '{}' not found in the schema directory, trusting the manifest",
                document.doc_type
            ),
        );
    }

    for (path, selection) in &entry.fields {
        if !path.is_top_level() {
            // Member selections are consumed by their array parent.
            let parent_is_array = path
                .parent()
                .and_then(|parent| entry.fields.get(&parent))
                .map(|parent_entry| parent_entry.kind == FieldKind::Array)
                .unwrap_or(false);
            if !parent_is_array {
                reporter.warn_once(
                    report,
                    "orphaned_selection",
                    &document.doc_type,
                    Some(path),
                    format!("member '{path}' has no enabled array parent, skipping"),
                );
            }
            continue;
        }

        if let Some(spec) = doc_type_spec {
            if spec.field(path).is_none() {
                reporter.warn_once(
                    report,
                    "unknown_field",
                    &document.doc_type,
                    Some(path),
                    format!("field '{path}' not found on '{}', skipping", document.doc_type),
                );
                continue;
            }
        }

        if let Some(value) = generate_value(
            selection,
            path,
            entry,
            pools,
            rng,
            1,
            &document.doc_type,
            report,
            reporter,
        ) {
            document.values.insert(path.clone(), value);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn generate_value(
    selection: &SelectionEntry,
    path: &FieldPath,
    entry: &TypeManifestEntry,
    pools: &BTreeMap<String, Vec<String>>,
    rng: &mut ChaCha8Rng,
    depth: usize,
    doc_type: &str,
    report: &mut GenerationReport,
    reporter: &mut Reporter,
) -> Option<GeneratedValue> {
    match selection.kind {
        FieldKind::String => Some(GeneratedValue::Text(phrase(rng))),
        FieldKind::Slug => Some(GeneratedValue::Slug(slugify(&phrase(rng)))),
        FieldKind::Number => {
            let min = selection.min.unwrap_or(DEFAULT_NUMBER_MIN);
            let max = selection.max.unwrap_or(DEFAULT_NUMBER_MAX);
            if min > max {
                reporter.warn_once(
                    report,
                    "invalid_number_bounds",
                    doc_type,
                    Some(path),
                    format!("min {min} is greater than max {max}, leaving unset"),
                );
                return None;
            }
            Some(GeneratedValue::Number(rng.random_range(min..=max)))
        }
        FieldKind::Reference => {
            if selection.to.is_empty() {
                reporter.warn_once(
                    report,
                    "reference_targets_empty",
                    doc_type,
                    Some(path),
                    format!("reference '{path}' has no enabled targets, leaving unset"),
                );
                return None;
            }
            let targets: Vec<&str> = selection.to.iter().map(String::as_str).collect();
            let target = *targets.choose(rng)?;
            let pool = pools.get(target).filter(|pool| !pool.is_empty());
            let Some(pool) = pool else {
                reporter.warn_once(
                    report,
                    "reference_pool_empty",
                    doc_type,
                    Some(path),
                    format!("no '{target}' documents in this batch, leaving unset"),
                );
                return None;
            };
            pool.choose(rng)
                .map(|id| GeneratedValue::Reference(id.clone()))
        }
        FieldKind::Array => {
            if depth >= MAX_FIELD_DEPTH {
                reporter.warn_once(
                    report,
                    "member_depth_capped",
                    doc_type,
                    Some(path),
                    format!("array nesting at '{path}' exceeds {MAX_FIELD_DEPTH} levels"),
                );
                return None;
            }
            let members: Vec<(&FieldPath, &SelectionEntry)> = entry
                .fields
                .iter()
                .filter(|(member_path, _)| member_path.is_direct_child_of(path))
                .collect();
            if members.is_empty() {
                return None;
            }

            let mut items = Vec::new();
            for (member_path, member) in members {
                let run = rng.random_range(1..=MAX_MEMBER_RUN);
                for _ in 0..run {
                    if let Some(value) = generate_value(
                        member,
                        member_path,
                        entry,
                        pools,
                        rng,
                        depth + 1,
                        doc_type,
                        report,
                        reporter,
                    ) {
                        items.push(value);
                    }
                }
            }
            if items.is_empty() {
                None
            } else {
                Some(GeneratedValue::Array(items))
            }
        }
        FieldKind::Other => {
            reporter.warn_once(
                report,
                "kind_not_generatable",
                doc_type,
                Some(path),
                format!("field '{path}' has a kind the generator cannot produce"),
            );
            None
        }
    }
}

/// Human-readable product-name-style phrase. No uniqueness guarantee.
fn phrase(rng: &mut ChaCha8Rng) -> String {
    let head: String = Buzzword().fake_with_rng(rng);
    let middle: String = BuzzwordMiddle().fake_with_rng(rng);
    let tail: String = BuzzwordTail().fake_with_rng(rng);
    format!("{head} {middle} {tail}")
}

/// Lower-case the phrase and collapse whitespace runs to a single `-`.
fn slugify(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

fn random_uuid(rng: &mut ChaCha8Rng) -> String {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    uuid::Uuid::from_bytes(bytes).to_string()
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Deduplicates report warnings per (code, type, path) so one degraded
/// selection does not warn once per document.
#[derive(Default)]
struct Reporter {
    seen: HashSet<(String, String, String)>,
}

impl Reporter {
    fn warn_once(
        &mut self,
        report: &mut GenerationReport,
        code: &str,
        doc_type: &str,
        path: Option<&FieldPath>,
        message: String,
    ) {
        let path_label = path.map(|path| path.to_string()).unwrap_or_default();
        let key = (code.to_string(), doc_type.to_string(), path_label.clone());
        if !self.seen.insert(key) {
            return;
        }
        warn!(
            code = %code,
            doc_type = %doc_type,
            path = %path_label,
            message = %message
        );
        report.record_warning(GenerationIssue {
            code: code.to_string(),
            message,
            doc_type: Some(doc_type.to_string()),
            path: path.map(|path| path.to_string()),
        });
    }
}
