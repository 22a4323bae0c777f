use seedbed_core::{
    DocumentTypeSpec, FieldKind, FieldPath, FieldSpec, ReferenceTarget, SchemaDirectory,
};
use seedbed_generate::{DocumentGenerator, GenerateOptions, GenerationOutcome};
use seedbed_manifest::{FieldOption, Manifest, ManifestEvent, fold};

fn directory() -> SchemaDirectory {
    SchemaDirectory::new(vec![
        DocumentTypeSpec::new(
            "post",
            vec![
                FieldSpec::new("title", FieldKind::String),
                FieldSpec::new("slug", FieldKind::Slug),
                FieldSpec::new("rating", FieldKind::Number),
                FieldSpec::new("author", FieldKind::Reference)
                    .with_targets(vec![ReferenceTarget::new("author")]),
                FieldSpec::new("tags", FieldKind::Array)
                    .with_members(vec![FieldSpec::new("", FieldKind::String)]),
                FieldSpec::new("location", FieldKind::Other),
            ],
        ),
        DocumentTypeSpec::new("author", vec![FieldSpec::new("name", FieldKind::String)]),
    ])
}

fn path(raw: &str) -> FieldPath {
    raw.parse().expect("field path")
}

fn toggle(type_name: &str, raw_path: &str, kind: FieldKind) -> ManifestEvent {
    ManifestEvent::ToggleField {
        type_name: type_name.to_string(),
        path: path(raw_path),
        kind,
    }
}

fn set_count(type_name: &str, raw: &str) -> ManifestEvent {
    ManifestEvent::SetCount {
        type_name: type_name.to_string(),
        raw: raw.to_string(),
    }
}

fn set_option(type_name: &str, raw_path: &str, option: FieldOption) -> ManifestEvent {
    ManifestEvent::SetFieldOption {
        type_name: type_name.to_string(),
        path: path(raw_path),
        option,
    }
}

fn build(events: &[ManifestEvent]) -> Manifest {
    fold(&Manifest::new(), events).expect("build manifest")
}

fn generate(manifest: &Manifest, seed: u64) -> GenerationOutcome {
    DocumentGenerator::new(GenerateOptions { seed }).generate(manifest, &directory())
}

#[test]
fn zero_counts_generate_nothing() {
    let manifest = build(&[
        set_count("post", "0"),
        toggle("post", "title", FieldKind::String),
        toggle("author", "name", FieldKind::String),
    ]);

    let outcome = generate(&manifest, 1);
    assert!(outcome.documents.is_empty());
}

#[test]
fn generates_the_requested_documents_with_unique_ids() {
    let manifest = build(&[
        set_count("post", "2"),
        toggle("post", "title", FieldKind::String),
    ]);

    let outcome = generate(&manifest, 7);
    assert_eq!(outcome.documents.len(), 2);

    for document in &outcome.documents {
        assert_eq!(document.doc_type, "post");
        let title = document
            .values
            .get(&path("title"))
            .and_then(|value| value.as_str())
            .expect("title is set");
        assert!(!title.is_empty());
    }
    assert_ne!(outcome.documents[0].id, outcome.documents[1].id);
}

#[test]
fn references_resolve_within_the_batch() {
    let manifest = build(&[
        set_count("article", "2"),
        set_count("review", "1"),
        toggle("review", "subject", FieldKind::Reference),
        set_option(
            "review",
            "subject",
            FieldOption::Target {
                type_name: "article".to_string(),
                enabled: true,
            },
        ),
    ]);

    // Unknown-to-directory types still generate from the manifest alone.
    for seed in 0..16 {
        let outcome = generate(&manifest, seed);
        assert_eq!(outcome.documents.len(), 3);

        let article_ids: Vec<&str> = outcome
            .documents
            .iter()
            .filter(|document| document.doc_type == "article")
            .map(|document| document.id.as_str())
            .collect();
        assert_eq!(article_ids.len(), 2);

        let review = outcome
            .documents
            .iter()
            .find(|document| document.doc_type == "review")
            .expect("review document");
        let target = review
            .values
            .get(&path("subject"))
            .and_then(|value| value.as_reference())
            .expect("reference is set");
        assert!(article_ids.contains(&target));
    }
}

#[test]
fn pinned_number_bounds_are_honored() {
    let manifest = build(&[
        set_count("post", "4"),
        toggle("post", "rating", FieldKind::Number),
        set_option(
            "post",
            "rating",
            FieldOption::Min {
                raw: "5".to_string(),
            },
        ),
        set_option(
            "post",
            "rating",
            FieldOption::Max {
                raw: "5".to_string(),
            },
        ),
    ]);

    let outcome = generate(&manifest, 11);
    for document in &outcome.documents {
        assert_eq!(
            document.values.get(&path("rating")).and_then(|value| value.as_i64()),
            Some(5)
        );
    }
}

#[test]
fn inverted_bounds_leave_the_field_unset() {
    let manifest = build(&[
        set_count("post", "1"),
        toggle("post", "rating", FieldKind::Number),
        set_option(
            "post",
            "rating",
            FieldOption::Min {
                raw: "9".to_string(),
            },
        ),
        set_option(
            "post",
            "rating",
            FieldOption::Max {
                raw: "3".to_string(),
            },
        ),
    ]);

    let outcome = generate(&manifest, 3);
    assert!(outcome.documents[0].values.get(&path("rating")).is_none());
    assert_eq!(
        outcome.report.warnings_by_code.get("invalid_number_bounds"),
        Some(&1)
    );
}

#[test]
fn slugs_are_lowercase_and_whitespace_free() {
    let manifest = build(&[set_count("post", "8"), toggle("post", "slug", FieldKind::Slug)]);

    let outcome = generate(&manifest, 13);
    for document in &outcome.documents {
        let slug = document
            .values
            .get(&path("slug"))
            .and_then(|value| value.as_slug())
            .expect("slug is set");
        assert!(!slug.is_empty());
        assert!(!slug.chars().any(char::is_whitespace), "slug '{slug}'");
        assert_eq!(slug, slug.to_lowercase());
    }
}

#[test]
fn empty_reference_pools_degrade_to_unset() {
    let manifest = build(&[
        set_count("post", "1"),
        toggle("post", "author", FieldKind::Reference),
        set_option(
            "post",
            "author",
            FieldOption::Target {
                type_name: "author".to_string(),
                enabled: true,
            },
        ),
    ]);

    let outcome = generate(&manifest, 5);
    assert!(outcome.documents[0].values.get(&path("author")).is_none());
    assert_eq!(
        outcome.report.warnings_by_code.get("reference_pool_empty"),
        Some(&1)
    );
}

#[test]
fn arrays_collect_member_values() {
    let manifest = build(&[
        set_count("post", "3"),
        toggle("post", "tags", FieldKind::Array),
        toggle("post", "tags.string", FieldKind::String),
    ]);

    let outcome = generate(&manifest, 17);
    for document in &outcome.documents {
        let items = document
            .values
            .get(&path("tags"))
            .and_then(|value| value.as_array())
            .expect("tags is set");
        assert!(!items.is_empty() && items.len() <= 3);
        for item in items {
            assert!(item.as_str().is_some());
        }
        // The member selection is consumed by the array, never emitted.
        assert!(document.values.get(&path("tags.string")).is_none());
    }
}

#[test]
fn orphaned_member_selections_are_skipped() {
    let manifest = build(&[
        set_count("post", "1"),
        toggle("post", "tags.string", FieldKind::String),
    ]);

    let outcome = generate(&manifest, 19);
    assert!(outcome.documents[0].values.is_empty());
    assert_eq!(
        outcome.report.warnings_by_code.get("orphaned_selection"),
        Some(&1)
    );
}

#[test]
fn deep_array_nesting_is_capped() {
    let mut events = vec![set_count("post", "1")];
    let mut raw = String::from("tags");
    events.push(toggle("post", &raw, FieldKind::Array));
    for _ in 0..seedbed_core::MAX_FIELD_DEPTH {
        raw.push_str(".array");
        events.push(toggle("post", &raw, FieldKind::Array));
    }

    let manifest = build(&events);
    let outcome = generate(&manifest, 37);
    assert!(
        outcome
            .report
            .warnings_by_code
            .contains_key("member_depth_capped")
    );
}

#[test]
fn non_generatable_kinds_are_skipped() {
    let manifest = build(&[
        set_count("post", "1"),
        toggle("post", "location", FieldKind::Other),
    ]);

    let outcome = generate(&manifest, 23);
    assert!(outcome.documents[0].values.is_empty());
    assert_eq!(
        outcome.report.warnings_by_code.get("kind_not_generatable"),
        Some(&1)
    );
}

#[test]
fn the_same_seed_reproduces_the_batch() {
    let manifest = build(&[
        set_count("author", "2"),
        set_count("post", "2"),
        toggle("post", "title", FieldKind::String),
        toggle("post", "slug", FieldKind::Slug),
        toggle("post", "rating", FieldKind::Number),
        toggle("post", "author", FieldKind::Reference),
        set_option(
            "post",
            "author",
            FieldOption::Target {
                type_name: "author".to_string(),
                enabled: true,
            },
        ),
        toggle("author", "name", FieldKind::String),
    ]);

    let first = generate(&manifest, 42);
    let second = generate(&manifest, 42);
    assert_eq!(first.documents, second.documents);

    let other_seed = generate(&manifest, 43);
    assert_ne!(first.documents, other_seed.documents);
}

#[test]
fn output_follows_manifest_order() {
    let manifest = build(&[
        set_count("post", "2"),
        set_count("author", "1"),
        toggle("post", "title", FieldKind::String),
    ]);

    let outcome = generate(&manifest, 29);
    let order: Vec<&str> = outcome
        .documents
        .iter()
        .map(|document| document.doc_type.as_str())
        .collect();
    assert_eq!(order, vec!["author", "post", "post"]);
}

#[test]
fn store_documents_flatten_values_by_path() {
    let manifest = build(&[
        set_count("post", "1"),
        toggle("post", "title", FieldKind::String),
        toggle("post", "slug", FieldKind::Slug),
    ]);

    let outcome = generate(&manifest, 31);
    let wire = outcome.documents[0].to_store_value();

    assert_eq!(wire["_type"], "post");
    assert_eq!(wire["_id"], serde_json::json!(outcome.documents[0].id));
    assert!(wire["title"].is_string());
    assert!(wire["slug"]["current"].is_string());
}
