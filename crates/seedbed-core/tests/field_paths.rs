use std::collections::BTreeMap;

use seedbed_core::{Error, FieldPath};

#[test]
fn parses_and_renders_dotted_paths() {
    let path: FieldPath = "tags.string".parse().expect("parse path");
    assert_eq!(path.depth(), 2);
    assert_eq!(path.leaf(), "string");
    assert_eq!(path.to_string(), "tags.string");
}

#[test]
fn rejects_empty_and_separator_segments() {
    assert!(matches!(
        "".parse::<FieldPath>(),
        Err(Error::InvalidPath(_))
    ));
    assert!(matches!(
        "a..b".parse::<FieldPath>(),
        Err(Error::InvalidPath(_))
    ));
    let root = FieldPath::root("tags").expect("root path");
    assert!(matches!(root.child("a.b"), Err(Error::InvalidPath(_))));
}

#[test]
fn tracks_ancestry() {
    let parent: FieldPath = "tags".parse().expect("parse parent");
    let child = parent.child("string").expect("child path");
    let grandchild = child.child("number").expect("grandchild path");

    assert!(child.is_direct_child_of(&parent));
    assert!(!grandchild.is_direct_child_of(&parent));
    assert!(grandchild.starts_with(&parent));
    assert_eq!(child.parent(), Some(parent.clone()));
    assert_eq!(parent.parent(), None);
    assert!(parent.is_top_level());
    assert!(!child.is_top_level());
}

#[test]
fn serializes_as_map_key() {
    let mut map = BTreeMap::new();
    map.insert("slug.current".parse::<FieldPath>().expect("path"), 1);
    map.insert("title".parse::<FieldPath>().expect("path"), 2);

    let json = serde_json::to_string(&map).expect("serialize map");
    assert_eq!(json, r#"{"slug.current":1,"title":2}"#);

    let back: BTreeMap<FieldPath, i32> = serde_json::from_str(&json).expect("deserialize map");
    assert_eq!(back, map);
}
