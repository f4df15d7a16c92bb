//! Outline, links, and metadata

mod common;

use lectern::{flatten_outline, Document, LinkDest};

#[test]
fn link_page_has_exactly_one_external_link() {
    let doc = Document::from_bytes(common::fixture_bytes()).unwrap();
    let links = doc.links(common::LINK_PAGE).unwrap();

    assert_eq!(links.len(), 1, "links: {links:?}");
    assert_eq!(links[0].uri(), Some(common::LICENSE_URI));
    assert_eq!(links[0].target_page(), None);
    assert!(links[0].bounds.width > 0.0);
    assert!(links[0].bounds.height > 0.0);
}

#[test]
fn pages_without_annotations_have_no_links() {
    let doc = Document::from_bytes(common::fixture_bytes()).unwrap();
    assert!(doc.links(0).unwrap().is_empty());
    assert!(doc.links(1).unwrap().is_empty());
}

#[test]
fn outline_preserves_hierarchy() {
    let doc = Document::from_bytes(common::fixture_bytes()).unwrap();
    let outline = doc.outline().unwrap();

    assert_eq!(outline.len(), 2);
    assert_eq!(outline[0].title, "Introduction");
    assert_eq!(outline[0].page, Some(0));
    assert_eq!(outline[0].children.len(), 1);
    assert_eq!(outline[0].children[0].title, "Getting Started");
    assert_eq!(outline[0].children[0].page, Some(1));
    assert_eq!(outline[1].title, "License");
    assert_eq!(outline[1].page, Some(2));

    let flat = flatten_outline(&outline);
    let levels: Vec<usize> = flat.iter().map(|(level, _)| *level).collect();
    assert_eq!(levels, vec![0, 1, 0]);
}

#[test]
fn metadata_exposes_info_dictionary() {
    let doc = Document::from_bytes(common::fixture_bytes()).unwrap();
    let metadata = doc.metadata().unwrap();

    assert!(!metadata.is_empty());
    assert_eq!(metadata.get("title").map(String::as_str), Some(common::TITLE));
    assert_eq!(
        metadata.get("author").map(String::as_str),
        Some(common::AUTHOR)
    );
}

#[test]
fn metadata_omits_absent_keys() {
    let doc = Document::from_bytes(common::fixture_bytes()).unwrap();
    let metadata = doc.metadata().unwrap();
    // The fixture sets no Keywords entry
    assert!(metadata.get("keywords").is_none());
}

#[test]
fn links_serialize_to_json() {
    let doc = Document::from_bytes(common::fixture_bytes()).unwrap();
    let links = doc.links(common::LINK_PAGE).unwrap();
    let json = serde_json::to_string(&links).unwrap();
    assert!(json.contains(common::LICENSE_URI));

    let roundtrip: Vec<lectern::Link> = serde_json::from_str(&json).unwrap();
    assert_eq!(roundtrip.len(), 1);
    assert!(matches!(roundtrip[0].dest, LinkDest::Uri(_)));
}
