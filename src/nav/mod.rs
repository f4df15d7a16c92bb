//! Navigation metadata
//!
//! Outline (table of contents), page links, and document metadata.

use mupdf::MetadataName;

use crate::document::{Error, Link, LinkDest, Metadata, OutlineEntry, Result};

/// Convert MuPDF outline nodes into the public hierarchical form.
pub(crate) fn convert_outlines(outlines: &[mupdf::Outline]) -> Vec<OutlineEntry> {
    outlines
        .iter()
        .map(|outline| OutlineEntry {
            title: outline.title.clone(),
            page: outline.page.map(|p| p as usize),
            uri: outline.uri.clone(),
            children: convert_outlines(&outline.down),
        })
        .collect()
}

/// Flatten a hierarchical outline into `(nesting_level, entry)` pairs in
/// reading order. The root entries are level 0.
pub fn flatten_outline(entries: &[OutlineEntry]) -> Vec<(usize, &OutlineEntry)> {
    let mut flat = Vec::new();
    push_level(entries, 0, &mut flat);
    flat
}

fn push_level<'a>(
    entries: &'a [OutlineEntry],
    level: usize,
    flat: &mut Vec<(usize, &'a OutlineEntry)>,
) {
    for entry in entries {
        flat.push((level, entry));
        push_level(&entry.children, level + 1, flat);
    }
}

/// Links on a page, classified as external URIs or internal page targets.
pub(crate) fn links(page: &mupdf::Page, index: usize) -> Result<Vec<Link>> {
    let iter = page.links().map_err(|e| Error::extract(index, e))?;

    Ok(iter
        .map(|link| {
            let dest = if is_external_uri(&link.uri) {
                LinkDest::Uri(link.uri)
            } else {
                LinkDest::Page(link.page as usize)
            };
            Link {
                bounds: link.bounds.into(),
                dest,
            }
        })
        .collect())
}

/// Whether a link URI leaves the document.
///
/// Follows MuPDF's `fz_is_external_link`: the URI is external when it
/// starts with a scheme (an ASCII letter followed by letters, digits,
/// `+`, `-`, or `.`) terminated by a colon. Fragment-only URIs like
/// `#page=3` are internal.
fn is_external_uri(uri: &str) -> bool {
    let mut chars = uri.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    for c in chars {
        match c {
            ':' => return true,
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {}
            _ => return false,
        }
    }
    false
}

/// MuPDF info keys, in the order the metadata map reports them.
const METADATA_KEYS: [(MetadataName, &str); 10] = [
    (MetadataName::Format, "format"),
    (MetadataName::Encryption, "encryption"),
    (MetadataName::Title, "title"),
    (MetadataName::Author, "author"),
    (MetadataName::Subject, "subject"),
    (MetadataName::Keywords, "keywords"),
    (MetadataName::Creator, "creator"),
    (MetadataName::Producer, "producer"),
    (MetadataName::CreationDate, "creationDate"),
    (MetadataName::ModDate, "modDate"),
];

/// Collect the sparse metadata mapping.
///
/// Lookup failures and empty values both mean "absent"; neither is an
/// error for the caller.
pub(crate) fn collect_metadata(doc: &mupdf::Document) -> Metadata {
    let mut metadata = Metadata::new();
    for (name, key) in METADATA_KEYS {
        if let Some(value) = doc.metadata(name).ok().filter(|s| !s.is_empty()) {
            metadata.insert(key.to_string(), value);
        }
    }
    metadata
}
