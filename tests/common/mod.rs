//! Shared test fixture
//!
//! Builds a small three-page PDF in memory with lopdf so the test suite
//! carries no binary fixtures. The document has:
//!
//! - three pages of Helvetica text
//! - one URI link annotation on page index 2
//! - an Info dictionary (title, author, subject, creator)
//! - a two-level outline

// Not every test binary uses every helper
#![allow(dead_code)]

use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};

pub const PAGE_COUNT: usize = 3;
pub const LINK_PAGE: usize = 2;
pub const LICENSE_URI: &str = "https://creativecommons.org/licenses/by-nc-sa/4.0/";

pub const TITLE: &str = "Lectern Fixture";
pub const AUTHOR: &str = "Fixture Author";

const PAGE_TEXTS: [&str; PAGE_COUNT] = [
    "Page one: welcome to the fixture.",
    "Page two: more sample content.",
    "Page three: licensed under CC BY-NC-SA 4.0.",
];

/// Serialized fixture PDF
pub fn fixture_bytes() -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let link_annot_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![72.into(), 680.into(), 300.into(), 704.into()],
        "Border" => vec![0.into(), 0.into(), 0.into()],
        "A" => Object::Dictionary(dictionary! {
            "Type" => "Action",
            "S" => "URI",
            "URI" => Object::string_literal(LICENSE_URI),
        }),
    });

    let mut page_ids = Vec::with_capacity(PAGE_COUNT);
    for (index, text) in PAGE_TEXTS.iter().enumerate() {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 18.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if index == LINK_PAGE {
            page.set("Annots", vec![link_annot_id.into()]);
        }
        page_ids.push(doc.add_object(page));
    }

    // Outline: Introduction (child: Getting Started), License
    let outlines_id = doc.new_object_id();
    let intro_id = doc.new_object_id();
    let child_id = doc.new_object_id();
    let license_id = doc.new_object_id();

    doc.objects.insert(
        intro_id,
        Object::Dictionary(dictionary! {
            "Title" => Object::string_literal("Introduction"),
            "Parent" => outlines_id,
            "Next" => license_id,
            "First" => child_id,
            "Last" => child_id,
            "Count" => 1,
            "Dest" => vec![page_ids[0].into(), "Fit".into()],
        }),
    );
    doc.objects.insert(
        child_id,
        Object::Dictionary(dictionary! {
            "Title" => Object::string_literal("Getting Started"),
            "Parent" => intro_id,
            "Dest" => vec![page_ids[1].into(), "Fit".into()],
        }),
    );
    doc.objects.insert(
        license_id,
        Object::Dictionary(dictionary! {
            "Title" => Object::string_literal("License"),
            "Parent" => outlines_id,
            "Prev" => intro_id,
            "Dest" => vec![page_ids[2].into(), "Fit".into()],
        }),
    );
    doc.objects.insert(
        outlines_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => intro_id,
            "Last" => license_id,
            "Count" => 3,
        }),
    );

    let kids: Vec<Object> = page_ids.iter().map(|id| (*id).into()).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => PAGE_COUNT as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "Outlines" => outlines_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(TITLE),
        "Author" => Object::string_literal(AUTHOR),
        "Subject" => Object::string_literal("Integration testing"),
        "Creator" => Object::string_literal("lectern test suite"),
    });
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("serialize fixture PDF");
    buffer
}

/// Fixture written to a temp file with a `.pdf` extension
pub fn fixture_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("lectern-fixture")
        .suffix(".pdf")
        .tempfile()
        .expect("create temp file");
    file.write_all(&fixture_bytes()).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

/// Substring expected in the extracted text of each page
pub fn page_text_marker(index: usize) -> &'static str {
    match index {
        0 => "Page one",
        1 => "Page two",
        _ => "Page three",
    }
}
