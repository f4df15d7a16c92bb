//! Public data types
//!
//! Everything returned to callers is an independent copy with no
//! back-reference to the `Document` it came from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Document metadata mapping. Keys follow the MuPDF info names
/// (`title`, `author`, `subject`, ...); keys absent from the source
/// document are simply missing from the map.
pub type Metadata = BTreeMap<String, String>;

/// Rectangle in page coordinates (points, origin top-left)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

impl From<mupdf::Rect> for Rect {
    fn from(r: mupdf::Rect) -> Self {
        Rect::from_ltrb(r.x0, r.y0, r.x1, r.y1)
    }
}

/// A link region on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Link rectangle on the page
    pub bounds: Rect,
    /// Where the link goes
    pub dest: LinkDest,
}

/// Link destination: external URI or a page within the same document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkDest {
    /// External target (scheme-qualified URI)
    Uri(String),
    /// Zero-based page index within the same document
    Page(usize),
}

impl Link {
    /// The external URI, if this link leaves the document.
    pub fn uri(&self) -> Option<&str> {
        match &self.dest {
            LinkDest::Uri(uri) => Some(uri),
            LinkDest::Page(_) => None,
        }
    }

    /// The internal target page, if this link stays in the document.
    pub fn target_page(&self) -> Option<usize> {
        match &self.dest {
            LinkDest::Uri(_) => None,
            LinkDest::Page(page) => Some(*page),
        }
    }
}

/// Table of contents entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineEntry {
    /// Entry title
    pub title: String,
    /// Zero-based target page, when the entry points into the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    /// Target URI, when the entry points outside the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Nested children
    pub children: Vec<OutlineEntry>,
}

/// Structured text for one page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredText {
    /// Zero-based page index
    pub page: usize,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Text blocks in reading order
    pub blocks: Vec<TextBlock>,
}

/// Text block (paragraph-level grouping)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    /// Bounding box
    pub bbox: Rect,
    /// Lines within the block
    pub lines: Vec<TextLine>,
}

/// Text line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLine {
    /// Bounding box
    pub bbox: Rect,
    /// Writing direction
    pub dir: TextDirection,
    /// Line text content
    pub text: String,
    /// Character positions within the line
    pub chars: Vec<CharPosition>,
}

/// Character with its position and size
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharPosition {
    pub char: char,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

/// Text direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Ttb,
}
