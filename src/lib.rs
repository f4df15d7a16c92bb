//! Lectern
//!
//! Safe, high-level document rendering and text extraction built on MuPDF.
//!
//! The crate wraps the `mupdf` bindings behind a [`Document`] handle that
//! owns its source, serializes all native access, and converts MuPDF's
//! failure modes into typed errors. All parsing, layout, and rasterization
//! is delegated to MuPDF; this crate is the marshaling layer.
//!
//! # Modules
//!
//! - `document`: the `Document` handle, its lifecycle, and public data types
//! - `render`: page rasterization to RGBA pixel buffers
//! - `extract`: plain-text, HTML, SVG, and structured text extraction
//! - `nav`: outline, link, and metadata access
//!
//! # Usage
//!
//! ```rust,ignore
//! use lectern::Document;
//!
//! let doc = Document::open("book.pdf")?;
//! for index in 0..doc.page_count()? {
//!     let image = doc.render_page(index, 2.0)?;
//!     let text = doc.text(index)?;
//! }
//! doc.close();
//! ```

pub mod document;

// Operation internals; their public pieces are re-exported below.
pub(crate) mod extract;
pub(crate) mod nav;
pub(crate) mod render;

pub use document::{
    CharPosition, Document, DocumentFormat, Error, Link, LinkDest, Metadata, OutlineEntry, Rect,
    Result, StructuredText, TextBlock, TextDirection, TextLine,
};
pub use nav::flatten_outline;
pub use render::RenderOptions;

// Raster output type, re-exported so callers do not need a direct
// dependency on the image crate.
pub use image::RgbaImage;
