//! Document handle and lifecycle
//!
//! A [`Document`] owns its source (bytes or path) and exposes page-level
//! rendering, extraction, and navigation operations. It has exactly two
//! states, Open and Closed, with a one-way transition on [`Document::close`].
//!
//! # Thread safety
//!
//! MuPDF contexts are not thread-safe, so the native handle is never held
//! across operations. Each call locks the per-document mutex, opens a fresh
//! native document from the owned source, runs the operation, and drops the
//! handle before the lock is released. This keeps the native resource scoped
//! to a single operation on all exit paths, including panics.
//!
//! Distinct `Document` values share no state and may be used from different
//! threads freely.

mod error;
mod source;
mod types;

pub use error::{Error, Result};
pub use source::DocumentFormat;
pub use types::{
    CharPosition, Link, LinkDest, Metadata, OutlineEntry, Rect, StructuredText, TextBlock,
    TextDirection, TextLine,
};

use std::path::Path;

use image::RgbaImage;
use parking_lot::Mutex;
use tracing::debug;

use crate::render::{self, RenderOptions};
use crate::{extract, nav};
use source::DocumentSource;

/// Lifecycle state guarded by the per-document mutex
enum Inner {
    Open(DocumentSource),
    Closed,
}

/// An opened document
///
/// Created with [`Document::open`] or [`Document::from_bytes`]. All
/// accessors fail with [`Error::Closed`] after [`Document::close`];
/// closing twice is a no-op.
pub struct Document {
    inner: Mutex<Inner>,
    format: DocumentFormat,
    page_count: usize,
}

impl Document {
    /// Open a document from a file path.
    ///
    /// The format is detected from the extension, falling back to magic
    /// bytes. The document is opened once eagerly so corrupt or unsupported
    /// content is rejected here rather than on first access.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        // Surface missing/unreadable files as IO errors before MuPDF sees them
        let meta = std::fs::metadata(path)?;
        if !meta.is_file() {
            return Err(Error::Open(format!("not a file: {}", path.display())));
        }

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(DocumentFormat::from_extension)
            .or_else(|| sniff_file(path))
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!("unrecognized document: {}", path.display()))
            })?;

        let source = DocumentSource::from_path(path);
        let page_count = validate(&source, format)?;
        debug!(path = %path.display(), ?format, page_count, "opened document");

        Ok(Self {
            inner: Mutex::new(Inner::Open(source)),
            format,
            page_count,
        })
    }

    /// Open a document from an owned in-memory buffer.
    ///
    /// The buffer is kept alive for the lifetime of the handle and released
    /// on [`Document::close`] (or drop).
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::Open("empty buffer".into()));
        }

        let format = DocumentFormat::from_magic_bytes(&data)
            .ok_or_else(|| Error::UnsupportedFormat("unrecognized magic bytes".into()))?;

        let source = DocumentSource::from_bytes(data);
        let page_count = validate(&source, format)?;
        debug!(?format, page_count, "opened document from memory");

        Ok(Self {
            inner: Mutex::new(Inner::Open(source)),
            format,
            page_count,
        })
    }

    /// Detected container format
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Whether [`Document::close`] has been called
    pub fn is_closed(&self) -> bool {
        matches!(*self.inner.lock(), Inner::Closed)
    }

    /// Release the document's resources.
    ///
    /// Drops the owned source buffer and moves the handle to the Closed
    /// state. Idempotent: closing an already-closed document is a no-op, so
    /// unconditional cleanup paths may call it freely.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        if matches!(*inner, Inner::Open(_)) {
            *inner = Inner::Closed;
            debug!("closed document");
        }
    }

    /// Number of pages
    pub fn page_count(&self) -> Result<usize> {
        // The count is cached at open time, but reading it is still an
        // accessor and must fail deterministically on a closed handle.
        match *self.inner.lock() {
            Inner::Open(_) => Ok(self.page_count),
            Inner::Closed => Err(Error::Closed),
        }
    }

    /// Rasterize a page at the given zoom factor (1.0 = 72 dpi)
    pub fn render_page(&self, index: usize, scale: f32) -> Result<RgbaImage> {
        self.render_page_with(
            index,
            &RenderOptions {
                scale,
                ..RenderOptions::default()
            },
        )
    }

    /// Rasterize a page with explicit options
    pub fn render_page_with(&self, index: usize, options: &RenderOptions) -> Result<RgbaImage> {
        self.with_page(index, Error::render, |page| {
            render::rasterize(page, index, options)
        })
    }

    /// Rasterize a page and encode it as PNG
    pub fn render_page_png(&self, index: usize, scale: f32) -> Result<Vec<u8>> {
        let image = self.render_page(index, scale)?;
        render::encode_png(&image)
    }

    /// Page dimensions in points (width, height)
    pub fn page_size(&self, index: usize) -> Result<(f32, f32)> {
        self.with_page(index, Error::extract, |page| {
            let bounds = page.bounds().map_err(|e| Error::extract(index, e))?;
            Ok((bounds.x1 - bounds.x0, bounds.y1 - bounds.y0))
        })
    }

    /// Plain text content of a page, in MuPDF reading order
    pub fn text(&self, index: usize) -> Result<String> {
        self.with_page(index, Error::extract, |page| extract::text(page, index))
    }

    /// HTML fragment for a page.
    ///
    /// With `include_images` set, embedded raster content is inlined as
    /// base64 `<img>` elements; otherwise image elements are stripped.
    pub fn html(&self, index: usize, include_images: bool) -> Result<String> {
        self.with_page(index, Error::extract, |page| {
            extract::html(page, index, include_images)
        })
    }

    /// SVG representation of a page
    pub fn svg(&self, index: usize) -> Result<String> {
        self.with_page(index, Error::extract, |page| extract::svg(page, index))
    }

    /// Structured text with per-character positions
    pub fn structured_text(&self, index: usize) -> Result<StructuredText> {
        self.with_page(index, Error::extract, |page| {
            extract::structured_text(page, index)
        })
    }

    /// Search a page for `needle`, returning hit rectangles
    pub fn search_page(&self, index: usize, needle: &str, max_hits: u32) -> Result<Vec<Rect>> {
        self.with_page(index, Error::extract, |page| {
            extract::search(page, index, needle, max_hits)
        })
    }

    /// Hierarchical table of contents.
    ///
    /// Documents without an outline yield an empty vec, not an error.
    pub fn outline(&self) -> Result<Vec<OutlineEntry>> {
        self.with_native(|doc| {
            let outlines = doc
                .outlines()
                .map_err(|e| Error::Outline(e.to_string()))?;
            Ok(nav::convert_outlines(&outlines))
        })
    }

    /// Links on a page, in document order.
    ///
    /// Pages without links yield an empty vec, not an error.
    pub fn links(&self, index: usize) -> Result<Vec<Link>> {
        self.with_page(index, Error::extract, |page| nav::links(page, index))
    }

    /// Document metadata.
    ///
    /// Keys absent from the source document are missing from the map, so
    /// the result may be empty.
    pub fn metadata(&self) -> Result<Metadata> {
        self.with_native(|doc| Ok(nav::collect_metadata(doc)))
    }

    /// Run `f` against a fresh native document under the handle mutex.
    fn with_native<T>(&self, f: impl FnOnce(&mupdf::Document) -> Result<T>) -> Result<T> {
        let inner = self.inner.lock();
        match &*inner {
            Inner::Closed => Err(Error::Closed),
            Inner::Open(source) => {
                let doc = source.open_native(self.format)?;
                f(&doc)
            }
        }
    }

    /// Bounds-check `index`, load the page, and run `f` against it.
    ///
    /// `wrap` converts the native load failure into the operation's error
    /// category (render vs. extract).
    fn with_page<T>(
        &self,
        index: usize,
        wrap: fn(usize, mupdf::Error) -> Error,
        f: impl FnOnce(&mupdf::Page) -> Result<T>,
    ) -> Result<T> {
        let inner = self.inner.lock();
        let source = match &*inner {
            Inner::Closed => return Err(Error::Closed),
            Inner::Open(source) => source,
        };

        if index >= self.page_count {
            return Err(Error::PageOutOfRange {
                index,
                count: self.page_count,
            });
        }

        let doc = source.open_native(self.format)?;
        let page = doc.load_page(index as i32).map_err(|e| wrap(index, e))?;
        f(&page)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("format", &self.format)
            .field("page_count", &self.page_count)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Open the source once to reject corrupt content and cache the page count.
fn validate(source: &DocumentSource, format: DocumentFormat) -> Result<usize> {
    let doc = source.open_native(format)?;
    let count = doc.page_count().map_err(Error::open)?;
    Ok(count.max(0) as usize)
}

/// Read leading bytes of a file for magic-based format detection.
fn sniff_file(path: &Path) -> Option<DocumentFormat> {
    use std::io::Read;

    let mut head = [0u8; 64];
    let mut file = std::fs::File::open(path).ok()?;
    let n = file.read(&mut head).ok()?;
    DocumentFormat::from_magic_bytes(&head[..n])
}
