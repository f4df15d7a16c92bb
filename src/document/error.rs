//! Crate error types
//!
//! Every fallible operation returns [`Error`]. Native MuPDF failures are
//! caught at the boundary and converted with enough context to tell an
//! open failure from a render or extraction failure on a specific page.

use thiserror::Error;

/// Unified error type for all document operations
#[derive(Debug, Error)]
pub enum Error {
    /// The source could not be opened as a document
    #[error("failed to open document: {0}")]
    Open(String),

    /// The source is not a format MuPDF understands
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Page index outside `[0, page_count)`
    #[error("page index {index} out of range for document with {count} pages")]
    PageOutOfRange { index: usize, count: usize },

    /// MuPDF signaled a failure while rasterizing a page
    #[error("render failed on page {page}: {reason}")]
    Render { page: usize, reason: String },

    /// MuPDF signaled a failure while extracting page content
    #[error("extraction failed on page {page}: {reason}")]
    Extract { page: usize, reason: String },

    /// MuPDF signaled a failure while reading the document outline
    #[error("failed to read outline: {0}")]
    Outline(String),

    /// Operation attempted after `close()`
    #[error("document is closed")]
    Closed,

    /// Raster buffer conversion or encoding failed
    #[error("image error: {0}")]
    Image(String),

    /// IO error (std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap a native error raised while rendering `page`.
    pub(crate) fn render(page: usize, err: mupdf::Error) -> Self {
        Error::Render {
            page,
            reason: err.to_string(),
        }
    }

    /// Wrap a native error raised while extracting from `page`.
    pub(crate) fn extract(page: usize, err: mupdf::Error) -> Self {
        Error::Extract {
            page,
            reason: err.to_string(),
        }
    }

    /// Wrap a native error raised while opening a document.
    pub(crate) fn open(err: mupdf::Error) -> Self {
        Error::Open(err.to_string())
    }
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, Error>;
