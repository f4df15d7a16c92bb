//! Document source and format detection
//!
//! A `Document` keeps its source (owned bytes or a path) rather than a
//! long-lived native handle: MuPDF contexts are not thread-safe, so each
//! operation opens a fresh native document and drops it before returning.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Document container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Xps,
    Epub,
    Cbz,
}

impl DocumentFormat {
    /// Detect format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "xps" | "oxps" => Some(Self::Xps),
            "epub" => Some(Self::Epub),
            "cbz" => Some(Self::Cbz),
            _ => None,
        }
    }

    /// Detect format from a MIME type
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            "application/oxps" | "application/vnd.ms-xpsdocument" => Some(Self::Xps),
            "application/epub+zip" => Some(Self::Epub),
            "application/x-cbz" => Some(Self::Cbz),
            _ => None,
        }
    }

    /// Detect format from leading magic bytes.
    ///
    /// ZIP-based containers (XPS, EPUB, CBZ) all start with `PK`; only EPUB
    /// is distinguishable from the header alone because its uncompressed
    /// `mimetype` entry appears in the first archive record. Other ZIPs are
    /// not assumed to be documents to avoid false positives with .docx,
    /// .jar and similar containers.
    pub fn from_magic_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        if bytes.starts_with(b"%PDF") {
            return Some(Self::Pdf);
        }

        if bytes.starts_with(b"PK") && bytes.len() > 30 {
            // The mimetype entry is stored uncompressed as the first archive
            // record, but the header fields around it (CRC32, sizes) are
            // arbitrary bytes, so search raw bytes rather than decoding.
            let head = &bytes[..bytes.len().min(64)];
            if head.windows(4).any(|w| w == b"epub") {
                return Some(Self::Epub);
            }
        }

        None
    }

    /// MIME type passed to MuPDF when opening from memory
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Xps => "application/oxps",
            Self::Epub => "application/epub+zip",
            Self::Cbz => "application/x-cbz",
        }
    }
}

/// Where the document bytes live
#[derive(Clone)]
pub(crate) enum DocumentSource {
    /// Owned in-memory copy
    Bytes(Arc<Vec<u8>>),
    /// On-disk file, read by MuPDF on each open
    Path(PathBuf),
}

impl DocumentSource {
    pub(crate) fn from_bytes(data: Vec<u8>) -> Self {
        Self::Bytes(Arc::new(data))
    }

    pub(crate) fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }

    /// Open a fresh native document for one operation.
    ///
    /// The returned handle must not outlive the calling operation; the
    /// caller drops it before releasing the per-document mutex.
    pub(crate) fn open_native(&self, format: DocumentFormat) -> Result<mupdf::Document> {
        match self {
            DocumentSource::Bytes(data) => {
                mupdf::Document::from_bytes(data, format.mime()).map_err(Error::open)
            }
            DocumentSource::Path(path) => {
                let path_str = path.to_string_lossy();
                mupdf::Document::open(path_str.as_ref()).map_err(Error::open)
            }
        }
    }
}
