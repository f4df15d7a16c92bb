//! Page content extraction
//!
//! Plain text, HTML, SVG, structured text, and search. All functions
//! operate on an already-loaded page; bounds checks and lifecycle checks
//! happen in the `Document` handle before the page reaches this module.

use mupdf::{Matrix, TextPageOptions};

use crate::document::{
    CharPosition, Error, Rect, Result, StructuredText, TextBlock, TextDirection, TextLine,
};

/// Plain text in MuPDF reading order
pub(crate) fn text(page: &mupdf::Page, index: usize) -> Result<String> {
    page.to_text().map_err(|e| Error::extract(index, e))
}

/// HTML fragment for a page.
///
/// MuPDF inlines embedded raster content as base64 `<img>` elements; when
/// `include_images` is false those elements are stripped from the output.
pub(crate) fn html(page: &mupdf::Page, index: usize, include_images: bool) -> Result<String> {
    let html = page.to_html().map_err(|e| Error::extract(index, e))?;
    if include_images {
        Ok(html)
    } else {
        Ok(strip_inline_images(&html))
    }
}

/// SVG representation of a page at identity scale
pub(crate) fn svg(page: &mupdf::Page, index: usize) -> Result<String> {
    page.to_svg(&Matrix::IDENTITY)
        .map_err(|e| Error::extract(index, e))
}

/// Structured text with per-character quads
pub(crate) fn structured_text(page: &mupdf::Page, index: usize) -> Result<StructuredText> {
    let bounds = page.bounds().map_err(|e| Error::extract(index, e))?;
    let text_page = page
        .to_text_page(TextPageOptions::empty())
        .map_err(|e| Error::extract(index, e))?;

    let mut blocks = Vec::new();

    for block in text_page.blocks() {
        let block_bounds = block.bounds();
        let mut lines = Vec::new();

        for line in block.lines() {
            let line_bounds = line.bounds();
            let mut chars = Vec::new();
            let mut line_text = String::new();

            for ch in line.chars() {
                if let Some(c) = ch.char() {
                    let quad = ch.quad();

                    let x = quad.ul.x.min(quad.ll.x);
                    let y = quad.ul.y.min(quad.ur.y);
                    let width = (quad.ur.x.max(quad.lr.x) - x).max(0.0);
                    let height = (quad.ll.y.max(quad.lr.y) - y).abs();

                    line_text.push(c);
                    chars.push(CharPosition {
                        char: c,
                        x,
                        y,
                        width,
                        height,
                        font_size: Some(ch.size()),
                    });
                }
            }

            let dir = match line.wmode() {
                mupdf::WriteMode::Horizontal => TextDirection::Ltr,
                mupdf::WriteMode::Vertical => TextDirection::Ttb,
            };

            lines.push(TextLine {
                bbox: Rect::from_ltrb(
                    line_bounds.x0,
                    line_bounds.y0,
                    line_bounds.x1,
                    line_bounds.y1,
                ),
                dir,
                text: line_text,
                chars,
            });
        }

        blocks.push(TextBlock {
            bbox: Rect::from_ltrb(
                block_bounds.x0,
                block_bounds.y0,
                block_bounds.x1,
                block_bounds.y1,
            ),
            lines,
        });
    }

    Ok(StructuredText {
        page: index,
        width: bounds.x1 - bounds.x0,
        height: bounds.y1 - bounds.y0,
        blocks,
    })
}

/// Search a page, returning hit rectangles in document order
pub(crate) fn search(
    page: &mupdf::Page,
    index: usize,
    needle: &str,
    max_hits: u32,
) -> Result<Vec<Rect>> {
    let quads = page
        .search(needle, max_hits)
        .map_err(|e| Error::extract(index, e))?;

    Ok(quads
        .into_iter()
        .map(|q| {
            let x = q.ul.x.min(q.ll.x);
            let y = q.ul.y.min(q.ur.y);
            let width = q.ur.x.max(q.lr.x) - x;
            let height = q.ll.y.max(q.lr.y) - y;
            Rect::new(x, y, width, height)
        })
        .collect())
}

/// Remove `<img ...>` elements from an HTML fragment.
///
/// MuPDF emits images as self-contained elements with base64 `src`
/// attributes, so dropping everything from `<img` to the next `>` is
/// sufficient; attribute values never contain `>`.
fn strip_inline_images(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find("<img") {
        out.push_str(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => rest = &rest[start + end + 1..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}
