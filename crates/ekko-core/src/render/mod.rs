//! Drawing a [`ReportDocument`] onto pages.
//!
//! The document is backend-independent; a [`RenderBackend`] receives
//! positioned primitives one page at a time and owns the output file.

pub mod geometry;
pub mod pages;
pub mod recording;

use crate::chart::ChartImage;
use crate::error::EkkoError;
use crate::report::{ReportDocument, Section};
use geometry::{Point, Rect, Shape, Table, TextStyle};
use std::path::{Path, PathBuf};

/// Trait for page-oriented output backends.
pub trait RenderBackend {
    /// Append a page and make it current. Returns its 1-based number.
    fn new_page(&mut self) -> usize;

    /// Make an existing page current.
    fn set_page(&mut self, page: usize) -> Result<(), EkkoError>;

    fn draw_text(&mut self, text: &str, at: Point, style: TextStyle) -> Result<(), EkkoError>;

    /// Draw a table whose top-left corner is `at`.
    fn draw_table(&mut self, table: &Table, at: Point) -> Result<(), EkkoError>;

    fn draw_shape(&mut self, shape: &Shape) -> Result<(), EkkoError>;

    /// Place an encoded image inside `rect`.
    fn embed_image(&mut self, image: &ChartImage, rect: Rect) -> Result<(), EkkoError>;

    fn page_count(&self) -> usize;

    /// Write the finished output. Returns the path actually written.
    fn save(&mut self, path: &Path) -> Result<PathBuf, EkkoError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Draw every section on its own page, overlay the footer on every page,
/// then save to `out_dir/<file name>`.
pub fn export(
    document: &ReportDocument,
    backend: &mut dyn RenderBackend,
    out_dir: &Path,
) -> Result<PathBuf, EkkoError> {
    tracing::info!(
        file = %document.file_name,
        backend = backend.backend_name(),
        sections = document.sections.len(),
        "exporting report"
    );

    for section in &document.sections {
        backend.new_page();
        match section {
            Section::Cover(cover) => pages::draw_cover(backend, cover)?,
            Section::Summary(summary) => pages::draw_summary(backend, summary)?,
            Section::ParameterDetail(detail) => pages::draw_detail(backend, detail)?,
            Section::ProductCatalog(catalog) => pages::draw_catalog(backend, catalog)?,
        }
        tracing::debug!(kind = section.kind(), page = backend.page_count(), "section drawn");
    }

    let total = backend.page_count();
    for page in 1..=total {
        backend.set_page(page)?;
        pages::draw_footer(backend, &document.footer, page, total)?;
    }

    let written = backend.save(&out_dir.join(&document.file_name))?;
    tracing::info!(path = %written.display(), pages = total, "report saved");
    Ok(written)
}
