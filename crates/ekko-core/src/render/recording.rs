use crate::chart::{ChartImage, ImageFormat};
use crate::error::EkkoError;
use crate::render::geometry::{Point, Rect, Shape, Table, TextStyle};
use crate::render::RenderBackend;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
    Table {
        table: Table,
        at: Point,
    },
    Shape {
        shape: Shape,
    },
    Image {
        format: ImageFormat,
        rect: Rect,
        /// Encoded size; the bytes themselves are not kept.
        bytes: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedPage {
    pub ops: Vec<DrawOp>,
}

impl RecordedPage {
    /// Text of every text op on the page, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// The saved layout file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedLayout {
    /// Name of the document the layout stands in for.
    pub document: String,
    pub pages: Vec<RecordedPage>,
}

/// Backend that records draw calls per page and saves them as a JSON
/// layout instead of rasterizing.
///
/// `save("dir/EKKO_2024-01-01.pdf")` writes `dir/EKKO_2024-01-01.layout.json`
/// through a temporary file in the same directory, so a failed save leaves
/// nothing behind.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pages: Vec<RecordedPage>,
    current: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[RecordedPage] {
        &self.pages
    }

    /// Path the layout is written to for a requested output path.
    pub fn layout_path(path: &Path) -> PathBuf {
        path.with_extension("layout.json")
    }

    fn push(&mut self, op: DrawOp) -> Result<(), EkkoError> {
        let index = self
            .current
            .ok_or_else(|| EkkoError::Rendering("draw call before any page was added".into()))?;
        let page = self
            .pages
            .get_mut(index)
            .ok_or_else(|| EkkoError::Rendering(format!("page {} does not exist", index + 1)))?;
        page.ops.push(op);
        Ok(())
    }
}

impl RenderBackend for RecordingBackend {
    fn new_page(&mut self) -> usize {
        self.pages.push(RecordedPage::default());
        self.current = Some(self.pages.len() - 1);
        self.pages.len()
    }

    fn set_page(&mut self, page: usize) -> Result<(), EkkoError> {
        if page == 0 || page > self.pages.len() {
            return Err(EkkoError::Rendering(format!(
                "page {} out of range (1-{})",
                page,
                self.pages.len()
            )));
        }
        self.current = Some(page - 1);
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: Point, style: TextStyle) -> Result<(), EkkoError> {
        self.push(DrawOp::Text {
            text: text.to_string(),
            at,
            style,
        })
    }

    fn draw_table(&mut self, table: &Table, at: Point) -> Result<(), EkkoError> {
        self.push(DrawOp::Table {
            table: table.clone(),
            at,
        })
    }

    fn draw_shape(&mut self, shape: &Shape) -> Result<(), EkkoError> {
        self.push(DrawOp::Shape {
            shape: shape.clone(),
        })
    }

    fn embed_image(&mut self, image: &ChartImage, rect: Rect) -> Result<(), EkkoError> {
        if image.bytes.is_empty() {
            return Err(EkkoError::Rendering("cannot embed an empty image".into()));
        }
        self.push(DrawOp::Image {
            format: image.format,
            rect,
            bytes: image.bytes.len(),
        })
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn save(&mut self, path: &Path) -> Result<PathBuf, EkkoError> {
        let target = Self::layout_path(path);
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let layout = RecordedLayout {
            document: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            pages: self.pages.clone(),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, &layout)?;
        tmp.flush()?;
        tmp.persist(&target).map_err(|e| EkkoError::Io(e.error))?;

        tracing::debug!(path = %target.display(), pages = self.pages.len(), "layout persisted");
        Ok(target)
    }

    fn backend_name(&self) -> &str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::geometry::BLACK;

    #[test]
    fn test_draw_before_page_fails() {
        let mut backend = RecordingBackend::new();
        let err = backend
            .draw_text("x", Point::new(0.0, 0.0), TextStyle::new(10.0, BLACK))
            .unwrap_err();
        assert!(matches!(err, EkkoError::Rendering(_)));
    }

    #[test]
    fn test_set_page_bounds() {
        let mut backend = RecordingBackend::new();
        backend.new_page();
        backend.new_page();
        assert!(backend.set_page(1).is_ok());
        assert!(backend.set_page(0).is_err());
        assert!(backend.set_page(3).is_err());
    }

    #[test]
    fn test_ops_go_to_current_page() {
        let mut backend = RecordingBackend::new();
        backend.new_page();
        backend.new_page();
        backend.set_page(1).unwrap();
        backend
            .draw_text("primeira", Point::new(0.0, 0.0), TextStyle::new(10.0, BLACK))
            .unwrap();
        assert_eq!(backend.pages()[0].texts(), vec!["primeira"]);
        assert!(backend.pages()[1].ops.is_empty());
    }

    #[test]
    fn test_save_writes_layout_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = RecordingBackend::new();
        backend.new_page();
        backend
            .draw_text("EKKO", Point::new(20.0, 290.0), TextStyle::new(8.0, BLACK))
            .unwrap();

        let written = backend.save(&dir.path().join("EKKO_2024-01-01.pdf")).unwrap();
        assert_eq!(written, dir.path().join("EKKO_2024-01-01.layout.json"));

        let layout: RecordedLayout =
            serde_json::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(layout.document, "EKKO_2024-01-01.pdf");
        assert_eq!(layout.pages.len(), 1);

        // Only the layout itself is left in the directory.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
