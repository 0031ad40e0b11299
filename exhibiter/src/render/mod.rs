//! Page rendering.
//!
//! Everything that produces or alters page content goes through the
//! [`PageRenderer`] trait, so assembly never deals with PDF operators or
//! image decoding directly. [`LopdfRenderer`] is the implementation used
//! by the CLI.

pub mod canvas;
pub mod font;
pub mod page;

use std::path::{Path, PathBuf};

use crate::config::LabelPosition;
use crate::error::{ExhibitError, Result};
use crate::index::ExhibitIndex;

pub use canvas::LopdfRenderer;
pub use page::Page;

/// Produces the pages that make up an exhibit.
pub trait PageRenderer {
    /// A US Letter page reading `EXHIBIT <index>`.
    fn render_cover_page(&self, index: &ExhibitIndex) -> Result<Page>;

    /// One US Letter page showing the image at `path`, rotated when it is
    /// landscape and `rotate_landscape` is set.
    fn render_image_as_page(&self, path: &Path, rotate_landscape: bool) -> Result<Page>;

    /// Draw `label` over `page` on a white backing box.
    fn stamp_label(&self, page: &mut Page, label: &str, position: LabelPosition) -> Result<()>;

    /// Every page of the PDF at `path`, in order.
    fn load_pdf_pages(&self, path: &Path) -> Result<Vec<Page>>;
}

/// A file that contributes pages, classified once by its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// A PDF; each of its pages is kept as is.
    Pdf(PathBuf),
    /// A PNG or JPEG placed on a page of its own.
    Image(PathBuf),
}

impl PageSource {
    /// Classify `path`, failing with `UnsupportedType` for anything that
    /// is not a PDF, PNG or JPEG.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("pdf") => Ok(Self::Pdf(path.to_path_buf())),
            Some("png" | "jpg" | "jpeg") => Ok(Self::Image(path.to_path_buf())),
            _ => Err(ExhibitError::unsupported_type(path.to_path_buf())),
        }
    }

    /// The file behind this source.
    pub fn path(&self) -> &Path {
        match self {
            Self::Pdf(path) | Self::Image(path) => path,
        }
    }

    /// Render the source into pages.
    pub fn render<R: PageRenderer + ?Sized>(
        &self,
        renderer: &R,
        rotate_landscape: bool,
    ) -> Result<Vec<Page>> {
        match self {
            Self::Pdf(path) => renderer.load_pdf_pages(path),
            Self::Image(path) => Ok(vec![renderer.render_image_as_page(path, rotate_landscape)?]),
        }
    }
}
