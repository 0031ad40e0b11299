//! Fixtures for unit tests.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::config::LabelPosition;
use crate::error::Result;
use crate::index::ExhibitIndex;
use crate::render::{LopdfRenderer, Page, PageRenderer};

/// A document with `pages` Letter pages, each reading `Page <n>`.
pub fn pdf_document(pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let mut kids = Vec::with_capacity(pages);
    for n in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("Page {n}"))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Write a PDF with `pages` pages to `dir/name`.
pub fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let path = dir.join(name);
    pdf_document(pages).save(&path).expect("save test pdf");
    path
}

/// Write a solid-colour PNG of `width` x `height` pixels to `dir/name`.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]))
        .save(&path)
        .expect("save test png");
    path
}

/// Write a colour JPEG of `width` x `height` pixels to `dir/name`.
pub fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(width, height, image::Rgb([40, 90, 160]))
        .save_with_format(&path, image::ImageFormat::Jpeg)
        .expect("save test jpeg");
    path
}

/// Write a greyscale JPEG of `width` x `height` pixels to `dir/name`.
pub fn write_gray_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::GrayImage::from_pixel(width, height, image::Luma([128]))
        .save_with_format(&path, image::ImageFormat::Jpeg)
        .expect("save test jpeg");
    path
}

/// Renderer that loads real pages but only records page labels.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    inner: LopdfRenderer,
    /// Every label passed to `stamp_label`, in order.
    pub labels: RefCell<Vec<String>>,
    /// Every cover page index rendered, in order.
    pub covers: RefCell<Vec<String>>,
}

impl PageRenderer for RecordingRenderer {
    fn render_cover_page(&self, index: &ExhibitIndex) -> Result<Page> {
        self.covers.borrow_mut().push(index.to_string());
        Ok(Page::letter())
    }

    fn render_image_as_page(&self, _path: &Path, _rotate_landscape: bool) -> Result<Page> {
        Ok(Page::letter())
    }

    fn stamp_label(&self, _page: &mut Page, label: &str, _position: LabelPosition) -> Result<()> {
        self.labels.borrow_mut().push(label.to_string());
        Ok(())
    }

    fn load_pdf_pages(&self, path: &Path) -> Result<Vec<Page>> {
        self.inner.load_pdf_pages(path)
    }
}
