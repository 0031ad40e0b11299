//! Fixture trees for the integration tests.
//!
//! Input folders are built at test time in temporary directories: PDFs
//! with lopdf, photos with the `image` crate.

use exhibiter::assemble::{Assembly, OutputAggregator};
use exhibiter::config::{ListOptions, RunOptions};
use exhibiter::render::LopdfRenderer;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a PDF with `pages` Letter pages to `dir/name`.
pub fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Roman",
    });

    let mut kids: Vec<Object> = Vec::new();
    for n in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 18.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("{name} {n}"))]),
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
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
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
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).expect("save fixture pdf");
    path
}

/// Write a `width` x `height` JPEG to `dir/name`.
pub fn write_photo(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
    .save(&path)
    .expect("save fixture photo");
    path
}

/// Create `root/name` and return it.
pub fn folder(root: &Path, name: &str) -> PathBuf {
    let path = root.join(name);
    std::fs::create_dir_all(&path).expect("create fixture folder");
    path
}

/// A small case file:
///
/// ```text
/// 101 (Lease)/
///     1. Signature Page.pdf           1 page
///     2. Addendum (UNUSED).pdf        2 pages
///     evidentiary disputes.txt
/// 102. Photos/
///     2022-01-15 Photo.jpg            landscape
///     Porch/a.jpg, Porch/b.jpg
/// 103. Invoice.pdf                    3 pages
/// Drafts/
/// ```
pub fn case_folder() -> TempDir {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path();

    let lease = folder(root, "101 (Lease)");
    write_pdf(&lease, "1. Signature Page.pdf", 1);
    write_pdf(&lease, "2. Addendum (UNUSED).pdf", 2);
    std::fs::write(
        lease.join("evidentiary disputes.txt"),
        "Plaintiff objects: hearsay.",
    )
    .expect("write disputes");

    let photos = folder(root, "102. Photos");
    write_photo(&photos, "2022-01-15 Photo.jpg", 40, 30);
    let porch = folder(&photos, "Porch");
    write_photo(&porch, "a.jpg", 30, 40);
    write_photo(&porch, "b.jpg", 30, 40);

    write_pdf(root, "103. Invoice.pdf", 3);
    folder(root, "Drafts");

    temp_dir
}

/// Run the aggregator with the stock renderer.
pub fn assemble(root: &Path, run: &RunOptions, list: &ListOptions) -> exhibiter::Result<Assembly> {
    let renderer = LopdfRenderer::new();
    OutputAggregator::new(&renderer, run, list).run(root)
}
