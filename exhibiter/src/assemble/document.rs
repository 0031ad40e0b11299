//! Documents: one file or one folder of files inside an exhibit.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::assemble::exhibit::Exhibit;
use crate::config::RunOptions;
use crate::error::{ExhibitError, Result};
use crate::filter::{is_supported_file, passes};
use crate::naming::{display_name, entry_name};
use crate::render::{Page, PageRenderer, PageSource};

/// A document and the pages it contributed to its exhibit.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    page_span: (usize, usize),
    path: PathBuf,
    pages: Vec<Page>,
}

impl Document {
    /// Display name, as shown in the exhibit list.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First and last page within the exhibit, 1-indexed.
    ///
    /// A document without pages has `end == start - 1`.
    pub fn page_span(&self) -> (usize, usize) {
        self.page_span
    }

    /// First page within the exhibit.
    pub fn start_page(&self) -> usize {
        self.page_span.0
    }

    /// Last page within the exhibit.
    pub fn end_page(&self) -> usize {
        self.page_span.1
    }

    /// Number of pages the document contributed.
    pub fn page_count(&self) -> usize {
        self.page_span.1 + 1 - self.page_span.0
    }

    /// The file or folder the document came from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pages not yet handed to the output PDF.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub(crate) fn take_pages(&mut self) -> Vec<Page> {
        std::mem::take(&mut self.pages)
    }
}

/// Turns files and folders into [`Document`]s.
pub struct DocumentAssembler<'a, R: PageRenderer + ?Sized> {
    renderer: &'a R,
    options: &'a RunOptions,
}

impl<'a, R: PageRenderer + ?Sized> DocumentAssembler<'a, R> {
    /// Create an assembler drawing pages with `renderer`.
    pub fn new(renderer: &'a R, options: &'a RunOptions) -> Self {
        Self { renderer, options }
    }

    /// Render the document at `path` and append it to `exhibit`.
    ///
    /// The document is named `title` when given (single-file exhibits),
    /// otherwise after its own file or folder name. Each page is stamped
    /// `<index>-<page>` when page numbering is on and pages are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if a file has an unsupported type or cannot be
    /// read or rendered.
    pub fn add_document<'e>(
        &self,
        path: &Path,
        exhibit: &'e mut Exhibit,
        title: Option<String>,
    ) -> Result<&'e Document> {
        let mut name = title.unwrap_or_else(|| {
            display_name(&entry_name(path), self.options.strip_leading_digits)
        });

        let keep_pages = self.options.include_pages;
        let stamp = keep_pages && self.options.number_pages;

        let start = exhibit.next_page();
        let mut count = 0;
        let mut pages = Vec::new();

        for source in self.page_sources(path)? {
            for mut page in source.render(self.renderer, self.options.rotate_landscape)? {
                if stamp {
                    let label = format!("{}-{}", exhibit.index(), start + count);
                    self.renderer
                        .stamp_label(&mut page, &label, self.options.label_position)?;
                }
                if keep_pages {
                    pages.push(page);
                }
                count += 1;
            }
        }

        if self.options.annotate_page_counts && count > 1 {
            name = format!("{name} ({count})");
        }

        let document = Document {
            name,
            page_span: (start, start + count - 1),
            path: path.to_path_buf(),
            pages,
        };
        Ok(exhibit.add_document(document))
    }

    /// Files that make up the document at `path`, in page order.
    ///
    /// A folder contributes every supported file beneath it, sorted by
    /// path; entries marked for exclusion are pruned unless exclusions
    /// are disabled.
    pub fn page_sources(&self, path: &Path) -> Result<Vec<PageSource>> {
        if !path.is_dir() {
            return Ok(vec![PageSource::from_path(path)?]);
        }

        let respect = self.options.respect_exclusions;
        let mut files = Vec::new();

        let walker = WalkDir::new(path)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| passes(&entry.file_name().to_string_lossy(), respect));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let failed = e.path().unwrap_or(path).to_path_buf();
                ExhibitError::failed_to_read(failed, e.into())
            })?;

            if entry.file_type().is_file() && is_supported_file(&entry.file_name().to_string_lossy())
            {
                files.push(entry.into_path());
            }
        }

        files.sort();
        files.iter().map(|file| PageSource::from_path(file)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ExhibitIndex;
    use crate::testing::{self, RecordingRenderer};
    use tempfile::TempDir;

    fn exhibit() -> Exhibit {
        Exhibit::new(ExhibitIndex::number(101), Some("Lease".into()), "101 (Lease)")
    }

    #[test]
    fn test_single_pdf_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = testing::write_pdf(temp_dir.path(), "1. Signature Page.pdf", 2);
        let renderer = RecordingRenderer::default();
        let options = RunOptions::default();
        let mut exhibit = exhibit();

        let document = DocumentAssembler::new(&renderer, &options)
            .add_document(&path, &mut exhibit, None)
            .unwrap();

        assert_eq!(document.name(), "Signature Page");
        assert_eq!(document.page_span(), (1, 2));
        assert_eq!(document.pages().len(), 2);
        assert_eq!(*renderer.labels.borrow(), vec!["101-1", "101-2"]);
    }

    #[test]
    fn test_spans_are_contiguous() {
        let temp_dir = TempDir::new().unwrap();
        let first = testing::write_pdf(temp_dir.path(), "1. Lease.pdf", 3);
        let second = testing::write_pdf(temp_dir.path(), "2. Addendum.pdf", 2);
        let renderer = RecordingRenderer::default();
        let options = RunOptions::default();
        let assembler = DocumentAssembler::new(&renderer, &options);
        let mut exhibit = exhibit();

        assembler.add_document(&first, &mut exhibit, None).unwrap();
        let document = assembler.add_document(&second, &mut exhibit, None).unwrap();

        assert_eq!(document.page_span(), (4, 5));
        assert_eq!(exhibit.page_count(), 5);
        assert_eq!(renderer.labels.borrow().last().unwrap(), "101-5");
    }

    #[test]
    fn test_folder_document() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("2022-01-15 Photos");
        std::fs::create_dir_all(folder.join("nested")).unwrap();
        testing::write_png(&folder, "b.png", 4, 3);
        testing::write_png(&folder, "a.jpg.png", 4, 3);
        testing::write_pdf(&folder.join("nested"), "scan.pdf", 2);
        std::fs::write(folder.join("notes.txt"), "not a page").unwrap();
        testing::write_png(&folder, "c (UNUSED).png", 4, 3);

        let renderer = RecordingRenderer::default();
        let options = RunOptions::default();
        let mut exhibit = exhibit();

        let document = DocumentAssembler::new(&renderer, &options)
            .add_document(&folder, &mut exhibit, None)
            .unwrap();

        assert_eq!(document.name(), "Photos 1/15/22");
        assert_eq!(document.page_count(), 4);
    }

    #[test]
    fn test_folder_sources_in_path_order() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("Photos");
        std::fs::create_dir_all(folder.join("a")).unwrap();
        testing::write_png(&folder, "b.png", 2, 2);
        testing::write_png(&folder.join("a"), "z.png", 2, 2);
        testing::write_png(&folder, "c.png", 2, 2);

        let renderer = RecordingRenderer::default();
        let options = RunOptions::default();
        let sources = DocumentAssembler::new(&renderer, &options)
            .page_sources(&folder)
            .unwrap();

        let names: Vec<_> = sources
            .iter()
            .map(|source| source.path().strip_prefix(&folder).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a/z.png"),
                PathBuf::from("b.png"),
                PathBuf::from("c.png"),
            ]
        );
    }

    #[test]
    fn test_excluded_files_kept_when_exclusions_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("Photos");
        std::fs::create_dir(&folder).unwrap();
        testing::write_png(&folder, "a.png", 2, 2);
        testing::write_png(&folder, "b (UNUSED).png", 2, 2);

        let renderer = RecordingRenderer::default();
        let options = RunOptions {
            respect_exclusions: false,
            ..RunOptions::default()
        };
        let sources = DocumentAssembler::new(&renderer, &options)
            .page_sources(&folder)
            .unwrap();
        assert_eq!(sources.len(), 2);
    }

    #[test]
    fn test_empty_folder_is_zero_page_document() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("Empty");
        std::fs::create_dir(&folder).unwrap();
        let renderer = RecordingRenderer::default();
        let options = RunOptions::default();
        let mut exhibit = exhibit();

        let document = DocumentAssembler::new(&renderer, &options)
            .add_document(&folder, &mut exhibit, None)
            .unwrap();

        assert_eq!(document.page_span(), (1, 0));
        assert_eq!(document.page_count(), 0);
        assert_eq!(exhibit.page_count(), 0);
    }

    #[test]
    fn test_title_override_and_page_count_annotation() {
        let temp_dir = TempDir::new().unwrap();
        let path = testing::write_pdf(temp_dir.path(), "101. Rental Agreement.pdf", 3);
        let renderer = RecordingRenderer::default();
        let options = RunOptions {
            annotate_page_counts: true,
            ..RunOptions::default()
        };
        let mut exhibit = exhibit();

        let document = DocumentAssembler::new(&renderer, &options)
            .add_document(&path, &mut exhibit, Some("Rental Agreement".into()))
            .unwrap();

        assert_eq!(document.name(), "Rental Agreement (3)");
    }

    #[test]
    fn test_pages_dropped_without_pdf_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = testing::write_pdf(temp_dir.path(), "Lease.pdf", 2);
        let renderer = RecordingRenderer::default();
        let options = RunOptions {
            include_pages: false,
            ..RunOptions::default()
        };
        let mut exhibit = exhibit();

        let document = DocumentAssembler::new(&renderer, &options)
            .add_document(&path, &mut exhibit, None)
            .unwrap();

        assert_eq!(document.page_span(), (1, 2));
        assert!(document.pages().is_empty());
        assert!(renderer.labels.borrow().is_empty());
    }

    #[test]
    fn test_unsupported_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "text").unwrap();
        let renderer = RecordingRenderer::default();
        let options = RunOptions::default();
        let mut exhibit = exhibit();

        let err = DocumentAssembler::new(&renderer, &options)
            .add_document(&path, &mut exhibit, None)
            .unwrap_err();
        assert!(matches!(err, ExhibitError::UnsupportedType { .. }));
    }
}
