//! Exhibits: a cover sheet followed by documents.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::assemble::document::{Document, DocumentAssembler};
use crate::assemble::{AssemblyEvent, SkipReason};
use crate::config::RunOptions;
use crate::error::{ExhibitError, Result};
use crate::filter::{DISPUTE_FILE, is_supported_file, passes};
use crate::index::ExhibitIndex;
use crate::naming::{entry_name, parse_exhibit_name, parse_single_file_exhibit};
use crate::render::{Page, PageRenderer};

/// One exhibit of the filing.
///
/// `page_count` always equals the sum of its documents' page counts; it
/// only changes as documents are added.
#[derive(Debug, Clone)]
pub struct Exhibit {
    index: ExhibitIndex,
    title: Option<String>,
    evidentiary_disputes: Option<String>,
    path: PathBuf,
    documents: Vec<Document>,
    page_count: usize,
    cover_page: Option<Page>,
}

impl Exhibit {
    /// An exhibit with no documents, disputes or cover sheet yet.
    pub fn new(index: ExhibitIndex, title: Option<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            title,
            evidentiary_disputes: None,
            path: path.into(),
            documents: Vec::new(),
            page_count: 0,
            cover_page: None,
        }
    }

    /// The exhibit's index.
    pub fn index(&self) -> ExhibitIndex {
        self.index
    }

    /// Title from the folder name, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Contents of the exhibit's `evidentiary disputes.txt`, verbatim.
    pub fn evidentiary_disputes(&self) -> Option<&str> {
        self.evidentiary_disputes.as_deref()
    }

    /// The folder or file the exhibit was built from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Documents in the order they were added.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Pages contributed by the documents so far, cover sheet excluded.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Number the next document's first page will get.
    pub fn next_page(&self) -> usize {
        self.page_count + 1
    }

    /// The cover sheet, unless it has been handed to the output PDF or
    /// was never made.
    pub fn cover_page(&self) -> Option<&Page> {
        self.cover_page.as_ref()
    }

    /// Outline entry text: `EXHIBIT <index>` plus the title when there is
    /// one.
    pub fn bookmark_title(&self) -> String {
        match &self.title {
            Some(title) => format!("EXHIBIT {}: {title}", self.index),
            None => format!("EXHIBIT {}", self.index),
        }
    }

    /// Paragraphs of the exhibit list's description column.
    ///
    /// The title (followed by a colon) comes first, then one paragraph
    /// per document. With `show_page_numbers`, documents after the first
    /// get a `(p.<start>)` reference unless they have no pages.
    pub fn description(&self, show_page_numbers: bool) -> Vec<String> {
        let mut paragraphs = Vec::with_capacity(self.documents.len() + 1);
        if let Some(title) = &self.title {
            paragraphs.push(format!("{title}:"));
        }

        for (i, document) in self.documents.iter().enumerate() {
            if show_page_numbers && i > 0 && document.page_count() > 0 {
                paragraphs.push(format!("{} (p.{})", document.name(), document.start_page()));
            } else {
                paragraphs.push(document.name().to_string());
            }
        }
        paragraphs
    }

    pub(crate) fn add_document(&mut self, document: Document) -> &Document {
        debug_assert_eq!(document.start_page(), self.next_page());

        self.page_count += document.page_count();
        self.documents.push(document);
        &self.documents[self.documents.len() - 1]
    }

    /// Hand over the cover sheet and every document page, in order.
    pub(crate) fn take_pages(&mut self) -> (Option<Page>, Vec<Page>) {
        let pages = self
            .documents
            .iter_mut()
            .flat_map(Document::take_pages)
            .collect();
        (self.cover_page.take(), pages)
    }
}

/// Builds an [`Exhibit`] from an exhibit folder or a titled single file.
pub struct ExhibitBuilder<'a, R: PageRenderer + ?Sized> {
    renderer: &'a R,
    options: &'a RunOptions,
    documents: DocumentAssembler<'a, R>,
}

impl<'a, R: PageRenderer + ?Sized> ExhibitBuilder<'a, R> {
    /// Create a builder drawing pages with `renderer`.
    pub fn new(renderer: &'a R, options: &'a RunOptions) -> Self {
        Self {
            renderer,
            options,
            documents: DocumentAssembler::new(renderer, options),
        }
    }

    /// Build the exhibit at `path`.
    ///
    /// # Errors
    ///
    /// Returns a naming error if `path` is not a valid exhibit name, and
    /// any error raised while reading or rendering its documents.
    pub fn build(&self, path: &Path) -> Result<Exhibit> {
        self.build_with_progress(path, |_| {})
    }

    /// Build the exhibit at `path`, reporting progress to `on_event`.
    pub fn build_with_progress<F>(&self, path: &Path, mut on_event: F) -> Result<Exhibit>
    where
        F: FnMut(&AssemblyEvent),
    {
        let name = entry_name(path);

        if path.is_dir() {
            let parsed = parse_exhibit_name(&name, path)?;
            let index = parsed.index;
            let mut exhibit = self.start(index, parsed.title, path, &mut on_event)?;
            exhibit.evidentiary_disputes = read_disputes(path)?;

            for child in self.document_paths(path, &mut on_event)? {
                let document = self.documents.add_document(&child, &mut exhibit, None)?;
                report_document(index, document, &mut on_event);
            }

            if exhibit.documents.is_empty() {
                on_event(&AssemblyEvent::EmptyExhibit { index });
            }
            Ok(exhibit)
        } else {
            let (index, title) = parse_single_file_exhibit(&name, path)?;
            let mut exhibit = self.start(index, None, path, &mut on_event)?;

            let document = self
                .documents
                .add_document(path, &mut exhibit, Some(title))?;
            report_document(index, document, &mut on_event);
            Ok(exhibit)
        }
    }

    fn start(
        &self,
        index: ExhibitIndex,
        title: Option<String>,
        path: &Path,
        on_event: &mut dyn FnMut(&AssemblyEvent),
    ) -> Result<Exhibit> {
        let mut exhibit = Exhibit::new(index, title, path);
        if self.options.include_pages {
            exhibit.cover_page = Some(self.renderer.render_cover_page(&index)?);
        }

        on_event(&AssemblyEvent::ExhibitStarted {
            index,
            title: exhibit.title.clone(),
        });
        Ok(exhibit)
    }

    /// Direct children of an exhibit folder that become documents, in
    /// name order.
    fn document_paths(
        &self,
        folder: &Path,
        on_event: &mut dyn FnMut(&AssemblyEvent),
    ) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();

        let walker = WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry =
                entry.map_err(|e| ExhibitError::failed_to_read(folder.to_path_buf(), e.into()))?;
            let file_name = entry.file_name().to_string_lossy();
            if file_name == DISPUTE_FILE {
                continue;
            }

            let reason = if !passes(&file_name, self.options.respect_exclusions) {
                Some(SkipReason::Excluded)
            } else if !entry.path().is_dir() && !is_supported_file(&file_name) {
                Some(SkipReason::UnsupportedType)
            } else {
                None
            };

            match reason {
                Some(reason) => on_event(&AssemblyEvent::Skipped {
                    path: entry.path().to_path_buf(),
                    reason,
                }),
                None => paths.push(entry.into_path()),
            }
        }

        Ok(paths)
    }
}

fn report_document(
    index: ExhibitIndex,
    document: &Document,
    on_event: &mut dyn FnMut(&AssemblyEvent),
) {
    on_event(&AssemblyEvent::DocumentAdded {
        index,
        name: document.name().to_string(),
        page_span: document.page_span(),
    });
    if document.page_count() == 0 {
        on_event(&AssemblyEvent::EmptyDocument {
            path: document.path().to_path_buf(),
        });
    }
}

/// The exhibit's dispute text, if the folder has a dispute file.
fn read_disputes(folder: &Path) -> Result<Option<String>> {
    let path = folder.join(DISPUTE_FILE);
    if !path.is_file() {
        return Ok(None);
    }

    std::fs::read_to_string(&path)
        .map(Some)
        .map_err(|e| ExhibitError::failed_to_read(path, e))
}
