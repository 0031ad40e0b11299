//! Whole-run assembly: every exhibit of the input folder, bound into one
//! page sequence and one exhibit list.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::assemble::exhibit::{Exhibit, ExhibitBuilder};
use crate::assemble::{AssemblyEvent, SkipReason};
use crate::config::{ListOptions, RunOptions};
use crate::error::{ExhibitError, Result};
use crate::filter::{is_supported_file, passes};
use crate::list::{ExhibitList, ExhibitRow};
use crate::merge::PageSequence;
use crate::naming::{entry_name, is_exhibit_name};
use crate::render::PageRenderer;

/// Everything a run produced.
#[derive(Debug)]
pub struct Assembly {
    /// Cover sheets and pages of every exhibit, in order; `None` when PDF
    /// output is disabled.
    pub pages: Option<PageSequence>,
    /// The exhibits, in order. Their pages have been moved to `pages`.
    pub exhibits: Vec<Exhibit>,
    /// The exhibit list, including any reserved rebuttal row.
    pub list: ExhibitList,
}

impl Assembly {
    /// Pages of the filing: one cover sheet per exhibit plus every
    /// document page.
    pub fn page_count(&self) -> usize {
        self.exhibits
            .iter()
            .map(|exhibit| exhibit.page_count() + 1)
            .sum()
    }

    /// Documents across all exhibits.
    pub fn document_count(&self) -> usize {
        self.exhibits
            .iter()
            .map(|exhibit| exhibit.documents().len())
            .sum()
    }
}

/// Runs assembly over an input folder.
pub struct OutputAggregator<'a, R: PageRenderer + ?Sized> {
    renderer: &'a R,
    run_options: &'a RunOptions,
    list_options: &'a ListOptions,
}

impl<'a, R: PageRenderer + ?Sized> OutputAggregator<'a, R> {
    /// Create an aggregator drawing pages with `renderer`.
    pub fn new(renderer: &'a R, run_options: &'a RunOptions, list_options: &'a ListOptions) -> Self {
        Self {
            renderer,
            run_options,
            list_options,
        }
    }

    /// Assemble every exhibit under `root`.
    ///
    /// # Errors
    ///
    /// Returns `NoExhibitsFound` if no child of `root` qualifies as an
    /// exhibit, and any error raised while building an exhibit. Nothing
    /// is written either way.
    pub fn run(&self, root: &Path) -> Result<Assembly> {
        self.run_with_progress(root, |_| {})
    }

    /// Assemble every exhibit under `root`, reporting progress to
    /// `on_event`.
    pub fn run_with_progress<F>(&self, root: &Path, mut on_event: F) -> Result<Assembly>
    where
        F: FnMut(&AssemblyEvent),
    {
        let paths = self.exhibit_paths(root, &mut on_event)?;
        if paths.is_empty() {
            return Err(ExhibitError::NoExhibitsFound {
                root: root.to_path_buf(),
            });
        }

        let builder = ExhibitBuilder::new(self.renderer, self.run_options);
        let mut pages = self.run_options.include_pages.then(PageSequence::new);
        let mut exhibits: Vec<Exhibit> = Vec::with_capacity(paths.len());
        let mut seen = HashSet::with_capacity(paths.len());
        let mut list = ExhibitList::from_options(self.list_options);

        for path in paths {
            let mut exhibit = builder.build_with_progress(&path, &mut on_event)?;

            if !seen.insert(exhibit.index()) {
                return Err(ExhibitError::invalid_exhibit_name(
                    path,
                    format!("exhibit {} appears more than once", exhibit.index()),
                ));
            }

            if let Some(sequence) = pages.as_mut() {
                let (cover, document_pages) = exhibit.take_pages();
                if let Some(cover) = cover {
                    sequence.push_bookmarked(cover, exhibit.bookmark_title())?;
                }
                for page in document_pages {
                    sequence.push(page)?;
                }
            }

            list.push(ExhibitRow::from_exhibit(
                &exhibit,
                self.list_options.show_page_numbers,
            ));
            exhibits.push(exhibit);
        }

        if self.list_options.reserve_rebuttal {
            let index = list.reserve_rebuttal()?.index;
            on_event(&AssemblyEvent::RebuttalReserved { index });
        }

        Ok(Assembly {
            pages,
            exhibits,
            list,
        })
    }

    /// Children of `root` that qualify as exhibits, in name order.
    ///
    /// Folders qualify when their name is an exhibit name; files also need
    /// a supported extension. Marked entries are left out unless
    /// exclusions are disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is missing, is not a folder or cannot be
    /// listed.
    pub fn exhibit_paths<F>(&self, root: &Path, mut on_event: F) -> Result<Vec<PathBuf>>
    where
        F: FnMut(&AssemblyEvent),
    {
        if !root.exists() {
            return Err(ExhibitError::file_not_found(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ExhibitError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let mut paths = Vec::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry =
                entry.map_err(|e| ExhibitError::failed_to_read(root.to_path_buf(), e.into()))?;
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy();

            let reason = if !path.is_dir() && !is_supported_file(&file_name) {
                Some(SkipReason::UnsupportedType)
            } else if !is_exhibit_name(&entry_name(path)) {
                Some(SkipReason::NotAnExhibit)
            } else if !passes(&file_name, self.run_options.respect_exclusions) {
                Some(SkipReason::Excluded)
            } else {
                None
            };

            match reason {
                Some(reason) => on_event(&AssemblyEvent::Skipped {
                    path: path.to_path_buf(),
                    reason,
                }),
                None => paths.push(path.to_path_buf()),
            }
        }

        Ok(paths)
    }
}
