//! PDF reading and page extraction.
//!
//! # Examples
//!
//! ```no_run
//! use exhibiter::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("lease.pdf"))?;
//! println!("{} pages in {:?}", loaded.page_count, loaded.load_time);
//! let pages = loaded.into_pages()?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{ExhibitError, Result};
use crate::render::Page;

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        Self {
            document,
            path,
            page_count,
            load_time,
        }
    }

    /// Split the document into pages, in page order.
    pub fn into_pages(self) -> Result<Vec<Page>> {
        Page::split(self.document)
    }
}

/// Loads source PDFs.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist
    /// - File is not a valid PDF
    /// - PDF is encrypted
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        if !path.exists() {
            return Err(ExhibitError::file_not_found(path_buf));
        }

        let start = Instant::now();

        let document = Document::load(path).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                ExhibitError::EncryptedPdf {
                    path: path_buf.clone(),
                }
            } else {
                ExhibitError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        if document.is_encrypted() {
            return Err(ExhibitError::EncryptedPdf { path: path_buf });
        }

        Ok(LoadedPdf::new(document, path_buf, start.elapsed()))
    }
}
