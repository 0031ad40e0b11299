//! Exhibit assembly.
//!
//! The pipeline runs leaf-first:
//!
//! - [`DocumentAssembler`] turns one file or folder into pages
//! - [`ExhibitBuilder`] turns one exhibit folder (or titled file) into an
//!   [`Exhibit`] with a cover sheet and its documents
//! - [`OutputAggregator`] walks the input folder, binds every exhibit's
//!   pages into the master [`PageSequence`](crate::merge::PageSequence)
//!   and collects the exhibit list
//!
//! Assembly is synchronous and never prints; progress is reported as
//! [`AssemblyEvent`]s.
//!
//! # Examples
//!
//! ```no_run
//! use exhibiter::assemble::OutputAggregator;
//! use exhibiter::config::{ListOptions, RunOptions};
//! use exhibiter::render::LopdfRenderer;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let renderer = LopdfRenderer::new();
//! let run = RunOptions::default();
//! let list = ListOptions::default();
//!
//! let assembly = OutputAggregator::new(&renderer, &run, &list)
//!     .run_with_progress(Path::new("Exhibits"), |event| println!("{event}"))?;
//! println!("{} exhibits, {} pages", assembly.exhibits.len(), assembly.page_count());
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod document;
pub mod exhibit;

pub use aggregator::{Assembly, OutputAggregator};
pub use document::{Document, DocumentAssembler};
pub use exhibit::{Exhibit, ExhibitBuilder};

use std::fmt;
use std::path::PathBuf;

use crate::index::ExhibitIndex;

/// Why an entry of the input tree was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Marked `(UNUSED)` or `(EXCLUDE)` while exclusions are respected.
    Excluded,
    /// Not a PDF, PNG, JPEG or folder.
    UnsupportedType,
    /// A root entry whose name is not an exhibit name.
    NotAnExhibit,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Excluded => "excluded",
            Self::UnsupportedType => "unsupported file type",
            Self::NotAnExhibit => "not an exhibit name",
        };
        f.write_str(reason)
    }
}

/// Progress of an assembly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyEvent {
    /// An exhibit's cover sheet has been made; its documents follow.
    ExhibitStarted {
        /// Index of the exhibit.
        index: ExhibitIndex,
        /// Title from the folder name.
        title: Option<String>,
    },
    /// A document was added to the current exhibit.
    DocumentAdded {
        /// Index of the exhibit the document belongs to.
        index: ExhibitIndex,
        /// Display name of the document.
        name: String,
        /// First and last page within the exhibit.
        page_span: (usize, usize),
    },
    /// An entry was left out.
    Skipped {
        /// The entry.
        path: PathBuf,
        /// Why it was left out.
        reason: SkipReason,
    },
    /// A document contributed no pages.
    EmptyDocument {
        /// The document's folder.
        path: PathBuf,
    },
    /// An exhibit ended up with no documents.
    EmptyExhibit {
        /// Index of the exhibit.
        index: ExhibitIndex,
    },
    /// A "Reserved for Rebuttal" row was added to the list.
    RebuttalReserved {
        /// Index given to the reserved exhibit.
        index: ExhibitIndex,
    },
}

impl fmt::Display for AssemblyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExhibitStarted { index, title: None } => write!(f, "EXHIBIT {index}"),
            Self::ExhibitStarted {
                index,
                title: Some(title),
            } => write!(f, "EXHIBIT {index}: {title}"),
            Self::DocumentAdded {
                name,
                page_span: (start, end),
                ..
            } => {
                if end > start {
                    write!(f, "  {name} ({start}-{end})")
                } else {
                    write!(f, "  {name} ({start})")
                }
            }
            Self::Skipped { path, reason } => write!(f, "Skipped {} ({reason})", path.display()),
            Self::EmptyDocument { path } => {
                write!(f, "No pages in {}", path.display())
            }
            Self::EmptyExhibit { index } => write!(f, "EXHIBIT {index} has no documents"),
            Self::RebuttalReserved { index } => {
                write!(f, "EXHIBIT {index}: Reserved for Rebuttal")
            }
        }
    }
}
