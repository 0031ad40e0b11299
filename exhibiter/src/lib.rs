//! exhibiter - Assemble litigation exhibits into a filing.
//!
//! This library turns a folder of exhibit folders into two outputs: one
//! evidence PDF (a cover sheet per exhibit, then its documents, every
//! page optionally stamped `<exhibit>-<page>`) and an exhibit list
//! describing each exhibit's contents, page references and evidentiary
//! disputes. It supports:
//!
//! - Exhibit and document naming conventions, including `(UNUSED)` markers
//! - PDF, PNG and JPEG documents, and folders of them
//! - Page labels, bookmarks and metadata
//! - A "Reserved for Rebuttal" row after the last exhibit
//! - Markdown and JSON exhibit lists
//!
//! # Examples
//!
//! ## Assemble and write both outputs
//!
//! ```no_run
//! use exhibiter::assemble::OutputAggregator;
//! use exhibiter::config::{ListFormat, ListOptions, RunOptions};
//! use exhibiter::io::{ListWriter, PdfWriter};
//! use exhibiter::merge::DocumentInfo;
//! use exhibiter::render::LopdfRenderer;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let renderer = LopdfRenderer::new();
//! let run = RunOptions::default();
//! let list = ListOptions::default();
//!
//! let assembly = OutputAggregator::new(&renderer, &run, &list).run(Path::new("Exhibits"))?;
//!
//! if let Some(pages) = assembly.pages {
//!     let document = pages.finish(&DocumentInfo::new("Defense Exhibits"), true)?;
//!     PdfWriter::new()
//!         .save(document, Path::new("Defense Exhibits.pdf"))
//!         .await?;
//! }
//!
//! let contents = assembly.list.render(ListFormat::Markdown)?;
//! ListWriter::new()
//!     .save(&contents, Path::new("Defense Exhibit List.md"))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Individual Components
//!
//! ```
//! use exhibiter::naming::{display_name, parse_exhibit_name};
//! use std::path::Path;
//!
//! let name = parse_exhibit_name("101 (Lease)", Path::new("101 (Lease)")).unwrap();
//! assert_eq!(name.index.to_string(), "101");
//! assert_eq!(name.title.as_deref(), Some("Lease"));
//!
//! assert_eq!(display_name("2022-01-15 Photo", true), "Photo 1/15/22");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assemble;
pub mod config;
pub mod error;
pub mod filter;
pub mod index;
pub mod io;
pub mod list;
pub mod merge;
pub mod naming;
pub mod output;
pub mod render;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{ExhibitError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
