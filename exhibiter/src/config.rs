//! Configuration module for exhibiter.
//!
//! The engine itself only ever sees the immutable [`RunOptions`] and
//! [`ListOptions`]. [`Config`] wraps them together with the output
//! settings the CLI resolves (paths, overwrite behaviour, verbosity) and
//! validates the whole combination once, before any folder is read.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::ExhibitError;
use std::{path::PathBuf, str::FromStr};

/// Where page labels are stamped, as percentages of the page size
/// measured from the lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelPosition {
    /// Horizontal position, 0 (left) to 100 (right).
    pub x_percent: f32,
    /// Vertical position, 0 (bottom) to 100 (top).
    pub y_percent: f32,
}

impl LabelPosition {
    /// Create a label position from percentages.
    pub fn new(x_percent: f32, y_percent: f32) -> Self {
        Self {
            x_percent,
            y_percent,
        }
    }

    /// Check that both coordinates fall on the page.
    pub fn is_on_page(&self) -> bool {
        (0.0..=100.0).contains(&self.x_percent) && (0.0..=100.0).contains(&self.y_percent)
    }
}

impl Default for LabelPosition {
    fn default() -> Self {
        Self::new(50.0, 3.0)
    }
}

/// Options that drive exhibit assembly.
///
/// Built once at the start of a run and passed by reference into every
/// component; nothing in the engine mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Skip files and folders marked `(UNUSED)` or `(EXCLUDE)`.
    pub respect_exclusions: bool,
    /// Stamp every exhibit page with `<index>-<page>`.
    pub number_pages: bool,
    /// Where the page label goes.
    pub label_position: LabelPosition,
    /// Rotate landscape images to fill a portrait page.
    pub rotate_landscape: bool,
    /// Remove `"<digits>. "` prefixes from document names.
    pub strip_leading_digits: bool,
    /// Append `" (<count>)"` to names of multi-page documents.
    pub annotate_page_counts: bool,
    /// Collect cover sheets and pages for the output PDF.
    pub include_pages: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            respect_exclusions: true,
            number_pages: true,
            label_position: LabelPosition::default(),
            rotate_landscape: true,
            strip_leading_digits: true,
            annotate_page_counts: false,
            include_pages: true,
        }
    }
}

/// The party an exhibit list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Party {
    /// The defense (default).
    #[default]
    Defense,
    /// The plaintiff.
    Plaintiff,
}

impl Party {
    /// Label used in headers, e.g. "Defense".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Defense => "Defense",
            Self::Plaintiff => "Plaintiff",
        }
    }
}

impl FromStr for Party {
    type Err = ExhibitError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "defense" | "defence" | "defendant" => Ok(Self::Defense),
            "plaintiff" => Ok(Self::Plaintiff),
            _ => Err(ExhibitError::invalid_config(format!(
                "Invalid party: {s}. Must be one of: defense, plaintiff"
            ))),
        }
    }
}

/// Options for the exhibit list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Trial-document attachment number shown in the header.
    pub attachment_no: u32,
    /// Whose list this is.
    pub party: Party,
    /// Add `(p.N)` references for documents after the first.
    pub show_page_numbers: bool,
    /// Append a "Reserved for Rebuttal" row.
    pub reserve_rebuttal: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            attachment_no: 4,
            party: Party::Defense,
            show_page_numbers: true,
            reserve_rebuttal: true,
        }
    }
}

/// File format of the exhibit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFormat {
    /// Markdown with a pipe table (pandoc-convertible to docx).
    #[default]
    Markdown,
    /// JSON rows for a downstream templating service.
    Json,
}

impl ListFormat {
    /// Infer the format from an output path's extension.
    pub fn from_path(path: &std::path::Path) -> crate::Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_str(extension)
    }

    /// Default file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

impl FromStr for ListFormat {
    type Err = ExhibitError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(ExhibitError::invalid_config(format!(
                "Unsupported exhibit list format: '{s}'. Use a .md or .json output path"
            ))),
        }
    }
}

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression.
    None,
    /// Compress streams.
    #[default]
    Standard,
    /// Compress streams and prune unreferenced objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = ExhibitError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(ExhibitError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for one exhibiter run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Folder whose children are exhibits.
    pub input: PathBuf,

    /// Where to write the evidence PDF; `None` disables it.
    pub pdf_output: Option<PathBuf>,

    /// Where to write the exhibit list; `None` disables it.
    pub list_output: Option<PathBuf>,

    /// Format of the exhibit list.
    pub list_format: ListFormat,

    /// Engine options.
    pub run: RunOptions,

    /// Exhibit list options.
    pub list: ListOptions,

    /// Add a bookmark for every exhibit.
    pub bookmarks: bool,

    /// Compression level for the PDF.
    pub compression: CompressionLevel,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Assemble and report without writing anything.
    pub dry_run: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,
}

impl Config {
    /// Default PDF file name for a party, e.g. "Defense Exhibits.pdf".
    pub fn default_pdf_name(party: Party) -> String {
        format!("{} Exhibits.pdf", party.label())
    }

    /// Default list file name for a party and format.
    pub fn default_list_name(party: Party, format: ListFormat) -> String {
        format!("{} Exhibit List.{}", party.label(), format.extension())
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - Both outputs are disabled
    /// - The label position falls outside the page
    /// - The attachment number is zero
    /// - Both outputs point at the same file
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.pdf_output.is_none() && self.list_output.is_none() {
            bail!("Nothing to do: both the PDF and the exhibit list are disabled");
        }

        let position = self.run.label_position;
        if !position.is_on_page() {
            bail!(
                "Page label coordinates must be between 0 and 100, got ({}, {})",
                position.x_percent,
                position.y_percent
            );
        }

        if self.list.attachment_no == 0 {
            bail!("Attachment number must be at least 1");
        }

        if let (Some(pdf), Some(list)) = (&self.pdf_output, &self.list_output)
            && pdf == list
        {
            bail!(
                "The PDF and the exhibit list cannot share an output path: {}",
                pdf.display()
            );
        }

        Ok(())
    }

    /// Check if output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
