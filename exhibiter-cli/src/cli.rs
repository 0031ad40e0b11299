//! CLI argument parsing for exhibiter.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.
//! It only refers to the library by its crate name so `build.rs` can
//! include it to render the man page.

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use exhibiter::config::{
    CompressionLevel, Config, LabelPosition, ListFormat, ListOptions, OverwriteMode, Party,
    RunOptions,
};
use exhibiter::error::{ExhibitError, Result};

/// Assemble litigation exhibits into an evidence PDF and an exhibit list.
///
/// INPUT_FOLDER must contain one folder per exhibit, named with a number
/// or a capital letter and an optional title, e.g. "101 (Lease)" or
/// "A. Photos". Each exhibit folder holds its documents: PDFs, JPEGs,
/// PNGs, or folders of them. A single titled file such as
/// "102. Rental Agreement.pdf" may stand in for an exhibit folder.
///
/// Anything marked "(UNUSED)" is left out unless --all is given. A file
/// named "evidentiary disputes.txt" inside an exhibit folder fills that
/// exhibit's disputes column in the list.
#[derive(Parser, Debug)]
#[command(name = "exhibiter")]
#[command(version)]
#[command(about = "Assemble litigation exhibits into an evidence PDF and an exhibit list")]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Folder containing the exhibits
    #[arg(value_name = "INPUT_FOLDER")]
    pub input: PathBuf,

    /// Where to save the evidence PDF
    ///
    /// Defaults to "./<Party> Exhibits.pdf".
    #[arg(long, value_name = "FILE", conflicts_with = "no_pdf")]
    pub pdf: Option<PathBuf>,

    /// Where to save the exhibit list (.md or .json)
    ///
    /// The format follows the extension. Defaults to
    /// "./<Party> Exhibit List.md".
    #[arg(long, value_name = "FILE", conflicts_with = "no_list")]
    pub list: Option<PathBuf>,

    /// Don't create the evidence PDF
    #[arg(long)]
    pub no_pdf: bool,

    /// Don't create the exhibit list
    #[arg(long, conflicts_with = "no_pdf")]
    pub no_list: bool,

    /// Include files and folders marked "(UNUSED)"
    #[arg(short, long)]
    pub all: bool,

    /// Don't label PDF pages or give page references in the list
    #[arg(short = 'n', long)]
    pub no_page_numbers: bool,

    /// Position of page labels, as percentages of the page from the left
    /// and bottom
    #[arg(
        short = 'c',
        long,
        num_args = 2,
        value_names = ["X", "Y"],
        default_values_t = [50.0, 3.0]
    )]
    pub page_label_coords: Vec<f32>,

    /// Don't rotate landscape photos to fill the page
    #[arg(short = 'l', long)]
    pub allow_landscape: bool,

    /// Don't strip leading numbers (e.g. "1. ") from document names
    #[arg(short, long)]
    pub keep_leading_digits: bool,

    /// The party whose exhibit list this is
    #[arg(short, long, value_name = "PARTY", default_value = "defense")]
    #[arg(value_parser = ["defense", "defendant", "plaintiff"])]
    pub party: String,

    /// Don't reserve an exhibit for rebuttal in the list
    #[arg(short = 'r', long)]
    pub no_reserve_rebuttal: bool,

    /// Which trial document attachment the exhibit list is
    #[arg(long, value_name = "N", default_value_t = 4)]
    pub attachno: u32,

    /// Append the page count to names of multi-page documents
    #[arg(long)]
    pub page_counts: bool,

    /// Add a bookmark for every exhibit's cover sheet
    #[arg(short, long)]
    pub bookmarks: bool,

    /// Compression level for the evidence PDF
    ///
    /// - none: No compression
    /// - standard: Compress streams (default)
    /// - maximum: Also drop unused objects
    #[arg(long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Overwrite existing output files without asking
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output files
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Assemble everything and report, but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show skipped files and output statistics
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if the party, compression level or list format
    /// is invalid, or if configuration validation fails.
    pub fn to_config(&self) -> Result<Config> {
        let party = Party::from_str(&self.party)?;
        let compression = CompressionLevel::from_str(&self.compression)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let list_output = (!self.no_list).then(|| {
            self.list.clone().unwrap_or_else(|| {
                PathBuf::from(Config::default_list_name(party, ListFormat::Markdown))
            })
        });
        let list_format = match &list_output {
            Some(path) => ListFormat::from_path(path)?,
            None => ListFormat::default(),
        };

        let pdf_output = (!self.no_pdf).then(|| {
            self.pdf
                .clone()
                .unwrap_or_else(|| PathBuf::from(Config::default_pdf_name(party)))
        });

        let config = Config {
            input: self.input.clone(),
            pdf_output,
            list_output,
            list_format,
            run: RunOptions {
                respect_exclusions: !self.all,
                number_pages: !self.no_page_numbers,
                label_position: self.label_position()?,
                rotate_landscape: !self.allow_landscape,
                strip_leading_digits: !self.keep_leading_digits,
                annotate_page_counts: self.page_counts,
                include_pages: !self.no_pdf,
            },
            list: ListOptions {
                attachment_no: self.attachno,
                party,
                show_page_numbers: !self.no_page_numbers,
                reserve_rebuttal: !self.no_reserve_rebuttal,
            },
            bookmarks: self.bookmarks,
            compression,
            overwrite_mode,
            dry_run: self.dry_run,
            quiet: self.quiet,
            verbose: self.verbose,
        };

        config.validate().map_err(|e| {
            ExhibitError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    fn label_position(&self) -> Result<LabelPosition> {
        match self.page_label_coords[..] {
            [x, y] => Ok(LabelPosition::new(x, y)),
            _ => Err(ExhibitError::invalid_config(
                "--page-label-coords takes exactly two values",
            )),
        }
    }
}
